use rust_i18n::t;
use teloxide::utils::html::escape;
use crate::domain::{Username, WebAppData, WebAppPayload};
use crate::messaging::OutboundNotification;
use crate::metrics;
use super::{Dispatcher, MessageContext, Sender};

const NO_ID: &str = "—";

/// Forwards the submission to the operator, if any, and thanks the sender.
pub(super) async fn web_app_data_handler(dispatcher: &Dispatcher, ctx: &MessageContext<'_>, raw: &str) {
    let data = WebAppData::decode(raw);
    match &data.payload {
        WebAppPayload::Enroll(enrollment) => {
            metrics::WEBAPP_DATA_COUNTER.enroll.inc();
            log::info!("enrollment to '{}' submitted at {:?}", enrollment.club.id, enrollment.submitted_at);
        }
        WebAppPayload::AdminUpdate(update) => {
            metrics::WEBAPP_DATA_COUNTER.admin_update.inc();
            log::info!("a list of {} clubs submitted at {:?}", update.clubs.len(), update.submitted_at);
        }
        WebAppPayload::Unrecognized => {
            metrics::WEBAPP_DATA_COUNTER.unrecognized.inc();
            log::info!("unrecognized web app data from {:?}", ctx.chat_id);
        }
    }

    dispatcher.notify_operator(|operator, locale| OutboundNotification::html(operator,
        render_operator_notice(&data, ctx.sender, locale)
    )).await;

    match ctx.chat_id {
        Some(chat_id) => dispatcher.reply(chat_id, t!("webapp.received", locale = &ctx.locale).to_string()).await,
        None => log::warn!("web app data without a chat id, there is nobody to thank"),
    }
}

fn render_operator_notice(data: &WebAppData, sender: Option<&Sender>, locale: &str) -> String {
    let title = match &data.payload {
        WebAppPayload::Enroll(enrollment) => t!("operator.webapp.enroll", locale = locale,
            club = escape(&enrollment.club.title),
            name = escape(&enrollment.form.full_name())),
        WebAppPayload::AdminUpdate(update) => t!("operator.webapp.admin_update", locale = locale,
            count = update.clubs.len()),
        WebAppPayload::Unrecognized => t!("operator.webapp.unrecognized", locale = locale),
    };
    let username = Username::mention_or_dash(sender.and_then(Sender::username).as_ref());
    let id = sender
        .and_then(|s| s.id)
        .map(|id| id.to_string())
        .unwrap_or_else(|| NO_ID.to_owned());
    let from = t!("operator.webapp.from", locale = locale, username = escape(&username), id = id);
    format!("<b>{title}</b>\n{from}\n\n<pre>{}</pre>", escape(&data.pretty()))
}

#[cfg(test)]
mod test {
    use crate::domain::WebAppData;
    use crate::handlers::Sender;
    use super::render_operator_notice;

    #[test]
    fn notice_for_enrollment() {
        let data = WebAppData::decode(r#"{"type":"enroll","club":{"id":"robotics","title":"R&D <club>"},
            "form":{"firstName":"Ivan","lastName":"Petrov"}}"#);
        let sender = Sender {
            id: Some(42),
            username: Some("ivan".to_owned()),
            language_code: None,
        };
        let notice = render_operator_notice(&data, Some(&sender), "en");
        assert!(notice.starts_with("<b>Enrollment to «R&amp;D &lt;club&gt;»: Ivan Petrov</b>\n"), "{notice}");
        assert!(notice.contains("From: @ivan (id 42)"), "{notice}");
        assert!(notice.contains("<pre>{\n"), "{notice}");
        assert!(notice.contains("\"title\": \"R&amp;D &lt;club&gt;\""), "{notice}");
        assert!(notice.ends_with("}</pre>"), "{notice}");
    }

    #[test]
    fn notice_without_sender() {
        let data = WebAppData::decode("plain text");
        let notice = render_operator_notice(&data, None, "en");
        assert!(notice.starts_with("<b>WebApp data</b>\nFrom: — (id —)\n\n"), "{notice}");
        assert!(notice.contains("\"raw\": \"plain text\""), "{notice}");
    }
}
