use rust_i18n::t;
use teloxide::types::ChatId;
use crate::domain::{AdminId, Username};
use crate::messaging::OutboundNotification;
use crate::metrics;
use super::{ADMIN_COMMAND, Dispatcher, MessageContext, REVOKE_COMMAND};

/// `/admin <code>`: the code is the second whitespace-separated token.
pub(super) async fn admin_cmd_handler(dispatcher: &Dispatcher, ctx: &MessageContext<'_>, text: &str) {
    metrics::CMD_ADMIN.invoked();
    let Some(chat_id) = ctx.chat_id_or_warn(ADMIN_COMMAND) else {
        return
    };
    let code = text.split_whitespace().nth(1);
    match (&dispatcher.settings.admin_secret, code) {
        (None, _) => {
            log::warn!("{chat_id} asked for the admin mode but ADMIN_SECRET is not set");
            dispatcher.reply(chat_id, t!("admin.not_configured", locale = &ctx.locale).to_string()).await
        }
        (Some(_), None) => {
            dispatcher.reply(chat_id, t!("admin.code_required", locale = &ctx.locale).to_string()).await
        }
        (Some(secret), Some(code)) if secret.matches(code) => {
            grant_admin_mode(dispatcher, ctx, chat_id).await
        }
        (Some(_), Some(_)) => {
            log::info!("{chat_id} sent a wrong admin code");
            dispatcher.reply(chat_id, t!("admin.wrong_code", locale = &ctx.locale).to_string()).await
        }
    }
}

async fn grant_admin_mode(dispatcher: &Dispatcher, ctx: &MessageContext<'_>, chat_id: ChatId) {
    dispatcher.reply(chat_id, t!("admin.code_accepted", locale = &ctx.locale).to_string()).await;

    let id = AdminId::from(chat_id);
    match dispatcher.registry.set(id).await {
        Ok(()) => {
            metrics::CMD_ADMIN.finished();
            log::info!("the admin mode was granted to {id}");
            dispatcher.reply(chat_id, t!("admin.granted", locale = &ctx.locale).to_string()).await;

            let username = Username::mention_or_dash(ctx.sender.and_then(|s| s.username()).as_ref());
            dispatcher.notify_operator(|operator, locale| OutboundNotification::text(operator,
                t!("operator.granted", locale = locale, id = id, username = username).to_string()
            )).await
        }
        Err(e) => {
            log::error!("couldn't grant the admin mode to {id}: {e}");
            dispatcher.reply(chat_id, t!("admin.grant_failed", locale = &ctx.locale).to_string()).await;

            dispatcher.notify_operator(|operator, locale| OutboundNotification::text(operator,
                t!("operator.grant_failed", locale = locale, id = id, error = e).to_string()
            )).await
        }
    }
}

pub(super) async fn revoke_cmd_handler(dispatcher: &Dispatcher, ctx: &MessageContext<'_>) {
    metrics::CMD_REVOKE_COUNTER.inc();
    let Some(chat_id) = ctx.chat_id_or_warn(REVOKE_COMMAND) else {
        return
    };
    let id = AdminId::from(chat_id);
    let answer = match dispatcher.registry.delete(id).await {
        Ok(()) => {
            log::info!("the admin mode was revoked from {id}");
            t!("revoke.done", locale = &ctx.locale)
        }
        Err(e) => {
            log::error!("couldn't revoke the admin mode from {id}: {e}");
            t!("revoke.failed", locale = &ctx.locale)
        }
    };
    dispatcher.reply(chat_id, answer.to_string()).await
}
