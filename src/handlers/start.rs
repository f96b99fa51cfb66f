use rust_i18n::t;
use crate::messaging::{OutboundNotification, WebAppKeyboard};
use crate::metrics;
use super::{Dispatcher, MessageContext, START_COMMAND};

pub(super) async fn start_cmd_handler(dispatcher: &Dispatcher, ctx: &MessageContext<'_>) {
    metrics::CMD_START_COUNTER.inc();
    let Some(chat_id) = ctx.chat_id_or_warn(START_COMMAND) else {
        return
    };
    let keyboard = WebAppKeyboard {
        button_text: t!("start.button", locale = &ctx.locale).to_string(),
        url: dispatcher.settings.webapp_url.clone(),
    };
    let answer = OutboundNotification::text(chat_id, t!("start.prompt", locale = &ctx.locale).to_string())
        .with_keyboard(keyboard);
    dispatcher.messenger.send(answer).await
}
