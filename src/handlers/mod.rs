mod admin;
mod start;
mod update;
mod webapp;


use std::sync::Arc;
use teloxide::types::ChatId;
pub use update::*;
use crate::config::DispatcherSettings;
use crate::messaging::{Messenger, NotificationTarget, OutboundNotification};
use crate::repo::AdminRegistry;

const START_COMMAND: &str = "/start";
const ADMIN_COMMAND: &str = "/admin";
const REVOKE_COMMAND: &str = "/revoke";

/// Routes one update at a time. There is no state between updates except the registry.
pub struct Dispatcher {
    registry: Arc<dyn AdminRegistry>,
    messenger: Arc<dyn Messenger>,
    settings: DispatcherSettings,
}

/// What the handlers need to know about the message they're answering.
struct MessageContext<'a> {
    chat_id: Option<ChatId>,
    sender: Option<&'a Sender>,
    locale: String,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn AdminRegistry>, messenger: Arc<dyn Messenger>, settings: DispatcherSettings) -> Self {
        Self { registry, messenger, settings }
    }

    /// Every check runs on its own: a message matching several of them gets several answers.
    pub async fn dispatch(&self, update: InboundUpdate) {
        let Some(msg) = update.message else {
            log::debug!("the update {:?} has no message, ignoring it", update.update_id);
            return
        };
        let ctx = MessageContext {
            chat_id: msg.chat_id(),
            sender: msg.from.as_ref(),
            locale: msg.language_code(&self.settings.default_language).locale(),
        };

        if let Some(text) = msg.text.as_deref() {
            if text == START_COMMAND {
                start::start_cmd_handler(self, &ctx).await;
            }
            if text.starts_with(ADMIN_COMMAND) {
                admin::admin_cmd_handler(self, &ctx, text).await;
            }
            if text == REVOKE_COMMAND {
                admin::revoke_cmd_handler(self, &ctx).await;
            }
        }
        if let Some(data) = msg.web_app_data() {
            webapp::web_app_data_handler(self, &ctx, data).await;
        }
    }

    async fn reply(&self, chat_id: ChatId, answer: String) {
        self.messenger.send(OutboundNotification::text(chat_id, answer)).await
    }

    /// Does nothing if no operator chat is configured.
    async fn notify_operator(&self, build: impl FnOnce(NotificationTarget, &str) -> OutboundNotification) {
        if let Some(target) = self.settings.operator_chat.clone() {
            let notification = build(target, &self.operator_locale());
            self.messenger.send(notification).await
        }
    }

    fn operator_locale(&self) -> String {
        self.settings.default_language.locale()
    }
}

impl MessageContext<'_> {
    fn chat_id_or_warn(&self, command: &str) -> Option<ChatId> {
        if self.chat_id.is_none() {
            log::warn!("{command} was sent without a chat id, there is nobody to answer");
        }
        self.chat_id
    }
}
