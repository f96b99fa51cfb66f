mod telegram;

use std::str::FromStr;
use async_trait::async_trait;
use reqwest::Url;
use teloxide::types::{ChatId, ParseMode, Recipient};
pub use telegram::*;

/// Fire-and-forget delivery of outbound messages.
///
/// Implementations log failures instead of returning them: nothing the bot
/// does depends on a notification being delivered.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, notification: OutboundNotification);
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundNotification {
    pub target: NotificationTarget,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<WebAppKeyboard>,
}

/// A reply keyboard with a single button that opens the Mini-App.
#[derive(Debug, Clone, PartialEq)]
pub struct WebAppKeyboard {
    pub button_text: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NotificationTarget {
    #[display("{}", _0.0)]
    Chat(ChatId),
    #[display("{_0}")]
    Channel(String),
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("neither a numeric chat id nor a @channel username: {_0}")]
pub struct InvalidTarget(#[error(not(source))] String);

impl OutboundNotification {
    pub fn text(target: impl Into<NotificationTarget>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
            parse_mode: None,
            keyboard: None,
        }
    }

    pub fn html(target: impl Into<NotificationTarget>, text: impl Into<String>) -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            ..Self::text(target, text)
        }
    }

    pub fn with_keyboard(self, keyboard: WebAppKeyboard) -> Self {
        Self {
            keyboard: Some(keyboard),
            ..self
        }
    }
}

impl From<ChatId> for NotificationTarget {
    fn from(chat_id: ChatId) -> Self {
        Self::Chat(chat_id)
    }
}

impl From<NotificationTarget> for Recipient {
    fn from(target: NotificationTarget) -> Self {
        match target {
            NotificationTarget::Chat(chat_id) => Recipient::Id(chat_id),
            NotificationTarget::Channel(username) => Recipient::ChannelUsername(username),
        }
    }
}

impl FromStr for NotificationTarget {
    type Err = InvalidTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            Ok(Self::Chat(ChatId(id)))
        } else if s.len() > 1 && s.starts_with('@') {
            Ok(Self::Channel(s.to_owned()))
        } else {
            Err(InvalidTarget(s.to_owned()))
        }
    }
}

/// Used when the bot token is missing: there is no way to reach Telegram anyway.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledMessenger;

#[async_trait]
impl Messenger for DisabledMessenger {
    async fn send(&self, notification: OutboundNotification) {
        log::warn!("no bot token, dropping a message to {}", notification.target);
    }
}
