use async_trait::async_trait;
use reqwest::Url;
use teloxide::{Bot, RequestError};
use teloxide::requests::Requester;
use teloxide::types::{ButtonRequest, KeyboardButton, KeyboardMarkup, WebAppInfo};
use crate::domain::UpstreamSendFailure;
use crate::metrics;
use super::{Messenger, OutboundNotification, WebAppKeyboard};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn try_send(&self, notification: OutboundNotification) -> Result<(), UpstreamSendFailure> {
        let target = notification.target.to_string();
        let mut request = self.bot.send_message(notification.target, notification.text);
        request.parse_mode = notification.parse_mode;
        request.reply_markup = notification.keyboard
            .map(|keyboard| keyboard.into_markup().into());
        request.await
            .map_err(|e| UpstreamSendFailure::new(target, e))?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, notification: OutboundNotification) {
        if let Err(e) = self.try_send(notification).await {
            metrics::SEND_FAILURES_COUNTER.inc();
            log::error!("{e}");
        }
    }
}

impl WebAppKeyboard {
    fn into_markup(self) -> KeyboardMarkup {
        let button = KeyboardButton::new(self.button_text)
            .request(ButtonRequest::WebApp(WebAppInfo { url: self.url }));
        KeyboardMarkup::new(vec![vec![button]])
            .resize_keyboard(true)
            .persistent()
    }
}

/// Points Telegram to our webhook endpoint.
pub async fn set_webhook(bot: &Bot, url: Url, secret_token: Option<String>) -> Result<(), RequestError> {
    let mut request = bot.set_webhook(url);
    request.secret_token = secret_token;
    request.await?;
    Ok(())
}
