use serde::Deserialize;
use teloxide::types::ChatId;
use crate::domain::{LanguageCode, MalformedInput, Username};

/// The subset of a Telegram update the bot looks at. Everything is optional,
/// unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundUpdate {
    pub update_id: Option<i64>,
    pub message: Option<InboundMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundMessage {
    pub text: Option<String>,
    pub chat: Option<InboundChat>,
    pub from: Option<Sender>,
    pub web_app_data: Option<InboundWebAppData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundChat {
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sender {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundWebAppData {
    #[serde(default)]
    pub data: String,
}

impl InboundUpdate {
    pub fn parse(body: &[u8]) -> Result<Self, MalformedInput> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl InboundMessage {
    pub fn chat_id(&self) -> Option<ChatId> {
        self.chat.as_ref()
            .and_then(|chat| chat.id)
            .map(ChatId)
    }

    pub fn web_app_data(&self) -> Option<&str> {
        self.web_app_data.as_ref()
            .map(|wad| wad.data.as_str())
            .filter(|data| !data.is_empty())
    }

    pub fn language_code(&self, fallback: &LanguageCode) -> LanguageCode {
        let maybe_code = self.from.as_ref()
            .and_then(|from| from.language_code.as_deref());
        LanguageCode::from_maybe_string(maybe_code, fallback)
    }
}

impl Sender {
    pub fn username(&self) -> Option<Username> {
        self.username.as_ref()
            .filter(|name| !name.is_empty())
            .cloned()
            .map(Username::new)
    }
}

#[cfg(test)]
mod test {
    use teloxide::types::ChatId;
    use crate::domain::LanguageCode;
    use super::InboundUpdate;

    #[test]
    fn full_message() {
        let body = br#"{
            "update_id": 1000,
            "message": {
                "message_id": 5,
                "date": 1725184500,
                "text": "/start",
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 42, "is_bot": false, "first_name": "Ivan", "username": "ivan", "language_code": "en" },
                "web_app_data": { "data": "{\"type\":\"enroll\"}", "button_text": "Open" }
            }
        }"#;
        let update = InboundUpdate::parse(body).expect("valid update");
        let msg = update.message.expect("message must be present");
        assert_eq!(update.update_id, Some(1000));
        assert_eq!(msg.text.as_deref(), Some("/start"));
        assert_eq!(msg.chat_id(), Some(ChatId(42)));
        assert_eq!(msg.web_app_data(), Some("{\"type\":\"enroll\"}"));
        assert_eq!(msg.language_code(&LanguageCode::of("ru")).locale(), "en");
        let from = msg.from.expect("sender must be present");
        assert_eq!(from.username().map(|u| u.value_ref().to_owned()), Some("ivan".to_owned()));
    }

    #[test]
    fn sparse_message() {
        let update = InboundUpdate::parse(br#"{"message":{"web_app_data":{"data":""}}}"#)
            .expect("valid update");
        let msg = update.message.expect("message must be present");
        assert_eq!(msg.chat_id(), None);
        assert_eq!(msg.web_app_data(), None);
        assert_eq!(msg.language_code(&LanguageCode::of("ru")).locale(), "ru");

        let update = InboundUpdate::parse(br#"{"message":{"chat":{"type":"private"},"from":{"id":7},"web_app_data":{"data":"{}"}}}"#)
            .expect("a chat without an id must not fail the update");
        let msg = update.message.expect("message must be present");
        assert_eq!(msg.chat_id(), None);
        assert_eq!(msg.web_app_data(), Some("{}"));

        let update = InboundUpdate::parse(br#"{"update_id":7,"edited_message":{}}"#)
            .expect("valid update");
        assert!(update.message.is_none());
    }

    #[test]
    fn malformed() {
        assert!(InboundUpdate::parse(b"not json").is_err());
        assert!(InboundUpdate::parse(b"").is_err());
        assert!(InboundUpdate::parse(br#"{"message":{"chat":{"id":"abc"}}}"#).is_err());
    }
}
