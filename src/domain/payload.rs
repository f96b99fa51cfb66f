use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

/// Data sent by the Mini-App through `Telegram.WebApp.sendData()`.
///
/// The original JSON value is always kept, so forwarding it doesn't depend on
/// whether the shape was recognized.
#[derive(Debug, Clone, PartialEq)]
pub struct WebAppData {
    pub payload: WebAppPayload,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WebAppPayload {
    Enroll(Enrollment),
    AdminUpdate(ClubsUpdate),
    Unrecognized,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownPayload {
    Enroll(Enrollment),
    AdminUpdate(ClubsUpdate),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Enrollment {
    pub club: ClubRef,
    pub submitted_at: Option<DateTime<Utc>>,
    pub form: EnrollmentForm,
    pub telegram_user: Option<WebAppUser>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClubRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnrollmentForm {
    pub first_name: String,
    pub last_name: String,
    pub grade: String,
    pub phone: String,
    pub email: String,
    pub telegram: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClubsUpdate {
    pub submitted_at: Option<DateTime<Utc>>,
    pub clubs: Vec<Club>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Club {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl WebAppData {
    /// Never fails: a string that isn't JSON is wrapped as `{"raw": <string>}`,
    /// JSON of an unknown shape becomes [`WebAppPayload::Unrecognized`].
    pub fn decode(raw: &str) -> Self {
        let value = serde_json::from_str::<Value>(raw)
            .unwrap_or_else(|e| {
                log::debug!("web app data is not JSON ({e}), wrapping it as is");
                json!({ "raw": raw })
            });
        let payload = match serde_json::from_value::<KnownPayload>(value.clone()) {
            Ok(KnownPayload::Enroll(enrollment)) => WebAppPayload::Enroll(enrollment),
            Ok(KnownPayload::AdminUpdate(update)) => WebAppPayload::AdminUpdate(update),
            Err(e) => {
                log::debug!("unrecognized web app data: {e}");
                WebAppPayload::Unrecognized
            }
        };
        Self { payload, value }
    }

    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.value)
            .unwrap_or_else(|_| self.value.to_string())
    }
}

impl EnrollmentForm {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }
}
