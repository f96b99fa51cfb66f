use std::net::SocketAddr;
use reqwest::Url;
use strum_macros::{Display, EnumString};
use crate::config::env::*;
use crate::domain::{AdminSecret, ConfigurationMissing, LanguageCode};
use crate::messaging::NotificationTarget;

const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

#[derive(Clone)]
#[cfg_attr(test, derive(Default))]
pub struct AppConfig {
    pub bot_token: Option<String>,
    pub webapp_url: Option<Url>,
    pub admin_secret: Option<AdminSecret>,
    pub operator_chat: Option<NotificationTarget>,
    pub default_language: LanguageCode,
}

/// Everything the update dispatcher needs, with the mandatory values already checked.
#[derive(Clone, Debug)]
pub struct DispatcherSettings {
    pub webapp_url: Url,
    pub admin_secret: Option<AdminSecret>,
    pub operator_chat: Option<NotificationTarget>,
    pub default_language: LanguageCode,
}

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub url: Option<Url>,
    pub secret_token: Option<String>,
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RegistryBackend {
    Postgres,
    Memory,
    #[default]
    Disabled,
}

#[derive(Clone, Debug)]
pub struct RegistryConfig {
    pub backend: RegistryBackend,
    pub database: Option<DatabaseConfig>,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Url,
    pub max_connections: u32
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bot_token: get_optional_env_value("BOT_TOKEN"),
            webapp_url: get_optional_env_value("WEBAPP_URL"),
            admin_secret: get_optional_env_value("ADMIN_SECRET"),
            operator_chat: get_optional_env_value("ADMIN_CHAT_ID"),
            default_language: get_env_value_or_default("DEFAULT_LANGUAGE", LanguageCode::of("ru")),
        }
    }

    /// Fails if the bot cannot do anything useful: without a token nothing can be sent,
    /// without the Mini-App URL there is nothing to open.
    pub fn dispatcher_settings(&self) -> Result<DispatcherSettings, ConfigurationMissing> {
        if self.bot_token.is_none() {
            return Err(ConfigurationMissing::new("BOT_TOKEN"))
        }
        let webapp_url = self.webapp_url.clone()
            .ok_or(ConfigurationMissing::new("WEBAPP_URL"))?;
        Ok(DispatcherSettings {
            webapp_url,
            admin_secret: self.admin_secret.clone(),
            operator_chat: self.operator_chat.clone(),
            default_language: self.default_language.clone(),
        })
    }
}

impl WebhookConfig {
    pub fn from_env() -> Self {
        Self {
            url: get_optional_env_value("WEBHOOK_URL"),
            secret_token: get_optional_env_value("WEBHOOK_SECRET_TOKEN"),
            port: get_env_value_or_default("PORT", 8080),
        }
    }

    pub fn path(&self) -> String {
        self.url.as_ref()
            .map(Url::path)
            .filter(|path| !path.is_empty() && *path != "/")
            .unwrap_or(DEFAULT_WEBHOOK_PATH)
            .to_owned()
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl RegistryConfig {
    pub fn from_env() -> Self {
        let database = DatabaseConfig::from_env()
            .inspect_err(|e| log::debug!("no database is configured: {e}"))
            .ok();
        let default_backend = if database.is_some() {
            RegistryBackend::Postgres
        } else {
            RegistryBackend::Disabled
        };
        Self {
            backend: get_env_value_or_default("REGISTRY_BACKEND", default_backend),
            database,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            url: get_env_mandatory_value("DATABASE_URL")?,
            max_connections: get_env_value_or_default("DATABASE_MAX_CONNECTIONS", 10)
        })
    }
}
