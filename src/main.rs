mod config;
mod domain;
mod handlers;
mod messaging;
mod metrics;
mod repo;
mod server;

use std::sync::Arc;
use rust_i18n::i18n;
use teloxide::Bot;
use crate::handlers::Dispatcher;
use crate::messaging::{DisabledMessenger, Messenger, TelegramMessenger};
use crate::server::AppState;

i18n!(fallback = "en");    // load localizations with default parameters

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    pretty_env_logger::init();

    let app_config = config::AppConfig::from_env();
    let webhook_config = config::WebhookConfig::from_env();
    let registry_config = config::RegistryConfig::from_env();
    let registry = repo::registry_from_config(&registry_config).await;

    let bot = app_config.bot_token.as_ref().map(Bot::new);
    let messenger: Arc<dyn Messenger> = match &bot {
        Some(bot) => Arc::new(TelegramMessenger::new(bot.clone())),
        None => Arc::new(DisabledMessenger),
    };
    let dispatcher = match app_config.dispatcher_settings() {
        Ok(settings) => Some(Arc::new(Dispatcher::new(registry.clone(), messenger, settings))),
        Err(e) => {
            log::error!("{e}, every update will be ignored");
            None
        }
    };

    match (&bot, &webhook_config.url) {
        (Some(bot), Some(url)) => {
            log::info!("Setting a webhook: {url}");
            if let Err(e) = messaging::set_webhook(bot, url.clone(), webhook_config.secret_token.clone()).await {
                log::error!("couldn't set the webhook: {e}");
            }
        }
        (_, None) => log::warn!("WEBHOOK_URL is not set, the webhook must be registered manually"),
        (None, Some(_)) => log::warn!("the webhook cannot be registered without BOT_TOKEN"),
    }

    let webhook_path = webhook_config.path();
    let state = AppState {
        dispatcher,
        registry,
        webhook_secret_token: webhook_config.secret_token.clone(),
    };
    let app = metrics::init(server::router(&webhook_path, state));

    let addr = webhook_config.listen_addr();
    log::info!("Listening on {addr}, updates are expected at {webhook_path}");
    let tcp_listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(tcp_listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown of the server"),
        Err(e) => {
            log::error!("failed to install CTRL+C signal handler: {e}");
            futures::future::pending::<()>().await
        }
    }
}
