use std::sync::Arc;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use crate::domain::AdminId;
use crate::handlers::{Dispatcher, InboundUpdate};
use crate::metrics;
use crate::repo::AdminRegistry;

pub const IS_ADMIN_PATH: &str = "/is-admin";
const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";
const OK: &str = "OK";

#[derive(Clone)]
pub struct AppState {
    /// `None` if the mandatory settings are missing.
    pub dispatcher: Option<Arc<Dispatcher>>,
    pub registry: Arc<dyn AdminRegistry>,
    pub webhook_secret_token: Option<String>,
}

#[derive(Deserialize)]
struct IsAdminQuery {
    user_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

pub fn router(webhook_path: &str, state: AppState) -> Router {
    Router::new()
        .route(webhook_path, any(webhook_handler))
        .route(IS_ADMIN_PATH, get(is_admin_handler))
        .with_state(state)
}

/// Telegram redelivers an update until it gets a 2xx response, so every outcome is a 200.
async fn webhook_handler(State(state): State<AppState>, method: Method, headers: HeaderMap, body: Bytes) -> (StatusCode, &'static str) {
    if method != Method::POST {
        return (StatusCode::OK, OK)
    }
    if !state.secret_token_matches(&headers) {
        metrics::IGNORED_UPDATES_COUNTER.unauthorized.inc();
        log::warn!("an update without a valid secret token was ignored");
        return (StatusCode::OK, OK)
    }
    let Some(dispatcher) = state.dispatcher.as_ref() else {
        metrics::IGNORED_UPDATES_COUNTER.misconfigured.inc();
        log::error!("missing BOT_TOKEN or WEBAPP_URL, the update was ignored");
        return (StatusCode::OK, OK)
    };

    match InboundUpdate::parse(&body) {
        Ok(update) => dispatcher.dispatch(update).await,
        Err(e) => {
            metrics::IGNORED_UPDATES_COUNTER.malformed.inc();
            log::warn!("{e}");
        }
    }
    (StatusCode::OK, OK)
}

/// Any doubt resolves to `false`: a missing or invalid id, or a store failure.
async fn is_admin_handler(State(state): State<AppState>, query: Option<Query<IsAdminQuery>>) -> Json<IsAdminResponse> {
    let maybe_id = query
        .and_then(|Query(query)| query.user_id)
        .and_then(|user_id| user_id.trim().parse::<AdminId>()
            .inspect_err(|e| log::debug!("invalid user_id '{user_id}': {e}"))
            .ok());
    let is_admin = match maybe_id {
        Some(id) => state.registry.get(id).await,
        None => false,
    };
    Json(IsAdminResponse { is_admin })
}

impl AppState {
    fn secret_token_matches(&self, headers: &HeaderMap) -> bool {
        match &self.webhook_secret_token {
            None => true,
            Some(expected) => headers.get(SECRET_TOKEN_HEADER)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|actual| actual == expected),
        }
    }
}
