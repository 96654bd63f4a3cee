//! HTTP transport for webhook deliveries.
//!
//! A thin adapter: method, headers and the untouched body bytes are handed
//! to [`crate::handler`], and its response code is returned with an empty
//! body.
use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
};
use log::*;

use crate::{
    config::Config,
    error::Result,
    forge::manager::ForgeManager,
    handler::{self, ResponseCode},
    webhook::request::WebhookRequest,
};

/// Read-only state shared across deliveries.
pub struct AppState {
    pub config: Config,
    pub forge: ForgeManager,
}

impl AppState {
    pub fn new(config: Config, forge: ForgeManager) -> Self {
        Self { config, forge }
    }
}

impl From<ResponseCode> for StatusCode {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Accepted => StatusCode::OK,
            ResponseCode::Rejected => StatusCode::FOUND,
            ResponseCode::BadGateway => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Build the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // every method reaches the handler so it can reject non-POST itself
        .route("/", any(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind `addr` and serve webhook deliveries until the process exits.
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "listening for webhooks for {} on {addr}",
        state.forge.repo_name()
    );

    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn webhook_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let headers = headers.iter().filter_map(|(name, value)| {
        value.to_str().ok().map(|value| (name.as_str(), value.to_string()))
    });

    let request = WebhookRequest::new(method.as_str(), headers, body.to_vec());
    let code = handler::handle(&request, &state.config, &state.forge).await;

    debug!(
        "{method} ({} bytes) -> {}",
        request.body().len(),
        code.as_u16()
    );

    code.into()
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}
