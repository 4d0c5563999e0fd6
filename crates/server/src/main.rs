use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use mailer::ResendClient;
use notify_api::{notify, NotifyContext};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{NotifyRequest, NotifyResponse, NOTIFY_ROUTE},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

const MAX_NOTIFY_BODY_BYTES: usize = 16 * 1024;
const INVALID_BODY: &str = "Invalid request body";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let sender = ResendClient::new(&settings.resend_base_url, settings.resend_api_key.clone())?;
    let api = NotifyContext {
        sender: Arc::new(sender),
        branding: settings.branding(),
    };

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            NOTIFY_ROUTE,
            post(http_notify).layer(RequestBodyLimitLayer::new(MAX_NOTIFY_BODY_BYTES)),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_notify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NotifyRequest>, JsonRejection>,
) -> Result<Json<NotifyResponse>, (StatusCode, Json<ApiError>)> {
    let Json(req) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected notify request body");
        (StatusCode::BAD_REQUEST, Json(ApiError::new(INVALID_BODY)))
    })?;

    notify(&state.api, req).await.map(Json).map_err(error_response)
}

fn error_response(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err.into()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
