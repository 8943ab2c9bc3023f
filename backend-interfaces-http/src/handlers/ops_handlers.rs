use std::future::Future;

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;

use crate::middleware::authorize;

#[derive(Serialize)]
pub struct ReadinessReport {
    database: bool,
    identity_provider: bool,
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    let database =
        check_dependency("database", timeout_duration, state.health.check_database()).await;
    let identity_provider = check_dependency(
        "identity provider",
        timeout_duration,
        state.health.check_identity_provider(),
    )
    .await;

    let status = if database && identity_provider {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessReport {
            database,
            identity_provider,
        }),
    )
}

async fn check_dependency(
    name: &str,
    limit: Duration,
    check: impl Future<Output = anyhow::Result<bool>>,
) -> bool {
    match timeout(limit, check).await {
        Ok(Ok(ok)) => ok,
        Ok(Err(err)) => {
            error!("{} ready check failed: {}", name, err);
            false
        }
        Err(_) => {
            error!("{} ready check timeout after {}s", name, limit.as_secs());
            false
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
