use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{checkin_handlers, event_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/events",
            get(event_handlers::list_events).post(event_handlers::create_event),
        )
        .route(
            "/v1/events/:id",
            get(event_handlers::get_event)
                .put(event_handlers::update_event)
                .delete(event_handlers::delete_event),
        )
        .route(
            "/v1/events/:id/duplicate",
            post(event_handlers::duplicate_event),
        )
        .route(
            "/v1/events/:id/participants/:scan_code",
            post(checkin_handlers::scan_participant),
        )
        .route(
            "/v1/events/:id/checkins",
            post(checkin_handlers::resolve_checkin),
        )
        .route(
            "/v1/checkins/confirm",
            post(checkin_handlers::finalize_checkin),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
