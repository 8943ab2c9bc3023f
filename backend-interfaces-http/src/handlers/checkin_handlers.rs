use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::checkin_commands;
use backend_application::dtos::{
    CheckinReceipt,
    FinalizeCheckinRequest,
    FinalizeReceipt,
    ResolveCheckinRequest,
    ScanReceipt,
    ScanRequest,
};
use backend_application::AppState;

use crate::error::HttpError;
use crate::handlers::event_handlers::parse_event_id;
use crate::middleware::authenticate;

pub async fn scan_participant(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((event_id, scan_code)): Path<(String, String)>,
    request: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanReceipt>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    let Json(request) = request?;
    let receipt =
        checkin_commands::scan_participant(&state, actor, event_id, &scan_code, request).await?;
    Ok(Json(receipt))
}

pub async fn resolve_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    request: Result<Json<ResolveCheckinRequest>, JsonRejection>,
) -> Result<Json<CheckinReceipt>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    let Json(request) = request?;
    let receipt = checkin_commands::resolve_checkin(&state, actor, event_id, request).await?;
    Ok(Json(receipt))
}

pub async fn finalize_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<FinalizeCheckinRequest>, JsonRejection>,
) -> Result<Json<FinalizeReceipt>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let Json(request) = request?;
    let receipt = checkin_commands::finalize_checkin(&state, actor, request).await?;
    Ok(Json(receipt))
}
