use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::event_commands;
use backend_application::dtos::{EventDetail, EventListing, ListEventsRequest, MutationResult};
use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::{EventId, EventPayload};

use crate::error::HttpError;
use crate::middleware::authenticate;

pub(crate) fn parse_event_id(raw: &str) -> Result<EventId, HttpError> {
    Uuid::parse_str(raw.trim())
        .map(EventId)
        .map_err(|_| HttpError::bad_request(format!("invalid event id '{}'", raw)))
}

pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MutationResult>), HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let Json(payload) = payload?;
    let result = event_commands::create_event(&state, actor, payload).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Query<ListEventsRequest>, QueryRejection>,
) -> Result<Json<EventListing>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let Query(request) = request?;
    let listing = event_queries::list_events(&state, actor, request).await?;
    Ok(Json(listing))
}

pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<EventDetail>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    let detail = event_queries::get_event(&state, actor, event_id).await?;
    Ok(Json(detail))
}

pub async fn update_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<Json<MutationResult>, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    let Json(payload) = payload?;
    let result = event_commands::update_event(&state, actor, event_id, payload).await?;
    Ok(Json(result))
}

pub async fn delete_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    event_commands::delete_event(&state, actor, event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<(StatusCode, Json<MutationResult>), HttpError> {
    let actor = authenticate(&state.config, &headers)?;
    let event_id = parse_event_id(&event_id)?;
    let result = event_commands::duplicate_event(&state, actor, event_id).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
