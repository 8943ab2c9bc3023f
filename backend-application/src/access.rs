// Actor permission checks against an event's staff assignments

use backend_domain::{Event, EventId, StaffRole, UserId};

use crate::{AppError, AppState};

pub async fn actor_role(
    state: &AppState,
    event_id: EventId,
    actor: UserId,
) -> Result<Option<StaffRole>, AppError> {
    Ok(state.events.find_staff_role(event_id, actor).await?)
}

/// Any staff role may scan; everyone may when the event allows it.
pub async fn authorize_scanner(
    state: &AppState,
    event: &Event,
    actor: UserId,
) -> Result<(), AppError> {
    if event.allow_all_to_scan {
        return Ok(());
    }
    match actor_role(state, event.id, actor).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Forbidden(format!(
            "actor {} is not staff of event {}",
            actor, event.id
        ))),
    }
}

pub async fn authorize_manager(
    state: &AppState,
    event_id: EventId,
    actor: UserId,
) -> Result<StaffRole, AppError> {
    match actor_role(state, event_id, actor).await? {
        Some(role) if role.can_manage() => Ok(role),
        _ => Err(AppError::Forbidden(
            "only an owner or manager may change this event".to_string(),
        )),
    }
}

pub async fn authorize_owner(
    state: &AppState,
    event_id: EventId,
    actor: UserId,
) -> Result<(), AppError> {
    match actor_role(state, event_id, actor).await? {
        Some(role) if role.can_delete() => Ok(()),
        _ => Err(AppError::Forbidden(
            "only an owner may delete this event".to_string(),
        )),
    }
}
