use std::collections::HashMap;

use tracing::info;

use crate::access::{authorize_manager, authorize_owner};
use crate::commands::checkin_commands::load_event;
use crate::dtos::MutationResult;
use crate::{AppError, AppState};
use backend_domain::{
    validate_event_payload,
    EventBundle,
    EventDraft,
    EventId,
    EventMutation,
    EventPayload,
    MutationKind,
    RefId,
    StaffAssignment,
    StaffRole,
    UserId,
    ValidationError,
};

pub async fn create_event(
    state: &AppState,
    actor: UserId,
    payload: EventPayload,
) -> Result<MutationResult, AppError> {
    if state.users.find_user(actor).await?.is_none() {
        return Err(AppError::Unauthorized);
    }
    let draft = validate_event_payload(&payload, EventId::generate())?;
    let mut staff = resolve_staff(state, &draft.staff_refs).await?;
    if !staff.iter().any(|assignment| assignment.user_id == actor) {
        staff.push(StaffAssignment {
            user_id: actor,
            role: StaffRole::Owner,
        });
    }
    apply(state, MutationKind::Create, draft, staff).await
}

/// Full replace of an event and all of its collections.
pub async fn update_event(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
    payload: EventPayload,
) -> Result<MutationResult, AppError> {
    load_event(state, event_id).await?;
    authorize_manager(state, event_id, actor).await?;
    let draft = validate_event_payload(&payload, event_id)?;
    let staff = resolve_staff(state, &draft.staff_refs).await?;
    apply(state, MutationKind::Replace, draft, staff).await
}

/// Copies business content under a fresh id. Staff and check-ins stay behind;
/// the actor owns the copy.
pub async fn duplicate_event(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
) -> Result<MutationResult, AppError> {
    let bundle = state
        .events
        .load_bundle(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;
    authorize_manager(state, event_id, actor).await?;

    let EventBundle {
        mut event,
        agenda,
        mut whitelist,
        pending,
        faculties,
        staff: _,
    } = bundle;
    event.id = EventId::generate();
    whitelist.extend(pending);

    let mutation = EventMutation {
        kind: MutationKind::Create,
        event,
        agenda,
        whitelist,
        faculties,
        staff: vec![StaffAssignment {
            user_id: actor,
            role: StaffRole::Owner,
        }],
    };
    let report = state.events.apply_mutation(mutation).await?;
    state.metrics.record_event_mutation();
    info!(source = %event_id, event_id = %report.event_id, "event duplicated");
    Ok(report.into())
}

pub async fn delete_event(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
) -> Result<(), AppError> {
    load_event(state, event_id).await?;
    authorize_owner(state, event_id, actor).await?;
    if !state.events.delete_event(event_id).await? {
        return Err(AppError::NotFound(format!("event {}", event_id)));
    }
    state.metrics.record_event_mutation();
    info!(event_id = %event_id, "event deleted");
    Ok(())
}

/// Staff must already be known users; unknown ref-ids are reported together.
async fn resolve_staff(
    state: &AppState,
    staff_refs: &[(RefId, StaffRole)],
) -> Result<Vec<StaffAssignment>, AppError> {
    if staff_refs.is_empty() {
        return Ok(Vec::new());
    }
    let ref_ids: Vec<RefId> = staff_refs.iter().map(|(ref_id, _)| *ref_id).collect();
    let known: HashMap<RefId, UserId> = state
        .users
        .find_users_by_ref_ids(&ref_ids)
        .await?
        .into_iter()
        .map(|user| (user.ref_id, user.id))
        .collect();

    let missing: Vec<String> = ref_ids
        .iter()
        .filter(|ref_id| !known.contains_key(ref_id))
        .map(|ref_id| ref_id.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::new(
            "managers_and_staff",
            format!("unknown ref_id(s): {}", missing.join(", ")),
        )
        .into());
    }

    Ok(staff_refs
        .iter()
        .filter_map(|(ref_id, role)| {
            known.get(ref_id).map(|user_id| StaffAssignment {
                user_id: *user_id,
                role: *role,
            })
        })
        .collect())
}

async fn apply(
    state: &AppState,
    kind: MutationKind,
    draft: EventDraft,
    staff: Vec<StaffAssignment>,
) -> Result<MutationResult, AppError> {
    if !staff.iter().any(|assignment| assignment.role == StaffRole::Owner) {
        return Err(ValidationError::new("managers_and_staff", "an event needs at least one owner").into());
    }
    let mutation = EventMutation {
        kind,
        event: draft.event,
        agenda: draft.agenda,
        whitelist: draft.whitelist,
        faculties: draft.faculties,
        staff,
    };
    let report = state.events.apply_mutation(mutation).await?;
    state.metrics.record_event_mutation();
    info!(
        event_id = %report.event_id,
        whitelisted = report.confirmed.len(),
        pending = report.pending.len(),
        "event saved"
    );
    Ok(report.into())
}
