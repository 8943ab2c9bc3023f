use std::time::Duration;

use tracing::{error, info, warn};

use crate::access::authorize_scanner;
use crate::commands::ensure_user;
use crate::dtos::{
    CheckinReceipt,
    FinalizeCheckinRequest,
    FinalizeReceipt,
    ResolveCheckinRequest,
    ScanReceipt,
    ScanRequest,
};
use crate::{AppError, AppState};
use backend_domain::{
    AttendeeCredentials,
    CheckinAttempt,
    CheckinStatus,
    CheckinStatusResolver,
    ConfirmationCodec,
    Event,
    EventId,
    GeoPoint,
    Identity,
    IdentityError,
    OrgCode,
    RefId,
    RevealedParticipant,
    UserId,
};

pub async fn resolve_checkin(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
    request: ResolveCheckinRequest,
) -> Result<CheckinReceipt, AppError> {
    let ref_id = RefId::from_number(request.attendee_ref_id)?;
    let org_code = OrgCode::from_number(request.org_code)?;
    let location = GeoPoint::new(request.latitude, request.longitude)?;

    let event = load_event(state, event_id).await?;
    authorize_scanner(state, &event, actor).await?;
    let participant = ensure_user(state, &Identity::bare(ref_id, org_code)).await?;

    run_resolver(
        state,
        &event,
        participant.id,
        AttendeeCredentials { ref_id, org_code },
        actor,
        location,
    )
    .await
}

/// Full scanning flow: look the scan code up, then check the person in.
pub async fn scan_participant(
    state: &AppState,
    actor: UserId,
    event_id: EventId,
    scan_code: &str,
    request: ScanRequest,
) -> Result<ScanReceipt, AppError> {
    let location = GeoPoint::new(request.latitude, request.longitude)?;
    let event = load_event(state, event_id).await?;
    authorize_scanner(state, &event, actor).await?;

    let identity = lookup_identity(state, scan_code).await?;
    let participant = ensure_user(state, &identity).await?;
    let receipt = run_resolver(
        state,
        &event,
        participant.id,
        AttendeeCredentials {
            ref_id: identity.ref_id,
            org_code: identity.org_code,
        },
        actor,
        location,
    )
    .await?;

    Ok(ScanReceipt {
        receipt,
        participant: RevealedParticipant::from_identity(&identity, &event.revealed_fields),
    })
}

pub async fn finalize_checkin(
    state: &AppState,
    actor: UserId,
    request: FinalizeCheckinRequest,
) -> Result<FinalizeReceipt, AppError> {
    let code = ConfirmationCodec::decode(&request.reference_code)?;
    let record = state
        .ledger
        .get_checkin(code.checkin_id)
        .await?
        .ok_or(AppError::CheckinTargetNotFound)?;
    let event = load_event(state, record.event_id).await?;
    authorize_scanner(state, &event, actor).await?;

    // The reference code carries the scan instant; that is the check-in time.
    let finalized_at = code.scanned_at;
    let comment = request
        .comment
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());
    let changed = state
        .ledger
        .finalize_checkin(record.id, finalized_at, comment)
        .await?;
    if changed == 0 {
        return match state.ledger.get_checkin(record.id).await? {
            None => Err(AppError::CheckinTargetNotFound),
            Some(_) => Err(AppError::AlreadyFinalized),
        };
    }

    state.metrics.record_finalized();
    info!(
        event_id = %record.event_id,
        checkin_id = %record.id,
        "check-in finalized"
    );
    Ok(FinalizeReceipt {
        checkin_id: record.id,
        finalized_at,
    })
}

pub(crate) async fn load_event(state: &AppState, event_id: EventId) -> Result<Event, AppError> {
    state
        .events
        .find_event(event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))
}

async fn run_resolver(
    state: &AppState,
    event: &Event,
    participant_id: UserId,
    credentials: AttendeeCredentials,
    scanner: UserId,
    location: GeoPoint,
) -> Result<CheckinReceipt, AppError> {
    let attempt = CheckinAttempt {
        participant_id,
        credentials,
        scanner_id: Some(scanner),
        location,
        now: state.clock.now(),
    };
    let resolution = CheckinStatusResolver::new(state.ledger.as_ref(), state.eligibility.as_ref())
        .resolve(event, attempt)
        .await
        .map_err(|err| {
            state.metrics.record_checkin_error();
            error!(event_id = %event.id, participant_id = %participant_id, "check-in failed: {}", err);
            AppError::from(err)
        })?;
    state.metrics.record_checkin(resolution.status);

    let status = match resolution.status {
        CheckinStatus::Late if !state.config.report_late_status => CheckinStatus::Fail,
        other => other,
    };
    info!(
        event_id = %event.id,
        participant_id = %participant_id,
        status = status.as_str(),
        "check-in resolved"
    );
    Ok(CheckinReceipt::from_resolution(status, &resolution))
}

async fn lookup_identity(state: &AppState, scan_code: &str) -> Result<Identity, AppError> {
    let scan_code = scan_code.trim();
    if scan_code.is_empty() {
        return Err(AppError::BadRequest("scan code is required".to_string()));
    }
    let timeout = Duration::from_secs(state.config.identity_timeout_seconds.max(1));
    match tokio::time::timeout(timeout, state.identity.lookup(scan_code)).await {
        Ok(Ok(identity)) => Ok(identity),
        Ok(Err(IdentityError::NotFound)) => Err(AppError::NotFound(
            "participant not found or scan code expired".to_string(),
        )),
        Ok(Err(err)) => {
            state.metrics.record_identity_failure();
            warn!("identity lookup failed: {}", err);
            Err(AppError::Upstream(err.to_string()))
        }
        Err(_) => {
            state.metrics.record_identity_failure();
            warn!(timeout_seconds = timeout.as_secs(), "identity lookup timed out");
            Err(AppError::Upstream("identity lookup timed out".to_string()))
        }
    }
}
