use anyhow::anyhow;
use tracing::{debug, info};

use crate::{AppError, AppState};
use backend_domain::{Identity, StoreError, User, UserId};

/// Finds the User for an identity, creating it (and promoting its pending
/// whitelist rows) the first time the ref-id is seen. A full profile
/// replaces names stored from an earlier bare sighting.
pub async fn ensure_user(state: &AppState, identity: &Identity) -> Result<User, AppError> {
    if let Some(user) = state.users.find_user_by_ref_id(identity.ref_id).await? {
        return refresh_names(state, user, identity).await;
    }

    let candidate = User::from_identity(UserId::generate(), identity);
    match state.users.create_user_and_promote(candidate).await {
        Ok(report) => {
            if !report.promoted_events.is_empty() {
                info!(
                    ref_id = %identity.ref_id,
                    events = report.promoted_events.len(),
                    "promoted pending whitelist entries"
                );
            }
            Ok(report.user)
        }
        // Another request created the same ref-id first.
        Err(StoreError::Conflict(_)) => state
            .users
            .find_user_by_ref_id(identity.ref_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow!(
                    "user {} missing after creation conflict",
                    identity.ref_id
                ))
            }),
        Err(err) => Err(err.into()),
    }
}

async fn refresh_names(state: &AppState, user: User, identity: &Identity) -> Result<User, AppError> {
    let has_profile = !identity.name_th.is_blank() || !identity.name_en.is_blank();
    if !has_profile || (user.name_th == identity.name_th && user.name_en == identity.name_en) {
        return Ok(user);
    }
    let updated = state
        .users
        .update_user_names(user.id, identity.name_th.clone(), identity.name_en.clone())
        .await?;
    debug!(ref_id = %identity.ref_id, "user names updated from identity profile");
    Ok(updated)
}
