use crate::errors::StoreError;
use crate::ports::EligibilityStore;
use crate::value_objects::{AttendanceMode, EventId, OrgCode, RefId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

impl From<bool> for Access {
    fn from(allowed: bool) -> Self {
        if allowed {
            Access::Allow
        } else {
            Access::Deny
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendeeCredentials {
    pub ref_id: RefId,
    pub org_code: OrgCode,
}

/// Decides whether an attendee may check in to an event under its attendance mode.
pub struct AttendancePolicy;

impl AttendancePolicy {
    pub async fn evaluate(
        store: &dyn EligibilityStore,
        mode: AttendanceMode,
        event_id: EventId,
        credentials: AttendeeCredentials,
    ) -> Result<Access, StoreError> {
        let allowed = match mode {
            AttendanceMode::All => true,
            AttendanceMode::Whitelist => store.is_whitelisted(event_id, credentials.ref_id).await?,
            AttendanceMode::Faculties => {
                store
                    .is_faculty_allowed(event_id, credentials.org_code)
                    .await?
            }
        };
        Ok(Access::from(allowed))
    }
}
