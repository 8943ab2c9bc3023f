// Roster entities
// Who may attend or staff an event, and the mutation that replaces them together

use serde::{Deserialize, Serialize};

use crate::entities::{AgendaSlot, Event, User};
use crate::value_objects::{EventId, OrgCode, RefId, StaffRole, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub event_id: EventId,
    pub ref_id: RefId,
}

/// Whitelist intent for a ref-id that has no local User yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PendingWhitelistEntry {
    pub event_id: EventId,
    pub ref_id: RefId,
}

impl From<PendingWhitelistEntry> for WhitelistEntry {
    fn from(pending: PendingWhitelistEntry) -> Self {
        Self {
            event_id: pending.event_id,
            ref_id: pending.ref_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AllowedFaculty {
    pub event_id: EventId,
    pub org_code: OrgCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffAssignment {
    pub user_id: UserId,
    pub role: StaffRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Insert only; an existing event with the same id is a conflict.
    Create,
    /// Full replace of an existing event and every dependent collection.
    Replace,
}

/// Everything one authoring request writes, applied atomically by the store.
#[derive(Debug, Clone)]
pub struct EventMutation {
    pub kind: MutationKind,
    pub event: Event,
    pub agenda: Vec<AgendaSlot>,
    /// Raw ref-ids; split into confirmed and pending inside the transaction.
    pub whitelist: Vec<RefId>,
    pub faculties: Vec<OrgCode>,
    pub staff: Vec<StaffAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationReport {
    pub event_id: EventId,
    pub confirmed: Vec<RefId>,
    pub pending: Vec<RefId>,
}

/// An event with all of its dependent collections.
#[derive(Debug, Clone)]
pub struct EventBundle {
    pub event: Event,
    pub agenda: Vec<AgendaSlot>,
    pub whitelist: Vec<RefId>,
    pub pending: Vec<RefId>,
    pub faculties: Vec<OrgCode>,
    pub staff: Vec<StaffAssignment>,
}

#[derive(Debug, Clone)]
pub struct PromotionReport {
    pub user: User,
    pub promoted_events: Vec<EventId>,
}
