// Event entity
// An event people check in to, with its agenda and authoring payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{AttendanceMode, EventId, RevealedField};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub organizer: String,
    pub description: Option<String>,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// IANA name, e.g. `Asia/Bangkok`.
    pub timezone: String,
    pub attendance_mode: AttendanceMode,
    pub allow_all_to_scan: bool,
    pub revealed_fields: Vec<RevealedField>,
    pub evaluation_form: Option<String>,
}

impl Event {
    pub fn has_ended_at(&self, now: DateTime<Utc>) -> bool {
        now > self.ends_at
    }

    pub fn reveals(&self, field: RevealedField) -> bool {
        self.revealed_fields.contains(&field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaSlot {
    pub activity_name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgendaPayload {
    pub activity_name: String,
    /// RFC3339
    pub start_time: String,
    /// RFC3339
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffPayload {
    pub ref_id: u64,
    pub role: String,
}

/// Create/update request body. Update is a full replace, so both share one shape.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub organizer: String,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub location: String,
    #[serde(default)]
    pub agenda: Vec<AgendaPayload>,
    pub attendance_type: String,
    /// Ref-ids for whitelist events, faculty codes for faculty events.
    /// Numbers and numeric strings are both accepted.
    #[serde(default)]
    pub attendee: Vec<serde_json::Value>,
    pub revealed_fields: Vec<String>,
    #[serde(default)]
    pub managers_and_staff: Vec<StaffPayload>,
    #[serde(default)]
    pub allow_all_to_scan: Option<bool>,
    #[serde(default)]
    pub evaluation_form: Option<String>,
}
