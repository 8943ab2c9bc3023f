// Request and response shapes shared by commands, queries and the HTTP layer

use backend_domain::{
    AgendaSlot,
    CheckinId,
    CheckinResolution,
    CheckinStatus,
    ConfirmationCodec,
    Event,
    EventId,
    EventPage,
    EventSummary,
    MutationReport,
    RefId,
    RevealedParticipant,
    StaffRole,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Check-in for an attendee whose identity the caller already resolved.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveCheckinRequest {
    pub attendee_ref_id: u64,
    pub org_code: u64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeCheckinRequest {
    #[serde(alias = "encoded_one_time_code")]
    pub reference_code: String,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckinReceipt {
    pub status: CheckinStatus,
    pub scanned_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_id: Option<CheckinId>,
}

impl CheckinReceipt {
    /// `status` may differ from the resolution's when late scans are reported as failures.
    pub fn from_resolution(status: CheckinStatus, resolution: &CheckinResolution) -> Self {
        let record = resolution.record.as_ref();
        Self {
            status,
            scanned_at: resolution.scanned_at(),
            reference_code: record.map(|record| ConfirmationCodec::encode(record.scanned_at, record.id)),
            checkin_id: record.map(|record| record.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReceipt {
    #[serde(flatten)]
    pub receipt: CheckinReceipt,
    pub participant: RevealedParticipant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizeReceipt {
    pub checkin_id: CheckinId,
    pub finalized_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationResult {
    pub event_id: EventId,
    pub whitelisted: Vec<RefId>,
    pub pending: Vec<RefId>,
}

impl From<MutationReport> for MutationResult {
    fn from(report: MutationReport) -> Self {
        Self {
            event_id: report.event_id,
            whitelisted: report.confirmed,
            pending: report.pending,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub agenda: Vec<AgendaSlot>,
    pub total_registered: u64,
    pub role: Option<StaffRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventScope {
    /// Events the actor is staff of.
    Managed,
    /// Events the actor checked in to.
    Attended,
    /// Everything else.
    Discovery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEventsRequest {
    pub scope: EventScope,
    #[serde(default)]
    pub search: Option<String>,
    /// Zero-based; ignored for managed listings.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListing {
    pub items: Vec<EventSummary>,
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
}

impl EventListing {
    pub fn paged(page: EventPage, page_number: u32, page_size: u32) -> Self {
        Self {
            items: page.items,
            pagination: Some(Pagination {
                page: page_number,
                page_size,
                total: page.total,
                has_next: page.has_next,
            }),
        }
    }
}
