// Event listings
// Summary rows shown in managed, attended and discovery listings

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Event;
use crate::value_objects::{EventId, StaffRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub organizer: String,
    pub description: Option<String>,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Only set in managed listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<StaffRole>,
    pub evaluation_form: Option<String>,
}

impl EventSummary {
    pub fn from_event(event: &Event, role: Option<StaffRole>) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            organizer: event.organizer.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            role,
            evaluation_form: event.evaluation_form.clone(),
        }
    }

    /// Case-insensitive substring match over the text columns and the role.
    pub fn matches(&self, search: &str) -> bool {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&needle);
        contains(&self.name)
            || contains(&self.organizer)
            || contains(&self.location)
            || self.description.as_deref().is_some_and(contains)
            || self.evaluation_form.as_deref().is_some_and(contains)
            || self.role.is_some_and(|role| contains(role.as_str()))
    }
}

/// Zero-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const MAX_PAGE_SIZE: u32 = 100;
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventPage {
    pub items: Vec<EventSummary>,
    pub total: u64,
    pub has_next: bool,
}

impl EventPage {
    /// Sorts by start time then id, and cuts out the requested page.
    pub fn paginate(mut rows: Vec<EventSummary>, request: PageRequest) -> Self {
        sort_summaries(&mut rows);
        let total = rows.len() as u64;
        let offset = (request.page as usize).saturating_mul(request.page_size as usize);
        let items: Vec<EventSummary> = rows
            .into_iter()
            .skip(offset)
            .take(request.page_size as usize)
            .collect();
        let has_next = (offset + items.len()) < total as usize;
        Self {
            items,
            total,
            has_next,
        }
    }
}

pub fn sort_summaries(rows: &mut [EventSummary]) {
    rows.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));
}
