// Event payload validation
// Turns an authoring payload into typed rows, rejecting bad input before any write

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::entities::{AgendaPayload, AgendaSlot, Event, EventPayload};
use crate::errors::ValidationError;
use crate::value_objects::{AttendanceMode, EventId, OrgCode, RefId, RevealedField, StaffRole};

/// A validated payload. Staff are still ref-ids; resolving them needs the user store.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub event: Event,
    pub agenda: Vec<AgendaSlot>,
    pub whitelist: Vec<RefId>,
    pub faculties: Vec<OrgCode>,
    pub staff_refs: Vec<(RefId, StaffRole)>,
}

pub fn validate_event_payload(
    payload: &EventPayload,
    id: EventId,
) -> Result<EventDraft, ValidationError> {
    let name = required("name", &payload.name)?;
    let organizer = required("organizer", &payload.organizer)?;
    let location = required("location", &payload.location)?;

    let timezone: Tz = payload
        .timezone
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("timezone", format!("unknown timezone '{}'", payload.timezone)))?;
    let starts_at = parse_instant("start_time", &payload.start_time)?;
    let ends_at = parse_instant("end_time", &payload.end_time)?;
    if ends_at <= starts_at {
        return Err(ValidationError::new("end_time", "must be after start_time"));
    }
    if local_date(starts_at, timezone) != local_date(ends_at, timezone) {
        return Err(ValidationError::new(
            "end_time",
            format!("must fall on the same day as start_time in {}", timezone.name()),
        ));
    }

    let agenda = validate_agenda(&payload.agenda, starts_at, ends_at)?;
    let attendance_mode = AttendanceMode::parse(&payload.attendance_type)?;
    let (whitelist, faculties) = split_attendees(attendance_mode, &payload.attendee)?;
    let revealed_fields = RevealedField::parse_list(&payload.revealed_fields)?;
    let staff_refs = validate_staff(payload)?;

    let event = Event {
        id,
        name,
        organizer,
        description: optional(&payload.description),
        location,
        starts_at,
        ends_at,
        timezone: timezone.name().to_string(),
        attendance_mode,
        allow_all_to_scan: payload.allow_all_to_scan.unwrap_or(false),
        revealed_fields,
        evaluation_form: optional(&payload.evaluation_form),
    };

    Ok(EventDraft {
        event,
        agenda,
        whitelist,
        faculties,
        staff_refs,
    })
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| ValidationError::new(field, format!("not an RFC3339 timestamp: {}", err)))
}

fn local_date(instant: DateTime<Utc>, timezone: Tz) -> NaiveDate {
    instant.with_timezone(&timezone).date_naive()
}

/// Slots must sit strictly inside the event window.
fn validate_agenda(
    items: &[AgendaPayload],
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
) -> Result<Vec<AgendaSlot>, ValidationError> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut slots = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let field = format!("agenda[{}]", index);
        let activity_name = required(&field, &item.activity_name)?;
        let starts_at = parse_instant(&field, &item.start_time)?;
        let ends_at = parse_instant(&field, &item.end_time)?;
        if ends_at <= starts_at {
            return Err(ValidationError::new(field, "end_time must be after start_time"));
        }
        if starts_at <= event_start || ends_at >= event_end {
            return Err(ValidationError::new(field, "must fall within the event window"));
        }
        if !seen.insert((starts_at, ends_at)) {
            return Err(ValidationError::new(field, "duplicate time slot"));
        }
        slots.push(AgendaSlot {
            activity_name,
            starts_at,
            ends_at,
        });
    }
    Ok(slots)
}

fn attendee_number(value: &serde_json::Value) -> Result<u64, ValidationError> {
    let parsed = match value {
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ValidationError::new("attendee", format!("'{}' is not a non-negative integer", value))
    })
}

fn split_attendees(
    mode: AttendanceMode,
    attendees: &[serde_json::Value],
) -> Result<(Vec<RefId>, Vec<OrgCode>), ValidationError> {
    match mode {
        AttendanceMode::All => {
            if !attendees.is_empty() {
                return Err(ValidationError::new(
                    "attendee",
                    "must be empty when attendance_type is 'all'",
                ));
            }
            Ok((Vec::new(), Vec::new()))
        }
        AttendanceMode::Whitelist => {
            let mut ref_ids = Vec::with_capacity(attendees.len());
            for value in attendees {
                let ref_id = RefId::from_number(attendee_number(value)?)
                    .map_err(|err| ValidationError::new("attendee", err.message))?;
                if !ref_ids.contains(&ref_id) {
                    ref_ids.push(ref_id);
                }
            }
            Ok((ref_ids, Vec::new()))
        }
        AttendanceMode::Faculties => {
            let mut codes = Vec::with_capacity(attendees.len());
            for value in attendees {
                let code = OrgCode::from_number(attendee_number(value)?)
                    .map_err(|err| ValidationError::new("attendee", err.message))?;
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
            Ok((Vec::new(), codes))
        }
    }
}

fn validate_staff(payload: &EventPayload) -> Result<Vec<(RefId, StaffRole)>, ValidationError> {
    let mut roles: HashMap<RefId, StaffRole> = HashMap::new();
    let mut ordered = Vec::with_capacity(payload.managers_and_staff.len());
    for item in &payload.managers_and_staff {
        let ref_id = RefId::from_number(item.ref_id)
            .map_err(|err| ValidationError::new("managers_and_staff", err.message))?;
        let role = StaffRole::parse(&item.role)?;
        match roles.get(&ref_id) {
            Some(existing) if *existing != role => {
                return Err(ValidationError::new(
                    "managers_and_staff",
                    format!("ref_id {} is listed with more than one role", ref_id),
                ));
            }
            Some(_) => {}
            None => {
                roles.insert(ref_id, role);
                ordered.push((ref_id, role));
            }
        }
    }
    Ok(ordered)
}
