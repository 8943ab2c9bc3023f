// In-process doubles for domain service tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::entities::{CheckinRecord, Event};
use crate::errors::StoreError;
use crate::ports::{CheckinLedger, EligibilityStore};
use crate::value_objects::{AttendanceMode, CheckinId, EventId, OrgCode, RefId, RevealedField, UserId};

pub fn sample_event(mode: AttendanceMode, ends_at: DateTime<Utc>) -> Event {
    Event {
        id: EventId::generate(),
        name: "Orientation".to_string(),
        organizer: "Student Affairs".to_string(),
        description: None,
        location: "Main Hall".to_string(),
        starts_at: ends_at - Duration::hours(3),
        ends_at,
        timezone: "Asia/Bangkok".to_string(),
        attendance_mode: mode,
        allow_all_to_scan: false,
        revealed_fields: vec![RevealedField::Name],
        evaluation_form: None,
    }
}

#[derive(Default)]
pub struct FakeStore {
    whitelist: HashSet<(EventId, RefId)>,
    faculties: HashSet<(EventId, OrgCode)>,
    checkins: Mutex<HashMap<CheckinId, CheckinRecord>>,
    failing: bool,
    stale_first_read: AtomicBool,
}

impl FakeStore {
    pub fn failing_lookups(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_whitelist(mut self, event_id: EventId, ref_id: RefId) -> Self {
        self.whitelist.insert((event_id, ref_id));
        self
    }

    pub fn without_whitelist(mut self) -> Self {
        self.whitelist.clear();
        self
    }

    pub fn with_faculty(mut self, event_id: EventId, org_code: OrgCode) -> Self {
        self.faculties.insert((event_id, org_code));
        self
    }

    /// The next `find_checkin` misses even if a row exists.
    pub fn with_stale_first_read(self) -> Self {
        self.stale_first_read.store(true, Ordering::SeqCst);
        self
    }

    pub fn checkin_count(&self) -> usize {
        self.checkins.lock().unwrap().len()
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Backend(anyhow!("lookup failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl EligibilityStore for FakeStore {
    async fn is_whitelisted(&self, event_id: EventId, ref_id: RefId) -> Result<bool, StoreError> {
        self.check_failing()?;
        Ok(self.whitelist.contains(&(event_id, ref_id)))
    }

    async fn is_faculty_allowed(
        &self,
        event_id: EventId,
        org_code: OrgCode,
    ) -> Result<bool, StoreError> {
        self.check_failing()?;
        Ok(self.faculties.contains(&(event_id, org_code)))
    }
}

#[async_trait]
impl CheckinLedger for FakeStore {
    async fn find_checkin(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<CheckinRecord>, StoreError> {
        if self.stale_first_read.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        let checkins = self.checkins.lock().unwrap();
        Ok(checkins
            .values()
            .find(|record| record.event_id == event_id && record.participant_id == participant_id)
            .cloned())
    }

    async fn get_checkin(&self, id: CheckinId) -> Result<Option<CheckinRecord>, StoreError> {
        Ok(self.checkins.lock().unwrap().get(&id).cloned())
    }

    async fn insert_checkin(&self, record: CheckinRecord) -> Result<CheckinRecord, StoreError> {
        let mut checkins = self.checkins.lock().unwrap();
        let taken = checkins.values().any(|existing| {
            existing.event_id == record.event_id && existing.participant_id == record.participant_id
        });
        if taken {
            return Err(StoreError::Conflict("checkin (event, participant)".to_string()));
        }
        checkins.insert(record.id, record.clone());
        Ok(record)
    }

    async fn finalize_checkin(
        &self,
        id: CheckinId,
        finalized_at: DateTime<Utc>,
        comment: Option<String>,
    ) -> Result<u64, StoreError> {
        let mut checkins = self.checkins.lock().unwrap();
        match checkins.get_mut(&id) {
            Some(record) if !record.is_finalized() => {
                record.finalized_at = Some(finalized_at);
                record.comment = comment;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn count_participants(&self, event_id: EventId) -> Result<u64, StoreError> {
        let checkins = self.checkins.lock().unwrap();
        Ok(checkins.values().filter(|record| record.event_id == event_id).count() as u64)
    }
}
