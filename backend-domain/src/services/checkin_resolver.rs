use chrono::{DateTime, Utc};

use crate::entities::{CheckinRecord, CheckinStatus, Event, GeoPoint};
use crate::errors::StoreError;
use crate::ports::{CheckinLedger, EligibilityStore};
use crate::services::attendance_policy::{Access, AttendancePolicy, AttendeeCredentials};
use crate::value_objects::{CheckinId, UserId};

#[derive(Debug, Clone)]
pub struct CheckinAttempt {
    pub participant_id: UserId,
    pub credentials: AttendeeCredentials,
    pub scanner_id: Option<UserId>,
    pub location: GeoPoint,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CheckinResolution {
    pub status: CheckinStatus,
    pub evaluated_at: DateTime<Utc>,
    /// The new row on success, the surviving row on duplicate.
    pub record: Option<CheckinRecord>,
}

impl CheckinResolution {
    fn without_record(status: CheckinStatus, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            status,
            evaluated_at,
            record: None,
        }
    }

    fn with_record(status: CheckinStatus, evaluated_at: DateTime<Utc>, record: CheckinRecord) -> Self {
        Self {
            status,
            evaluated_at,
            record: Some(record),
        }
    }

    pub fn scanned_at(&self) -> DateTime<Utc> {
        self.record
            .as_ref()
            .map(|record| record.scanned_at)
            .unwrap_or(self.evaluated_at)
    }
}

/// Classifies a check-in attempt. Rules run in a fixed order:
/// duplicate, access, time window, insert.
pub struct CheckinStatusResolver<'a> {
    ledger: &'a dyn CheckinLedger,
    eligibility: &'a dyn EligibilityStore,
}

impl<'a> CheckinStatusResolver<'a> {
    pub fn new(ledger: &'a dyn CheckinLedger, eligibility: &'a dyn EligibilityStore) -> Self {
        Self {
            ledger,
            eligibility,
        }
    }

    pub async fn resolve(
        &self,
        event: &Event,
        attempt: CheckinAttempt,
    ) -> Result<CheckinResolution, StoreError> {
        let now = attempt.now;
        if let Some(existing) = self
            .ledger
            .find_checkin(event.id, attempt.participant_id)
            .await?
        {
            return Ok(CheckinResolution::with_record(CheckinStatus::Duplicate, now, existing));
        }

        if event.attendance_mode.requires_access_check() {
            let access = AttendancePolicy::evaluate(
                self.eligibility,
                event.attendance_mode,
                event.id,
                attempt.credentials,
            )
            .await?;
            if access == Access::Deny {
                return Ok(CheckinResolution::without_record(CheckinStatus::Fail, now));
            }
        }

        if event.has_ended_at(now) {
            return Ok(CheckinResolution::without_record(CheckinStatus::Late, now));
        }

        let record = CheckinRecord {
            id: CheckinId::generate(),
            event_id: event.id,
            participant_id: attempt.participant_id,
            scanned_at: now,
            organization: attempt.credentials.org_code,
            scanner_id: attempt.scanner_id,
            scanned_location: attempt.location,
            finalized_at: None,
            comment: None,
        };
        match self.ledger.insert_checkin(record).await {
            Ok(record) => Ok(CheckinResolution::with_record(CheckinStatus::Success, now, record)),
            // Lost a race against a concurrent scan of the same attendee.
            Err(StoreError::Conflict(reason)) => {
                let existing = self
                    .ledger
                    .find_checkin(event.id, attempt.participant_id)
                    .await?
                    .ok_or_else(|| {
                        StoreError::Conflict(format!("{} (no surviving check-in row)", reason))
                    })?;
                Ok(CheckinResolution::with_record(CheckinStatus::Duplicate, now, existing))
            }
            Err(err) => Err(err),
        }
    }
}
