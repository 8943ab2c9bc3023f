// Check-in entity
// One row per (event, participant) recording a scan and its later confirmation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::value_objects::{CheckinId, EventId, OrgCode, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::new("latitude", "must be within [-90, 90]"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::new("longitude", "must be within [-180, 180]"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub id: CheckinId,
    pub event_id: EventId,
    pub participant_id: UserId,
    pub scanned_at: DateTime<Utc>,
    /// Organization of the participant at the time of the scan.
    pub organization: OrgCode,
    pub scanner_id: Option<UserId>,
    pub scanned_location: GeoPoint,
    pub finalized_at: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}

impl CheckinRecord {
    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckinStatus {
    Success,
    Duplicate,
    Fail,
    Late,
}

impl CheckinStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckinStatus::Success => "SUCCESS",
            CheckinStatus::Duplicate => "DUPLICATE",
            CheckinStatus::Fail => "FAIL",
            CheckinStatus::Late => "LATE",
        }
    }
}
