#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use backend_application::commands::ensure_user;
use backend_application::{AppState, Metrics};
use backend_domain::{
    Clock,
    EventPayload,
    Identity,
    IdentityError,
    IdentityProvider,
    OrgCode,
    PersonName,
    RefId,
    RuntimeConfig,
    User,
};
use backend_infrastructure::{DefaultHealthService, MemoryStore};

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct FakeIdentityProvider {
    profiles: HashMap<String, Identity>,
    failure: Option<IdentityError>,
    delay: Option<Duration>,
}

impl FakeIdentityProvider {
    pub fn with_profile(mut self, scan_code: &str, identity: Identity) -> Self {
        self.profiles.insert(scan_code.to_string(), identity);
        self
    }

    pub fn failing(mut self, error: IdentityError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn lookup(&self, scan_code: &str) -> Result<Identity, IdentityError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.profiles
            .get(scan_code)
            .cloned()
            .ok_or(IdentityError::NotFound)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<FixedClock>,
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 4, 0, 0).unwrap()
}

pub fn harness() -> Harness {
    harness_with(RuntimeConfig::default(), FakeIdentityProvider::default())
}

pub fn harness_with(config: RuntimeConfig, identity: FakeIdentityProvider) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(now()));
    let identity: Arc<dyn IdentityProvider> = Arc::new(identity);
    let state = AppState {
        config,
        users: store.clone(),
        events: store.clone(),
        eligibility: store.clone(),
        ledger: store.clone(),
        identity: identity.clone(),
        clock: clock.clone(),
        health: Arc::new(DefaultHealthService::new(store.clone(), identity)),
        metrics: Arc::new(Metrics::default()),
    };
    Harness {
        state,
        store,
        clock,
    }
}

pub fn identity(ref_id: u64, org_code: u8) -> Identity {
    Identity {
        ref_id: RefId(ref_id),
        org_code: OrgCode(org_code),
        name_th: PersonName::default(),
        name_en: PersonName {
            title: "MR".to_string(),
            first_name: "Test".to_string(),
            surname: format!("User{}", ref_id),
        },
        photo_url: Some(format!("https://cdn.example.org/{}.jpg", ref_id)),
    }
}

pub async fn seed_user(state: &AppState, ref_id: u64) -> User {
    ensure_user(state, &identity(ref_id, 21))
        .await
        .expect("seed user")
}

/// 09:00 to 17:00 Bangkok time on 2026-03-01.
pub fn payload(attendance_type: &str, attendee: serde_json::Value) -> EventPayload {
    serde_json::from_value(json!({
        "name": "Orientation",
        "organizer": "Student Affairs",
        "description": "Welcome day",
        "start_time": "2026-03-01T02:00:00Z",
        "end_time": "2026-03-01T10:00:00Z",
        "timezone": "Asia/Bangkok",
        "location": "Main Hall",
        "agenda": [
            {"activity_name": "Talks", "start_time": "2026-03-01T05:00:00Z", "end_time": "2026-03-01T06:00:00Z"},
            {"activity_name": "Welcome", "start_time": "2026-03-01T02:30:00Z", "end_time": "2026-03-01T03:00:00Z"}
        ],
        "attendance_type": attendance_type,
        "attendee": attendee,
        "revealed_fields": ["name", "refid"]
    }))
    .expect("payload")
}
