// In-process store backing every persistence port
// Each call runs under one lock with no await inside, and multi-step writes
// validate everything before their first write.

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use backend_domain::ports::{CheckinLedger, EligibilityStore, EventRepository, UserRepository};
use backend_domain::{
    AgendaSlot,
    AllowedFaculty,
    CheckinId,
    CheckinRecord,
    Event,
    EventBundle,
    EventId,
    EventMutation,
    EventPage,
    EventSummary,
    MutationKind,
    MutationReport,
    OrgCode,
    PageRequest,
    PendingWhitelistEntry,
    PersonName,
    PromotionReport,
    RefId,
    StaffAssignment,
    StaffRole,
    StoreError,
    User,
    UserId,
    WhitelistEntry,
    WhitelistReconciler,
    sort_summaries,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    users_by_ref: HashMap<RefId, UserId>,
    events: HashMap<EventId, Event>,
    agenda: HashMap<EventId, Vec<AgendaSlot>>,
    whitelist: BTreeSet<WhitelistEntry>,
    pending: BTreeSet<PendingWhitelistEntry>,
    faculties: BTreeSet<AllowedFaculty>,
    staff: HashMap<EventId, Vec<StaffAssignment>>,
    checkins: HashMap<CheckinId, CheckinRecord>,
    /// Uniqueness of (event, participant).
    checkin_index: HashMap<(EventId, UserId), CheckinId>,
}

impl Tables {
    fn clear_roster(&mut self, event_id: EventId) {
        self.agenda.remove(&event_id);
        self.whitelist.retain(|entry| entry.event_id != event_id);
        self.pending.retain(|entry| entry.event_id != event_id);
        self.faculties.retain(|entry| entry.event_id != event_id);
        self.staff.remove(&event_id);
    }

    /// Checks every precondition before the first write, so a rejected
    /// mutation leaves the tables untouched.
    fn write_mutation(&mut self, mutation: EventMutation) -> Result<MutationReport, StoreError> {
        let event_id = mutation.event.id;
        let exists = self.events.contains_key(&event_id);
        match mutation.kind {
            MutationKind::Create if exists => {
                return Err(StoreError::Conflict(format!("event {} already exists", event_id)));
            }
            MutationKind::Replace if !exists => {
                return Err(StoreError::NotFound(format!("event {}", event_id)));
            }
            _ => {}
        }

        let mut staff: Vec<StaffAssignment> = Vec::with_capacity(mutation.staff.len());
        for assignment in mutation.staff {
            if !self.users.contains_key(&assignment.user_id) {
                return Err(StoreError::NotFound(format!("user {}", assignment.user_id)));
            }
            if staff.iter().any(|existing| existing.user_id == assignment.user_id) {
                return Err(StoreError::Conflict(format!(
                    "user {} assigned twice to event {}",
                    assignment.user_id, event_id
                )));
            }
            staff.push(assignment);
        }

        let known: HashSet<RefId> = mutation
            .whitelist
            .iter()
            .copied()
            .filter(|ref_id| self.users_by_ref.contains_key(ref_id))
            .collect();
        let reconciled = WhitelistReconciler::reconcile(&mutation.whitelist, &known);

        if mutation.kind == MutationKind::Replace {
            self.clear_roster(event_id);
        }
        self.events.insert(event_id, mutation.event);
        self.agenda.insert(event_id, mutation.agenda);
        self.whitelist
            .extend(reconciled.confirmed.iter().map(|ref_id| WhitelistEntry {
                event_id,
                ref_id: *ref_id,
            }));
        self.pending
            .extend(reconciled.pending.iter().map(|ref_id| PendingWhitelistEntry {
                event_id,
                ref_id: *ref_id,
            }));
        self.faculties.extend(
            mutation
                .faculties
                .into_iter()
                .map(|org_code| AllowedFaculty { event_id, org_code }),
        );
        self.staff.insert(event_id, staff);

        Ok(MutationReport {
            event_id,
            confirmed: reconciled.confirmed,
            pending: reconciled.pending,
        })
    }

    fn staff_role(&self, event_id: EventId, user_id: UserId) -> Option<StaffRole> {
        self.staff.get(&event_id).and_then(|staff| {
            staff
                .iter()
                .find(|assignment| assignment.user_id == user_id)
                .map(|assignment| assignment.role)
        })
    }

    fn attended(&self, user_id: UserId) -> HashSet<EventId> {
        self.checkin_index
            .keys()
            .filter(|(_, participant)| *participant == user_id)
            .map(|(event_id, _)| *event_id)
            .collect()
    }

    fn summaries<F>(&self, search: Option<&str>, role_of: F) -> Vec<EventSummary>
    where
        F: Fn(&Event) -> Option<Option<StaffRole>>,
    {
        self.events
            .values()
            .filter_map(|event| role_of(event).map(|role| EventSummary::from_event(event, role)))
            .filter(|summary| search.map_or(true, |needle| summary.matches(needle)))
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EligibilityStore for MemoryStore {
    async fn is_whitelisted(&self, event_id: EventId, ref_id: RefId) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.whitelist.contains(&WhitelistEntry { event_id, ref_id }))
    }

    async fn is_faculty_allowed(
        &self,
        event_id: EventId,
        org_code: OrgCode,
    ) -> Result<bool, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.faculties.contains(&AllowedFaculty { event_id, org_code }))
    }
}

#[async_trait]
impl CheckinLedger for MemoryStore {
    async fn find_checkin(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<CheckinRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .checkin_index
            .get(&(event_id, participant_id))
            .and_then(|id| tables.checkins.get(id))
            .cloned())
    }

    async fn get_checkin(&self, id: CheckinId) -> Result<Option<CheckinRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.checkins.get(&id).cloned())
    }

    async fn insert_checkin(&self, record: CheckinRecord) -> Result<CheckinRecord, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.events.contains_key(&record.event_id) {
            return Err(StoreError::NotFound(format!("event {}", record.event_id)));
        }
        let key = (record.event_id, record.participant_id);
        if tables.checkin_index.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "participant {} already checked in to event {}",
                record.participant_id, record.event_id
            )));
        }
        tables.checkin_index.insert(key, record.id);
        tables.checkins.insert(record.id, record.clone());
        Ok(record)
    }

    async fn finalize_checkin(
        &self,
        id: CheckinId,
        finalized_at: DateTime<Utc>,
        comment: Option<String>,
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        match tables.checkins.get_mut(&id) {
            Some(record) if record.finalized_at.is_none() => {
                record.finalized_at = Some(finalized_at);
                record.comment = comment;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn count_participants(&self, event_id: EventId) -> Result<u64, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .checkin_index
            .keys()
            .filter(|(event, _)| *event == event_id)
            .count() as u64)
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn find_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.events.get(&id).cloned())
    }

    async fn load_bundle(&self, id: EventId) -> Result<Option<EventBundle>, StoreError> {
        let tables = self.tables.lock().await;
        let Some(event) = tables.events.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(Some(EventBundle {
            event,
            agenda: tables.agenda.get(&id).cloned().unwrap_or_default(),
            whitelist: tables
                .whitelist
                .iter()
                .filter(|entry| entry.event_id == id)
                .map(|entry| entry.ref_id)
                .collect(),
            pending: tables
                .pending
                .iter()
                .filter(|entry| entry.event_id == id)
                .map(|entry| entry.ref_id)
                .collect(),
            faculties: tables
                .faculties
                .iter()
                .filter(|entry| entry.event_id == id)
                .map(|entry| entry.org_code)
                .collect(),
            staff: tables.staff.get(&id).cloned().unwrap_or_default(),
        }))
    }

    async fn apply_mutation(&self, mutation: EventMutation) -> Result<MutationReport, StoreError> {
        let mut tables = self.tables.lock().await;
        let report = tables.write_mutation(mutation)?;
        debug!(event_id = %report.event_id, "event mutation committed");
        Ok(report)
    }

    async fn delete_event(&self, id: EventId) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.events.remove(&id).is_none() {
            return Ok(false);
        }
        tables.clear_roster(id);
        tables.checkins.retain(|_, record| record.event_id != id);
        tables.checkin_index.retain(|(event_id, _), _| *event_id != id);
        Ok(true)
    }

    async fn find_staff_role(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<StaffRole>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.staff_role(event_id, user_id))
    }

    async fn list_managed_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
    ) -> Result<Vec<EventSummary>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rows = tables.summaries(search, |event| {
            tables.staff_role(event.id, user_id).map(Some)
        });
        sort_summaries(&mut rows);
        Ok(rows)
    }

    async fn list_attended_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<EventPage, StoreError> {
        let tables = self.tables.lock().await;
        let attended = tables.attended(user_id);
        let rows = tables.summaries(search, |event| attended.contains(&event.id).then_some(None));
        Ok(EventPage::paginate(rows, page))
    }

    async fn list_discovery_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<EventPage, StoreError> {
        let tables = self.tables.lock().await;
        let attended = tables.attended(user_id);
        let rows = tables.summaries(search, |event| {
            let hidden =
                attended.contains(&event.id) || tables.staff_role(event.id, user_id).is_some();
            (!hidden).then_some(None)
        });
        Ok(EventPage::paginate(rows, page))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let _tables = self.tables.lock().await;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_user_by_ref_id(&self, ref_id: RefId) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users_by_ref
            .get(&ref_id)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_users_by_ref_ids(&self, ref_ids: &[RefId]) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(ref_ids
            .iter()
            .filter_map(|ref_id| tables.users_by_ref.get(ref_id))
            .filter_map(|id| tables.users.get(id))
            .cloned()
            .collect())
    }

    async fn create_user_and_promote(&self, user: User) -> Result<PromotionReport, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.users_by_ref.contains_key(&user.ref_id) || tables.users.contains_key(&user.id) {
            return Err(StoreError::Conflict(format!("user with ref_id {} exists", user.ref_id)));
        }
        let promotion = WhitelistReconciler::promote(user.ref_id, &tables.pending, &tables.whitelist);
        for entry in promotion.insert {
            tables.whitelist.insert(entry);
        }
        for entry in &promotion.remove {
            tables.pending.remove(entry);
        }
        tables.users_by_ref.insert(user.ref_id, user.id);
        tables.users.insert(user.id, user.clone());
        Ok(PromotionReport {
            user,
            promoted_events: promotion.events,
        })
    }

    async fn update_user_names(
        &self,
        id: UserId,
        name_th: PersonName,
        name_en: PersonName,
    ) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;
        user.name_th = name_th;
        user.name_en = name_en;
        Ok(user.clone())
    }
}
