use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    CheckinRecord,
    Event,
    EventBundle,
    EventMutation,
    EventPage,
    EventSummary,
    MutationReport,
    PageRequest,
    PersonName,
    PromotionReport,
    User,
};
use crate::errors::StoreError;
use crate::value_objects::{CheckinId, EventId, OrgCode, RefId, StaffRole, UserId};

/// Read-only lookups backing the attendance policy.
#[async_trait]
pub trait EligibilityStore: Send + Sync {
    /// Confirmed whitelist rows only; pending rows never match.
    async fn is_whitelisted(&self, event_id: EventId, ref_id: RefId) -> Result<bool, StoreError>;
    async fn is_faculty_allowed(
        &self,
        event_id: EventId,
        org_code: OrgCode,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CheckinLedger: Send + Sync {
    async fn find_checkin(
        &self,
        event_id: EventId,
        participant_id: UserId,
    ) -> Result<Option<CheckinRecord>, StoreError>;
    async fn get_checkin(&self, id: CheckinId) -> Result<Option<CheckinRecord>, StoreError>;
    /// Fails with [`StoreError::Conflict`] when (event, participant) already has a row.
    async fn insert_checkin(&self, record: CheckinRecord) -> Result<CheckinRecord, StoreError>;
    /// Sets the finalize fields only if they are unset. Returns the number of rows changed.
    async fn finalize_checkin(
        &self,
        id: CheckinId,
        finalized_at: DateTime<Utc>,
        comment: Option<String>,
    ) -> Result<u64, StoreError>;
    async fn count_participants(&self, event_id: EventId) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_event(&self, id: EventId) -> Result<Option<Event>, StoreError>;
    async fn load_bundle(&self, id: EventId) -> Result<Option<EventBundle>, StoreError>;
    /// Applies every write of the mutation in one all-or-nothing transaction.
    async fn apply_mutation(&self, mutation: EventMutation) -> Result<MutationReport, StoreError>;
    /// Returns false when the event did not exist.
    async fn delete_event(&self, id: EventId) -> Result<bool, StoreError>;
    async fn find_staff_role(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<StaffRole>, StoreError>;
    /// Events where the user holds a staff role, with that role filled in.
    async fn list_managed_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
    ) -> Result<Vec<EventSummary>, StoreError>;
    /// Events the user has a check-in record for.
    async fn list_attended_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<EventPage, StoreError>;
    /// Events where the user is neither staff nor checked in.
    async fn list_discovery_events(
        &self,
        user_id: UserId,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<EventPage, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, StoreError>;
    async fn find_user_by_ref_id(&self, ref_id: RefId) -> Result<Option<User>, StoreError>;
    async fn find_users_by_ref_ids(&self, ref_ids: &[RefId]) -> Result<Vec<User>, StoreError>;
    /// Inserts the user and promotes every pending whitelist row for its ref-id,
    /// atomically. Fails with [`StoreError::Conflict`] if the ref-id is taken.
    async fn create_user_and_promote(&self, user: User) -> Result<PromotionReport, StoreError>;
    async fn update_user_names(
        &self,
        id: UserId,
        name_th: PersonName,
        name_en: PersonName,
    ) -> Result<User, StoreError>;
}
