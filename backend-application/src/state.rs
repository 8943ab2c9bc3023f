use std::sync::Arc;

use backend_domain::ports::{
    CheckinLedger,
    Clock,
    EligibilityStore,
    EventRepository,
    HealthCheckService,
    IdentityProvider,
    UserRepository,
};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub eligibility: Arc<dyn EligibilityStore>,
    pub ledger: Arc<dyn CheckinLedger>,
    pub identity: Arc<dyn IdentityProvider>,
    pub clock: Arc<dyn Clock>,
    pub health: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
