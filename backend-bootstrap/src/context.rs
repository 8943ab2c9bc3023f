use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::{AppState, Metrics};
use backend_domain::ports::IdentityProvider;
use backend_infrastructure::{
    AppConfig,
    DefaultHealthService,
    HttpIdentityProvider,
    MemoryStore,
    SystemClock,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let identity_config = config.to_identity_config();

        let store = Arc::new(MemoryStore::new());
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(HttpIdentityProvider::new(identity_config.clone())?);
        info!("identity provider at {}", identity_config.base_url);

        let state = AppState {
            config: runtime_config,
            users: store.clone(),
            events: store.clone(),
            eligibility: store.clone(),
            ledger: store.clone(),
            identity: identity.clone(),
            clock: Arc::new(SystemClock),
            health: Arc::new(DefaultHealthService::new(store, identity)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
