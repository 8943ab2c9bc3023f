use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::{EventRepository, HealthCheckService, IdentityProvider};

pub struct DefaultHealthService {
    events: Arc<dyn EventRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl DefaultHealthService {
    pub fn new(events: Arc<dyn EventRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { events, identity }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.events
            .ping()
            .await
            .map(|_| true)
            .map_err(anyhow::Error::from)
    }

    async fn check_identity_provider(&self) -> anyhow::Result<bool> {
        self.identity.ping().await.map(|_| true)
    }
}
