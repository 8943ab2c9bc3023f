use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::Identity;
use crate::errors::IdentityError;

/// Resolves an opaque scan code to a person.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn lookup(&self, scan_code: &str) -> Result<Identity, IdentityError>;
    async fn ping(&self) -> anyhow::Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_database(&self) -> anyhow::Result<bool>;
    async fn check_identity_provider(&self) -> anyhow::Result<bool>;
}
