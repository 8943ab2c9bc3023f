// Runtime configuration handed to the application layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub identity_timeout_seconds: u64,
    /// Surface late scans as `LATE` instead of folding them into `FAIL`.
    pub report_late_status: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            api_token: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            identity_timeout_seconds: 5,
            report_late_status: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub timeout_seconds: u64,
}
