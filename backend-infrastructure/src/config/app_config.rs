use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{IdentityConfig, RuntimeConfig};

use crate::config::validate_base_url;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub identity_base_url: String,
    pub identity_client_id: Option<String>,
    pub identity_client_secret: Option<String>,
    pub identity_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub report_late_status: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            api_token: None,
            identity_base_url: "http://127.0.0.1:9000/profile".to_string(),
            identity_client_id: None,
            identity_client_secret: None,
            identity_timeout_seconds: 5,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
            report_late_status: false,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("ROLLCALL_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_token = non_blank(self.api_token.take());
        self.identity_client_id = non_blank(self.identity_client_id.take());
        self.identity_client_secret = non_blank(self.identity_client_secret.take());
        self.identity_base_url = self.identity_base_url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_base_url(&self.identity_base_url)?;
        if self.identity_client_id.is_some() != self.identity_client_secret.is_some() {
            return Err(anyhow!(
                "identity_client_id and identity_client_secret must be set together"
            ));
        }
        if self.identity_timeout_seconds == 0 {
            return Err(anyhow!("identity_timeout_seconds must be greater than 0"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            identity_timeout_seconds: self.identity_timeout_seconds,
            report_late_status: self.report_late_status,
        }
    }

    pub fn to_identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            base_url: self.identity_base_url.clone(),
            client_id: self.identity_client_id.clone(),
            client_secret: self.identity_client_secret.clone(),
            timeout_seconds: self.identity_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("ROLLCALL_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("ROLLCALL_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("ROLLCALL_IDENTITY_BASE_URL") {
            self.identity_base_url = value;
        }
        if let Ok(value) = env::var("ROLLCALL_IDENTITY_CLIENT_ID") {
            self.identity_client_id = Some(value);
        }
        if let Ok(value) = env::var("ROLLCALL_IDENTITY_CLIENT_SECRET") {
            self.identity_client_secret = Some(value);
        }
        if let Ok(value) = env::var("ROLLCALL_IDENTITY_TIMEOUT_SECONDS") {
            self.identity_timeout_seconds = value.parse().unwrap_or(self.identity_timeout_seconds);
        }
        if let Ok(value) = env::var("ROLLCALL_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("ROLLCALL_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("ROLLCALL_REPORT_LATE_STATUS") {
            self.report_late_status = value.parse().unwrap_or(self.report_late_status);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|item| !item.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        let runtime = config.to_runtime_config();
        assert!(!runtime.report_late_status);
        assert_eq!(runtime.identity_timeout_seconds, 5);
    }

    #[test]
    fn parses_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
bind_addr = "0.0.0.0:8080"
report_late_status = true
identity_base_url = "https://id.example.org/profile/"
"#,
        )
        .expect("toml");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert!(config.report_late_status);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn normalize_blanks_and_trailing_slash() {
        let mut config = AppConfig {
            api_token: Some("  ".to_string()),
            identity_client_id: Some(String::new()),
            identity_base_url: " https://id.example.org/profile/ ".to_string(),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(config.api_token, None);
        assert_eq!(config.identity_client_id, None);
        assert_eq!(config.identity_base_url, "https://id.example.org/profile");
    }

    #[tokio::test]
    async fn env_overrides_apply_over_missing_file() {
        env::set_var("ROLLCALL_REPORT_LATE_STATUS", "true");
        env::set_var("ROLLCALL_IDENTITY_TIMEOUT_SECONDS", "9");
        let config = AppConfig::load_from(Path::new("./does-not-exist.toml"))
            .await
            .expect("config");
        env::remove_var("ROLLCALL_REPORT_LATE_STATUS");
        env::remove_var("ROLLCALL_IDENTITY_TIMEOUT_SECONDS");
        assert!(config.report_late_status);
        assert_eq!(config.identity_timeout_seconds, 9);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config = AppConfig {
            identity_client_id: Some("client".to_string()),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        config = AppConfig {
            identity_timeout_seconds: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
