use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use backend_domain::ports::IdentityProvider;
use backend_domain::{Identity, IdentityConfig, IdentityError, OrgCode, PersonName, RefId};

/// Profile payload returned by the identity provider.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    ref_id: String,
    #[serde(default)]
    org_code: Option<serde_json::Value>,
    #[serde(default, rename = "titleTH")]
    title_th: String,
    #[serde(default, rename = "firstNameTH")]
    first_name_th: String,
    #[serde(default, rename = "lastNameTH")]
    last_name_th: String,
    #[serde(default, rename = "titleEN")]
    title_en: String,
    #[serde(default, rename = "firstNameEN")]
    first_name_en: String,
    #[serde(default, rename = "lastNameEN")]
    last_name_en: String,
    #[serde(default)]
    photo_url: Option<String>,
}

impl ProfileResponse {
    fn into_identity(self) -> Result<Identity, IdentityError> {
        let ref_id = RefId::parse(&self.ref_id)
            .map_err(|err| IdentityError::Malformed(err.to_string()))?;
        let org_code = match &self.org_code {
            Some(serde_json::Value::Number(number)) => number
                .as_u64()
                .ok_or_else(|| IdentityError::Malformed(format!("orgCode {}", number)))
                .and_then(|value| {
                    OrgCode::from_number(value).map_err(|err| IdentityError::Malformed(err.to_string()))
                })?,
            Some(serde_json::Value::String(text)) => {
                OrgCode::parse(text).map_err(|err| IdentityError::Malformed(err.to_string()))?
            }
            // Student ref-ids end with the two-digit faculty code.
            _ => OrgCode((ref_id.0 % 100) as u8),
        };
        Ok(Identity {
            ref_id,
            org_code,
            name_th: PersonName {
                title: self.title_th,
                first_name: self.first_name_th,
                surname: self.last_name_th,
            },
            name_en: PersonName {
                title: self.title_en,
                first_name: self.first_name_en,
                surname: self.last_name_en,
            },
            photo_url: self.photo_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

pub struct HttpIdentityProvider {
    client: Client,
    config: IdentityConfig,
}

impl HttpIdentityProvider {
    pub fn new(config: IdentityConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .map_err(|err| anyhow!("failed to build identity client: {}", err))?;
        Ok(Self { client, config })
    }

    fn request(&self) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(&self.config.base_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let (Some(id), Some(secret)) = (&self.config.client_id, &self.config.client_secret) {
            request = request.header("ClientId", id).header("ClientSecret", secret);
        }
        request
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn lookup(&self, scan_code: &str) -> Result<Identity, IdentityError> {
        let response = self
            .request()
            .query(&[("token", scan_code)])
            .send()
            .await
            .map_err(|err| {
                warn!("identity request failed: {}", err);
                IdentityError::Unavailable(err.to_string())
            })?;

        let status = response.status();
        match status {
            StatusCode::EXPECTATION_FAILED | StatusCode::NOT_FOUND => {
                debug!(status = status.as_u16(), "scan code rejected by identity provider");
                return Err(IdentityError::NotFound);
            }
            _ if status.is_server_error() => {
                return Err(IdentityError::Unavailable(format!("status {}", status)));
            }
            _ if !status.is_success() => {
                return Err(IdentityError::Malformed(format!("unexpected status {}", status)));
            }
            _ => {}
        }

        let profile = response
            .json::<ProfileResponse>()
            .await
            .map_err(|err| IdentityError::Malformed(err.to_string()))?;
        profile.into_identity()
    }

    async fn ping(&self) -> Result<()> {
        // Any HTTP answer means the provider is reachable.
        self.request()
            .send()
            .await
            .map(|_| ())
            .map_err(|err| anyhow!("identity provider unreachable: {}", err))
    }
}
