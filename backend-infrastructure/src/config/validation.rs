use anyhow::{anyhow, Result};

/// Identity provider base URL: absolute http(s), no query string.
pub fn validate_base_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("identity_base_url must not be empty"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("identity_base_url must start with http:// or https://"));
    }
    if trimmed.contains('?') {
        return Err(anyhow!("identity_base_url must not carry a query string"));
    }
    Ok(())
}
