use axum::http::HeaderMap;
use uuid::Uuid;

use backend_domain::{RuntimeConfig, UserId};

use crate::error::HttpError;

/// Header carrying the already-authenticated actor, set by the gateway.
pub const ACTOR_HEADER: &str = "X-Actor-Id";

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Checks the bearer token, then reads the actor id.
pub fn authenticate(config: &RuntimeConfig, headers: &HeaderMap) -> Result<UserId, HttpError> {
    if !authorize(config, headers) {
        return Err(HttpError::Unauthorized);
    }
    extract_actor(headers).ok_or(HttpError::Unauthorized)
}

fn extract_actor(headers: &HeaderMap) -> Option<UserId> {
    let value = headers.get(ACTOR_HEADER)?.to_str().ok()?.trim();
    Uuid::parse_str(value).ok().map(UserId)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn config(token: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            api_token: token.map(str::to_string),
            ..RuntimeConfig::default()
        }
    }

    #[test]
    fn bearer_token_must_match_when_configured() {
        let mut headers = HeaderMap::new();
        assert!(authorize(&config(None), &headers));
        assert!(!authorize(&config(Some("s3cret")), &headers));

        headers.insert("Authorization", HeaderValue::from_static("Bearer s3cret"));
        assert!(authorize(&config(Some("s3cret")), &headers));
        headers.insert("Authorization", HeaderValue::from_static("Bearer other"));
        assert!(!authorize(&config(Some("s3cret")), &headers));
    }

    #[test]
    fn actor_header_must_be_a_uuid() {
        let actor = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        assert!(authenticate(&config(None), &headers).is_err());

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert!(authenticate(&config(None), &headers).is_err());

        headers.insert(
            ACTOR_HEADER,
            HeaderValue::from_str(&actor.to_string()).unwrap(),
        );
        assert_eq!(authenticate(&config(None), &headers).unwrap(), UserId(actor));
    }
}
