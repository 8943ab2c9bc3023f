use std::collections::HashMap;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use backend_domain::{IdentityConfig, IdentityError, IdentityProvider, OrgCode, RefId};
use backend_infrastructure::HttpIdentityProvider;

async fn profile(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response {
    if headers.get("ClientId").and_then(|value| value.to_str().ok()) != Some("client") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match query.get("token").map(String::as_str) {
        Some("good") => Json(json!({
            "userId": "abc",
            "userType": "student",
            "refId": "6530000021",
            "firstNameTH": "ค",
            "lastNameTH": "ง",
            "firstNameEN": "C",
            "lastNameEN": "D"
        }))
        .into_response(),
        Some("garbled") => (StatusCode::OK, "not json").into_response(),
        Some("boom") => StatusCode::BAD_GATEWAY.into_response(),
        _ => StatusCode::EXPECTATION_FAILED.into_response(),
    }
}

async fn spawn_provider() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    let router = Router::new().route("/profile", get(profile));
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{}/profile", addr)
}

fn client(base_url: String) -> HttpIdentityProvider {
    HttpIdentityProvider::new(IdentityConfig {
        base_url,
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        timeout_seconds: 2,
    })
    .expect("client")
}

#[tokio::test]
async fn maps_provider_responses() {
    let provider = client(spawn_provider().await);

    let identity = provider.lookup("good").await.expect("identity");
    assert_eq!(identity.ref_id, RefId(6_530_000_021));
    assert_eq!(identity.org_code, OrgCode(21));
    assert_eq!(identity.name_th.first_name, "ค");

    assert_eq!(provider.lookup("expired").await, Err(IdentityError::NotFound));
    assert!(matches!(
        provider.lookup("boom").await,
        Err(IdentityError::Unavailable(_))
    ));
    assert!(matches!(
        provider.lookup("garbled").await,
        Err(IdentityError::Malformed(_))
    ));
    assert!(provider.ping().await.is_ok());
}

#[tokio::test]
async fn unreachable_provider_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let provider = client(format!("http://{}/profile", addr));
    assert!(matches!(
        provider.lookup("good").await,
        Err(IdentityError::Unavailable(_))
    ));
    assert!(provider.ping().await.is_err());
}
