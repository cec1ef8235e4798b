//! GoTrue sign-in, refresh, and session resolution against a mock server.

use chrono::Utc;
use serde_json::json;
use stw_auth::{AuthError, SessionStore};
use stw_config::SupabaseConfig;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn supabase(server: &MockServer) -> SupabaseConfig {
    SupabaseConfig {
        url: server.uri(),
        anon_key: "anon-key".into(),
    }
}

fn session_body(user_id: &str, expires_at: i64, refresh_token: &str) -> serde_json::Value {
    json!({
        "access_token": "a.b.c",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": expires_at,
        "refresh_token": refresh_token,
        "user": {
            "id": user_id,
            "email": "op@example.com",
            "app_metadata": {"organization": "acme"},
            "user_metadata": {}
        }
    })
}

#[tokio::test]
async fn login_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_json(json!({"email": "op@example.com", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(session_body("u1", Utc::now().timestamp() + 3600, "r1")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let client = reqwest::Client::new();

    let session = stw_auth::login(&client, &supabase(&server), &store, "op@example.com", "pw")
        .await
        .expect("login succeeds");
    assert_eq!(session.user.id, "u1");
    assert_eq!(store.load().unwrap().user.id, "u1");
}

#[tokio::test]
async fn login_surfaces_gotrue_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let err = stw_auth::login(
        &reqwest::Client::new(),
        &supabase(&server),
        &store,
        "op@example.com",
        "wrong",
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AuthError::SignInFailed(_)));
    assert!(err.to_string().contains("Invalid login credentials"));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn resolve_returns_fresh_session_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let fresh: stw_auth::Session =
        serde_json::from_value(session_body("u1", Utc::now().timestamp() + 3600, "r1")).unwrap();
    store.save(&fresh).unwrap();

    let resolved = stw_auth::resolve_session(&reqwest::Client::new(), &supabase(&server), &store)
        .await
        .unwrap();
    assert_eq!(resolved, Some(fresh));
}

#[tokio::test]
async fn resolve_refreshes_near_expiry_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({"refresh_token": "r-old"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(session_body("u1", Utc::now().timestamp() + 3600, "r-new")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let stale: stw_auth::Session =
        serde_json::from_value(session_body("u1", Utc::now().timestamp() + 10, "r-old")).unwrap();
    store.save(&stale).unwrap();

    let resolved = stw_auth::resolve_session(&reqwest::Client::new(), &supabase(&server), &store)
        .await
        .unwrap()
        .expect("refreshed");
    assert_eq!(resolved.refresh_token, "r-new");
    assert_eq!(store.load().unwrap().refresh_token, "r-new");
}

#[tokio::test]
async fn resolve_treats_failed_refresh_as_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Refresh Token Not Found"
        })))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let expired: stw_auth::Session =
        serde_json::from_value(session_body("u1", Utc::now().timestamp() - 10, "r-old")).unwrap();
    store.save(&expired).unwrap();

    let resolved = stw_auth::resolve_session(&reqwest::Client::new(), &supabase(&server), &store)
        .await
        .unwrap();
    assert!(resolved.is_none());
}

#[tokio::test]
async fn logout_clears_store_even_if_revoke_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let store = SessionStore::file_only(tmp.path().join("session.json"));
    let session: stw_auth::Session =
        serde_json::from_value(session_body("u1", Utc::now().timestamp() + 3600, "r1")).unwrap();
    store.save(&session).unwrap();

    stw_auth::logout(&reqwest::Client::new(), &supabase(&server), &store)
        .await
        .expect("logout succeeds");
    assert!(store.load().is_none());
}
