//! `SupabaseClient` and the creation transports against a mock Supabase.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use stw_api::{
    CREATE_USER_FALLBACK_MESSAGE, DirectoryBackend, FetchPolicy, HttpTransport, SupabaseClient,
    UserCreator, supabase::FUNCTION_HTTP_ERROR,
};
use stw_config::{CreationTransportKind, StewardConfig};
use stw_core::entities::{CreateUserPayload, SimpleUser};
use stw_core::identity::CurrentUser;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> StewardConfig {
    let mut config = StewardConfig::default();
    config.supabase.url = server.uri();
    config.supabase.anon_key = "anon-key".into();
    config.client.client_id = "desk-7".into();
    config
}

fn client(server: &MockServer) -> SupabaseClient {
    SupabaseClient::from_config(&config(server), Some("operator-jwt".into())).unwrap()
}

fn payload() -> CreateUserPayload {
    CreateUserPayload {
        email: "new@example.com".into(),
        password: "s3cret".into(),
        user_name: "newbie".into(),
        department: "Support".into(),
        phone: None,
        manager: Some("u_lead".into()),
        roles: Some(vec!["agent".into()]),
    }
}

#[tokio::test]
async fn lists_users_with_selected_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("select", "id,user_name,email"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer operator-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u2", "user_name": "zed", "email": "z@example.com"},
            {"id": "u1", "user_name": null, "email": "a@example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let users = client(&server).list_users().await.unwrap().unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["u2", "u1"]);
    assert_eq!(users[1].user_name, None);
}

#[tokio::test]
async fn null_team_list_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/teams"))
        .and(query_param("select", "id,name"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert_eq!(client(&server).list_teams().await.unwrap(), None);
}

#[tokio::test]
async fn cached_directory_calls_backend_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u1", "email": "a@example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "t1", "name": "Ops"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let directory = stw_api::Directory::new(Arc::new(client(&server)), FetchPolicy::default());
    let first = directory.load().await;
    let second = directory.load().await;
    assert!(Arc::ptr_eq(&first.users, &second.users));
    assert!(Arc::ptr_eq(&first.teams, &second.teams));
    assert_eq!(second.teams[0].name, "Ops");
}

#[tokio::test]
async fn failing_list_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": "PGRST301", "message": "JWT expired"})),
        )
        .mount(&server)
        .await;

    let fetcher: stw_api::ListFetcher<SimpleUser> = stw_api::ListFetcher::new(
        Arc::new(stw_api::UsersSource(Arc::new(client(&server)))),
        FetchPolicy::Once,
    );
    let state = fetcher.mount().settled().await;
    assert!(!state.loading);
    assert!(state.data.is_empty());
}

#[tokio::test]
async fn function_transport_returns_body_on_success() {
    let server = MockServer::start().await;
    let created = json!({"user": {"id": "u9", "email": "new@example.com"}});
    Mock::given(method("POST"))
        .and(path("/functions/v1/create-user-admin"))
        .and(header("authorization", "Bearer operator-jwt"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "s3cret",
            "user_name": "newbie",
            "department": "Support",
            "manager": "u_lead",
            "roles": ["agent"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let creator = UserCreator::from_config(&config(&server), Arc::new(client(&server)));
    assert_eq!(creator.create_user(&payload()).await.unwrap(), created);
}

#[tokio::test]
async fn function_transport_reports_embedded_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/create-user-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Email taken"})))
        .mount(&server)
        .await;

    let creator = UserCreator::from_config(&config(&server), Arc::new(client(&server)));
    let err = creator.create_user(&payload()).await.unwrap_err();
    assert_eq!(err.to_string(), "Email taken");
}

#[tokio::test]
async fn function_transport_error_beats_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/create-user-admin"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Email taken"})))
        .mount(&server)
        .await;

    let creator = UserCreator::from_config(&config(&server), Arc::new(client(&server)));
    let err = creator.create_user(&payload()).await.unwrap_err();
    assert_eq!(err.to_string(), FUNCTION_HTTP_ERROR);
}

#[tokio::test]
async fn http_transport_uses_body_error_on_non_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Email taken"})))
        .mount(&server)
        .await;

    let mut config = config(&server);
    config.functions.transport = CreationTransportKind::Http;
    config.functions.create_user_endpoint = format!("{}/admin/users", server.uri());

    let creator = UserCreator::from_config(&config, Arc::new(client(&server)));
    let err = creator.create_user(&payload()).await.unwrap_err();
    assert_eq!(err.message(), "Email taken");
}

#[tokio::test]
async fn http_transport_falls_back_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/functions/v1/create-user-admin"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let mut config = config(&server);
    config.functions.transport = CreationTransportKind::Http;

    let creator = UserCreator::from_config(&config, Arc::new(client(&server)));
    let err = creator.create_user(&payload()).await.unwrap_err();
    assert_eq!(err.message(), CREATE_USER_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn http_transport_unreachable_reports_transport_error() {
    let server = MockServer::start().await;
    let client = client(&server);
    // Port 9 (discard) on localhost is closed in test environments.
    let transport = HttpTransport::new(&client, "http://127.0.0.1:9/create-user-admin");
    let creator = UserCreator::new(Arc::new(transport));

    let err = creator.create_user(&payload()).await.unwrap_err();
    assert!(!err.message().is_empty());
    assert_ne!(err.message(), CREATE_USER_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn license_status_sends_identity_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/functions/v1/license-status"))
        .and(header("x-user-id", "u1"))
        .and(header("x-client-id", "desk-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": true, "seats": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let user = CurrentUser {
        id: "u1".into(),
        organization: Some("acme".into()),
    };
    let status = client(&server).license_status(&user).await.unwrap();
    assert_eq!(status["active"], true);
}
