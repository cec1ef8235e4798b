//! Supabase GoTrue token endpoint calls.
//!
//! Talks to `<supabase>/auth/v1/token` directly via `reqwest`. Every request
//! carries the project's anon key in the `apikey` header.

use serde::Deserialize;
use stw_config::SupabaseConfig;

use crate::error::AuthError;
use crate::session::Session;

/// Error body returned by GoTrue on 4xx responses.
#[derive(Debug, Deserialize)]
struct GoTrueError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns `AuthError::SignInFailed` if the request fails, the credentials
/// are rejected, or the response cannot be parsed.
pub async fn sign_in_with_password(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let url = format!("{}/token?grant_type=password", supabase.auth_url());
    token_request(
        client,
        supabase,
        &url,
        &serde_json::json!({ "email": email, "password": password }),
    )
    .await
    .map_err(AuthError::SignInFailed)
}

/// Exchange a refresh token for a new session.
///
/// # Errors
///
/// Returns `AuthError::RefreshFailed` if the refresh token is rejected or the
/// request fails.
pub async fn refresh_session(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    refresh_token: &str,
) -> Result<Session, AuthError> {
    let url = format!("{}/token?grant_type=refresh_token", supabase.auth_url());
    token_request(
        client,
        supabase,
        &url,
        &serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await
    .map_err(AuthError::RefreshFailed)
}

/// Revoke the session server-side.
///
/// # Errors
///
/// Returns `AuthError::Other` if the request fails or GoTrue rejects it.
pub async fn sign_out(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    access_token: &str,
) -> Result<(), AuthError> {
    let url = format!("{}/logout", supabase.auth_url());
    let resp = client
        .post(&url)
        .header("apikey", &supabase.anon_key)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AuthError::Other(format!("sign out: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Other(format!("sign out: HTTP {status}: {body}")));
    }
    Ok(())
}

async fn token_request(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    url: &str,
    body: &serde_json::Value,
) -> Result<Session, String> {
    let resp = client
        .post(url)
        .header("apikey", &supabase.anon_key)
        .json(body)
        .send()
        .await
        .map_err(|e| format!("request: {e}"))?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoTrueError>(&text)
            .ok()
            .and_then(GoTrueError::into_message)
            .unwrap_or(text);
        return Err(format!("HTTP {status}: {message}"));
    }

    resp.json::<Session>()
        .await
        .map_err(|e| format!("parse session: {e}"))
}
