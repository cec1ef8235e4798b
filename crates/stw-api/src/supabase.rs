//! Supabase REST and edge-function client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use stw_config::StewardConfig;
use stw_core::entities::{SimpleUser, Team};
use stw_core::identity::CurrentUser;

use crate::backend::DirectoryBackend;
use crate::error::ApiError;
use crate::http::check_response;

const USER_COLUMNS: &str = "id,user_name,email";
const TEAM_COLUMNS: &str = "id,name";
const LICENSE_FUNCTION: &str = "license-status";

/// Message reported when the functions endpoint cannot be reached.
pub const FUNCTION_FETCH_ERROR: &str = "Failed to send a request to the Edge Function";
/// Message reported when a function answers with a non-2xx status.
pub const FUNCTION_HTTP_ERROR: &str = "Edge Function returned a non-2xx status code";

/// Outcome of a function invocation in the `{ data, error }` shape.
///
/// `error` is the transport-level failure. `data` holds the parsed response
/// body whenever one was received, including on non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionResponse {
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
}

/// HTTP client for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
    functions_url: String,
    anon_key: String,
    access_token: Option<String>,
    client_id: String,
}

impl SupabaseClient {
    /// Build a client from configuration.
    ///
    /// `access_token` is the signed-in operator's JWT; without it requests run
    /// with the anon key only.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotConfigured`] if the Supabase URL or anon key is
    /// missing, or [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &StewardConfig,
        access_token: Option<String>,
    ) -> Result<Self, ApiError> {
        if !config.supabase.is_configured() {
            return Err(ApiError::NotConfigured(
                "supabase.url and supabase.anon_key are required".into(),
            ));
        }
        let http = build_http_client(config.client.timeout())?;
        Ok(Self {
            http,
            rest_url: config.supabase.rest_url(),
            functions_url: config.functions_base_url(),
            anon_key: config.supabase.anon_key.clone(),
            access_token,
            client_id: config.client.client_id.clone(),
        })
    }

    /// The underlying `reqwest` client, shared with other transports.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub fn functions_url(&self) -> &str {
        &self.functions_url
    }

    /// Bearer token sent with requests: the operator's JWT, else the anon key.
    #[must_use]
    pub fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    #[must_use]
    pub fn anon_key(&self) -> &str {
        &self.anon_key
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
    ) -> Result<Option<Vec<T>>, ApiError> {
        let url = format!(
            "{}/{table}?select={}",
            self.rest_url,
            urlencoding::encode(columns)
        );
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(format!("{table}: {e}")))
    }

    /// Invoke an edge function with a JSON body.
    ///
    /// Never fails: transport problems and non-2xx statuses are reported in
    /// [`FunctionResponse::error`].
    pub async fn invoke_function<B: Serialize + Sync>(
        &self,
        name: &str,
        body: &B,
    ) -> FunctionResponse {
        let url = format!("{}/{name}", self.functions_url);
        let resp = match self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer())
            .json(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(error) => {
                tracing::debug!(function = name, %error, "function request failed");
                return FunctionResponse {
                    data: None,
                    error: Some(FUNCTION_FETCH_ERROR.to_string()),
                };
            }
        };

        let status = resp.status();
        let data = read_json_body(resp).await;
        if status.is_success() {
            FunctionResponse { data, error: None }
        } else {
            tracing::debug!(function = name, %status, "function returned error status");
            FunctionResponse {
                data,
                error: Some(FUNCTION_HTTP_ERROR.to_string()),
            }
        }
    }

    /// Read the operator's license status.
    ///
    /// Identifies the caller with the `x-user-id` / `x-client-id` header pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the function answers with a
    /// non-success status, or the body is not JSON.
    pub async fn license_status(&self, user: &CurrentUser) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/{LICENSE_FUNCTION}", self.functions_url);
        let resp = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("x-user-id", &user.id)
            .header("x-client-id", &self.client_id)
            .bearer_auth(self.bearer())
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl DirectoryBackend for SupabaseClient {
    async fn list_users(&self) -> Result<Option<Vec<SimpleUser>>, ApiError> {
        self.select("users", USER_COLUMNS).await
    }

    async fn list_teams(&self) -> Result<Option<Vec<Team>>, ApiError> {
        self.select("teams", TEAM_COLUMNS).await
    }
}

/// Build the shared `reqwest` client.
///
/// # Errors
///
/// Returns [`ApiError::Http`] if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ApiError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("steward/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?)
}

/// Parse a response body as JSON; empty or non-JSON bodies yield `None`.
pub(crate) async fn read_json_body(resp: reqwest::Response) -> Option<serde_json::Value> {
    let text = resp.text().await.ok()?;
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(&text).ok()
}
