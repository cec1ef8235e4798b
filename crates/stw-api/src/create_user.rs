//! Admin user creation.
//!
//! [`UserCreator`] sends a [`CreateUserPayload`] through a [`CreationTransport`]
//! and folds whatever came back into one result: the response body on
//! success, or a [`CreateUserError`] whose message is, in order, the
//! transport-level error, the body's `error` field, or
//! [`CREATE_USER_FALLBACK_MESSAGE`]. There is no retry.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use stw_config::{CREATE_USER_FUNCTION, CreationTransportKind, StewardConfig};
use stw_core::entities::CreateUserPayload;
use thiserror::Error;

use crate::supabase::{SupabaseClient, read_json_body};

/// Message used when neither the transport nor the body explains a failure.
pub const CREATE_USER_FALLBACK_MESSAGE: &str = "Failed to create user";

/// A failed user creation. Display is the operator-facing message, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CreateUserError {
    message: String,
}

impl CreateUserError {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raw result of one creation attempt, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportOutcome {
    /// Transport-level failure (unreachable host, function relay error, ...).
    pub error: Option<String>,
    /// Whether the transport considers the exchange successful.
    pub ok: bool,
    /// Parsed response body, if one arrived.
    pub body: Option<Value>,
}

/// Moves a creation request to the backend.
#[async_trait]
pub trait CreationTransport: Send + Sync {
    async fn send(&self, payload: &CreateUserPayload) -> TransportOutcome;
}

/// Function-style invocation of `create-user-admin` (`{ data, error }`).
pub struct FunctionTransport {
    client: Arc<SupabaseClient>,
}

impl FunctionTransport {
    #[must_use]
    pub const fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CreationTransport for FunctionTransport {
    async fn send(&self, payload: &CreateUserPayload) -> TransportOutcome {
        let response = self
            .client
            .invoke_function(CREATE_USER_FUNCTION, payload)
            .await;
        TransportOutcome {
            ok: response.error.is_none(),
            error: response.error,
            body: response.data,
        }
    }
}

/// Direct JSON POST to a configurable endpoint. Non-2xx is a failure.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
    anon_key: String,
    bearer: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(client: &SupabaseClient, endpoint: impl Into<String>) -> Self {
        Self {
            http: client.http().clone(),
            endpoint: endpoint.into(),
            anon_key: client.anon_key().to_string(),
            bearer: client.bearer().to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CreationTransport for HttpTransport {
    async fn send(&self, payload: &CreateUserPayload) -> TransportOutcome {
        let resp = match self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
            .json(payload)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(error) => {
                tracing::debug!(endpoint = %self.endpoint, %error, "create-user request failed");
                return TransportOutcome {
                    error: Some(error.to_string()),
                    ok: false,
                    body: None,
                };
            }
        };

        let ok = resp.status().is_success();
        TransportOutcome {
            error: None,
            ok,
            body: read_json_body(resp).await,
        }
    }
}

/// Turn a raw [`TransportOutcome`] into the caller-facing result.
///
/// # Errors
///
/// Returns [`CreateUserError`] when the transport failed, the body carries an
/// `error`, or the exchange was not successful.
pub fn normalize_outcome(outcome: TransportOutcome) -> Result<Value, CreateUserError> {
    let TransportOutcome { error, ok, body } = outcome;

    let message = error
        .filter(|message| !message.is_empty())
        .or_else(|| body.as_ref().and_then(embedded_error));
    if let Some(message) = message {
        return Err(CreateUserError { message });
    }
    if !ok {
        return Err(CreateUserError {
            message: CREATE_USER_FALLBACK_MESSAGE.to_string(),
        });
    }
    Ok(body.unwrap_or(Value::Null))
}

/// The body's `error` field: a string, or an object with a string `message`.
fn embedded_error(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .as_str()
        .or_else(|| error.get("message").and_then(Value::as_str))
        .filter(|message| !message.is_empty())
        .map(String::from)
}

/// Creates user accounts through a privileged backend operation.
#[derive(Clone)]
pub struct UserCreator {
    transport: Arc<dyn CreationTransport>,
}

impl UserCreator {
    #[must_use]
    pub fn new(transport: Arc<dyn CreationTransport>) -> Self {
        Self { transport }
    }

    /// Pick the transport named in configuration.
    #[must_use]
    pub fn from_config(config: &StewardConfig, client: Arc<SupabaseClient>) -> Self {
        let transport: Arc<dyn CreationTransport> = match config.functions.transport {
            CreationTransportKind::Function => Arc::new(FunctionTransport::new(client)),
            CreationTransportKind::Http => {
                Arc::new(HttpTransport::new(&client, config.create_user_endpoint()))
            }
        };
        Self::new(transport)
    }

    /// Create one user. The payload is forwarded verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`CreateUserError`] carrying the normalized failure message.
    pub async fn create_user(
        &self,
        payload: &CreateUserPayload,
    ) -> Result<Value, CreateUserError> {
        let outcome = self.transport.send(payload).await;
        let result = normalize_outcome(outcome);
        match &result {
            Ok(_) => tracing::info!(email = %payload.email, "created user"),
            Err(error) => tracing::warn!(email = %payload.email, %error, "user creation failed"),
        }
        result
    }
}
