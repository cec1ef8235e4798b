use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An authentication session as issued by Supabase GoTrue.
///
/// Mirrors the `/auth/v1/token` response. Persisted as JSON by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Unix timestamp (seconds) when `access_token` expires.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: SessionUser,
}

/// The `user` object embedded in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
}

impl SessionUser {
    /// Organization carried by the session, if any.
    ///
    /// `app_metadata` is server-controlled and takes priority over the
    /// user-editable `user_metadata`.
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        metadata_string(&self.app_metadata, "organization")
            .or_else(|| metadata_string(&self.user_metadata, "organization"))
    }
}

fn metadata_string<'a>(metadata: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}

impl Session {
    /// Expiry of the access token. Falls back to the token's own `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| crate::claims::decode_expiry(&self.access_token).ok())
    }

    /// Check if the access token is expired or expires within `buffer_secs`.
    ///
    /// A session with no known expiry is treated as expired.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at().is_none_or(|expires_at| expires_at <= threshold)
    }
}
