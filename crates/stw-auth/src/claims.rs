//! Best-effort access-token decoding.
//!
//! Does NOT verify the JWT signature. The backend verifies every request; the
//! client only reads `exp` when the session omits `expires_at`.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::AuthError;

/// Decode the `exp` claim of a JWT without verifying it.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the JWT format is invalid or the `exp`
/// claim is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    expiry_from_payload(&decode_payload(jwt)?)
}

fn decode_payload(jwt: &str) -> Result<Value, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))
}

fn expiry_from_payload(payload: &Value) -> Result<DateTime<Utc>, AuthError> {
    let exp = payload["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::InvalidToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))
}
