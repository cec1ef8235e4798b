//! # stw-auth
//!
//! Supabase authentication for Steward.
//!
//! Provides password sign-in and token refresh against GoTrue, session
//! persistence (OS keychain with env and file fallbacks), best-effort JWT claim
//! decoding, and the session → [`CurrentUser`] projection with a push-based
//! tracker.
//!
//! [`CurrentUser`]: stw_core::identity::CurrentUser

pub mod adapter;
pub mod claims;
pub mod error;
pub mod gotrue;
pub mod provider;
pub mod session;
pub mod store;

pub use adapter::project_current_user;
pub use error::AuthError;
pub use provider::{AuthProvider, AuthState, CurrentUserTracker};
pub use session::{Session, SessionUser};
pub use store::{SessionSource, SessionStore};

use stw_config::SupabaseConfig;

const EXPIRY_BUFFER_SECS: i64 = 60;

/// Load the stored session, refreshing it when it is about to expire.
///
/// Returns `Ok(None)` when nothing is stored, or when the session is expired
/// and cannot be refreshed. A refreshed session is written back to `store`.
///
/// # Errors
///
/// Returns `AuthError::SessionStoreError` if a refreshed session cannot be saved.
pub async fn resolve_session(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    store: &SessionStore,
) -> Result<Option<Session>, AuthError> {
    let Some(session) = store.load() else {
        return Ok(None);
    };

    if !session.is_near_expiry(EXPIRY_BUFFER_SECS) {
        return Ok(Some(session));
    }

    if session.refresh_token.is_empty() {
        tracing::warn!("stored session expired and has no refresh token; run `stw auth login`");
        return Ok(None);
    }

    match gotrue::refresh_session(client, supabase, &session.refresh_token).await {
        Ok(refreshed) => {
            tracing::debug!(user_id = %refreshed.user.id, "refreshed session");
            store.save(&refreshed)?;
            Ok(Some(refreshed))
        }
        Err(error) => {
            tracing::warn!(%error, "session refresh failed; run `stw auth login`");
            Ok(None)
        }
    }
}

/// Sign in and persist the session.
///
/// # Errors
///
/// Returns `AuthError::SignInFailed` if GoTrue rejects the credentials, or
/// `AuthError::SessionStoreError` if the session cannot be saved.
pub async fn login(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let session = gotrue::sign_in_with_password(client, supabase, email, password).await?;
    store.save(&session)?;
    Ok(session)
}

/// Revoke the session (best effort) and clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::SessionStoreError` if the session file cannot be removed.
pub async fn logout(
    client: &reqwest::Client,
    supabase: &SupabaseConfig,
    store: &SessionStore,
) -> Result<(), AuthError> {
    if let Some(session) = store.load()
        && let Err(error) = gotrue::sign_out(client, supabase, &session.access_token).await
    {
        tracing::warn!(%error, "server-side sign out failed; clearing local session anyway");
    }
    store.clear()
}
