use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated; run `stw auth login`")]
    NotAuthenticated,

    #[error("session expired; run `stw auth login` to sign in again")]
    SessionExpired,

    #[error("sign-in failed: {0}")]
    SignInFailed(String),

    #[error("session refresh failed: {0}")]
    RefreshFailed(String),

    #[error("keyring error: {0}")]
    KeyringError(String),

    #[error("session store error: {0}")]
    SessionStoreError(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("{0}")]
    Other(String),
}
