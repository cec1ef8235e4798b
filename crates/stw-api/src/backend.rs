//! The backend seam.
//!
//! Fetchers and the directory depend on [`DirectoryBackend`], never on a
//! concrete client, so they can be driven by an in-memory fake in tests.

use std::sync::Arc;

use async_trait::async_trait;
use stw_core::entities::{SimpleUser, Team};

use crate::error::ApiError;

/// Read access to the `users` and `teams` collections.
///
/// `Ok(None)` means the backend answered with no list at all (`null`);
/// fetchers turn that into an empty list.
#[async_trait]
pub trait DirectoryBackend: Send + Sync {
    async fn list_users(&self) -> Result<Option<Vec<SimpleUser>>, ApiError>;

    async fn list_teams(&self) -> Result<Option<Vec<Team>>, ApiError>;
}

/// One list a [`crate::ListFetcher`] can load.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    /// Stable cache key (`"users"`, `"teams"`).
    fn key(&self) -> &str;

    async fn fetch(&self) -> Result<Option<Vec<T>>, ApiError>;
}

/// The `users` list of a backend.
pub struct UsersSource(pub Arc<dyn DirectoryBackend>);

/// The `teams` list of a backend.
pub struct TeamsSource(pub Arc<dyn DirectoryBackend>);

#[async_trait]
impl ListSource<SimpleUser> for UsersSource {
    fn key(&self) -> &str {
        "users"
    }

    async fn fetch(&self) -> Result<Option<Vec<SimpleUser>>, ApiError> {
        self.0.list_users().await
    }
}

#[async_trait]
impl ListSource<Team> for TeamsSource {
    fn key(&self) -> &str {
        "teams"
    }

    async fn fetch(&self) -> Result<Option<Vec<Team>>, ApiError> {
        self.0.list_teams().await
    }
}
