//! Users and teams, loaded side by side.

use std::sync::Arc;

use stw_core::entities::{SimpleUser, Team};

use crate::backend::{DirectoryBackend, TeamsSource, UsersSource};
use crate::fetcher::{FetchPolicy, ListFetcher};

/// Both directory lists, in backend order.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub users: Arc<Vec<SimpleUser>>,
    pub teams: Arc<Vec<Team>>,
}

/// Independent fetchers for the `users` and `teams` lists of one backend.
#[derive(Clone)]
pub struct Directory {
    users: ListFetcher<SimpleUser>,
    teams: ListFetcher<Team>,
}

impl Directory {
    #[must_use]
    pub fn new(backend: Arc<dyn DirectoryBackend>, policy: FetchPolicy) -> Self {
        Self {
            users: ListFetcher::new(Arc::new(UsersSource(Arc::clone(&backend))), policy),
            teams: ListFetcher::new(Arc::new(TeamsSource(backend)), policy),
        }
    }

    #[must_use]
    pub const fn users(&self) -> &ListFetcher<SimpleUser> {
        &self.users
    }

    #[must_use]
    pub const fn teams(&self) -> &ListFetcher<Team> {
        &self.teams
    }

    /// Load both lists in parallel. A failure in one leaves the other intact.
    pub async fn load(&self) -> DirectorySnapshot {
        let (users, teams) = tokio::join!(self.users.fetch(), self.teams.fetch());
        DirectorySnapshot { users, teams }
    }

    /// Load both lists in parallel, bypassing any cached entries.
    pub async fn refresh(&self) -> DirectorySnapshot {
        let (users, teams) = tokio::join!(self.users.refresh(), self.teams.refresh());
        DirectorySnapshot { users, teams }
    }
}
