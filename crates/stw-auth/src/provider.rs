//! Push-based auth state and the derived current user.
//!
//! [`AuthProvider`] owns the process-wide session and publishes every change
//! on a `tokio::sync::watch` channel. [`CurrentUserTracker`] subscribes to it
//! and recomputes the [`CurrentUser`] projection whenever the session or the
//! organization override changes. Nothing polls.

use stw_core::identity::CurrentUser;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapter::project_current_user;
use crate::session::Session;

/// Snapshot of the auth collaborator: the session and whether it is still
/// being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

/// Owner of the current session.
#[derive(Debug)]
pub struct AuthProvider {
    tx: watch::Sender<AuthState>,
}

impl Default for AuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider {
    /// A provider that has not resolved a session yet (`loading = true`).
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState {
            session: None,
            loading: true,
        });
        Self { tx }
    }

    /// A provider that starts with an already-resolved session.
    #[must_use]
    pub fn with_session(session: Option<Session>) -> Self {
        let provider = Self::new();
        provider.set_session(session);
        provider
    }

    /// Replace the session and notify subscribers. Clears `loading`.
    pub fn set_session(&self, session: Option<Session>) {
        self.tx.send_replace(AuthState {
            session,
            loading: false,
        });
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }
}

/// Holds the [`CurrentUser`] derived from an [`AuthProvider`] subscription.
///
/// The background task is aborted when the tracker is dropped.
#[derive(Debug)]
pub struct CurrentUserTracker {
    override_tx: watch::Sender<Option<String>>,
    current_rx: watch::Receiver<Option<CurrentUser>>,
    task: JoinHandle<()>,
}

impl CurrentUserTracker {
    /// Subscribe to `auth` and start tracking. Must be called inside a tokio runtime.
    #[must_use]
    pub fn spawn(
        mut auth: watch::Receiver<AuthState>,
        override_organization: Option<String>,
    ) -> Self {
        let (override_tx, mut override_rx) = watch::channel(override_organization);

        let initial = project(
            &auth.borrow_and_update(),
            override_rx.borrow_and_update().as_deref(),
        );
        let (current_tx, current_rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut auth_open = true;
            loop {
                tokio::select! {
                    changed = auth.changed(), if auth_open => {
                        if changed.is_err() {
                            // Provider gone: keep the last session, still honor overrides.
                            auth_open = false;
                            continue;
                        }
                    }
                    changed = override_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }

                let next = project(
                    &auth.borrow_and_update(),
                    override_rx.borrow_and_update().as_deref(),
                );
                current_tx.send_if_modified(|current| {
                    if *current == next {
                        false
                    } else {
                        tracing::debug!(user = ?next, "current user changed");
                        *current = next;
                        true
                    }
                });
            }
        });

        Self {
            override_tx,
            current_rx,
            task,
        }
    }

    /// Change the organization override. `None` falls back to the session's own.
    pub fn set_organization_override(&self, organization: Option<String>) {
        self.override_tx.send_replace(organization);
    }

    #[must_use]
    pub fn current(&self) -> Option<CurrentUser> {
        self.current_rx.borrow().clone()
    }

    /// Receive pushes whenever the projection changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<CurrentUser>> {
        self.current_rx.clone()
    }
}

impl Drop for CurrentUserTracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn project(state: &AuthState, override_organization: Option<&str>) -> Option<CurrentUser> {
    project_current_user(
        state.session.as_ref().map(|session| &session.user),
        override_organization,
    )
}
