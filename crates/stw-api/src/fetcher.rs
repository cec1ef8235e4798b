//! List fetching with a configurable retrieval policy.
//!
//! A [`ListFetcher`] loads one list from a [`ListSource`] under a
//! [`FetchPolicy`]. Failures never reach the caller: they are logged and the
//! list degrades to empty. A `null` backend list is also empty.
//!
//! [`ListFetcher::mount`] gives a consumer its own [`MountHandle`] whose state
//! is published on a watch channel. Every (re)load takes a new generation;
//! only the newest generation may publish, and nothing publishes once the
//! handle is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use stw_config::{CacheConfig, FetchPolicyKind, MAX_STALE_AFTER_SECS};
use tokio::sync::watch;

use crate::backend::ListSource;
use crate::error::ApiError;

/// Default staleness window for cached lists.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// How a fetcher retrieves its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Hit the backend on every load.
    Once,
    /// Serve from a per-key cache until the entry is `stale_after` old.
    Cached { stale_after: Duration },
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::Cached {
            stale_after: DEFAULT_STALE_AFTER,
        }
    }
}

impl FetchPolicy {
    #[must_use]
    pub const fn from_config(config: &CacheConfig) -> Self {
        match config.policy {
            FetchPolicyKind::Once => Self::Once,
            FetchPolicyKind::Cached => Self::Cached {
                stale_after: config.stale_after(),
            },
        }
    }
}

/// What a consumer sees: the list and whether a load is in flight.
#[derive(Debug)]
pub struct ListState<T> {
    pub data: Arc<Vec<T>>,
    pub loading: bool,
}

impl<T> Clone for ListState<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            loading: self.loading,
        }
    }
}

impl<T> ListState<T> {
    fn initial() -> Self {
        Self {
            data: Arc::new(Vec::new()),
            loading: true,
        }
    }
}

/// Loads one list under a [`FetchPolicy`]. Cheap to clone; clones share the cache.
pub struct ListFetcher<T> {
    source: Arc<dyn ListSource<T>>,
    policy: FetchPolicy,
    cache: Option<Cache<String, Arc<Vec<T>>>>,
}

impl<T: Send + Sync + 'static> Clone for ListFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            policy: self.policy,
            cache: self.cache.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> ListFetcher<T> {
    #[must_use]
    pub fn new(source: Arc<dyn ListSource<T>>, policy: FetchPolicy) -> Self {
        let cache = match policy {
            FetchPolicy::Once => None,
            FetchPolicy::Cached { stale_after } => {
                let ttl = stale_after.min(Duration::from_secs(MAX_STALE_AFTER_SECS));
                Some(Cache::builder().time_to_live(ttl).build())
            }
        };
        Self {
            source,
            policy,
            cache,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> FetchPolicy {
        self.policy
    }

    #[must_use]
    pub fn key(&self) -> &str {
        self.source.key()
    }

    /// Load the list under this fetcher's policy.
    ///
    /// Cached loads within the staleness window return the same `Arc` without
    /// touching the backend. Concurrent cached loads of one key share a single
    /// backend call. Failures are logged, return an empty list, and are not
    /// cached.
    pub async fn fetch(&self) -> Arc<Vec<T>> {
        let key = self.source.key();
        let result = match &self.cache {
            None => self
                .fetch_from_source()
                .await
                .map_err(|error| error.to_string()),
            Some(cache) => cache
                .try_get_with(key.to_string(), self.fetch_from_source())
                .await
                .map_err(|error| error.to_string()),
        };

        result.unwrap_or_else(|error| {
            tracing::warn!(key, %error, "list fetch failed; showing empty list");
            Arc::new(Vec::new())
        })
    }

    /// Drop any cached entry, then load.
    pub async fn refresh(&self) -> Arc<Vec<T>> {
        self.invalidate().await;
        self.fetch().await
    }

    /// Forget the cached list so the next load hits the backend.
    pub async fn invalidate(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate(self.source.key()).await;
        }
    }

    /// Start a consumer scope and begin loading. Must be called inside a tokio runtime.
    #[must_use]
    pub fn mount(&self) -> MountHandle<T> {
        let handle = self.new_scope();
        handle.reload();
        handle
    }

    /// Like [`Self::mount`], but the first load bypasses the cache.
    #[must_use]
    pub fn mount_fresh(&self) -> MountHandle<T> {
        let handle = self.new_scope();
        handle.refresh();
        handle
    }

    fn new_scope(&self) -> MountHandle<T> {
        let (tx, rx) = watch::channel(ListState::initial());
        MountHandle {
            fetcher: self.clone(),
            scope: Arc::new(MountScope {
                tx,
                generation: AtomicU64::new(0),
                active: AtomicBool::new(true),
            }),
            rx,
        }
    }

    async fn fetch_from_source(&self) -> Result<Arc<Vec<T>>, ApiError> {
        let list = self.source.fetch().await?;
        Ok(Arc::new(list.unwrap_or_default()))
    }
}

struct MountScope<T> {
    tx: watch::Sender<ListState<T>>,
    generation: AtomicU64,
    active: AtomicBool,
}

/// A consumer's view of a [`ListFetcher`].
///
/// Dropping the handle (or calling [`MountHandle::cancel`]) ends the scope:
/// responses still in flight are discarded.
pub struct MountHandle<T> {
    fetcher: ListFetcher<T>,
    scope: Arc<MountScope<T>>,
    rx: watch::Receiver<ListState<T>>,
}

impl<T: Send + Sync + 'static> MountHandle<T> {
    /// Start a new load. Any load still in flight is superseded.
    pub fn reload(&self) {
        let generation = self.begin_load();
        let fetcher = self.fetcher.clone();
        let scope = Arc::clone(&self.scope);
        tokio::spawn(async move {
            let data = fetcher.fetch().await;
            scope.settle(generation, data, fetcher.key());
        });
    }

    /// Like [`Self::reload`], but bypasses the cache.
    pub fn refresh(&self) {
        let generation = self.begin_load();
        let fetcher = self.fetcher.clone();
        let scope = Arc::clone(&self.scope);
        tokio::spawn(async move {
            let data = fetcher.refresh().await;
            scope.settle(generation, data, fetcher.key());
        });
    }

    fn begin_load(&self) -> u64 {
        let mut generation = 0;
        // Bumped under the channel lock so `settle` sees a consistent pair.
        self.scope.tx.send_if_modified(|state| {
            generation = self.scope.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let was_loading = state.loading;
            state.loading = true;
            !was_loading
        });
        generation
    }
}

impl<T> MountHandle<T> {
    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> ListState<T> {
        self.rx.borrow().clone()
    }

    /// Receive pushes whenever the state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.rx.clone()
    }

    /// Wait until no load is in flight and return the state.
    pub async fn settled(&self) -> ListState<T> {
        let mut rx = self.rx.clone();
        // The sender lives in `self.scope`, so the channel cannot close here.
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// End the scope. Loads still in flight will not publish.
    pub fn cancel(&self) {
        self.scope.active.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.scope.active.load(Ordering::SeqCst)
    }
}

impl<T> Drop for MountHandle<T> {
    fn drop(&mut self) {
        self.scope.active.store(false, Ordering::SeqCst);
    }
}

impl<T> MountScope<T> {
    fn settle(&self, generation: u64, data: Arc<Vec<T>>, key: &str) {
        if !self.active.load(Ordering::SeqCst) {
            tracing::debug!(key, generation, "discarding response for ended scope");
            return;
        }
        let published = self.tx.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.data = data;
            state.loading = false;
            true
        });
        if !published {
            tracing::debug!(key, generation, "discarding superseded response");
        }
    }
}
