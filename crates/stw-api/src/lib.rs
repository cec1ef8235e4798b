//! # stw-api
//!
//! Backend access for Steward:
//! - [`DirectoryBackend`], the injected read seam, and its Supabase REST
//!   implementation [`SupabaseClient`]
//! - [`ListFetcher`], one list under a [`FetchPolicy`] (fetch-once or
//!   stale-while-revalidate), with generation-guarded consumer scopes
//! - [`Directory`], users and teams loaded in parallel
//! - [`UserCreator`], admin user creation with normalized errors
//! - License-status reads tagged with `x-user-id` / `x-client-id`

pub mod backend;
pub mod create_user;
pub mod directory;
pub mod fetcher;
pub mod supabase;

mod error;
mod http;

pub use backend::{DirectoryBackend, ListSource, TeamsSource, UsersSource};
pub use create_user::{
    CREATE_USER_FALLBACK_MESSAGE, CreateUserError, CreationTransport, FunctionTransport,
    HttpTransport, TransportOutcome, UserCreator, normalize_outcome,
};
pub use directory::{Directory, DirectorySnapshot};
pub use error::ApiError;
pub use fetcher::{DEFAULT_STALE_AFTER, FetchPolicy, ListFetcher, ListState, MountHandle};
pub use supabase::{FunctionResponse, SupabaseClient, build_http_client};
