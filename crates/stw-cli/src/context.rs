use std::sync::Arc;

use anyhow::Context;
use stw_api::{Directory, FetchPolicy, SupabaseClient, UserCreator};
use stw_auth::{AuthProvider, CurrentUserTracker, SessionStore};
use stw_config::StewardConfig;
use stw_core::identity::CurrentUser;

/// Per-invocation wiring: config, resolved session, and the backend clients
/// built on top of it.
pub struct AppContext {
    pub auth: AuthProvider,
    pub current_user: CurrentUserTracker,
    pub supabase: Arc<SupabaseClient>,
    pub directory: Directory,
    pub creator: UserCreator,
}

impl AppContext {
    /// Resolve the stored session (refreshing it if close to expiry) and build
    /// the backend clients. `org` takes precedence over the configured override.
    pub async fn init(config: StewardConfig, org: Option<String>) -> anyhow::Result<Self> {
        let supabase_config = config.require_supabase()?.clone();
        let http = stw_api::build_http_client(config.client.timeout())?;
        let store = SessionStore::default_location()?;

        let session = stw_auth::resolve_session(&http, &supabase_config, &store)
            .await
            .context("failed to resolve session")?;
        if session.is_none() {
            tracing::info!("no session; requests run with the anon key");
        }

        let access_token = session.as_ref().map(|s| s.access_token.clone());
        let auth = AuthProvider::with_session(session);

        let override_organization = org.or_else(|| {
            config
                .session
                .organization_override()
                .map(String::from)
        });
        let current_user = CurrentUserTracker::spawn(auth.subscribe(), override_organization);

        let supabase = Arc::new(SupabaseClient::from_config(&config, access_token)?);
        let policy = FetchPolicy::from_config(&config.cache);
        let directory = Directory::new(supabase.clone(), policy);
        let creator = UserCreator::from_config(&config, Arc::clone(&supabase));

        Ok(Self {
            auth,
            current_user,
            supabase,
            directory,
            creator,
        })
    }

    /// The signed-in operator, or an error telling the user to log in.
    pub fn require_user(&self) -> anyhow::Result<CurrentUser> {
        self.current_user
            .current()
            .ok_or_else(|| anyhow::anyhow!("not signed in; run `stw auth login` first"))
    }
}
