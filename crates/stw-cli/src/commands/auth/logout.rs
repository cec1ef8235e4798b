use serde::Serialize;
use stw_auth::SessionStore;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub async fn handle(
    flags: &GlobalFlags,
    config: &stw_config::StewardConfig,
) -> anyhow::Result<()> {
    let supabase = config.require_supabase()?;
    let http = stw_api::build_http_client(config.client.timeout())?;
    let store = SessionStore::default_location()?;

    stw_auth::logout(&http, supabase, &store).await?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
