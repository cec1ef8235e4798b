use serde::Serialize;
use stw_auth::SessionStore;
use stw_core::identity::CurrentUser;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user: Option<CurrentUser>,
    email: Option<String>,
    expires_at: Option<String>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &stw_config::StewardConfig,
) -> anyhow::Result<()> {
    let supabase = config.require_supabase()?;
    let http = stw_api::build_http_client(config.client.timeout())?;
    let store = SessionStore::default_location()?;

    let session = stw_auth::login(&http, supabase, &store, &args.email, &args.password).await?;

    let override_organization = flags
        .org
        .as_deref()
        .or_else(|| config.session.organization_override());

    output(
        &AuthLoginResponse {
            authenticated: true,
            user: stw_auth::project_current_user(Some(&session.user), override_organization),
            email: session.user.email.clone(),
            expires_at: super::whoami::format_expiry(session.expires_at()),
        },
        flags.format,
    )
}
