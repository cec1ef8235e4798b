use chrono::{DateTime, Utc};
use serde::Serialize;
use stw_auth::SessionStore;
use stw_core::identity::CurrentUser;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse {
    authenticated: bool,
    user: Option<CurrentUser>,
    email: Option<String>,
    expires_at: Option<String>,
    source: Option<&'static str>,
}

pub async fn handle(
    flags: &GlobalFlags,
    config: &stw_config::StewardConfig,
) -> anyhow::Result<()> {
    let ctx = AppContext::init(config.clone(), flags.org.clone()).await?;
    let session = ctx.auth.current().session;
    let source = SessionStore::default_location()?
        .load_with_source()
        .map(|(_, source)| source.as_str());

    output(
        &WhoamiResponse {
            authenticated: session.is_some(),
            user: ctx.current_user.current(),
            email: session.as_ref().and_then(|s| s.user.email.clone()),
            expires_at: session.as_ref().and_then(|s| format_expiry(s.expires_at())),
            source: session.as_ref().and(source),
        },
        flags.format,
    )
}

pub(super) fn format_expiry(expires_at: Option<DateTime<Utc>>) -> Option<String> {
    expires_at.map(|at| at.to_rfc3339())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use chrono::DateTime;

    use super::format_expiry;

    #[test]
    fn expiry_formats_as_rfc3339() {
        let at = DateTime::from_timestamp(1_700_000_000, 0);
        assert_eq!(
            format_expiry(at).as_deref(),
            Some("2023-11-14T22:13:20+00:00")
        );
        assert_eq!(format_expiry(None), None);
    }
}
