use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = ctx.require_user()?;
    let status = ctx.supabase.license_status(&user).await?;
    output(&status, flags.format)
}
