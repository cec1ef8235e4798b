use crate::cli::GlobalFlags;
use crate::cli::subcommands::TeamsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `stw teams <subcommand>`.
pub async fn handle(
    action: &TeamsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TeamsCommands::List { refresh } => {
            let fetcher = ctx.directory.teams();
            let teams = if *refresh {
                fetcher.refresh().await
            } else {
                fetcher.fetch().await
            };
            output(&*teams, flags.format)
        }
    }
}
