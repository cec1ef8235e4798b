use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Users { action } => commands::users::handle(&action, ctx, flags).await,
        Commands::Teams { action } => commands::teams::handle(&action, ctx, flags).await,
        Commands::Directory { refresh } => commands::directory::handle(refresh, ctx, flags).await,
        Commands::License => commands::license::handle(ctx, flags).await,
        Commands::Auth { .. } | Commands::Docs(_) => {
            unreachable!("auth/docs are pre-dispatched in main")
        }
    }
}
