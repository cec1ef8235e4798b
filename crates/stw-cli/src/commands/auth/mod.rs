mod login;
mod logout;
mod whoami;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `stw auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    flags: &GlobalFlags,
    config: &stw_config::StewardConfig,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, flags, config).await,
        AuthCommands::Logout => logout::handle(flags, config).await,
        AuthCommands::Whoami => whoami::handle(flags, config).await,
    }
}
