use clap::Subcommand;

use super::subcommands::{AuthCommands, DocsArgs, TeamsCommands, UsersCommands};

/// Top-level commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, show the current user.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// List or create users.
    Users {
        #[command(subcommand)]
        action: UsersCommands,
    },
    /// List teams.
    Teams {
        #[command(subcommand)]
        action: TeamsCommands,
    },
    /// Load users and teams together.
    Directory {
        /// Bypass cached lists.
        #[arg(long)]
        refresh: bool,
    },
    /// Show the license status for the current user.
    License,
    /// Resolve the help-center topic for a location.
    Docs(DocsArgs),
}
