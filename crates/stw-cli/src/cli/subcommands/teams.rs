use clap::Subcommand;

/// Team commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TeamsCommands {
    /// List teams in backend order.
    List {
        /// Bypass the cached list.
        #[arg(long)]
        refresh: bool,
    },
}
