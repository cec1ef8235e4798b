use clap::{Args, Subcommand};

/// User commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UsersCommands {
    /// List users in backend order.
    List {
        /// Bypass the cached list.
        #[arg(long)]
        refresh: bool,
    },
    /// Create a user account through the admin function.
    Create(UsersCreateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UsersCreateArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub user_name: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Manager user ID.
    #[arg(long)]
    pub manager: Option<String>,
    /// Role to grant (repeatable).
    #[arg(long = "role")]
    pub roles: Vec<String>,
}
