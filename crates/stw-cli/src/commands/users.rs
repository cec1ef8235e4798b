use stw_core::entities::CreateUserPayload;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{UsersCommands, UsersCreateArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `stw users <subcommand>`.
pub async fn handle(
    action: &UsersCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UsersCommands::List { refresh } => list(*refresh, ctx, flags).await,
        UsersCommands::Create(args) => create(args, ctx, flags).await,
    }
}

/// Each `stw` run starts with an empty cache, so `--refresh` only changes the
/// outcome when the fetcher is shared with earlier loads in the same process.
async fn list(refresh: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fetcher = ctx.directory.users();
    let handle = if refresh {
        fetcher.mount_fresh()
    } else {
        fetcher.mount()
    };
    let state = handle.settled().await;
    tracing::debug!(count = state.data.len(), "users loaded");
    output(&*state.data, flags.format)
}

async fn create(
    args: &UsersCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let created = ctx.creator.create_user(&payload_from_args(args)).await?;
    output(&created, flags.format)
}

fn payload_from_args(args: &UsersCreateArgs) -> CreateUserPayload {
    CreateUserPayload {
        email: args.email.clone(),
        password: args.password.clone(),
        user_name: args.user_name.clone(),
        department: args.department.clone(),
        phone: args.phone.clone(),
        manager: args.manager.clone(),
        roles: (!args.roles.is_empty()).then(|| args.roles.clone()),
    }
}
