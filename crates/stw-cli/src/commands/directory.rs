use serde::Serialize;
use stw_core::entities::{SimpleUser, Team};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DirectoryResponse<'a> {
    users: &'a [SimpleUser],
    teams: &'a [Team],
}

/// Load users and teams in parallel.
pub async fn handle(
    refresh: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let snapshot = if refresh {
        ctx.directory.refresh().await
    } else {
        ctx.directory.load().await
    };

    output(
        &DirectoryResponse {
            users: &snapshot.users,
            teams: &snapshot.teams,
        },
        flags.format,
    )
}
