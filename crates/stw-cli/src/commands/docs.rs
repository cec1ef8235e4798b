use serde::Serialize;
use stw_core::views::{AdminLayout, HELP_TOPIC_PARAM, initial_help_topic};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocsArgs;
use crate::output::output;

#[derive(Serialize)]
struct DocsResponse {
    topic: Option<String>,
    sections: Vec<&'static str>,
}

/// Resolve the help topic from `--location` (or `STEWARD_LOCATION`) and list
/// the admin sections the help center covers.
pub fn handle(args: &DocsArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let location = args
        .location
        .clone()
        .or_else(|| std::env::var("STEWARD_LOCATION").ok());

    let topic = location.as_deref().and_then(initial_help_topic);
    tracing::debug!(param = HELP_TOPIC_PARAM, ?topic, "resolved help topic");

    let sections = AdminLayout::default()
        .sections()
        .iter()
        .map(|section| section.label())
        .collect();

    output(&DocsResponse { topic, sections }, flags.format)
}
