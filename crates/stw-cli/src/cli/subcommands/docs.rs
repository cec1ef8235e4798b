use clap::Args;

#[derive(Clone, Debug, Args)]
pub struct DocsArgs {
    /// Location to read the `topic` query parameter from.
    #[arg(long)]
    pub location: Option<String>,
}
