//! CLI command definitions

use clap::Args;

/// List the pipeline steps
#[derive(Debug, Args, Clone)]
pub struct StepsCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Refresh and show pipeline status
#[derive(Debug, Args, Clone)]
pub struct StatusCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run a single step
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Step slug to execute (e.g. ingest, normalize)
    pub slug: String,

    /// Prefer offline sources for the ingest step
    #[arg(long)]
    pub offline: bool,
}

/// Run the whole pipeline
#[derive(Debug, Args, Clone)]
pub struct PipelineCommand {
    /// Prefer offline sources for the ingest step
    #[arg(long)]
    pub offline: bool,
}

/// Show or act on the recommended next step
#[derive(Debug, Args, Clone)]
pub struct NextCommand {
    /// Execute the recommended step
    #[arg(long)]
    pub run: bool,

    /// Advance the selection past the recommended step without running it
    #[arg(long, conflicts_with = "run")]
    pub skip: bool,

    /// Prefer offline sources for the ingest step
    #[arg(long)]
    pub offline: bool,
}

/// Refresh periodically until the pipeline completes
#[derive(Debug, Args, Clone)]
pub struct WatchCommand {
    /// Seconds between refreshes
    #[arg(long, default_value_t = 5)]
    pub interval: u64,
}
