//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{
    NextCommand, PipelineCommand, RunCommand, StatusCommand, StepsCommand, WatchCommand,
};
use std::ffi::OsString;

/// Operator console for the smart-mode data pipeline
#[derive(Debug, Parser, Clone)]
#[command(name = "pipectl")]
#[command(version = "0.1.0")]
#[command(about = "Operator console for the smart-mode barcode data pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the pipeline service
    #[arg(long, global = true, default_value = crate::remote::DEFAULT_BASE_URL)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// List the pipeline steps
    Steps(StepsCommand),

    /// Refresh and show pipeline status
    Status(StatusCommand),

    /// Run a single step
    Run(RunCommand),

    /// Run the whole pipeline
    Pipeline(PipelineCommand),

    /// Show or act on the recommended next step
    Next(NextCommand),

    /// Refresh periodically until the pipeline completes
    Watch(WatchCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
