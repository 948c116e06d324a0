//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};

mod post_plan;
mod status;

/// asr-hook - workspace-status relay for assistant lifecycle hooks
#[derive(Parser, Debug)]
#[command(
    name = "asr-hook",
    version,
    about = "Relay assistant lifecycle events to a per-workspace status store",
    long_about = "Hook entry points for agent-status-relay. Each invocation reads one \
                  JSON event payload from stdin, resolves the workspace identity, and \
                  updates the status record (or posts an accepted plan to the tracker)."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Update the workspace status record from the event on stdin
    Status(status::StatusArgs),

    /// Post an accepted plan (ExitPlanMode) to the issue tracker
    PostPlan,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Status(args) => status::execute(args),
            Commands::PostPlan => post_plan::execute(),
        }
    }
}
