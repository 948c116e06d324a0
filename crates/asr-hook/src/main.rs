//! asr-hook - relay assistant lifecycle events to the status store
//!
//! Invoked by the coding assistant's hook configuration, one short-lived
//! process per event: read one JSON payload from stdin, compute, write at
//! most one record, exit.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    agent_status_relay_core::logging::init();

    let cli = Cli::parse();

    // The status channel is strictly best-effort: a hook failure must never
    // abort or block the assistant's primary workflow, so errors are logged
    // and the process still exits 0.
    if let Err(e) = cli.execute() {
        tracing::error!("hook failed: {e:#}");
    }
}
