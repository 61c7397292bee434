// src/logging.rs
// =============================================================================
// This module sets up diagnostic logging for the whole application.
//
// We use the `tracing` ecosystem:
// - tracing: the macros (debug!, warn!) our modules emit events with
// - tracing-subscriber: collects those events and writes them somewhere
//
// Log destination:
// - Always: appended to a log file (so a long crawl leaves an audit trail)
// - With --verbose: additionally mirrored to standard output
//
// Rust concepts:
// - Layers: composable pieces of subscriber behavior
// - Arc: shared ownership, needed to hand the open file to the subscriber
// =============================================================================

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

// Initializes the global tracing subscriber
//
// Parameters:
//   log_file: path of the file to append log lines to
//   verbose: when true, log lines are also written to stdout
//
// Call this exactly once, before any crawling starts. Calling it twice
// would panic inside tracing-subscriber (a global subscriber is already set).
pub fn init(log_file: &Path, verbose: bool) -> Result<()> {
    // Open (or create) the log file in append mode so repeated runs
    // accumulate rather than clobber each other
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    // RUST_LOG overrides our default of debug-level for this crate,
    // warnings-and-up for everything else (reqwest internals are chatty)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,site_mirror=debug"));

    // File layer: no ANSI color codes, they would litter the file
    let file_layer = fmt::layer().with_ansi(false).with_writer(Arc::new(file));

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if verbose {
        // Second fmt layer pointed at stdout; both receive every event
        registry.with(fmt::layer().with_writer(std::io::stdout)).init();
    } else {
        registry.init();
    }

    Ok(())
}
