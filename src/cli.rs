// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "A CLI tool to crawl a website and mirror it to a local directory",
    long_about = "site-mirror crawls a website starting from a base URL, follows same-site \
                  document links, downloads referenced assets (images, scripts, stylesheets), \
                  and writes everything under an output directory mirroring the site's URL paths."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and mirror its pages and assets locally
    ///
    /// Example: site-mirror crawl https://example.com ./out --page-limit 50
    Crawl {
        /// Website URL to start crawling from (e.g., https://example.com)
        ///
        /// This is a positional argument (required, no flag needed)
        url: String,

        /// Directory to write crawled pages and downloaded assets into
        ///
        /// Created if it does not exist yet
        output_dir: PathBuf,

        /// Maximum number of distinct pages to record (default: 200)
        ///
        /// This is a hard ceiling: once this many pages are recorded (or
        /// reserved by fetches already in flight), no further links expand.
        /// Must be positive.
        #[arg(long, default_value_t = 200)]
        page_limit: usize,

        /// Maximum number of fetches in flight at once (default: 16)
        ///
        /// Applies to both the page crawl and the asset download phase.
        /// Without a bound, a site with a high branching factor could spawn
        /// an unbounded number of concurrent network calls.
        #[arg(long, default_value_t = 16)]
        concurrency: usize,

        /// Where to write the diagnostic log (default: site-mirror.log)
        ///
        /// Every fetch attempt is logged at debug level, every failed fetch
        /// at warning level with the status code or failure reason.
        #[arg(long, default_value = "site-mirror.log")]
        log_file: PathBuf,

        /// Also mirror log output to standard output
        ///
        /// This is an optional flag: --verbose
        #[arg(long)]
        verbose: bool,

        /// Print the run summary as JSON instead of human-readable text
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a subcommand for a single-command tool?
//    - It keeps the surface extensible (a future 'verify' or 'resume' command
//      slots in without breaking existing invocations)
//    - `site-mirror crawl <url> <dir>` reads naturally on the command line
//
// 2. What is PathBuf?
//    - An owned filesystem path (like String, but for paths)
//    - clap parses path arguments into it directly
//    - Path (borrowed) is to PathBuf what &str is to String
//
// 3. What does default_value_t do?
//    - Supplies a typed default when the flag is omitted
//    - default_value (no _t) takes a string and parses it, which is what we
//      use for the PathBuf default
//
// 4. Why usize for limits?
//    - Both values count things (pages, in-flight fetches)
//    - usize is the natural type for counts and collection sizes
// -----------------------------------------------------------------------------
