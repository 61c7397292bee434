// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate configuration and set up logging
// 3. Crawl the site, download its assets, write everything to disk
// 4. Print a summary (human-readable or JSON)
// 5. Exit with proper code (0 = completed, 2 = configuration/setup error)
//
// Individual fetch, download and write failures are logged and counted but
// never turn into a non-zero exit: a partial mirror is still a mirror.
//
// Rust concepts:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle the subcommand
// =============================================================================

// Module declarations - tells Rust about our other source files
mod assets;   // src/assets/ - bounded concurrent asset downloading
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - site traversal logic
mod fetch;    // src/fetch/ - HTTP client wrapper
mod links;    // src/links/ - link classification and resolution
mod logging;  // src/logging.rs - tracing setup (file + optional stdout)
mod storage;  // src/storage/ - URL-to-path mapping and file writing

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser; // Parser trait enables the parse() method
use crawl::CrawlOptions;
use fetch::Fetcher;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;
use url::Url;

// Per-request timeout for every page and asset fetch
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If a setup error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = crawl completed (partial failures are logged, not fatal)
//   Err = configuration or setup error (becomes exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl {
            url,
            output_dir,
            page_limit,
            concurrency,
            log_file,
            verbose,
            json,
        } => {
            handle_crawl(
                &url,
                &output_dir,
                page_limit,
                concurrency,
                &log_file,
                verbose,
                json,
            )
            .await
        }
    }
}

// Everything one run of the tool produced, for the --json summary
#[derive(Debug, Serialize)]
struct RunSummary {
    base_url: String,
    pages_crawled: usize,
    assets_discovered: usize,
    assets_downloaded: usize,
    pages_written: usize,
    assets_written: usize,
    output_dir: String,
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    url: &str,
    output_dir: &Path,
    page_limit: usize,
    concurrency: usize,
    log_file: &Path,
    verbose: bool,
    json: bool,
) -> Result<i32> {
    // Reject bad configuration before any network or filesystem work
    anyhow::ensure!(page_limit > 0, "--page-limit must be positive");
    anyhow::ensure!(concurrency > 0, "--concurrency must be positive");

    logging::init(log_file, verbose)?;

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    if !json {
        println!("🔍 Crawling {} (page limit {})", url, page_limit);
    }

    let fetcher = Fetcher::new(FETCH_TIMEOUT)?;

    // Phase 1: traverse the site
    let result = crawl::crawl_site(
        url,
        &fetcher,
        CrawlOptions {
            page_limit,
            concurrency,
        },
    )
    .await?;

    if !json {
        println!(
            "📄 Crawled {} page(s), found {} asset link(s)",
            result.pages.len(),
            result.assets.len()
        );
    }

    // Phase 2: download the accumulated asset set
    let downloaded = assets::download_assets(&result.assets, &fetcher, concurrency).await;

    if !json {
        println!(
            "⬇️  Downloaded {} of {} asset(s)",
            downloaded.len(),
            result.assets.len()
        );
    }

    // Phase 3: persist pages (text) and assets (bytes) under the output root
    // The crawl works with URL strings (map keys) while storage wants a
    // parsed Url, so each write re-parses; both parse and write failures
    // are logged and skipped
    let mut pages_written = 0;
    for (page_url, text) in &result.pages {
        let written = Url::parse(page_url)
            .map_err(anyhow::Error::from)
            .and_then(|parsed| storage::write_page(output_dir, &parsed, text));
        match written {
            Ok(_) => pages_written += 1,
            Err(e) => warn!("Skipping page {}: {}", page_url, e),
        }
    }

    let mut assets_written = 0;
    for (asset_url, bytes) in &downloaded {
        let written = Url::parse(asset_url)
            .map_err(anyhow::Error::from)
            .and_then(|parsed| storage::write_asset(output_dir, &parsed, bytes));
        match written {
            Ok(_) => assets_written += 1,
            Err(e) => warn!("Skipping asset {}: {}", asset_url, e),
        }
    }

    let summary = RunSummary {
        base_url: url.to_string(),
        pages_crawled: result.pages.len(),
        assets_discovered: result.assets.len(),
        assets_downloaded: downloaded.len(),
        pages_written,
        assets_written,
        output_dir: output_dir.display().to_string(),
    };

    print_summary(&summary, json)?;

    Ok(0)
}

// Prints the run summary either as a table or JSON
fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        // Serialize the summary to JSON and print
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   📄 Pages written: {}/{}", summary.pages_written, summary.pages_crawled);
        println!(
            "   🎨 Assets written: {}/{} discovered",
            summary.assets_written, summary.assets_discovered
        );
        println!("   📁 Output: {}", summary.output_dir);
    }
    Ok(())
}
