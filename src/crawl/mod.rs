// src/crawl/mod.rs
// =============================================================================
// This module owns the site traversal.
//
// Features:
// - Recursive expansion starting from the base URL
// - Each page's newly discovered links are visited concurrently, and the
//   page waits for that whole batch before finishing itself
// - Shared visited/page state behind a single lock (exactly-once fetching
//   and a hard page-count ceiling, even under concurrent discovery)
// - A semaphore bounds how many fetches are in flight at once
//
// Rust concepts:
// - Async recursion: Boxed futures, since async fn cannot call itself
// - Shared state: tokio::sync::Mutex and Semaphore
// =============================================================================

mod engine;

// Re-export the crawling entry point and its types
pub use engine::{crawl_site, CrawlOptions, CrawlResult};
