// src/links/mod.rs
// =============================================================================
// This module turns raw HTML into crawlable link sets.
//
// Submodules:
// - classify: splits a page's links into documents vs. assets (pure, no I/O)
// - resolve: same-site filtering and relative-to-absolute URL resolution
//
// This file (mod.rs) is the module root - it re-exports the public API that
// other parts of our application use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod classify;
mod resolve;

// Re-export public items from submodules
pub use classify::{classify_links, PageLinks};
pub use resolve::{is_external, resolve_link, resolve_links};
