// src/fetch/mod.rs
// =============================================================================
// This module wraps all HTTP fetching.
//
// Submodules:
// - client: the Fetcher type and the FetchFailure taxonomy
//
// This file (mod.rs) is the module root - it re-exports the public API that
// other parts of our application use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod client;

// Re-export public items from submodules
// This lets users write `fetch::Fetcher` instead of `fetch::client::Fetcher`
pub use client::{FetchFailure, Fetcher};
