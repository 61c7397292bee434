// src/assets/download.rs
// =============================================================================
// This module downloads every asset URL the crawl discovered.
//
// How it works:
// - Each asset URL becomes a future that fetches raw bytes
// - buffer_unordered(N) runs up to N of them at once and yields results
//   as they complete (not in original order, hence "unordered")
// - Failures are logged and omitted; the successful (url, bytes) pairs are
//   collected into a map
//
// The call returns only after EVERY launched fetch has resolved, success
// or failure - assets are never abandoned mid-flight. Asset downloading
// runs after the crawl finishes, so nothing here can affect crawl
// termination.
//
// Rust concepts:
// - Streams: For processing many items concurrently with a bound
// - Option + filter_map: To drop failures out of the stream
// =============================================================================

use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::fetch::Fetcher;

// Downloads all assets with bounded concurrency
//
// Parameters:
//   asset_links: the deduplicated asset URL set from the crawl
//   fetcher: the shared HTTP client wrapper
//   concurrency: maximum number of downloads in flight at once
//
// Returns: map from asset URL to raw bytes. An asset that failed to
// download is simply absent (the warning in the log is the only trace).
pub async fn download_assets(
    asset_links: &HashSet<String>,
    fetcher: &Fetcher,
    concurrency: usize,
) -> HashMap<String, Vec<u8>> {
    // Create a future per asset URL
    let fetches = asset_links.iter().map(|url| async move {
        match fetcher.fetch_bytes(url).await {
            Ok(bytes) => Some((url.clone(), bytes)),
            Err(failure) => {
                warn!("Failed downloading {}: {}", url, failure);
                None
            }
        }
    });

    // Run up to `concurrency` downloads at once and keep the successes
    stream::iter(fetches)
        .buffer_unordered(concurrency.max(1))
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_partial_failures_are_omitted_and_call_returns() {
        let mut server = mockito::Server::new_async().await;

        let _a = server
            .mock("GET", "/a.png")
            .with_body("aaa")
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/b.css")
            .with_body("bbb")
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/broken.js")
            .with_status(500)
            .create_async()
            .await;

        let links: HashSet<String> = [
            format!("{}/a.png", server.url()),
            format!("{}/b.css", server.url()),
            format!("{}/broken.js", server.url()),
        ]
        .into_iter()
        .collect();

        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let downloaded = download_assets(&links, &fetcher, 4).await;

        // 3 attempted, 1 failed: exactly 2 entries
        assert_eq!(downloaded.len(), 2);
        assert_eq!(
            downloaded.get(&format!("{}/a.png", server.url())),
            Some(&b"aaa".to_vec())
        );
        assert_eq!(
            downloaded.get(&format!("{}/b.css", server.url())),
            Some(&b"bbb".to_vec())
        );
    }

    #[tokio::test]
    async fn test_empty_asset_set_returns_empty_map() {
        let fetcher = Fetcher::new(Duration::from_secs(5)).unwrap();
        let downloaded = download_assets(&HashSet::new(), &fetcher, 4).await;

        assert!(downloaded.is_empty());
    }
}
