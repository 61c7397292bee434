// src/crawl/engine.rs
// =============================================================================
// This module implements the recursive site crawl.
//
// How it works:
// 1. visit(url) claims the URL in the shared state (or bails if it is
//    already claimed, or the page budget is spent)
// 2. Fetch the page HTML (bounded by a semaphore so a site with a huge
//    branching factor cannot spawn unbounded concurrent requests)
// 3. Record the page, merge its asset links into the shared asset set
// 4. Classify and resolve the page's document links
// 5. Recursively visit all of them CONCURRENTLY, and wait for the whole
//    batch to finish before visit(url) itself returns
//
// Correctness properties this module guarantees:
// - Exactly-once fetching: claiming happens atomically with the visited
//   check, so two branches discovering the same URL race safely
// - Hard page ceiling: in-flight fetches reserve budget, so the page map
//   can never exceed the limit no matter how wide the fan-out is
// - Full drain: every launched visit is awaited; when crawl_site returns
//   there is no work left in flight
// - Failure isolation: a page that fails to fetch is logged and dropped;
//   its siblings and ancestors carry on
//
// Rust concepts:
// - BoxFuture: Recursion in async code needs the future behind a pointer
// - Mutex scoping: Guards are dropped before every await point
// =============================================================================

use anyhow::{anyhow, ensure, Result};
use futures::future::{join_all, BoxFuture, FutureExt};
use std::collections::{HashMap, HashSet};
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{FetchFailure, Fetcher};
use crate::links::{classify_links, resolve_links};

// Knobs fixed for the lifetime of one crawl
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Maximum number of distinct pages ever recorded (must be positive)
    pub page_limit: usize,
    /// Maximum number of page fetches in flight at once (must be positive)
    pub concurrency: usize,
}

// The complete, immutable output of one crawl
#[derive(Debug, Default)]
pub struct CrawlResult {
    /// Canonical page URL -> page source text
    pub pages: HashMap<String, String>,
    /// Deduplicated asset URLs accumulated across all visited pages
    pub assets: HashSet<String>,
}

// Everything the concurrent visits share, guarded by one Mutex
//
// Keeping it all behind a single lock is the point: the visited check, the
// budget check and the claim happen as one atomic step, which is what makes
// the page limit hard and the fetching exactly-once.
#[derive(Default)]
struct CrawlState {
    /// URLs that have been claimed for fetching (successful or not)
    visited: HashSet<String>,
    /// Claimed-but-unfinished fetches currently holding budget
    in_flight: usize,
    /// Recorded pages
    pages: HashMap<String, String>,
    /// Accumulated asset links
    assets: HashSet<String>,
}

impl CrawlState {
    // Atomically: visited check + budget check + claim
    //
    // Returns false when the URL was already claimed or the page budget
    // (recorded pages plus in-flight reservations) is exhausted.
    fn claim(&mut self, url: &str, page_limit: usize) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        if self.pages.len() + self.in_flight >= page_limit {
            return false;
        }
        self.visited.insert(url.to_string());
        self.in_flight += 1;
        true
    }

    // A claimed fetch failed: refund the budget slot
    //
    // The URL stays in visited - a URL is fetched at most once per crawl,
    // even when that one attempt fails.
    fn abandon(&mut self) {
        self.in_flight -= 1;
    }

    // A claimed fetch succeeded: record the page and its asset links
    fn record(&mut self, url: String, text: String, asset_links: Vec<String>) {
        self.in_flight -= 1;
        self.pages.insert(url, text);
        self.assets.extend(asset_links);
    }
}

// Bundles what every recursive visit needs to reach
struct Crawler<'f> {
    fetcher: &'f Fetcher,
    state: Mutex<CrawlState>,
    fetch_slots: Semaphore,
    page_limit: usize,
}

// Crawls a website starting from a URL
//
// Parameters:
//   base_url: the URL to start crawling from
//   fetcher: the shared HTTP client wrapper
//   options: page limit and concurrency bound
//
// Returns the page map and the accumulated asset link set. Individual page
// failures are logged and dropped; only configuration problems (zero limit,
// unparseable base URL) make this function fail.
pub async fn crawl_site(
    base_url: &str,
    fetcher: &Fetcher,
    options: CrawlOptions,
) -> Result<CrawlResult> {
    // Reject bad configuration eagerly, before any fetch happens
    ensure!(options.page_limit > 0, "page limit must be positive");
    ensure!(options.concurrency > 0, "concurrency must be positive");
    let base = Url::parse(base_url).map_err(|e| anyhow!("Invalid URL '{}': {}", base_url, e))?;

    let crawler = Crawler {
        fetcher,
        state: Mutex::new(CrawlState::default()),
        fetch_slots: Semaphore::new(options.concurrency),
        page_limit: options.page_limit,
    };

    // Visit the CANONICAL form of the base URL ("http://host" becomes
    // "http://host/"), the same form Url::join produces for child links -
    // otherwise a link cycle back to the root would not dedup against it.
    // Block until the root visit and its full transitive fan-out complete.
    crawler.visit(base.to_string()).await;

    let state = crawler.state.into_inner();
    Ok(CrawlResult {
        pages: state.pages,
        assets: state.assets,
    })
}

impl<'f> Crawler<'f> {
    // Visits one URL and, transitively, everything it links to
    //
    // async fn cannot recurse directly (the future type would be infinite),
    // so this returns a BoxFuture and boxes its own body.
    fn visit(&self, url: String) -> BoxFuture<'_, ()> {
        async move {
            // Step 1: claim the URL, or bail out
            // The guard is scoped so it is released before we hit the network
            {
                let mut state = self.state.lock().await;
                if !state.claim(&url, self.page_limit) {
                    return;
                }
            }

            // Step 2: fetch, holding a semaphore permit only for the
            // duration of the request. The permit must not outlive this
            // block: a parent waiting on children while holding one would
            // starve the pool and deadlock the crawl.
            let fetched = match self.fetch_slots.acquire().await {
                Ok(_permit) => self.fetcher.fetch_text(&url).await,
                // The semaphore is never closed while crawling; if it were,
                // treat the page like any other failed fetch
                Err(_) => Err(FetchFailure::Other("fetch slot unavailable".to_string())),
            };

            let html = match fetched {
                Ok(html) => html,
                Err(failure) => {
                    // Step 3 (failure path): log, refund the budget, drop
                    // the page. Siblings are unaffected.
                    warn!("Failed fetching {}: {}", url, failure);
                    self.state.lock().await.abandon();
                    return;
                }
            };

            // Child links resolve against the page they were found on
            let page_url = match Url::parse(&url) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping unparseable page URL {}: {}", url, e);
                    self.state.lock().await.abandon();
                    return;
                }
            };

            // Steps 4-5: classify (pure, synchronous) and resolve.
            // The parsed DOM lives only inside classify_links, never across
            // an await point.
            let links = classify_links(&html);
            let document_links = resolve_links(&page_url, &links.document_links);
            let asset_links = resolve_links(&page_url, &links.asset_links);

            debug!(
                "Visited {} ({} document links, {} asset links)",
                url,
                document_links.len(),
                asset_links.len()
            );

            // Step 3 (success path): one lock for the record + asset merge
            {
                let mut state = self.state.lock().await;
                state.record(url, html, asset_links);
            }

            // Step 6: expand all children concurrently and wait for every
            // one of them - no fire-and-forget
            join_all(document_links.into_iter().map(|link| self.visit(link))).await;
        }
        .boxed()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does visit return BoxFuture instead of being an async fn?
//    - An async fn's future embeds the futures it awaits
//    - A self-calling async fn would therefore have an infinitely-sized
//      future type; boxing breaks the cycle with a pointer
//
// 2. How is the page limit HARD when fetches run concurrently?
//    - claim() counts recorded pages PLUS claimed-but-unfinished fetches
//    - So the (limit+1)-th concurrent claim is refused even though no page
//      has been recorded yet; a failed fetch refunds its slot via abandon()
//
// 3. Why join_all instead of tokio::spawn?
//    - join_all drives the child futures concurrently inside the current
//      task, which is all the concurrency the I/O-bound crawl needs
//    - It also keeps borrows simple: children can borrow the Crawler
//      directly instead of needing Arc clones for 'static tasks
//
// 4. Why is the MutexGuard always in a { } block?
//    - Holding a lock across .await would stall every other visit that
//      touches the state while we wait on the network
//    - Scoping the guard makes the release point explicit
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fetcher() -> Fetcher {
        Fetcher::new(Duration::from_secs(5)).unwrap()
    }

    fn options(page_limit: usize) -> CrawlOptions {
        CrawlOptions {
            page_limit,
            concurrency: 4,
        }
    }

    #[tokio::test]
    async fn test_cycle_terminates_with_each_page_once() {
        let mut server = mockito::Server::new_async().await;

        // A <-> B link cycle; expect(1) asserts each page is fetched once
        let mock_a = server
            .mock("GET", "/")
            .with_body(r#"<a href="/b">b</a>"#)
            .expect(1)
            .create_async()
            .await;
        let mock_b = server
            .mock("GET", "/b")
            .with_body(r#"<a href="/">home</a>"#)
            .expect(1)
            .create_async()
            .await;

        let result = crawl_site(&server.url(), &fetcher(), options(10))
            .await
            .unwrap();

        assert_eq!(result.pages.len(), 2);
        mock_a.assert_async().await;
        mock_b.assert_async().await;
    }

    #[tokio::test]
    async fn test_page_limit_one_keeps_only_the_base_page() {
        let mut server = mockito::Server::new_async().await;

        let _home = server
            .mock("GET", "/")
            .with_body(r#"<a href="/one">1</a><a href="/two">2</a><a href="/three">3</a>"#)
            .create_async()
            .await;
        let mock_child = server
            .mock("GET", "/one")
            .with_body("unreachable")
            .expect(0)
            .create_async()
            .await;

        let base = format!("{}/", server.url());
        let result = crawl_site(&base, &fetcher(), options(1)).await.unwrap();

        assert_eq!(result.pages.len(), 1);
        assert!(result.pages.contains_key(&base));
        mock_child.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_page_is_dropped_but_siblings_survive() {
        let mut server = mockito::Server::new_async().await;

        let _home = server
            .mock("GET", "/")
            .with_body(r#"<a href="/missing">m</a><a href="/ok">ok</a>"#)
            .create_async()
            .await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;
        let _ok = server
            .mock("GET", "/ok")
            .with_body("fine")
            .create_async()
            .await;

        let result = crawl_site(&server.url(), &fetcher(), options(10))
            .await
            .unwrap();

        assert_eq!(result.pages.len(), 2);
        assert!(result
            .pages
            .contains_key(&format!("{}/ok", server.url())));
        assert!(!result
            .pages
            .keys()
            .any(|key| key.ends_with("/missing")));
    }

    #[tokio::test]
    async fn test_foreign_absolute_links_are_never_visited() {
        let mut server = mockito::Server::new_async().await;

        let _home = server
            .mock("GET", "/")
            .with_body(r#"<a href="http://other.invalid/page">away</a>"#)
            .create_async()
            .await;

        let result = crawl_site(&server.url(), &fetcher(), options(10))
            .await
            .unwrap();

        // Only the base page; the external link never expanded
        assert_eq!(result.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_asset_links_accumulate_resolved() {
        let mut server = mockito::Server::new_async().await;

        let _home = server
            .mock("GET", "/")
            .with_body(r#"<img src="/c.png"><img src="deep/d.jpg">"#)
            .create_async()
            .await;

        let result = crawl_site(&server.url(), &fetcher(), options(10))
            .await
            .unwrap();

        assert!(result.assets.contains(&format!("{}/c.png", server.url())));
        assert!(result
            .assets
            .contains(&format!("{}/deep/d.jpg", server.url())));
        assert_eq!(result.assets.len(), 2);
    }

    #[tokio::test]
    async fn test_page_count_never_exceeds_limit() {
        let mut server = mockito::Server::new_async().await;

        // A wide fan-out: the base page links to 8 children at once
        let body: String = (0..8)
            .map(|i| format!(r#"<a href="/page{}">p</a>"#, i))
            .collect();
        let _home = server.mock("GET", "/").with_body(body).create_async().await;
        let mut leaves = Vec::new();
        for i in 0..8 {
            let leaf = server
                .mock("GET", format!("/page{}", i).as_str())
                .with_body("leaf")
                .create_async()
                .await;
            leaves.push(leaf);
        }

        let result = crawl_site(&server.url(), &fetcher(), options(3))
            .await
            .unwrap();

        assert!(result.pages.len() <= 3);
    }

    #[tokio::test]
    async fn test_zero_page_limit_is_rejected_eagerly() {
        // No server at all: validation must fail before any fetch
        let result = crawl_site("http://site.test/", &fetcher(), options(0)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected_eagerly() {
        let result = crawl_site("not a url", &fetcher(), options(5)).await;
        assert!(result.is_err());
    }
}
