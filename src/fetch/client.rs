// src/fetch/client.rs
// =============================================================================
// This module performs the actual HTTP requests.
//
// Key functionality:
// - One shared reqwest Client (connection pooling, request timeout)
// - fetch_text() for pages, fetch_bytes() for assets
// - Categorizes failures (HTTP status, timeout, DNS, SSL, etc.)
//
// Design point: a failed fetch is a VALUE, not an exception. Both fetch
// methods return Result<_, FetchFailure> and callers are expected to check
// and skip - a broken page or asset never brings down the whole crawl.
// There are no retries: whatever the first attempt returns is the answer.
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: For error handling
// - Enums: To represent the different ways a fetch can fail
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;

// Represents why a fetch did not produce usable content
//
// Modeled as a plain enum rather than a boxed error type because callers
// only ever log it and move on - nobody needs to downcast or propagate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-success status code (4xx, 5xx)
    Status(u16),
    /// Request timed out
    Timeout,
    /// Could not resolve hostname
    Dns,
    /// Connection refused or dropped
    Connect,
    /// SSL/TLS certificate error
    Ssl,
    /// Redirect loop (more redirects than the client allows)
    TooManyRedirects,
    /// Anything else reqwest can come up with
    Other(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "HTTP {}", code),
            FetchFailure::Timeout => write!(f, "request timed out"),
            FetchFailure::Dns => write!(f, "could not resolve hostname"),
            FetchFailure::Connect => write!(f, "connection failed"),
            FetchFailure::Ssl => write!(f, "SSL certificate error"),
            FetchFailure::TooManyRedirects => write!(f, "too many redirects"),
            FetchFailure::Other(message) => write!(f, "{}", message),
        }
    }
}

// Wraps the HTTP client used for every request in a run
//
// Cloning a reqwest Client is cheap (it is reference-counted internally),
// but we never need to: both fetch methods borrow &self, so one Fetcher
// can serve any number of concurrent fetches.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    // Builds the shared client with a per-request timeout
    //
    // The timeout covers the whole request (connect + response body), so a
    // stalled server cannot hang the crawl forever.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))  // Follow up to 5 redirects
            .build()?;

        Ok(Self { client })
    }

    // Fetches a URL and decodes the response body as text
    //
    // Used for pages (HTML documents). Returns the decoded body on success,
    // or a FetchFailure describing what went wrong. Never panics, never
    // raises for ordinary HTTP-level failures.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchFailure> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response.text().await.map_err(categorize_error)
    }

    // Fetches a URL and returns the raw response bytes
    //
    // Used for assets (images, scripts, stylesheets) where decoding as text
    // would mangle binary content. Same contract as fetch_text otherwise.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchFailure> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        Ok(response.bytes().await.map_err(categorize_error)?.to_vec())
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(error: reqwest::Error) -> FetchFailure {
    // Convert error to string once to avoid lifetime issues
    let error_string = error.to_string();

    if error.is_timeout() {
        FetchFailure::Timeout
    } else if error.is_redirect() {
        FetchFailure::TooManyRedirects
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            FetchFailure::Dns
        } else {
            FetchFailure::Connect
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        FetchFailure::Ssl
    } else {
        FetchFailure::Other(error_string)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Result<String, FetchFailure> instead of anyhow::Result?
//    - anyhow is for errors that bubble up and stop the program
//    - A failed fetch is routine here: the caller logs it and skips the URL
//    - A dedicated enum makes "check and skip" the natural calling pattern
//
// 2. Why does categorize_error inspect strings?
//    - reqwest exposes is_timeout()/is_connect()/is_redirect() predicates,
//      but not every failure mode has one (DNS and TLS in particular)
//    - Substring matching on the error message is the pragmatic fallback
//
// 3. What is map_err?
//    - Transforms the error variant of a Result, leaving Ok untouched
//    - Here it converts reqwest::Error into our FetchFailure before `?`
// -----------------------------------------------------------------------------
