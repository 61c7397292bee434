// src/links/resolve.rs
// =============================================================================
// This module decides which raw links belong to the site being crawled and
// resolves them into absolute URLs.
//
// Same-site filtering is a deliberate heuristic: a raw attribute value that
// starts with "http" is treated as pointing at a foreign origin and dropped
// BEFORE resolution. Relative links (and anything else) are kept and joined
// against the current page's URL. This means a fully-qualified link back to
// the site's own origin is dropped too - acceptable for static sites, which
// link internally with relative paths.
//
// Rust concepts:
// - Option<T>: For operations that may produce nothing
// - Iterator chains: filter + filter_map to build the resolved set
// =============================================================================

use url::Url;

// Returns true when a raw link is written as an absolute external URL
//
// The check runs on the raw attribute string, not the resolved URL, so
// protocol-relative links ("//host/x") and scheme-less absolute paths pass
// through and resolve against the page URL.
pub fn is_external(raw: &str) -> bool {
    raw.starts_with("http")
}

// Resolves a link (possibly relative) against the page it appeared on
//
// Parameters:
//   base: the URL of the page the link was found on
//   raw: the attribute value (might be relative, might be absolute)
//
// Returns: Some(absolute_url) or None if the link is not fetchable
//
// Examples:
//   base = "https://site.test/docs/page"
//   raw = "intro.html" -> Some("https://site.test/docs/intro.html")
//   raw = "/img/x.png" -> Some("https://site.test/img/x.png")
//   raw = "#section" -> None
//   raw = "mailto:a@b.c" -> None
pub fn resolve_link(base: &Url, raw: &str) -> Option<String> {
    // Skip anchors and special protocols
    if raw.starts_with('#')
        || raw.starts_with("mailto:")
        || raw.starts_with("tel:")
        || raw.starts_with("javascript:")
        || raw.starts_with("data:")
    {
        return None;
    }

    // Try to resolve the URL
    match base.join(raw) {
        Ok(mut resolved) => {
            // Drop the fragment so "/page" and "/page#top" dedup to the
            // same crawl entry
            resolved.set_fragment(None);
            Some(resolved.to_string())
        }
        Err(_) => None,
    }
}

// Filters out external links and resolves the survivors
//
// Parameters:
//   base: the URL of the current page
//   raw_links: the verbatim attribute values from classification
//
// Returns: absolute URL strings, external links and unresolvable values
// dropped. Duplicates can appear when two raw values resolve to the same
// URL; downstream sets take care of that.
pub fn resolve_links<'a, I>(base: &Url, raw_links: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    raw_links
        .into_iter()
        .filter(|raw| !is_external(raw))
        .filter_map(|raw| resolve_link(base, raw))
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why filter on the RAW string instead of the resolved URL?
//    - The resolved URL of a relative link always shares the page's origin,
//      so post-resolution filtering would only need to catch absolute links
//    - Checking the raw prefix catches exactly those, cheaply, before any
//      parsing work happens
//    - The trade-off (absolute same-origin links get dropped) is documented
//      at the top of this file
//
// 2. What does base.join(raw) do?
//    - The same resolution a browser performs for a link on a page
//    - "https://s.t/a/b" joined with "c" gives "https://s.t/a/c"
//    - joined with "/c" gives "https://s.t/c"
//
// 3. Why strip fragments?
//    - "#section" targets a position INSIDE a document, not a different
//      document - keeping fragments would crawl the same page repeatedly
// -----------------------------------------------------------------------------
