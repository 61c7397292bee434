// src/links/classify.rs
// =============================================================================
// This module classifies the links found on a page.
//
// Two kinds of links come out of a page:
// - Document links: things we should crawl further (more pages)
// - Asset links: things we should download as-is (images, scripts, styles)
//
// Classification rules:
// - Every `href` attribute value is a document link
// - A `src` attribute value is ALSO a document link when the element carries
//   charset="utf-8" (the convention for source files included as text)
// - Every remaining `src` attribute value is an asset link
// - A URL that qualifies as both is treated only as a document link
//
// This is a pure function: no network, no filesystem. Attribute values are
// taken verbatim (absolute or relative); resolution happens later.
//
// Rust concepts:
// - HashSet: Deduplicated collections with O(1) membership tests
// - Iterators: For walking the parsed DOM
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;

// The classified links of a single page
//
// Invariant: document_links and asset_links never overlap - the subtraction
// in classify_links resolves any URL appearing in both roles in favor of
// the document side.
#[derive(Debug, Default)]
pub struct PageLinks {
    /// URLs that lead to further pages to crawl
    pub document_links: HashSet<String>,
    /// URLs of terminal content to download, not expand
    pub asset_links: HashSet<String>,
}

// Splits a page's links into document links and asset links
//
// Parameters:
//   html: the page source to parse (borrowed as &str)
//
// Malformed or partial markup is fine: html5ever recovers from almost
// anything, and a page without the relevant attributes simply yields
// empty sets. This function never fails.
pub fn classify_links(html: &str) -> PageLinks {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because our selectors are constants and known
    // to be valid.
    let href_selector = Selector::parse("[href]").unwrap();
    let src_selector = Selector::parse("[src]").unwrap();

    let mut document_links = HashSet::new();

    // Every href value is a document link
    for element in document.select(&href_selector) {
        if let Some(href) = element.value().attr("href") {
            document_links.insert(href.to_string());
        }
    }

    // A src value marked charset="utf-8" is a document link too
    // (an element with both src and href contributes through both paths)
    for element in document.select(&src_selector) {
        let utf8_marked = element
            .value()
            .attr("charset")
            .map(|charset| charset.eq_ignore_ascii_case("utf-8"))
            .unwrap_or(false);

        if utf8_marked {
            if let Some(src) = element.value().attr("src") {
                document_links.insert(src.to_string());
            }
        }
    }

    // Everything else with a src is an asset, minus whatever already
    // counts as a document
    let mut asset_links = HashSet::new();
    for element in document.select(&src_selector) {
        if let Some(src) = element.value().attr("src") {
            if !document_links.contains(src) {
                asset_links.insert(src.to_string());
            }
        }
    }

    PageLinks {
        document_links,
        asset_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_hrefs_and_srcs() {
        let html = r#"
            <a href="/b">b</a>
            <img src="/c.png">
            <script src="x.js" charset="utf-8"></script>
        "#;
        let links = classify_links(html);

        let expected_documents: HashSet<String> =
            ["/b".to_string(), "x.js".to_string()].into_iter().collect();
        let expected_assets: HashSet<String> =
            ["/c.png".to_string()].into_iter().collect();

        assert_eq!(links.document_links, expected_documents);
        assert_eq!(links.asset_links, expected_assets);
    }

    #[test]
    fn test_document_and_asset_sets_never_overlap() {
        // The same URL used as an href and as a plain src: the document
        // side wins and the asset set stays empty
        let html = r#"
            <a href="/dual">dual</a>
            <script src="/dual"></script>
        "#;
        let links = classify_links(html);

        assert!(links.document_links.contains("/dual"));
        assert!(links.asset_links.is_empty());
        assert!(links
            .document_links
            .intersection(&links.asset_links)
            .next()
            .is_none());
    }

    #[test]
    fn test_charset_match_is_case_insensitive() {
        let html = r#"<script src="app.js" charset="UTF-8"></script>"#;
        let links = classify_links(html);

        assert!(links.document_links.contains("app.js"));
        assert!(links.asset_links.is_empty());
    }

    #[test]
    fn test_non_utf8_charset_stays_an_asset() {
        let html = r#"<script src="legacy.js" charset="iso-8859-1"></script>"#;
        let links = classify_links(html);

        assert!(links.document_links.is_empty());
        assert!(links.asset_links.contains("legacy.js"));
    }

    #[test]
    fn test_empty_page_yields_empty_sets() {
        let links = classify_links("<html><body>no links here</body></html>");

        assert!(links.document_links.is_empty());
        assert!(links.asset_links.is_empty());
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        // html5ever recovers from broken markup instead of erroring
        let links = classify_links("<div><<<a href=\"/ok\"><img src=");

        assert!(links.document_links.contains("/ok"));
    }
}
