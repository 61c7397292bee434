// src/storage/paths.rs
// =============================================================================
// This module maps URLs to filesystem paths under the output root.
//
// Rules:
// - The URL's path component becomes the relative path (query and fragment
//   are dropped; they are not part of the mirrored structure)
// - "." and ".." segments are discarded so nothing can escape the root
// - A URL that names a directory (empty path or trailing slash), or whose
//   final segment has no file extension, gets the default document filename
//   appended - so "https://site.test/docs" lands at "docs/index.html" and
//   the base URL itself lands at "index.html"
//
// Rust concepts:
// - Path/PathBuf: Filesystem path types that handle separators for us
// - Iterator adapters: split + filter to walk URL path segments
// =============================================================================

use std::path::{Path, PathBuf};
use url::Url;

/// Filename used when a URL does not name a concrete file
pub const DEFAULT_DOCUMENT: &str = "index.html";

// Derives the output file path for a URL
//
// Parameters:
//   url: the (already resolved, absolute) URL being persisted
//   root: the output directory everything lives under
//
// Example:
//   url = "https://site.test/guide/intro.html", root = "./out"
//   -> "./out/guide/intro.html"
//   url = "https://site.test/guide", root = "./out"
//   -> "./out/guide/index.html"
pub fn output_path(url: &Url, root: &Path) -> PathBuf {
    // Walk the URL path, dropping empty and traversal segments
    let segments: Vec<&str> = url
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect();

    let mut path = root.to_path_buf();
    for segment in &segments {
        path.push(segment);
    }

    // Directory-style URLs and extension-less paths get the default
    // document name, mirroring what a web server would serve there
    let names_directory = segments.is_empty() || url.path().ends_with('/');
    let has_extension = segments
        .last()
        .map(|segment| Path::new(segment).extension().is_some())
        .unwrap_or(false);

    if names_directory || !has_extension {
        path.push(DEFAULT_DOCUMENT);
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(url: &str) -> PathBuf {
        output_path(&Url::parse(url).unwrap(), Path::new("out"))
    }

    #[test]
    fn test_base_url_maps_to_index_html() {
        assert_eq!(map("https://site.test/"), PathBuf::from("out/index.html"));
    }

    #[test]
    fn test_file_with_extension_is_kept() {
        assert_eq!(
            map("https://site.test/guide/intro.html"),
            PathBuf::from("out/guide/intro.html")
        );
        assert_eq!(
            map("https://site.test/css/style.css"),
            PathBuf::from("out/css/style.css")
        );
    }

    #[test]
    fn test_extensionless_path_gets_default_document() {
        assert_eq!(
            map("https://site.test/guide"),
            PathBuf::from("out/guide/index.html")
        );
    }

    #[test]
    fn test_trailing_slash_gets_default_document() {
        assert_eq!(
            map("https://site.test/guide/"),
            PathBuf::from("out/guide/index.html")
        );
    }

    #[test]
    fn test_query_string_is_dropped() {
        assert_eq!(
            map("https://site.test/img/x.png?v=3"),
            PathBuf::from("out/img/x.png")
        );
    }

    #[test]
    fn test_traversal_segments_cannot_escape_root() {
        let path = map("https://site.test/%2e%2e/%2e%2e/etc/passwd");
        assert!(path.starts_with("out"));
        assert!(!path
            .components()
            .any(|component| component.as_os_str() == ".."));
    }
}
