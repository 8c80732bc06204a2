//! Utility functions for string handling and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - String truncation for logging and for highlight excerpts
//! - Capitalization for persona display names
//! - HTML-to-text reduction for feed summaries
//! - File system validation for output directories

use itertools::Itertools;
use scraper::Html;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (backing off to the nearest
/// character boundary) with an ellipsis and the dropped byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// First `max` characters of `s`.
pub fn take_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Capitalize the first character of a string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(upcase("hello"), "Hello");
/// assert_eq!(upcase(""), "");
/// ```
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Reduce an HTML fragment to its text, with runs of whitespace collapsed.
///
/// Plain text passes through unchanged apart from whitespace collapsing.
pub fn html_to_text(fragment: &str) -> String {
    if !fragment.contains('<') {
        return fragment.split_whitespace().join(" ");
    }
    let html = Html::parse_fragment(fragment);
    html.root_element()
        .text()
        .flat_map(str::split_whitespace)
        .join(" ")
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let s = "é".repeat(10);
        let result = truncate_for_log(&s, 5);
        assert!(result.starts_with("éé…"));
        assert!(result.contains("(+16 bytes)"));
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("hello", 3), "hel");
        assert_eq!(take_chars("hi", 100), "hi");
        assert_eq!(take_chars("日本語テキスト", 3), "日本語");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_upcase() {
        assert_eq!(upcase("hello"), "Hello");
        assert_eq!(upcase("world"), "World");
        assert_eq!(upcase(""), "");
        assert_eq!(upcase("a"), "A");
    }

    #[test]
    fn test_html_to_text_strips_tags() {
        let html = "<p>NASA launches <b>Artemis</b>&nbsp;mission.</p><p>More soon.</p>";
        assert_eq!(html_to_text(html), "NASA launches Artemis mission. More soon.");
    }

    #[test]
    fn test_html_to_text_plain_passthrough() {
        assert_eq!(html_to_text("  plain   text\n here "), "plain text here");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_directory() {
        let dir = std::env::temp_dir().join(format!("awful_digest_out_{}", std::process::id()));
        let path = dir.to_string_lossy().to_string();
        ensure_writable_dir(&path).await.unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
