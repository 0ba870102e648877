// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resource extraction from custom code fragments
//!
//! Output is grouped: external scripts, then stylesheets, then inline
//! scripts. Each group keeps document order. Consumers rely on this
//! grouping for stable listings, so it must not change.

use tracing::{debug, warn};

use super::resource::{InlineSnippet, ResourceReference};
use crate::config::{AuditConfig, DEFAULT_MAX_FRAGMENT_BYTES, DEFAULT_PREVIEW_LEN};
use crate::dom::{parse_fragment, Fragment, FragmentElement};

/// Extracts resource references from an HTML fragment
#[derive(Debug, Clone)]
pub struct ResourceExtractor {
    /// Characters kept in inline previews
    pub preview_len: usize,
    /// Bytes of input handed to the parser
    pub max_fragment_bytes: usize,
}

impl Default for ResourceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceExtractor {
    /// Create an extractor with the default preview length
    pub fn new() -> Self {
        Self {
            preview_len: DEFAULT_PREVIEW_LEN,
            max_fragment_bytes: DEFAULT_MAX_FRAGMENT_BYTES,
        }
    }

    /// Create an extractor from config
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            preview_len: config.preview_len,
            max_fragment_bytes: config.max_fragment_bytes,
        }
    }

    /// Set inline preview length
    pub fn with_preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Set the parser input cap in bytes
    pub fn with_max_fragment_bytes(mut self, bytes: usize) -> Self {
        self.max_fragment_bytes = bytes;
        self
    }

    /// Extract references from raw markup.
    ///
    /// Never fails: markup the parser cannot handle yields an empty list.
    /// Input past `max_fragment_bytes` is dropped and only the leading
    /// part is scanned.
    pub fn extract(&self, html: &str) -> Vec<ResourceReference> {
        if html.trim().is_empty() {
            return Vec::new();
        }

        let html = self.cap(html);
        match parse_fragment(html) {
            Ok(fragment) => self.extract_from(&fragment),
            Err(e) => {
                warn!(error = %e, "Could not parse custom code, skipping");
                Vec::new()
            }
        }
    }

    fn cap<'a>(&self, html: &'a str) -> &'a str {
        if html.len() <= self.max_fragment_bytes {
            return html;
        }

        let mut end = self.max_fragment_bytes;
        while !html.is_char_boundary(end) {
            end -= 1;
        }
        warn!(
            len = html.len(),
            limit = self.max_fragment_bytes,
            "Custom code exceeds size limit, auditing truncated prefix"
        );
        &html[..end]
    }

    /// Extract references from an already parsed fragment
    pub fn extract_from(&self, fragment: &Fragment) -> Vec<ResourceReference> {
        let mut refs = Vec::new();

        refs.extend(
            fragment
                .by_tag("script")
                .filter_map(|s| s.non_empty_attr("src"))
                .map(ResourceReference::script),
        );

        refs.extend(
            fragment
                .by_tag("link")
                .filter(|l| is_stylesheet(l))
                .filter_map(|l| l.non_empty_attr("href"))
                .map(ResourceReference::stylesheet),
        );

        let mut index = 0;
        for script in fragment.by_tag("script").filter(|s| !s.has_attr("src")) {
            let body = script.text.trim();
            if body.is_empty() {
                continue;
            }
            index += 1;
            refs.push(ResourceReference::inline(InlineSnippet::new(
                index,
                body,
                self.preview_len,
            )));
        }

        debug!(count = refs.len(), "Extracted resource references");
        refs
    }
}

fn is_stylesheet(link: &FragmentElement) -> bool {
    link.attr("rel") == Some("stylesheet")
}

/// Extract references with default settings
pub fn extract_resources(html: &str) -> Vec<ResourceReference> {
    ResourceExtractor::new().extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::resource::ResourceKind;

    fn kinds(refs: &[ResourceReference]) -> Vec<ResourceKind> {
        refs.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_empty_fragment() {
        assert!(extract_resources("").is_empty());
        assert!(extract_resources("   \n").is_empty());
    }

    #[test]
    fn test_basic_scenario() {
        let html = r#"<script src="https://code.jquery.com/jquery.js"></script><link rel="stylesheet" href="/style.css"><script>alert(1)</script>"#;
        let refs = extract_resources(html);

        assert_eq!(
            kinds(&refs),
            vec![
                ResourceKind::ExternalScript,
                ResourceKind::ExternalStylesheet,
                ResourceKind::InlineScript,
            ]
        );
        assert_eq!(refs[0].locator, "https://code.jquery.com/jquery.js");
        assert_eq!(refs[1].locator, "/style.css");

        let inline = refs[2].inline.as_ref().unwrap();
        assert_eq!(inline.index, 1);
        assert_eq!(inline.preview, "alert(1)");
        assert_eq!(refs[2].locator, "Inline Script #1: alert(1)");
    }

    #[test]
    fn test_grouping_overrides_document_order() {
        let html = r#"
            <script>first()</script>
            <link rel="stylesheet" href="a.css">
            <script src="one.js"></script>
            <link rel="stylesheet" href="b.css">
            <script src="two.js"></script>
            <script>second()</script>
        "#;
        let locators: Vec<_> = extract_resources(html)
            .into_iter()
            .map(|r| r.locator)
            .collect();

        assert_eq!(
            locators,
            vec![
                "one.js",
                "two.js",
                "a.css",
                "b.css",
                "Inline Script #1: first()",
                "Inline Script #2: second()",
            ]
        );
    }

    #[test]
    fn test_whitespace_inline_scripts_skip_index() {
        let html = "<script>  \n\t </script><script>a()</script><script></script><script> b() </script>";
        let refs = extract_resources(html);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].locator, "Inline Script #1: a()");
        assert_eq!(refs[1].locator, "Inline Script #2: b()");
    }

    #[test]
    fn test_locators_are_literal() {
        let html = r#"<script src="//cdn.example.com/x.js?v=1&amp;t=2"></script><link rel="stylesheet" href="../css/site.css">"#;
        let refs = extract_resources(html);

        // Entities are decoded by the parser; nothing else is rewritten.
        assert_eq!(refs[0].locator, "//cdn.example.com/x.js?v=1&t=2");
        assert_eq!(refs[1].locator, "../css/site.css");
    }

    #[test]
    fn test_empty_src_is_neither_external_nor_inline() {
        let html = r#"<script src=""></script><script src="">ignored()</script>"#;
        assert!(extract_resources(html).is_empty());
    }

    #[test]
    fn test_non_stylesheet_links_ignored() {
        let html = r#"
            <link rel="preconnect" href="https://fonts.gstatic.com">
            <link rel="icon" href="/favicon.ico">
            <link rel="alternate stylesheet" href="/alt.css">
            <link rel="stylesheet">
            <link rel="stylesheet" href="">
            <link rel="stylesheet" href="https://fonts.googleapis.com/css">
        "#;
        let refs = extract_resources(html);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].locator, "https://fonts.googleapis.com/css");
    }

    #[test]
    fn test_truncated_inline_preview() {
        let body = "x".repeat(101);
        let refs = extract_resources(&format!("<script>{}</script>", body));

        let inline = refs[0].inline.as_ref().unwrap();
        assert!(inline.truncated);
        assert_eq!(inline.preview.len(), 100);
        assert!(refs[0].locator.ends_with("..."));
    }

    #[test]
    fn test_custom_preview_len() {
        let refs = ResourceExtractor::new()
            .with_preview_len(5)
            .extract("<script>console.log('hi')</script>");
        assert_eq!(refs[0].locator, "Inline Script #1: conso...");
    }

    #[test]
    fn test_idempotent() {
        let html = r#"<script src="a.js"></script><script>b()</script><link rel="stylesheet" href="c.css">"#;
        assert_eq!(extract_resources(html), extract_resources(html));
    }

    #[test]
    fn test_count_law() {
        let html = r#"
            <script src="https://a.example/1.js"></script>
            <script src="/2.js" async></script>
            <link rel="stylesheet" href="/1.css">
            <script>one()</script>
            <script>   </script>
            <div><script>two()</script></div>
            <img src="x.png">
        "#;
        let refs = extract_resources(html);

        let scripts = refs.iter().filter(|r| r.kind == ResourceKind::ExternalScript).count();
        let sheets = refs.iter().filter(|r| r.kind == ResourceKind::ExternalStylesheet).count();
        let inline = refs.iter().filter(|r| r.kind == ResourceKind::InlineScript).count();
        assert_eq!((scripts, sheets, inline), (2, 1, 2));
        assert_eq!(refs.len(), 5);
    }

    #[test]
    fn test_garbage_does_not_panic() {
        let inputs = [
            "<<<>>>",
            "<script",
            "<script src=",
            "</script></script>",
            "<link rel=stylesheet href",
            "\u{0}\u{fffd}<script>\u{0}</script>",
        ];
        for input in inputs {
            let _ = extract_resources(input);
        }
    }

    #[test]
    fn test_unterminated_script_keeps_body() {
        let refs = extract_resources("<script>var a = 1;");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].locator, "Inline Script #1: var a = 1;");
    }

    #[test]
    fn test_oversized_fragment_is_cut() {
        let head = r#"<script src="https://a.example/early.js"></script>"#;
        let html = format!(
            "{}{}<script src=\"https://b.example/late.js\"></script>",
            head,
            "<div>".repeat(200)
        );
        let refs = ResourceExtractor::new()
            .with_max_fragment_bytes(head.len() + 50)
            .extract(&html);

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].locator, "https://a.example/early.js");
    }

    #[test]
    fn test_cut_respects_char_boundaries() {
        let html = "<script>\u{e9}\u{e9}\u{e9}</script>";
        // 9 bytes lands inside the first two-byte character.
        let refs = ResourceExtractor::new()
            .with_max_fragment_bytes(9)
            .extract(html);
        assert_eq!(refs.len(), 0);

        let refs = ResourceExtractor::new()
            .with_max_fragment_bytes(12)
            .extract(html);
        assert_eq!(refs[0].locator, "Inline Script #1: \u{e9}\u{e9}");
    }

    #[test]
    fn test_deep_nesting_is_bounded() {
        let html = format!("{}<script>deep()</script>", "<div>".repeat(200_000));
        let start = std::time::Instant::now();
        let refs = ResourceExtractor::new()
            .with_max_fragment_bytes(16 * 1024)
            .extract(&html);

        assert!(refs.is_empty());
        assert!(start.elapsed() < std::time::Duration::from_secs(30));
    }

    #[test]
    fn test_from_config() {
        let config = AuditConfig::default().preview_len(3).max_fragment_bytes(10);
        let extractor = ResourceExtractor::from_config(&config);
        assert_eq!(extractor.preview_len, 3);
        assert_eq!(extractor.max_fragment_bytes, 10);
    }
}
