// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resource references found in custom code

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of resource reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// `<script src=...>`
    ExternalScript,
    /// `<link rel="stylesheet" href=...>`
    ExternalStylesheet,
    /// `<script>` with a body and no `src`
    InlineScript,
}

impl ResourceKind {
    /// Short label used in listings
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::ExternalScript => "Script",
            ResourceKind::ExternalStylesheet => "Stylesheet",
            ResourceKind::InlineScript => "Inline",
        }
    }
}

/// Preview of an inline script body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSnippet {
    /// 1-based position among non-empty inline scripts
    pub index: usize,
    /// Leading characters of the trimmed body, without the ellipsis
    pub preview: String,
    /// Whether the body was longer than the preview
    pub truncated: bool,
}

impl InlineSnippet {
    /// Build a snippet from an already trimmed body
    pub fn new(index: usize, body: &str, max_chars: usize) -> Self {
        let mut chars = body.char_indices();
        match chars.nth(max_chars) {
            Some((cut, _)) => Self {
                index,
                preview: body[..cut].to_string(),
                truncated: true,
            },
            None => Self {
                index,
                preview: body.to_string(),
                truncated: false,
            },
        }
    }

    /// Synthetic locator: `Inline Script #<index>: <preview>[...]`
    pub fn label(&self) -> String {
        format!(
            "Inline Script #{}: {}{}",
            self.index,
            self.preview,
            if self.truncated { "..." } else { "" }
        )
    }
}

/// A reference to a resource in a custom code fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Reference kind
    pub kind: ResourceKind,
    /// URL as written for external kinds, synthetic label for inline scripts
    pub locator: String,
    /// Inline details (inline scripts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlineSnippet>,
}

impl ResourceReference {
    /// External script reference
    pub fn script(src: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::ExternalScript,
            locator: src.into(),
            inline: None,
        }
    }

    /// External stylesheet reference
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::ExternalStylesheet,
            locator: href.into(),
            inline: None,
        }
    }

    /// Inline script reference
    pub fn inline(snippet: InlineSnippet) -> Self {
        Self {
            kind: ResourceKind::InlineScript,
            locator: snippet.label(),
            inline: Some(snippet),
        }
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ResourceKind::InlineScript => write!(f, "{}", self.locator),
            kind => write!(f, "{}: {}", kind.label(), self.locator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_body_not_truncated() {
        let snippet = InlineSnippet::new(1, "alert(1)", 100);
        assert!(!snippet.truncated);
        assert_eq!(snippet.label(), "Inline Script #1: alert(1)");
    }

    #[test]
    fn test_truncation_boundary() {
        let exact = "a".repeat(100);
        let snippet = InlineSnippet::new(1, &exact, 100);
        assert!(!snippet.truncated);
        assert_eq!(snippet.preview, exact);

        let over = "b".repeat(101);
        let snippet = InlineSnippet::new(2, &over, 100);
        assert!(snippet.truncated);
        assert_eq!(snippet.preview, "b".repeat(100));
        assert!(snippet.label().ends_with("..."));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let body = "é".repeat(120);
        let snippet = InlineSnippet::new(1, &body, 100);
        assert!(snippet.truncated);
        assert_eq!(snippet.preview.chars().count(), 100);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResourceReference::script("https://a.example/x.js").to_string(),
            "Script: https://a.example/x.js"
        );
        assert_eq!(
            ResourceReference::stylesheet("/x.css").to_string(),
            "Stylesheet: /x.css"
        );
        let inline = ResourceReference::inline(InlineSnippet::new(3, "go()", 100));
        assert_eq!(inline.to_string(), "Inline Script #3: go()");
    }
}
