// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Codeaudit - Custom Code Auditor
//!
//! Audits the custom `<head>`/`<body>` code injected into a page and flags
//! third-party and inline code for review.
//!
//! ## Features
//!
//! - Resource extraction: external scripts, stylesheets and inline scripts
//! - Trust classification: trusted CDN, unknown origin, local path, inline
//! - Fail-open parsing: malformed markup never aborts an audit
//! - Pluggable page sources: JSON exports or in-memory designer state
//!
//! ## Example
//!
//! ```rust
//! use codeaudit::{extract_resources, TrustCategory, TrustClassifier};
//!
//! let html = r#"<script src="https://code.jquery.com/jquery.js"></script><script>alert(1)</script>"#;
//! let classifier = TrustClassifier::new(["code.jquery.com"]);
//! let entries = classifier.classify_all(&extract_resources(html));
//!
//! assert_eq!(
//!     entries.categories(),
//!     vec![TrustCategory::Safe, TrustCategory::InlineReview]
//! );
//! ```

pub mod audit;
pub mod auditor;
pub mod config;
pub mod dom;
pub mod error;
pub mod render;
pub mod source;

// Re-exports for convenience

// Extraction and classification
pub use audit::{extract_resources, derive_origin, ResourceExtractor, TrustClassifier};
pub use audit::{AuditEntries, ClassifiedEntry, TrustCategory};
pub use audit::{InlineSnippet, ResourceKind, ResourceReference};

// Reports
pub use audit::{AuditReport, Region, RegionReport};
pub use render::{render_json, render_text};

// Runs
pub use auditor::{AuditStatus, Auditor};

// Config
pub use config::AuditConfig;

// Page sources
pub use source::{JsonFileSource, PageCode, PageSource, SitePage, StaticSource};

// Errors
pub use error::{Error, ErrorContext, Result};

/// Codeaudit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
