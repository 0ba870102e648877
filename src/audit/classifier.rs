// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Trust classification of resource references
//!
//! Category assignment depends only on the reference and the trusted
//! origin set, never on ordering or earlier results.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::resource::{ResourceKind, ResourceReference};
use crate::config::AuditConfig;

/// Trust category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustCategory {
    /// Origin is on the trusted list
    Safe,
    /// Origin is not on the trusted list
    Unknown,
    /// Relative path or no derivable host
    Local,
    /// Inline code, needs manual review
    InlineReview,
    /// Nothing to classify
    NoResources,
}

impl TrustCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            TrustCategory::Safe => "SAFE",
            TrustCategory::Unknown => "UNKNOWN",
            TrustCategory::Local => "LOCAL",
            TrustCategory::InlineReview => "INLINE - REVIEW",
            TrustCategory::NoResources => "NONE",
        }
    }

    /// Review severity (0-10)
    pub fn severity(&self) -> u8 {
        match self {
            TrustCategory::Unknown => 8,
            TrustCategory::InlineReview => 6,
            TrustCategory::Local => 4,
            TrustCategory::Safe => 1,
            TrustCategory::NoResources => 0,
        }
    }

    /// Whether a reviewer has to look at this entry
    pub fn needs_review(&self) -> bool {
        matches!(self, TrustCategory::Unknown | TrustCategory::InlineReview)
    }
}

impl fmt::Display for TrustCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rationale for the `NoResources` sentinel
pub const NO_RESOURCES_RATIONALE: &str =
    "No external scripts, stylesheets or inline scripts found.";

const INLINE_RATIONALE: &str =
    "Inline script. Review manually for malicious intent or performance impact.";

const LOCAL_RATIONALE: &str =
    "Relative path or malformed URL. Verify it resolves to an intended resource.";

/// A classified reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    /// The reference that was classified
    pub reference: ResourceReference,
    /// Assigned category
    pub category: TrustCategory,
    /// Hostname derived from the locator, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Why the category was assigned
    pub rationale: String,
}

/// Classification result for one fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "entries", rename_all = "snake_case")]
pub enum AuditEntries {
    /// The fragment held no references
    NoResources,
    /// One entry per reference, in extraction order
    Classified(Vec<ClassifiedEntry>),
}

impl AuditEntries {
    /// Entries in extraction order (empty for the sentinel)
    pub fn entries(&self) -> &[ClassifiedEntry] {
        match self {
            AuditEntries::NoResources => &[],
            AuditEntries::Classified(entries) => entries,
        }
    }

    /// Categories in order; the sentinel yields `[NoResources]`
    pub fn categories(&self) -> Vec<TrustCategory> {
        match self {
            AuditEntries::NoResources => vec![TrustCategory::NoResources],
            AuditEntries::Classified(entries) => entries.iter().map(|e| e.category).collect(),
        }
    }

    /// Whether this is the nothing-to-classify sentinel
    pub fn is_no_resources(&self) -> bool {
        matches!(self, AuditEntries::NoResources)
    }

    /// Entries ordered by descending severity, stable within a category
    pub fn by_severity(&self) -> Vec<&ClassifiedEntry> {
        let mut sorted: Vec<_> = self.entries().iter().collect();
        sorted.sort_by(|a, b| b.category.severity().cmp(&a.category.severity()));
        sorted
    }

    /// Number of entries in a category
    pub fn count(&self, category: TrustCategory) -> usize {
        match (self, category) {
            (AuditEntries::NoResources, TrustCategory::NoResources) => 1,
            _ => self.entries().iter().filter(|e| e.category == category).count(),
        }
    }

    /// Whether any entry needs a reviewer
    pub fn needs_review(&self) -> bool {
        self.entries().iter().any(|e| e.category.needs_review())
    }
}

/// Assigns trust categories against a set of trusted hostnames
#[derive(Debug, Clone, Default)]
pub struct TrustClassifier {
    trusted_origins: HashSet<String>,
}

impl TrustClassifier {
    /// Create a classifier for the given trusted hostnames
    pub fn new<I, S>(trusted_origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            trusted_origins: trusted_origins.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a classifier from config
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            trusted_origins: config.trusted_origins.clone(),
        }
    }

    /// Classify one reference
    pub fn classify(&self, reference: &ResourceReference) -> ClassifiedEntry {
        if reference.kind == ResourceKind::InlineScript {
            return ClassifiedEntry {
                reference: reference.clone(),
                category: TrustCategory::InlineReview,
                origin: None,
                rationale: INLINE_RATIONALE.to_string(),
            };
        }

        let Some(host) = derive_origin(&reference.locator) else {
            return ClassifiedEntry {
                reference: reference.clone(),
                category: TrustCategory::Local,
                origin: None,
                rationale: LOCAL_RATIONALE.to_string(),
            };
        };

        let (category, rationale) = if self.trusted_origins.contains(&host) {
            (
                TrustCategory::Safe,
                "Origin is a recognized, pre-approved domain.".to_string(),
            )
        } else {
            (
                TrustCategory::Unknown,
                format!(
                    "Origin '{}' is not in the trusted list. Review for security risk.",
                    host
                ),
            )
        };

        ClassifiedEntry {
            reference: reference.clone(),
            category,
            origin: Some(host),
            rationale,
        }
    }

    /// Classify a whole extraction result
    pub fn classify_all(&self, references: &[ResourceReference]) -> AuditEntries {
        if references.is_empty() {
            return AuditEntries::NoResources;
        }
        AuditEntries::Classified(references.iter().map(|r| self.classify(r)).collect())
    }
}

/// Hostname of an absolute URL. Relative, malformed and host-less
/// locators (`data:`, `mailto:`) have none.
pub fn derive_origin(locator: &str) -> Option<String> {
    let url = Url::parse(locator).ok()?;
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
}
