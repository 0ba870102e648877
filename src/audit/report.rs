// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Audit reports for a page's custom code regions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classifier::{AuditEntries, TrustCategory, TrustClassifier};
use super::extractor::ResourceExtractor;

/// Where the custom code is injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Head,
    Body,
}

impl Region {
    /// Tag name of the region
    pub fn tag(&self) -> &'static str {
        match self {
            Region::Head => "head",
            Region::Body => "body",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.tag())
    }
}

/// Audit result for one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReport {
    pub region: Region,
    /// Custom code exactly as configured
    pub raw_code: String,
    pub entries: AuditEntries,
}

impl RegionReport {
    /// Extract and classify one region's custom code
    pub fn audit(
        region: Region,
        raw_code: impl Into<String>,
        extractor: &ResourceExtractor,
        classifier: &TrustClassifier,
    ) -> Self {
        let raw_code = raw_code.into();
        let references = extractor.extract(&raw_code);
        let entries = classifier.classify_all(&references);
        Self {
            region,
            raw_code,
            entries,
        }
    }

    /// Raw code for verbatim display, or a placeholder when there is none
    pub fn display_code(&self) -> String {
        if self.raw_code.is_empty() {
            format!("No custom code found in {} for this page.", self.region)
        } else {
            self.raw_code.clone()
        }
    }
}

/// Audit result for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Sequence number of the run that produced this report
    pub run_id: u64,
    pub page_id: String,
    pub page_name: String,
    pub generated_at: DateTime<Utc>,
    pub head: RegionReport,
    pub body: RegionReport,
}

impl AuditReport {
    /// Both regions, head first
    pub fn regions(&self) -> [&RegionReport; 2] {
        [&self.head, &self.body]
    }

    /// Whether any region has entries a reviewer must look at
    pub fn needs_review(&self) -> bool {
        self.regions().iter().any(|r| r.entries.needs_review())
    }

    /// Entry count for a category across both regions
    pub fn count(&self, category: TrustCategory) -> usize {
        self.regions()
            .iter()
            .map(|r| r.entries.count(category))
            .sum()
    }

    /// One-line summary of the classified entries
    pub fn summary(&self) -> String {
        format!(
            "{} unknown, {} inline, {} local, {} safe",
            self.count(TrustCategory::Unknown),
            self.count(TrustCategory::InlineReview),
            self.count(TrustCategory::Local),
            self.count(TrustCategory::Safe),
        )
    }
}
