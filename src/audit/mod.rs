// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Custom code audit pipeline
//!
//! - Resource extraction from head/body fragments
//! - Trust classification against known origins
//! - Per-page audit reports

mod classifier;
mod extractor;
mod report;
mod resource;

pub use classifier::{
    derive_origin, AuditEntries, ClassifiedEntry, TrustCategory, TrustClassifier,
    NO_RESOURCES_RATIONALE,
};
pub use extractor::{extract_resources, ResourceExtractor};
pub use report::{AuditReport, Region, RegionReport};
pub use resource::{InlineSnippet, ResourceKind, ResourceReference};
