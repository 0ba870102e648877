// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Audit runs over the current page
//!
//! Every run starts from scratch: fetch, extract, classify. Nothing is
//! cached between runs and overlapping runs are not serialized; the
//! `run_id` on each report tells them apart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::audit::{AuditReport, Region, RegionReport, ResourceExtractor, TrustClassifier};
use crate::config::AuditConfig;
use crate::error::Result;
use crate::source::PageSource;

/// User-facing state of an audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditStatus {
    /// A run is in flight
    Auditing,
    /// The last run produced a report
    Complete,
    /// No page is selected in the host
    NoPage,
    /// The last run failed
    Failed(String),
}

impl AuditStatus {
    /// Status for a finished run
    pub fn from_result(result: &Result<AuditReport>) -> Self {
        match result {
            Ok(_) => AuditStatus::Complete,
            Err(e) if e.is_user_actionable() => AuditStatus::NoPage,
            Err(e) => AuditStatus::Failed(e.status_message()),
        }
    }

    /// Status line shown to the user
    pub fn message(&self) -> String {
        match self {
            AuditStatus::Auditing => "Auditing custom code...".to_string(),
            AuditStatus::Complete => "Audit complete!".to_string(),
            AuditStatus::NoPage => {
                "No active page found in the Designer. Please select a page.".to_string()
            }
            AuditStatus::Failed(msg) => msg.clone(),
        }
    }

    /// Whether results should be shown alongside the status
    pub fn shows_results(&self) -> bool {
        matches!(self, AuditStatus::Complete)
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Audits the custom code of the page currently selected in a [`PageSource`]
pub struct Auditor {
    source: Arc<dyn PageSource>,
    extractor: ResourceExtractor,
    classifier: TrustClassifier,
    runs: AtomicU64,
}

impl Auditor {
    /// Create an auditor
    pub fn new(source: Arc<dyn PageSource>, config: &AuditConfig) -> Self {
        Self {
            source,
            extractor: ResourceExtractor::from_config(config),
            classifier: TrustClassifier::from_config(config),
            runs: AtomicU64::new(0),
        }
    }

    /// Number of runs started so far
    pub fn runs_started(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// Run one audit of the current page
    pub async fn run(&self) -> Result<AuditReport> {
        let run_id = self.runs.fetch_add(1, Ordering::Relaxed) + 1;
        info!(run_id, source = self.source.name(), "{}", AuditStatus::Auditing);

        let page = match self.source.current_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!(run_id, error = %e, "Audit aborted");
                return Err(e);
            }
        };

        let report = AuditReport {
            run_id,
            head: RegionReport::audit(Region::Head, page.head, &self.extractor, &self.classifier),
            body: RegionReport::audit(Region::Body, page.body, &self.extractor, &self.classifier),
            page_id: page.page_id,
            page_name: page.page_name,
            generated_at: Utc::now(),
        };

        info!(
            run_id,
            page = %report.page_name,
            summary = %report.summary(),
            "{}",
            AuditStatus::Complete
        );
        Ok(report)
    }

    /// Re-run the audit from scratch
    pub async fn refresh(&self) -> Result<AuditReport> {
        self.run().await
    }

    /// Audit a single raw fragment without going through the source
    pub fn audit_fragment(&self, region: Region, html: &str) -> RegionReport {
        RegionReport::audit(region, html, &self.extractor, &self.classifier)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::audit::TrustCategory;
    use crate::error::Error;
    use crate::source::{SitePage, StaticSource};

    struct FailingSource;

    #[async_trait]
    impl PageSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn pages(&self) -> Result<Vec<SitePage>> {
            Err(Error::fetch_failed(self.name(), "host unavailable"))
        }
    }

    fn auditor(pages: Vec<SitePage>) -> Auditor {
        Auditor::new(
            Arc::new(StaticSource::new(pages)),
            &AuditConfig::untrusting().trust("code.jquery.com"),
        )
    }

    #[tokio::test]
    async fn test_full_run() {
        let auditor = auditor(vec![SitePage::new("home", "Home")
            .with_code(
                r#"<script src="https://code.jquery.com/jquery.js"></script><link rel="stylesheet" href="/style.css"><script>alert(1)</script>"#,
                "",
            )
            .selected()]);

        let result = auditor.run().await;
        assert_eq!(AuditStatus::from_result(&result), AuditStatus::Complete);

        let report = result.unwrap();
        assert_eq!(report.run_id, 1);
        assert_eq!(report.page_name, "Home");
        assert_eq!(
            report.head.entries.categories(),
            vec![
                TrustCategory::Safe,
                TrustCategory::Local,
                TrustCategory::InlineReview,
            ]
        );
        assert!(report.body.entries.is_no_resources());
        assert_eq!(
            report.body.display_code(),
            "No custom code found in <body> for this page."
        );
    }

    #[tokio::test]
    async fn test_no_selected_page() {
        let auditor = auditor(vec![SitePage::new("home", "Home")]);
        let result = auditor.run().await;

        let status = AuditStatus::from_result(&result);
        assert_eq!(status, AuditStatus::NoPage);
        assert!(!status.shows_results());
        assert_eq!(
            status.message(),
            "No active page found in the Designer. Please select a page."
        );
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let auditor = Auditor::new(Arc::new(FailingSource), &AuditConfig::default());
        let result = auditor.run().await;

        assert_eq!(
            AuditStatus::from_result(&result),
            AuditStatus::Failed(
                "Error: host unavailable. Please check logs for details.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_refresh_sees_new_code() {
        let source = Arc::new(StaticSource::new(vec![SitePage::new("p", "Page")
            .with_code("", "")
            .selected()]));
        let auditor = Auditor::new(source.clone(), &AuditConfig::default());

        let first = auditor.run().await.unwrap();
        assert!(first.head.entries.is_no_resources());

        source.set_pages(vec![SitePage::new("p", "Page")
            .with_code("<script>late()</script>", "")
            .selected()]);

        let second = auditor.refresh().await.unwrap();
        assert_eq!(second.run_id, 2);
        assert_eq!(second.head.entries.categories(), vec![TrustCategory::InlineReview]);
        assert_eq!(auditor.runs_started(), 2);
    }

    #[test]
    fn test_audit_fragment() {
        let auditor = auditor(vec![]);
        let report = auditor.audit_fragment(
            Region::Body,
            r#"<script src="https://evil.example.com/x.js"></script>"#,
        );
        assert_eq!(report.entries.categories(), vec![TrustCategory::Unknown]);
        assert!(report.entries.entries()[0].rationale.contains("evil.example.com"));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(AuditStatus::Auditing.message(), "Auditing custom code...");
        assert_eq!(AuditStatus::Complete.to_string(), "Audit complete!");
        assert!(AuditStatus::Complete.shows_results());
    }
}
