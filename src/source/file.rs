// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page source backed by a JSON export on disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{PageSource, SitePage};
use crate::error::{ErrorContext, Result};

/// Accepted export layouts: a bare page array or `{ "pages": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum PageExport {
    Bare(Vec<SitePage>),
    Wrapped { pages: Vec<SitePage> },
}

/// Reads pages from a JSON export file. The file is re-read on every call,
/// so each audit run sees the current contents.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    /// Create a source for the given file
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }
}

#[async_trait]
impl PageSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn pages(&self) -> Result<Vec<SitePage>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_source(&self.name)?;

        let export: PageExport = serde_json::from_str(&raw).with_source(&self.name)?;
        let pages = match export {
            PageExport::Bare(pages) => pages,
            PageExport::Wrapped { pages } => pages,
        };

        debug!(source = %self.name, count = pages.len(), "Loaded pages");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::Error;

    fn export(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_bare_array() {
        let file = export(
            r#"[
                { "id": "1", "name": "Home", "selected": true,
                  "customCode": { "head": "<script src=\"/a.js\"></script>", "body": "" } },
                { "id": "2", "name": "About" }
            ]"#,
        );
        let source = JsonFileSource::new(file.path());

        let pages = source.pages().await.unwrap();
        assert_eq!(pages.len(), 2);

        let current = source.current_page().await.unwrap();
        assert_eq!(current.page_name, "Home");
        assert_eq!(current.head, r#"<script src="/a.js"></script>"#);
    }

    #[tokio::test]
    async fn test_wrapped_pages() {
        let file = export(r#"{ "pages": [ { "id": "1", "selected": true } ] }"#);
        let current = JsonFileSource::new(file.path()).current_page().await.unwrap();
        assert_eq!(current.page_id, "1");
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_failure() {
        let source = JsonFileSource::new("/nonexistent/pages.json");
        let err = source.pages().await.unwrap_err();
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_bad_json_is_fetch_failure() {
        let file = export("{ not json");
        let err = JsonFileSource::new(file.path()).pages().await.unwrap_err();
        match err {
            Error::FetchFailed { source_name, .. } => {
                assert_eq!(source_name, file.path().display().to_string());
            }
            other => panic!("Expected FetchFailed, got {:?}", other),
        }
    }
}
