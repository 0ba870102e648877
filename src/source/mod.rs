// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page data sources
//!
//! The auditor never talks to a host platform directly. It asks a
//! [`PageSource`] for the site's pages and audits the selected one.

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use file::JsonFileSource;
pub use memory::StaticSource;

/// Custom code attached to a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCode {
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// A page as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePage {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Whether this page is the one currently open in the host
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub custom_code: Option<CustomCode>,
}

impl SitePage {
    /// Create a page with no custom code
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            selected: false,
            custom_code: None,
        }
    }

    /// Mark the page as selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Set head and body custom code
    pub fn with_code(mut self, head: impl Into<String>, body: impl Into<String>) -> Self {
        self.custom_code = Some(CustomCode {
            head: Some(head.into()),
            body: Some(body.into()),
        });
        self
    }
}

/// The two custom code fragments of the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCode {
    pub page_id: String,
    pub page_name: String,
    /// Head custom code, empty when absent
    pub head: String,
    /// Body custom code, empty when absent
    pub body: String,
}

impl From<SitePage> for PageCode {
    fn from(page: SitePage) -> Self {
        let code = page.custom_code.unwrap_or_default();
        Self {
            page_id: page.id,
            page_name: page.name,
            head: code.head.unwrap_or_default(),
            body: code.body.unwrap_or_default(),
        }
    }
}

/// Host platform data source
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// All pages of the site
    async fn pages(&self) -> Result<Vec<SitePage>>;

    /// Custom code of the selected page
    async fn current_page(&self) -> Result<PageCode> {
        let pages = self.pages().await?;
        pages
            .into_iter()
            .find(|p| p.selected)
            .map(PageCode::from)
            .ok_or_else(|| {
                Error::data_unavailable(format!("no page selected in {}", self.name()))
            })
    }
}
