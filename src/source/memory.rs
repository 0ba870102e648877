// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory page source

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{PageSource, SitePage};
use crate::error::Result;

/// Page source backed by a page list held in memory.
///
/// Pages can be swapped between runs, which is how an embedding host
/// pushes updated designer state.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pages: Arc<RwLock<Vec<SitePage>>>,
}

impl StaticSource {
    /// Create a source with the given pages
    pub fn new(pages: Vec<SitePage>) -> Self {
        Self {
            pages: Arc::new(RwLock::new(pages)),
        }
    }

    /// Replace the page list
    pub fn set_pages(&self, pages: Vec<SitePage>) {
        *self.pages.write() = pages;
    }
}

#[async_trait]
impl PageSource for StaticSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn pages(&self) -> Result<Vec<SitePage>> {
        Ok(self.pages.read().clone())
    }
}
