// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Audit configuration

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of characters kept in an inline script preview
pub const DEFAULT_PREVIEW_LEN: usize = 100;

/// Default cap on the bytes of a fragment handed to the parser
pub const DEFAULT_MAX_FRAGMENT_BYTES: usize = 64 * 1024;

/// Hostnames trusted out of the box. Exact hostnames only.
pub const DEFAULT_TRUSTED_ORIGINS: &[&str] = &[
    "ajax.googleapis.com",
    "code.jquery.com",
    "cdn.jsdelivr.net",
    "cdnjs.cloudflare.com",
    "unpkg.com",
    "fonts.googleapis.com",
    "www.googletagmanager.com",
];

/// Audit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Hostnames considered pre-approved
    pub trusted_origins: HashSet<String>,
    /// Characters kept in inline script previews
    pub preview_len: usize,
    /// Fragments longer than this are cut before parsing
    pub max_fragment_bytes: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            trusted_origins: DEFAULT_TRUSTED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preview_len: DEFAULT_PREVIEW_LEN,
            max_fragment_bytes: DEFAULT_MAX_FRAGMENT_BYTES,
        }
    }
}

impl AuditConfig {
    /// Create a config with the default trusted origins
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that trusts nothing
    pub fn untrusting() -> Self {
        Self {
            trusted_origins: HashSet::new(),
            ..Default::default()
        }
    }

    /// Trust an additional hostname
    pub fn trust(mut self, host: impl Into<String>) -> Self {
        self.trusted_origins.insert(host.into());
        self
    }

    /// Replace the trusted hostnames
    pub fn trusted_origins<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_origins = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Set inline preview length
    pub fn preview_len(mut self, len: usize) -> Self {
        self.preview_len = len;
        self
    }

    /// Set the parser input cap in bytes
    pub fn max_fragment_bytes(mut self, bytes: usize) -> Self {
        self.max_fragment_bytes = bytes;
        self
    }

    /// Load from a JSON file. Missing fields fall back to defaults.
    ///
    /// ```json
    /// { "trusted_origins": ["code.jquery.com"], "preview_len": 100 }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Parse from a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.preview_len == 0 {
            return Err(Error::config("preview_len must be greater than zero"));
        }
        if self.max_fragment_bytes == 0 {
            return Err(Error::config("max_fragment_bytes must be greater than zero"));
        }
        if let Some(bad) = self
            .trusted_origins
            .iter()
            .find(|h| h.trim().is_empty() || h.contains('/') || h.contains('*'))
        {
            return Err(Error::config(format!(
                "trusted origin '{}' must be a bare hostname",
                bad
            )));
        }
        Ok(())
    }
}
