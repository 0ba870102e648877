// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the custom code auditor
//!
//! Every failure maps to a user-visible status message. None of them are
//! fatal to the process; an audit run is simply aborted.

use thiserror::Error;

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the auditor
#[derive(Error, Debug)]
pub enum Error {
    /// No current page/context could be found
    #[error("No page data available: {0}")]
    DataUnavailable(String),

    /// The host data call failed
    #[error("Failed to fetch page data from {source_name}: {reason}")]
    FetchFailed { reason: String, source_name: String },

    /// HTML parsing failed. Never surfaced by extraction, which fails open.
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a data-unavailable error
    pub fn data_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::DataUnavailable(msg.into())
    }

    /// Create a fetch error for the named source
    pub fn fetch_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::FetchFailed {
            reason: reason.into(),
            source_name: source_name.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the user can fix this by acting in the host (e.g. selecting a page)
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, Error::DataUnavailable(_))
    }

    /// Check if this came from the page data collaborator
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FetchFailed { .. })
    }

    /// Status line shown to the user when an audit run ends with this error
    pub fn status_message(&self) -> String {
        match self {
            Error::DataUnavailable(_) => {
                "No active page found in the Designer. Please select a page.".to_string()
            }
            Error::FetchFailed { reason, .. } => {
                format!("Error: {}. Please check logs for details.", reason)
            }
            other => format!("Error: {}. Please check logs for details.", other),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Turn any error into a fetch failure attributed to `source_name`
    fn with_source(self, source_name: &str) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_source(self, source_name: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            Error::FetchFailed { reason, .. } => Error::fetch_failed(source_name, reason),
            err @ Error::DataUnavailable(_) => err,
            other => Error::fetch_failed(source_name, other.to_string()),
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
