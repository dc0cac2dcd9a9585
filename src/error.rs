//! Error handling for the AnimeAV1 provider
//!
//! This module defines the failure taxonomy surfaced by the pipeline stages
//! and a Result alias for use throughout the crate.

use crate::reference::Variant;
use thiserror::Error;

/// Main error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-success HTTP status or transport error
    #[error("Fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// Payload is missing the expected node/pool shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// No node or record matched the stage's predicate
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// The embeds map has no entry for the requested category (e.g. `DUB`)
    #[error("No content for {0}")]
    NoContentForVariant(String),

    /// No HLS server in the category's server list
    #[error("No HLS stream found for {0}")]
    StreamNotFound(Variant),

    /// Identifier failed to decode where decoding is mandatory
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProviderError>,
    },
}

/// Stable discriminant of a [`ProviderError`], for hosts that branch on the
/// failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FetchFailed,
    MalformedPayload,
    RecordNotFound,
    NoContentForVariant,
    StreamNotFound,
    InvalidReference,
    Config,
    Io,
}

impl ProviderError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProviderError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Kind of the underlying failure, looking through context wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::FetchFailed { .. } => ErrorKind::FetchFailed,
            ProviderError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            ProviderError::RecordNotFound(_) => ErrorKind::RecordNotFound,
            ProviderError::NoContentForVariant(_) => ErrorKind::NoContentForVariant,
            ProviderError::StreamNotFound(_) => ErrorKind::StreamNotFound,
            ProviderError::InvalidReference(_) => ErrorKind::InvalidReference,
            ProviderError::Config(_) => ErrorKind::Config,
            ProviderError::Io(_) => ErrorKind::Io,
            ProviderError::WithContext { source, .. } => source.kind(),
        }
    }

    /// Shorthand for a fetch failure
    pub(crate) fn fetch(url: &str, reason: impl Into<String>) -> Self {
        ProviderError::FetchFailed {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NoContentForVariant("DUB".to_string());
        assert_eq!(err.to_string(), "No content for DUB");
    }

    #[test]
    fn test_stream_not_found_names_variant() {
        let err = ProviderError::StreamNotFound(Variant::Dub);
        assert_eq!(err.to_string(), "No HLS stream found for dub");
    }

    #[test]
    fn test_error_with_context() {
        let err = ProviderError::Config("bad url".to_string());
        let with_ctx = err.with_context("Failed to load config");
        assert!(with_ctx.to_string().contains("Failed to load config"));
        assert_eq!(with_ctx.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_fetch_failed_display() {
        let err = ProviderError::fetch("https://x/media/a/__data.json", "HTTP 404");
        assert!(err.to_string().contains("https://x/media/a/__data.json"));
        assert!(err.to_string().contains("HTTP 404"));
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
    }
}
