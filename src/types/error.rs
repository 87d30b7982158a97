//! Unified Error Type System
//!
//! Centralized error types for the whole application.
//! Every error carries a kind that tells the presentation layer whether the
//! current cycle can be recovered locally (show a message and wait for the
//! next submission) or must be surfaced as a failure.
//!
//! ## Error Kinds
//!
//! - **Validation**: bad form input (empty restaurant name)
//! - **NoData**: every collector came back empty
//! - **Collector**: a review source failed while fetching or parsing
//! - **Analyzer**: sentiment/keyword analysis failed
//! - **Delivery**: the prompt hand-off could not be started or failed
//! - **Config**: invalid or unreadable configuration
//! - **System**: IO, serialization and transport errors

use std::time::Duration;
use thiserror::Error;

use super::review::Platform;

// =============================================================================
// Error Kinds
// =============================================================================

/// Error classification used by the session and CLI layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid user input - warn and halt the cycle
    Validation,
    /// No reviews found for the restaurant - report and halt the cycle
    NoData,
    /// A review source failed - fatal for the cycle
    Collector,
    /// Analysis failed - fatal for the cycle
    Analyzer,
    /// Prompt hand-off failed
    Delivery,
    /// Configuration problem - fix config and rerun
    Config,
    /// IO, serialization, HTTP transport
    System,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::NoData => write!(f, "NO_DATA"),
            Self::Collector => write!(f, "COLLECTOR"),
            Self::Analyzer => write!(f, "ANALYZER"),
            Self::Delivery => write!(f, "DELIVERY"),
            Self::Config => write!(f, "CONFIG"),
            Self::System => write!(f, "SYSTEM"),
        }
    }
}

impl ErrorKind {
    /// Kinds that the session handles itself with a user-facing message
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation | Self::NoData)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ReviewError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // Cycle Errors
    // -------------------------------------------------------------------------
    #[error("식당 이름을 입력하세요.")]
    EmptyName,

    #[error("리뷰를 찾지 못했습니다: {name}")]
    NoReviews { name: String },

    #[error("Invalid session transition: {0}")]
    InvalidState(String),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    #[error("Collector {platform} failed: {message}")]
    Collector { platform: Platform, message: String },

    #[error("Failed to parse {platform} response: {message}")]
    Parse { platform: Platform, message: String },

    #[error("Analysis failed: {0}")]
    Analyzer(String),

    #[error("Delivery via {method} failed: {message}")]
    Delivery { method: String, message: String },

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReviewError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl ReviewError {
    pub fn collector(platform: Platform, message: impl Into<String>) -> Self {
        Self::Collector {
            platform,
            message: message.into(),
        }
    }

    pub fn parse(platform: Platform, message: impl Into<String>) -> Self {
        Self::Parse {
            platform,
            message: message.into(),
        }
    }

    pub fn delivery(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            method: method.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName => ErrorKind::Validation,
            Self::NoReviews { .. } => ErrorKind::NoData,
            Self::Collector { .. } | Self::Parse { .. } => ErrorKind::Collector,
            Self::Analyzer(_) => ErrorKind::Analyzer,
            Self::Delivery { .. } => ErrorKind::Delivery,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_)
            | Self::Json(_)
            | Self::Yaml(_)
            | Self::Http(_)
            | Self::Timeout { .. }
            | Self::InvalidState(_) => ErrorKind::System,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }
}

pub trait ResultExt<T> {
    /// Attach the failing platform to any error raised while collecting
    fn for_platform(self, platform: Platform) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn for_platform(self, platform: Platform) -> Result<T> {
        self.map_err(|e| ReviewError::collector(platform, e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Validation.to_string(), "VALIDATION");
        assert_eq!(ErrorKind::NoData.to_string(), "NO_DATA");
        assert_eq!(ErrorKind::Collector.to_string(), "COLLECTOR");
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(ReviewError::EmptyName.is_recoverable());
        assert!(
            ReviewError::NoReviews {
                name: "없는식당".to_string()
            }
            .is_recoverable()
        );
        assert!(!ReviewError::collector(Platform::Kakao, "boom").is_recoverable());
        assert!(!ReviewError::Analyzer("bad".to_string()).is_recoverable());
        assert!(!ReviewError::Config("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_parse_errors_count_as_collector_failures() {
        let err = ReviewError::parse(Platform::Naver, "missing place id");
        assert_eq!(err.kind(), ErrorKind::Collector);
        assert_eq!(
            err.to_string(),
            "Failed to parse naver response: missing place id"
        );
    }

    #[test]
    fn test_for_platform_wraps_message() {
        let raw: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("connection reset"));
        let err = raw.for_platform(Platform::Google).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collector);
        assert!(err.to_string().contains("google"));
        assert!(err.to_string().contains("connection reset"));
    }
}
