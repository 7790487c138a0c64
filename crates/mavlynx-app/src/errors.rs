//! Categorized application errors
//!
//! Provides structured error types that enable:
//! - Categorized error handling (network vs navigation vs user input)
//! - Recovery hints for user-actionable errors
//!
//! A superseded async result is not an error; see
//! [`LoadOutcome::Stale`](crate::fetch::LoadOutcome::Stale).

use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Categories
// ============================================================================

/// High-level error categories for frontend error handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// User input validation errors (correctable by user)
    Input,
    /// Configuration errors (correctable by modifying settings)
    Config,
    /// Resource not found errors
    NotFound,
    /// Data-source errors (often transient)
    Network,
    /// Malformed navigation payloads
    Navigation,
}

impl ErrorCategory {
    /// Check if this error category is user-correctable.
    #[must_use]
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Input | Self::Config)
    }

    /// Check if this error category is likely transient.
    ///
    /// Transient errors may resolve on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a short label for this category.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Config => "Config",
            Self::NotFound => "Not Found",
            Self::Network => "Network",
            Self::Navigation => "Navigation",
        }
    }

    /// Get a hint for the user on how to resolve this category of error.
    #[must_use]
    pub fn resolution_hint(&self) -> &'static str {
        match self {
            Self::Input => "Check your input and try again",
            Self::Config => "Review your configuration settings",
            Self::NotFound => "The requested item could not be found",
            Self::Network => "Check your connection and retry",
            Self::Navigation => "Showing the default view instead",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// AppError
// ============================================================================

/// Categorized application errors.
///
/// None of these are fatal: screens keep running and fall back to their
/// previous or default state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AppError {
    /// The data source failed to produce a list
    #[error("failed to fetch {resource}: {message}")]
    FetchFailed {
        /// List that was requested
        resource: String,
        /// What the source reported
        message: String,
    },

    /// A destination received a payload it cannot interpret
    #[error("invalid payload for {route}: {reason}")]
    NavigationPayloadInvalid {
        /// Destination the payload was sent to
        route: String,
        /// Why it was rejected
        reason: String,
    },

    /// A checklist toggle targeted an item that does not exist
    #[error("checklist item {index} out of range (hold has {len} items)")]
    ChecklistIndexOutOfRange {
        /// Requested item
        index: usize,
        /// Items on the checklist
        len: usize,
    },

    /// A route name that matches no destination
    #[error("unknown destination: {0}")]
    UnknownRoute(String),

    /// A sub-tab name that the current screen does not have
    #[error("unknown sub-tab: {0}")]
    UnknownSubTab(String),

    /// A value typed by the user that cannot be interpreted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An entity id that is not in the current list
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "club"
        kind: &'static str,
        /// Requested id
        id: u32,
    },

    /// Configuration failed to parse or validate
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a fetch failure
    pub fn fetch_failed(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a navigation payload error
    pub fn invalid_payload(route: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::NavigationPayloadInvalid {
            route: route.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(kind: &'static str, id: u32) -> Self {
        Self::NotFound { kind, id }
    }

    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchFailed { .. } => ErrorCategory::Network,
            Self::NavigationPayloadInvalid { .. } => ErrorCategory::Navigation,
            Self::ChecklistIndexOutOfRange { .. }
            | Self::UnknownRoute(_)
            | Self::UnknownSubTab(_)
            | Self::InvalidInput(_) => ErrorCategory::Input,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Check if the error can be retried
    pub fn is_recoverable(&self) -> bool {
        self.category().is_transient()
    }

    /// Get a short error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::NavigationPayloadInvalid { .. } => "NAV_PAYLOAD_INVALID",
            Self::ChecklistIndexOutOfRange { .. } => "CHECKLIST_RANGE",
            Self::UnknownRoute(_) => "UNKNOWN_ROUTE",
            Self::UnknownSubTab(_) => "UNKNOWN_SUBTAB",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Config(_) => "CONFIG",
        }
    }

    /// Format the error with its category and resolution hint
    pub fn user_message(&self) -> String {
        let category = self.category();
        format!("[{category}] {self}. {}", category.resolution_hint())
    }
}
