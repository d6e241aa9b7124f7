//! Result and error types for the element layer.

use crate::selector::SelectorKind;
use thiserror::Error;

/// Result type for element operations
pub type ProbarResult<T> = Result<T, ProbarError>;

/// Result type for calls answered by a driver backend
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur in the element layer
#[derive(Debug, Error)]
pub enum ProbarError {
    /// A caller broke an API contract; raised before any side effect
    #[error("Contract violation: {message}")]
    ContractViolation {
        /// Error message
        message: String,
    },

    /// A named element (option, link, button, field) could not be located
    #[error("{kind} matching \"{locator}\" not found")]
    ElementNotFound {
        /// What was searched for (e.g. "select option")
        kind: String,
        /// Text or expression that was tried
        locator: String,
    },

    /// No engine is registered for a selector kind
    #[error("No selector engine registered for \"{kind}\"")]
    UnknownSelector {
        /// The unregistered kind
        kind: SelectorKind,
    },

    /// Selector arguments do not fit the selector kind
    #[error("Invalid selector arguments for \"{kind}\": {message}")]
    InvalidSelector {
        /// Selector kind
        kind: SelectorKind,
        /// Error message
        message: String,
    },

    /// Failure reported by the driver, passed through untouched
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ProbarError {
    /// Create a contract violation error
    #[must_use]
    pub fn contract(message: impl Into<String>) -> Self {
        Self::ContractViolation {
            message: message.into(),
        }
    }

    /// Create an element-not-found error
    #[must_use]
    pub fn not_found(kind: impl Into<String>, locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            kind: kind.into(),
            locator: locator.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The driver error behind this error, if any
    #[must_use]
    pub const fn as_driver_error(&self) -> Option<&DriverError> {
        match self {
            Self::Driver(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors reported by driver backends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// No node matches the locator the call was addressed to
    #[error("No node matches locator: {locator}")]
    NodeNotFound {
        /// Locator expression
        locator: String,
    },

    /// The backend does not implement the operation
    #[error("Operation not supported by driver: {operation}")]
    Unsupported {
        /// Operation name
        operation: String,
    },

    /// The session behind the driver is gone
    #[error("Driver session closed")]
    SessionClosed,

    /// Any other backend failure
    #[error("Driver failure: {message}")]
    Failure {
        /// Error message
        message: String,
    },
}

impl DriverError {
    /// Create a generic driver failure
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    /// Create a node-not-found failure
    #[must_use]
    pub fn node_not_found(locator: impl Into<String>) -> Self {
        Self::NodeNotFound {
            locator: locator.into(),
        }
    }
}
