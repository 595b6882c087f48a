//! Error types for the Orbital SDK.

use orbital_core::types::{ExecutionId, ExecutionState};

/// Result type for SDK operations.
pub type OrbitalResult<T> = Result<T, OrbitalError>;

/// Error types that can occur when using the Orbital SDK.
#[derive(Debug, thiserror::Error)]
pub enum OrbitalError {
    /// HTTP request failed before the operation layer attached context.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network or connection failure, wrapped with the operation it
    /// interrupted.
    #[error("Failed to {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server returned an error payload, or a success body with no data
    /// where data was required.
    #[error("{message}")]
    Api { message: String },

    /// A success response whose own body embedded an error field.
    #[error("{message}")]
    Payload { message: String },

    /// Local RSA key parsing or encryption failure. Never caused by the
    /// remote service.
    #[error("Failed to encrypt: {0}")]
    Encryption(String),

    /// The execution reached `failed` or `cancelled`. An expected outcome,
    /// not a client fault.
    #[error("Execution {execution_id} ended with status: {status}{}", reason_suffix(.reason))]
    ExecutionTerminated {
        execution_id: ExecutionId,
        status: ExecutionState,
        reason: Option<String>,
    },

    /// The polling budget ran out before the execution reached a terminal
    /// state.
    #[error("Execution {execution_id} timed out after {timeout_ms}ms")]
    ExecutionTimeout {
        execution_id: ExecutionId,
        timeout_ms: u64,
    },

    /// The caller cancelled the wait through its cancellation token.
    #[error("Wait for execution {execution_id} was cancelled")]
    Cancelled { execution_id: ExecutionId },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Local filesystem failure while handling execution files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrbitalError {
    /// Attach operation context to a raw transport failure.
    ///
    /// Errors that already went through normalization pass through unchanged,
    /// so re-entrant calls never wrap twice.
    pub(crate) fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Http(source) => Self::Transport {
                context: context.into(),
                source,
            },
            other => other,
        }
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" - {reason}"),
        None => String::new(),
    }
}
