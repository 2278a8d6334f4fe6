//! Error types for the docchat client.

use thiserror::Error;

/// A shared error type for the docchat crates.
///
/// Validation failures (`UnsupportedFile`, `EmptyQuestion`, `NoActiveFile`)
/// are recovered locally by the controller and surfaced as transcript
/// messages. Backend and transport failures carry the message the server put
/// in its error body, or a generic fallback.
#[derive(Error, Debug, Clone)]
pub enum DocChatError {
    /// The file's extension is not in the upload allow-list.
    #[error("Unsupported file format: \"{name}\"")]
    UnsupportedFile { name: String },

    /// The question was empty after trimming whitespace.
    #[error("Question is empty")]
    EmptyQuestion,

    /// A question was asked while no uploaded file is active.
    #[error("No active file")]
    NoActiveFile,

    /// The backend answered with a non-success HTTP status.
    #[error("{message}")]
    Backend {
        status: Option<u16>,
        message: String,
    },

    /// Transport-level failure (connect, timeout, malformed body).
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocChatError {
    /// Creates an UnsupportedFile error
    pub fn unsupported_file(name: impl Into<String>) -> Self {
        Self::UnsupportedFile { name: name.into() }
    }

    /// Creates a Backend error from a status code and error-body message
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a locally recoverable validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFile { .. } | Self::EmptyQuestion | Self::NoActiveFile
        )
    }

    /// Check if this is a backend error
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DocChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DocChatError>`.
pub type Result<T> = std::result::Result<T, DocChatError>;
