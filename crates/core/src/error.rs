//! Error types for fsb-core
//!
//! Provides the closed error set shared by all storage bridges, so hosts
//! can branch on error kind rather than on message text.

use thiserror::Error;

/// Boxed underlying cause of a failed storage operation
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for fsb-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for storage bridge and adapter operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration (bad options container, unparsable value, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required configuration option is absent
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),

    /// Caller passed a malformed argument; detected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport or service failure during a storage operation
    #[error("{op} failed for key '{key}': {source}")]
    Operation {
        /// Operation name ("upload", "read", "delete", "exists", "presign")
        op: &'static str,
        /// Logical key the operation targeted
        key: String,
        /// Underlying SDK/transport error
        #[source]
        source: BoxedCause,
    },
}

impl Error {
    /// Wrap an underlying failure of a named storage operation
    pub fn operation(
        op: &'static str,
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Operation {
            op,
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error means the requested object is missing
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
