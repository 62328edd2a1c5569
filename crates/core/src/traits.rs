//! FileStorage port and StorageBridge trait definitions
//!
//! These traits define the interface between a host application and a
//! concrete storage backend. They are independent of any storage SDK,
//! allowing adapters to be swapped and mocked for testing.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

use crate::error::Result;
use crate::options::Options;

/// Byte stream handle for object content
///
/// Streams are caller-owned on both sides: the adapter consumes but does
/// not close the stream passed to `save`, and the caller must drop the
/// stream returned by `read_stream` after consuming it.
pub type ContentStream = Pin<Box<dyn AsyncRead + Send>>;

/// Metadata returned by a save operation
///
/// Carries the logical (unprefixed) key as the caller supplied it, the
/// identifier of the adapter that stored it, and the storage timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Logical key, as given to `save`
    pub key: String,

    /// Driver identifier of the adapter that stored the object
    pub adapter: String,

    /// When the object was stored
    pub stored_at: jiff::Timestamp,
}

impl StoredObject {
    /// Create metadata for a freshly stored object, stamped now
    pub fn new(key: impl Into<String>, adapter: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            adapter: adapter.into(),
            stored_at: jiff::Timestamp::now(),
        }
    }
}

/// Generic storage configuration handed to a bridge by the host
///
/// The host resolves the driver name (typically from a connection string it
/// parses itself) and passes the remaining parameters as a raw options
/// value. Bridges validate the container shape via [`StorageConfig::options`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Driver name selecting the backend ("s3", "local", ...)
    pub driver: String,

    /// Backend-specific options as a string-to-string mapping
    #[serde(default)]
    pub options: serde_json::Value,
}

impl StorageConfig {
    /// Create a configuration for a driver with the given options value
    pub fn new(driver: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            driver: driver.into(),
            options,
        }
    }

    /// Extract and validate the options mapping
    pub fn options(&self) -> Result<Options> {
        Options::from_value(&self.options)
    }
}

/// File-storage capability set implemented by every backend adapter
///
/// All operations take a logical key; adapters map it to the physical key
/// (prefix applied) internally. Each call is one synchronous round trip
/// against the backend; adapters hold no mutable state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload stream content under the logical key
    ///
    /// `size` is the exact content length in bytes; `content_type` is the
    /// MIME type stored with the object.
    async fn save(
        &self,
        content: ContentStream,
        key: &str,
        content_type: &str,
        size: u64,
    ) -> Result<StoredObject>;

    /// Open a stream over the object's content, positioned at the start
    async fn read_stream(&self, key: &str) -> Result<ContentStream>;

    /// Remove the object; absence is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check whether the object exists
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Generate a time-limited signed URL granting read access
    async fn url(&self, key: &str) -> Result<String>;
}

impl std::fmt::Debug for dyn FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn FileStorage")
    }
}

/// Factory matching a driver name to a concrete storage adapter
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageBridge: Send + Sync {
    /// Whether this bridge handles the given driver name (exact match)
    fn supports(&self, driver: &str) -> bool;

    /// Construct a storage adapter from the host's configuration
    async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn FileStorage>>;
}
