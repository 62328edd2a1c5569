//! S3 storage bridge
//!
//! Matches the "s3" driver name and constructs the storage adapter from
//! the host's options mapping. All option validation beyond the container
//! shape lives in [`S3Storage::new`].

use std::sync::Arc;

use async_trait::async_trait;

use fsb_core::{FileStorage, Result, StorageBridge, StorageConfig};

use crate::storage::S3Storage;

/// Driver name this bridge answers to
pub const DRIVER: &str = "s3";

/// Bridge producing S3 storage adapters
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Bridge;

impl S3Bridge {
    /// Create the bridge
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBridge for S3Bridge {
    fn supports(&self, driver: &str) -> bool {
        driver == DRIVER
    }

    async fn create(&self, config: &StorageConfig) -> Result<Arc<dyn FileStorage>> {
        let options = config.options()?;
        Ok(Arc::new(S3Storage::new(options).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsb_core::Error;
    use serde_json::json;

    #[test]
    fn test_supports_exact_match_only() {
        let bridge = S3Bridge::new();
        assert!(bridge.supports("s3"));

        for driver in ["S3", "s3 ", " s3", "local", "ftp", ""] {
            assert!(!bridge.supports(driver), "must reject '{driver}'");
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_options_container() {
        let bridge = S3Bridge::new();

        let config = StorageConfig::new("s3", serde_json::Value::Null);
        let err = bridge.create(&config).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let config = StorageConfig::new("s3", json!(["bucket", "media"]));
        let err = bridge.create(&config).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_create_delegates_option_validation_to_adapter() {
        let bridge = S3Bridge::new();

        let config = StorageConfig::new("s3", json!({}));
        let err = bridge.create(&config).await.unwrap_err();
        assert!(matches!(err, Error::MissingOption("bucket")));

        let config = StorageConfig::new("s3", json!({"bucket": "media"}));
        let err = bridge.create(&config).await.unwrap_err();
        assert!(matches!(err, Error::MissingOption("region")));
    }

    #[tokio::test]
    async fn test_create_with_required_options() {
        let bridge = S3Bridge::new();

        let config = StorageConfig::new(
            "s3",
            json!({"bucket": "media", "region": "us-east-1"}),
        );
        assert!(bridge.create(&config).await.is_ok());
    }
}
