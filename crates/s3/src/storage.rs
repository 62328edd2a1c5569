//! S3 storage adapter
//!
//! Wraps aws-sdk-s3 and implements the FileStorage trait from fsb-core.
//! Each operation is a single round trip against the configured bucket;
//! retries, timeouts and credential refresh are the SDK's business.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::AsyncReadExt;

use fsb_core::{ContentStream, Error, FileStorage, Options, Prefix, Result, StoredObject};

use crate::bridge::DRIVER;

/// Default presigned-URL lifetime in seconds
pub const DEFAULT_URL_EXPIRATION_SECS: u64 = 3600;

/// S3-backed file storage, bound to one bucket/region/prefix for its lifetime
#[derive(Debug)]
pub struct S3Storage {
    inner: aws_sdk_s3::Client,
    bucket: String,
    prefix: Option<Prefix>,
    url_expiration: Duration,
}

impl S3Storage {
    /// Create a new adapter from validated driver options
    ///
    /// Required options: `bucket`, `region`. Optional: `endpoint` (custom
    /// endpoint with path-style addressing, for MinIO and friends),
    /// `key`/`access_key` + `secret`/`secret_key` (static credentials;
    /// absent means the SDK default chain), `prefix`, `url_expiration`.
    pub async fn new(options: Options) -> Result<Self> {
        let bucket = options.require("bucket")?.to_string();
        let region = options.require("region")?.to_string();
        let prefix = options.get("prefix").map(Prefix::new);
        let url_expiration = Duration::from_secs(
            options.parse_or("url_expiration", DEFAULT_URL_EXPIRATION_SECS)?,
        );

        let endpoint = match options.get("endpoint") {
            Some(raw) => Some(url::Url::parse(raw).map_err(|e| {
                Error::Config(format!("invalid endpoint '{raw}': {e}"))
            })?),
            None => None,
        };

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region));

        // Static credentials only when both spellings resolve; otherwise the
        // SDK default chain (environment, profile, instance role) applies.
        let access_key = options.first_of(&["key", "access_key"]);
        let secret_key = options.first_of(&["secret", "secret_key"]);
        if let (Some(access_key), Some(secret_key)) = (access_key, secret_key) {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                access_key,
                secret_key,
                None, // session token
                None, // expiry
                "fsb-static-credentials",
            ));
        }

        let config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&config);
        if let Some(endpoint) = endpoint {
            // S3-compatible services usually lack virtual-hosted-style DNS
            builder = builder
                .endpoint_url(endpoint.as_str())
                .force_path_style(true);
        }

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket,
            prefix,
            url_expiration,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Bucket this adapter is bound to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Map a logical key to the physical key stored in the bucket
    fn full_key(&self, logical: &str) -> String {
        fsb_core::full_key(self.prefix.as_ref(), logical)
    }
}

/// Drain the stream, checking it yields exactly the declared size
async fn buffer_content(mut content: ContentStream, size: u64) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    content
        .read_to_end(&mut buffer)
        .await
        .map_err(|e| Error::InvalidInput(format!("content stream is not readable: {e}")))?;

    if buffer.len() as u64 != size {
        return Err(Error::InvalidInput(format!(
            "content is {} bytes but {size} were declared",
            buffer.len()
        )));
    }

    Ok(buffer)
}

#[async_trait]
impl FileStorage for S3Storage {
    async fn save(
        &self,
        content: ContentStream,
        key: &str,
        content_type: &str,
        size: u64,
    ) -> Result<StoredObject> {
        // Validated before any network call
        let buffer = buffer_content(content, size).await?;

        let full_key = self.full_key(key);
        tracing::debug!(bucket = %self.bucket, key = %full_key, size, "uploading object");

        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .content_type(content_type)
            .content_length(size as i64)
            .body(ByteStream::from(buffer))
            .send()
            .await
            .map_err(|e| Error::operation("upload", key, e))?;

        Ok(StoredObject::new(key, DRIVER))
    }

    async fn read_stream(&self, key: &str) -> Result<ContentStream> {
        let full_key = self.full_key(key);
        tracing::debug!(bucket = %self.bucket, key = %full_key, "reading object");

        let response = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .map(GetObjectError::is_no_such_key)
                    .unwrap_or(false)
                {
                    Error::NotFound(key.to_string())
                } else {
                    Error::operation("read", key, e)
                }
            })?;

        Ok(Box::pin(response.body.into_async_read()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let full_key = self.full_key(key);
        tracing::debug!(bucket = %self.bucket, key = %full_key, "deleting object");

        // DeleteObject succeeds for absent keys, so this stays idempotent
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .send()
            .await
            .map_err(|e| Error::operation("delete", key, e))?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let full_key = self.full_key(key);

        match self
            .inner
            .head_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .map(HeadObjectError::is_not_found)
                    .unwrap_or(false) =>
            {
                Ok(false)
            }
            Err(e) => Err(Error::operation("exists", key, e)),
        }
    }

    async fn url(&self, key: &str) -> Result<String> {
        let full_key = self.full_key(key);

        let presigning = PresigningConfig::expires_in(self.url_expiration)
            .map_err(|e| Error::operation("presign", key, e))?;

        let request = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::operation("presign", key, e))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: serde_json::Value) -> Options {
        Options::from_value(&value).unwrap()
    }

    fn local_options() -> Options {
        options(json!({
            "bucket": "media",
            "region": "us-east-1",
            "endpoint": "http://localhost:9000",
            "key": "accesskey",
            "secret": "secretkey",
        }))
    }

    #[tokio::test]
    async fn test_new_requires_bucket_then_region() {
        let err = S3Storage::new(options(json!({}))).await.unwrap_err();
        assert!(matches!(err, Error::MissingOption("bucket")));

        let err = S3Storage::new(options(json!({"bucket": "media"})))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingOption("region")));
    }

    #[tokio::test]
    async fn test_new_succeeds_with_required_options_only() {
        let storage = S3Storage::new(options(json!({
            "bucket": "media",
            "region": "eu-west-1",
        })))
        .await
        .unwrap();

        assert_eq!(storage.bucket(), "media");
        assert_eq!(storage.url_expiration, Duration::from_secs(3600));
        assert!(storage.prefix.is_none());
    }

    #[tokio::test]
    async fn test_new_rejects_malformed_endpoint() {
        let err = S3Storage::new(options(json!({
            "bucket": "media",
            "region": "us-east-1",
            "endpoint": "not a url",
        })))
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_new_rejects_garbage_url_expiration() {
        let err = S3Storage::new(options(json!({
            "bucket": "media",
            "region": "us-east-1",
            "url_expiration": "soon",
        })))
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_new_parses_url_expiration() {
        let storage = S3Storage::new(options(json!({
            "bucket": "media",
            "region": "us-east-1",
            "url_expiration": "600",
        })))
        .await
        .unwrap();
        assert_eq!(storage.url_expiration, Duration::from_secs(600));
    }

    #[tokio::test]
    async fn test_full_key_applies_prefix() {
        let storage = S3Storage::new(options(json!({
            "bucket": "media",
            "region": "us-east-1",
            "prefix": "photos/",
        })))
        .await
        .unwrap();

        assert_eq!(storage.full_key("test.txt"), "photos/test.txt");
        assert_eq!(storage.full_key("/test.txt"), "photos/test.txt");
    }

    #[tokio::test]
    async fn test_save_rejects_size_mismatch_before_upload() {
        // Endpoint points nowhere; the mismatch must surface without any
        // request being attempted.
        let storage = S3Storage::new(local_options()).await.unwrap();

        let content: ContentStream = Box::pin(std::io::Cursor::new(b"abc".to_vec()));
        let err = storage
            .save(content, "test.txt", "text/plain", 5)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("3 bytes but 5"));
    }

    #[tokio::test]
    async fn test_buffer_content_exact_size() {
        let content: ContentStream = Box::pin(std::io::Cursor::new(vec![0u8, 159, 146, 150]));
        let buffer = buffer_content(content, 4).await.unwrap();
        assert_eq!(buffer, vec![0u8, 159, 146, 150]);
    }
}
