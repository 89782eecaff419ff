//! S3-backed blob storage with presigned download URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;

use super::{BlobStore, StorageError};

/// Presigned download URLs are valid for one hour.
const PRESIGN_EXPIRY: Duration = Duration::from_secs(3600);

/// S3 configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket all uploads land in.
    pub bucket: String,
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// Region and credentials are resolved by the standard AWS provider
    /// chain (`AWS_REGION`, `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
    /// profiles, instance metadata).
    ///
    /// # Panics
    ///
    /// Panics if `AWS_S3_BUCKET_NAME` is not set; the service cannot run
    /// without a bucket to write to.
    pub fn from_env() -> Self {
        let bucket = std::env::var("AWS_S3_BUCKET_NAME")
            .expect("AWS_S3_BUCKET_NAME must be set in the environment");
        Self { bucket }
    }
}

/// S3 implementation of [`BlobStore`].
pub struct S3Storage {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Storage {
    /// Build the S3 client from the ambient AWS configuration.
    pub async fn new(config: S3Config) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket: config.bucket,
        }
    }
}

#[async_trait]
impl BlobStore for S3Storage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        tracing::info!(key, bucket = %self.bucket, "Uploaded object to S3");

        // Only the retrievable URL is persisted downstream.
        self.presigned_url(key).await
    }

    async fn presigned_url(&self, key: &str) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(PRESIGN_EXPIRY)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
