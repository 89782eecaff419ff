//! Blob storage for uploaded files.
//!
//! Handlers talk to the [`BlobStore`] trait; only the URL returned by it is
//! persisted. The production implementation is S3 with presigned download
//! URLs ([`s3::S3Storage`]).

pub mod s3;

use async_trait::async_trait;

pub use s3::{S3Config, S3Storage};

/// Error type for blob storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The object could not be written.
    #[error("Blob upload error: {0}")]
    Upload(String),

    /// A download URL could not be produced.
    #[error("Blob presign error: {0}")]
    Presign(String),
}

/// Object storage seam for uploaded file bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key` and return a retrievable URL for it.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Produce a time-limited download URL for an existing object.
    async fn presigned_url(&self, key: &str) -> Result<String, StorageError>;
}

/// Build a storage key for an upload: a fresh UUID keeping the original
/// file extension.
pub fn object_key(original_filename: &str) -> String {
    let ext = std::path::Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    format!("{}.{ext}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_the_extension() {
        let key = object_key("opt-receipt.pdf");
        assert!(key.ends_with(".pdf"));
        // UUID v4 plus dot plus extension.
        assert_eq!(key.len(), 36 + 4);
    }

    #[test]
    fn object_key_without_extension_falls_back() {
        let key = object_key("receipt");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn object_keys_are_unique() {
        assert_ne!(object_key("a.png"), object_key("a.png"));
    }
}
