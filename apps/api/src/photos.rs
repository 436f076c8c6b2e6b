//! Profile photo storage.
//!
//! Photos are stored under `photos/{userId}/{uuid}` and referenced from the
//! resume by the opaque file id `{userId}/{uuid}`. Reads go through short-lived
//! presigned URLs so the rendered HTML (and the PDF service) can fetch them
//! without credentials.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub const ACCEPTED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];
const URL_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Photo upload failed: {0}")]
    Upload(String),

    #[error("Could not create photo URL: {0}")]
    Presign(String),

    #[error("Unsupported photo type '{0}' (expected PNG, JPEG or WebP)")]
    UnsupportedContentType(String),

    #[error("Photo is {size} bytes; the limit is {max}")]
    TooLarge { size: usize, max: usize },
}

/// Checks an upload against the accepted types and the size limit.
pub fn validate_upload(content_type: &str, size: usize, max: usize) -> Result<(), PhotoError> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !ACCEPTED_CONTENT_TYPES.contains(&essence.as_str()) {
        return Err(PhotoError::UnsupportedContentType(content_type.to_string()));
    }
    if size > max {
        return Err(PhotoError::TooLarge { size, max });
    }
    Ok(())
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Stores the image and returns its opaque file id.
    async fn upload(
        &self,
        user_id: Uuid,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, PhotoError>;

    /// A URL the renderer can embed for `file_id`.
    async fn url(&self, file_id: &str) -> Result<String, PhotoError>;
}

#[derive(Clone)]
pub struct S3PhotoStore {
    client: S3Client,
    bucket: String,
    max_bytes: usize,
}

impl S3PhotoStore {
    pub fn new(client: S3Client, bucket: String, max_bytes: usize) -> Self {
        Self {
            client,
            bucket,
            max_bytes,
        }
    }
}

fn object_key(file_id: &str) -> String {
    format!("photos/{file_id}")
}

#[async_trait]
impl PhotoStore for S3PhotoStore {
    async fn upload(
        &self,
        user_id: Uuid,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, PhotoError> {
        validate_upload(content_type, bytes.len(), self.max_bytes)?;

        let file_id = format!("{user_id}/{}", Uuid::new_v4());
        let key = object_key(&file_id);
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| PhotoError::Upload(e.to_string()))?;

        info!("Uploaded photo ({size} bytes) to s3://{}/{}", self.bucket, key);
        Ok(file_id)
    }

    async fn url(&self, file_id: &str) -> Result<String, PhotoError> {
        let presigning =
            PresigningConfig::expires_in(URL_TTL).map_err(|e| PhotoError::Presign(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key(file_id))
            .presigned(presigning)
            .await
            .map_err(|e| PhotoError::Presign(e.to_string()))?;
        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_types_within_limit() {
        assert!(validate_upload("image/png", 10, 10).is_ok());
        assert!(validate_upload("image/JPEG", 1, 10).is_ok());
        assert!(validate_upload("image/webp; charset=binary", 1, 10).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = validate_upload("image/gif", 1, 10).unwrap_err();
        assert!(matches!(err, PhotoError::UnsupportedContentType(t) if t == "image/gif"));
        assert!(validate_upload("", 1, 10).is_err());
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let err = validate_upload("image/png", 11, 10).unwrap_err();
        assert!(matches!(err, PhotoError::TooLarge { size: 11, max: 10 }));
    }

    #[test]
    fn test_object_key_is_namespaced_by_user() {
        assert_eq!(object_key("u1/p1"), "photos/u1/p1");
    }
}
