//! S3 artifact delivery.
//!
//! Documents are written with `put_object` and shared through a presigned
//! GET URL, so the bucket itself can stay private.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use tracing::{debug, info};

use crate::error::{Result, UploadError};

use super::uploader::{ArtifactUploader, SharedLink, validate_expiration};

/// S3-backed uploader.
#[derive(Debug, Clone)]
pub struct S3Uploader {
    /// S3 client.
    client: Client,
    /// Bucket name.
    bucket: String,
}

impl S3Uploader {
    /// Creates an uploader using the default credential chain.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket name is empty.
    pub async fn new(bucket: &str, region: Option<&str>) -> Result<Self> {
        Self::check_bucket(bucket)?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region.filter(|r| !r.is_empty()) {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;

        info!("Using S3 bucket {bucket}");
        Ok(Self::with_client(Client::new(&config), bucket))
    }

    /// Creates an uploader with an existing client.
    #[must_use]
    pub fn with_client(client: Client, bucket: &str) -> Self {
        Self {
            client,
            bucket: bucket.to_string(),
        }
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Produces a presigned GET URL for an object.
    ///
    /// Signing is local; no request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifetime is out of range or signing fails.
    pub async fn presign(&self, key: &str, expires_in: Duration) -> Result<String> {
        validate_expiration(expires_in)?;

        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| UploadError::signing(key, e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| UploadError::signing(key, e.to_string()))?;

        Ok(request.uri().to_string())
    }

    fn check_bucket(bucket: &str) -> Result<()> {
        if bucket.trim().is_empty() {
            return Err(UploadError::InvalidSettings {
                message: String::from("bucket name is required"),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactUploader for S3Uploader {
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<SharedLink> {
        validate_expiration(expires_in)?;

        debug!("Putting s3://{}/{key}", self.bucket);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| UploadError::transfer(key, e.into_service_error().to_string()))?;

        let url = self.presign(key, expires_in).await?;
        Ok(SharedLink { url, expires_in })
    }

    fn backend_type(&self) -> &'static str {
        "s3"
    }
}
