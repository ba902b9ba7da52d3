//! Uploader trait and object naming.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Result, UploadError};

/// Shortest accepted link lifetime.
pub const MIN_EXPIRATION: Duration = Duration::from_secs(1);

/// Longest accepted link lifetime (7 days).
pub const MAX_EXPIRATION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Default link lifetime (15 minutes).
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(15 * 60);

/// Content type of the generated document.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Time-limited link to an uploaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    /// URL granting read access.
    pub url: String,
    /// How long the URL stays valid.
    pub expires_in: Duration,
}

/// Destination for generated artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactUploader: Send + Sync {
    /// Stores `bytes` under `key` and returns a link valid for `expires_in`.
    async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<SharedLink>;

    /// Gets the backend type name.
    fn backend_type(&self) -> &'static str;
}

/// Checks that a link lifetime is within the accepted range.
///
/// # Errors
///
/// Returns an error if `expires_in` is shorter than one second or longer
/// than seven days.
pub fn validate_expiration(expires_in: Duration) -> Result<()> {
    if expires_in < MIN_EXPIRATION || expires_in > MAX_EXPIRATION {
        return Err(UploadError::InvalidSettings {
            message: format!(
                "expiration must be between {} and {} seconds, got {}",
                MIN_EXPIRATION.as_secs(),
                MAX_EXPIRATION.as_secs(),
                expires_in.as_secs()
            ),
        }
        .into());
    }
    Ok(())
}

/// Builds the object key for a document generated at `timestamp`.
///
/// The prefix is trimmed of slashes; an empty prefix puts the object at the
/// bucket root.
#[must_use]
pub fn object_key(prefix: Option<&str>, timestamp: DateTime<Utc>) -> String {
    let prefix = prefix
        .map(|p| {
            let p = p.trim_matches('/');
            if p.is_empty() {
                String::new()
            } else {
                format!("{p}/")
            }
        })
        .unwrap_or_default();

    format!("{prefix}tfs-plan-{}.html", timestamp.timestamp())
}

/// Uploads a rendered document and returns its shared link.
///
/// # Errors
///
/// Returns an error if the lifetime is out of range or the upload fails.
pub async fn publish_document<U>(
    uploader: &U,
    prefix: Option<&str>,
    html: String,
    expires_in: Duration,
    timestamp: DateTime<Utc>,
) -> Result<SharedLink>
where
    U: ArtifactUploader + ?Sized,
{
    validate_expiration(expires_in)?;

    let key = object_key(prefix, timestamp);
    info!(
        "Uploading {} bytes to {} as {key}",
        html.len(),
        uploader.backend_type()
    );

    let link = uploader
        .upload(&key, html.into_bytes(), HTML_CONTENT_TYPE, expires_in)
        .await?;

    info!("Link valid for {}s", link.expires_in.as_secs());
    Ok(link)
}
