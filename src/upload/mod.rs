//! Artifact delivery module for tfs.
//!
//! Generated documents can be pushed to an object store and shared through
//! a time-limited link:
//! - [`ArtifactUploader`] is the backend interface
//! - [`S3Uploader`] implements it on top of S3 presigned URLs

mod s3;
mod uploader;

pub use s3::S3Uploader;
pub use uploader::{
    ArtifactUploader, DEFAULT_EXPIRATION, HTML_CONTENT_TYPE, MAX_EXPIRATION, MIN_EXPIRATION,
    SharedLink, object_key, publish_document, validate_expiration,
};
