//! Object-store access for remotely hosted config files.
//!
//! Responsibilities:
//! - Parse `s3://bucket/prefix` locations and compute object keys.
//! - Define the `ObjectStore` capability (fetch bytes by bucket and key).
//! - Provide a blocking HTTP implementation with connect/request timeouts.
//!
//! Does NOT handle:
//! - Request signing. `HttpObjectStore` issues plain path-style GETs, which
//!   suits public buckets, presigning proxies and local S3-compatible servers.
//! - Falling back to the filesystem (see provider.rs).

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_OBJECT_STORE_CONNECT_TIMEOUT_SECS, DEFAULT_OBJECT_STORE_ENDPOINT,
    DEFAULT_OBJECT_STORE_TIMEOUT_SECS, OBJECT_STORE_SCHEME,
};

/// Errors from the object store. The loader logs and swallows all of them.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("invalid object-store location {location:?}: {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("object {bucket}/{key} not found")]
    NotFound { bucket: String, key: String },

    #[error("access to {bucket}/{key} denied (HTTP {status})")]
    AccessDenied {
        bucket: String,
        key: String,
        status: u16,
    },

    #[error("object store returned HTTP {0}")]
    Status(u16),

    #[error("object store request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Returns true when `location` names an object-store bucket.
pub fn is_object_store_location(location: &str) -> bool {
    location
        .strip_prefix(OBJECT_STORE_SCHEME)
        .is_some_and(|rest| rest.starts_with("://"))
}

/// A parsed `s3://bucket/prefix` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    /// Key prefix with surrounding slashes removed; may be empty.
    pub prefix: String,
}

impl S3Location {
    pub fn parse(location: &str) -> Result<Self, ObjectStoreError> {
        let invalid = |reason: &str| ObjectStoreError::InvalidLocation {
            location: location.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(location).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != OBJECT_STORE_SCHEME {
            return Err(invalid("scheme must be s3"));
        }
        let bucket = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| invalid("missing bucket name"))?;

        Ok(Self {
            bucket: bucket.to_string(),
            prefix: url.path().trim_matches('/').to_string(),
        })
    }

    /// Object key for `<prefix>/<app_name>/<confname>`.
    pub fn key_for(&self, app_name: &str, confname: &str) -> String {
        if self.prefix.is_empty() {
            format!("{app_name}/{confname}")
        } else {
            format!("{}/{app_name}/{confname}", self.prefix)
        }
    }
}

/// Fetch-by-key capability over a bucketed object store.
pub trait ObjectStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}

/// Settings for [`HttpObjectStore`].
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    /// Base URL; objects are requested at `<endpoint>/<bucket>/<key>`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OBJECT_STORE_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_OBJECT_STORE_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_OBJECT_STORE_TIMEOUT_SECS),
        }
    }
}

/// Blocking HTTP object-store client using path-style URLs.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl HttpObjectStore {
    pub fn new(config: ObjectStoreConfig) -> Result<Self, ObjectStoreError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ObjectStoreError::InvalidLocation {
                location: config.endpoint.clone(),
                reason: e.to_string(),
            }
        })?;
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn object_url(&self, bucket: &str, key: &str) -> Result<Url, ObjectStoreError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|_| ObjectStoreError::InvalidLocation {
                        location: self.endpoint.to_string(),
                        reason: "endpoint cannot be a base URL".to_string(),
                    })?;
            segments.pop_if_empty();
            segments.push(bucket);
            segments.extend(key.split('/'));
        }
        Ok(url)
    }
}

impl ObjectStore for HttpObjectStore {
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let url = self.object_url(bucket, key)?;
        let response = self.client.get(url).send()?;
        let status = response.status();

        match status.as_u16() {
            200..=299 => Ok(response.bytes()?.to_vec()),
            404 => Err(ObjectStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }),
            401 | 403 => Err(ObjectStoreError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
                status: status.as_u16(),
            }),
            other => Err(ObjectStoreError::Status(other)),
        }
    }
}
