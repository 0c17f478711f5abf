//! Content providers: interchangeable sources of raw config bytes.
//!
//! Responsibilities:
//! - Define the `ContentProvider` capability used by the loader.
//! - Fetch from an object-store bucket, swallowing every remote failure.
//! - Fetch from the local filesystem through the `Locator`.
//!
//! Does NOT handle:
//! - Decryption or parsing (see loader).
//!
//! Invariants:
//! - `Ok(None)` means "nothing here, try the next provider".
//! - The object-store provider never returns `Err`.
//! - The filesystem provider only errors when a located file cannot be read.

use std::path::PathBuf;

use crate::loader::ConfigError;
use crate::locator::Locator;
use crate::object_store::{ObjectStore, S3Location};

/// What the loader is looking for.
#[derive(Debug, Clone, Copy)]
pub struct FetchRequest<'a> {
    pub confname: &'a str,
    pub app_name: &'a str,
    pub prefix: &'a str,
    pub verbose: bool,
}

/// A source of raw config bytes tried in a fixed order by the loader.
pub trait ContentProvider {
    /// Short name used in log fields.
    fn name(&self) -> &'static str;

    fn fetch(&self, request: &FetchRequest<'_>) -> Result<Option<Vec<u8>>, ConfigError>;
}

/// Reads config objects from `<prefix>/<app_name>/<confname>` in a bucket.
pub struct ObjectStoreProvider {
    location: String,
    store: Box<dyn ObjectStore>,
}

impl ObjectStoreProvider {
    pub fn new(location: impl Into<String>, store: Box<dyn ObjectStore>) -> Self {
        Self {
            location: location.into(),
            store,
        }
    }
}

impl ContentProvider for ObjectStoreProvider {
    fn name(&self) -> &'static str {
        "object-store"
    }

    fn fetch(&self, request: &FetchRequest<'_>) -> Result<Option<Vec<u8>>, ConfigError> {
        let location = match S3Location::parse(&self.location) {
            Ok(location) => location,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring object-store location");
                return Ok(None);
            }
        };
        let key = location.key_for(request.app_name, request.confname);

        match self.store.get(&location.bucket, &key) {
            Ok(content) => {
                if request.verbose {
                    tracing::info!(key = %key, "config loaded from '{}'", self.location);
                }
                Ok(Some(content))
            }
            Err(e) => {
                tracing::debug!(
                    bucket = %location.bucket,
                    key = %key,
                    error = %e,
                    "Object-store fetch failed; falling back to filesystem"
                );
                Ok(None)
            }
        }
    }
}

/// Reads config files found by the [`Locator`].
pub struct FilesystemProvider {
    locator: Locator,
}

impl FilesystemProvider {
    pub fn new(locator: Locator) -> Self {
        Self { locator }
    }

    fn read(path: PathBuf) -> Result<Vec<u8>, ConfigError> {
        std::fs::read(&path).map_err(|source| ConfigError::Io { path, source })
    }
}

impl ContentProvider for FilesystemProvider {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn fetch(&self, request: &FetchRequest<'_>) -> Result<Option<Vec<u8>>, ConfigError> {
        self.locator
            .locate(
                request.confname,
                request.app_name,
                request.prefix,
                request.verbose,
            )
            .map(Self::read)
            .transpose()
    }
}
