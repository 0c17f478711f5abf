//! Layered, optionally encrypted application configuration.
//!
//! This crate locates config files for a named application, decrypts them
//! when a passphrase is supplied, evaluates their `KEY = <literal>` lines and
//! merges the result into a [`ConfigMap`] that can be applied onto a
//! [`Namespace`].

pub mod constants;
pub mod deploy;
pub mod encryption;
pub mod literal;
mod loader;
pub mod locator;
pub mod object_store;
pub mod provider;
pub mod settings;

pub use deploy::{DeployError, DeploySettings};
pub use encryption::EncryptionError;
pub use literal::{LiteralError, Value};
pub use loader::{ConfigError, ConfigLoader, ConfigMap, env_var_or_none, load_config, parse_content};
pub use locator::{Locator, SearchLocation, locate_config};
pub use object_store::{HttpObjectStore, ObjectStore, ObjectStoreConfig, ObjectStoreError, S3Location};
pub use provider::{ContentProvider, FetchRequest, FilesystemProvider, ObjectStoreProvider};
pub use settings::{ApplyReport, LogFileStatus, Namespace, Settings, apply};
