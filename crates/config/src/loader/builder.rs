//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` collecting the app name, config
//!   names, remote location, passphrase and search prefix.
//! - Run the fetch → decrypt → parse pipeline for every config name in order.
//!
//! Does NOT handle:
//! - Where files live on disk (see locator.rs).
//! - Talking to the object store (see provider.rs and object_store.rs).
//! - Applying the result onto a namespace (see settings.rs).
//!
//! Invariants / Assumptions:
//! - Providers are tried in fixed order: object store, then filesystem.
//! - Builder methods take precedence over environment variables.
//! - Decryption and expression failures abort the whole load; no partial map escapes.
//! - Missing config names are skipped silently after the locator's warning.

use secrecy::{ExposeSecret, SecretString};

use super::env::apply_env;
use super::error::ConfigError;
use super::parse::{ConfigMap, parse_content};
use crate::constants::DEFAULT_PREFIX;
use crate::encryption;
use crate::locator::Locator;
use crate::object_store::{HttpObjectStore, ObjectStore, ObjectStoreConfig, is_object_store_location};
use crate::provider::{ContentProvider, FetchRequest, FilesystemProvider, ObjectStoreProvider};

/// Loads and merges the config files of one application.
pub struct ConfigLoader {
    app_name: String,
    confnames: Vec<String>,
    location: Option<String>,
    passphrase: Option<SecretString>,
    prefix: String,
    verbose: bool,
    locator: Locator,
    object_store: Option<Box<dyn ObjectStore>>,
    object_store_config: ObjectStoreConfig,
}

impl ConfigLoader {
    /// Create a new loader for `app_name`.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            confnames: Vec::new(),
            location: None,
            passphrase: None,
            prefix: DEFAULT_PREFIX.to_string(),
            verbose: false,
            locator: Locator::new(),
            object_store: None,
            object_store_config: ObjectStoreConfig::default(),
        }
    }

    /// Read loader settings from `<APP>_CONFIG_*` environment variables.
    ///
    /// Values set through builder methods are kept.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Append a config name; names are loaded in the order given.
    pub fn with_confname(mut self, confname: impl Into<String>) -> Self {
        self.confnames.push(confname.into());
        self
    }

    /// Append several config names.
    pub fn with_confnames<I, S>(mut self, confnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.confnames.extend(confnames.into_iter().map(Into::into));
        self
    }

    /// Set the remote location, e.g. `s3://bucket/etc`.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the passphrase used to decrypt every config file.
    pub fn with_passphrase(mut self, passphrase: SecretString) -> Self {
        self.passphrase = Some(passphrase);
        self
    }

    /// Set the install-root path segment (default `etc`).
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Log the source of every config that is found.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Override the filesystem locator (primarily for testing).
    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    /// Use a specific object-store client instead of the HTTP default.
    pub fn with_object_store(mut self, store: Box<dyn ObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    /// Settings for the default HTTP object-store client.
    pub fn with_object_store_config(mut self, config: ObjectStoreConfig) -> Self {
        self.object_store_config = config;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn confnames(&self) -> &[String] {
        &self.confnames
    }

    pub fn location(&self) -> Option<&String> {
        self.location.as_ref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn has_passphrase(&self) -> bool {
        self.passphrase.is_some()
    }

    pub(crate) fn set_location(&mut self, location: Option<String>) {
        self.location = location;
    }

    pub(crate) fn set_passphrase(&mut self, passphrase: Option<SecretString>) {
        self.passphrase = passphrase;
    }

    pub(crate) fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Content providers in the order they are consulted.
    fn providers(&mut self) -> Vec<Box<dyn ContentProvider>> {
        let mut providers: Vec<Box<dyn ContentProvider>> = Vec::with_capacity(2);

        if let Some(location) = self.location.as_deref()
            && is_object_store_location(location)
        {
            let store = match self.object_store.take() {
                Some(store) => Some(store),
                None => match HttpObjectStore::new(self.object_store_config.clone()) {
                    Ok(store) => Some(Box::new(store) as Box<dyn ObjectStore>),
                    Err(e) => {
                        tracing::debug!(error = %e, "Object-store client unavailable; using filesystem only");
                        None
                    }
                },
            };
            if let Some(store) = store {
                providers.push(Box::new(ObjectStoreProvider::new(location, store)));
            }
        }

        providers.push(Box::new(FilesystemProvider::new(self.locator.clone())));
        providers
    }

    /// Load every config name and merge the results.
    ///
    /// Later config names overwrite keys from earlier ones.
    ///
    /// # Errors
    ///
    /// - `ConfigError::Io` when a located file cannot be read.
    /// - `ConfigError::Decryption` when a passphrase is set and a file does not decrypt.
    /// - `ConfigError::InvalidUtf8` when decrypted content is not text.
    /// - `ConfigError::Expression` when a `KEY = value` line holds an invalid literal.
    pub fn load(mut self) -> Result<ConfigMap, ConfigError> {
        let providers = self.providers();
        // An empty passphrase means "not encrypted".
        let passphrase = self
            .passphrase
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty());

        let mut config = ConfigMap::new();
        for confname in &self.confnames {
            let request = FetchRequest {
                confname,
                app_name: &self.app_name,
                prefix: &self.prefix,
                verbose: self.verbose,
            };

            let mut content = None;
            for provider in &providers {
                if let Some(bytes) = provider.fetch(&request)?
                    && !bytes.is_empty()
                {
                    tracing::debug!(confname = %confname, provider = provider.name(), "Fetched config");
                    content = Some(bytes);
                    break;
                }
            }
            let Some(content) = content else {
                continue;
            };

            let plaintext = match passphrase {
                Some(passphrase) => encryption::decrypt(&content, passphrase).map_err(|source| {
                    ConfigError::Decryption {
                        confname: confname.clone(),
                        source,
                    }
                })?,
                None => content,
            };

            let text = String::from_utf8(plaintext).map_err(|_| ConfigError::InvalidUtf8 {
                confname: confname.clone(),
            })?;
            parse_content(confname, &text, &mut config)?;
        }

        Ok(config)
    }
}

/// One-shot form of [`ConfigLoader`].
///
/// `location` may name an object-store bucket (`s3://bucket/prefix`). Other
/// values are ignored and only the filesystem search path is used.
pub fn load_config<S: AsRef<str>>(
    app_name: &str,
    confnames: &[S],
    location: Option<&str>,
    passphrase: Option<SecretString>,
    prefix: &str,
    verbose: bool,
) -> Result<ConfigMap, ConfigError> {
    let mut loader = ConfigLoader::new(app_name)
        .with_confnames(confnames.iter().map(|c| c.as_ref().to_string()))
        .with_prefix(prefix)
        .with_verbose(verbose);
    if let Some(location) = location {
        loader = loader.with_location(location);
    }
    if let Some(passphrase) = passphrase {
        loader = loader.with_passphrase(passphrase);
    }
    loader.load()
}
