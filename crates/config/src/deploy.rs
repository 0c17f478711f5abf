//! Deployment target settings resolved from an applied namespace.
//!
//! Every setting may be given explicitly under a `DEPLOYUTILS_*` key; when it
//! is not, a default is derived from the first entry of `ALLOWED_HOSTS`.

use serde::Serialize;
use thiserror::Error;

use crate::constants::ALLOWED_HOSTS_KEY;
use crate::literal::Value;
use crate::settings::Namespace;

const DRY_RUN_KEY: &str = "DEPLOYUTILS_DRY_RUN";
const WEBAPP_ROOT_KEY: &str = "DEPLOYUTILS_DEPLOYED_WEBAPP_ROOT";
const SERVERS_KEY: &str = "DEPLOYUTILS_DEPLOYED_SERVERS";
const RESOURCES_SERVER_KEY: &str = "DEPLOYUTILS_RESOURCES_SERVER";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeployError {
    #[error("ALLOWED_HOSTS is missing or empty; cannot derive deployment defaults")]
    MissingAllowedHosts,

    #[error("{key} must be {expected}")]
    InvalidType { key: String, expected: &'static str },
}

/// Where and how the application is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploySettings {
    pub dry_run: bool,
    pub deployed_webapp_root: String,
    pub deployed_servers: Vec<String>,
    pub resources_machine: String,
}

fn invalid(key: &str, expected: &'static str) -> DeployError {
    DeployError::InvalidType {
        key: key.to_string(),
        expected,
    }
}

fn string_setting<N: Namespace + ?Sized>(
    namespace: &N,
    key: &str,
) -> Result<Option<String>, DeployError> {
    match namespace.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid(key, "a string")),
    }
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>, DeployError> {
    value
        .as_sequence()
        .ok_or_else(|| invalid(key, "a sequence of strings"))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(key, "a sequence of strings"))
        })
        .collect()
}

impl DeploySettings {
    /// Resolves deploy settings from `namespace`.
    ///
    /// `ALLOWED_HOSTS` is only consulted when a setting falls back to its default.
    pub fn from_namespace<N: Namespace + ?Sized>(namespace: &N) -> Result<Self, DeployError> {
        let first_host = || -> Result<String, DeployError> {
            let hosts = match namespace.get(ALLOWED_HOSTS_KEY) {
                Some(value) => string_list(ALLOWED_HOSTS_KEY, value)?,
                None => Vec::new(),
            };
            hosts
                .into_iter()
                .next()
                .ok_or(DeployError::MissingAllowedHosts)
        };

        let dry_run = match namespace.get(DRY_RUN_KEY) {
            None => false,
            Some(value) => value.as_bool().ok_or_else(|| invalid(DRY_RUN_KEY, "a bool"))?,
        };

        let deployed_webapp_root = match string_setting(namespace, WEBAPP_ROOT_KEY)? {
            Some(root) => root,
            None => format!("/var/www/{}", first_host()?),
        };

        let deployed_servers = match namespace.get(SERVERS_KEY) {
            Some(value) => string_list(SERVERS_KEY, value)?,
            None => vec![first_host()?],
        };

        let resources_machine = match string_setting(namespace, RESOURCES_SERVER_KEY)? {
            Some(machine) => machine,
            None => format!("git@{}", first_host()?),
        };

        Ok(Self {
            dry_run,
            deployed_webapp_root,
            deployed_servers,
            resources_machine,
        })
    }
}
