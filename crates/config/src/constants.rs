//! Centralized constants for the deployconf workspace.
//!
//! This module contains default values and well-known names used across
//! crates to avoid duplicating string literals.

// =============================================================================
// Search Path Defaults
// =============================================================================

/// Default installation-root path segment for config files.
pub const DEFAULT_PREFIX: &str = "etc";

/// Suffix appended to the upper-cased app name to form the config dir variable.
pub const CONFIG_DIR_ENV_SUFFIX: &str = "_CONFIG_DIR";

/// Suffix appended to the upper-cased app name to form the location variable.
pub const CONFIG_LOCATION_ENV_SUFFIX: &str = "_CONFIG_LOCATION";

/// Suffix appended to the upper-cased app name to form the passphrase variable.
pub const CONFIG_PASSPHRASE_ENV_SUFFIX: &str = "_CONFIG_PASSPHRASE";

/// Suffix appended to the upper-cased app name to form the verbose-lookup variable.
pub const CONFIG_VERBOSE_ENV_SUFFIX: &str = "_CONFIG_VERBOSE";

/// URI scheme marking an object-store location.
pub const OBJECT_STORE_SCHEME: &str = "s3";

// =============================================================================
// Object Store Client
// =============================================================================

/// Default endpoint for path-style object-store requests.
pub const DEFAULT_OBJECT_STORE_ENDPOINT: &str = "https://s3.amazonaws.com";

/// Default connect timeout for object-store requests in seconds.
pub const DEFAULT_OBJECT_STORE_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default overall request timeout for object-store requests in seconds.
pub const DEFAULT_OBJECT_STORE_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Settings Namespace
// =============================================================================

/// Placeholder substituted with `<BASE_DIR>/var` when settings are applied.
pub const LOCALSTATEDIR_MARKER: &str = "LOCALSTATEDIR";

/// Namespace attribute holding the application base directory.
pub const BASE_DIR_KEY: &str = "BASE_DIR";

/// Namespace attribute holding the log file path.
pub const LOG_FILE_KEY: &str = "LOG_FILE";

/// Namespace attribute listing the hosts the application answers for.
pub const ALLOWED_HOSTS_KEY: &str = "ALLOWED_HOSTS";
