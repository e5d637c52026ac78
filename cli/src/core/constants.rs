// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "nhl";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".nhl";

/// Tracing target of the client library
pub const LIBRARY_TARGET: &str = "nhl_api";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "nhl.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "NHL_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for the log filter (takes precedence over RUST_LOG)
pub const ENV_LOG: &str = "NHL_LOG";

// =============================================================================
// Environment Variables - Client
// =============================================================================

pub use nhl_api::constants::{
    ENV_API_CORE_URL, ENV_API_STATS_URL, ENV_API_WEB_URL, ENV_DEBUG, ENV_EDGE_WS_URL,
    ENV_FOLLOW_REDIRECTS, ENV_SSL_VERIFY, ENV_TIMEOUT_SECS,
};

/// Environment variable for EDGE cookies (`name=value; name=value`)
pub const ENV_EDGE_COOKIES: &str = "NHL_EDGE_COOKIES";
