// =============================================================================
// Endpoints
// =============================================================================

/// Base URL of the public web API (schedules, rosters, game center)
pub const DEFAULT_API_WEB_URL: &str = "https://api-web.nhle.com/v1/";

/// Base URL of the core API
pub const DEFAULT_API_CORE_URL: &str = "https://api.nhle.com/";

/// Base URL of the stats REST API (reports, franchises, glossary)
pub const DEFAULT_API_STATS_URL: &str = "https://api.nhle.com/stats/rest/";

/// Base URL of the EDGE advanced stats WebSocket feed
pub const DEFAULT_EDGE_WS_URL: &str = "wss://edge.nhl.com";

/// Origin the EDGE feed expects on the upgrade request
pub const EDGE_ORIGIN: &str = "https://edge.nhl.com";

/// Domain reported in EDGE action messages
pub const EDGE_DOMAIN: &str = "edge.nhl.com";

// =============================================================================
// HTTP Defaults
// =============================================================================

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User agent for REST requests
pub const USER_AGENT: &str = concat!("nhl-api/", env!("CARGO_PKG_VERSION"));

/// Desktop browser user agent; the EDGE feed rejects anything else
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "NHL_TIMEOUT_SECS";

/// Environment variable for TLS certificate verification
pub const ENV_SSL_VERIFY: &str = "NHL_SSL_VERIFY";

/// Environment variable for redirect following
pub const ENV_FOLLOW_REDIRECTS: &str = "NHL_FOLLOW_REDIRECTS";

/// Environment variable for debug logging of requests
pub const ENV_DEBUG: &str = "NHL_DEBUG";

/// Environment variable overriding the web API base URL
pub const ENV_API_WEB_URL: &str = "NHL_API_WEB_URL";

/// Environment variable overriding the core API base URL
pub const ENV_API_CORE_URL: &str = "NHL_API_CORE_URL";

/// Environment variable overriding the stats API base URL
pub const ENV_API_STATS_URL: &str = "NHL_API_STATS_URL";

/// Environment variable overriding the EDGE WebSocket base URL
pub const ENV_EDGE_WS_URL: &str = "NHL_EDGE_WS_URL";

// =============================================================================
// Stats Query Defaults
// =============================================================================

/// Page size for query-context report calls
pub const DEFAULT_REPORT_LIMIT: i64 = 70;

/// Page size for the skater summary
pub const DEFAULT_SKATER_SUMMARY_LIMIT: i64 = 25;

/// Page size for the team summary
pub const DEFAULT_TEAM_SUMMARY_LIMIT: i64 = 50;

/// Fact predicate for the team summary
pub const TEAM_SUMMARY_FACT_QUERY: &str = "gamesPlayed>1";

// =============================================================================
// Advanced Stats Session
// =============================================================================

/// Seconds between WebSocket pings
pub const DEFAULT_HEARTBEAT_SECS: u64 = 15;

/// Seconds to wait for the next frame before ending a session
pub const DEFAULT_RECEIVE_TIMEOUT_SECS: u64 = 20;

/// Season used when a profile does not name one
pub const DEFAULT_SEASON: &str = "20242025";

/// Stage used when a profile does not name one
pub const DEFAULT_STAGE: &str = "regular";

/// Measurement units used when a profile does not name them
pub const DEFAULT_UNITS: &str = "imperial";
