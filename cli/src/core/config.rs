use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nhl_api::ClientConfig;
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// File Config Structs (for JSON parsing with optional fields)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ApiFileConfig {
    pub web_url: Option<String>,
    pub core_url: Option<String>,
    pub stats_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EdgeFileConfig {
    pub ws_url: Option<String>,
    pub cookies: Option<BTreeMap<String, String>>,
    pub heartbeat_secs: Option<u64>,
    pub receive_timeout_secs: Option<u64>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api: Option<ApiFileConfig>,
    pub edge: Option<EdgeFileConfig>,
    pub timeout_secs: Option<u64>,
    pub ssl_verify: Option<bool>,
    pub follow_redirects: Option<bool>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if other.timeout_secs.is_some() {
            tracing::trace!(timeout_secs = ?other.timeout_secs, "Merging timeout_secs");
            self.timeout_secs = other.timeout_secs;
        }
        if other.ssl_verify.is_some() {
            tracing::trace!(ssl_verify = ?other.ssl_verify, "Merging ssl_verify");
            self.ssl_verify = other.ssl_verify;
        }
        if other.follow_redirects.is_some() {
            tracing::trace!(follow_redirects = ?other.follow_redirects, "Merging follow_redirects");
            self.follow_redirects = other.follow_redirects;
        }
        if other.debug.is_some() {
            self.debug = other.debug;
        }

        // Api
        if let Some(api) = other.api {
            let current = self.api.get_or_insert_with(ApiFileConfig::default);
            if api.web_url.is_some() {
                tracing::trace!(web_url = ?api.web_url, "Merging api.web_url");
                current.web_url = api.web_url;
            }
            if api.core_url.is_some() {
                tracing::trace!(core_url = ?api.core_url, "Merging api.core_url");
                current.core_url = api.core_url;
            }
            if api.stats_url.is_some() {
                tracing::trace!(stats_url = ?api.stats_url, "Merging api.stats_url");
                current.stats_url = api.stats_url;
            }
        }

        // Edge (cookies merge by name)
        if let Some(edge) = other.edge {
            let current = self.edge.get_or_insert_with(EdgeFileConfig::default);
            if edge.ws_url.is_some() {
                tracing::trace!(ws_url = ?edge.ws_url, "Merging edge.ws_url");
                current.ws_url = edge.ws_url;
            }
            if let Some(cookies) = edge.cookies {
                tracing::trace!(count = cookies.len(), "Merging edge.cookies");
                current
                    .cookies
                    .get_or_insert_with(BTreeMap::new)
                    .extend(cookies);
            }
            if edge.heartbeat_secs.is_some() {
                current.heartbeat_secs = edge.heartbeat_secs;
            }
            if edge.receive_timeout_secs.is_some() {
                current.receive_timeout_secs = edge.receive_timeout_secs;
            }
        }
    }
}

// =============================================================================
// Application Config
// =============================================================================

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Config files that were applied, lowest precedence first
    pub sources: Vec<PathBuf>,
}

impl AppConfig {
    /// Layer defaults, the profile config, the local or `--config` file and
    /// finally CLI/env overrides
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut paths = Vec::new();

        // 1. Profile dir (~/.nhl/nhl.json), skipped if missing
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            paths.push(profile_path);
        }

        // 2. CLI-specified path OR local directory
        if let Some(ref path) = cli.config {
            let expanded = expand_home(path);
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            paths.push(expanded);
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                paths.push(local);
            }
        }

        Self::from_files(cli, paths)
    }

    /// Merge `paths` in order, then apply CLI/env overrides
    pub fn from_files(cli: &CliConfig, paths: Vec<PathBuf>) -> Result<Self> {
        let mut file_config = FileConfig::default();
        for path in &paths {
            let layer = FileConfig::load_from_file(path)?;
            layer.warn_unknown_fields();
            file_config.merge(layer);
        }
        tracing::debug!(configs = ?paths, "Config files loaded");

        let file_api = file_config.api.unwrap_or_default();
        let file_edge = file_config.edge.unwrap_or_default();
        let defaults = ClientConfig::default();

        // CLI/env overrides file config, file config overrides defaults
        let mut client = ClientConfig::new()
            .with_debug(cli.debug || file_config.debug.unwrap_or(false))
            .with_timeout_secs(
                cli.timeout
                    .or(file_config.timeout_secs)
                    .unwrap_or(defaults.timeout_secs),
            )
            .with_ssl_verify(
                cli.ssl_verify
                    .or(file_config.ssl_verify)
                    .unwrap_or(defaults.ssl_verify),
            )
            .with_follow_redirects(
                cli.follow_redirects
                    .or(file_config.follow_redirects)
                    .unwrap_or(defaults.follow_redirects),
            )
            .with_edge_heartbeat_secs(
                file_edge
                    .heartbeat_secs
                    .unwrap_or(defaults.edge_heartbeat_secs),
            )
            .with_edge_receive_timeout_secs(
                file_edge
                    .receive_timeout_secs
                    .unwrap_or(defaults.edge_receive_timeout_secs),
            );

        if let Some(url) = cli.api_web_url.clone().or(file_api.web_url) {
            client = client.with_api_web_url(url);
        }
        if let Some(url) = cli.api_core_url.clone().or(file_api.core_url) {
            client = client.with_api_core_url(url);
        }
        if let Some(url) = cli.api_stats_url.clone().or(file_api.stats_url) {
            client = client.with_api_stats_url(url);
        }
        if let Some(url) = cli.edge_ws_url.clone().or(file_edge.ws_url) {
            client = client.with_edge_ws_url(url);
        }

        for (name, value) in file_edge.cookies.unwrap_or_default() {
            client = client.with_edge_cookie(name, value);
        }
        for (name, value) in &cli.edge_cookies {
            client = client.with_edge_cookie(name.clone(), value.clone());
        }

        tracing::debug!(
            timeout_secs = client.timeout_secs,
            ssl_verify = client.ssl_verify,
            api_web_url = %client.api_web_url,
            api_stats_url = %client.api_stats_url,
            edge_cookies = client.edge_cookies.len(),
            "Configuration loaded"
        );

        Ok(Self {
            client,
            sources: paths,
        })
    }
}

/// Get the profile config file path (~/.nhl/nhl.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, name: &str, json: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "timeout_secs": 30,
            "ssl_verify": false,
            "api": { "web_url": "http://localhost:8080/v1" },
            "edge": { "ws_url": "ws://localhost:9000", "cookies": { "session": "abc" } }
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.ssl_verify, Some(false));
        assert_eq!(
            config.api.as_ref().unwrap().web_url.as_deref(),
            Some("http://localhost:8080/v1")
        );
        let edge = config.edge.as_ref().unwrap();
        assert_eq!(edge.ws_url.as_deref(), Some("ws://localhost:9000"));
        assert_eq!(edge.cookies.as_ref().unwrap()["session"], "abc");
    }

    #[test]
    fn test_file_config_unknown_fields_are_collected() {
        let json = r#"{ "timeout": 5, "timeout_secs": 3 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.timeout_secs, Some(3));
        let extra = config.extra.as_object().unwrap();
        assert!(extra.contains_key("timeout"));
        assert!(!extra.contains_key("timeout_secs"));
    }

    #[test]
    fn test_merge_later_layer_wins() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{
                "timeout_secs": 30,
                "api": { "web_url": "http://a/", "stats_url": "http://stats-a/" },
                "edge": { "cookies": { "a": "1", "b": "2" } }
            }"#,
        )
        .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{
                "api": { "web_url": "http://b/" },
                "edge": { "cookies": { "b": "3" } }
            }"#,
        )
        .unwrap();
        base.merge(overlay);

        assert_eq!(base.timeout_secs, Some(30));
        let api = base.api.as_ref().unwrap();
        assert_eq!(api.web_url.as_deref(), Some("http://b/"));
        assert_eq!(api.stats_url.as_deref(), Some("http://stats-a/"));
        let cookies = base.edge.as_ref().unwrap().cookies.as_ref().unwrap();
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["b"], "3");
    }

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::from_files(&CliConfig::default(), Vec::new()).unwrap();
        assert_eq!(config.client, ClientConfig::default());
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "nhl.json",
            r#"{
                "timeout_secs": 30,
                "follow_redirects": false,
                "api": { "web_url": "http://localhost:8080/v1", "core_url": "http://core" },
                "edge": { "cookies": { "session": "file" }, "receive_timeout_secs": 5 }
            }"#,
        );
        let cli = CliConfig {
            timeout: Some(3),
            api_core_url: Some("http://override/".to_string()),
            edge_cookies: vec![("session".to_string(), "cli".to_string())],
            ..Default::default()
        };

        let config = AppConfig::from_files(&cli, vec![path.clone()]).unwrap();

        assert_eq!(config.sources, vec![path]);
        assert_eq!(config.client.timeout_secs, 3);
        assert!(!config.client.follow_redirects);
        assert!(config.client.ssl_verify);
        assert_eq!(config.client.api_web_url, "http://localhost:8080/v1/");
        assert_eq!(config.client.api_core_url, "http://override/");
        assert_eq!(config.client.edge_receive_timeout_secs, 5);
        assert_eq!(
            config.client.edge_cookie_header().as_deref(),
            Some("session=cli")
        );
    }

    #[test]
    fn test_layers_apply_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let profile = write_config(&dir, "profile.json", r#"{ "timeout_secs": 30, "debug": true }"#);
        let local = write_config(&dir, "local.json", r#"{ "timeout_secs": 15 }"#);

        let config =
            AppConfig::from_files(&CliConfig::default(), vec![profile, local]).unwrap();

        assert_eq!(config.client.timeout_secs, 15);
        assert!(config.client.debug);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "nhl.json", "{ not json");

        let err = AppConfig::from_files(&CliConfig::default(), vec![path]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliConfig {
            config: Some(dir.path().join("missing.json")),
            ..Default::default()
        };

        let err = AppConfig::load(&cli).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/etc/nhl.json");
        assert_eq!(expand_home(plain), PathBuf::from("/etc/nhl.json"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/nhl.json")),
                home.join("nhl.json")
            );
        }
    }
}
