use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use nhl_api::advanced::ProfileKind;

use super::constants::{
    ENV_API_CORE_URL, ENV_API_STATS_URL, ENV_API_WEB_URL, ENV_CONFIG, ENV_DEBUG,
    ENV_EDGE_COOKIES, ENV_EDGE_WS_URL, ENV_FOLLOW_REDIRECTS, ENV_SSL_VERIFY, ENV_TIMEOUT_SECS,
};

#[derive(Parser)]
#[command(name = "nhl")]
#[command(version, about = "NHL stats from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log every request and response status
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT_SECS)]
    pub timeout: Option<u64>,

    /// Verify TLS certificates of the REST endpoints
    #[arg(long, global = true, env = ENV_SSL_VERIFY)]
    pub ssl_verify: Option<bool>,

    /// Follow HTTP redirects
    #[arg(long, global = true, env = ENV_FOLLOW_REDIRECTS)]
    pub follow_redirects: Option<bool>,

    /// Base URL of the web API
    #[arg(long, global = true, env = ENV_API_WEB_URL)]
    pub api_web_url: Option<String>,

    /// Base URL of the core API
    #[arg(long, global = true, env = ENV_API_CORE_URL)]
    pub api_core_url: Option<String>,

    /// Base URL of the stats REST API
    #[arg(long, global = true, env = ENV_API_STATS_URL)]
    pub api_stats_url: Option<String>,

    /// Base URL of the EDGE WebSocket
    #[arg(long, global = true, env = ENV_EDGE_WS_URL)]
    pub edge_ws_url: Option<String>,

    /// Cookie for the EDGE WebSocket as name=value (repeatable)
    #[arg(
        long = "edge-cookie",
        global = true,
        env = ENV_EDGE_COOKIES,
        value_delimiter = ';',
        value_parser = parse_cookie
    )]
    pub edge_cookies: Vec<(String, String)>,
}

/// Parse a `name=value` cookie pair
fn parse_cookie(s: &str) -> Result<(String, String), String> {
    match s.trim().split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid cookie '{}'. Expected name=value", s)),
    }
}

/// Parse an EDGE profile type from CLI string
fn parse_profile_kind(s: &str) -> Result<ProfileKind, String> {
    s.parse().map_err(|e: nhl_api::NhlApiError| e.to_string())
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Build a stats query from JSON filters and print the resulting context
    Query {
        /// JSON array of filters, e.g. '[{"type":"game_type","game_type":"2"}]'
        #[arg(long, short = 'f', default_value = "[]")]
        filters: String,

        /// Base predicate applied before the filters
        #[arg(long)]
        fact: Option<String>,
    },
    /// Skater report filtered by JSON filters
    SkaterStats(ReportArgs),
    /// Goalie report filtered by JSON filters
    GoalieStats(ReportArgs),
    /// Team summary over a season range
    TeamSummary {
        /// First season, e.g. 20202021
        start_season: String,

        /// Last season, e.g. 20232024
        end_season: String,

        #[arg(long)]
        franchise: Option<String>,

        /// 2 for regular season, 3 for playoffs
        #[arg(long, default_value_t = 2)]
        game_type: u8,
    },
    /// Daily or weekly league schedule, or a team's schedule
    Schedule {
        /// Date as YYYY-MM-DD (month as YYYY-MM with --team)
        date: Option<String>,

        /// Team abbreviation, e.g. TOR
        #[arg(long)]
        team: Option<String>,

        /// Whole week instead of a single day (or a month for teams)
        #[arg(long)]
        week: bool,
    },
    /// League standings for a date or the end of a season
    Standings {
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        season: Option<String>,
    },
    /// Team roster for a season
    Roster {
        /// Team abbreviation, e.g. TOR
        team: String,

        /// Season, e.g. 20232024
        season: String,
    },
    /// Game center data
    Game {
        #[command(subcommand)]
        command: GameCommands,
    },
    /// Listen to an EDGE advanced stats page over WebSocket
    EdgeLive {
        /// Profile type (skater, goalie or team)
        #[arg(value_parser = parse_profile_kind)]
        kind: ProfileKind,

        /// Player or team id
        id: String,

        #[arg(long)]
        season: Option<String>,

        /// regular or playoffs
        #[arg(long)]
        stage: Option<String>,

        /// imperial or metric
        #[arg(long)]
        units: Option<String>,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Report name, e.g. summary, realtime, advanced
    #[arg(default_value = "summary")]
    pub report: String,

    /// JSON array of filters
    #[arg(long, short = 'f', default_value = "[]")]
    pub filters: String,

    /// Base predicate applied before the filters
    #[arg(long)]
    pub fact: Option<String>,

    /// JSON array of {"property", "direction"} entries; the report's default when omitted
    #[arg(long)]
    pub sort: Option<String>,

    /// Aggregate across the season range
    #[arg(long)]
    pub aggregate: bool,

    #[arg(long, default_value_t = 0)]
    pub start: i64,

    #[arg(long, default_value_t = 70)]
    pub limit: i64,
}

#[derive(Subcommand, Clone, Debug)]
pub enum GameCommands {
    /// Boxscore of a game
    Boxscore { game_id: String },
    /// Every play of a game
    PlayByPlay { game_id: String },
    /// Landing page summary of a game
    Landing { game_id: String },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub ssl_verify: Option<bool>,
    pub follow_redirects: Option<bool>,
    pub api_web_url: Option<String>,
    pub api_core_url: Option<String>,
    pub api_stats_url: Option<String>,
    pub edge_ws_url: Option<String>,
    pub edge_cookies: Vec<(String, String)>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    split(Cli::parse())
}

fn split(cli: Cli) -> (CliConfig, Commands) {
    let config = CliConfig {
        debug: cli.debug,
        config: cli.config,
        timeout: cli.timeout,
        ssl_verify: cli.ssl_verify,
        follow_redirects: cli.follow_redirects,
        api_web_url: cli.api_web_url,
        api_core_url: cli.api_core_url,
        api_stats_url: cli.api_stats_url,
        edge_ws_url: cli.edge_ws_url,
        edge_cookies: cli.edge_cookies,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_args(args: &[&str]) -> (CliConfig, Commands) {
        split(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let (config, command) = parse_args(&[
            "nhl",
            "roster",
            "TOR",
            "20232024",
            "--timeout",
            "5",
            "--edge-cookie",
            "session=abc",
        ]);
        assert_eq!(config.timeout, Some(5));
        assert_eq!(
            config.edge_cookies,
            vec![("session".to_string(), "abc".to_string())]
        );
        assert!(matches!(command, Commands::Roster { ref team, .. } if team == "TOR"));
    }

    #[test]
    fn test_report_args_defaults() {
        let (_, command) = parse_args(&["nhl", "goalie-stats"]);
        let Commands::GoalieStats(args) = command else {
            panic!("expected goalie-stats");
        };
        assert_eq!(args.report, "summary");
        assert_eq!(args.filters, "[]");
        assert_eq!(args.limit, 70);
        assert!(args.sort.is_none());
    }

    #[test]
    fn test_edge_live_kind() {
        let (_, command) = parse_args(&["nhl", "edge-live", "Goalie", "8479361"]);
        assert!(matches!(
            command,
            Commands::EdgeLive {
                kind: ProfileKind::Goalie,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["nhl", "edge-live", "coach", "1"]).is_err());
    }

    #[test]
    fn test_parse_cookie() {
        assert_eq!(
            parse_cookie(" a = b=c "),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_cookie("novalue").is_err());
        assert!(parse_cookie("=x").is_err());
    }
}
