//! Core application

use anyhow::{Context, Result};
use nhl_api::NhlClient;
use nhl_api::advanced::EdgeProfile;
use nhl_api::api::{ReportOptions, TeamSummaryQuery};
use nhl_api::query::{QueryBuilder, QueryContext, SortOrder, parse_filter_items};
use serde_json::Value;

use crate::core::cli::{self, Commands, GameCommands, ReportArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{ENV_LOG, LIBRARY_TARGET};

pub struct CoreApp {
    pub config: AppConfig,
    pub client: NhlClient,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let app = Self::init(config)?;
        let output = app.execute(command).await?;

        let rendered =
            serde_json::to_string_pretty(&output).context("Failed to render output")?;
        println!("{}", rendered);
        Ok(())
    }

    pub fn init(config: AppConfig) -> Result<Self> {
        let client =
            NhlClient::with_config(config.client.clone()).context("Failed to create NHL client")?;
        Ok(Self { config, client })
    }

    /// Initialize logging: NHL_LOG, then RUST_LOG, then the default filter
    fn init_logging(debug: bool) {
        let level = if debug { "debug" } else { "info" };
        let default_filter = format!("info,{}={}", LIBRARY_TARGET, level);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Execute one command and return its JSON output
    pub async fn execute(&self, command: Commands) -> Result<Value> {
        match command {
            Commands::Query { filters, fact } => {
                let context = build_context(&filters, fact)?;
                serde_json::to_value(&context).context("Failed to render query context")
            }
            Commands::SkaterStats(args) => {
                let (context, options) = report_request(&args)?;
                Ok(self
                    .client
                    .stats()
                    .skater_stats_with_query_context(&context, &args.report, &options)
                    .await?)
            }
            Commands::GoalieStats(args) => {
                let (context, options) = report_request(&args)?;
                Ok(self
                    .client
                    .stats()
                    .goalie_stats_with_query_context(&context, &args.report, &options)
                    .await?)
            }
            Commands::TeamSummary {
                start_season,
                end_season,
                franchise,
                game_type,
            } => {
                let query = TeamSummaryQuery {
                    franchise_id: franchise,
                    game_type_id: game_type,
                    ..TeamSummaryQuery::new(start_season, end_season)
                };
                Ok(self.client.stats().team_summary(&query).await?)
            }
            Commands::Schedule { date, team, week } => {
                let schedule = self.client.schedule();
                let date = date.as_deref();
                let payload = match (team.as_deref(), week) {
                    (Some(team), true) => schedule.team_weekly_schedule(team, date).await?,
                    (Some(team), false) => schedule.team_monthly_schedule(team, date).await?,
                    (None, true) => schedule.weekly_schedule(date).await?,
                    (None, false) => {
                        let date = date.context(
                            "A date (YYYY-MM-DD) is required for the daily schedule; \
                             use --week for the current week",
                        )?;
                        schedule.daily_schedule(date).await?
                    }
                };
                Ok(payload)
            }
            Commands::Standings { date, season } => Ok(self
                .client
                .standings()
                .league_standings(date.as_deref(), season.as_deref())
                .await?),
            Commands::Roster { team, season } => {
                Ok(self.client.teams().roster_by_team(&team, &season).await?)
            }
            Commands::Game { command } => {
                let games = self.client.game_center();
                let payload = match command {
                    GameCommands::Boxscore { game_id } => games.boxscore(&game_id).await?,
                    GameCommands::PlayByPlay { game_id } => games.play_by_play(&game_id).await?,
                    GameCommands::Landing { game_id } => games.landing(&game_id).await?,
                };
                Ok(payload)
            }
            Commands::EdgeLive {
                kind,
                id,
                season,
                stage,
                units,
            } => {
                let mut profile = EdgeProfile::new(kind, id);
                if let Some(season) = season {
                    profile = profile.with_season(season);
                }
                if let Some(stage) = stage {
                    profile = profile.with_stage(stage);
                }
                if let Some(units) = units {
                    profile = profile.with_units(units);
                }

                let session = self.client.advanced_stats(profile);
                tracing::info!(url = %session.url(), "Listening to EDGE page");
                let messages = session.run().await?;
                tracing::info!(count = messages.len(), "EDGE session finished");
                Ok(Value::Array(messages))
            }
        }
    }
}

/// Build a query context from a JSON filter array, logging skipped inputs
/// and validation failures
fn build_context(filters: &str, fact: Option<String>) -> Result<QueryContext> {
    let items = parse_filter_items(filters).context("Filters must be a JSON array")?;
    let mut builder = QueryBuilder::verbose();
    if let Some(fact) = fact {
        builder = builder.with_fact_query(fact);
    }
    Ok(builder.build(items))
}

fn report_request(args: &ReportArgs) -> Result<(QueryContext, ReportOptions)> {
    let context = build_context(&args.filters, args.fact.clone())?;
    let sort = args
        .sort
        .as_deref()
        .map(serde_json::from_str::<Vec<SortOrder>>)
        .transpose()
        .context("Sort must be a JSON array of {\"property\", \"direction\"} entries")?;

    let options = ReportOptions {
        sort,
        aggregate: args.aggregate,
        start: args.start,
        limit: args.limit,
    };
    Ok((context, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nhl_api::query::SortDirection;

    fn report_args(filters: &str, sort: Option<&str>) -> ReportArgs {
        ReportArgs {
            report: "summary".to_string(),
            filters: filters.to_string(),
            fact: None,
            sort: sort.map(str::to_string),
            aggregate: true,
            start: 10,
            limit: 5,
        }
    }

    #[test]
    fn test_build_context_from_json() {
        let context = build_context(
            r#"[
                {"type": "game_type", "game_type": 2},
                {"type": "decision", "decision": "W"},
                "not a filter"
            ]"#,
            Some("gamesPlayed>=10".to_string()),
        )
        .unwrap();

        assert_eq!(context.query_str(), "gameTypeId=2 and decision='W'");
        assert_eq!(context.fact_query(), "gamesPlayed>=10");
        assert_eq!(context.filters().len(), 3);
        assert!(context.is_valid());
    }

    #[test]
    fn test_build_context_rejects_non_array() {
        assert!(build_context(r#"{"type": "game_type"}"#, None).is_err());
    }

    #[test]
    fn test_report_request_sort_and_paging() {
        let (context, options) = report_request(&report_args(
            "[]",
            Some(r#"[{"property": "wins", "direction": "DESC"}]"#),
        ))
        .unwrap();

        assert_eq!(context.query_str(), "");
        assert_eq!(
            options.sort,
            Some(vec![SortOrder::new("wins", SortDirection::Desc)])
        );
        assert!(options.aggregate);
        assert_eq!(options.start, 10);
        assert_eq!(options.limit, 5);
    }

    #[test]
    fn test_report_request_bad_sort() {
        let err = report_request(&report_args("[]", Some("wins"))).unwrap_err();
        assert!(err.to_string().starts_with("Sort must be a JSON array"));
    }

    #[tokio::test]
    async fn test_query_command_needs_no_network() {
        let app = CoreApp::init(AppConfig::from_files(&Default::default(), Vec::new()).unwrap())
            .unwrap();
        let output = app
            .execute(Commands::Query {
                filters: r#"[{"type": "home_road", "home_road": "H"}]"#.to_string(),
                fact: None,
            })
            .await
            .unwrap();

        assert_eq!(output["query_str"], "homeRoad='H'");
        assert_eq!(output["errors"], serde_json::json!([]));
    }
}
