//! Player and team statistics
//!
//! The report calls on the stats REST API share one parameter set:
//! `isAggregate`, `isGame`, `limit`, `start`, `factCayenneExp`, `sort` and
//! `cayenneExp`. Query-context calls take the expression from a built
//! [`QueryContext`] and send it even when some filters were rejected.

use serde_json::Value;

use super::take_field;
use crate::constants::{
    DEFAULT_REPORT_LIMIT, DEFAULT_SKATER_SUMMARY_LIMIT, DEFAULT_TEAM_SUMMARY_LIMIT,
    TEAM_SUMMARY_FACT_QUERY,
};
use crate::error::Result;
use crate::http::{Endpoint, HttpClient, QueryParams};
use crate::query::{
    DEFAULT_FACT_QUERY, QueryContext, SKATER_SUMMARY_SORTING, SortOrder, TEAM_SUMMARY_SORTING,
    default_goalie_sorting, default_skater_sorting, encode_sort,
};

/// Regular season
const DEFAULT_GAME_TYPE: u8 = 2;

/// Paging and ordering of a query-context report call
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Explicit ordering; the report's default ordering when None
    pub sort: Option<Vec<SortOrder>>,
    /// Aggregate over the whole season range instead of per season
    pub aggregate: bool,
    pub start: i64,
    pub limit: i64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            sort: None,
            aggregate: false,
            start: 0,
            limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummaryQuery {
    pub start_season: String,
    pub end_season: String,
    pub game_type_id: u8,
    pub franchise_id: Option<String>,
    pub is_aggregate: bool,
    pub is_game: bool,
    pub sort: Option<Vec<SortOrder>>,
    pub start: i64,
    pub limit: i64,
    pub fact_query: String,
}

impl TeamSummaryQuery {
    pub fn new(start_season: impl Into<String>, end_season: impl Into<String>) -> Self {
        Self {
            start_season: start_season.into(),
            end_season: end_season.into(),
            game_type_id: DEFAULT_GAME_TYPE,
            franchise_id: None,
            is_aggregate: false,
            is_game: false,
            sort: None,
            start: 0,
            limit: DEFAULT_TEAM_SUMMARY_LIMIT,
            fact_query: TEAM_SUMMARY_FACT_QUERY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkaterSummaryQuery {
    pub start_season: String,
    pub end_season: String,
    pub game_type_id: u8,
    pub franchise_id: Option<String>,
    pub aggregate: bool,
    pub start: i64,
    pub limit: i64,
}

impl SkaterSummaryQuery {
    pub fn new(start_season: impl Into<String>, end_season: impl Into<String>) -> Self {
        Self {
            start_season: start_season.into(),
            end_season: end_season.into(),
            game_type_id: DEFAULT_GAME_TYPE,
            franchise_id: None,
            aggregate: false,
            start: 0,
            limit: DEFAULT_SKATER_SUMMARY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalieSummaryQuery {
    pub start_season: String,
    pub end_season: String,
    /// Goalie report name, `summary` by default
    pub report: String,
    pub game_type_id: u8,
    pub franchise_id: Option<String>,
    pub aggregate: bool,
    pub sort: Option<Vec<SortOrder>>,
    pub start: i64,
    pub limit: i64,
}

impl GoalieSummaryQuery {
    pub fn new(start_season: impl Into<String>, end_season: impl Into<String>) -> Self {
        Self {
            start_season: start_season.into(),
            end_season: end_season.into(),
            report: "summary".to_string(),
            game_type_id: DEFAULT_GAME_TYPE,
            franchise_id: None,
            aggregate: false,
            sort: None,
            start: 0,
            limit: DEFAULT_REPORT_LIMIT,
        }
    }
}

/// `[franchiseId={id} and ]gameTypeId={g} and seasonId<={end} and seasonId>={start}`
fn season_expression(
    franchise_id: Option<&str>,
    game_type_id: u8,
    start_season: &str,
    end_season: &str,
) -> String {
    let mut expr = String::new();
    if let Some(id) = franchise_id {
        expr.push_str(&format!("franchiseId={} and ", id));
    }
    expr.push_str(&format!(
        "gameTypeId={} and seasonId<={} and seasonId>={}",
        game_type_id, end_season, start_season
    ));
    expr
}

/// Common report parameters in the order the stats site sends them
fn report_params(
    aggregate: bool,
    is_game: bool,
    start: i64,
    limit: i64,
    fact_query: &str,
    sort: &[SortOrder],
    cayenne: &str,
) -> QueryParams {
    vec![
        ("isAggregate", aggregate.to_string()),
        ("isGame", is_game.to_string()),
        ("limit", limit.to_string()),
        ("start", start.to_string()),
        ("factCayenneExp", fact_query.to_string()),
        ("sort", encode_sort(sort)),
        ("cayenneExp", cayenne.to_string()),
    ]
}

fn context_params(context: &QueryContext, sort: &[SortOrder], options: &ReportOptions) -> QueryParams {
    if !context.is_valid() {
        tracing::warn!(
            errors = ?context.errors(),
            "Query context has rejected filters, sending partial expression"
        );
    }
    report_params(
        options.aggregate,
        false,
        options.start,
        options.limit,
        context.fact_query(),
        sort,
        context.query_str(),
    )
}

pub struct Stats<'a> {
    http: &'a HttpClient,
}

impl<'a> Stats<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Game types played in every season of a team's existence
    pub async fn gametypes_per_season_directory_by_team(&self, team_abbr: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("club-stats-season/{}", team_abbr),
                &[],
            )
            .await
    }

    /// Career totals plus player information
    pub async fn player_career_stats(&self, player_id: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("player/{}/landing", player_id),
                &[],
            )
            .await
    }

    /// Game-by-game line of a player for a season and game type
    pub async fn player_game_log(
        &self,
        player_id: &str,
        season: &str,
        game_type: u8,
    ) -> Result<Value> {
        let resource = format!("player/{}/game-log/{}/{}", player_id, season, game_type);
        let response = self.http.get(Endpoint::ApiWebV1, &resource, &[]).await?;
        take_field(response, "gameLog")
    }

    /// Team summary report rows
    pub async fn team_summary(&self, query: &TeamSummaryQuery) -> Result<Value> {
        let cayenne = season_expression(
            query.franchise_id.as_deref(),
            query.game_type_id,
            &query.start_season,
            &query.end_season,
        );
        let sort = query.sort.as_deref().unwrap_or(TEAM_SUMMARY_SORTING);
        let params = report_params(
            query.is_aggregate,
            query.is_game,
            query.start,
            query.limit,
            &query.fact_query,
            sort,
            &cayenne,
        );
        let response = self
            .http
            .get(Endpoint::ApiStats, "en/team/summary", &params)
            .await?;
        take_field(response, "data")
    }

    /// Skater summary report rows
    pub async fn skater_stats_summary(&self, query: &SkaterSummaryQuery) -> Result<Value> {
        let cayenne = season_expression(
            query.franchise_id.as_deref(),
            query.game_type_id,
            &query.start_season,
            &query.end_season,
        );
        let params = report_params(
            query.aggregate,
            false,
            query.start,
            query.limit,
            DEFAULT_FACT_QUERY,
            SKATER_SUMMARY_SORTING,
            &cayenne,
        );
        let response = self
            .http
            .get(Endpoint::ApiStats, "en/skater/summary", &params)
            .await?;
        take_field(response, "data")
    }

    /// Any skater report filtered by a built query
    ///
    /// Returns the whole page, `data` and `total`.
    pub async fn skater_stats_with_query_context(
        &self,
        context: &QueryContext,
        report: &str,
        options: &ReportOptions,
    ) -> Result<Value> {
        let sort = options
            .sort
            .as_deref()
            .unwrap_or_else(|| default_skater_sorting(report));
        let params = context_params(context, sort, options);
        tracing::debug!(report, query = %context.query_str(), "Skater report");
        self.http
            .get(Endpoint::ApiStats, &format!("en/skater/{}", report), &params)
            .await
    }

    /// Goalie report rows for a season range
    pub async fn goalie_stats_summary(&self, query: &GoalieSummaryQuery) -> Result<Value> {
        let cayenne = season_expression(
            query.franchise_id.as_deref(),
            query.game_type_id,
            &query.start_season,
            &query.end_season,
        );
        let sort = query
            .sort
            .as_deref()
            .unwrap_or_else(|| default_goalie_sorting(&query.report));
        let params = report_params(
            query.aggregate,
            false,
            query.start,
            query.limit,
            DEFAULT_FACT_QUERY,
            sort,
            &cayenne,
        );
        let response = self
            .http
            .get(
                Endpoint::ApiStats,
                &format!("en/goalie/{}", query.report),
                &params,
            )
            .await?;
        take_field(response, "data")
    }

    /// Any goalie report filtered by a built query
    pub async fn goalie_stats_with_query_context(
        &self,
        context: &QueryContext,
        report: &str,
        options: &ReportOptions,
    ) -> Result<Value> {
        let sort = options
            .sort
            .as_deref()
            .unwrap_or_else(|| default_goalie_sorting(report));
        let params = context_params(context, sort, options);
        tracing::debug!(report, query = %context.query_str(), "Goalie report");
        self.http
            .get(Endpoint::ApiStats, &format!("en/goalie/{}", report), &params)
            .await
    }
}
