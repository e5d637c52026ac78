//! NHL EDGE tracking reports over REST
//!
//! Every report is addressed as `edge/{report}/{id}/now` for the current
//! season or `edge/{report}/{id}/{season}/{game_type}` for a given one.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{NhlApiError, Result};
use crate::http::{Endpoint, HttpClient};

/// Regular season
const DEFAULT_GAME_TYPE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSubject {
    Skater,
    Goalie,
    Team,
}

impl EdgeSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeSubject::Skater => "skater",
            EdgeSubject::Goalie => "goalie",
            EdgeSubject::Team => "team",
        }
    }
}

impl fmt::Display for EdgeSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeSubject {
    type Err = NhlApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "skater" => Ok(EdgeSubject::Skater),
            "goalie" => Ok(EdgeSubject::Goalie),
            "team" => Ok(EdgeSubject::Team),
            other => Err(NhlApiError::invalid_argument(format!(
                "Unknown EDGE subject '{}', expected skater, goalie or team",
                other
            ))),
        }
    }
}

/// Per-player and per-team EDGE detail reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeReport {
    SkaterDetail,
    SkaterShotSpeedDetail,
    SkaterSkatingSpeedDetail,
    SkaterShotLocationDetail,
    SkaterSkatingDistanceDetail,
    SkaterComparison,
    SkaterZoneTime,
    GoalieDetail,
    GoalieShotLocationDetail,
    Goalie5v5Detail,
    GoalieComparison,
    GoalieSavePercentageDetail,
    TeamDetail,
    TeamSkatingDistanceDetail,
    TeamZoneTimeDetails,
    TeamShotLocationDetail,
    TeamShotSpeedDetail,
    TeamSkatingSpeedDetail,
}

impl EdgeReport {
    pub const ALL: &'static [EdgeReport] = &[
        EdgeReport::SkaterDetail,
        EdgeReport::SkaterShotSpeedDetail,
        EdgeReport::SkaterSkatingSpeedDetail,
        EdgeReport::SkaterShotLocationDetail,
        EdgeReport::SkaterSkatingDistanceDetail,
        EdgeReport::SkaterComparison,
        EdgeReport::SkaterZoneTime,
        EdgeReport::GoalieDetail,
        EdgeReport::GoalieShotLocationDetail,
        EdgeReport::Goalie5v5Detail,
        EdgeReport::GoalieComparison,
        EdgeReport::GoalieSavePercentageDetail,
        EdgeReport::TeamDetail,
        EdgeReport::TeamSkatingDistanceDetail,
        EdgeReport::TeamZoneTimeDetails,
        EdgeReport::TeamShotLocationDetail,
        EdgeReport::TeamShotSpeedDetail,
        EdgeReport::TeamSkatingSpeedDetail,
    ];

    /// Path segment of the report
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeReport::SkaterDetail => "skater-detail",
            EdgeReport::SkaterShotSpeedDetail => "skater-shot-speed-detail",
            EdgeReport::SkaterSkatingSpeedDetail => "skater-skating-speed-detail",
            EdgeReport::SkaterShotLocationDetail => "skater-shot-location-detail",
            EdgeReport::SkaterSkatingDistanceDetail => "skater-skating-distance-detail",
            EdgeReport::SkaterComparison => "skater-comparison",
            EdgeReport::SkaterZoneTime => "skater-zone-time",
            EdgeReport::GoalieDetail => "goalie-detail",
            EdgeReport::GoalieShotLocationDetail => "goalie-shot-location-detail",
            EdgeReport::Goalie5v5Detail => "goalie-5v5-detail",
            EdgeReport::GoalieComparison => "goalie-comparison",
            EdgeReport::GoalieSavePercentageDetail => "goalie-save-percentage-detail",
            EdgeReport::TeamDetail => "team-detail",
            EdgeReport::TeamSkatingDistanceDetail => "team-skating-distance-detail",
            EdgeReport::TeamZoneTimeDetails => "team-zone-time-details",
            EdgeReport::TeamShotLocationDetail => "team-shot-location-detail",
            EdgeReport::TeamShotSpeedDetail => "team-shot-speed-detail",
            EdgeReport::TeamSkatingSpeedDetail => "team-skating-speed-detail",
        }
    }

    pub fn subject(&self) -> EdgeSubject {
        match self {
            EdgeReport::SkaterDetail
            | EdgeReport::SkaterShotSpeedDetail
            | EdgeReport::SkaterSkatingSpeedDetail
            | EdgeReport::SkaterShotLocationDetail
            | EdgeReport::SkaterSkatingDistanceDetail
            | EdgeReport::SkaterComparison
            | EdgeReport::SkaterZoneTime => EdgeSubject::Skater,
            EdgeReport::GoalieDetail
            | EdgeReport::GoalieShotLocationDetail
            | EdgeReport::Goalie5v5Detail
            | EdgeReport::GoalieComparison
            | EdgeReport::GoalieSavePercentageDetail => EdgeSubject::Goalie,
            _ => EdgeSubject::Team,
        }
    }
}

impl fmt::Display for EdgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeReport {
    type Err = NhlApiError;

    fn from_str(s: &str) -> Result<Self> {
        EdgeReport::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| NhlApiError::invalid_argument(format!("Unknown EDGE report '{}'", s)))
    }
}

/// `{prefix}/{id}/now` or `{prefix}/{id}/{season}/{game_type}`
fn season_path(prefix: &str, season: Option<&str>, game_type: Option<u8>) -> String {
    match season {
        Some(season) => format!(
            "{}/{}/{}",
            prefix,
            season,
            game_type.unwrap_or(DEFAULT_GAME_TYPE)
        ),
        None => format!("{}/now", prefix),
    }
}

pub struct Edge<'a> {
    http: &'a HttpClient,
}

impl<'a> Edge<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// A detail report for a player or team id
    ///
    /// `game_type` only applies with a `season` and defaults to the regular
    /// season.
    pub async fn report(
        &self,
        report: EdgeReport,
        id: &str,
        season: Option<&str>,
        game_type: Option<u8>,
    ) -> Result<Value> {
        let resource = season_path(&format!("edge/{}/{}", report, id), season, game_type);
        self.http.get(Endpoint::ApiWebV1, &resource, &[]).await
    }

    /// League-wide overview for skaters, goalies or teams
    pub async fn landing(
        &self,
        subject: EdgeSubject,
        season: Option<&str>,
        game_type: Option<u8>,
    ) -> Result<Value> {
        let resource = season_path(&format!("edge/{}-landing", subject), season, game_type);
        self.http.get(Endpoint::ApiWebV1, &resource, &[]).await
    }

    /// Catch-all tracking detail for a skater or goalie
    pub async fn cat_detail(
        &self,
        subject: EdgeSubject,
        player_id: &str,
        season: Option<&str>,
        game_type: Option<u8>,
    ) -> Result<Value> {
        if subject == EdgeSubject::Team {
            return Err(NhlApiError::invalid_argument(
                "CAT detail is only available for skaters and goalies",
            ));
        }
        let resource = season_path(
            &format!("cat/edge/{}-detail/{}", subject, player_id),
            season,
            game_type,
        );
        self.http.get(Endpoint::ApiWebV1, &resource, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_and_season_paths() {
        assert_eq!(
            season_path("edge/skater-detail/8478402", None, None),
            "edge/skater-detail/8478402/now"
        );
        assert_eq!(
            season_path("edge/skater-detail/8478402", Some("20232024"), None),
            "edge/skater-detail/8478402/20232024/2"
        );
        assert_eq!(
            season_path("edge/team-landing", Some("20232024"), Some(3)),
            "edge/team-landing/20232024/3"
        );
    }

    #[test]
    fn game_type_is_ignored_without_season() {
        assert_eq!(
            season_path("edge/goalie-landing", None, Some(3)),
            "edge/goalie-landing/now"
        );
    }

    #[test]
    fn report_names_round_trip() {
        for report in EdgeReport::ALL {
            assert_eq!(report.as_str().parse::<EdgeReport>().unwrap(), *report);
            assert!(report.as_str().starts_with(report.subject().as_str()));
        }
        assert!("skater-everything".parse::<EdgeReport>().is_err());
    }

    #[test]
    fn subjects_parse_case_insensitively() {
        assert_eq!("Goalie".parse::<EdgeSubject>().unwrap(), EdgeSubject::Goalie);
        assert!("coach".parse::<EdgeSubject>().is_err());
    }
}
