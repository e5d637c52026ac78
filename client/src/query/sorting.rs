//! Default sort orders per report type
//!
//! The stats API needs an explicit `sort` parameter; these tables supply the
//! ordering the NHL site itself uses for each report when the caller gives
//! none.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use SortDirection::{Asc, AscCi, Desc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
    /// Case-insensitive ascending
    #[serde(rename = "ASC_CI")]
    AscCi,
}

/// One `{property, direction}` tie-break entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub property: Cow<'static, str>,
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn new(property: &'static str, direction: SortDirection) -> Self {
        Self {
            property: Cow::Borrowed(property),
            direction,
        }
    }

    pub fn owned(property: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            property: Cow::Owned(property.into()),
            direction,
        }
    }
}

/// Serialize a sort list the way the `sort` query parameter expects it
pub fn encode_sort(orders: &[SortOrder]) -> String {
    // a Vec of plain structs cannot fail to serialize
    serde_json::to_string(orders).unwrap_or_else(|_| "[]".to_string())
}

const fn s(property: &'static str, direction: SortDirection) -> SortOrder {
    SortOrder::new(property, direction)
}

/// Skater report names with a known default ordering
pub const SKATER_REPORTS: &[&str] = &[
    "summary",
    "bios",
    "faceoffpercentages",
    "faceoffwins",
    "goalsForAgainst",
    "realtime",
    "penalties",
    "penaltykill",
    "penaltyShots",
    "powerplay",
    "puckPossessions",
    "summaryshooting",
    "percentages",
    "scoringRates",
    "scoringpergame",
    "shootout",
    "shottype",
    "timeonice",
];

/// Goalie report names with a known default ordering
pub const GOALIE_REPORTS: &[&str] = &[
    "summary",
    "advanced",
    "bios",
    "daysrest",
    "penaltyShots",
    "savesByStrength",
    "shootout",
    "startedVsRelieved",
];

pub const SKATER_SUMMARY_SORTING: &[SortOrder] = &[
    s("points", Desc),
    s("gamesPlayed", Asc),
    s("playerId", Asc),
];

pub const GOALIE_SUMMARY_SORTING: &[SortOrder] = &[
    s("wins", Desc),
    s("savePct", Desc),
    s("playerId", Asc),
];

pub const TEAM_SUMMARY_SORTING: &[SortOrder] = &[
    s("points", Desc),
    s("wins", Desc),
    s("teamId", Asc),
];

const SKATER_BIOS: &[SortOrder] = &[
    s("lastName", AscCi),
    s("skaterFullName", AscCi),
    s("playerId", Asc),
];
const SKATER_FACEOFF_PERCENTAGES: &[SortOrder] = &[s("totalFaceoffs", Desc), s("playerId", Asc)];
const SKATER_FACEOFF_WINS: &[SortOrder] = &[
    s("totalFaceoffWins", Desc),
    s("faceoffWinPct", Desc),
    s("playerId", Asc),
];
const SKATER_GOALS_FOR_AGAINST: &[SortOrder] = &[
    s("evenStrengthGoalDifference", Desc),
    s("playerId", Asc),
];
const SKATER_REALTIME: &[SortOrder] = &[s("hits", Desc), s("playerId", Asc)];
const SKATER_PENALTIES: &[SortOrder] = &[s("penaltyMinutes", Desc), s("playerId", Asc)];
const SKATER_PENALTY_KILL: &[SortOrder] = &[s("shTimeOnIce", Desc), s("playerId", Asc)];
const SKATER_PENALTY_SHOTS: &[SortOrder] = &[s("penaltyShotsGoals", Desc), s("playerId", Asc)];
const SKATER_POWER_PLAY: &[SortOrder] = &[s("ppTimeOnIce", Desc), s("playerId", Asc)];
const SKATER_PUCK_POSSESSIONS: &[SortOrder] = &[s("satPct", Desc), s("playerId", Asc)];
const SKATER_SUMMARY_SHOOTING: &[SortOrder] = &[
    s("satTotal", Desc),
    s("usatTotal", Desc),
    s("playerId", Asc),
];
const SKATER_PERCENTAGES: &[SortOrder] = &[s("satPercentage", Desc), s("playerId", Asc)];
const SKATER_SCORING_RATES: &[SortOrder] = &[
    s("pointsPer605v5", Desc),
    s("goalsPer605v5", Desc),
    s("playerId", Asc),
];
const SKATER_SCORING_PER_GAME: &[SortOrder] = &[
    s("pointsPerGame", Desc),
    s("goalsPerGame", Desc),
    s("playerId", Asc),
];
const SKATER_SHOOTOUT: &[SortOrder] = &[s("shootoutGoals", Desc), s("playerId", Asc)];
const SKATER_SHOT_TYPE: &[SortOrder] = &[
    s("shootingPct", Desc),
    s("shootingPctBat", Desc),
    s("playerId", Asc),
];
const SKATER_TIME_ON_ICE: &[SortOrder] = &[s("timeOnIce", Desc), s("playerId", Asc)];

const GOALIE_ADVANCED: &[SortOrder] = &[
    s("qualityStart", Desc),
    s("goalsAgainstAverage", Asc),
    s("playerId", Asc),
];
const GOALIE_BIOS: &[SortOrder] = &[
    s("lastName", AscCi),
    s("goalieFullName", AscCi),
    s("playerId", Asc),
];
const GOALIE_PENALTY_SHOTS: &[SortOrder] = &[
    s("penaltyShotsSaves", Desc),
    s("penaltyShotSavePct", Desc),
    s("playerId", Asc),
];
const GOALIE_SHOOTOUT: &[SortOrder] = &[
    s("shootoutWins", Desc),
    s("shootoutSavePct", Desc),
    s("playerId", Asc),
];
const GOALIE_STARTED_VS_RELIEVED: &[SortOrder] = &[
    s("gamesStarted", Desc),
    s("gamesStartedSavePct", Desc),
    s("playerId", Asc),
];

/// Default ordering for a skater report
///
/// Unknown reports fall back to the summary ordering.
pub fn default_skater_sorting(report: &str) -> &'static [SortOrder] {
    match report {
        "summary" => SKATER_SUMMARY_SORTING,
        "bios" => SKATER_BIOS,
        "faceoffpercentages" => SKATER_FACEOFF_PERCENTAGES,
        "faceoffwins" => SKATER_FACEOFF_WINS,
        "goalsForAgainst" => SKATER_GOALS_FOR_AGAINST,
        "realtime" => SKATER_REALTIME,
        "penalties" => SKATER_PENALTIES,
        "penaltykill" => SKATER_PENALTY_KILL,
        "penaltyShots" => SKATER_PENALTY_SHOTS,
        "powerplay" => SKATER_POWER_PLAY,
        "puckPossessions" => SKATER_PUCK_POSSESSIONS,
        "summaryshooting" => SKATER_SUMMARY_SHOOTING,
        "percentages" => SKATER_PERCENTAGES,
        "scoringRates" => SKATER_SCORING_RATES,
        "scoringpergame" => SKATER_SCORING_PER_GAME,
        "shootout" => SKATER_SHOOTOUT,
        "shottype" => SKATER_SHOT_TYPE,
        "timeonice" => SKATER_TIME_ON_ICE,
        other => {
            tracing::info!(report = other, "No default sort for skater report, using summary");
            SKATER_SUMMARY_SORTING
        }
    }
}

/// Default ordering for a goalie report
///
/// Unknown reports get no ordering.
pub fn default_goalie_sorting(report: &str) -> &'static [SortOrder] {
    match report {
        "summary" | "daysrest" | "savesByStrength" => GOALIE_SUMMARY_SORTING,
        "advanced" => GOALIE_ADVANCED,
        "bios" => GOALIE_BIOS,
        "penaltyShots" => GOALIE_PENALTY_SHOTS,
        "shootout" => GOALIE_SHOOTOUT,
        "startedVsRelieved" => GOALIE_STARTED_VS_RELIEVED,
        other => {
            tracing::debug!(report = other, "No default sort for goalie report");
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_skater_report_has_an_ordering() {
        for report in SKATER_REPORTS {
            assert!(!default_skater_sorting(report).is_empty(), "{}", report);
        }
    }

    #[test]
    fn every_goalie_report_has_an_ordering() {
        for report in GOALIE_REPORTS {
            assert!(!default_goalie_sorting(report).is_empty(), "{}", report);
        }
    }

    #[test]
    fn skater_summary() {
        let sort = default_skater_sorting("summary");
        assert_eq!(sort[0], SortOrder::new("points", Desc));
        assert_eq!(sort[1], SortOrder::new("gamesPlayed", Asc));
        assert_eq!(sort[2], SortOrder::new("playerId", Asc));
    }

    #[test]
    fn unknown_skater_report_falls_back_to_summary() {
        assert_eq!(
            default_skater_sorting("no_such_report"),
            default_skater_sorting("summary")
        );
        // exact match only
        assert_eq!(default_skater_sorting("Bios"), SKATER_SUMMARY_SORTING);
    }

    #[test]
    fn unknown_goalie_report_is_empty() {
        assert!(default_goalie_sorting("no_such_report").is_empty());
    }

    #[test]
    fn bios_sort_case_insensitively() {
        assert_eq!(default_skater_sorting("bios")[0].direction, AscCi);
        assert_eq!(
            default_goalie_sorting("bios")[1],
            SortOrder::new("goalieFullName", AscCi)
        );
    }

    #[test]
    fn every_ordering_ends_on_a_stable_key() {
        for report in SKATER_REPORTS {
            let last = default_skater_sorting(report).last().unwrap();
            assert_eq!(last.property, "playerId");
        }
        assert_eq!(TEAM_SUMMARY_SORTING.last().unwrap().property, "teamId");
    }

    #[test]
    fn encodes_as_json_array() {
        assert_eq!(
            encode_sort(TEAM_SUMMARY_SORTING),
            r#"[{"property":"points","direction":"DESC"},{"property":"wins","direction":"DESC"},{"property":"teamId","direction":"ASC"}]"#
        );
        assert_eq!(
            encode_sort(&[SortOrder::owned("lastName", AscCi)]),
            r#"[{"property":"lastName","direction":"ASC_CI"}]"#
        );
        assert_eq!(encode_sort(&[]), "[]");
    }
}
