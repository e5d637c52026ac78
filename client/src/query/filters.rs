//! Filter type definitions
//!
//! Each filter renders one fragment of the stats API's cayenne expression
//! language and validates its own value domain. Rendering and validation are
//! independent: a filter renders even when its value would fail validation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Accepted values for the decision filter
const DECISION_VALUES: &[&str] = &["W", "L", "O"];

/// Accepted values for the home/road filter
const HOME_ROAD_VALUES: &[&str] = &["H", "R"];

/// Accepted values for the shoots/catches filter
const SHOOT_CATCH_VALUES: &[&str] = &["L", "R"];

/// A filter value outside the domain its kind accepts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{filter}: {reason}")]
pub struct InvalidQueryValue {
    /// Display form of the offending filter
    pub filter: String,
    /// Why the value was rejected
    pub reason: String,
}

/// Player position codes used by the position filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Left wing, right wing and center together
    #[serde(rename = "F", alias = "all_forwards")]
    AllForwards,
    #[serde(rename = "C", alias = "center")]
    Center,
    #[serde(rename = "L", alias = "left_wing")]
    LeftWing,
    #[serde(rename = "R", alias = "right_wing")]
    RightWing,
    #[serde(rename = "D", alias = "defense")]
    Defense,
}

impl Position {
    pub fn code(&self) -> &'static str {
        match self {
            Position::AllForwards => "F",
            Position::Center => "C",
            Position::LeftWing => "L",
            Position::RightWing => "R",
            Position::Defense => "D",
        }
    }
}

/// Query filters for the stats REST API
///
/// Values are kept as the caller supplied them and interpolated verbatim.
/// Numeric identifiers may be given as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Inclusive season range; start and end are not compared
    SeasonRange {
        #[serde(deserialize_with = "string_or_number")]
        start: String,
        #[serde(deserialize_with = "string_or_number")]
        end: String,
    },
    Franchise {
        #[serde(deserialize_with = "string_or_number")]
        franchise_id: String,
    },
    GameType {
        #[serde(deserialize_with = "string_or_number")]
        game_type: String,
    },
    Position {
        position: Position,
    },
    /// W=win, L=loss, O=overtime loss
    Decision {
        decision: String,
    },
    /// Nationality code as listed by the countries endpoint (e.g. "CAN")
    Nationality {
        nation_code: String,
    },
    Draft {
        #[serde(deserialize_with = "string_or_number")]
        year: String,
        #[serde(default, deserialize_with = "optional_string_or_number")]
        round: Option<String>,
    },
    Experience {
        is_rookie: bool,
    },
    /// Hall of fame takes precedence over active when both are set
    Status {
        #[serde(default)]
        is_active: bool,
        #[serde(default)]
        is_hall_of_fame: bool,
    },
    /// H=home, R=road
    HomeRoad {
        home_road: String,
    },
    /// L=left, R=right
    ShootCatches {
        shoot_catch: String,
    },
    Opponent {
        #[serde(deserialize_with = "string_or_number")]
        opponent_franchise_id: String,
    },
}

impl Filter {
    pub fn season_range(start: impl ToString, end: impl ToString) -> Self {
        Self::SeasonRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn franchise(franchise_id: impl ToString) -> Self {
        Self::Franchise {
            franchise_id: franchise_id.to_string(),
        }
    }

    pub fn game_type(game_type: impl ToString) -> Self {
        Self::GameType {
            game_type: game_type.to_string(),
        }
    }

    pub fn position(position: Position) -> Self {
        Self::Position { position }
    }

    pub fn decision(decision: impl Into<String>) -> Self {
        Self::Decision {
            decision: decision.into(),
        }
    }

    pub fn nationality(nation_code: impl Into<String>) -> Self {
        Self::Nationality {
            nation_code: nation_code.into(),
        }
    }

    pub fn draft(year: impl ToString, round: Option<impl ToString>) -> Self {
        Self::Draft {
            year: year.to_string(),
            round: round.map(|r| r.to_string()),
        }
    }

    pub fn experience(is_rookie: bool) -> Self {
        Self::Experience { is_rookie }
    }

    pub fn status(is_active: bool, is_hall_of_fame: bool) -> Self {
        Self::Status {
            is_active,
            is_hall_of_fame,
        }
    }

    pub fn home_road(home_road: impl Into<String>) -> Self {
        Self::HomeRoad {
            home_road: home_road.into(),
        }
    }

    pub fn shoot_catches(shoot_catch: impl Into<String>) -> Self {
        Self::ShootCatches {
            shoot_catch: shoot_catch.into(),
        }
    }

    pub fn opponent(opponent_franchise_id: impl ToString) -> Self {
        Self::Opponent {
            opponent_franchise_id: opponent_franchise_id.to_string(),
        }
    }

    /// Short kind name, used in log lines and validation messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SeasonRange { .. } => "SeasonRange",
            Self::Franchise { .. } => "Franchise",
            Self::GameType { .. } => "GameType",
            Self::Position { .. } => "Position",
            Self::Decision { .. } => "Decision",
            Self::Nationality { .. } => "Nationality",
            Self::Draft { .. } => "Draft",
            Self::Experience { .. } => "Experience",
            Self::Status { .. } => "Status",
            Self::HomeRoad { .. } => "HomeRoad",
            Self::ShootCatches { .. } => "ShootCatches",
            Self::Opponent { .. } => "Opponent",
        }
    }

    /// Render this filter as a cayenne expression fragment
    pub fn to_query(&self) -> String {
        match self {
            Self::SeasonRange { start, end } => {
                format!("seasonId >= {} and seasonId <= {}", start, end)
            }
            Self::Franchise { franchise_id } => format!("franchiseId={}", franchise_id),
            Self::GameType { game_type } => format!("gameTypeId={}", game_type),
            Self::Position { position } => match position {
                Position::AllForwards => format!(
                    "(positionCode='{}' or positionCode='{}' or positionCode='{}')",
                    Position::LeftWing.code(),
                    Position::RightWing.code(),
                    Position::Center.code()
                ),
                other => format!("positionCode='{}'", other.code()),
            },
            Self::Decision { decision } => format!("decision='{}'", decision),
            Self::Nationality { nation_code } => format!("nationalityCode='{}'", nation_code),
            Self::Draft { year, round } => match round.as_deref() {
                Some(round) if !round.is_empty() => {
                    format!("draftYear={} and draftRound={}", year, round)
                }
                _ => format!("draftYear={}", year),
            },
            Self::Experience { is_rookie } => {
                format!("isRookie='{}'", if *is_rookie { "1" } else { "0" })
            }
            Self::Status {
                is_active,
                is_hall_of_fame,
            } => {
                if *is_hall_of_fame {
                    "isInHallOfFame=1".to_string()
                } else if *is_active {
                    "active=1".to_string()
                } else {
                    String::new()
                }
            }
            Self::HomeRoad { home_road } => format!("homeRoad='{}'", home_road),
            // Unquoted on the wire, unlike the other letter codes
            Self::ShootCatches { shoot_catch } => format!("shootsCatches={}", shoot_catch),
            Self::Opponent {
                opponent_franchise_id,
            } => format!("opponentFranchiseId={}", opponent_franchise_id),
        }
    }

    /// Check the filter's value against the domain its kind accepts
    pub fn validate(&self) -> Result<(), InvalidQueryValue> {
        match self {
            Self::Decision { decision } => self.check_domain(decision, DECISION_VALUES),
            Self::HomeRoad { home_road } => self.check_domain(home_road, HOME_ROAD_VALUES),
            Self::ShootCatches { shoot_catch } => self.check_domain(shoot_catch, SHOOT_CATCH_VALUES),
            _ => Ok(()),
        }
    }

    fn check_domain(&self, value: &str, allowed: &[&str]) -> Result<(), InvalidQueryValue> {
        if allowed.contains(&value) {
            return Ok(());
        }
        Err(InvalidQueryValue {
            filter: self.to_string(),
            reason: format!(
                "{} value must be one of [{}]",
                self.kind(),
                allowed.join(", ")
            ),
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeasonRange { start, end } => write!(f, "SeasonRange({}..{})", start, end),
            Self::Franchise { franchise_id } => write!(f, "Franchise({})", franchise_id),
            Self::GameType { game_type } => write!(f, "GameType({})", game_type),
            Self::Position { position } => write!(f, "Position({})", position.code()),
            Self::Decision { decision } => write!(f, "Decision({})", decision),
            Self::Nationality { nation_code } => write!(f, "Nationality({})", nation_code),
            Self::Draft { year, round } => match round {
                Some(round) => write!(f, "Draft({}, round {})", year, round),
                None => write!(f, "Draft({})", year),
            },
            Self::Experience { is_rookie } => write!(f, "Experience(rookie={})", is_rookie),
            Self::Status {
                is_active,
                is_hall_of_fame,
            } => write!(
                f,
                "Status(active={}, hall_of_fame={})",
                is_active, is_hall_of_fame
            ),
            Self::HomeRoad { home_road } => write!(f, "HomeRoad({})", home_road),
            Self::ShootCatches { shoot_catch } => write!(f, "ShootCatches({})", shoot_catch),
            Self::Opponent {
                opponent_franchise_id,
            } => write!(f, "Opponent({})", opponent_franchise_id),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
