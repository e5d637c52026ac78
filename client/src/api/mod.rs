//! REST endpoint groups
//!
//! Each group borrows the shared [`HttpClient`](crate::http::HttpClient) and
//! maps one method to one resource. Payloads are returned as
//! `serde_json::Value` unless a group has a typed view of its own.

mod edge;
mod game_center;
mod misc;
mod players;
mod playoffs;
mod schedule;
mod standings;
mod stats;
mod teams;

pub use edge::{Edge, EdgeReport, EdgeSubject};
pub use game_center::GameCenter;
pub use misc::Misc;
pub use players::Players;
pub use playoffs::Playoffs;
pub use schedule::Schedule;
pub use standings::Standings;
pub use stats::{GoalieSummaryQuery, ReportOptions, SkaterSummaryQuery, Stats, TeamSummaryQuery};
pub use teams::{NamedAbbrev, TeamInfo, Teams};

use serde_json::Value;

use crate::error::{NhlApiError, Result};

/// Path segment for an optional date-like value, `now` when absent
fn now_or(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "now",
    }
}

/// Move `field` out of a JSON object
fn take_field(mut value: Value, field: &'static str) -> Result<Value> {
    value
        .get_mut(field)
        .map(Value::take)
        .ok_or(NhlApiError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn now_or_defaults() {
        assert_eq!(now_or(None), "now");
        assert_eq!(now_or(Some("")), "now");
        assert_eq!(now_or(Some("2024-01-01")), "2024-01-01");
    }

    #[test]
    fn take_field_extracts_or_errors() {
        let value = json!({ "data": [1, 2], "total": 2 });
        assert_eq!(take_field(value.clone(), "data").unwrap(), json!([1, 2]));

        let err = take_field(value, "games").unwrap_err();
        assert!(matches!(err, NhlApiError::MissingField("games")));
    }
}
