use serde_json::Value;

use super::{now_or, take_field};
use crate::error::{NhlApiError, Result};
use crate::http::{Endpoint, HttpClient};

pub struct Standings<'a> {
    http: &'a HttpClient,
}

impl<'a> Standings<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// League standings
    ///
    /// With a `season` (`20232024`) the standings as of that season's last
    /// day are returned and `date` is ignored. Otherwise `date`
    /// (YYYY-MM-DD) or today.
    pub async fn league_standings(&self, date: Option<&str>, season: Option<&str>) -> Result<Value> {
        let day = match season {
            Some(season) => {
                let manifest = self.season_standing_manifest().await?;
                season_end_date(&manifest, season)?
            }
            None => now_or(date).to_string(),
        };
        self.http
            .get(Endpoint::ApiWebV1, &format!("standings/{}", day), &[])
            .await
    }

    /// Every season with its standings date range
    pub async fn season_standing_manifest(&self) -> Result<Value> {
        let response = self.http.get(Endpoint::ApiWebV1, "standings-season", &[]).await?;
        take_field(response, "seasons")
    }
}

/// Last standings date of `season` according to the manifest
fn season_end_date(manifest: &Value, season: &str) -> Result<String> {
    let season_id: i64 = season
        .trim()
        .parse()
        .map_err(|_| NhlApiError::invalid_argument(format!("Invalid season id {}", season)))?;

    manifest
        .as_array()
        .into_iter()
        .flatten()
        .find(|s| s.get("id").and_then(Value::as_i64) == Some(season_id))
        .ok_or_else(|| NhlApiError::invalid_argument(format!("Invalid season id {}", season)))?
        .get("standingsEnd")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(NhlApiError::MissingField("standingsEnd"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn manifest() -> Value {
        json!([
            { "id": 20222023, "standingsStart": "2022-10-07", "standingsEnd": "2023-04-14" },
            { "id": 20232024, "standingsStart": "2023-10-10", "standingsEnd": "2024-04-18" }
        ])
    }

    #[test]
    fn finds_season_end() {
        assert_eq!(season_end_date(&manifest(), "20232024").unwrap(), "2024-04-18");
    }

    #[test]
    fn unknown_season_is_invalid() {
        let err = season_end_date(&manifest(), "19001901").unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument: Invalid season id 19001901");

        assert!(season_end_date(&manifest(), "last-year").is_err());
    }
}
