use serde_json::Value;

use crate::error::Result;
use crate::http::{Endpoint, HttpClient};

pub struct Playoffs<'a> {
    http: &'a HttpClient,
}

impl<'a> Playoffs<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// All series of a season (`20232024`) up to the current round
    pub async fn carousel(&self, season: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("playoff-series/carousel/{}", season),
                &[],
            )
            .await
    }

    /// Games of one series; first round series are lettered `a` to `h`
    pub async fn schedule(&self, season: &str, series: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("schedule/playoff-series/{}/{}", season, series),
                &[],
            )
            .await
    }

    /// Bracket for the playoffs held in `year` (`2024`)
    pub async fn bracket(&self, year: &str) -> Result<Value> {
        self.http
            .get(Endpoint::ApiWebV1, &format!("playoff-bracket/{}", year), &[])
            .await
    }
}
