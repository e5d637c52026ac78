use serde_json::Value;

use crate::error::Result;
use crate::http::{Endpoint, HttpClient};

pub struct Players<'a> {
    http: &'a HttpClient,
}

impl<'a> Players<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Players on a team's roster for a season, grouped by position
    pub async fn players_by_team(&self, team_abbr: &str, season: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("roster/{}/{}", team_abbr, season),
                &[],
            )
            .await
    }

    pub async fn prospects_by_team(&self, team_abbr: &str) -> Result<Value> {
        self.http
            .get(Endpoint::ApiWebV1, &format!("prospects/{}", team_abbr), &[])
            .await
    }
}
