use serde_json::Value;

use super::take_field;
use crate::error::Result;
use crate::http::{Endpoint, HttpClient};

/// Reference data from the stats API
pub struct Misc<'a> {
    http: &'a HttpClient,
}

impl<'a> Misc<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    async fn data(&self, resource: &str) -> Result<Value> {
        let response = self.http.get(Endpoint::ApiStats, resource, &[]).await?;
        take_field(response, "data")
    }

    /// Stat abbreviations and their definitions, sorted by name
    pub async fn glossary(&self) -> Result<Value> {
        self.data("en/glossary?sort=fullName").await
    }

    /// Filter options offered by the stats site
    pub async fn config(&self) -> Result<Value> {
        self.http.get(Endpoint::ApiStats, "en/config", &[]).await
    }

    /// Countries with their nationality codes
    pub async fn countries(&self) -> Result<Value> {
        self.data("en/country").await
    }

    /// Per-season rules: games scheduled, overtime format, ties
    pub async fn season_specific_rules_and_info(&self) -> Result<Value> {
        self.data("en/season").await
    }

    pub async fn draft_year_and_rounds(&self) -> Result<Value> {
        self.data("en/draft").await
    }
}
