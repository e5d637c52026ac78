use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::{now_or, take_field};
use crate::error::{NhlApiError, Result};
use crate::http::{Endpoint, HttpClient};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a YYYY-MM-DD date and return it in canonical form
fn normalize_date(date: &str) -> Result<String> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| NhlApiError::invalid_argument("Invalid date format. Please use YYYY-MM-DD."))
}

/// Reduce a game-week payload to the games of `date`
fn daily_payload(mut week: Value, date: &str) -> Result<Value> {
    let mut payload = Map::new();
    for field in ["nextStartDate", "previousStartDate"] {
        let value = week
            .get_mut(field)
            .map(Value::take)
            .ok_or(NhlApiError::MissingField(field))?;
        payload.insert(field.to_string(), value);
    }
    payload.insert("date".to_string(), Value::String(date.to_string()));
    payload.insert(
        "oddsPartners".to_string(),
        week.get_mut("oddsPartners")
            .map(Value::take)
            .ok_or(NhlApiError::MissingField("oddsPartners"))?,
    );

    let game_week = take_field(week, "gameWeek")?;
    let games = game_week
        .as_array()
        .into_iter()
        .flatten()
        .find(|day| day.get("date").and_then(Value::as_str) == Some(date))
        .and_then(|day| day.get("games"))
        .and_then(Value::as_array);
    if let Some(games) = games {
        payload.insert("numberOfGames".to_string(), Value::from(games.len()));
        payload.insert("games".to_string(), Value::Array(games.clone()));
    }

    Ok(Value::Object(payload))
}

pub struct Schedule<'a> {
    http: &'a HttpClient,
}

impl<'a> Schedule<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Games of a single day
    ///
    /// The payload carries `date`, `nextStartDate`, `previousStartDate` and
    /// `oddsPartners`, plus `games` and `numberOfGames` when the day has any.
    pub async fn daily_schedule(&self, date: &str) -> Result<Value> {
        let date = normalize_date(date)?;
        let week = self
            .http
            .get(Endpoint::ApiWebV1, &format!("schedule/{}", date), &[])
            .await?;
        daily_payload(week, &date)
    }

    /// Full game week containing `date`, the current week when None
    pub async fn weekly_schedule(&self, date: Option<&str>) -> Result<Value> {
        self.http
            .get(Endpoint::ApiWebV1, &format!("schedule/{}", now_or(date)), &[])
            .await
    }

    /// Games of a team in a month (YYYY-MM), the current month when None
    pub async fn team_monthly_schedule(&self, team_abbr: &str, month: Option<&str>) -> Result<Value> {
        let resource = format!("club-schedule/{}/month/{}", team_abbr, now_or(month));
        let response = self.http.get(Endpoint::ApiWebV1, &resource, &[]).await?;
        take_field(response, "games")
    }

    /// Games of a team in the week containing `date`
    pub async fn team_weekly_schedule(&self, team_abbr: &str, date: Option<&str>) -> Result<Value> {
        let resource = format!("club-schedule/{}/week/{}", team_abbr, now_or(date));
        let response = self.http.get(Endpoint::ApiWebV1, &resource, &[]).await?;
        take_field(response, "games")
    }

    /// Full season schedule of a team with the response metadata
    pub async fn team_season_schedule(&self, team_abbr: &str, season: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("club-schedule-season/{}/{}", team_abbr, season),
                &[],
            )
            .await
    }

    pub async fn calendar_schedule(&self, date: &str) -> Result<Value> {
        self.http
            .get(Endpoint::ApiWebV1, &format!("schedule-calendar/{}", date), &[])
            .await
    }
}
