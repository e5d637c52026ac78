use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{now_or, take_field};
use crate::error::Result;
use crate::http::{Endpoint, HttpClient};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAbbrev {
    pub abbr: String,
    pub name: String,
}

/// A team as listed in the standings, linked to its franchise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub common_name: String,
    pub abbr: String,
    pub logo: String,
    pub conference: NamedAbbrev,
    pub division: NamedAbbrev,
    /// None when no franchise has a matching full name
    pub franchise_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Localized {
    #[serde(default)]
    default: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingRow {
    #[serde(default)]
    conference_abbrev: String,
    #[serde(default)]
    conference_name: String,
    #[serde(default)]
    division_abbrev: String,
    #[serde(default)]
    division_name: String,
    team_name: Localized,
    team_common_name: Localized,
    team_abbrev: Localized,
    #[serde(default)]
    team_logo: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FranchiseRow {
    id: i64,
    full_name: String,
}

impl From<StandingRow> for TeamInfo {
    fn from(row: StandingRow) -> Self {
        Self {
            name: row.team_name.default,
            common_name: row.team_common_name.default,
            abbr: row.team_abbrev.default,
            logo: row.team_logo,
            conference: NamedAbbrev {
                abbr: row.conference_abbrev,
                name: row.conference_name,
            },
            division: NamedAbbrev {
                abbr: row.division_abbrev,
                name: row.division_name,
            },
            franchise_id: None,
        }
    }
}

/// Comparison key for team names: lowercase with Latin-1 accents folded,
/// since franchise names in the stats API drop accents the standings keep
fn name_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}

/// Attach franchise ids to teams by full name
fn link_franchises(teams: &mut [TeamInfo], franchises: &[FranchiseRow]) {
    for team in teams.iter_mut() {
        let key = name_key(&team.name);
        team.franchise_id = franchises
            .iter()
            .find(|f| name_key(&f.full_name) == key)
            .map(|f| f.id);
        if team.franchise_id.is_none() {
            tracing::debug!(team = %team.name, "No franchise matches team name");
        }
    }
}

pub struct Teams<'a> {
    http: &'a HttpClient,
}

impl<'a> Teams<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Every team in the standings of `date` (YYYY-MM-DD, today when None)
    /// with conference, division and franchise id
    pub async fn teams_info(&self, date: Option<&str>) -> Result<Vec<TeamInfo>> {
        let standings = self
            .http
            .get(Endpoint::ApiWebV1, &format!("standings/{}", now_or(date)), &[])
            .await?;
        let rows: Vec<StandingRow> = serde_json::from_value(take_field(standings, "standings")?)?;
        let mut teams: Vec<TeamInfo> = rows.into_iter().map(TeamInfo::from).collect();

        let franchises: Vec<FranchiseRow> = serde_json::from_value(self.all_franchises().await?)?;
        link_franchises(&mut teams, &franchises);

        tracing::debug!(teams = teams.len(), "Loaded team info");
        Ok(teams)
    }

    /// Roster of a team (`TOR`, `BUF`, ...) for a season (`20232024`)
    pub async fn roster_by_team(&self, team_abbr: &str, season: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("roster/{}/{}", team_abbr, season),
                &[],
            )
            .await
    }

    /// All franchises, past and present
    pub async fn all_franchises(&self) -> Result<Value> {
        let response = self.http.get(Endpoint::ApiStats, "en/franchise", &[]).await?;
        take_field(response, "data")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row() -> Value {
        json!({
            "conferenceAbbrev": "E",
            "conferenceName": "Eastern",
            "divisionAbbrev": "A",
            "divisionName": "Atlantic",
            "teamName": { "default": "Montréal Canadiens", "fr": "Canadiens de Montréal" },
            "teamCommonName": { "default": "Canadiens" },
            "teamAbbrev": { "default": "MTL" },
            "teamLogo": "https://assets.nhle.com/logos/nhl/svg/MTL_light.svg"
        })
    }

    #[test]
    fn standing_row_to_team_info() {
        let row: StandingRow = serde_json::from_value(row()).unwrap();
        let team = TeamInfo::from(row);
        assert_eq!(team.abbr, "MTL");
        assert_eq!(team.common_name, "Canadiens");
        assert_eq!(team.conference.abbr, "E");
        assert_eq!(team.division.name, "Atlantic");
        assert_eq!(team.franchise_id, None);
    }

    #[test]
    fn links_franchise_ignoring_accents() {
        let row: StandingRow = serde_json::from_value(row()).unwrap();
        let mut teams = vec![TeamInfo::from(row)];
        let franchises = vec![
            FranchiseRow {
                id: 5,
                full_name: "Toronto Maple Leafs".to_string(),
            },
            FranchiseRow {
                id: 1,
                full_name: "Montreal Canadiens".to_string(),
            },
        ];
        link_franchises(&mut teams, &franchises);
        assert_eq!(teams[0].franchise_id, Some(1));
    }

    #[test]
    fn name_key_folds_latin_accents() {
        assert_eq!(name_key("Montréal Canadiens"), "montreal canadiens");
        assert_eq!(name_key("Nordiques de QUÉBEC"), "nordiques de quebec");
        assert_eq!(name_key("Färjestad Brynäs"), "farjestad brynas");
        assert_eq!(name_key("Señor Ørsted Ç"), "senor orsted c");
        assert_eq!(name_key("Toronto Maple Leafs"), "toronto maple leafs");
    }

    #[test]
    fn unmatched_team_keeps_no_franchise() {
        let row: StandingRow = serde_json::from_value(row()).unwrap();
        let mut teams = vec![TeamInfo::from(row)];
        link_franchises(&mut teams, &[]);
        assert_eq!(teams[0].franchise_id, None);
    }
}
