//! EDGE profile pages and the messages that load them
//!
//! The EDGE site renders its profile pages by sending `action` messages over
//! its WebSocket. A session replays the same messages the browser sends so
//! that the server pushes the section payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::constants::{DEFAULT_SEASON, DEFAULT_STAGE, DEFAULT_UNITS, EDGE_DOMAIN};
use crate::error::NhlApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Skater,
    Goalie,
    Team,
}

impl ProfileKind {
    /// Path segment of the profile page
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Skater => "skater",
            ProfileKind::Goalie => "goalie",
            ProfileKind::Team => "team",
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ProfileKind::Skater => "skaters",
            ProfileKind::Goalie => "goalies",
            ProfileKind::Team => "teams",
        }
    }

    fn feed(&self) -> &'static str {
        match self {
            ProfileKind::Skater => "skatersProfiles",
            ProfileKind::Goalie => "goaliesProfiles",
            ProfileKind::Team => "teamsProfiles",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            ProfileKind::Skater | ProfileKind::Goalie => "players",
            ProfileKind::Team => "teams",
        }
    }

    fn id_key(&self) -> &'static str {
        match self {
            ProfileKind::Skater | ProfileKind::Goalie => "player",
            ProfileKind::Team => "team",
        }
    }

    /// Goalie pages load their sections right after the handshake; skater
    /// and team pages wait for the first server message.
    pub fn replays_immediately(&self) -> bool {
        matches!(self, ProfileKind::Goalie)
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = NhlApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skater" => Ok(ProfileKind::Skater),
            "goalie" => Ok(ProfileKind::Goalie),
            "team" => Ok(ProfileKind::Team),
            other => Err(NhlApiError::invalid_argument(format!(
                "Unknown type '{}'. Must be one of: skater, goalie, team.",
                other
            ))),
        }
    }
}

/// One profile page of the EDGE site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProfile {
    pub kind: ProfileKind,
    /// Player id, or team id for team pages
    pub id: String,
    pub season: String,
    /// `regular` or `playoffs`
    pub stage: String,
    /// `imperial` or `metric`
    pub units: String,
    /// Skating distance and zone time strength filter; skater and team pages
    pub manpower: String,
    /// Shot location metric; skater and team pages
    pub shooting_metrics: String,
}

impl EdgeProfile {
    pub fn new(kind: ProfileKind, id: impl ToString) -> Self {
        Self {
            kind,
            id: id.to_string(),
            season: DEFAULT_SEASON.to_string(),
            stage: DEFAULT_STAGE.to_string(),
            units: DEFAULT_UNITS.to_string(),
            manpower: "all".to_string(),
            shooting_metrics: "shots".to_string(),
        }
    }

    pub fn skater(player_id: impl ToString) -> Self {
        Self::new(ProfileKind::Skater, player_id)
    }

    pub fn goalie(player_id: impl ToString) -> Self {
        Self::new(ProfileKind::Goalie, player_id)
    }

    pub fn team(team_id: impl ToString) -> Self {
        Self::new(ProfileKind::Team, team_id)
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = season.into();
        self
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_manpower(mut self, manpower: impl Into<String>) -> Self {
        self.manpower = manpower.into();
        self
    }

    pub fn with_shooting_metrics(mut self, metrics: impl Into<String>) -> Self {
        self.shooting_metrics = metrics.into();
        self
    }

    /// Page path, e.g. `/en/skater/8478402`
    pub fn uri(&self) -> String {
        format!("/en/{}/{}", self.kind, self.id)
    }

    /// WebSocket URL of the page under `base` (`wss://edge.nhl.com`)
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.uri())
    }

    /// Page identity sent with the handshake and the profile card messages
    fn page_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".into(), self.kind.type_name().into());
        params.insert(self.kind.id_key().into(), self.id.clone().into());
        params.insert("rootName".into(), self.kind.feed().into());
        params.insert("source".into(), self.kind.source().into());
        params
    }

    fn action(&self, action: &str, data: Value) -> Value {
        json!({
            "type": "action",
            "event": {
                "domain": EDGE_DOMAIN,
                "uri": self.uri(),
                "action": action,
                "data": data,
            }
        })
    }

    /// The `getLabel` message that opens a session
    pub fn handshake(&self) -> Value {
        let mut params = self.page_params();
        if self.kind == ProfileKind::Goalie {
            params.insert("season".into(), self.season.clone().into());
            params.insert("stage".into(), self.stage.clone().into());
        }
        self.action("getLabel", json!({ "params": params }))
    }

    fn profile_card(&self, render_function: &str, target: &str) -> Value {
        self.action(
            "load",
            json!({
                "renderFunction": render_function,
                "target": target,
                "params": self.page_params(),
                "callbackFunction": "initializeDataElements",
            }),
        )
    }

    fn section(&self, name: &str, target: &str, extra: &[(&str, &str)]) -> Value {
        let mut params = Map::new();
        params.insert("sectionName".into(), name.into());
        params.insert("units".into(), self.units.clone().into());
        params.insert("season".into(), self.season.clone().into());
        params.insert("stage".into(), self.stage.clone().into());
        params.insert("feed".into(), self.kind.feed().into());
        params.insert("id".into(), self.id.clone().into());
        for (key, value) in extra {
            params.insert((*key).into(), (*value).into());
        }
        self.action(
            "load",
            json!({
                "renderFunction": "renderProfileContent",
                "target": target,
                "params": params,
                "callbackFunction": "runClientFns",
            }),
        )
    }

    /// Messages that load every section of the page, in send order
    pub fn replay_messages(&self) -> Vec<Value> {
        let manpower = self.manpower.as_str();
        let metrics = self.shooting_metrics.as_str();

        match self.kind {
            ProfileKind::Goalie => vec![
                self.section("goverview", "#goverview-section-content", &[]),
                self.section(
                    "gsaves",
                    "#gsaves-section-content",
                    &[("shotlocation", "all"), ("goaliemetrics", "saves")],
                ),
                self.section("support", "#support-section-content", &[("rates", "total")]),
                self.section("avggames", "#avggames-section-content", &[]),
            ],
            ProfileKind::Skater | ProfileKind::Team => {
                let (card, section, skating_target) = if self.kind == ProfileKind::Skater {
                    (
                        ("renderPlayerCard", "#profile-playercard"),
                        ("renderProfilePlayerSection", "#profile-section"),
                        "#skatingspeed-section-content",
                    )
                } else {
                    (
                        ("renderTeamCard", "#profile-teamcard"),
                        ("renderProfileTeamSection", "#profile-section"),
                        "#skating-section-content",
                    )
                };
                vec![
                    self.profile_card(card.0, card.1),
                    self.profile_card(section.0, section.1),
                    self.section("overview", "#overview-section-content", &[]),
                    self.section("skatingspeed", skating_target, &[]),
                    self.section(
                        "skatingdistance",
                        "#skatingdistance-section-content",
                        &[("manpower", manpower)],
                    ),
                    self.section("shotspeed", "#shotspeed-section-content", &[]),
                    self.section(
                        "shotlocation",
                        "#shotlocation-section-content",
                        &[("shootingmetrics", metrics), ("shotlocation", "all")],
                    ),
                    self.section(
                        "zonetime",
                        "#zonetime-section-content",
                        &[("manpower", manpower)],
                    ),
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        let profile = EdgeProfile::skater(8478402);
        assert_eq!(profile.uri(), "/en/skater/8478402");
        assert_eq!(
            profile.url("wss://edge.nhl.com/"),
            "wss://edge.nhl.com/en/skater/8478402"
        );
        assert_eq!(EdgeProfile::team(10).url("ws://127.0.0.1:9000"), "ws://127.0.0.1:9000/en/team/10");
    }

    #[test]
    fn defaults() {
        let profile = EdgeProfile::goalie("8479361");
        assert_eq!(profile.season, "20242025");
        assert_eq!(profile.stage, "regular");
        assert_eq!(profile.units, "imperial");
    }

    #[test]
    fn skater_handshake() {
        let msg = EdgeProfile::skater("8478402").handshake();
        assert_eq!(
            msg,
            json!({
                "type": "action",
                "event": {
                    "domain": "edge.nhl.com",
                    "uri": "/en/skater/8478402",
                    "action": "getLabel",
                    "data": {
                        "params": {
                            "type": "skaters",
                            "player": "8478402",
                            "rootName": "skatersProfiles",
                            "source": "players"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn goalie_handshake_carries_season_and_stage() {
        let msg = EdgeProfile::goalie("8479361")
            .with_season("20232024")
            .with_stage("playoffs")
            .handshake();
        let params = &msg["event"]["data"]["params"];
        assert_eq!(params["type"], "goalies");
        assert_eq!(params["rootName"], "goaliesProfiles");
        assert_eq!(params["season"], "20232024");
        assert_eq!(params["stage"], "playoffs");
    }

    #[test]
    fn team_handshake_uses_team_key() {
        let msg = EdgeProfile::team("10").handshake();
        let params = &msg["event"]["data"]["params"];
        assert_eq!(params["team"], "10");
        assert!(params.get("player").is_none());
        assert_eq!(params["source"], "teams");
    }

    #[test]
    fn skater_replay() {
        let messages = EdgeProfile::skater("8478402")
            .with_manpower("es")
            .replay_messages();
        assert_eq!(messages.len(), 8);

        let card = &messages[0]["event"]["data"];
        assert_eq!(messages[0]["event"]["action"], "load");
        assert_eq!(card["renderFunction"], "renderPlayerCard");
        assert_eq!(card["target"], "#profile-playercard");
        assert_eq!(card["callbackFunction"], "initializeDataElements");

        let sections: Vec<&str> = messages[2..]
            .iter()
            .map(|m| m["event"]["data"]["params"]["sectionName"].as_str().unwrap())
            .collect();
        assert_eq!(
            sections,
            vec!["overview", "skatingspeed", "skatingdistance", "shotspeed", "shotlocation", "zonetime"]
        );

        let distance = &messages[4]["event"]["data"];
        assert_eq!(distance["renderFunction"], "renderProfileContent");
        assert_eq!(distance["callbackFunction"], "runClientFns");
        assert_eq!(distance["params"]["manpower"], "es");
        assert_eq!(distance["params"]["feed"], "skatersProfiles");
        assert_eq!(distance["params"]["id"], "8478402");

        let location = &messages[6]["event"]["data"]["params"];
        assert_eq!(location["shootingmetrics"], "shots");
        assert_eq!(location["shotlocation"], "all");
    }

    #[test]
    fn team_replay_targets() {
        let messages = EdgeProfile::team("10").replay_messages();
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[0]["event"]["data"]["renderFunction"], "renderTeamCard");
        assert_eq!(messages[1]["event"]["data"]["target"], "#profile-section");
        assert_eq!(messages[3]["event"]["data"]["target"], "#skating-section-content");
        assert_eq!(messages[3]["event"]["data"]["params"]["feed"], "teamsProfiles");
    }

    #[test]
    fn goalie_replay() {
        let messages = EdgeProfile::goalie("8479361").replay_messages();
        let targets: Vec<&str> = messages
            .iter()
            .map(|m| m["event"]["data"]["target"].as_str().unwrap())
            .collect();
        assert_eq!(
            targets,
            vec![
                "#goverview-section-content",
                "#gsaves-section-content",
                "#support-section-content",
                "#avggames-section-content"
            ]
        );
        assert_eq!(messages[1]["event"]["data"]["params"]["goaliemetrics"], "saves");
        assert_eq!(messages[2]["event"]["data"]["params"]["rates"], "total");
        assert!(ProfileKind::Goalie.replays_immediately());
        assert!(!ProfileKind::Skater.replays_immediately());
    }

    #[test]
    fn kind_parses() {
        assert_eq!("TEAM".parse::<ProfileKind>().unwrap(), ProfileKind::Team);
        assert!("referee".parse::<ProfileKind>().is_err());
    }
}
