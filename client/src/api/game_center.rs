use serde_json::Value;

use crate::error::Result;
use crate::http::{Endpoint, HttpClient};

/// Per-game data. Game ids come from the schedule endpoints.
pub struct GameCenter<'a> {
    http: &'a HttpClient,
}

impl<'a> GameCenter<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    async fn game_resource(&self, game_id: &str, section: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiWebV1,
                &format!("gamecenter/{}/{}", game_id, section),
                &[],
            )
            .await
    }

    pub async fn boxscore(&self, game_id: &str) -> Result<Value> {
        self.game_resource(game_id, "boxscore").await
    }

    pub async fn play_by_play(&self, game_id: &str) -> Result<Value> {
        self.game_resource(game_id, "play-by-play").await
    }

    /// Matchup summary of a game
    pub async fn landing(&self, game_id: &str) -> Result<Value> {
        self.game_resource(game_id, "landing").await
    }

    /// Side panel data: season series, team stats, game videos
    pub async fn right_rail(&self, game_id: &str) -> Result<Value> {
        self.game_resource(game_id, "right-rail").await
    }

    /// Scores of today's games
    pub async fn score_now(&self) -> Result<Value> {
        self.http.get(Endpoint::ApiWebV1, "score/now", &[]).await
    }

    /// Every shift of every player in a game
    pub async fn shift_chart_data(&self, game_id: &str) -> Result<Value> {
        self.http
            .get(
                Endpoint::ApiStats,
                "en/shiftcharts",
                &[("cayenneExp", format!("gameId={}", game_id))],
            )
            .await
    }
}
