use crate::advanced::{AdvancedStatsSession, EdgeProfile};
use crate::api::{Edge, GameCenter, Misc, Players, Playoffs, Schedule, Standings, Stats, Teams};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;

/// Entry point to every endpoint group
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct NhlClient {
    http: HttpClient,
}

impl NhlClient {
    /// Client with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Client configured from `NHL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn teams(&self) -> Teams<'_> {
        Teams::new(&self.http)
    }

    pub fn standings(&self) -> Standings<'_> {
        Standings::new(&self.http)
    }

    pub fn schedule(&self) -> Schedule<'_> {
        Schedule::new(&self.http)
    }

    pub fn game_center(&self) -> GameCenter<'_> {
        GameCenter::new(&self.http)
    }

    pub fn playoffs(&self) -> Playoffs<'_> {
        Playoffs::new(&self.http)
    }

    pub fn players(&self) -> Players<'_> {
        Players::new(&self.http)
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats::new(&self.http)
    }

    pub fn misc(&self) -> Misc<'_> {
        Misc::new(&self.http)
    }

    pub fn edge(&self) -> Edge<'_> {
        Edge::new(&self.http)
    }

    /// EDGE WebSocket session for a profile page, using this client's EDGE
    /// settings
    pub fn advanced_stats(&self, profile: EdgeProfile) -> AdvancedStatsSession {
        AdvancedStatsSession::from_config(profile, self.config())
    }
}
