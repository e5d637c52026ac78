use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::http::{HeaderValue, header};
use tokio_tungstenite::tungstenite::Message;

use super::profile::EdgeProfile;
use crate::config::ClientConfig;
use crate::constants::{
    BROWSER_USER_AGENT, DEFAULT_EDGE_WS_URL, DEFAULT_HEARTBEAT_SECS,
    DEFAULT_RECEIVE_TIMEOUT_SECS, EDGE_ORIGIN,
};
use crate::error::{NhlApiError, Result};

/// One replay of an EDGE profile page
///
/// Connects, sends the handshake and section messages, then collects every
/// JSON payload the server pushes until it closes the connection or goes
/// quiet for the receive timeout.
#[derive(Debug, Clone)]
pub struct AdvancedStatsSession {
    profile: EdgeProfile,
    base_url: String,
    cookie: Option<String>,
    heartbeat: Duration,
    receive_timeout: Duration,
}

impl AdvancedStatsSession {
    pub fn new(profile: EdgeProfile) -> Self {
        Self {
            profile,
            base_url: DEFAULT_EDGE_WS_URL.to_string(),
            cookie: None,
            heartbeat: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            receive_timeout: Duration::from_secs(DEFAULT_RECEIVE_TIMEOUT_SECS),
        }
    }

    /// Session using the EDGE URL, cookies and timings of `config`
    pub fn from_config(profile: EdgeProfile, config: &ClientConfig) -> Self {
        Self {
            profile,
            base_url: config.edge_ws_url.clone(),
            cookie: config.edge_cookie_header(),
            heartbeat: config.edge_heartbeat(),
            receive_timeout: config.edge_receive_timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Raw `Cookie` header value, `name=value; name=value`
    pub fn with_cookie_header(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_heartbeat(mut self, heartbeat: Duration) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    pub fn profile(&self) -> &EdgeProfile {
        &self.profile
    }

    pub fn url(&self) -> String {
        self.profile.url(&self.base_url)
    }

    /// Upgrade request with the browser headers the feed expects
    pub fn request(&self) -> Result<Request> {
        let mut request = self.url().into_client_request()?;
        let headers = request.headers_mut();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(header::ORIGIN, HeaderValue::from_static(EDGE_ORIGIN));
        if let Some(cookie) = &self.cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| NhlApiError::invalid_argument(format!("Invalid cookie header: {}", e)))?;
            headers.insert(header::COOKIE, value);
        }
        Ok(request)
    }

    /// Run the session and return every JSON payload received, in order
    ///
    /// Failing to connect or to send the handshake is an error. Anything
    /// that goes wrong afterwards ends the session with what was collected.
    pub async fn run(&self) -> Result<Vec<Value>> {
        let kind = self.profile.kind;
        let request = self.request()?;
        tracing::debug!(url = %self.url(), kind = %kind, "Connecting to EDGE feed");

        let (ws_stream, _) = tokio_tungstenite::connect_async(request).await?;
        let (mut ws_write, mut ws_read) = ws_stream.split();

        let handshake = self.profile.handshake();
        ws_write.send(Message::Text(handshake.to_string().into())).await?;
        tracing::debug!(kind = %kind, "Sent handshake");

        let mut messages: Vec<Value> = Vec::new();
        let mut replayed = false;
        if kind.replays_immediately() {
            if let Err(e) = self.replay(&mut ws_write).await {
                tracing::error!(kind = %kind, error = %e, "Failed to send section messages");
                return Ok(messages);
            }
            replayed = true;
        }

        // a zero period would panic in interval_at
        let period = if self.heartbeat.is_zero() {
            Duration::from_secs(DEFAULT_HEARTBEAT_SECS)
        } else {
            self.heartbeat
        };
        let mut heartbeat = tokio::time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut deadline = Instant::now() + self.receive_timeout;

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if let Err(e) = ws_write.send(Message::Ping(Default::default())).await {
                        tracing::error!(kind = %kind, error = %e, "Heartbeat failed");
                        break;
                    }
                }
                next = tokio::time::timeout_at(deadline, ws_read.next()) => {
                    let msg = match next {
                        Err(_) => {
                            tracing::info!(
                                kind = %kind,
                                timeout_secs = self.receive_timeout.as_secs(),
                                "No message before receive timeout, ending session"
                            );
                            break;
                        }
                        Ok(None) => {
                            tracing::info!(kind = %kind, "Connection closed by server");
                            break;
                        }
                        Ok(Some(Err(e))) => {
                            tracing::error!(kind = %kind, error = %e, "WebSocket error");
                            break;
                        }
                        Ok(Some(Ok(msg))) => msg,
                    };

                    match msg {
                        Message::Text(text) => {
                            deadline = Instant::now() + self.receive_timeout;
                            match serde_json::from_str::<Value>(text.as_str()) {
                                Ok(value) => {
                                    messages.push(value);
                                    tracing::debug!(kind = %kind, received = messages.len(), "Received message");
                                }
                                Err(_) => {
                                    tracing::warn!(kind = %kind, "Received non-JSON message");
                                    continue;
                                }
                            }
                            if !replayed {
                                if let Err(e) = self.replay(&mut ws_write).await {
                                    tracing::error!(kind = %kind, error = %e, "Failed to send section messages");
                                    break;
                                }
                                replayed = true;
                            }
                        }
                        Message::Binary(_) => {
                            deadline = Instant::now() + self.receive_timeout;
                            tracing::warn!(kind = %kind, "Received non-JSON message");
                        }
                        Message::Close(frame) => {
                            tracing::info!(kind = %kind, frame = ?frame, "Connection closed by server");
                            break;
                        }
                        _ => {}
                    }
                }
            }
        }

        tracing::debug!(kind = %kind, messages = messages.len(), "EDGE session finished");
        Ok(messages)
    }

    async fn replay<S>(&self, ws_write: &mut S) -> Result<()>
    where
        S: futures::Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
    {
        for (idx, message) in self.profile.replay_messages().into_iter().enumerate() {
            ws_write.send(Message::Text(message.to_string().into())).await?;
            tracing::debug!(kind = %self.profile.kind, index = idx + 1, "Sent section message");
        }
        Ok(())
    }
}
