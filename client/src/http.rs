//! HTTP transport shared by all endpoint groups

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::constants::USER_AGENT;
use crate::error::{NhlApiError, Result};

/// The three REST services the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `api-web.nhle.com/v1`: schedules, rosters, game center
    ApiWebV1,
    ApiCore,
    /// `api.nhle.com/stats/rest`: reports, franchises, glossary
    ApiStats,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::ApiWebV1 => "api_web_v1",
            Endpoint::ApiCore => "api_core",
            Endpoint::ApiStats => "api_stats",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters of a single request
pub type QueryParams = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!config.ssl_verify);
        if !config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }
        let client = builder.build()?;

        tracing::debug!(
            timeout_secs = config.timeout_secs,
            ssl_verify = config.ssl_verify,
            follow_redirects = config.follow_redirects,
            "HTTP client initialized"
        );

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::ApiWebV1 => &self.config.api_web_url,
            Endpoint::ApiCore => &self.config.api_core_url,
            Endpoint::ApiStats => &self.config.api_stats_url,
        }
    }

    /// Full URL for `resource` on `endpoint`, with `query` appended
    pub fn url(&self, endpoint: Endpoint, resource: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}{}", self.base_url(endpoint), resource);
        let mut url = Url::parse(&raw)
            .map_err(|e| NhlApiError::invalid_argument(format!("Invalid URL {}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GET `resource` and decode the body as JSON
    pub async fn get(
        &self,
        endpoint: Endpoint,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let url = self.url(endpoint, resource, query)?;
        if self.config.debug {
            tracing::debug!(endpoint = %endpoint, url = %url, "GET");
        } else {
            tracing::trace!(endpoint = %endpoint, url = %url, "GET");
        }

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Request failed");
            return Err(NhlApiError::from_response(status.as_u16(), url.as_str(), &body));
        }

        if self.config.debug {
            tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Response");
        }
        Ok(serde_json::from_str(&body)?)
    }
}
