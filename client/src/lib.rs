//! Client for the public NHL APIs
//!
//! - [`query`]: filter DSL for the stats REST API and per-report default
//!   sort orders
//! - [`api`]: endpoint groups behind [`NhlClient`]
//! - [`advanced`]: EDGE advanced stats WebSocket sessions
//!
//! ```no_run
//! use nhl_api::NhlClient;
//! use nhl_api::api::ReportOptions;
//! use nhl_api::query::{Filter, Position, QueryBuilder};
//!
//! # async fn run() -> nhl_api::Result<()> {
//! let client = NhlClient::new()?;
//! let context = QueryBuilder::new().build([
//!     Filter::season_range("20232024", "20232024"),
//!     Filter::game_type("2"),
//!     Filter::position(Position::Defense),
//! ]);
//! let page = client
//!     .stats()
//!     .skater_stats_with_query_context(&context, "summary", &ReportOptions::default())
//!     .await?;
//! println!("{}", page["total"]);
//! # Ok(())
//! # }
//! ```

pub mod advanced;
pub mod api;
mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod query;

pub use client::NhlClient;
pub use config::ClientConfig;
pub use error::{NhlApiError, NhlApiErrorCode, Result};
pub use http::{Endpoint, HttpClient};
