//! Advanced stats from the NHL EDGE WebSocket feed
//!
//! The feed has no documented API. A session impersonates the EDGE site in
//! a browser: it opens the profile page's socket with browser headers and
//! the caller's cookies, replays the page's load messages and collects what
//! comes back.

mod profile;
mod session;

pub use profile::{EdgeProfile, ProfileKind};
pub use session::AdvancedStatsSession;
