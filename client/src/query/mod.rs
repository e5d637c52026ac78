//! Query construction for the stats REST API
//!
//! Filters render fragments of the API's cayenne expression language,
//! [`QueryBuilder`] joins them into a [`QueryContext`], and the sorting
//! tables provide per-report default orderings.
//!
//! ```
//! use nhl_api::query::{Filter, Position, QueryBuilder};
//!
//! let ctx = QueryBuilder::new().build([
//!     Filter::season_range("20202021", "20232024"),
//!     Filter::game_type("2"),
//!     Filter::position(Position::Defense),
//! ]);
//! assert_eq!(
//!     ctx.query_str(),
//!     "seasonId >= 20202021 and seasonId <= 20232024 and gameTypeId=2 and positionCode='D'"
//! );
//! ```

mod builder;
mod filters;
mod sorting;

pub use builder::{
    BuildObserver, DEFAULT_FACT_QUERY, FilterItem, QueryBuilder, QueryContext, TracingObserver,
    parse_filter_items,
};
pub use filters::{Filter, InvalidQueryValue, Position};
pub use sorting::{
    GOALIE_REPORTS, GOALIE_SUMMARY_SORTING, SKATER_REPORTS, SKATER_SUMMARY_SORTING, SortDirection,
    SortOrder, TEAM_SUMMARY_SORTING, default_goalie_sorting, default_skater_sorting, encode_sort,
};
