//! Query builder
//!
//! Folds a list of filter inputs into a single [`QueryContext`]. Invalid
//! filters are recorded as errors and left out of the expression; inputs that
//! are not filters at all are skipped.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::filters::{Filter, InvalidQueryValue};

/// Base fact predicate applied when none is given
pub const DEFAULT_FACT_QUERY: &str = "gamesPlayed>=1";

/// Connective placed between filter fragments
const AND: &str = " and ";

/// One input to [`QueryBuilder::build`]
///
/// Anything that does not decode as a [`Filter`] is carried as `Other` and
/// skipped by the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterItem {
    Filter(Filter),
    Other(serde_json::Value),
}

impl FilterItem {
    pub fn as_filter(&self) -> Option<&Filter> {
        match self {
            FilterItem::Filter(filter) => Some(filter),
            FilterItem::Other(_) => None,
        }
    }

    /// True for objects that carry a `type` key but did not decode as a
    /// filter, such as an unknown kind or a field of the wrong type
    pub fn looks_like_filter(&self) -> bool {
        match self {
            FilterItem::Filter(_) => false,
            FilterItem::Other(value) => value.get("type").is_some(),
        }
    }
}

impl From<Filter> for FilterItem {
    fn from(filter: Filter) -> Self {
        FilterItem::Filter(filter)
    }
}

impl From<&Filter> for FilterItem {
    fn from(filter: &Filter) -> Self {
        FilterItem::Filter(filter.clone())
    }
}

impl From<&str> for FilterItem {
    fn from(value: &str) -> Self {
        FilterItem::Other(serde_json::Value::String(value.to_string()))
    }
}

impl From<serde_json::Value> for FilterItem {
    fn from(value: serde_json::Value) -> Self {
        match serde_json::from_value::<Filter>(value.clone()) {
            Ok(filter) => FilterItem::Filter(filter),
            Err(_) => FilterItem::Other(value),
        }
    }
}

impl fmt::Display for FilterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterItem::Filter(filter) => filter.fmt(f),
            FilterItem::Other(value) => value.fmt(f),
        }
    }
}

/// Parse a JSON array of filter inputs
///
/// Entries that are not recognised filters are kept as [`FilterItem::Other`].
pub fn parse_filter_items(json: &str) -> Result<Vec<FilterItem>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(values.into_iter().map(FilterItem::from).collect())
}

/// Receives notifications while a query is built
///
/// All hooks default to no-ops.
pub trait BuildObserver: Send + Sync {
    /// An input that is not a filter was skipped
    fn skipped(&self, _item: &FilterItem) {}

    /// A filter failed validation and was left out of the expression
    fn rejected(&self, _filter: &Filter, _error: &InvalidQueryValue) {}

    /// A context was produced
    fn built(&self, _context: &QueryContext) {}
}

/// Forwards builder notifications to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn skipped(&self, item: &FilterItem) {
        if item.looks_like_filter() {
            tracing::warn!(item = %item, "Skipping malformed filter");
        } else {
            tracing::debug!(item = %item, "Skipping non-filter input");
        }
    }

    fn rejected(&self, filter: &Filter, error: &InvalidQueryValue) {
        tracing::warn!(filter = filter.kind(), error = %error, "Filter rejected");
    }

    fn built(&self, context: &QueryContext) {
        tracing::debug!(
            query = %context.query_str(),
            errors = context.errors().len(),
            "Built query context"
        );
    }
}

/// Result of a build: the combined expression plus everything needed to
/// explain how it was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryContext {
    query_str: String,
    filters: Vec<FilterItem>,
    errors: Vec<String>,
    fact_query: String,
}

impl QueryContext {
    /// An empty `fact_query` falls back to [`DEFAULT_FACT_QUERY`]
    pub fn new(
        query_str: impl Into<String>,
        filters: Vec<FilterItem>,
        fact_query: Option<String>,
        errors: Vec<String>,
    ) -> Self {
        let fact_query = fact_query
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FACT_QUERY.to_string());
        Self {
            query_str: query_str.into(),
            filters,
            errors,
            fact_query,
        }
    }

    /// Combined expression of all filters that passed validation
    pub fn query_str(&self) -> &str {
        &self.query_str
    }

    /// The inputs the context was built from, in order
    pub fn filters(&self) -> &[FilterItem] {
        &self.filters
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn fact_query(&self) -> &str {
        &self.fact_query
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Default for QueryContext {
    fn default() -> Self {
        Self::new("", Vec::new(), None, Vec::new())
    }
}

/// Composes filters into a [`QueryContext`]
///
/// Holds no per-build state, so one builder can be shared across threads.
#[derive(Clone, Default)]
pub struct QueryBuilder {
    observer: Option<Arc<dyn BuildObserver>>,
    fact_query: Option<String>,
}

impl fmt::Debug for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("observer", &self.observer.is_some())
            .field("fact_query", &self.fact_query)
            .finish()
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that reports to `tracing`
    pub fn verbose() -> Self {
        Self::new().with_observer(Arc::new(TracingObserver))
    }

    pub fn with_observer(mut self, observer: Arc<dyn BuildObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Override the base fact predicate of built contexts
    pub fn with_fact_query(mut self, fact_query: impl Into<String>) -> Self {
        self.fact_query = Some(fact_query.into());
        self
    }

    /// Build a context from filter inputs. Never fails.
    pub fn build<I, T>(&self, items: I) -> QueryContext
    where
        I: IntoIterator<Item = T>,
        T: Into<FilterItem>,
    {
        let items: Vec<FilterItem> = items.into_iter().map(Into::into).collect();
        let mut fragments: Vec<String> = Vec::with_capacity(items.len());
        let mut errors = Vec::new();

        for item in &items {
            let Some(filter) = item.as_filter() else {
                if let Some(observer) = &self.observer {
                    observer.skipped(item);
                }
                continue;
            };

            match filter.validate() {
                Ok(()) => {
                    let fragment = filter.to_query();
                    // Empty fragments would leave a dangling connective
                    if !fragment.is_empty() {
                        fragments.push(fragment);
                    }
                }
                Err(e) => {
                    if let Some(observer) = &self.observer {
                        observer.rejected(filter, &e);
                    }
                    errors.push(format!("Filter failed validation: {}", e));
                }
            }
        }

        let context = QueryContext::new(
            fragments.join(AND),
            items,
            self.fact_query.clone(),
            errors,
        );
        if let Some(observer) = &self.observer {
            observer.built(&context);
        }
        context
    }
}
