//! Row visibility.

use std::fmt;
use std::sync::Arc;

use crate::row::{RowRef, TableRow};

/// A custom visibility predicate.
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A case-insensitive substring query over a set of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// The text to look for.
    pub query: String,
    /// Fields searched, in order.
    pub fields: Vec<String>,
}

impl FilterQuery {
    /// Create a new query.
    pub fn new<I, S>(query: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// A query restricts rows only when both the text and the field list are non-empty.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() && !self.fields.is_empty()
    }

    /// Check a row: some listed field's lower-cased string form contains the
    /// lower-cased query. Missing fields read as empty.
    pub fn matches<T: TableRow + ?Sized>(&self, row: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.query.to_lowercase();
        self.fields.iter().any(|field| {
            row.field(field)
                .map(|value| value.to_string().to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }
}

/// A filter command for [`Table::set_filter`](super::Table::set_filter).
pub enum Filter<T> {
    /// Show rows the predicate accepts.
    Predicate(Predicate<T>),
    /// Show rows matching a substring query.
    Query(FilterQuery),
}

impl<T> Filter<T> {
    /// Build a predicate filter from a closure.
    ///
    /// The closure runs while the table holds its internal lock. It must not
    /// call methods on the table it filters, or it deadlocks. Capture any
    /// state it needs (another table, a shared set) instead.
    pub fn predicate(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Filter::Predicate(Arc::new(f))
    }

    /// Build a query filter.
    pub fn query<I, S>(query: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::Query(FilterQuery::new(query, fields))
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Predicate(_) => f.write_str("Filter::Predicate(..)"),
            Filter::Query(query) => f.debug_tuple("Filter::Query").field(query).finish(),
        }
    }
}

/// The active filters. The predicate wins over the query when both are set.
pub struct FilterState<T> {
    predicate: Option<Predicate<T>>,
    query: Option<FilterQuery>,
}

impl<T> Default for FilterState<T> {
    fn default() -> Self {
        Self {
            predicate: None,
            query: None,
        }
    }
}

impl<T> fmt::Debug for FilterState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("predicate", &self.predicate.is_some())
            .field("query", &self.query)
            .finish()
    }
}

impl<T: TableRow> FilterState<T> {
    /// Create an empty filter state (everything visible).
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a filter into its slot, keeping the other slot.
    pub fn set(&mut self, filter: Filter<T>) {
        match filter {
            Filter::Predicate(predicate) => self.predicate = Some(predicate),
            Filter::Query(query) => self.query = Some(query),
        }
    }

    /// Remove the predicate.
    pub fn clear_predicate(&mut self) {
        self.predicate = None;
    }

    /// Remove the query.
    pub fn clear_query(&mut self) {
        self.query = None;
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.predicate = None;
        self.query = None;
    }

    /// The configured query, if any.
    pub fn query(&self) -> Option<&FilterQuery> {
        self.query.as_ref()
    }

    /// Whether any filter restricts rows.
    pub fn is_active(&self) -> bool {
        self.predicate.is_some() || self.query.as_ref().is_some_and(FilterQuery::is_active)
    }

    /// Decide if a row is visible.
    pub fn is_visible(&self, row: &T) -> bool {
        if let Some(predicate) = &self.predicate {
            return predicate(row);
        }
        match &self.query {
            Some(query) => query.matches(row),
            None => true,
        }
    }

    /// Keep the visible rows, in order.
    pub fn apply(&self, rows: &[RowRef<T>]) -> Vec<RowRef<T>> {
        if !self.is_active() {
            return rows.to_vec();
        }
        rows.iter().filter(|row| self.is_visible(row)).cloned().collect()
    }
}
