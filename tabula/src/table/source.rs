//! Where rows come from.

use std::fmt;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::row::RowRef;

/// Row input for [`Table::set_items`](super::Table::set_items).
///
/// Either a fixed list, or a stream whose every item is a complete
/// replacement of the row collection. Partial updates are not supported: each
/// snapshot stands on its own.
///
/// Rows are held as [`RowRef`] handles. Passing plain rows gives each one a
/// fresh identity; pass handles you keep if you need to select rows by
/// identity later.
pub enum RowSource<T> {
    /// A fixed list of rows.
    Static(Vec<RowRef<T>>),
    /// A push stream of full row snapshots.
    Stream(BoxStream<'static, Vec<RowRef<T>>>),
}

impl<T: Send + Sync + 'static> RowSource<T> {
    /// A fixed list of plain rows.
    pub fn rows(rows: Vec<T>) -> Self {
        RowSource::Static(rows.into_iter().map(RowRef::new).collect())
    }

    /// A fixed list of shared rows.
    pub fn shared(rows: Vec<RowRef<T>>) -> Self {
        RowSource::Static(rows)
    }

    /// A stream of plain-row snapshots.
    pub fn stream(stream: impl Stream<Item = Vec<T>> + Send + 'static) -> Self {
        RowSource::Stream(
            stream
                .map(|rows| rows.into_iter().map(RowRef::new).collect())
                .boxed(),
        )
    }

    /// A stream of shared-row snapshots.
    pub fn shared_stream(stream: impl Stream<Item = Vec<RowRef<T>>> + Send + 'static) -> Self {
        RowSource::Stream(stream.boxed())
    }
}

impl<T: Send + Sync + 'static> From<Vec<T>> for RowSource<T> {
    fn from(rows: Vec<T>) -> Self {
        RowSource::rows(rows)
    }
}

impl<T> fmt::Debug for RowSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSource::Static(rows) => write!(f, "RowSource::Static({} rows)", rows.len()),
            RowSource::Stream(_) => f.write_str("RowSource::Stream(..)"),
        }
    }
}
