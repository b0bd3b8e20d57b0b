//! Change notifications and input handling results.
//!
//! The table never calls back into the rendering layer. Mutations queue a
//! [`TableEvent`] and raise the dirty flag; the host drains the queue on its
//! own turn and re-renders from the new state.

use crate::row::RowRef;
use crate::table::Column;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// A notification emitted by the table.
#[derive(Debug)]
pub enum TableEvent<T> {
    /// The derived (filtered and sorted) sequence was recomputed.
    ///
    /// Always carries the whole sequence; consumers replace, never patch.
    SortedChanged(Vec<RowRef<T>>),
    /// The selection changed. Carries the ordered selected list.
    SelectionChanged(Vec<RowRef<T>>),
    /// A column drag committed a new column order.
    ColumnOrderChanged(Vec<Column>),
    /// A row was activated (Enter on the selection, or double click).
    Activated(RowRef<T>),
}

impl<T> TableEvent<T> {
    /// Short name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TableEvent::SortedChanged(_) => "sorted_changed",
            TableEvent::SelectionChanged(_) => "selection_changed",
            TableEvent::ColumnOrderChanged(_) => "column_order_changed",
            TableEvent::Activated(_) => "activated",
        }
    }
}

impl<T> Clone for TableEvent<T> {
    fn clone(&self) -> Self {
        match self {
            TableEvent::SortedChanged(rows) => TableEvent::SortedChanged(rows.clone()),
            TableEvent::SelectionChanged(rows) => TableEvent::SelectionChanged(rows.clone()),
            TableEvent::ColumnOrderChanged(columns) => {
                TableEvent::ColumnOrderChanged(columns.clone())
            }
            TableEvent::Activated(row) => TableEvent::Activated(row.clone()),
        }
    }
}
