//! Selection state management.
//!
//! Selection is tracked by row identity, not by value: two rows with the same
//! field values are separate entries. Alongside the identity set the model
//! keeps the ordered `selected` list the host sees, and every mutation keeps
//! the two in step.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::row::RowRef;

/// Selection mode for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed
    #[default]
    None,
    /// Single row selection
    Single,
    /// Multiple rows can be selected (modifier+click toggles)
    Multiple,
}

/// Identity-based selection state.
#[derive(Debug)]
pub struct Selection<T> {
    /// Selected rows in the order they were selected
    selected: Vec<RowRef<T>>,
    /// Identity lookup for `selected`
    lookup: HashSet<RowRef<T>>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            lookup: HashSet::new(),
        }
    }
}

impl<T> Clone for Selection<T> {
    fn clone(&self) -> Self {
        Self {
            selected: self.selected.clone(),
            lookup: self.lookup.clone(),
        }
    }
}

impl<T> Selection<T> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selected rows, in selection order.
    pub fn selected(&self) -> &[RowRef<T>] {
        &self.selected
    }

    /// Get the first selected row.
    pub fn first(&self) -> Option<&RowRef<T>> {
        self.selected.first()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: &RowRef<T>) -> bool {
        self.lookup.contains(row)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the rows that were deselected.
    pub fn clear(&mut self) -> Vec<RowRef<T>> {
        self.lookup.clear();
        std::mem::take(&mut self.selected)
    }

    /// Select exactly one row, dropping everything else.
    pub fn select_single(&mut self, row: RowRef<T>) {
        self.lookup.clear();
        self.lookup.insert(row.clone());
        self.selected.clear();
        self.selected.push(row);
    }

    /// Toggle a row (modifier+click behavior).
    ///
    /// A selected row is removed; any other row is appended to the end.
    /// Returns `true` if the row is selected afterwards.
    pub fn toggle(&mut self, row: RowRef<T>) -> bool {
        if self.lookup.remove(&row) {
            self.selected.retain(|r| r != &row);
            false
        } else {
            self.lookup.insert(row.clone());
            self.selected.push(row);
            true
        }
    }

    /// Replace the selection with an externally supplied ordered list.
    ///
    /// Repeated handles collapse to their first occurrence.
    pub fn replace(&mut self, rows: impl IntoIterator<Item = RowRef<T>>) {
        self.lookup.clear();
        self.selected.clear();
        for row in rows {
            if self.lookup.insert(row.clone()) {
                self.selected.push(row);
            }
        }
    }
}
