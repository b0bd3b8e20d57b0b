//! Table configuration

use serde::Deserialize;
use serde::Serialize;

use super::selection::SelectionMode;
use super::sort::SortDirection;

/// Configuration for a [`Table`](super::Table).
///
/// # Example
///
/// ```
/// use tabula::{SelectionMode, SortDirection, TableConfig};
///
/// let config = TableConfig::default()
///     .with_item_height(30.0)
///     .with_default_sort("name", SortDirection::Desc)
///     .with_selection_mode(SelectionMode::Multiple);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Height of every row in pixels. Virtual scrolling depends on it.
    ///
    /// Default: 23
    pub item_height: f64,

    /// Extra height added for the header when computing the auto height.
    ///
    /// Default: 25
    pub header_allowance: f64,

    /// Whether the header row is shown.
    ///
    /// Default: true
    pub show_header: bool,

    /// Whether the table height follows the number of derived rows.
    ///
    /// Default: false
    pub auto_height: bool,

    /// Field sorted by until the user picks another.
    ///
    /// Default: none
    pub default_sort: Option<String>,

    /// Direction used for the default sort and for newly sorted fields.
    ///
    /// Default: ascending
    pub default_sort_direction: SortDirection,

    /// Whether and how rows can be selected.
    ///
    /// Default: [`SelectionMode::None`]
    pub selection_mode: SelectionMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            item_height: 23.0,
            header_allowance: 25.0,
            show_header: true,
            auto_height: false,
            default_sort: None,
            default_sort_direction: SortDirection::Asc,
            selection_mode: SelectionMode::None,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row height.
    pub fn with_item_height(mut self, height: f64) -> Self {
        self.item_height = height;
        self
    }

    /// Sets the header allowance.
    pub fn with_header_allowance(mut self, height: f64) -> Self {
        self.header_allowance = height;
        self
    }

    /// Shows or hides the header.
    pub fn with_show_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    /// Enables or disables auto height.
    pub fn with_auto_height(mut self, auto: bool) -> Self {
        self.auto_height = auto;
        self
    }

    /// Sets the default sort field and direction.
    pub fn with_default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(field.into());
        self.default_sort_direction = direction;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Row height with non-finite or negative values normalized to zero.
    pub(crate) fn effective_item_height(&self) -> f64 {
        if self.item_height.is_finite() && self.item_height > 0.0 {
            self.item_height
        } else {
            0.0
        }
    }
}
