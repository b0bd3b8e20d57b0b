//! Headless data-table engine
//!
//! `tabula` keeps the state behind an interactive data table: the rows, the
//! filtered and sorted view of them, which rows are selected, keyboard
//! navigation and column ordering. Rendering is left to the host, which reads
//! the derived rows and reacts to [`TableEvent`]s.

pub mod error;
pub mod events;
pub mod keys;
pub mod record;
pub mod row;
pub mod table;
pub mod value;
pub mod viewport;

pub use error::{FieldError, ParseWidthError, TableError};
pub use events::{EventResult, TableEvent};
pub use keys::{Key, KeyCombo, Modifiers};
pub use record::Record;
pub use row::{RowRef, TableRow};
pub use table::{
    Column, ColumnWidth, DragPreview, Filter, FilterQuery, HeaderBox, RowSource, SelectionMode,
    SortDirection, Table, TableBuilder, TableConfig, TableId,
};
pub use value::Value;
pub use viewport::{FixedViewport, ScrollAdjustment, Viewport, VisibleRange};
