//! Table engine - sorting, filtering, selection, keyboard navigation and
//! column drag-reorder over a collection of rows.
//!
//! The engine is headless. It provides:
//! - A derived sequence (filtered, then sorted) rebuilt on every change
//! - Header-click sorting with a configurable default sort
//! - Identity-based row selection (single or multi-select)
//! - Up/Down/Enter navigation that scrolls a [`Viewport`](crate::Viewport)
//! - Column order with a live header drag-reorder preview
//!
//! # Example
//!
//! ```
//! use tabula::{Column, Key, Record, SelectionMode, Table, TableConfig, TableEvent};
//!
//! let table = Table::<Record>::builder()
//!     .columns([Column::new("name"), Column::new("age")])
//!     .config(TableConfig::default().with_selection_mode(SelectionMode::Single))
//!     .rows(vec![
//!         Record::new().set("name", "Grace").set("age", 45),
//!         Record::new().set("name", "Ada").set("age", 36),
//!     ])
//!     .build()
//!     .unwrap();
//!
//! table.set_sort("age");
//! table.handle_key(Key::Down);
//!
//! let first = table.row(0).unwrap();
//! assert_eq!(first.get_string("name").unwrap(), Some("Ada"));
//! assert!(table.is_selected(&first));
//!
//! let events = table.drain_events();
//! assert!(events.iter().any(|e| matches!(e, TableEvent::SelectionChanged(_))));
//! ```

mod column;
mod config;
mod filter;
mod layout;
mod navigation;
mod selection;
mod sort;
mod source;
mod state;

pub use column::{Column, ColumnWidth};
pub use config::TableConfig;
pub use filter::{Filter, FilterQuery, FilterState, Predicate};
pub use layout::{ColumnDrag, ColumnLayout, DragPreview, DragState, HeaderBox, ProvisionalBox};
pub use navigation::{Navigation, navigate};
pub use selection::{Selection, SelectionMode};
pub use sort::{ActiveSort, SortDirection, SortState, compare, compare_values};
pub use source::RowSource;
pub use state::{Table, TableBuilder, TableId};
