//! Table engine state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use futures::FutureExt;
use futures::StreamExt;
use futures::stream::BoxStream;
use log::{debug, trace};

use crate::error::TableError;
use crate::events::{EventResult, TableEvent};
use crate::keys::{Key, KeyCombo, Modifiers};
use crate::row::{RowRef, TableRow};
use crate::viewport::{ScrollAdjustment, Viewport, VisibleRange};

use super::column::{Column, ColumnWidth};
use super::config::TableConfig;
use super::filter::{Filter, FilterQuery, FilterState};
use super::layout::{ColumnLayout, DragPreview, HeaderBox};
use super::navigation::{Navigation, navigate};
use super::selection::{Selection, SelectionMode};
use super::sort::{SortDirection, SortState, compare};
use super::source::RowSource;

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// A stored replacing stream, tagged with the `set_items` call that installed it.
type SourceSlot<T> = Option<(u64, BoxStream<'static, Vec<RowRef<T>>>)>;

/// Internal state for the Table.
pub(super) struct TableInner<T> {
    /// Configuration.
    pub config: TableConfig,
    /// The row collection, in source order.
    pub items: Vec<RowRef<T>>,
    /// Filtered then sorted view of `items`.
    pub derived: Vec<RowRef<T>>,
    /// Sort state.
    pub sort: SortState,
    /// Filters.
    pub filter: FilterState<T>,
    /// Selected rows.
    pub selection: Selection<T>,
    /// Columns and header drag.
    pub layout: ColumnLayout,
    /// Attached virtual-scroll viewport.
    pub viewport: Option<Box<dyn Viewport>>,
    /// Rendered window reported by the viewport.
    pub visible: VisibleRange,
    /// Pending notifications.
    pub events: Vec<TableEvent<T>>,
    /// Bumped on every `set_items`; stale stream snapshots are dropped.
    pub source_generation: u64,
}

impl<T: TableRow> TableInner<T> {
    fn new(layout: ColumnLayout, config: TableConfig) -> Self {
        let sort = SortState::new(config.default_sort.clone(), config.default_sort_direction);
        Self {
            config,
            items: Vec::new(),
            derived: Vec::new(),
            sort,
            filter: FilterState::new(),
            selection: Selection::new(),
            layout,
            viewport: None,
            visible: VisibleRange::default(),
            events: Vec::new(),
            source_generation: 0,
        }
    }

    /// Recompute the derived sequence: filter, then sort.
    fn rederive(&mut self) {
        let mut derived = self.filter.apply(&self.items);
        if let Some(field) = self.sort.field() {
            let direction = self.sort.direction();
            derived.sort_by(|a, b| compare(&**a, &**b, field, direction));
        }
        trace!(
            "derived {} of {} rows (sort {:?})",
            derived.len(),
            self.items.len(),
            self.sort.field()
        );
        self.derived = derived;
        self.events.push(TableEvent::SortedChanged(self.derived.clone()));
    }

    fn replace_items(&mut self, items: Vec<RowRef<T>>) {
        self.items = items;
        self.rederive();
    }

    fn push_selection_event(&mut self) {
        self.events
            .push(TableEvent::SelectionChanged(self.selection.selected().to_vec()));
    }

    fn select_single(&mut self, row: RowRef<T>) -> bool {
        if self.config.selection_mode == SelectionMode::None {
            return false;
        }
        self.selection.select_single(row);
        self.push_selection_event();
        true
    }

    fn select_toggle(&mut self, row: RowRef<T>) -> bool {
        match self.config.selection_mode {
            SelectionMode::None => false,
            SelectionMode::Single => self.select_single(row),
            SelectionMode::Multiple => {
                self.selection.toggle(row);
                self.push_selection_event();
                true
            }
        }
    }

    /// Scroll the viewport so the derived row at `index` is fully visible.
    fn scroll_into_view(&mut self, index: usize) -> Option<ScrollAdjustment> {
        let item_height = self.config.effective_item_height();
        let viewport = self.viewport.as_mut()?;
        let scroll_top = viewport.measure_scroll_offset();
        let adjustment =
            ScrollAdjustment::for_row(index, item_height, scroll_top, viewport.viewport_size())?;
        viewport.scroll_to_offset(adjustment.apply(scroll_top));
        trace!("scrolled {:?} to reveal row {}", adjustment, index);
        Some(adjustment)
    }
}

/// The data-table engine.
///
/// `Table<T>` owns a row collection and derives from it:
/// - a filtered and sorted sequence, recomputed in full on every change
/// - an identity-based selection (single or multi-select)
/// - keyboard navigation with scroll-into-view against a [`Viewport`]
/// - column order with live header drag-reorder
///
/// Changes are reported as [`TableEvent`]s, collected with
/// [`drain_events`](Table::drain_events). `Table` is a cheap handle: clones
/// share the same state and every call takes the internal lock once.
pub struct Table<T: TableRow> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TableInner<T>>>,
    /// Replacing stream installed by `set_items`, pulled by the host.
    source: Arc<Mutex<SourceSlot<T>>>,
    /// Dirty flag for re-render.
    pub(super) dirty: Arc<AtomicBool>,
}

impl<T: TableRow> Table<T> {
    /// Create a table with the given columns and configuration.
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Result<Self, TableError> {
        let layout = ColumnLayout::new(columns)?;
        Ok(Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(layout, config))),
            source: Arc::new(Mutex::new(None)),
            dirty: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Start building a table.
    pub fn builder() -> TableBuilder<T> {
        TableBuilder::new()
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the configuration.
    pub fn config(&self) -> TableConfig {
        self.inner
            .read()
            .map(|g| g.config.clone())
            .unwrap_or_default()
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Replace the row source.
    ///
    /// A static list replaces the collection and re-derives immediately. A
    /// stream is stored; each snapshot it yields replaces the collection when
    /// the host calls [`pump`](Table::pump) or
    /// [`next_snapshot`](Table::next_snapshot). Either way any previously
    /// installed stream is dropped.
    pub fn set_items(&self, source: impl Into<RowSource<T>>) {
        let generation = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            guard.source_generation += 1;
            guard.source_generation
        };

        let stream = match source.into() {
            RowSource::Static(rows) => {
                debug!("{}: {} items set", self.id, rows.len());
                if let Ok(mut guard) = self.inner.write() {
                    guard.replace_items(rows);
                    self.mark_dirty();
                }
                None
            }
            RowSource::Stream(stream) => {
                debug!("{}: items now follow a stream", self.id);
                Some((generation, stream))
            }
        };

        if let Ok(mut slot) = self.source.lock() {
            *slot = stream;
        }
    }

    /// Apply a snapshot if it still belongs to the current source.
    fn apply_snapshot(&self, generation: u64, rows: Vec<RowRef<T>>) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.source_generation == generation
        {
            debug!("{}: snapshot of {} items", self.id, rows.len());
            guard.replace_items(rows);
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Apply every snapshot the stream has ready, without waiting.
    ///
    /// Returns the number of snapshots applied. A finished stream is dropped.
    /// Returns 0 while a [`next_snapshot`](Table::next_snapshot) call is
    /// waiting, since that call holds the stream.
    pub fn pump(&self) -> usize {
        let mut ready = Vec::new();
        if let Ok(mut slot) = self.source.lock() {
            let mut finished = false;
            if let Some((generation, stream)) = slot.as_mut() {
                loop {
                    match stream.next().now_or_never() {
                        Some(Some(rows)) => ready.push((*generation, rows)),
                        Some(None) => {
                            finished = true;
                            break;
                        }
                        None => break,
                    }
                }
            }
            if finished {
                trace!("{}: row stream finished", self.id);
                *slot = None;
            }
        }
        let mut applied = 0;
        for (generation, rows) in ready {
            if self.apply_snapshot(generation, rows) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next snapshot from the stream and apply it.
    ///
    /// Returns `false` if there is no stream, it has finished, or it was
    /// superseded by a newer `set_items` while waiting.
    ///
    /// The stream is taken out of the table for the duration of the wait and
    /// put back once a snapshot arrives. Meanwhile [`has_stream`](Table::has_stream)
    /// reports `false` and [`pump`](Table::pump) finds nothing to pull. Dropping
    /// the future before it completes also puts the stream back.
    pub async fn next_snapshot(&self) -> bool {
        let taken = self.source.lock().ok().and_then(|mut slot| slot.take());
        let Some((generation, stream)) = taken else {
            return false;
        };
        let mut checkout = StreamCheckout {
            table: self,
            generation,
            stream: Some(stream),
        };

        let next = match checkout.stream.as_mut() {
            Some(stream) => stream.next().await,
            None => None,
        };
        let Some(rows) = next else {
            trace!("{}: row stream finished", self.id);
            checkout.stream = None;
            return false;
        };

        drop(checkout);
        self.apply_snapshot(generation, rows)
    }

    /// Put a taken stream back unless a newer source replaced it meanwhile.
    fn restore_stream(&self, generation: u64, stream: BoxStream<'static, Vec<RowRef<T>>>) {
        if let Ok(mut slot) = self.source.lock()
            && slot.is_none()
            && self.source_generation() == generation
        {
            *slot = Some((generation, stream));
        }
    }

    fn source_generation(&self) -> u64 {
        self.inner.read().map(|g| g.source_generation).unwrap_or(0)
    }

    /// Check if a row stream is installed.
    ///
    /// `false` while a [`next_snapshot`](Table::next_snapshot) call is waiting.
    pub fn has_stream(&self) -> bool {
        self.source.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Get the row collection in source order.
    pub fn rows(&self) -> Vec<RowRef<T>> {
        self.inner
            .read()
            .map(|g| g.items.clone())
            .unwrap_or_default()
    }

    /// Get the derived sequence: filtered, then sorted.
    ///
    /// The sequence is rebuilt on every items, filter or sort change. Treat
    /// each result as a replacement, never patch an earlier one.
    pub fn derive(&self) -> Vec<RowRef<T>> {
        self.inner
            .read()
            .map(|g| g.derived.clone())
            .unwrap_or_default()
    }

    /// Get the number of derived rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.derived.len()).unwrap_or(0)
    }

    /// Check if the derived sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a derived row by index.
    pub fn row(&self, index: usize) -> Option<RowRef<T>> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.derived.get(index).cloned())
    }

    /// Find the derived index of a row.
    pub fn index_of(&self, row: &RowRef<T>) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.derived.iter().position(|r| r == row))
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get the sort state.
    pub fn sort_state(&self) -> SortState {
        self.inner
            .read()
            .map(|g| g.sort.clone())
            .unwrap_or_default()
    }

    /// Sort by `field`, as a header click would.
    ///
    /// See [`SortState::toggle`] for how the direction is picked. A column
    /// marked unsortable is ignored. Returns the new field and direction.
    pub fn set_sort(&self, field: &str) -> Option<(String, SortDirection)> {
        let Ok(mut guard) = self.inner.write() else {
            return None;
        };
        if guard.layout.column(field).is_some_and(|c| !c.sortable) {
            debug!("{}: column '{}' is not sortable", self.id, field);
            return None;
        }
        let active = guard.sort.toggle(field).clone();
        debug!("{}: sort by '{}' {:?}", self.id, active.field, active.direction);
        guard.rederive();
        self.mark_dirty();
        Some((active.field, active.direction))
    }

    /// Drop the user-picked sort, falling back to the default.
    pub fn reset_sort(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sort.reset();
            guard.rederive();
            self.mark_dirty();
        }
    }

    /// The sort arrow for a column header, if that column drives the sort.
    pub fn sort_indicator(&self, column: &str) -> Option<SortDirection> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.sort.indicator_for(column))
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Install a filter and re-derive.
    ///
    /// A predicate and a query can both be installed; the predicate decides
    /// until [`clear_predicate`](Table::clear_predicate) removes it.
    ///
    /// The predicate runs while the table is locked and must not call back
    /// into this table.
    pub fn set_filter(&self, filter: Filter<T>) {
        if let Ok(mut guard) = self.inner.write() {
            debug!("{}: filter set {:?}", self.id, filter);
            guard.filter.set(filter);
            guard.rederive();
            self.mark_dirty();
        }
    }

    /// Remove every filter and re-derive.
    pub fn clear_filter(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.filter.clear();
            guard.rederive();
            self.mark_dirty();
        }
    }

    /// Remove the predicate, keeping any query, and re-derive.
    pub fn clear_predicate(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.filter.clear_predicate();
            guard.rederive();
            self.mark_dirty();
        }
    }

    /// Remove the query, keeping any predicate, and re-derive.
    pub fn clear_query(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.filter.clear_query();
            guard.rederive();
            self.mark_dirty();
        }
    }

    /// The installed query, if any.
    pub fn filter_query(&self) -> Option<FilterQuery> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.filter.query().cloned())
    }

    /// Check if any filter restricts rows.
    pub fn is_filtered(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.filter.is_active())
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|g| g.config.selection_mode)
            .unwrap_or_default()
    }

    /// Set the selection mode. Switching to `None` clears the selection.
    pub fn set_selection_mode(&self, mode: SelectionMode) {
        if let Ok(mut guard) = self.inner.write() {
            guard.config.selection_mode = mode;
            if mode == SelectionMode::None && !guard.selection.is_empty() {
                guard.selection.clear();
                guard.push_selection_event();
            }
            self.mark_dirty();
        }
    }

    /// Get the selected rows, in selection order.
    pub fn selected(&self) -> Vec<RowRef<T>> {
        self.inner
            .read()
            .map(|g| g.selection.selected().to_vec())
            .unwrap_or_default()
    }

    /// Check if a row is selected.
    pub fn is_selected(&self, row: &RowRef<T>) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(row))
            .unwrap_or(false)
    }

    /// Check if the derived row at `index` is selected.
    pub fn is_selected_at(&self, index: usize) -> bool {
        self.inner
            .read()
            .map(|g| {
                g.derived
                    .get(index)
                    .is_some_and(|row| g.selection.is_selected(row))
            })
            .unwrap_or(false)
    }

    /// Select exactly one row.
    ///
    /// The row need not be in the derived sequence. Ignored when selection is
    /// disabled. Returns `true` if the selection changed.
    pub fn select_single(&self, row: &RowRef<T>) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.select_single(row.clone())
        {
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Toggle a row in multi-select mode; select it alone in single mode.
    pub fn select_toggle(&self, row: &RowRef<T>) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.select_toggle(row.clone())
        {
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Handle a click on a row.
    ///
    /// In multi-select mode the toggle modifier (meta or ctrl) toggles the
    /// row; otherwise the row becomes the only selection.
    pub fn select(&self, row: &RowRef<T>, modifiers: Modifiers) -> bool {
        if modifiers.toggles_selection() {
            self.select_toggle(row)
        } else {
            self.select_single(row)
        }
    }

    /// Replace the selection with an externally supplied list.
    pub fn replace_selection(&self, rows: &[RowRef<T>]) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selection.replace(rows.iter().cloned());
            guard.push_selection_event();
            self.mark_dirty();
        }
    }

    /// Clear the selection. Returns the rows that were deselected.
    pub fn clear_selection(&self) -> Vec<RowRef<T>> {
        if let Ok(mut guard) = self.inner.write()
            && !guard.selection.is_empty()
        {
            let removed = guard.selection.clear();
            guard.push_selection_event();
            self.mark_dirty();
            return removed;
        }
        vec![]
    }

    /// Activate a row (double click).
    pub fn activate(&self, row: &RowRef<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.events.push(TableEvent::Activated(row.clone()));
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    /// Handle a key press.
    ///
    /// - Enter activates the first selected row
    /// - Up/Down select the neighbouring derived row and scroll the attached
    ///   viewport to keep it visible; with nothing selected they select the
    ///   first row
    pub fn handle_key(&self, key: impl Into<KeyCombo>) -> EventResult {
        let key = key.into();
        let Ok(mut guard) = self.inner.write() else {
            return EventResult::Ignored;
        };
        let moves = matches!(key.key, Key::Up | Key::Down);
        if moves && guard.config.selection_mode == SelectionMode::None {
            return EventResult::Ignored;
        }

        let navigation = navigate(key.key, &guard.derived, guard.selection.first());
        trace!("{}: key {:?} -> {}", self.id, key.key, navigation_kind(&navigation));
        match navigation {
            Navigation::None => EventResult::Ignored,
            Navigation::Activate(row) => {
                guard.events.push(TableEvent::Activated(row));
                self.mark_dirty();
                EventResult::Consumed
            }
            Navigation::SelectFirst(row) => {
                guard.select_single(row);
                self.mark_dirty();
                EventResult::Consumed
            }
            Navigation::Move { row, index } => {
                guard.select_single(row);
                guard.scroll_into_view(index);
                self.mark_dirty();
                EventResult::Consumed
            }
        }
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Attach the virtual-scroll viewport used for scroll-into-view.
    pub fn attach_viewport(&self, viewport: impl Viewport + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport = Some(Box::new(viewport));
        }
    }

    /// Detach the viewport.
    pub fn detach_viewport(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport = None;
        }
    }

    /// The attached viewport's scroll offset.
    pub fn scroll_offset(&self) -> Option<f64> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.viewport.as_ref().map(|v| v.measure_scroll_offset()))
    }

    /// Record the rendered window reported by the viewport.
    pub fn on_visible_range_changed(&self, range: VisibleRange) {
        if let Ok(mut guard) = self.inner.write()
            && guard.visible != range
        {
            trace!("{}: visible range {}..{}", self.id, range.start, range.end);
            guard.visible = range;
            self.mark_dirty();
        }
    }

    /// Get the rendered window.
    pub fn visible_range(&self) -> VisibleRange {
        self.inner.read().map(|g| g.visible).unwrap_or_default()
    }

    /// Get the derived rows inside the rendered window.
    pub fn visible_rows(&self) -> Vec<RowRef<T>> {
        self.inner
            .read()
            .map(|g| g.derived[g.visible.clamp(g.derived.len())].to_vec())
            .unwrap_or_default()
    }

    /// Total height for hosts that size the table to its content:
    /// derived rows times row height, plus the header allowance.
    pub fn height(&self) -> f64 {
        self.inner
            .read()
            .map(|g| {
                let rows = g.derived.len() as f64 * g.config.effective_item_height();
                rows + g.config.header_allowance
            })
            .unwrap_or(0.0)
    }

    /// The height to apply, only when auto height is enabled.
    pub fn auto_height(&self) -> Option<f64> {
        self.config().auto_height.then(|| self.height())
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Columns in display order.
    pub fn columns(&self) -> Vec<Column> {
        self.inner
            .read()
            .map(|g| g.layout.columns())
            .unwrap_or_default()
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<Column> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.layout.column(name).cloned())
    }

    /// Set a column's width. Unknown columns and invalid widths are ignored.
    pub fn set_column_width(&self, name: &str, width: impl Into<ColumnWidth>) -> bool {
        if let Ok(mut guard) = self.inner.write()
            && guard.layout.set_width(name, width.into())
        {
            self.mark_dirty();
            return true;
        }
        false
    }

    /// Header geometry from declared widths, in display order.
    pub fn header_boxes(&self, total_width: f64) -> Vec<HeaderBox> {
        self.inner
            .read()
            .map(|g| g.layout.header_boxes(total_width))
            .unwrap_or_default()
    }

    /// Start dragging the header at display index `index`.
    ///
    /// `boxes` are the measured header cells in display order. Restarts any
    /// drag already in progress.
    pub fn begin_column_drag(&self, index: usize, boxes: &[HeaderBox]) -> bool {
        self.inner
            .write()
            .map(|mut g| g.layout.begin_drag(index, boxes))
            .unwrap_or(false)
    }

    /// Move the dragged header. Returns the candidate index.
    pub fn update_column_drag(&self, delta_x: f64) -> Option<usize> {
        let candidate = self
            .inner
            .write()
            .ok()
            .and_then(|mut g| g.layout.update_drag(delta_x));
        if candidate.is_some() {
            self.mark_dirty();
        }
        candidate
    }

    /// Release the dragged header. Returns `true` if the order changed.
    pub fn end_column_drag(&self) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let was_dragging = guard.layout.is_dragging();
        let committed = guard.layout.end_drag();
        if was_dragging {
            self.mark_dirty();
        }
        match committed {
            Some(columns) => {
                guard.events.push(TableEvent::ColumnOrderChanged(columns));
                true
            }
            None => false,
        }
    }

    /// Abandon the drag without reordering.
    pub fn cancel_column_drag(&self) {
        if let Ok(mut guard) = self.inner.write()
            && guard.layout.cancel_drag()
        {
            self.mark_dirty();
        }
    }

    /// Preview of the active drag.
    pub fn drag_preview(&self) -> Option<DragPreview> {
        self.inner.read().ok().and_then(|g| g.layout.drag_preview())
    }

    // -------------------------------------------------------------------------
    // Events and dirty tracking
    // -------------------------------------------------------------------------

    /// Take every pending notification, oldest first.
    pub fn drain_events(&self) -> Vec<TableEvent<T>> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.events))
            .unwrap_or_default()
    }

    /// Check if the table has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

fn navigation_kind<T>(navigation: &Navigation<T>) -> &'static str {
    match navigation {
        Navigation::None => "none",
        Navigation::Activate(_) => "activate",
        Navigation::SelectFirst(_) => "select_first",
        Navigation::Move { .. } => "move",
    }
}

/// A stream taken out of its slot by `next_snapshot`; restored on drop.
struct StreamCheckout<'a, T: TableRow> {
    table: &'a Table<T>,
    generation: u64,
    stream: Option<BoxStream<'static, Vec<RowRef<T>>>>,
}

impl<T: TableRow> Drop for StreamCheckout<'_, T> {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.table.restore_stream(self.generation, stream);
        }
    }
}

impl<T: TableRow> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            source: Arc::clone(&self.source),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: TableRow> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &self.len())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

/// Builder for [`Table`].
///
/// # Example
///
/// ```
/// use tabula::{Column, Record, SelectionMode, Table, TableConfig};
///
/// let table = Table::<Record>::builder()
///     .column(Column::new("name"))
///     .column(Column::new("age").unsortable())
///     .config(TableConfig::default().with_selection_mode(SelectionMode::Single))
///     .rows(vec![Record::new().set("name", "Ada").set("age", 36)])
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 1);
/// ```
pub struct TableBuilder<T> {
    columns: Vec<Column>,
    config: TableConfig,
    source: Option<RowSource<T>>,
}

impl<T: TableRow> TableBuilder<T> {
    /// Create a builder with no columns and the default configuration.
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            config: TableConfig::default(),
            source: None,
        }
    }

    /// Add a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Add several columns.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Set the configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial rows.
    pub fn rows(mut self, rows: Vec<T>) -> Self {
        self.source = Some(RowSource::rows(rows));
        self
    }

    /// Set the initial row source.
    pub fn source(mut self, source: RowSource<T>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the table, validating the columns.
    pub fn build(self) -> Result<Table<T>, TableError> {
        let table = Table::new(self.columns, self.config)?;
        match self.source {
            Some(source) => table.set_items(source),
            None => {
                if let Ok(mut guard) = table.inner.write() {
                    guard.rederive();
                }
            }
        }
        Ok(table)
    }
}

impl<T: TableRow> Default for TableBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
