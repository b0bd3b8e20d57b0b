//! Column order, widths and the header drag-reorder gesture.
//!
//! Columns keep their declaration order forever; the display order is
//! resolved from effective positions. Dragging a header is a small state
//! machine:
//!
//! ```text
//! Idle --begin_drag--> Dragging --update_drag--> Dragging
//!   ^                     |
//!   +-----end_drag--------+   (commit if the candidate index moved)
//! ```
//!
//! While dragging, only the transient [`ColumnDrag`] changes. The committed
//! order is rewritten once, on release.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::error::TableError;

use super::column::{Column, ColumnWidth};

/// Measured geometry of one header cell, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeaderBox {
    /// Left edge in pixels, relative to the header row.
    pub left: f64,
    /// Width in pixels.
    pub width: f64,
}

impl HeaderBox {
    /// Create a new header box.
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Horizontal midpoint.
    pub fn midpoint(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// A header cell captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProvisionalBox {
    /// Geometry at drag start.
    pub header: HeaderBox,
    /// Declaration index of the column in this cell.
    pub column: usize,
    /// Horizontal nudge the renderer should apply to preview the drop.
    pub offset: f64,
}

/// Transient state of one header drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDrag {
    /// Display index of the dragged column when the drag started.
    pub original_position: usize,
    /// Display index the column would land on if released now.
    pub candidate: usize,
    /// Every header cell, in display order.
    pub boxes: Vec<ProvisionalBox>,
    /// Current horizontal pointer delta.
    pub delta_x: f64,
}

impl ColumnDrag {
    fn dragged(&self) -> &ProvisionalBox {
        &self.boxes[self.original_position]
    }

    /// Left edge of the dragged header after applying the pointer delta.
    pub fn dragged_left(&self) -> f64 {
        self.dragged().header.left + self.delta_x
    }

    /// Move the pointer and recompute the candidate index and nudges.
    ///
    /// A box before the dragged column whose midpoint lies right of the
    /// dragged left edge makes way to the right and pulls the candidate down
    /// to its index. A box after it whose midpoint lies left of the dragged
    /// right edge makes way to the left and pushes the candidate up.
    fn update(&mut self, delta_x: f64) {
        self.delta_x = delta_x;
        let original = self.original_position;
        let width = self.dragged().header.width;
        let left = self.dragged_left();
        let right = left + width;

        let mut candidate = original;
        for (i, b) in self.boxes.iter_mut().enumerate() {
            if i == original {
                continue;
            }
            b.offset = 0.0;
            let midpoint = b.header.midpoint();
            if i < original && midpoint > left {
                b.offset = width;
                candidate = candidate.min(i);
            }
            if i > original && midpoint < right {
                b.offset = -width;
                candidate = candidate.max(i);
            }
        }
        self.candidate = candidate;
    }
}

/// Header drag state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A header is being dragged.
    Dragging(ColumnDrag),
}

/// Read-only view of an active drag, for rendering the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPreview {
    /// Name of the dragged column.
    pub column: String,
    /// Left edge of the dragged header.
    pub dragged_left: f64,
    /// Display index the column would land on.
    pub candidate: usize,
    /// Nudge per header cell in display order (0 for the dragged one).
    pub offsets: Vec<f64>,
}

/// Column definitions with their resolved display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Definitions in declaration order.
    columns: Vec<Column>,
    /// Display order as declaration indices.
    order: Vec<usize>,
    /// Drag gesture state.
    drag: DragState,
}

impl ColumnLayout {
    /// Build a layout, rejecting duplicate names and invalid widths.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::duplicate_column(&column.name));
            }
            if let Some(width) = &column.rejected_width {
                return Err(TableError::invalid_width(&column.name, width));
            }
            if !column.width.is_valid() {
                return Err(TableError::invalid_width(&column.name, column.width.to_string()));
            }
        }
        let mut layout = Self {
            order: Vec::with_capacity(columns.len()),
            columns,
            drag: DragState::Idle,
        };
        layout.resolve();
        Ok(layout)
    }

    /// Recompute the display order.
    ///
    /// Stable sort by effective position; columns without one follow all
    /// positioned columns in declaration order.
    fn resolve(&mut self) {
        let mut order: Vec<usize> = (0..self.columns.len()).collect();
        order.sort_by_key(|&i| match self.columns[i].effective_position() {
            Some(position) => (0, position),
            None => (1, 0),
        });
        self.order = order;
    }

    // -------------------------------------------------------------------------
    // Column access
    // -------------------------------------------------------------------------

    /// Columns in display order.
    pub fn columns(&self) -> Vec<Column> {
        self.iter().cloned().collect()
    }

    /// Iterate columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.order.iter().map(|&i| &self.columns[i])
    }

    /// Columns in declaration order.
    pub fn declared(&self) -> &[Column] {
        &self.columns
    }

    /// Display order as declaration indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Set a column's width. Returns `false` for an unknown column or an
    /// invalid width.
    pub fn set_width(&mut self, name: &str, width: ColumnWidth) -> bool {
        if !width.is_valid() {
            return false;
        }
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => {
                column.width = width;
                true
            }
            None => false,
        }
    }

    /// Header cell geometry from declared widths, in display order.
    ///
    /// Percentages resolve against `total_width`. Hosts that measure their
    /// header cells pass the measured boxes to `begin_drag` instead.
    pub fn header_boxes(&self, total_width: f64) -> Vec<HeaderBox> {
        let mut left = 0.0;
        self.iter()
            .map(|column| {
                let width = column.width.resolve(total_width);
                let header = HeaderBox::new(left, width);
                left += width;
                header
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Drag gesture
    // -------------------------------------------------------------------------

    /// Current drag state.
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Check if a header drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Start dragging the header at display index `index`.
    ///
    /// `boxes` are the header cells in display order. Starting while already
    /// dragging restarts the gesture. Returns `false` (and leaves the state
    /// alone) if the index or the box count does not match the columns.
    pub fn begin_drag(&mut self, index: usize, boxes: &[HeaderBox]) -> bool {
        if index >= self.order.len() || boxes.len() != self.order.len() {
            warn!(
                "ignoring column drag: index {} with {} boxes for {} columns",
                index,
                boxes.len(),
                self.order.len()
            );
            return false;
        }
        let boxes = boxes
            .iter()
            .zip(&self.order)
            .map(|(header, &column)| ProvisionalBox {
                header: *header,
                column,
                offset: 0.0,
            })
            .collect();
        debug!("column drag started on '{}'", self.columns[self.order[index]].name);
        self.drag = DragState::Dragging(ColumnDrag {
            original_position: index,
            candidate: index,
            boxes,
            delta_x: 0.0,
        });
        true
    }

    /// Move the dragged header by `delta_x` pixels from where it started.
    ///
    /// Returns the candidate index, or `None` if no drag is active.
    pub fn update_drag(&mut self, delta_x: f64) -> Option<usize> {
        let DragState::Dragging(drag) = &mut self.drag else {
            return None;
        };
        drag.update(delta_x);
        trace!("column drag delta {} -> candidate {}", delta_x, drag.candidate);
        Some(drag.candidate)
    }

    /// Release the dragged header.
    ///
    /// If it landed on a new index, the column moves there and every column's
    /// overridden position is rewritten to its new display index. Returns the
    /// new display order when the order changed.
    pub fn end_drag(&mut self) -> Option<Vec<Column>> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.drag) else {
            return None;
        };
        if drag.candidate == drag.original_position {
            debug!("column drag released without reordering");
            return None;
        }

        let mut order = self.order.clone();
        let moved = order.remove(drag.original_position);
        order.insert(drag.candidate, moved);
        for (i, &column) in order.iter().enumerate() {
            self.columns[column].overridden_position = Some(i as i32);
        }
        self.resolve();

        debug!(
            "column '{}' moved from {} to {}",
            self.columns[moved].name, drag.original_position, drag.candidate
        );
        Some(self.columns())
    }

    /// Abandon the drag without touching the order.
    pub fn cancel_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Preview of the active drag.
    pub fn drag_preview(&self) -> Option<DragPreview> {
        let DragState::Dragging(drag) = &self.drag else {
            return None;
        };
        Some(DragPreview {
            column: self.columns[drag.dragged().column].name.clone(),
            dragged_left: drag.dragged_left(),
            candidate: drag.candidate,
            offsets: drag.boxes.iter().map(|b| b.offset).collect(),
        })
    }
}
