//! Keyboard navigation over the derived sequence.

use crate::keys::Key;
use crate::row::RowRef;

/// What a key press asks the table to do.
#[derive(Debug, PartialEq)]
pub enum Navigation<T> {
    /// Nothing to do.
    None,
    /// Activate this row (Enter on a selection).
    Activate(RowRef<T>),
    /// Select the first row because nothing was selected. No scrolling.
    SelectFirst(RowRef<T>),
    /// Select the row at `index` and scroll it into view.
    Move { row: RowRef<T>, index: usize },
}

/// Resolve a key press against the derived sequence and the first selected row.
///
/// Up and Down step from the first selected row and stop at either end. A
/// selected row that is not in `sequence` (filtered out) counts as sitting
/// just before the first row: Down selects index 0 and Up does nothing.
pub fn navigate<T>(
    key: Key,
    sequence: &[RowRef<T>],
    first_selected: Option<&RowRef<T>>,
) -> Navigation<T> {
    match key {
        Key::Enter => match first_selected {
            Some(row) => Navigation::Activate(row.clone()),
            None => Navigation::None,
        },
        Key::Up | Key::Down => {
            let Some(selected) = first_selected else {
                return match sequence.first() {
                    Some(row) => Navigation::SelectFirst(row.clone()),
                    None => Navigation::None,
                };
            };
            let position = sequence.iter().position(|row| row == selected);
            let index = match (key, position) {
                (Key::Up, Some(i)) if i > 0 => i - 1,
                (Key::Down, Some(i)) => i + 1,
                (Key::Down, None) => 0,
                _ => return Navigation::None,
            };
            match sequence.get(index) {
                Some(row) => Navigation::Move {
                    row: row.clone(),
                    index,
                },
                None => Navigation::None,
            }
        }
        _ => Navigation::None,
    }
}
