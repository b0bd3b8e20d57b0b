//! Row comparison and sort state.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::row::TableRow;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Check if ascending.
    pub fn is_ascending(self) -> bool {
        self == SortDirection::Asc
    }
}

/// Compare two rows by a named field.
///
/// Values use [`Value::compare`]; incomparable values are equal. A missing or
/// null field sorts after every present value in both directions, so empty
/// cells always collect at the bottom. There is no secondary tie-break.
pub fn compare<T: TableRow + ?Sized>(
    a: &T,
    b: &T,
    field: &str,
    direction: SortDirection,
) -> Ordering {
    let a = a.field(field).filter(|v| !v.is_null());
    let b = b.field(field).filter(|v| !v.is_null());
    compare_values(a.as_ref(), b.as_ref(), direction)
}

/// Compare two optional field values. See [`compare`].
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.compare(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// The field the user picked and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSort {
    pub field: String,
    pub direction: SortDirection,
}

/// Sort state: an optional user-picked sort over a configured default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<ActiveSort>,
    default_field: Option<String>,
    default_direction: SortDirection,
}

impl SortState {
    /// Create a sort state with no active sort.
    pub fn new(default_field: Option<String>, default_direction: SortDirection) -> Self {
        Self {
            active: None,
            default_field: default_field.filter(|f| !f.is_empty()),
            default_direction,
        }
    }

    /// The user-picked sort, if any.
    pub fn active(&self) -> Option<&ActiveSort> {
        self.active.as_ref()
    }

    /// The field rows are currently sorted by: the active field, else the default.
    pub fn field(&self) -> Option<&str> {
        self.active
            .as_ref()
            .map(|s| s.field.as_str())
            .or(self.default_field.as_deref())
    }

    /// The direction rows are currently sorted in.
    pub fn direction(&self) -> SortDirection {
        self.active
            .as_ref()
            .map(|s| s.direction)
            .unwrap_or(self.default_direction)
    }

    /// Check if the current direction is ascending.
    pub fn is_ascending(&self) -> bool {
        self.direction().is_ascending()
    }

    /// The arrow to show in a column header, if that column drives the sort.
    pub fn indicator_for(&self, column: &str) -> Option<SortDirection> {
        (self.field() == Some(column)).then(|| self.direction())
    }

    /// Apply a header click on `field`.
    ///
    /// - no active sort and `field` is the default: adopt it with the default
    ///   direction flipped, since the rows already show the default order
    /// - `field` is the active field: flip its direction
    /// - anything else: adopt `field` with the default direction
    pub fn toggle(&mut self, field: &str) -> &ActiveSort {
        let direction = match &self.active {
            None if self.default_field.as_deref() == Some(field) => {
                self.default_direction.flipped()
            }
            Some(active) if active.field == field => active.direction.flipped(),
            _ => self.default_direction,
        };
        self.active.insert(ActiveSort {
            field: field.to_string(),
            direction,
        })
    }

    /// Drop the active sort, falling back to the default.
    pub fn reset(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_click_on_other_field_uses_default_direction() {
        let mut state = SortState::new(Some("name".into()), SortDirection::Desc);
        let active = state.toggle("age").clone();
        assert_eq!(active.field, "age");
        assert_eq!(active.direction, SortDirection::Desc);
    }

    #[test]
    fn test_first_click_on_default_field_flips() {
        let mut state = SortState::new(Some("name".into()), SortDirection::Asc);
        assert_eq!(state.direction(), SortDirection::Asc);
        assert_eq!(state.toggle("name").direction, SortDirection::Desc);
        assert_eq!(state.toggle("name").direction, SortDirection::Asc);
    }

    #[test]
    fn test_switching_fields_resets_direction() {
        let mut state = SortState::new(None, SortDirection::Asc);
        state.toggle("a");
        state.toggle("a");
        assert_eq!(state.direction(), SortDirection::Desc);
        assert_eq!(state.toggle("b").direction, SortDirection::Asc);
    }

    #[test]
    fn test_empty_default_is_no_default() {
        let state = SortState::new(Some(String::new()), SortDirection::Asc);
        assert_eq!(state.field(), None);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let one = Value::from(1);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(compare_values(None, Some(&one), direction), Ordering::Greater);
            assert_eq!(compare_values(Some(&one), None, direction), Ordering::Less);
            assert_eq!(compare_values(None, None, direction), Ordering::Equal);
        }
    }

    #[test]
    fn test_direction_reverses() {
        let (a, b) = (Value::from(1), Value::from(2));
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(Some(&a), Some(&b), SortDirection::Desc), Ordering::Greater);
        let text = Value::from("x");
        assert_eq!(compare_values(Some(&a), Some(&text), SortDirection::Desc), Ordering::Equal);
    }
}
