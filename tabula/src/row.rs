//! TableRow trait and the identity handle rows are tracked by.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::value::Value;

/// Trait for items that can be displayed as rows in a [`Table`](crate::Table).
///
/// The engine only ever reads rows: sorting and query filtering go through
/// [`field`](TableRow::field), everything else works on row identity.
///
/// # Examples
///
/// ```
/// use tabula::{TableRow, Value};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl TableRow for User {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(self.name.as_str().into()),
///             "age" => Some(self.age.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait TableRow: Send + Sync + 'static {
    /// Read a field by its declared name.
    ///
    /// Returns `None` if the row has no such field. Called while the table is
    /// locked, so it must not reach back into the table that holds the row.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Shared handle to a row, compared by identity.
///
/// Two `RowRef`s are equal only if they point at the same row allocation.
/// Structurally equal rows held in different allocations stay distinct, which
/// is what selection relies on. Cloning clones the handle, never the row.
pub struct RowRef<T>(Arc<T>);

impl<T> RowRef<T> {
    /// Wrap a row in a new identity.
    pub fn new(row: T) -> Self {
        Self(Arc::new(row))
    }

    /// Check whether two handles refer to the same row.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Get the underlying shared pointer.
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T> From<Arc<T>> for RowRef<T> {
    fn from(row: Arc<T>) -> Self {
        Self(row)
    }
}

impl<T> Clone for RowRef<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for RowRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> PartialEq for RowRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for RowRef<T> {}

impl<T> Hash for RowRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for RowRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RowRef").field(&*self.0).finish()
    }
}
