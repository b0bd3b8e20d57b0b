//! Error types

/// Error type for building a table.
///
/// Runtime commands never fail; malformed input is normalized instead. Only the
/// column set handed to [`TableBuilder`](crate::TableBuilder) is validated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    /// Two columns share the same name.
    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A width is negative, not finite, or a string that is neither a pixel
    /// value nor a percentage.
    #[error("Column '{column}' has invalid width '{width}'")]
    InvalidWidth { column: String, width: String },
}

impl TableError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(name: impl Into<String>) -> Self {
        Self::DuplicateColumn { name: name.into() }
    }

    /// Creates a new invalid width error.
    pub fn invalid_width(column: impl Into<String>, width: impl Into<String>) -> Self {
        Self::InvalidWidth {
            column: column.into(),
            width: width.into(),
        }
    }
}

/// Error type for typed field access on a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    /// The field exists but has a different type than requested.
    #[error("Field '{field}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    /// Creates a new type mismatch error.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Error returned when a width string cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid column width '{0}'")]
pub struct ParseWidthError(pub String);

impl ParseWidthError {
    /// Creates a new parse error for the given input.
    pub fn new(input: impl Into<String>) -> Self {
        Self(input.into())
    }
}
