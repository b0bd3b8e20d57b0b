//! Dynamic field-map record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;

use crate::error::FieldError;
use crate::row::TableRow;
use crate::value::Value;

/// A row backed by a map of named fields.
///
/// Records are the quickest way to feed a table without writing a
/// [`TableRow`] impl. Typed getters return `Ok(None)` for a missing or null
/// field and an error when the stored value has another type.
///
/// # Example
///
/// ```
/// use tabula::Record;
///
/// let record = Record::new()
///     .set("name", "Contoso")
///     .set("revenue", 1_000_000i64);
///
/// assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts or replaces a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Typed getters
    // =========================================================================

    /// Returns a string field.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(FieldError::type_mismatch(field, "string", other.type_name())),
        }
    }

    /// Returns an integer field.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Returns a float field. Integers are widened.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Float(v)) => Ok(Some(*v)),
            Some(Value::Int(v)) => Ok(Some(*v as f64)),
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Returns a boolean field.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(v)) => Ok(Some(*v)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Returns a date-time field.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::DateTime(v)) => Ok(Some(*v)),
            Some(other) => Err(FieldError::type_mismatch(field, "datetime", other.type_name())),
        }
    }
}

impl TableRow for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::new()
            .set("name", "Contoso")
            .set("employees", 250)
            .set("active", true)
            .set("closed", Value::Null);

        assert_eq!(record.get_string("name").unwrap(), Some("Contoso"));
        assert_eq!(record.get_int("employees").unwrap(), Some(250));
        assert_eq!(record.get_float("employees").unwrap(), Some(250.0));
        assert_eq!(record.get_bool("active").unwrap(), Some(true));
        assert_eq!(record.get_datetime("closed").unwrap(), None);
        assert_eq!(record.get_string("missing").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch() {
        let record = Record::new().set("name", "Contoso");

        let err = record.get_int("name").unwrap_err();
        assert_eq!(err, FieldError::type_mismatch("name", "int", "string"));
        assert_eq!(
            err.to_string(),
            "Field 'name' type mismatch: expected int, got string"
        );
    }

    #[test]
    fn test_field_reads_raw_value() {
        let mut record = Record::new();
        record.insert("n", 1);
        assert!(record.contains("n"));
        assert_eq!(record.field("n"), Some(Value::Int(1)));
        assert_eq!(record.field("m"), None);
    }
}
