//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value read from a row field.
///
/// Rows expose their fields by name as `Value`s so the engine can sort and
/// filter without knowing the row type. Ordering is generic: values of the same
/// kind compare naturally and integers compare with floats numerically. Any
/// other pairing is incomparable and treated as equal by the sorter.
///
/// # Example
///
/// ```
/// use tabula::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Compares two values with generic ordering.
    ///
    /// Returns `None` when the values are incomparable (different kinds, NaN,
    /// or either side null).
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).map(Ordering::reverse),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Exact comparison of an integer with a float.
///
/// Casting the integer to `f64` rounds above 2^53, which would make distinct
/// integers equal to the same float. Compare integer parts instead, then the
/// fraction.
fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above every i64
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= I64_END {
        return Some(Ordering::Less);
    }
    if float < -I64_END {
        return Some(Ordering::Greater);
    }

    let whole = float.trunc();
    // In range and integral, so the cast is exact
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

/// The string form used by the query filter. Null renders empty.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(Value::from(1).compare(&Value::from(2)), Some(Ordering::Less));
        assert_eq!(Value::from("b").compare(&Value::from("a")), Some(Ordering::Greater));
        assert_eq!(Value::from(true).compare(&Value::from(true)), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_int_with_float() {
        assert_eq!(Value::from(2).compare(&Value::from(1.5)), Some(Ordering::Greater));
        assert_eq!(Value::from(1.0).compare(&Value::from(1i64)), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_int_with_float_is_exact_above_2_pow_53() {
        let two_53 = 9_007_199_254_740_992i64;
        let float = Value::Float(two_53 as f64);

        assert_eq!(Value::Int(two_53 + 1).compare(&float), Some(Ordering::Greater));
        assert_eq!(float.compare(&Value::Int(two_53 + 1)), Some(Ordering::Less));
        assert_eq!(Value::Int(two_53).compare(&float), Some(Ordering::Equal));
        assert_eq!(Value::Int(two_53 - 1).compare(&float), Some(Ordering::Less));
    }

    #[test]
    fn test_compare_int_with_fractional_and_extreme_floats() {
        assert_eq!(Value::from(2).compare(&Value::from(2.5)), Some(Ordering::Less));
        assert_eq!(Value::from(-2).compare(&Value::from(-2.5)), Some(Ordering::Greater));
        assert_eq!(Value::from(-3).compare(&Value::from(-2.5)), Some(Ordering::Less));
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(f64::INFINITY)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Int(i64::MIN).compare(&Value::Float(-1e19)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Int(i64::MIN).compare(&Value::Float(i64::MIN as f64)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::Int(i64::MAX).compare(&Value::Float(i64::MAX as f64)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_incomparable_values() {
        assert_eq!(Value::from("1").compare(&Value::from(1)), None);
        assert_eq!(Value::from(f64::NAN).compare(&Value::from(1.0)), None);
        assert_eq!(Value::Null.compare(&Value::Null), None);
    }

    #[test]
    fn test_display() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(at).to_string(), "2024-01-02T03:04:05+00:00");
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 3, 1.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(3),
                Value::Float(1.5),
                Value::String("x".to_string()),
            ]
        );
    }
}
