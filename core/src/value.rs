//! Dynamic value model checked by descriptors.
//!
//! Descriptors judge [`Value`] trees: JSON-like scalars, arrays, and
//! insertion-ordered records, extended with the host kinds the descriptor
//! set can express (dates, compiled regular expressions, function handles).
//! Records may carry an optional nominal [`TypeTag`], which is what
//! [`instance_of`](crate::Descriptor::instance_of) compares against.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;

/// Opaque nominal type identifier carried by tagged records.
///
/// Two tags are equal when their names are equal; the engine attaches no
/// other meaning to the name.
///
/// # Examples
///
/// ```
/// use value_schema_core::TypeTag;
///
/// let user = TypeTag::new("User");
/// assert_eq!(user, TypeTag::new("User"));
/// assert_ne!(user, TypeTag::new("Admin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeTag(String);

impl TypeTag {
    /// Creates a tag from a type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The tag's name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cloneable handle to a host function value.
///
/// The engine never calls the function; holding a callable is what makes
/// the `function` descriptor's base check meaningful. Equality is handle
/// identity, not behavior.
#[derive(Clone)]
pub struct FunctionValue(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl FunctionValue {
    /// Wraps a closure as a function value.
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the underlying function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionValue(..)")
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// An associative record: insertion-ordered fields plus an optional
/// nominal tag.
///
/// Plain records (no tag) and tagged records both pass the object base
/// check; only [`instance_of`](crate::Descriptor::instance_of) inspects
/// the tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Nominal type of the record, if any.
    pub tag: Option<TypeTag>,
    /// Field name → value, in insertion order.
    pub fields: IndexMap<String, Value>,
}

impl Record {
    /// Looks up a field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// A dynamic runtime value.
///
/// # Examples
///
/// ```
/// use value_schema_core::Value;
///
/// let v = Value::object([
///     ("name", Value::from("ada")),
///     ("age", Value::from(36)),
/// ]);
/// assert!(v.as_record().is_some());
/// assert_eq!(v.as_record().unwrap().get("name"), Some(&Value::from("ada")));
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent or explicitly null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Double-precision number (integers included).
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Associative record, optionally tagged with a nominal type.
    Object(Record),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Compiled regular expression.
    Regex(Regex),
    /// Host function handle.
    Function(FunctionValue),
}

impl Value {
    /// Builds a plain (untagged) record value.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Record {
            tag: None,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Builds a record value carrying a nominal type tag.
    pub fn tagged<K, I>(tag: TypeTag, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Record {
            tag: Some(tag),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    /// Wraps a closure as a function value.
    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Value::Function(FunctionValue::new(f))
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The record behind an object value, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    /// The elements behind an array value, if this is one.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The text behind a string value, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number behind a numeric value, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            // Regexes compare by pattern text, functions by handle identity.
            (Value::Regex(a), Value::Regex(b)) => a.as_str() == b.as_str(),
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(record) => {
                if let Some(tag) = &record.tag {
                    write!(f, "{tag} ")?;
                }
                f.write_str("{")?;
                for (i, (k, v)) in record.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Date(d) => write!(f, "{}", d.to_rfc3339()),
            Value::Regex(re) => write!(f, "/{}/", re.as_str()),
            Value::Function(_) => f.write_str("<function>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Regex(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_kind() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::Null, Value::from(false));
    }

    #[test]
    fn test_regex_equality_by_pattern() {
        let a = Value::from(Regex::new("^a+$").unwrap());
        let b = Value::from(Regex::new("^a+$").unwrap());
        let c = Value::from(Regex::new("^b+$").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_function_equality_by_identity() {
        let f = Value::function(|_| Value::Null);
        let g = Value::function(|_| Value::Null);
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_display_rendering() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(3.5).to_string(), "3.5");
        assert_eq!(Value::from("x").to_string(), "\"x\"");
        let arr = Value::Array(vec![Value::from(1), Value::Null]);
        assert_eq!(arr.to_string(), "[1, null]");
        let obj = Value::object([("a", Value::from(true))]);
        assert_eq!(obj.to_string(), "{a: true}");
    }

    #[test]
    fn test_absent_field_lookup() {
        let v = Value::object([("a", Value::from(1))]);
        let record = v.as_record().unwrap();
        assert!(record.get("missing").is_none());
    }
}
