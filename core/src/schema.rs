//! Builder facade: one constructor per descriptor kind.
//!
//! Every function returns a fresh [`Descriptor`]; refinement chains
//! (`.nullable()`, `.length(..)`, `.custom(..)`) then produce further
//! fresh descriptors, so schemas can share subtrees freely.
//!
//! # Examples
//!
//! ```
//! use value_schema_core::{schema, Value};
//!
//! let address = schema::object([
//!     ("street", schema::string()),
//!     ("number", schema::number().int().unwrap()),
//! ]);
//! let person = schema::object([
//!     ("name", schema::string().length(1, Some(64), true).unwrap()),
//!     ("address", address.nullable()),
//!     ("tags", schema::array([schema::string()])),
//! ]);
//!
//! let value = Value::object([
//!     ("name", Value::from("ada")),
//!     ("address", Value::Null),
//!     ("tags", Value::Array(vec![Value::from("math")])),
//! ]);
//! assert!(person.validate_sync(&value).is_ok());
//! ```

use crate::descriptor::Descriptor;
use crate::kind::Kind;
use crate::value::Value;

/// An object descriptor with one child descriptor per known field.
///
/// Value keys without a declared field are ignored; declared fields
/// absent from the value are checked as null.
pub fn object<K, I>(fields: I) -> Descriptor
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Descriptor)>,
{
    Descriptor::new(Kind::Object {
        fields: fields.into_iter().map(|(k, d)| (k.into(), d)).collect(),
    })
}

/// A string descriptor.
pub fn string() -> Descriptor {
    Descriptor::new(Kind::String)
}

/// A number descriptor.
pub fn number() -> Descriptor {
    Descriptor::new(Kind::Number)
}

/// A boolean descriptor.
pub fn boolean() -> Descriptor {
    Descriptor::new(Kind::Boolean)
}

/// A function descriptor.
pub fn function() -> Descriptor {
    Descriptor::new(Kind::Function)
}

/// A regular-expression descriptor.
pub fn regex() -> Descriptor {
    Descriptor::new(Kind::Regex)
}

/// An array descriptor. Each element must satisfy at least one of the
/// alternatives; with no alternatives every element is accepted.
pub fn array<I>(alternatives: I) -> Descriptor
where
    I: IntoIterator<Item = Descriptor>,
{
    Descriptor::new(Kind::Array {
        alternatives: alternatives.into_iter().collect(),
    })
}

/// A descriptor that accepts anything, null included.
pub fn any() -> Descriptor {
    Descriptor::new(Kind::Any)
}

/// A date descriptor.
pub fn date() -> Descriptor {
    Descriptor::new(Kind::Date)
}

/// An enumeration descriptor: the value must equal one of `allowed`.
///
/// # Examples
///
/// ```
/// use value_schema_core::{schema, Value};
///
/// let level = schema::enumeration([Value::from("debug"), Value::from("info")]);
/// assert!(level.check_sync(&Value::from("info"), None, None, &[]).unwrap().is_empty());
///
/// let errors = level.check_sync(&Value::from("loud"), None, None, &[]).unwrap();
/// assert_eq!(errors[0].message, "\"loud\" is not one of the allowed values");
/// ```
pub fn enumeration<I>(allowed: I) -> Descriptor
where
    I: IntoIterator<Item = Value>,
{
    Descriptor::new(Kind::Enum {
        allowed: allowed.into_iter().collect(),
    })
}
