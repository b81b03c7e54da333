//! Composable type descriptors for validating dynamic values.
//!
//! A caller builds an immutable tree of descriptors mirroring the shape
//! of a value, then checks runtime [`Value`]s against it:
//!
//! - [`schema`] — constructors for every descriptor kind (`object`,
//!   `string`, `number`, `array`, `enumeration`, …).
//! - [`Descriptor`] — the tree node: refinement chaining
//!   (`nullable`, `custom`, `length`, `range`, `pattern`, …) and the four
//!   check entry points. Refinement clones; a descriptor already embedded
//!   in another schema is never mutated.
//! - [`ErrorMessage`] — path-qualified validation errors, collected
//!   recursively through objects and arrays.
//! - [`messages`] — the process-wide error-message catalog.
//!
//! Checks come in a synchronous and an asynchronous flavor with the same
//! semantics, differing only in how custom rules execute: the sync path
//! runs base check then rules in order, the async path runs the base
//! check and the rule pass concurrently and fans out over object fields
//! and array elements, so N suspending children cost as much as the
//! slowest one.
//!
//! # Example
//!
//! ```
//! use value_schema_core::{schema, Value, ValidateError};
//!
//! let signup = schema::object([
//!     ("email", schema::string().length(3, Some(254), true).unwrap()),
//!     ("age", schema::number().int().unwrap().nullable()),
//!     ("roles", schema::array([schema::string()])),
//! ]);
//!
//! let value = Value::object([
//!     ("email", Value::from("ada@example.com")),
//!     ("age", Value::Null),
//!     ("roles", Value::Array(vec![Value::from("admin"), Value::from(7)])),
//! ]);
//!
//! let err = signup.validate_sync(&value).unwrap_err();
//! let ValidateError::Invalid(errors) = err else { panic!("expected Invalid") };
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].path, vec!["roles"]);
//! assert_eq!(errors[0].message, "no matching element type");
//! ```

mod descriptor;
mod error;
mod kind;
mod refine;
mod rule;
mod value;

pub mod messages;
pub mod schema;

pub use descriptor::Descriptor;
pub use error::{ErrorMessage, SchemaError, ValidateError};
pub use rule::{AsyncRuleFn, Rule, SyncRuleFn};
pub use value::{FunctionValue, Record, TypeTag, Value};
