//! Validation and usage error types.
//!
//! Two channels, kept deliberately distinct (conflating them would let a
//! malformed schema masquerade as invalid data):
//!
//! - **Validation errors**: [`ErrorMessage`] values describing data shape
//!   problems. `check_sync`/`check` return them as a list and never fail
//!   because of them; only `validate_sync`/`validate` convert a non-empty
//!   list into [`ValidateError::Invalid`].
//! - **Usage errors**: [`SchemaError`] values for programming mistakes —
//!   out-of-order bounds at composition time, a refinement applied to the
//!   wrong descriptor kind, or an async rule reached from a synchronous
//!   check. These are immediate `Err` results and never appear in an
//!   error list.

use serde::Serialize;
use thiserror::Error;

/// A single path-qualified validation error.
///
/// `path` locates the offending value inside the checked structure, as a
/// sequence of object keys and array indices from the root.
///
/// # Examples
///
/// ```
/// use value_schema_core::{schema, Value};
///
/// let user = schema::object([("name", schema::string())]);
/// let bad = Value::object([("name", Value::from(1))]);
///
/// let errors = user.check_sync(&bad, None, None, &[]).unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].path, vec!["name"]);
/// assert_eq!(errors[0].message, "not a string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    /// Keys/indices from the root to the value the error describes.
    pub path: Vec<String>,
    /// Rendered message text.
    pub message: String,
}

impl ErrorMessage {
    pub(crate) fn new(path: Vec<String>, message: String) -> Self {
        Self { path, message }
    }
}

/// Schema usage errors: mistakes in how descriptors are composed or
/// driven, detected eagerly and reported outside the validation channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A `length`/`range` refinement was given `min > max`.
    #[error("bounds out of order: min {min} > max {max}")]
    BoundsOutOfOrder {
        /// Lower bound, rendered.
        min: String,
        /// Upper bound, rendered.
        max: String,
    },
    /// A refinement was applied to a descriptor kind that does not
    /// support it (e.g. `pattern` on a number descriptor).
    #[error("`{refinement}` is not supported by {kind} descriptors")]
    UnsupportedRefinement {
        /// Name of the refinement method.
        refinement: &'static str,
        /// Kind of the receiving descriptor.
        kind: &'static str,
    },
    /// A synchronous check reached a descriptor carrying an async custom
    /// rule. The rule cannot run to completion synchronously, so the
    /// check refuses rather than reporting a bogus result.
    #[error("async custom rule cannot run in a synchronous check")]
    AsyncRuleInSyncCheck,
}

/// Failure raised by the `validate_sync`/`validate` entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidateError {
    /// The value failed validation; carries the full error list.
    #[error("validation failed with {} error(s)", .0.len())]
    Invalid(Vec<ErrorMessage>),
    /// The check itself was misused (see [`SchemaError`]).
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ValidateError {
    /// The validation errors behind an [`Invalid`](ValidateError::Invalid)
    /// failure, or an empty slice for usage failures.
    pub fn errors(&self) -> &[ErrorMessage] {
        match self {
            ValidateError::Invalid(errors) => errors,
            ValidateError::Schema(_) => &[],
        }
    }
}
