//! Descriptor kinds and their base shape checks.
//!
//! The base check is the structural judgment intrinsic to a kind — "is
//! this an object", "is this a string" — independent of any custom rules.
//! Object and array kinds recurse into child descriptors here, which is
//! where error paths grow.

use futures::FutureExt;
use futures::future::{self, BoxFuture, join_all};
use indexmap::IndexMap;

use crate::descriptor::Descriptor;
use crate::error::{ErrorMessage, SchemaError};
use crate::messages;
use crate::value::{Record, Value};

/// Stand-in for fields a record does not carry: an absent field is
/// checked exactly like an explicit null.
static NULL: Value = Value::Null;

/// The concrete kind of a descriptor, with per-kind payload.
#[derive(Debug, Clone)]
pub(crate) enum Kind {
    /// Associative record with a descriptor per known field.
    Object { fields: IndexMap<String, Descriptor> },
    /// Sequence whose elements must match at least one alternative.
    /// No alternatives means every element is accepted.
    Array { alternatives: Vec<Descriptor> },
    /// Fixed set of allowed values.
    Enum { allowed: Vec<Value> },
    String,
    Number,
    Boolean,
    Function,
    Regex,
    Date,
    Any,
}

impl Kind {
    /// Kind name used in usage-error messages.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Kind::Object { .. } => "object",
            Kind::Array { .. } => "array",
            Kind::Enum { .. } => "enum",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Function => "function",
            Kind::Regex => "regex",
            Kind::Date => "date",
            Kind::Any => "any",
        }
    }

    /// Synchronous base check. Object fields and array elements recurse
    /// sequentially; the error path for a child is `path + [key]`.
    pub(crate) fn base_check_sync(
        &self,
        value: &Value,
        parent: Option<&Value>,
        key: Option<&str>,
        path: &[String],
    ) -> Result<Vec<ErrorMessage>, SchemaError> {
        match self {
            Kind::Object { fields } => {
                let Some(record) = value.as_record() else {
                    return Ok(vec![base_error(path, "object.base", &[])]);
                };
                let mut errors = Vec::new();
                for field_key in merged_keys(record, fields) {
                    let field = &fields[field_key];
                    let item = record.get(field_key).unwrap_or(&NULL);
                    let mut child_path = path.to_vec();
                    child_path.push(field_key.to_string());
                    errors.extend(field.check_sync(
                        item,
                        Some(value),
                        Some(field_key),
                        &child_path,
                    )?);
                }
                Ok(errors)
            }
            Kind::Array { alternatives } => {
                let Some(items) = value.as_array() else {
                    return Ok(vec![base_error(path, "array.base", &[])]);
                };
                let mut errors = Vec::new();
                'items: for (index, item) in items.iter().enumerate() {
                    if alternatives.is_empty() {
                        continue;
                    }
                    let mut element_path = path.to_vec();
                    element_path.push(index.to_string());
                    for alternative in alternatives {
                        // Elements keep the array's own parent and key;
                        // the array itself is not handed down as parent.
                        let result =
                            alternative.check_sync(item, parent, key, &element_path)?;
                        if result.is_empty() {
                            continue 'items;
                        }
                    }
                    // The unmatched element is reported at the array's
                    // own path, one error per failing index.
                    errors.push(base_error(path, "array.types", &[]));
                }
                Ok(errors)
            }
            _ => Ok(self.scalar_base(value, path)),
        }
    }

    /// Asynchronous base check. Object fields, array elements, and array
    /// alternatives are all issued before any is awaited, so N suspending
    /// children cost as much as the slowest one.
    pub(crate) fn base_check<'a>(
        &'a self,
        value: &'a Value,
        parent: Option<&'a Value>,
        key: Option<&'a str>,
        path: &'a [String],
    ) -> BoxFuture<'a, Vec<ErrorMessage>> {
        match self {
            Kind::Object { fields } => async move {
                let Some(record) = value.as_record() else {
                    return vec![base_error(path, "object.base", &[])];
                };
                let mut child_checks = Vec::new();
                for field_key in merged_keys(record, fields) {
                    let field = &fields[field_key];
                    let item = record.get(field_key).unwrap_or(&NULL);
                    let mut child_path = path.to_vec();
                    child_path.push(field_key.to_string());
                    child_checks.push(field.check(item, Some(value), Some(field_key), &child_path));
                }
                // Merged output preserves key iteration order.
                join_all(child_checks).await.into_iter().flatten().collect()
            }
            .boxed(),
            Kind::Array { alternatives } => async move {
                let Some(items) = value.as_array() else {
                    return vec![base_error(path, "array.base", &[])];
                };
                let element_checks = items.iter().enumerate().map(|(index, item)| async move {
                    if alternatives.is_empty() {
                        return None;
                    }
                    let mut element_path = path.to_vec();
                    element_path.push(index.to_string());
                    let attempts: Vec<_> = alternatives
                        .iter()
                        .map(|alternative| alternative.check(item, parent, key, &element_path))
                        .collect();
                    let results = join_all(attempts).await;
                    if results.iter().any(|errors| errors.is_empty()) {
                        None
                    } else {
                        Some(base_error(path, "array.types", &[]))
                    }
                });
                join_all(element_checks)
                    .await
                    .into_iter()
                    .flatten()
                    .collect()
            }
            .boxed(),
            _ => future::ready(self.scalar_base(value, path)).boxed(),
        }
    }

    /// Shape predicate for the non-recursive kinds.
    fn scalar_base(&self, value: &Value, path: &[String]) -> Vec<ErrorMessage> {
        let failed_key = match self {
            Kind::String => (!matches!(value, Value::String(_))).then_some("string.base"),
            Kind::Number => (!matches!(value, Value::Number(_))).then_some("number.base"),
            Kind::Boolean => (!matches!(value, Value::Bool(_))).then_some("boolean.base"),
            Kind::Function => (!matches!(value, Value::Function(_))).then_some("function.base"),
            Kind::Regex => (!matches!(value, Value::Regex(_))).then_some("regex.base"),
            Kind::Date => (!matches!(value, Value::Date(_))).then_some("date.base"),
            Kind::Any => None,
            Kind::Enum { allowed } => {
                if allowed.iter().any(|item| item == value) {
                    None
                } else {
                    return vec![base_error(path, "enum.base", &[value.to_string()])];
                }
            }
            Kind::Object { .. } | Kind::Array { .. } => unreachable!("handled by recursion arms"),
        };
        match failed_key {
            Some(message_key) => vec![base_error(path, message_key, &[])],
            None => Vec::new(),
        }
    }
}

fn base_error(path: &[String], message_key: &str, args: &[String]) -> ErrorMessage {
    ErrorMessage::new(path.to_vec(), messages::format(message_key, args))
}

/// Keys to check: value keys that have a field descriptor, in value
/// order, followed by declared fields the value lacks. Value-only keys
/// have no descriptor and are never reported.
fn merged_keys<'a>(
    record: &'a Record,
    fields: &'a IndexMap<String, Descriptor>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = record
        .fields
        .keys()
        .filter(|key| fields.contains_key(key.as_str()))
        .map(String::as_str)
        .collect();
    for key in fields.keys() {
        if record.get(key).is_none() {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_merged_keys_order_and_excess() {
        let descriptor = schema::object([("b", schema::any()), ("a", schema::any())]);
        let Kind::Object { fields } = descriptor.kind() else {
            panic!("expected object kind");
        };
        let value = Value::object([("a", Value::from(1)), ("extra", Value::from(2))]);
        let record = value.as_record().unwrap();
        // "a" first (value order), then missing "b"; "extra" dropped.
        assert_eq!(merged_keys(record, fields), vec!["a", "b"]);
    }

    #[test]
    fn test_scalar_base_keys() {
        let errors = Kind::String.scalar_base(&Value::from(1), &[]);
        assert_eq!(errors[0].message, "not a string");
        assert!(Kind::Any.scalar_base(&Value::Null, &[]).is_empty());
    }
}
