//! Error message catalog.
//!
//! Every validation failure renders through a template looked up by a
//! `"<kind>.<case>"` key. [`configure`] merges caller overrides over the
//! built-in defaults for the rest of the process, which is how messages
//! are localized or reworded without touching any descriptor.
//!
//! Templates use positional placeholders: `{0}`, `{1}`, … are substituted
//! with the arguments a refinement bound at composition time (`length` and
//! `range` rules bind `[min, max]`, so the `*.max` templates reference
//! `{1}`).

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use regex::Regex;

/// Built-in templates, keyed by error kind.
const DEFAULTS: &[(&str, &str)] = &[
    ("object.base", "not an object"),
    ("object.type", "not an instance of {0}"),
    ("string.base", "not a string"),
    ("string.length.min", "length is less than {0}"),
    ("string.length.max", "length is greater than {1}"),
    ("string.pattern", "does not match pattern {0}"),
    ("number.base", "not a number"),
    ("number.int", "not an integer"),
    ("number.float", "not a float"),
    ("number.range.min", "less than {0}"),
    ("number.range.max", "greater than {1}"),
    ("boolean.base", "not a boolean"),
    ("function.base", "not a function"),
    ("regex.base", "not a regular expression"),
    ("array.base", "not an array"),
    ("array.types", "no matching element type"),
    ("array.length.min", "array length is less than {0}"),
    ("array.length.max", "array length is greater than {1}"),
    ("any.base", ""),
    ("date.base", "not a date"),
    ("date.range.min", "date is earlier than {0}"),
    ("date.range.max", "date is later than {1}"),
    ("enum.base", "{0} is not one of the allowed values"),
];

static OVERRIDES: LazyLock<RwLock<HashMap<String, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern"));

/// Merges message template overrides over the built-in defaults.
///
/// Overrides apply process-wide and stay in effect until replaced by a
/// later call. Keys not present in an override keep their default.
///
/// # Examples
///
/// ```
/// use value_schema_core::messages;
///
/// messages::configure([("string.base", "expected text")]);
/// ```
pub fn configure<I, K, V>(overrides: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut table = OVERRIDES.write().expect("message catalog poisoned");
    for (key, template) in overrides {
        table.insert(key.into(), template.into());
    }
}

/// Renders the template for `key`, substituting positional placeholders.
///
/// Placeholders whose index has no bound argument are left verbatim; an
/// unknown key renders as the key itself so a misconfigured catalog is
/// visible rather than silent.
pub(crate) fn format(key: &str, args: &[String]) -> String {
    let template = {
        let table = OVERRIDES.read().expect("message catalog poisoned");
        table.get(key).cloned()
    };
    let template = template
        .or_else(|| {
            DEFAULTS
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, t)| (*t).to_string())
        })
        .unwrap_or_else(|| key.to_string());

    PLACEHOLDER
        .replace_all(&template, |caps: &regex::Captures<'_>| {
            let index: usize = caps[1].parse().unwrap_or(usize::MAX);
            match args.get(index) {
                Some(arg) => arg.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
