//! Kind-specific refinements.
//!
//! Each refinement is stored as an ordinary custom rule on a clone of the
//! receiver, with its arguments bound at composition time for message
//! formatting. Bound-ordering mistakes (`min > max`) and refinements
//! applied to the wrong kind fail here, before any value is checked.
//!
//! A refinement rule judges only values of its own kind; a value of the
//! wrong shape passes the rule silently and is reported by the base check
//! instead.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::descriptor::Descriptor;
use crate::error::SchemaError;
use crate::kind::Kind;
use crate::messages;
use crate::value::{TypeTag, Value};

impl Descriptor {
    /// Constrains the length of a string (in characters) or array
    /// descriptor. `min` is always inclusive; `include_max` selects
    /// whether `max` is inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, Value};
    ///
    /// let word = schema::string().length(2, Some(4), true).unwrap();
    /// assert!(word.check_sync(&Value::from("four"), None, None, &[]).unwrap().is_empty());
    /// assert_eq!(word.check_sync(&Value::from("x"), None, None, &[]).unwrap().len(), 1);
    ///
    /// // min > max is a composition-time usage error.
    /// assert!(schema::string().length(5, Some(4), true).is_err());
    /// ```
    pub fn length(
        &self,
        min: usize,
        max: Option<usize>,
        include_max: bool,
    ) -> Result<Self, SchemaError> {
        let prefix = match self.kind() {
            Kind::String => "string",
            Kind::Array { .. } => "array",
            other => {
                return Err(SchemaError::UnsupportedRefinement {
                    refinement: "length",
                    kind: other.name(),
                });
            }
        };
        ordered_bounds(&min, max.as_ref())?;
        let args = bound_args(&min, max.as_ref());
        let min_key = format!("{prefix}.length.min");
        let max_key = format!("{prefix}.length.max");
        Ok(self.custom(move |value, _, _, _| {
            let length = match value {
                Value::String(s) => s.chars().count(),
                Value::Array(items) => items.len(),
                _ => return None,
            };
            if length < min {
                return Some(messages::format(&min_key, &args));
            }
            if let Some(max) = max {
                let over = if include_max { length > max } else { length >= max };
                if over {
                    return Some(messages::format(&max_key, &args));
                }
            }
            None
        }))
    }

    /// Constrains a number descriptor to a range. `min` is always
    /// inclusive; `include_max` selects whether `max` is inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, Value};
    ///
    /// let unit = schema::number().range(0.0, Some(1.0), true).unwrap();
    /// assert!(unit.check_sync(&Value::from(1.0), None, None, &[]).unwrap().is_empty());
    ///
    /// let half_open = schema::number().range(0.0, Some(1.0), false).unwrap();
    /// assert_eq!(half_open.check_sync(&Value::from(1.0), None, None, &[]).unwrap().len(), 1);
    /// ```
    pub fn range(
        &self,
        min: f64,
        max: Option<f64>,
        include_max: bool,
    ) -> Result<Self, SchemaError> {
        self.expect_kind("range", "number")?;
        ordered_bounds(&min, max.as_ref())?;
        let args = bound_args(&min, max.as_ref());
        Ok(self.custom(move |value, _, _, _| {
            let n = value.as_number()?;
            if n < min {
                return Some(messages::format("number.range.min", &args));
            }
            if let Some(max) = max {
                let over = if include_max { n > max } else { n >= max };
                if over {
                    return Some(messages::format("number.range.max", &args));
                }
            }
            None
        }))
    }

    /// Requires a number descriptor's value to be an integer.
    pub fn int(&self) -> Result<Self, SchemaError> {
        self.expect_kind("int", "number")?;
        Ok(self.custom(|value, _, _, _| {
            let n = value.as_number()?;
            if n.is_finite() && n.fract() == 0.0 {
                None
            } else {
                Some(messages::format("number.int", &[]))
            }
        }))
    }

    /// Requires a number descriptor's value to have a fractional part
    /// (whole numbers are rejected).
    pub fn float(&self) -> Result<Self, SchemaError> {
        self.expect_kind("float", "number")?;
        Ok(self.custom(|value, _, _, _| {
            let n = value.as_number()?;
            if n % 1.0 == 0.0 {
                Some(messages::format("number.float", &[]))
            } else {
                None
            }
        }))
    }

    /// Requires a string descriptor's value to match `regex`.
    ///
    /// # Examples
    ///
    /// ```
    /// use regex::Regex;
    /// use value_schema_core::{schema, Value};
    ///
    /// let hex = schema::string()
    ///     .pattern(Regex::new("^[0-9a-f]+$").unwrap())
    ///     .unwrap();
    /// assert!(hex.check_sync(&Value::from("c0ffee"), None, None, &[]).unwrap().is_empty());
    /// assert_eq!(hex.check_sync(&Value::from("tea"), None, None, &[]).unwrap().len(), 1);
    /// ```
    pub fn pattern(&self, regex: Regex) -> Result<Self, SchemaError> {
        self.expect_kind("pattern", "string")?;
        let args = vec![regex.as_str().to_string()];
        Ok(self.custom(move |value, _, _, _| {
            let s = value.as_str()?;
            if regex.is_match(s) {
                None
            } else {
                Some(messages::format("string.pattern", &args))
            }
        }))
    }

    /// Constrains a date descriptor to a range. Bound handling mirrors
    /// [`range`](Descriptor::range).
    pub fn date_range(
        &self,
        min: DateTime<Utc>,
        max: Option<DateTime<Utc>>,
        include_max: bool,
    ) -> Result<Self, SchemaError> {
        self.expect_kind("date_range", "date")?;
        if let Some(max) = max {
            if min > max {
                return Err(SchemaError::BoundsOutOfOrder {
                    min: min.to_rfc3339(),
                    max: max.to_rfc3339(),
                });
            }
        }
        let args = vec![
            min.to_rfc3339(),
            max.map(|d| d.to_rfc3339()).unwrap_or_default(),
        ];
        Ok(self.custom(move |value, _, _, _| {
            let Value::Date(d) = value else { return None };
            if *d < min {
                return Some(messages::format("date.range.min", &args));
            }
            if let Some(max) = max {
                let over = if include_max { *d > max } else { *d >= max };
                if over {
                    return Some(messages::format("date.range.max", &args));
                }
            }
            None
        }))
    }

    /// Requires an object descriptor's value to carry the given nominal
    /// type tag. Untagged records and non-records both fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, TypeTag, Value};
    ///
    /// let user = schema::object([("id", schema::number())])
    ///     .instance_of(TypeTag::new("User"))
    ///     .unwrap();
    ///
    /// let tagged = Value::tagged(TypeTag::new("User"), [("id", Value::from(1))]);
    /// assert!(user.check_sync(&tagged, None, None, &[]).unwrap().is_empty());
    ///
    /// let plain = Value::object([("id", Value::from(1))]);
    /// let errors = user.check_sync(&plain, None, None, &[]).unwrap();
    /// assert_eq!(errors[0].message, "not an instance of User");
    /// ```
    pub fn instance_of(&self, tag: TypeTag) -> Result<Self, SchemaError> {
        self.expect_kind("instance_of", "object")?;
        let args = vec![tag.name().to_string()];
        Ok(self.custom(move |value, _, _, _| {
            let is_instance = value
                .as_record()
                .is_some_and(|record| record.tag.as_ref() == Some(&tag));
            if is_instance {
                None
            } else {
                Some(messages::format("object.type", &args))
            }
        }))
    }

    fn expect_kind(
        &self,
        refinement: &'static str,
        expected: &'static str,
    ) -> Result<(), SchemaError> {
        if self.kind().name() == expected {
            Ok(())
        } else {
            Err(SchemaError::UnsupportedRefinement {
                refinement,
                kind: self.kind().name(),
            })
        }
    }
}

fn ordered_bounds<T>(min: &T, max: Option<&T>) -> Result<(), SchemaError>
where
    T: PartialOrd + Display,
{
    if let Some(max) = max {
        if min > max {
            return Err(SchemaError::BoundsOutOfOrder {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
    }
    Ok(())
}

/// Binds `[min, max]` for the `*.min` / `*.max` templates.
fn bound_args<T: Display>(min: &T, max: Option<&T>) -> Vec<String> {
    vec![
        min.to_string(),
        max.map(|m| m.to_string()).unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::schema;

    #[test]
    fn test_bounds_guard_fires_at_composition_time() {
        let err = schema::string().length(5, Some(4), true).unwrap_err();
        assert_eq!(
            err,
            SchemaError::BoundsOutOfOrder {
                min: "5".into(),
                max: "4".into(),
            }
        );
        assert!(schema::number().range(2.0, Some(1.0), true).is_err());
        assert!(schema::array([]).length(3, Some(1), true).is_err());
    }

    #[test]
    fn test_kind_mismatch_is_usage_error() {
        let err = schema::number().pattern(Regex::new("x").unwrap()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnsupportedRefinement {
                refinement: "pattern",
                kind: "number",
            }
        );
        assert!(schema::string().int().is_err());
        assert!(schema::boolean().length(0, None, true).is_err());
        assert!(schema::string().instance_of(TypeTag::new("T")).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        let short = schema::string().length(0, Some(3), true).unwrap();
        // Three characters even though the UTF-8 encoding is longer.
        let value = Value::from("äöü");
        assert!(short.check_sync(&value, None, None, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_range_max_exclusivity() {
        let closed = schema::number().range(0.0, Some(1.0), true).unwrap();
        let open = schema::number().range(0.0, Some(1.0), false).unwrap();
        let one = Value::from(1.0);
        assert!(closed.check_sync(&one, None, None, &[]).unwrap().is_empty());
        let errors = open.check_sync(&one, None, None, &[]).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "greater than 1");
    }

    #[test]
    fn test_int_and_float_partition() {
        let int = schema::number().int().unwrap();
        let float = schema::number().float().unwrap();

        assert!(int.check_sync(&Value::from(3), None, None, &[]).unwrap().is_empty());
        assert_eq!(int.check_sync(&Value::from(3.5), None, None, &[]).unwrap().len(), 1);

        assert!(float.check_sync(&Value::from(3.5), None, None, &[]).unwrap().is_empty());
        assert_eq!(float.check_sync(&Value::from(3), None, None, &[]).unwrap().len(), 1);
    }

    #[test]
    fn test_refinement_skips_foreign_kinds() {
        // A wrong-shaped value is the base check's report; the range
        // rule itself stays quiet.
        let ranged = schema::number().range(0.0, Some(1.0), true).unwrap();
        let errors = ranged
            .check_sync(&Value::from("not a number"), None, None, &[])
            .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "not a number");
    }

    #[test]
    fn test_date_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let year = schema::date().date_range(start, Some(end), true).unwrap();

        let inside = Value::from(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(year.check_sync(&inside, None, None, &[]).unwrap().is_empty());

        let before = Value::from(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap());
        let errors = year.check_sync(&before, None, None, &[]).unwrap();
        assert_eq!(errors.len(), 1);

        assert!(schema::date().date_range(end, Some(start), true).is_err());
    }
}
