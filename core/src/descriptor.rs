//! The descriptor base: check protocol, copy-on-configure refinement,
//! and custom-rule execution.
//!
//! A [`Descriptor`] is an immutable value object. Refinements
//! ([`nullable`](Descriptor::nullable), [`custom`](Descriptor::custom),
//! and the kind-specific methods in `refine`) clone the receiver and
//! return the refined clone, so refining a descriptor never changes an
//! ancestor tree that already holds it.
//!
//! The two check paths agree on the set of reported errors but not on
//! execution order: the synchronous path runs the base check first and
//! custom rules second, while the asynchronous path issues both passes
//! concurrently and concatenates `[base, custom]` once both settle. A
//! custom rule therefore must not assume the base check has already run
//! when it executes on the asynchronous path.

use futures::FutureExt;
use futures::future::{self, BoxFuture, join_all};

use crate::error::{ErrorMessage, SchemaError, ValidateError};
use crate::kind::Kind;
use crate::rule::Rule;
use crate::value::Value;

/// An immutable type descriptor.
///
/// Built through the [`schema`](crate::schema) facade and refined by
/// chaining; every chain step allocates a new descriptor.
///
/// # Examples
///
/// ```
/// use value_schema_core::{schema, Value};
///
/// let user = schema::object([
///     ("name", schema::string()),
///     ("age", schema::number().int().unwrap()),
/// ]);
///
/// let ok = Value::object([("name", Value::from("ada")), ("age", Value::from(36))]);
/// assert!(user.check_sync(&ok, None, None, &[]).unwrap().is_empty());
///
/// let bad = Value::object([("name", Value::from("ada")), ("age", Value::from("36"))]);
/// let errors = user.check_sync(&bad, None, None, &[]).unwrap();
/// assert_eq!(errors[0].path, vec!["age"]);
/// ```
#[derive(Debug, Clone)]
pub struct Descriptor {
    kind: Kind,
    nullable: bool,
    rules: Vec<Rule>,
}

impl Descriptor {
    pub(crate) fn new(kind: Kind) -> Self {
        Self {
            kind,
            nullable: false,
            rules: Vec::new(),
        }
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Clones the receiver with one more rule appended. Existing rules
    /// survive, preserving registration order.
    pub(crate) fn with_rule(&self, rule: Rule) -> Self {
        let mut refined = self.clone();
        refined.rules.push(rule);
        refined
    }

    /// Returns a clone that accepts null values.
    ///
    /// A nullable descriptor checking a null runs nothing at all — no
    /// base check, no custom rules — and reports zero errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, Value};
    ///
    /// let required = schema::string();
    /// assert_eq!(required.check_sync(&Value::Null, None, None, &[]).unwrap().len(), 1);
    /// assert!(required.nullable().check_sync(&Value::Null, None, None, &[]).unwrap().is_empty());
    /// ```
    #[must_use]
    pub fn nullable(&self) -> Self {
        let mut refined = self.clone();
        refined.nullable = true;
        refined
    }

    /// Returns a clone with a synchronous custom rule appended.
    ///
    /// The rule receives `(value, parent, key, path)` where `path`
    /// already includes the value's own key; a returned message is
    /// recorded at the path *without* that trailing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, Value};
    ///
    /// let even = schema::number()
    ///     .custom(|value, _, _, _| match value.as_number() {
    ///         Some(n) if n % 2.0 != 0.0 => Some("not even".into()),
    ///         _ => None,
    ///     });
    ///
    /// assert!(even.check_sync(&Value::from(4), None, None, &[]).unwrap().is_empty());
    /// assert_eq!(
    ///     even.check_sync(&Value::from(3), None, None, &[]).unwrap()[0].message,
    ///     "not even",
    /// );
    /// ```
    #[must_use]
    pub fn custom<F>(&self, rule: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, Option<&str>, &[String]) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.with_rule(Rule::sync(rule))
    }

    /// Returns a clone with an asynchronous custom rule appended.
    ///
    /// Async rules only run on the [`check`](Descriptor::check) /
    /// [`validate`](Descriptor::validate) path; reaching one from a
    /// synchronous check is a [`SchemaError::AsyncRuleInSyncCheck`]
    /// usage error.
    #[must_use]
    pub fn custom_async<F, Fut>(&self, rule: F) -> Self
    where
        F: Fn(Value, Option<Value>, Option<String>, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        self.with_rule(Rule::asynchronous(rule))
    }

    /// Checks `value` synchronously, returning every validation error
    /// found. Validation failures never surface as `Err`; the only
    /// failure is the usage error of reaching an async rule.
    ///
    /// Root calls pass `(value, None, None, &[])`; recursion fills in
    /// the parent record, own key, and path.
    pub fn check_sync(
        &self,
        value: &Value,
        parent: Option<&Value>,
        key: Option<&str>,
        path: &[String],
    ) -> Result<Vec<ErrorMessage>, SchemaError> {
        if self.nullable && value.is_null() {
            return Ok(Vec::new());
        }
        let mut errors = self.kind.base_check_sync(value, parent, key, path)?;
        errors.extend(self.run_rules_sync(value, parent, key, path)?);
        Ok(errors)
    }

    /// Checks `value` asynchronously.
    ///
    /// The base check and the whole custom-rule pass run concurrently;
    /// their results are concatenated `[base, custom]` once both settle.
    /// Child checks of objects and arrays are all issued before any is
    /// awaited, so independent suspending children overlap.
    pub fn check<'a>(
        &'a self,
        value: &'a Value,
        parent: Option<&'a Value>,
        key: Option<&'a str>,
        path: &[String],
    ) -> BoxFuture<'a, Vec<ErrorMessage>> {
        let path = path.to_vec();
        async move {
            if self.nullable && value.is_null() {
                return Vec::new();
            }
            let (mut errors, custom) = futures::join!(
                self.kind.base_check(value, parent, key, &path),
                self.run_rules(value, parent, key, &path),
            );
            errors.extend(custom);
            errors
        }
        .boxed()
    }

    /// Checks `value` synchronously and fails if any error was found.
    ///
    /// # Examples
    ///
    /// ```
    /// use value_schema_core::{schema, Value, ValidateError};
    ///
    /// let name = schema::string();
    /// assert!(name.validate_sync(&Value::from("ada")).is_ok());
    ///
    /// let err = name.validate_sync(&Value::from(1)).unwrap_err();
    /// let ValidateError::Invalid(errors) = err else { panic!("expected Invalid") };
    /// assert_eq!(errors.len(), 1);
    /// ```
    pub fn validate_sync(&self, value: &Value) -> Result<(), ValidateError> {
        let errors = self.check_sync(value, None, None, &[])?;
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = errors.len(), "validation failed");
            Err(ValidateError::Invalid(errors))
        }
    }

    /// Checks `value` asynchronously and fails if any error was found.
    pub async fn validate(&self, value: &Value) -> Result<(), ValidateError> {
        let errors = self.check(value, None, None, &[]).await;
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(errors = errors.len(), "validation failed");
            Err(ValidateError::Invalid(errors))
        }
    }

    /// Returns [`check_sync`](Descriptor::check_sync) as a standalone
    /// root-level closure bound to a clone of this descriptor.
    pub fn sync_checker(
        &self,
    ) -> impl Fn(&Value) -> Result<Vec<ErrorMessage>, SchemaError> + Send + Sync + 'static {
        let descriptor = self.clone();
        move |value: &Value| descriptor.check_sync(value, None, None, &[])
    }

    /// Returns [`check`](Descriptor::check) as a standalone root-level
    /// closure bound to a clone of this descriptor.
    pub fn async_checker(
        &self,
    ) -> impl Fn(Value) -> BoxFuture<'static, Vec<ErrorMessage>> + Send + Sync + 'static {
        let descriptor = self.clone();
        move |value| {
            let descriptor = descriptor.clone();
            async move { descriptor.check(&value, None, None, &[]).await }.boxed()
        }
    }

    /// Returns [`validate_sync`](Descriptor::validate_sync) as a
    /// standalone closure bound to a clone of this descriptor.
    pub fn sync_validator(
        &self,
    ) -> impl Fn(&Value) -> Result<(), ValidateError> + Send + Sync + 'static {
        let descriptor = self.clone();
        move |value: &Value| descriptor.validate_sync(value)
    }

    /// Returns [`validate`](Descriptor::validate) as a standalone
    /// closure bound to a clone of this descriptor.
    pub fn async_validator(
        &self,
    ) -> impl Fn(Value) -> BoxFuture<'static, Result<(), ValidateError>> + Send + Sync + 'static {
        let descriptor = self.clone();
        move |value| {
            let descriptor = descriptor.clone();
            async move { descriptor.validate(&value).await }.boxed()
        }
    }

    /// Runs custom rules in registration order. The rule is handed
    /// `path + [key]`; its message is recorded at the incoming `path`.
    fn run_rules_sync(
        &self,
        value: &Value,
        parent: Option<&Value>,
        key: Option<&str>,
        path: &[String],
    ) -> Result<Vec<ErrorMessage>, SchemaError> {
        if self.rules.is_empty() {
            return Ok(Vec::new());
        }
        let rule_path = qualified_path(path, key);
        let mut errors = Vec::new();
        for rule in &self.rules {
            match rule {
                Rule::Sync(run) => {
                    if let Some(message) = run(value, parent, key, &rule_path) {
                        errors.push(ErrorMessage::new(path.to_vec(), message));
                    }
                }
                Rule::Async(_) => return Err(SchemaError::AsyncRuleInSyncCheck),
            }
        }
        Ok(errors)
    }

    /// Issues every custom rule before awaiting any; results keep
    /// registration order. Synchronous rules are evaluated at issue
    /// time, async rules get owned argument clones.
    async fn run_rules(
        &self,
        value: &Value,
        parent: Option<&Value>,
        key: Option<&str>,
        path: &[String],
    ) -> Vec<ErrorMessage> {
        if self.rules.is_empty() {
            return Vec::new();
        }
        let rule_path = qualified_path(path, key);
        let pending: Vec<BoxFuture<'static, Option<String>>> = self
            .rules
            .iter()
            .map(|rule| match rule {
                Rule::Sync(run) => future::ready(run(value, parent, key, &rule_path)).boxed(),
                Rule::Async(run) => run(
                    value.clone(),
                    parent.cloned(),
                    key.map(str::to_owned),
                    rule_path.clone(),
                ),
            })
            .collect();
        join_all(pending)
            .await
            .into_iter()
            .flatten()
            .map(|message| ErrorMessage::new(path.to_vec(), message))
            .collect()
    }
}

fn qualified_path(path: &[String], key: Option<&str>) -> Vec<String> {
    match key {
        Some(key) => {
            let mut qualified = path.to_vec();
            qualified.push(key.to_string());
            qualified
        }
        None => path.to_vec(),
    }
}
