//! The custom-rule contract.
//!
//! Every caller-supplied rule receives the value under check, the record
//! it came from (if any), its key on that record, and the path used to
//! qualify errors. It reports at most one message; `None` means the rule
//! passed.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::value::Value;

/// Signature of a synchronous rule: `(value, parent, key, path)` to an
/// optional message.
pub type SyncRuleFn =
    dyn Fn(&Value, Option<&Value>, Option<&str>, &[String]) -> Option<String> + Send + Sync;

/// Signature of an asynchronous rule. Arguments are owned so the produced
/// future is `'static` and can outlive the call frame that issued it.
pub type AsyncRuleFn = dyn Fn(Value, Option<Value>, Option<String>, Vec<String>) -> BoxFuture<'static, Option<String>>
    + Send
    + Sync;

/// A custom rule chained onto a descriptor.
///
/// Rules run in registration order on the synchronous path and are issued
/// together on the asynchronous one. A [`Rule::Async`] reached from a
/// synchronous check is a usage error
/// ([`SchemaError::AsyncRuleInSyncCheck`](crate::SchemaError::AsyncRuleInSyncCheck)).
#[derive(Clone)]
pub enum Rule {
    /// Runs inline on either check path.
    Sync(Arc<SyncRuleFn>),
    /// Runs only on the asynchronous check path.
    Async(Arc<AsyncRuleFn>),
}

impl Rule {
    /// Wraps a synchronous closure.
    pub fn sync<F>(rule: F) -> Self
    where
        F: Fn(&Value, Option<&Value>, Option<&str>, &[String]) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        Rule::Sync(Arc::new(rule))
    }

    /// Wraps a closure producing a future.
    pub fn asynchronous<F, Fut>(rule: F) -> Self
    where
        F: Fn(Value, Option<Value>, Option<String>, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<String>> + Send + 'static,
    {
        Rule::Async(Arc::new(move |value, parent, key, path| {
            rule(value, parent, key, path).boxed()
        }))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Sync(_) => f.write_str("Rule::Sync(..)"),
            Rule::Async(_) => f.write_str("Rule::Async(..)"),
        }
    }
}
