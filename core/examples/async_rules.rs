//! Asynchronous validation example.
//!
//! Chains an async custom rule (a stand-in for a database lookup) onto a
//! field descriptor and shows that sibling fields are checked
//! concurrently: two 100ms rules finish in roughly 100ms, not 200ms.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p value-schema-core --example async_rules
//! ```

use std::time::{Duration, Instant};

use value_schema_core::{Value, schema};

fn taken_usernames() -> &'static [&'static str] {
    &["admin", "root"]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let lookup = |value: Value| async move {
        // Simulated remote check.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let taken = value
            .as_str()
            .is_some_and(|name| taken_usernames().contains(&name));
        taken.then(|| "username is taken".to_string())
    };

    let account = schema::object([
        (
            "username",
            schema::string().custom_async(move |value, _, _, _| lookup(value)),
        ),
        (
            "invited_by",
            schema::string().custom_async(move |value, _, _, _| lookup(value)),
        ),
    ]);

    let value = Value::object([
        ("username", Value::from("admin")),
        ("invited_by", Value::from("ada")),
    ]);

    let start = Instant::now();
    let errors = account.check(&value, None, None, &[]).await;
    let elapsed = start.elapsed();

    println!("checked both fields in {elapsed:.2?}");
    for error in &errors {
        println!("  {}: {}", error.path.join("."), error.message);
    }
}
