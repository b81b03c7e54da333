//! Synchronous validation example.
//!
//! Builds a descriptor tree for a signup form, checks a valid and an
//! invalid submission, and prints the path-qualified errors.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p value-schema-core --example signup_form
//! ```

use regex::Regex;
use value_schema_core::{Value, schema};

fn main() {
    let signup = schema::object([
        (
            "email",
            schema::string()
                .pattern(Regex::new("^[^@]+@[^@]+$").unwrap())
                .unwrap(),
        ),
        ("age", schema::number().int().unwrap().nullable()),
        (
            "plan",
            schema::enumeration([Value::from("free"), Value::from("pro")]),
        ),
        ("tags", schema::array([schema::string()])),
    ]);

    let good = Value::object([
        ("email", Value::from("ada@example.com")),
        ("age", Value::Null),
        ("plan", Value::from("pro")),
        ("tags", Value::Array(vec![Value::from("early-adopter")])),
    ]);
    println!("good submission: {:?}", signup.validate_sync(&good));

    let bad = Value::object([
        ("email", Value::from("not-an-address")),
        ("age", Value::from(36.5)),
        ("plan", Value::from("enterprise")),
        ("tags", Value::Array(vec![Value::from(1)])),
    ]);

    let errors = signup.check_sync(&bad, None, None, &[]).unwrap();
    println!("bad submission, {} error(s):", errors.len());
    for error in &errors {
        println!("  {}: {}", error.path.join("."), error.message);
    }
}
