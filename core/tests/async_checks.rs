use std::time::Duration;

use tokio::time::{Instant, sleep};
use value_schema_core::{ValidateError, Value, schema};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sorted(errors: Vec<value_schema_core::ErrorMessage>) -> Vec<(Vec<String>, String)> {
    let mut pairs: Vec<_> = errors.into_iter().map(|e| (e.path, e.message)).collect();
    pairs.sort();
    pairs
}

// ---------------------------------------------------------------------------
// Sync/async agreement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sync_and_async_agree_on_error_set() {
    let descriptor = schema::object([
        ("name", schema::string()),
        ("score", schema::number().range(0.0, Some(10.0), true).unwrap()),
        ("tags", schema::array([schema::string(), schema::number()])),
        ("mode", schema::enumeration([Value::from("a"), Value::from("b")])),
    ]);
    let value = Value::object([
        ("name", Value::from(1)),
        ("score", Value::from(11)),
        ("tags", Value::Array(vec![Value::from(true), Value::from("ok")])),
        ("mode", Value::from("c")),
    ]);

    let sync_errors = descriptor.check_sync(&value, None, None, &[]).unwrap();
    let async_errors = descriptor.check(&value, None, None, &[]).await;

    assert_eq!(sorted(sync_errors), sorted(async_errors));
}

#[tokio::test]
async fn test_sync_and_async_agree_on_success() {
    let descriptor = schema::object([
        ("id", schema::number().int().unwrap()),
        ("alias", schema::string().nullable()),
    ]);
    let value = Value::object([("id", Value::from(7)), ("alias", Value::Null)]);

    assert!(descriptor.check_sync(&value, None, None, &[]).unwrap().is_empty());
    assert!(descriptor.check(&value, None, None, &[]).await.is_empty());
    assert!(descriptor.validate(&value).await.is_ok());
}

// ---------------------------------------------------------------------------
// Async custom rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_async_rule_runs_and_records_incoming_path() {
    let descriptor = schema::string().custom_async(|_, _, key, rule_path| async move {
        // The rule itself is handed the qualified path.
        assert_eq!(key.as_deref(), Some("name"));
        assert_eq!(rule_path, vec!["user".to_string(), "name".to_string()]);
        Some("flagged".to_string())
    });

    let errors = descriptor
        .check(&Value::from("x"), None, Some("name"), &["user".to_string()])
        .await;

    // The recorded path drops the trailing own key.
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, vec!["user"]);
    assert_eq!(errors[0].message, "flagged");
}

#[tokio::test(start_paused = true)]
async fn test_async_rule_results_keep_registration_order() {
    let descriptor = schema::string()
        .custom_async(|_, _, _, _| async {
            sleep(Duration::from_millis(30)).await;
            Some("slow first".to_string())
        })
        .custom_async(|_, _, _, _| async { Some("fast second".to_string()) });

    let errors = descriptor.check(&Value::from("x"), None, None, &[]).await;
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["slow first", "fast second"]);
}

#[tokio::test]
async fn test_base_errors_precede_custom_errors_in_async_output() {
    let descriptor = schema::number().custom_async(|_, _, _, _| async {
        Some("custom".to_string())
    });

    let errors = descriptor.check(&Value::from("x"), None, None, &[]).await;
    assert_eq!(errors[0].message, "not a number");
    assert_eq!(errors[1].message, "custom");
}

#[tokio::test]
async fn test_nullable_skips_async_rules() {
    let descriptor = schema::string()
        .custom_async(|_, _, _, _| async { panic!("rule must not run for null") })
        .nullable();

    assert!(descriptor.check(&Value::Null, None, None, &[]).await.is_empty());
}

#[tokio::test]
async fn test_async_validator_binder() {
    let validate = schema::object([(
        "token",
        schema::string().custom_async(|value, _, _, _| async move {
            // Stand-in for a lookup that suspends.
            sleep(Duration::from_millis(1)).await;
            (value.as_str() != Some("valid")).then(|| "unknown token".to_string())
        }),
    )])
    .async_validator();

    let ok = Value::object([("token", Value::from("valid"))]);
    assert!(validate(ok).await.is_ok());

    let bad = Value::object([("token", Value::from("expired"))]);
    let err = validate(bad).await.unwrap_err();
    let ValidateError::Invalid(errors) = err else {
        panic!("expected Invalid, got {err:?}");
    };
    assert_eq!(errors[0].message, "unknown token");
}

// ---------------------------------------------------------------------------
// Fan-out latency
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_object_fields_fan_out_concurrently() {
    let delayed = |label: &'static str| {
        schema::string().custom_async(move |_, _, _, _| async move {
            sleep(Duration::from_millis(50)).await;
            Some(label.to_string())
        })
    };
    let descriptor = schema::object([("a", delayed("a slow")), ("b", delayed("b slow"))]);
    let value = Value::object([("a", Value::from("x")), ("b", Value::from("y"))]);

    let start = Instant::now();
    let errors = descriptor.check(&value, None, None, &[]).await;
    let elapsed = start.elapsed();

    assert_eq!(errors.len(), 2);
    // Two 50ms children overlap: bounded by the slowest, not the sum.
    assert!(elapsed >= Duration::from_millis(50), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(100), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_base_and_custom_passes_run_concurrently() {
    let descriptor = schema::object([(
        "field",
        schema::string().custom_async(|_, _, _, _| async {
            sleep(Duration::from_millis(50)).await;
            None
        }),
    )])
    .custom_async(|_, _, _, _| async {
        sleep(Duration::from_millis(50)).await;
        None
    });
    let value = Value::object([("field", Value::from("x"))]);

    let start = Instant::now();
    let errors = descriptor.check(&value, None, None, &[]).await;
    let elapsed = start.elapsed();

    assert!(errors.is_empty());
    assert!(elapsed < Duration::from_millis(100), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_array_elements_fan_out_concurrently() {
    let slow_string = schema::string().custom_async(|_, _, _, _| async {
        sleep(Duration::from_millis(50)).await;
        None
    });
    let descriptor = schema::array([slow_string]);
    let value = Value::Array(vec![
        Value::from("a"),
        Value::from("b"),
        Value::from("c"),
        Value::from("d"),
    ]);

    let start = Instant::now();
    let errors = descriptor.check(&value, None, None, &[]).await;
    let elapsed = start.elapsed();

    assert!(errors.is_empty());
    assert!(elapsed < Duration::from_millis(100), "elapsed {elapsed:?}");
}

// ---------------------------------------------------------------------------
// Async array any-of
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_async_array_any_of_matches_sync_policy() {
    let descriptor = schema::array([schema::string(), schema::number()]);
    let value = Value::Array(vec![Value::from("x"), Value::from(1), Value::from(true)]);

    let errors = descriptor.check(&value, None, None, &[]).await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, Vec::<String>::new());
    assert_eq!(errors[0].message, "no matching element type");
}

#[tokio::test(start_paused = true)]
async fn test_element_matches_when_any_alternative_settles_clean() {
    // One alternative rejects after a delay, the other accepts.
    let picky = schema::string().custom_async(|_, _, _, _| async {
        sleep(Duration::from_millis(20)).await;
        Some("rejected".to_string())
    });
    let descriptor = schema::array([picky, schema::string()]);
    let value = Value::Array(vec![Value::from("x")]);

    assert!(descriptor.check(&value, None, None, &[]).await.is_empty());
}
