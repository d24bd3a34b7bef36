use crate::{ModelError, PageLimit};

/// **VALUE**: Verifies that a zero page size is rejected.
///
/// **WHY THIS MATTERS**: With `limit = 0` the backend silently applies its own default,
/// which breaks the keyed-array end-of-results rule (a full batch is compared to the limit).
///
/// **BUG THIS CATCHES**: Would catch if the lower bound check is dropped.
#[test]
fn given_zero_when_creating_page_limit_then_returns_validation_error() {
    let result = PageLimit::new(0);

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Page limit 0 out of range (1-100)");
        }
        Ok(limit) => panic!("expected validation error, got {limit:?}"),
    }
}

#[test]
fn given_limit_above_backend_max_when_creating_page_limit_then_returns_validation_error() {
    assert!(PageLimit::new(101).is_err());
}

#[test]
fn given_bounds_when_creating_page_limit_then_accepts_both_ends() {
    assert_eq!(PageLimit::new(1).map(|l| l.get()).ok(), Some(1));
    assert_eq!(PageLimit::new(100).map(|l| l.get()).ok(), Some(100));
}

/// **VALUE**: Deserialization goes through the same validation as `new`.
///
/// **BUG THIS CATCHES**: Would catch a plain `#[derive(Deserialize)]` that lets a config
/// file smuggle in `page_size = 0`.
#[test]
fn given_out_of_range_json_when_deserializing_page_limit_then_fails() {
    let result: Result<PageLimit, _> = serde_json::from_str("0");
    assert!(result.is_err());

    let ok: PageLimit = serde_json::from_str("25").expect("25 is valid");
    assert_eq!(ok.get(), 25);
}
