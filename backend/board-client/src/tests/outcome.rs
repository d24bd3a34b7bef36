use crate::error::{ClientError, RequestError};
use crate::executor::GuardedOutcome;

#[test]
fn given_success_when_into_result_then_returns_payload() {
    let outcome = GuardedOutcome::Success(7);

    assert_eq!(outcome.into_result().ok(), Some(7));
}

/// **VALUE**: `Unauthenticated` maps to a dedicated error rather than a request failure.
///
/// **BUG THIS CATCHES**: Would catch callers using `?` losing the ability to tell an expired
/// session apart from a server error.
#[test]
fn given_unauthenticated_when_into_result_then_returns_unauthenticated_error() {
    let outcome: GuardedOutcome<()> = GuardedOutcome::Unauthenticated;

    let error = outcome.into_result().expect_err("should fail");

    assert!(error.is_unauthenticated());
}

#[test]
fn given_failure_when_into_result_then_wraps_request_error() {
    let outcome: GuardedOutcome<()> = GuardedOutcome::Failure(RequestError::parse("nope"));

    match outcome.into_result() {
        Err(ClientError::Request(error)) => assert_eq!(error.message(), "nope"),
        other => panic!("expected request error, got {other:?}"),
    }
}

#[test]
fn given_outcomes_when_mapped_then_only_success_payload_changes() {
    assert_eq!(
        GuardedOutcome::Success(2).map(|n| n * 10),
        GuardedOutcome::Success(20)
    );
    assert_eq!(
        GuardedOutcome::<i32>::Unauthenticated.map(|n| n * 10),
        GuardedOutcome::Unauthenticated
    );

    let failure = GuardedOutcome::<i32>::Failure(RequestError::parse("x")).map(|n| n * 10);
    assert!(failure.failure().is_some());
}
