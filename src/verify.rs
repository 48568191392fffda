//! Expected-vs-actual checks that fail with both sides attached.
//!
//! Every check takes a short name for the thing being verified; a failure
//! carries that name and both values, so the journey that tripped it reads
//! like a diagnosis instead of a stack trace.

use http::StatusCode;
use std::fmt;
use tracing::{debug, warn};

use crate::error::FlowError;
use crate::money::Money;

/// Require `actual` to equal `expected`.
pub fn equals<T>(check: &'static str, expected: T, actual: T) -> Result<(), FlowError>
where
    T: PartialEq + fmt::Display,
{
    if expected == actual {
        debug!(check, expected = %expected, "verified");
        return Ok(());
    }
    let expected = expected.to_string();
    let actual = actual.to_string();
    warn!(check, expected, actual, "mismatch");
    Err(FlowError::Mismatch {
        check,
        expected,
        actual,
    })
}

/// Require the JSON-reported `actual` to sit within half a cent of
/// `expected`.
pub fn close_to(check: &'static str, expected: Money, actual: f64) -> Result<(), FlowError> {
    if expected.close_to(actual) {
        debug!(check, expected = %expected, actual, "verified");
        return Ok(());
    }
    let expected = expected.to_string();
    let actual = actual.to_string();
    warn!(check, expected, actual, "mismatch");
    Err(FlowError::Mismatch {
        check,
        expected,
        actual,
    })
}

/// Require `condition` to hold.
pub fn holds(check: &'static str, condition: bool) -> Result<(), FlowError> {
    if condition {
        debug!(check, "verified");
        return Ok(());
    }
    warn!(check, "condition does not hold");
    Err(FlowError::Mismatch {
        check,
        expected: "true".to_owned(),
        actual: "false".to_owned(),
    })
}

/// Require the backend to have answered with `expected`.
pub fn status(expected: StatusCode, actual: StatusCode) -> Result<(), FlowError> {
    if expected == actual {
        debug!(status = %actual, "verified response status");
        return Ok(());
    }
    warn!(expected = %expected, actual = %actual, "unexpected response status");
    Err(FlowError::UnexpectedStatus(actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_pass() {
        assert!(equals("banner", "Transfer Complete!", "Transfer Complete!").is_ok());
    }

    #[test]
    fn a_mismatch_carries_both_sides() {
        let err = equals("banner", "Transfer Complete!", "Error!").unwrap_err();
        match err {
            FlowError::Mismatch {
                check,
                expected,
                actual,
            } => {
                assert_eq!(check, "banner");
                assert_eq!(expected, "Transfer Complete!");
                assert_eq!(actual, "Error!");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn money_within_half_a_cent_passes() {
        assert!(close_to("amount", Money::from_cents(2_000), 20.0).is_ok());
        assert!(close_to("amount", Money::from_cents(2_000), 20.004).is_ok());
        assert!(close_to("amount", Money::from_cents(2_000), 20.02).is_err());
    }

    #[test]
    fn statuses_must_match_exactly() {
        assert!(status(StatusCode::OK, StatusCode::OK).is_ok());
        assert!(matches!(
            status(StatusCode::OK, StatusCode::SERVICE_UNAVAILABLE),
            Err(FlowError::UnexpectedStatus(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[test]
    fn holds_reports_the_failed_check() {
        assert!(holds("account listed", true).is_ok());
        assert!(holds("account listed", false).is_err());
    }
}
