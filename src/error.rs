//! Error types for session establishment and for the banking flows themselves.

use fantoccini::error::{CmdError, NewSessionError};
use http::StatusCode;
use hyper::Error as HError;
use hyper_util::client::legacy::Error as ClientError;
use std::error::Error;
use std::fmt;
use std::io::Error as IOError;
use url::ParseError;

/// An error occurred while bringing up the browsing session for a run.
#[derive(Debug)]
pub enum SetupError {
    /// An environment variable was set to a value the configuration cannot use.
    BadEnv {
        /// Name of the offending variable.
        key: &'static str,
        /// The value it held.
        value: String,
    },
    /// A configured URL could not be parsed.
    BadUrl(ParseError),
    /// The TLS backend for the REST client could not be initialized.
    Tls(IOError),
    /// The WebDriver server refused or failed to create a session.
    Webdriver(NewSessionError),
    /// The application's entry page did not become ready in bound.
    Entry(CmdError),
}

impl Error for SetupError {
    fn description(&self) -> &str {
        match *self {
            SetupError::BadEnv { .. } => "environment variable holds an unusable value",
            SetupError::BadUrl(..) => "configured url is invalid",
            SetupError::Tls(..) => "tls backend could not be initialized",
            SetupError::Webdriver(..) => "webdriver session could not be established",
            SetupError::Entry(..) => "entry page never became ready",
        }
    }

    fn cause(&self) -> Option<&dyn Error> {
        match *self {
            SetupError::BadEnv { .. } => None,
            SetupError::BadUrl(ref e) => Some(e),
            SetupError::Tls(ref e) => Some(e),
            SetupError::Webdriver(ref e) => Some(e),
            SetupError::Entry(ref e) => Some(e),
        }
    }
}

impl fmt::Display for SetupError {
    #[allow(deprecated)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.description())?;
        match *self {
            SetupError::BadEnv { key, ref value } => write!(f, "{}={:?}", key, value),
            SetupError::BadUrl(ref e) => write!(f, "{}", e),
            SetupError::Tls(ref e) => write!(f, "{}", e),
            SetupError::Webdriver(ref e) => write!(f, "{}", e),
            SetupError::Entry(ref e) => write!(f, "{}", e),
        }
    }
}

impl From<ParseError> for SetupError {
    fn from(e: ParseError) -> Self {
        SetupError::BadUrl(e)
    }
}

impl From<NewSessionError> for SetupError {
    fn from(e: NewSessionError) -> Self {
        SetupError::Webdriver(e)
    }
}

/// An error occurred while driving or verifying a banking flow.
#[derive(Debug)]
pub enum FlowError {
    /// A screen that a navigation step targets did not become ready in bound.
    Navigation {
        /// The screen that never appeared.
        target: &'static str,
    },

    /// The registration confirmation was not observed in bound, or the form
    /// was redisplayed with a rejection.
    Registration {
        /// The username the registration was attempted with.
        username: String,
    },

    /// A login attempt was not accepted in bound.
    Login {
        /// The username the login was attempted with.
        username: String,
    },

    /// The accounts overview never listed the requested account.
    AccountNotFound {
        /// The account number that was looked up.
        account: String,
    },

    /// An expected-vs-actual check failed.
    ///
    /// Both sides are carried so a failed run names the value it saw, not
    /// just the step that tripped.
    Mismatch {
        /// What was being checked.
        check: &'static str,
        /// The value the flow required.
        expected: String,
        /// The value actually observed.
        actual: String,
    },

    /// The bank's REST surface answered with a status the flow does not accept.
    UnexpectedStatus(StatusCode),

    /// A balance or amount string could not be parsed losslessly into cents.
    Currency {
        /// The text that was rejected.
        text: String,
    },

    /// A REST call did not complete within its bound.
    RequestTimeout,

    /// A WebDriver command failed underneath a flow step.
    WebDriver(CmdError),

    /// The REST request could not be sent, or the connection failed mid-flight.
    Request(ClientError),

    /// The REST response body could not be read.
    Body(HError),

    /// The REST request could not be constructed.
    Http(http::Error),

    /// The REST response body was not the JSON shape the flow expects.
    Json(serde_json::Error),

    /// A URL built for the REST surface was invalid.
    BadUrl(ParseError),
}

impl Error for FlowError {
    fn description(&self) -> &str {
        match *self {
            FlowError::Navigation { .. } => "screen never became ready",
            FlowError::Registration { .. } => "registration was not confirmed",
            FlowError::Login { .. } => "login was not accepted",
            FlowError::AccountNotFound { .. } => "account not listed in overview",
            FlowError::Mismatch { .. } => "verification mismatch",
            FlowError::UnexpectedStatus(..) => "unexpected status from bank api",
            FlowError::Currency { .. } => "text is not a currency amount",
            FlowError::RequestTimeout => "bank api request did not complete in time",
            FlowError::WebDriver(..) => "webdriver command failed",
            FlowError::Request(..) => "bank api could not be reached",
            FlowError::Body(..) => "bank api response could not be read",
            FlowError::Http(..) => "bank api request could not be built",
            FlowError::Json(..) => "bank api returned malformed records",
            FlowError::BadUrl(..) => "bad url built for bank api",
        }
    }

    fn cause(&self) -> Option<&dyn Error> {
        match *self {
            FlowError::Navigation { .. }
            | FlowError::Registration { .. }
            | FlowError::Login { .. }
            | FlowError::AccountNotFound { .. }
            | FlowError::Mismatch { .. }
            | FlowError::UnexpectedStatus(..)
            | FlowError::Currency { .. }
            | FlowError::RequestTimeout => None,
            FlowError::WebDriver(ref e) => Some(e),
            FlowError::Request(ref e) => Some(e),
            FlowError::Body(ref e) => Some(e),
            FlowError::Http(ref e) => Some(e),
            FlowError::Json(ref e) => Some(e),
            FlowError::BadUrl(ref e) => Some(e),
        }
    }
}

impl fmt::Display for FlowError {
    #[allow(deprecated)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.description())?;
        match *self {
            FlowError::Navigation { target } => write!(f, "{}", target),
            FlowError::Registration { ref username } => write!(f, "{}", username),
            FlowError::Login { ref username } => write!(f, "{}", username),
            FlowError::AccountNotFound { ref account } => write!(f, "{}", account),
            FlowError::Mismatch {
                check,
                ref expected,
                ref actual,
            } => write!(f, "{} (expected {}, got {})", check, expected, actual),
            FlowError::UnexpectedStatus(ref status) => write!(f, "{}", status),
            FlowError::Currency { ref text } => write!(f, "{:?}", text),
            FlowError::RequestTimeout => Ok(()),
            FlowError::WebDriver(ref e) => write!(f, "{}", e),
            FlowError::Request(ref e) => write!(f, "{}", e),
            FlowError::Body(ref e) => write!(f, "{}", e),
            FlowError::Http(ref e) => write!(f, "{}", e),
            FlowError::Json(ref e) => write!(f, "{}", e),
            FlowError::BadUrl(ref e) => write!(f, "{}", e),
        }
    }
}

impl From<CmdError> for FlowError {
    fn from(e: CmdError) -> Self {
        FlowError::WebDriver(e)
    }
}

impl From<ClientError> for FlowError {
    fn from(e: ClientError) -> Self {
        FlowError::Request(e)
    }
}

impl From<HError> for FlowError {
    fn from(e: HError) -> Self {
        FlowError::Body(e)
    }
}

impl From<http::Error> for FlowError {
    fn from(e: http::Error) -> Self {
        FlowError::Http(e)
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::Json(e)
    }
}

impl From<ParseError> for FlowError {
    fn from(e: ParseError) -> Self {
        FlowError::BadUrl(e)
    }
}

/// Error of parsing text that is not shaped like a currency amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadCurrency {
    pub(crate) text: String,
}

impl BadCurrency {
    pub(crate) fn new(text: &str) -> Self {
        BadCurrency {
            text: text.to_string(),
        }
    }
}

impl fmt::Display for BadCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a currency amount: {:?}", self.text)
    }
}

impl Error for BadCurrency {}

impl From<BadCurrency> for FlowError {
    fn from(e: BadCurrency) -> Self {
        FlowError::Currency { text: e.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_display_error_doesnt_stackoverflow() {
        println!(
            "{}",
            FlowError::Mismatch {
                check: "final balance",
                expected: "$70.00".to_string(),
                actual: "$80.00".to_string(),
            }
        );
        println!(
            "{}",
            SetupError::BadEnv {
                key: "PARABANK_WAIT_TIMEOUT_SECS",
                value: "soon".to_string(),
            }
        );
        println!("{}", FlowError::from(BadCurrency::new("ten dollars")));
    }

    #[test]
    fn mismatch_display_carries_both_sides() {
        let e = FlowError::Mismatch {
            check: "transfer confirmation",
            expected: "Transfer Complete!".to_string(),
            actual: "Error!".to_string(),
        };
        let shown = e.to_string();
        assert!(shown.contains("Transfer Complete!"));
        assert!(shown.contains("Error!"));
    }
}
