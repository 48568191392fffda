//! Client for the bank's REST surface.
//!
//! The browser session never shares transport with this client: transaction
//! queries go out on their own connection pool, with no cookies, exactly as
//! an external caller would see the API. Responses come back as raw status
//! plus body; decoding into [`TransactionRecord`]s is a separate step so a
//! surprising status can be inspected before anyone insists on JSON.

use http::{header, Method, Request, StatusCode};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper_util::client::legacy;
use hyper_util::rt::TokioExecutor;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::io::Error as IOError;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::error::FlowError;
use crate::money::Money;

#[cfg(feature = "native-tls")]
type Connector = hyper_tls::HttpsConnector<legacy::connect::HttpConnector>;
#[cfg(all(feature = "rustls-tls", not(feature = "native-tls")))]
type Connector = hyper_rustls::HttpsConnector<legacy::connect::HttpConnector>;
#[cfg(not(any(feature = "native-tls", feature = "rustls-tls")))]
type Connector = legacy::connect::HttpConnector;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Queries the bank's transaction records over HTTP.
#[derive(Clone, Debug)]
pub struct TransactionsApi {
    http: legacy::Client<Connector, Empty<Bytes>>,
    base: Url,
    timeout: Duration,
}

impl TransactionsApi {
    /// Build a client for the REST surface rooted at `base`.
    ///
    /// `base` is the application root, the same URL the browser session
    /// navigates to; the service paths live underneath it.
    pub fn new(base: Url) -> Result<TransactionsApi, IOError> {
        Ok(TransactionsApi::with_connector(base, connector()?))
    }

    /// Build a client over a caller-supplied connector.
    pub fn with_connector(base: Url, connector: Connector) -> TransactionsApi {
        let http = legacy::Client::builder(TokioExecutor::new()).build(connector);
        TransactionsApi {
            http,
            base,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the bound on a single request, response read included.
    pub fn with_timeout(mut self, timeout: Duration) -> TransactionsApi {
        self.timeout = timeout;
        self
    }

    /// Fetch the transactions of `account` whose amount equals `amount`.
    ///
    /// One GET, no retries. A non-success status is not an error here; the
    /// caller decides what statuses it accepts. Record order is whatever the
    /// backend returns.
    pub async fn transactions_by_amount(
        &self,
        account: &str,
        amount: Money,
    ) -> Result<ApiResponse, FlowError> {
        let url = self.endpoint(account, amount)?;
        debug!(%url, "querying transactions by amount");

        let req = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())?;

        let exchange = async {
            let resp = self.http.request(req).await?;
            let status = resp.status();
            let body = resp.into_body().collect().await?.to_bytes();
            Ok::<ApiResponse, FlowError>(ApiResponse { status, body })
        };
        match timeout(self.timeout, exchange).await {
            Ok(resp) => {
                let resp = resp?;
                debug!(status = %resp.status, bytes = resp.body.len(), "bank api answered");
                Ok(resp)
            }
            Err(_) => Err(FlowError::RequestTimeout),
        }
    }

    fn endpoint(&self, account: &str, amount: Money) -> Result<Url, url::ParseError> {
        self.base.join(&format!(
            "services/bank/accounts/{}/transactions/amount/{}",
            account,
            amount.api_repr()
        ))
    }
}

#[cfg(feature = "native-tls")]
fn connector() -> Result<Connector, IOError> {
    Ok(hyper_tls::HttpsConnector::new())
}

#[cfg(all(feature = "rustls-tls", not(feature = "native-tls")))]
fn connector() -> Result<Connector, IOError> {
    Ok(hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build())
}

#[cfg(not(any(feature = "native-tls", feature = "rustls-tls")))]
fn connector() -> Result<Connector, IOError> {
    Ok(legacy::connect::HttpConnector::new())
}

/// A raw answer from the REST surface.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status the backend answered with.
    pub status: StatusCode,
    /// The response body, undecoded.
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as a list of transaction records.
    pub fn records(&self) -> Result<Vec<TransactionRecord>, FlowError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// One transaction as reported by the bank's REST surface.
///
/// Only the fields verification reads are modeled; anything else in the
/// record is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Transaction id, when the backend includes one.
    #[serde(default)]
    pub id: Option<i64>,
    /// The account the transaction belongs to, normalized to the string form
    /// the UI renders regardless of whether the backend sent a number.
    #[serde(deserialize_with = "number_or_string")]
    pub account_id: String,
    /// Transaction amount in dollars.
    pub amount: f64,
    /// Human-readable description, e.g. `Bill Payment to Kelly`.
    pub description: String,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct AsString;

    impl Visitor<'_> for AsString {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(AsString)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> TransactionsApi {
        let base = Url::parse("http://localhost:8080/parabank/").unwrap();
        TransactionsApi::new(base).unwrap()
    }

    #[test]
    fn endpoint_matches_the_bank_api_shape() {
        let url = api().endpoint("13344", Money::from_cents(2_000)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/parabank/services/bank/accounts/13344/transactions/amount/20.00"
        );
    }

    #[test]
    fn records_decode_with_a_numeric_account_id() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(
                br#"[{"id":14476,"accountId":13344,"type":"Debit","date":1756080000000,"amount":20,"description":"Bill Payment to Kelly"}]"#,
            ),
        };
        let records = resp.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, Some(14476));
        assert_eq!(records[0].account_id, "13344");
        assert_eq!(records[0].amount, 20.0);
        assert_eq!(records[0].description, "Bill Payment to Kelly");
    }

    #[test]
    fn records_decode_with_a_string_account_id() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(
                br#"[{"accountId":"13344","amount":20.0,"description":"Bill Payment to Kelly"}]"#,
            ),
        };
        let records = resp.records().unwrap();
        assert_eq!(records[0].account_id, "13344");
        assert_eq!(records[0].id, None);
    }

    #[test]
    fn an_empty_answer_is_an_empty_list() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"[]"),
        };
        assert!(resp.records().unwrap().is_empty());
    }

    #[test]
    fn a_non_json_body_surfaces_as_a_json_error() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            body: Bytes::from_static(b"<html>maintenance</html>"),
        };
        assert!(matches!(resp.records(), Err(FlowError::Json(_))));
    }
}
