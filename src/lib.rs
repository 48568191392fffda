//! End-to-end verification of a ParaBank-style online bank.
//!
//! This crate drives the bank's web UI over the [WebDriver protocol] (via
//! [`fantoccini`]) the way a customer would: it registers a user, opens a
//! savings account, moves money around, and reads every confirmation off the
//! rendered pages. What the UI claims is then cross-checked against the
//! bank's REST surface with an independent HTTP client that shares nothing
//! with the browser, cookies included.
//!
//! The pieces layer simply: [`Config`] reads the deployment coordinates from
//! the environment, [`Session`] owns the browser connection and the query
//! client, the [`pages`] modules each drive one screen, and [`verify`] turns
//! expected-vs-actual comparisons into errors that carry both sides. The
//! full journey lives in the crate's integration tests; it needs a running
//! WebDriver (such as [`geckodriver`]) and a reachable bank, so it is
//! `#[ignore]`d unless asked for.
//!
//! # Examples
//!
//! This assumes a WebDriver-compatible process on port 4444 (for example
//! [`geckodriver`]) and a bank deployment at the configured base URL:
//!
//! ```no_run
//! use parabank_e2e::pages::{HomePage, LoginPage, RegisterPage};
//! use parabank_e2e::{data, Config, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let session = Session::open(&config).await?;
//!
//!     // sign up a brand-new customer; registration leaves us signed in
//!     let user = data::generate_user();
//!     LoginPage::new(&session).click_register_link().await?;
//!     RegisterPage::new(&session).register(&user).await?;
//!
//!     // have a look around, then leave
//!     HomePage::new(&session).go_to_accounts_overview().await?;
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! [WebDriver protocol]: https://www.w3.org/TR/webdriver/
//! [`fantoccini`]: https://docs.rs/fantoccini
//! [`geckodriver`]: https://github.com/mozilla/geckodriver
#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[cfg(not(any(feature = "native-tls", feature = "rustls-tls")))]
compile_error!("either the native-tls or the rustls-tls feature must be enabled");

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod money;
pub mod pages;
pub mod session;
pub mod verify;

pub use crate::config::Config;
pub use crate::data::{AccountState, PayeeRecord, UserRecord};
pub use crate::money::Money;
pub use crate::session::Session;

pub use fantoccini::wd::Capabilities;
