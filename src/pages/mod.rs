//! Drivers for the bank's web pages.
//!
//! Each page gets one type that owns the selectors for that page and exposes
//! the operations a user can perform on it. The drivers never sleep for a
//! fixed time; every readiness check polls under the budget in [`Waits`], so
//! a slow deployment costs patience rather than correctness.

mod accounts_overview;
mod bill_pay;
mod home;
mod login;
mod open_new_account;
mod register;
mod transfer_funds;

pub use self::accounts_overview::AccountsOverviewPage;
pub use self::bill_pay::BillPayPage;
pub use self::home::HomePage;
pub use self::login::LoginPage;
pub use self::open_new_account::OpenNewAccountPage;
pub use self::register::RegisterPage;
pub use self::transfer_funds::TransferFundsPage;

use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::FlowError;

/// Polling budget shared by every page driver.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Waits {
    timeout: Duration,
    interval: Duration,
}

impl Waits {
    pub(crate) fn new(config: &Config) -> Waits {
        Waits {
            timeout: config.wait_timeout,
            interval: config.wait_interval,
        }
    }

    /// Wait until `target` is in the DOM, visible or not.
    pub(crate) async fn present(&self, c: &Client, target: Target) -> Result<Element, CmdError> {
        c.wait()
            .at_most(self.timeout)
            .every(self.interval)
            .for_element(target.locator())
            .await
    }

    /// Wait until `target` is in the DOM, displayed, and carries text.
    ///
    /// The result panels on these pages exist from the first render and only
    /// become visible once the application has data for them, so presence
    /// alone proves nothing.
    pub(crate) async fn displayed_text(
        &self,
        c: &Client,
        target: Target,
    ) -> Result<String, CmdError> {
        self.poll(c, move |c| {
            let target = target.clone();
            async move { probe_text(&c, target.locator()).await }
        })
        .await
    }

    /// Run a caller-supplied probe under this budget until it yields a value.
    pub(crate) async fn poll<F, FF, T>(&self, c: &Client, mut f: F) -> Result<T, CmdError>
    where
        F: FnMut(Client) -> FF,
        FF: Future<Output = Result<Option<T>, CmdError>>,
    {
        let start = Instant::now();
        loop {
            if start.elapsed() > self.timeout {
                return Err(CmdError::WaitTimeout);
            }
            match f(c.clone()).await? {
                Some(value) => return Ok(value),
                None => tokio::time::sleep(self.interval).await,
            }
        }
    }
}

/// An owned locator, so retry closures can keep their own copy.
#[derive(Clone, Debug)]
pub(crate) enum Target {
    Css(String),
    XPath(String),
    LinkText(String),
}

impl Target {
    pub(crate) fn locator(&self) -> Locator<'_> {
        match self {
            Target::Css(s) => Locator::Css(s),
            Target::XPath(s) => Locator::XPath(s),
            Target::LinkText(s) => Locator::LinkText(s),
        }
    }
}

/// One readiness probe. `Ok(None)` means "not yet": the element is missing,
/// hidden, or still empty, and the poll loop should come back later.
pub(crate) async fn probe_text(
    c: &Client,
    locator: Locator<'_>,
) -> Result<Option<String>, CmdError> {
    let element = match c.find(locator).await {
        Ok(element) => element,
        Err(ref e) if gone(e) => return Ok(None),
        Err(e) => return Err(e),
    };
    match element.is_displayed().await {
        Ok(true) => {}
        Ok(false) => return Ok(None),
        Err(ref e) if gone(e) => return Ok(None),
        Err(e) => return Err(e),
    }
    match element.text().await {
        Ok(text) => {
            let text = text.trim().to_owned();
            if text.is_empty() {
                Ok(None)
            } else {
                Ok(Some(text))
            }
        }
        Err(ref e) if gone(e) => Ok(None),
        Err(e) => Err(e),
    }
}

/// A re-render can invalidate a handle between the find and the read; both a
/// miss and a stale reference mean "look again", not "give up".
pub(crate) fn gone(e: &CmdError) -> bool {
    if e.is_no_such_element() {
        return true;
    }
    matches!(e, CmdError::Standard(w) if w.error() == "stale element reference")
}

/// Replace whatever is in `field` with `value`.
pub(crate) async fn fill(c: &Client, field: Locator<'_>, value: &str) -> Result<(), CmdError> {
    let input = c.find(field).await?;
    input.clear().await?;
    input.send_keys(value).await
}

/// Map an expired wait to the step's own error; everything else passes
/// through as a WebDriver failure.
pub(crate) fn or_timeout(e: CmdError, instead: FlowError) -> FlowError {
    match e {
        CmdError::WaitTimeout => instead,
        e => e.into(),
    }
}
