//! The accounts overview table.

use fantoccini::{Client, Locator};
use tracing::debug;

use crate::error::FlowError;
use crate::money::Money;
use crate::pages::{or_timeout, Target, Waits};
use crate::session::Session;

const ACCOUNT_TABLE: &str = "#accountTable";

/// Drives the accounts overview screen.
#[derive(Debug)]
pub struct AccountsOverviewPage {
    client: Client,
    waits: Waits,
}

impl AccountsOverviewPage {
    /// Drive the overview in `session`'s browser.
    pub fn new(session: &Session) -> AccountsOverviewPage {
        AccountsOverviewPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Read the balance shown for `account`.
    ///
    /// The table rows render after the screen does, so the row is awaited
    /// under the polling budget; a row that never appears maps to
    /// [`FlowError::AccountNotFound`].
    pub async fn account_balance(&self, account: &str) -> Result<Money, FlowError> {
        let text = self
            .waits
            .displayed_text(&self.client, Target::XPath(balance_cell(account)))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::AccountNotFound {
                        account: account.to_owned(),
                    },
                )
            })?;
        let balance = Money::parse(&text)?;
        debug!(account, %balance, "read balance");
        Ok(balance)
    }

    /// Whether the overview currently lists `account`.
    ///
    /// Waits for the table itself, then answers from a single lookup; a
    /// missing row is an answer here, not a failure.
    pub async fn is_account_listed(&self, account: &str) -> Result<bool, FlowError> {
        self.waits
            .present(&self.client, Target::Css(ACCOUNT_TABLE.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "accounts overview",
                    },
                )
            })?;
        match self
            .client
            .find(Locator::XPath(&account_link(account)))
            .await
        {
            Ok(_) => Ok(true),
            Err(ref e) if e.is_no_such_element() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn account_link(account: &str) -> String {
    format!(
        "//table[@id='accountTable']//a[normalize-space(text())='{}']",
        account
    )
}

fn balance_cell(account: &str) -> String {
    format!("{}/ancestor::tr[1]/td[2]", account_link(account))
}
