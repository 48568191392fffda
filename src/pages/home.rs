//! The signed-in left-hand menu.
//!
//! Every screen of the signed-in application shares this menu, so the type
//! can be constructed at any point after login. Each navigation waits for an
//! element that only the destination screen renders; the click alone proves
//! nothing about whether the application followed it.

use fantoccini::{Client, Locator};
use tracing::info;

use crate::error::FlowError;
use crate::pages::{or_timeout, Target, Waits};
use crate::session::Session;

const OPEN_NEW_ACCOUNT: &str = "Open New Account";
const ACCOUNTS_OVERVIEW: &str = "Accounts Overview";
const TRANSFER_FUNDS: &str = "Transfer Funds";
const BILL_PAY: &str = "Bill Pay";
const LOG_OUT: &str = "Log Out";

const ACCOUNT_TYPE_SELECT: &str = "select#type";
const ACCOUNT_TABLE: &str = "#accountTable";
const TRANSFER_AMOUNT: &str = "#amount";
const PAYEE_NAME: &str = "input[name='payee.name']";
const LOGIN_PANEL: &str = "input[name='username']";

/// Drives the account-services menu shown to signed-in customers.
#[derive(Debug)]
pub struct HomePage {
    client: Client,
    waits: Waits,
}

impl HomePage {
    /// Drive the menu in `session`'s browser.
    pub fn new(session: &Session) -> HomePage {
        HomePage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Open the new-account screen.
    pub async fn go_to_open_new_account(&self) -> Result<(), FlowError> {
        self.go(OPEN_NEW_ACCOUNT, ACCOUNT_TYPE_SELECT, "open new account")
            .await
    }

    /// Open the accounts overview.
    pub async fn go_to_accounts_overview(&self) -> Result<(), FlowError> {
        self.go(ACCOUNTS_OVERVIEW, ACCOUNT_TABLE, "accounts overview")
            .await
    }

    /// Open the transfer screen.
    pub async fn go_to_transfer_funds(&self) -> Result<(), FlowError> {
        self.go(TRANSFER_FUNDS, TRANSFER_AMOUNT, "transfer funds").await
    }

    /// Open the bill-payment screen.
    pub async fn go_to_bill_pay(&self) -> Result<(), FlowError> {
        self.go(BILL_PAY, PAYEE_NAME, "bill pay").await
    }

    /// Sign out and wait for the login panel to come back.
    pub async fn log_out(&self) -> Result<(), FlowError> {
        self.go(LOG_OUT, LOGIN_PANEL, "login panel").await
    }

    async fn go(
        &self,
        link: &str,
        marker: &str,
        target: &'static str,
    ) -> Result<(), FlowError> {
        info!(screen = target, "navigating");
        self.client
            .find(Locator::LinkText(link))
            .await?
            .click()
            .await?;
        self.waits
            .present(&self.client, Target::Css(marker.to_owned()))
            .await
            .map_err(|e| or_timeout(e, FlowError::Navigation { target }))?;
        Ok(())
    }
}
