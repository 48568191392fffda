//! The open-new-account screen.

use fantoccini::{Client, Locator};
use tracing::info;

use crate::error::FlowError;
use crate::pages::{or_timeout, Target, Waits};
use crate::session::Session;

const ACCOUNT_TYPE: &str = "select#type";
const SAVINGS: &str = "SAVINGS";
const FUNDING_OPTION: &str = "select#fromAccountId option";
const SUBMIT: &str = "input[value='Open New Account']";
const RESULT_TITLE: &str = "#openAccountResult h1.title";
const NEW_ACCOUNT_ID: &str = "a#newAccountId";

/// Drives the open-new-account screen.
#[derive(Debug)]
pub struct OpenNewAccountPage {
    client: Client,
    waits: Waits,
}

impl OpenNewAccountPage {
    /// Drive the screen in `session`'s browser.
    pub fn new(session: &Session) -> OpenNewAccountPage {
        OpenNewAccountPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Choose SAVINGS, wait for the funding list to load, and submit.
    ///
    /// The funding dropdown fills in from a background request after the
    /// screen renders; submitting before it has options opens nothing.
    pub async fn open_savings_account(&self) -> Result<(), FlowError> {
        info!("opening a savings account");
        self.client
            .find(Locator::Css(ACCOUNT_TYPE))
            .await?
            .select_by_label(SAVINGS)
            .await?;
        self.waits
            .present(&self.client, Target::Css(FUNDING_OPTION.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "funding account list",
                    },
                )
            })?;
        self.client
            .find(Locator::Css(SUBMIT))
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Read the result banner, e.g. `Account Opened!`.
    pub async fn confirmation(&self) -> Result<String, FlowError> {
        self.waits
            .displayed_text(&self.client, Target::Css(RESULT_TITLE.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "account opened banner",
                    },
                )
            })
    }

    /// Read the number the bank assigned to the freshly opened account.
    pub async fn account_number(&self) -> Result<String, FlowError> {
        let number = self
            .waits
            .displayed_text(&self.client, Target::Css(NEW_ACCOUNT_ID.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "new account number",
                    },
                )
            })?;
        info!(account = %number, "captured new account number");
        Ok(number)
    }
}
