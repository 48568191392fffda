//! The transfer-funds screen.

use fantoccini::{Client, Locator};
use tracing::info;

use crate::error::FlowError;
use crate::money::Money;
use crate::pages::{fill, or_timeout, Target, Waits};
use crate::session::Session;

const AMOUNT: &str = "#amount";
const FROM_ACCOUNT: &str = "select#fromAccountId";
const SUBMIT: &str = "input[value='Transfer']";
const RESULT_TITLE: &str = "#showResult h1.title";

/// Drives the transfer-funds screen.
#[derive(Debug)]
pub struct TransferFundsPage {
    client: Client,
    waits: Waits,
}

impl TransferFundsPage {
    /// Drive the screen in `session`'s browser.
    pub fn new(session: &Session) -> TransferFundsPage {
        TransferFundsPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Move `amount` out of `from_account` into the default destination.
    ///
    /// The source dropdown fills in after the screen renders; the named
    /// account's option is awaited before it is selected, and an option that
    /// never shows up maps to [`FlowError::AccountNotFound`].
    pub async fn transfer(&self, amount: Money, from_account: &str) -> Result<(), FlowError> {
        info!(%amount, from_account, "transferring funds");
        fill(&self.client, Locator::Css(AMOUNT), &amount.api_repr()).await?;
        self.waits
            .present(
                &self.client,
                Target::Css(source_option(from_account)),
            )
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::AccountNotFound {
                        account: from_account.to_owned(),
                    },
                )
            })?;
        self.client
            .find(Locator::Css(FROM_ACCOUNT))
            .await?
            .select_by_value(from_account)
            .await?;
        self.client
            .find(Locator::Css(SUBMIT))
            .await?
            .click()
            .await?;
        Ok(())
    }

    /// Read the result banner, e.g. `Transfer Complete!`.
    pub async fn transfer_confirmation(&self) -> Result<String, FlowError> {
        self.waits
            .displayed_text(&self.client, Target::Css(RESULT_TITLE.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "transfer result",
                    },
                )
            })
    }
}

fn source_option(account: &str) -> String {
    format!("select#fromAccountId option[value='{}']", account)
}
