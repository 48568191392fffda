//! The bill-payment screen.

use fantoccini::{Client, Locator};
use tracing::info;

use crate::data::PayeeRecord;
use crate::error::FlowError;
use crate::money::Money;
use crate::pages::{fill, or_timeout, Target, Waits};
use crate::session::Session;

const PAYEE_NAME: &str = "input[name='payee.name']";
const STREET: &str = "input[name='payee.address.street']";
const CITY: &str = "input[name='payee.address.city']";
const STATE: &str = "input[name='payee.address.state']";
const ZIP: &str = "input[name='payee.address.zipCode']";
const PHONE: &str = "input[name='payee.phoneNumber']";
const PAYEE_ACCOUNT: &str = "input[name='payee.accountNumber']";
const VERIFY_ACCOUNT: &str = "input[name='verifyAccount']";
const AMOUNT: &str = "input[name='amount']";
const FROM_ACCOUNT: &str = "select[name='fromAccountId']";
const SUBMIT: &str = "input[value='Send Payment']";
const RESULT_TITLE: &str = "#billpayResult h1.title";

/// Drives the bill-payment screen.
#[derive(Debug)]
pub struct BillPayPage {
    client: Client,
    waits: Waits,
}

impl BillPayPage {
    /// Drive the screen in `session`'s browser.
    pub fn new(session: &Session) -> BillPayPage {
        BillPayPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Pay `amount` to `payee` out of `from_account`.
    ///
    /// The payee's account number is entered twice because the form verifies
    /// it against itself. The source dropdown is awaited the same way the
    /// transfer screen's is.
    pub async fn pay_bill(
        &self,
        payee: &PayeeRecord,
        amount: Money,
        from_account: &str,
    ) -> Result<(), FlowError> {
        info!(payee = %payee.first_name, %amount, from_account, "paying bill");
        fill(&self.client, Locator::Css(PAYEE_NAME), &payee.first_name).await?;
        fill(&self.client, Locator::Css(STREET), &payee.street).await?;
        fill(&self.client, Locator::Css(CITY), &payee.city).await?;
        fill(&self.client, Locator::Css(STATE), &payee.state).await?;
        fill(&self.client, Locator::Css(ZIP), &payee.zip).await?;
        fill(&self.client, Locator::Css(PHONE), &payee.phone).await?;
        fill(&self.client, Locator::Css(PAYEE_ACCOUNT), &payee.account).await?;
        fill(&self.client, Locator::Css(VERIFY_ACCOUNT), &payee.account).await?;
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

    /// Read the result banner, e.g. `Bill Payment Complete`.
    pub async fn payment_confirmation(&self) -> Result<String, FlowError> {
        self.waits
            .displayed_text(&self.client, Target::Css(RESULT_TITLE.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "bill payment result",
                    },
                )
            })
    }
}

fn source_option(account: &str) -> String {
    format!("select[name='fromAccountId'] option[value='{}']", account)
}
