//! The new-customer registration form.

use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use tracing::{info, warn};

use crate::data::UserRecord;
use crate::error::FlowError;
use crate::pages::{fill, probe_text, Target, Waits};
use crate::session::Session;

const FIRST_NAME: &str = "input[name='customer.firstName']";
const LAST_NAME: &str = "input[name='customer.lastName']";
const STREET: &str = "input[name='customer.address.street']";
const CITY: &str = "input[name='customer.address.city']";
const STATE: &str = "input[name='customer.address.state']";
const ZIP: &str = "input[name='customer.address.zipCode']";
const PHONE: &str = "input[name='customer.phoneNumber']";
const SSN: &str = "input[name='customer.ssn']";
const USERNAME: &str = "input[name='customer.username']";
const PASSWORD: &str = "input[name='customer.password']";
const CONFIRM: &str = "input[name='repeatedPassword']";
const SUBMIT: &str = "input[value='Register']";
const OUTCOME_PANEL: &str = "#rightPanel p";
const REJECTION: &str = "#rightPanel span.error";
const CREATED: &str = "Your account was created successfully";

/// Drives the registration form.
#[derive(Debug)]
pub struct RegisterPage {
    client: Client,
    waits: Waits,
}

impl RegisterPage {
    /// Drive the registration form in `session`'s browser.
    pub fn new(session: &Session) -> RegisterPage {
        RegisterPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Fill the form from `user`, submit, and wait for the outcome.
    ///
    /// A successful registration leaves the browser signed in as the new
    /// customer. The right panel carries explanatory text before the form is
    /// submitted, so the poll insists on the confirmation wording rather than
    /// on the panel being there.
    pub async fn register(&self, user: &UserRecord) -> Result<(), FlowError> {
        info!(username = %user.username, "registering");
        fill(&self.client, Locator::Css(FIRST_NAME), &user.first_name).await?;
        fill(&self.client, Locator::Css(LAST_NAME), &user.last_name).await?;
        fill(&self.client, Locator::Css(STREET), &user.street).await?;
        fill(&self.client, Locator::Css(CITY), &user.city).await?;
        fill(&self.client, Locator::Css(STATE), &user.state).await?;
        fill(&self.client, Locator::Css(ZIP), &user.zip).await?;
        fill(&self.client, Locator::Css(PHONE), &user.phone).await?;
        fill(&self.client, Locator::Css(SSN), &user.ssn).await?;
        fill(&self.client, Locator::Css(USERNAME), &user.username).await?;
        fill(&self.client, Locator::Css(PASSWORD), &user.password).await?;
        fill(&self.client, Locator::Css(CONFIRM), &user.password).await?;
        self.client
            .find(Locator::Css(SUBMIT))
            .await?
            .click()
            .await?;

        let win = Target::Css(OUTCOME_PANEL.to_owned());
        let lose = Target::Css(REJECTION.to_owned());
        let outcome = self
            .waits
            .poll(&self.client, move |c| {
                let win = win.clone();
                let lose = lose.clone();
                async move {
                    if let Some(text) = probe_text(&c, win.locator()).await? {
                        if text.contains(CREATED) {
                            return Ok(Some(Ok(())));
                        }
                    }
                    if let Some(text) = probe_text(&c, lose.locator()).await? {
                        return Ok(Some(Err(text)));
                    }
                    Ok(None)
                }
            })
            .await;
        match outcome {
            Ok(Ok(())) => {
                info!(username = %user.username, "registered");
                Ok(())
            }
            Ok(Err(rejection)) => {
                warn!(username = %user.username, %rejection, "registration rejected");
                Err(FlowError::Registration {
                    username: user.username.clone(),
                })
            }
            Err(CmdError::WaitTimeout) => Err(FlowError::Registration {
                username: user.username.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
