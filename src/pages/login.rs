//! The customer login panel on the landing page.

use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};
use tracing::{info, warn};

use crate::error::FlowError;
use crate::pages::{fill, or_timeout, probe_text, Target, Waits};
use crate::session::Session;

const USERNAME: &str = "input[name='username']";
const PASSWORD: &str = "input[name='password']";
const LOG_IN: &str = "input[value='Log In']";
const REGISTER_LINK: &str = "Register";
const REGISTER_FORM: &str = "input[name='customer.firstName']";
const REJECTION: &str = "#rightPanel .error";
const LOGGED_IN: &str = "Log Out";

/// Drives the login panel.
#[derive(Debug)]
pub struct LoginPage {
    client: Client,
    waits: Waits,
}

impl LoginPage {
    /// Drive the login panel in `session`'s browser.
    pub fn new(session: &Session) -> LoginPage {
        LoginPage {
            client: session.browser().clone(),
            waits: session.waits(),
        }
    }

    /// Follow the registration link and wait for the registration form.
    pub async fn click_register_link(&self) -> Result<(), FlowError> {
        info!("navigating to registration");
        self.client
            .find(Locator::LinkText(REGISTER_LINK))
            .await?
            .click()
            .await?;
        self.waits
            .present(&self.client, Target::Css(REGISTER_FORM.to_owned()))
            .await
            .map_err(|e| {
                or_timeout(
                    e,
                    FlowError::Navigation {
                        target: "registration form",
                    },
                )
            })?;
        Ok(())
    }

    /// Sign in with an existing customer's credentials.
    ///
    /// The application answers a good login with the signed-in menu and a bad
    /// one with an error panel on the same screen; the poll watches for
    /// whichever appears first.
    pub async fn log_in(&self, username: &str, password: &str) -> Result<(), FlowError> {
        info!(username, "logging in");
        fill(&self.client, Locator::Css(USERNAME), username).await?;
        fill(&self.client, Locator::Css(PASSWORD), password).await?;
        self.client
            .find(Locator::Css(LOG_IN))
            .await?
            .click()
            .await?;

        let win = Target::LinkText(LOGGED_IN.to_owned());
        let lose = Target::Css(REJECTION.to_owned());
        let outcome = self
            .waits
            .poll(&self.client, move |c| {
                let win = win.clone();
                let lose = lose.clone();
                async move {
                    if probe_text(&c, win.locator()).await?.is_some() {
                        return Ok(Some(Ok(())));
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
                info!(username, "logged in");
                Ok(())
            }
            Ok(Err(rejection)) => {
                warn!(username, %rejection, "login rejected");
                Err(FlowError::Login {
                    username: username.to_owned(),
                })
            }
            Err(CmdError::WaitTimeout) => Err(FlowError::Login {
                username: username.to_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
