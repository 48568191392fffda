//! Scoped acquisition of a browsing session and its API client.

use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use tracing::info;
use url::Url;

use crate::api::TransactionsApi;
use crate::config::Config;
use crate::error::SetupError;
use crate::pages::{Target, Waits};

const LOGIN_PANEL: &str = "input[name='username']";

/// One run's browser session plus an independent transaction query client.
///
/// The two deliberately share nothing: the query client carries none of the
/// browser's cookies, so what it sees is what any outside caller of the
/// bank's REST surface would see.
#[derive(Debug)]
pub struct Session {
    client: Client,
    api: TransactionsApi,
    waits: Waits,
    base_url: Url,
}

impl Session {
    /// Connect to the configured WebDriver and land on the application's
    /// login screen.
    pub async fn open(config: &Config) -> Result<Session, SetupError> {
        Session::open_with_capabilities(config, Capabilities::new()).await
    }

    /// Like [`Session::open`], with explicit browser capabilities.
    pub async fn open_with_capabilities(
        config: &Config,
        capabilities: Capabilities,
    ) -> Result<Session, SetupError> {
        info!(webdriver = %config.webdriver_url, "establishing browser session");
        let client = connect(config, capabilities).await?;
        let api = TransactionsApi::new(config.base_url.clone()).map_err(SetupError::Tls)?;
        let session = Session {
            client,
            api,
            waits: Waits::new(config),
            base_url: config.base_url.clone(),
        };
        if let Err(e) = session.enter().await {
            // Without this, a failed entry leaks a live browser.
            let _ = session.client.clone().close().await;
            return Err(SetupError::Entry(e));
        }
        Ok(session)
    }

    async fn enter(&self) -> Result<(), CmdError> {
        info!(url = %self.base_url, "navigating to the application");
        self.client.goto(self.base_url.as_str()).await?;
        self.waits
            .present(&self.client, Target::Css(LOGIN_PANEL.to_owned()))
            .await?;
        Ok(())
    }

    /// The WebDriver handle the page drivers act through.
    pub fn browser(&self) -> &Client {
        &self.client
    }

    /// The transaction query client.
    pub fn api(&self) -> &TransactionsApi {
        &self.api
    }

    pub(crate) fn waits(&self) -> Waits {
        self.waits
    }

    /// End the WebDriver session.
    pub async fn close(self) -> Result<(), CmdError> {
        info!("closing browser session");
        self.client.close().await
    }
}

#[cfg(feature = "native-tls")]
async fn connect(config: &Config, capabilities: Capabilities) -> Result<Client, SetupError> {
    let mut builder = ClientBuilder::native();
    Ok(builder
        .capabilities(capabilities)
        .connect(config.webdriver_url.as_str())
        .await?)
}

#[cfg(all(feature = "rustls-tls", not(feature = "native-tls")))]
async fn connect(config: &Config, capabilities: Capabilities) -> Result<Client, SetupError> {
    let mut builder = ClientBuilder::rustls().map_err(SetupError::Tls)?;
    Ok(builder
        .capabilities(capabilities)
        .connect(config.webdriver_url.as_str())
        .await?)
}
