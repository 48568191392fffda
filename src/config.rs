//! Environment-backed settings for a verification run.

use crate::error::SetupError;
use std::env;
use std::time::Duration;
use url::Url;

/// Environment variable naming the root URL of the banking application.
pub const ENV_BASE_URL: &str = "PARABANK_BASE_URL";
/// Environment variable naming the WebDriver server address.
pub const ENV_WEBDRIVER_URL: &str = "PARABANK_WEBDRIVER_URL";
/// Environment variable bounding any single readback wait, in whole seconds.
pub const ENV_WAIT_TIMEOUT_SECS: &str = "PARABANK_WAIT_TIMEOUT_SECS";
/// Environment variable setting the poll cadence inside a wait, in milliseconds.
pub const ENV_WAIT_INTERVAL_MS: &str = "PARABANK_WAIT_INTERVAL_MS";

const DEFAULT_BASE_URL: &str = "https://parabank.parasoft.com/parabank/";
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";
const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_millis(250);

/// Settings for one verification run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the banking application. Treated as a directory: the entry
    /// page and the REST surface both live underneath it.
    pub base_url: Url,
    /// Address of the WebDriver server to drive the browser through.
    pub webdriver_url: Url,
    /// Upper bound on any single readback or readiness wait.
    pub wait_timeout: Duration,
    /// Poll cadence inside a bounded wait.
    pub wait_interval: Duration,
}

impl Config {
    /// Read settings from the environment, falling back to the public demo
    /// deployment and a local WebDriver on the conventional port.
    ///
    /// A variable that is set but unusable fails loudly rather than being
    /// papered over with the default.
    pub fn from_env() -> Result<Config, SetupError> {
        let base_url = match raw(ENV_BASE_URL)? {
            Some(v) => Url::parse(&v)?,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        let webdriver_url = match raw(ENV_WEBDRIVER_URL)? {
            Some(v) => Url::parse(&v)?,
            None => Url::parse(DEFAULT_WEBDRIVER_URL)?,
        };
        let wait_timeout = match raw(ENV_WAIT_TIMEOUT_SECS)? {
            Some(v) => Duration::from_secs(positive(ENV_WAIT_TIMEOUT_SECS, &v)?),
            None => DEFAULT_WAIT_TIMEOUT,
        };
        let wait_interval = match raw(ENV_WAIT_INTERVAL_MS)? {
            Some(v) => Duration::from_millis(positive(ENV_WAIT_INTERVAL_MS, &v)?),
            None => DEFAULT_WAIT_INTERVAL,
        };

        Ok(Config {
            base_url: into_dir(base_url),
            webdriver_url,
            wait_timeout,
            wait_interval,
        })
    }
}

fn raw(key: &'static str) -> Result<Option<String>, SetupError> {
    match env::var(key) {
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(v)) => Err(SetupError::BadEnv {
            key,
            value: v.to_string_lossy().into_owned(),
        }),
    }
}

fn positive(key: &'static str, value: &str) -> Result<u64, SetupError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SetupError::BadEnv {
            key,
            value: value.to_string(),
        }),
    }
}

// `Url::join` replaces the last path segment unless the base ends in `/`.
fn into_dir(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            ENV_BASE_URL,
            ENV_WEBDRIVER_URL,
            ENV_WAIT_TIMEOUT_SECS,
            ENV_WAIT_INTERVAL_MS,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.webdriver_url.as_str(), "http://localhost:4444/");
        assert_eq!(config.wait_timeout, Duration::from_secs(15));
        assert_eq!(config.wait_interval, Duration::from_millis(250));
    }

    #[test]
    #[serial]
    fn environment_overrides_apply() {
        clear_env();
        env::set_var(ENV_BASE_URL, "http://localhost:8080/parabank/");
        env::set_var(ENV_WEBDRIVER_URL, "http://localhost:9515");
        env::set_var(ENV_WAIT_TIMEOUT_SECS, "30");
        env::set_var(ENV_WAIT_INTERVAL_MS, "100");
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8080/parabank/");
        assert_eq!(config.webdriver_url.port(), Some(9515));
        assert_eq!(config.wait_timeout, Duration::from_secs(30));
        assert_eq!(config.wait_interval, Duration::from_millis(100));
        clear_env();
    }

    #[test]
    #[serial]
    fn unusable_values_fail_loudly() {
        clear_env();
        env::set_var(ENV_WAIT_TIMEOUT_SECS, "soon");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            SetupError::BadEnv {
                key: ENV_WAIT_TIMEOUT_SECS,
                ..
            }
        ));
        env::set_var(ENV_WAIT_INTERVAL_MS, "0");
        env::remove_var(ENV_WAIT_TIMEOUT_SECS);
        assert!(Config::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn base_url_is_treated_as_a_directory() {
        clear_env();
        env::set_var(ENV_BASE_URL, "http://localhost:8080/parabank");
        let config = Config::from_env().unwrap();
        let joined = config.base_url.join("services/bank/accounts/1").unwrap();
        assert_eq!(
            joined.as_str(),
            "http://localhost:8080/parabank/services/bank/accounts/1"
        );
        clear_env();
    }
}
