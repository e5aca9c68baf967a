//! Client configuration: where the API lives and how long to wait for it.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Base address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

pub const BASE_URL_ENV: &str = "PEOPLE_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "PEOPLE_API_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("base url must be an http(s) address without query or fragment, got {0}")]
    UnsupportedBaseUrl(String),
    #[error("invalid timeout {value:?}: expected a positive number of whole seconds")]
    InvalidTimeout { value: String },
}

/// Where the people API lives and how long to wait for it.
///
/// Every constructor, deserialization included, goes through the same
/// base url checks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawClientConfig")]
pub struct ClientConfig {
    base_url: Url,
    /// Whole-request timeout. `None` waits indefinitely.
    timeout: Option<Duration>,
}

/// Wire shape of [`ClientConfig`] before validation.
#[derive(Deserialize)]
struct RawClientConfig {
    base_url: String,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl TryFrom<RawClientConfig> for ClientConfig {
    type Error = ConfigError;

    fn try_from(raw: RawClientConfig) -> Result<Self, Self::Error> {
        let mut config = Self::new(&raw.base_url)?;
        if let Some(secs) = raw.timeout_secs {
            config.timeout = Some(positive_secs(secs, || secs.to_string())?);
        }
        Ok(config)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base()
            || !matches!(base_url.scheme(), "http" | "https")
            || base_url.query().is_some()
            || base_url.fragment().is_some()
        {
            return Err(ConfigError::UnsupportedBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// Set the whole-request timeout. A zero duration means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Read `PEOPLE_API_BASE_URL` and `PEOPLE_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        if let Some(value) = lookup(TIMEOUT_ENV) {
            let secs = match value.trim().parse::<u64>() {
                Ok(secs) => secs,
                Err(_) => return Err(ConfigError::InvalidTimeout { value }),
            };
            config.timeout = Some(positive_secs(secs, || value)?);
        }
        Ok(config)
    }
}

fn positive_secs(secs: u64, value: impl FnOnce() -> String) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidTimeout { value: value() });
    }
    Ok(Duration::from_secs(secs))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url parses"),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_localhost() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:3000/api");
        assert_eq!(config.timeout(), None);
        assert_eq!(ClientConfig::default(), config);
    }

    #[test]
    fn reads_base_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://people.example.com/v2/"),
            (TIMEOUT_ENV, " 15 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url().as_str(), "https://people.example.com/v2/");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn rejects_zero_timeout_from_env() {
        let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { value } if value == "0"));
    }

    #[test]
    fn sub_second_timeout_is_kept() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = config.with_timeout(Duration::from_millis(1500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(3))
            .with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            ClientConfig::new("mailto:people@example.com"),
            Err(ConfigError::UnsupportedBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://people.example.com/api"),
            Err(ConfigError::UnsupportedBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn rejects_base_with_query_or_fragment() {
        assert!(matches!(
            ClientConfig::new("http://localhost:3000/api?k=v"),
            Err(ConfigError::UnsupportedBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://localhost:3000/api#top"),
            Err(ConfigError::UnsupportedBaseUrl(_))
        ));
    }

    #[test]
    fn deserializes_from_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://10.0.0.5:8080/api","timeout_secs":3}"#)
                .unwrap();
        assert_eq!(config.base_url().port(), Some(8080));
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));

        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://10.0.0.5:8080/api"}"#).unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn deserializing_applies_the_same_checks() {
        for raw in [
            r#"{"base_url":"mailto:people@example.com"}"#,
            r#"{"base_url":"http://localhost:3000/api?k=v"}"#,
            r#"{"base_url":"not a url"}"#,
            r#"{"base_url":"http://localhost:3000/api","timeout_secs":0}"#,
        ] {
            assert!(serde_json::from_str::<ClientConfig>(raw).is_err(), "{raw}");
        }
    }
}
