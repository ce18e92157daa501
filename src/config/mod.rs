//! Connection settings for the CMS.

use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Base URL used when `STRAPI_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of contacts requested per list call.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Configuration for reaching the contacts API.
#[derive(Clone)]
pub struct ContactsConfig {
    /// Base URL of the CMS, without the `/api` suffix.
    pub base_url: String,
    /// Optional API token sent as a bearer credential.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Page size for list requests.
    pub page_size: u32,
    /// Page number for list requests (1-based).
    pub page: u32,
}

impl fmt::Debug for ContactsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactsConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .field("page", &self.page)
            .finish()
    }
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl ContactsConfig {
    /// Creates a configuration pointing at `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Creates a configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `STRAPI_URL`: base URL (defaults to `http://localhost:1337`)
    /// - `STRAPI_API_TOKEN`: bearer token (optional)
    /// - `STRAPI_TIMEOUT_SECS`: request timeout (defaults to 30)
    /// - `STRAPI_PAGE_SIZE`: list page size (defaults to 50)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable does not parse,
    /// or `ConfigError::InvalidBaseUrl` if the URL is not absolute http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("STRAPI_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }
        config.api_token = lookup("STRAPI_API_TOKEN").filter(|v| !v.is_empty());

        if let Some(raw) = lookup("STRAPI_TIMEOUT_SECS") {
            let secs: u64 = parse_positive("STRAPI_TIMEOUT_SECS", &raw)?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("STRAPI_PAGE_SIZE") {
            config.page_size = parse_positive("STRAPI_PAGE_SIZE", &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the list page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the list page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Checks that the base URL is an absolute http(s) URL and that the
    /// pagination settings are non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidBaseUrl(self.base_url.clone())),
        }
        ensure_positive("page_size", self.page_size)?;
        ensure_positive("page", self.page)
    }

    /// Base URL with any trailing slash removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn ensure_positive(name: &str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn parse_positive<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if value == T::default() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ContactsConfig::from_lookup(lookup_from(&[])).expect("should load");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.page, 1);
    }

    #[test]
    fn test_env_overrides() {
        let config = ContactsConfig::from_lookup(lookup_from(&[
            ("STRAPI_URL", "https://cms.example.com/"),
            ("STRAPI_API_TOKEN", "secret"),
            ("STRAPI_TIMEOUT_SECS", "5"),
            ("STRAPI_PAGE_SIZE", "10"),
        ]))
        .expect("should load");
        assert_eq!(config.trimmed_base_url(), "https://cms.example.com");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let config = ContactsConfig::from_lookup(lookup_from(&[("STRAPI_API_TOKEN", "")]))
            .expect("should load");
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_invalid_page_size() {
        let err = ContactsConfig::from_lookup(lookup_from(&[("STRAPI_PAGE_SIZE", "lots")]))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "STRAPI_PAGE_SIZE"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ContactsConfig::from_lookup(lookup_from(&[("STRAPI_TIMEOUT_SECS", "0")]))
            .expect_err("should fail");
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ContactsConfig::from_lookup(lookup_from(&[("STRAPI_URL", "localhost:1337")]))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));

        assert!(ContactsConfig::new("ftp://cms").validate().is_err());
    }

    #[test]
    fn test_builder() {
        let config = ContactsConfig::new("http://cms:1337")
            .with_api_token("t")
            .with_timeout(Duration::from_secs(2))
            .with_page_size(25)
            .with_page(3);
        assert_eq!(config.base_url, "http://cms:1337");
        assert_eq!(config.api_token.as_deref(), Some("t"));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.page, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_pagination_rejected() {
        let err = ContactsConfig::default()
            .with_page(0)
            .validate()
            .expect_err("page 0 should fail");
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "page"));

        let err = ContactsConfig::default()
            .with_page_size(0)
            .validate()
            .expect_err("page size 0 should fail");
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "page_size"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ContactsConfig::default().with_api_token("s3cr3t-token");
        let printed = format!("{config:?}");
        assert!(!printed.contains("s3cr3t-token"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains(DEFAULT_BASE_URL));
    }
}
