//! Error types for strapi-contacts operations.
//!
//! Defines the error types for each layer:
//! - Contact data access (a single generic failure surfaced to callers)
//! - HTTP transport causes, logged before being discarded
//! - Configuration loading

use thiserror::Error;

/// Message shown to users for any failed contact operation.
pub const GENERIC_FAILURE_MESSAGE: &str = "Oh no! Something went wrong!";

/// Errors returned by contact data access operations.
///
/// Every cause (network failure, error status, malformed body) collapses
/// into the same variant; the underlying cause is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactsError {
    #[error("Oh no! Something went wrong!")]
    SomethingWentWrong,
}

/// Errors raised while exchanging a request with the CMS.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid base URL '{0}': must be an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_failure_message() {
        assert_eq!(
            ContactsError::SomethingWentWrong.to_string(),
            GENERIC_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            name: "STRAPI_PAGE_SIZE".to_string(),
            value: "lots".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'lots' for STRAPI_PAGE_SIZE: invalid digit found in string"
        );
    }
}
