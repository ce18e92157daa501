//! HTTP transport used by the contacts client.
//!
//! [`HttpTransport`] is the seam between request construction and the
//! network. [`ReqwestTransport`] talks to a real CMS; tests substitute a
//! stub that records requests and replays canned responses.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::ContactsConfig;
use crate::error::{ConfigError, TransportError};

/// HTTP methods issued against the contacts resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A request relative to the CMS base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Path and query, starting with `/`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// A raw response: status code and unparsed body text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the CMS.
///
/// Implementations return error statuses as ordinary responses and reserve
/// `Err` for failures to complete the exchange at all.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by a shared `reqwest` client.
pub struct ReqwestTransport {
    base_url: String,
    api_token: Option<String>,
    http_client: Client,
}

impl ReqwestTransport {
    /// Builds a transport from connection settings.
    pub fn new(config: &ContactsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: config.trimmed_base_url().to_string(),
            api_token: config.api_token.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, url = %url, "Sending CMS request");

        let mut http_request = self.http_client.request(request.method.into(), &url);

        if let Some(ref token) = self.api_token {
            http_request = http_request.bearer_auth(token);
        }
        if let Some(ref body) = request.body {
            // `.json()` sets `Content-Type: application/json`.
            http_request = http_request.json(body);
        }

        let http_response = http_request.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            } else {
                TransportError::RequestFailed(e.to_string())
            }
        })?;

        let status = http_response.status().as_u16();
        let body = http_response
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "Received CMS response");
        Ok(HttpResponse { status, body })
    }
}
