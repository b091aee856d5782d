//! HTTP transport used by the API client.
//!
//! The transport is a seam: `AuthApiClient` only needs "send this method to
//! this URL and give me the JSON body back". `ReqwestTransport` is the real
//! implementation, working on both WASM and native targets.

use async_trait::async_trait;
use serde_json::Value;

use crate::AuthError;

/// Response code the backend uses for "not authenticated / session expired".
pub const SESSION_EXPIRED_CODE: &str = "900001";

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A received response: status plus decoded JSON body.
///
/// `data` is the whole body (`Null` when the body is empty). The backend
/// wraps results as `{ code, message, data }`, so the result itself is
/// reached through [`RawResponse::payload`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub data: Value,
}

impl RawResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Returns the envelope `code`, if it is a string.
    pub fn code(&self) -> Option<&str> {
        self.data.get("code").and_then(Value::as_str)
    }

    /// Returns the envelope `data` field, or `Null` when absent.
    pub fn payload(&self) -> &Value {
        self.data.get("data").unwrap_or(&Value::Null)
    }

    /// Returns true if the backend reported an expired or missing session.
    pub fn is_session_expired(&self) -> bool {
        self.code() == Some(SESSION_EXPIRED_CODE)
    }

    /// Returns true if the body carries anything at all.
    pub fn has_body(&self) -> bool {
        match &self.data {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

/// Sends a single request and decodes the body as JSON.
///
/// Non-2xx statuses are errors. Futures are not `Send` because browser
/// fetch futures are not.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<RawResponse, AuthError>;
}

/// reqwest-backed transport.
///
/// On WASM, requests include credentials so the backend session cookie is
/// sent along.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new() -> Result<Self, AuthError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client, e.g. one with default headers.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, method: HttpMethod, url: &str) -> Result<RawResponse, AuthError> {
        tracing::trace!("{} {}", method.as_str(), url);

        let builder = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::trace!("{} {} answered {}", method.as_str(), url, status);
            return Err(AuthError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };

        Ok(RawResponse::new(status.as_u16(), data))
    }
}
