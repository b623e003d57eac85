//! HTTP transport seam.
//!
//! The client talks to the service through the [`HttpTransport`] trait so
//! the wire layer can be swapped out; tests substitute recording stubs. The
//! production implementation wraps a blocking `reqwest` client built once
//! with the configured timeout.

use std::time::Duration;

use serde_json::Value;

use crate::error::{NcaNodeError, NcaNodeResult};

/// What the core needs back from a call: the status code and the decoded
/// JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Capability to POST a JSON body and return the decoded response.
///
/// Implementations must be safe to share across threads; each call is
/// independent and blocking.
pub trait HttpTransport: Send + Sync {
    /// POST `body` as JSON to `url`.
    ///
    /// # Errors
    ///
    /// [`NcaNodeError::Transport`] if the request could not be sent or the
    /// response could not be read; [`NcaNodeError::MalformedBody`] if the
    /// response body is not decodable JSON.
    fn post_json(&self, url: &str, body: &Value) -> NcaNodeResult<RawResponse>;
}

/// Production transport over `reqwest::blocking`.
pub struct ReqwestTransport {
    http: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> NcaNodeResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ncanode-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NcaNodeError::Transport(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(&self, url: &str, body: &Value) -> NcaNodeResult<RawResponse> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .map_err(|e| NcaNodeError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| NcaNodeError::Transport(format!("Failed to read response: {e}")))?;

        let body = serde_json::from_str(&text)
            .map_err(|e| NcaNodeError::MalformedBody(format!("{e} (from {url})")))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_build() {
        let transport = ReqwestTransport::new(Duration::from_secs(30));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_raw_response_equality() {
        let a = RawResponse {
            status: 200,
            body: serde_json::json!({"status": 0}),
        };
        assert_eq!(a, a.clone());
    }
}
