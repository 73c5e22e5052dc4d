//! Bundled transports: a reqwest-backed default and a canned-response mock.

use crate::errors::TransportError;
use crate::http::{HttpTransport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap an existing client to reuse its connection pool, proxy, or TLS
    /// configuration.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "Reqwest"
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        let mut builder = self.client.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?
            .to_vec();

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// Transport serving canned responses keyed by exact URL.
///
/// Used in tests and offline wiring; requests without a canned response fail
/// unless a fallback response is set.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, TransportResponse>>,
    fallback: Option<TransportResponse>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every unmatched request with `response`
    pub fn with_fallback(response: TransportResponse) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            fallback: Some(response),
        }
    }

    /// Register a canned response for an exact URL
    pub fn insert_response(&self, url: impl Into<String>, response: TransportResponse) {
        let mut responses = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        responses.insert(url.into(), response);
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let responses = self
            .responses
            .lock()
            .map_err(|e| TransportError::RequestFailed(format!("mock lock poisoned: {}", e)))?;
        if let Some(response) = responses.get(&request.url) {
            return Ok(response.clone());
        }
        match &self.fallback {
            Some(response) => Ok(response.clone()),
            None => Err(TransportError::RequestFailed(format!(
                "no canned response for {}",
                request.url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde::Deserialize;

    #[tokio::test]
    async fn test_mock_serves_canned_responses() {
        let transport = MockTransport::new();
        transport.insert_response(
            "https://example.com/token",
            TransportResponse::new(StatusCode::OK, r#"{"access_token":"abc"}"#),
        );

        let response = transport
            .execute(TransportRequest::get("https://example.com/token"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);

        #[derive(Deserialize)]
        struct TokenBody {
            access_token: String,
        }
        let body: TokenBody = response.json().unwrap();
        assert_eq!(body.access_token, "abc");
    }

    #[tokio::test]
    async fn test_mock_without_match_fails() {
        let transport = MockTransport::new();
        let result = transport
            .execute(TransportRequest::get("https://example.com/other"))
            .await;
        assert!(matches!(result, Err(TransportError::RequestFailed(_))));
    }

    #[tokio::test]
    async fn test_mock_fallback_answers_unmatched_requests() {
        let transport =
            MockTransport::with_fallback(TransportResponse::new(StatusCode::NOT_FOUND, ""));
        let response = transport
            .execute(TransportRequest::get("https://example.com/other"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
