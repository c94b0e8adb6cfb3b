use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, header};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::extract::extract_text;
use crate::types::ChatRequest;

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// The client holds connection configuration only; conversation state is
/// supplied in full on every call, so a single client can serve any number
/// of sessions.
#[derive(Debug, Clone)]
pub struct Galba {
    api_key: String,
    client: ReqwestClient,
    endpoint: String,
    timeout: Duration,
}

/// The body of a successful response, before text extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The body parsed as JSON.
    Json(Value),

    /// The body was not valid JSON; the raw text is preserved verbatim.
    Text(String),
}

impl Galba {
    /// Create a new client with default endpoint and timeout.
    ///
    /// The API key can be provided directly or read from the GALBA_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        endpoint: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var("GALBA_API_KEY").map_err(|_| {
                Error::authentication(
                    "API key not provided and GALBA_API_KEY environment variable not set",
                )
            })?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout,
        })
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(header::AUTHORIZATION, value);
        }
        headers
    }

    /// Send a chat completions request and return the raw reply.
    ///
    /// Exactly one attempt is made: no retries, no backoff. A non-success
    /// status becomes [`Error::Api`] carrying the response body; a success
    /// body that is not valid JSON is preserved as [`Reply::Text`].
    pub async fn send(&self, params: &ChatRequest) -> Result<Reply> {
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.default_headers())
            .json(params)
            .send()
            .await
            .map_err(|e| {
                // The variant's Display already names the category; the
                // message carries only the underlying cause.
                if e.is_timeout() {
                    Error::timeout(e.to_string(), Some(self.timeout.as_secs_f64()))
                } else if e.is_connect() {
                    Error::connection(e.to_string(), Some(Box::new(e)))
                } else {
                    Error::http_client(e.to_string(), Some(Box::new(e)))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                "(no body)".to_string()
            } else {
                body
            };
            return Err(Error::api(status.as_u16(), message));
        }

        let body = response.text().await.map_err(|e| {
            Error::http_client(
                format!("Failed to read response body: {}", e),
                Some(Box::new(e)),
            )
        })?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(Reply::Json(value)),
            Err(_) => Ok(Reply::Text(body)),
        }
    }

    /// Send a chat completions request and always return display text.
    ///
    /// Every failure path terminates in a string the caller can show as if
    /// it were the assistant's reply: transport failures read
    /// `Request error: ...`, non-success statuses read
    /// `Error <status>: <body>`, and non-JSON bodies come back verbatim.
    pub async fn send_text(&self, params: &ChatRequest) -> String {
        match self.send(params).await {
            Ok(Reply::Json(value)) => extract_text(&value),
            Ok(Reply::Text(body)) => body,
            Err(err @ Error::Api { .. }) => err.to_string(),
            Err(err) => format!("Request error: {}", err),
        }
    }
}
