// crates/storefront-harness/src/graphql/client.rs
// ============================================================================
// Module: GraphQL Client
// Description: Blocking GraphQL-over-HTTP client with transcript capture.
// Purpose: Send storefront documents and surface failures as typed errors.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! Blocking client for a single GraphQL endpoint.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Maximum characters of a failed response body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 512;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted while exchanging documents with a GraphQL endpoint.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GraphQlError {
    /// Client construction or the HTTP exchange failed.
    #[error("graphql transport failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("graphql endpoint returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },
    /// The body was not a JSON GraphQL response.
    #[error("graphql response is not valid json: {0}")]
    Malformed(String),
    /// The response carried a GraphQL `errors` array.
    #[error("graphql response reported errors: {}", .0.join("; "))]
    Response(Vec<String>),
    /// The response had neither errors nor data.
    #[error("graphql response has no data")]
    MissingData,
    /// The data did not match the expected shape.
    #[error("graphql response has unexpected shape: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Transport Trait
// ============================================================================

/// Executes GraphQL documents and returns the `data` member.
pub trait GraphQlTransport: Send + Sync {
    /// Sends `document` and returns the response `data` value.
    ///
    /// `operation` labels the exchange in logs and transcripts.
    ///
    /// # Errors
    ///
    /// Returns [`GraphQlError`] on transport, status, parse, or GraphQL errors.
    fn execute(&self, operation: &str, document: &str) -> Result<Value, GraphQlError>;
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One recorded GraphQL exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// Position of the exchange within the client's lifetime.
    pub sequence: u64,
    /// Operation label supplied by the caller.
    pub operation: String,
    /// Request body as sent.
    pub request: Value,
    /// Parsed response body, or `null` when none was parsed.
    pub response: Value,
    /// Error message when the exchange failed.
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ResponseError>>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Connection settings for [`GraphQlClient`].
#[derive(Debug, Clone)]
pub struct GraphQlClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: Url,
    /// Optional `Store` header selecting a store view.
    pub store_code: Option<String>,
    /// Timeout for the full request lifecycle.
    pub timeout: Duration,
}

/// Blocking GraphQL client that records every exchange.
#[derive(Clone)]
pub struct GraphQlClient {
    /// Endpoint receiving POSTed documents.
    endpoint: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Optional store header value.
    store_code: Option<String>,
    /// Shared transcript of exchanges.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl GraphQlClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphQlError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: GraphQlClientConfig) -> Result<Self, GraphQlError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GraphQlError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self {
            endpoint: config.endpoint,
            client,
            store_code: config.store_code,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns a snapshot of the transcript entries.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.entries().clone()
    }

    /// Locks the transcript, recovering entries from a poisoned lock.
    fn entries(&self) -> MutexGuard<'_, Vec<TranscriptEntry>> {
        self.transcript.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Posts the request body and returns the parsed JSON response.
    fn exchange(&self, request: &Value) -> Result<Value, GraphQlError> {
        let mut builder = self.client.post(self.endpoint.clone()).json(request);
        if let Some(store_code) = &self.store_code {
            builder = builder.header("Store", store_code);
        }
        let response = builder.send().map_err(|err| GraphQlError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response.text().map_err(|err| GraphQlError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(GraphQlError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        serde_json::from_str(&body).map_err(|err| GraphQlError::Malformed(err.to_string()))
    }

    /// Appends an exchange to the transcript.
    fn record(&self, operation: &str, request: Value, response: Value, error: Option<String>) {
        let mut entries = self.entries();
        let sequence = u64::try_from(entries.len()).unwrap_or(u64::MAX).saturating_add(1);
        entries.push(TranscriptEntry {
            sequence,
            operation: operation.to_string(),
            request,
            response,
            error,
        });
    }
}

impl GraphQlTransport for GraphQlClient {
    fn execute(&self, operation: &str, document: &str) -> Result<Value, GraphQlError> {
        let request = serde_json::json!({ "query": document });
        let parsed = match self.exchange(&request) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(operation, error = %err, "graphql exchange failed");
                self.record(operation, request, Value::Null, Some(err.to_string()));
                return Err(err);
            }
        };
        let outcome = unwrap_envelope(parsed.clone());
        self.record(operation, request, parsed, outcome.as_ref().err().map(ToString::to_string));
        tracing::debug!(operation, ok = outcome.is_ok(), "graphql exchange completed");
        outcome
    }
}

/// Splits a GraphQL response into data or a typed error.
fn unwrap_envelope(parsed: Value) -> Result<Value, GraphQlError> {
    let envelope: ResponseEnvelope =
        serde_json::from_value(parsed).map_err(|err| GraphQlError::Malformed(err.to_string()))?;
    if let Some(errors) = envelope.errors
        && !errors.is_empty()
    {
        return Err(GraphQlError::Response(errors.into_iter().map(|err| err.message).collect()));
    }
    match envelope.data {
        Some(Value::Null) | None => Err(GraphQlError::MissingData),
        Some(data) => Ok(data),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
