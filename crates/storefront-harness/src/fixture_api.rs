// crates/storefront-harness/src/fixture_api.rs
// ============================================================================
// Module: HTTP Fixture API
// Description: Fixture backend and masked-id resolver over HTTP.
// Purpose: Reach the storefront's fixture service from out-of-process tests.
// Dependencies: reqwest, serde, tracing, url
// ============================================================================

//! ## Overview
//! [`HttpFixtureApi`] implements [`FixtureBackend`] and
//! [`MaskedCartIdResolver`] against the storefront fixture service:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | POST | `products` | `{ id, sku, name }` |
//! | DELETE | `products/{sku}` | empty |
//! | POST | `guest-carts` | `{ id }` |
//! | DELETE | `guest-carts/{id}` | empty |
//! | GET | `guest-carts/{id}/masked-id` | `{ masked_id }` |
//!
//! Invariants:
//! - Removal of an absent record (`404`) succeeds.
//! - A `404` from the masked-id route maps to [`MaskedIdError::NotFound`].
//! - A product whose creation was accepted but not confirmed (undecodable
//!   body or timeout) is deleted by SKU before the error is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::fixtures::FixtureBackend;
use crate::fixtures::FixtureError;
use crate::fixtures::GuestCartRecord;
use crate::fixtures::ProductRecord;
use crate::fixtures::ProductSpec;
use crate::masked_id::CartId;
use crate::masked_id::MaskedCartId;
use crate::masked_id::MaskedCartIdResolver;
use crate::masked_id::MaskedIdError;

// ============================================================================
// SECTION: Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateProductBody<'a> {
    sku: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedCartBody {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct MaskedIdBody {
    masked_id: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Connection settings for [`HttpFixtureApi`].
#[derive(Debug, Clone)]
pub struct HttpFixtureApiConfig {
    /// Base URL of the fixture service.
    pub base_url: Url,
    /// Optional bearer token for the fixture service.
    pub bearer_token: Option<String>,
    /// Timeout for the full request lifecycle.
    pub timeout: Duration,
}

/// Fixture backend and masked-id resolver backed by the fixture service.
pub struct HttpFixtureApi {
    /// Fixture service base URL.
    base_url: Url,
    /// Underlying HTTP client.
    client: Client,
    /// Optional bearer token.
    bearer_token: Option<String>,
}

impl HttpFixtureApi {
    /// Builds a fixture API client.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Backend`] when the URL cannot carry path
    /// segments or the HTTP client cannot be built.
    pub fn new(config: HttpFixtureApiConfig) -> Result<Self, FixtureError> {
        if config.base_url.cannot_be_a_base() {
            return Err(FixtureError::Backend(format!(
                "fixture url cannot be a base: {}",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| FixtureError::Backend(format!("failed to build http client: {err}")))?;
        Ok(Self {
            base_url: config.base_url,
            client,
            bearer_token: config.bearer_token,
        })
    }

    /// Returns the base URL joined with percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Applies shared headers to a request.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a removal request, treating `404` as already removed.
    fn remove(&self, kind: &'static str, key: String, url: Url) -> Result<(), FixtureError> {
        let fail = |message: String| FixtureError::Remove {
            kind,
            key: key.clone(),
            message,
        };
        let response =
            self.authorize(self.client.delete(url)).send().map_err(|err| fail(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(kind, key = %key, "fixture already absent");
            return Ok(());
        }
        if !status.is_success() {
            return Err(fail(status_message(response)));
        }
        Ok(())
    }

    /// Removes a product the service may have committed without returning a
    /// usable record. The scope never sees such a product, so it is removed here.
    fn discard_product(&self, sku: &str) {
        let url = self.endpoint(&["products", sku]);
        if let Err(err) = self.remove("product", sku.to_string(), url) {
            tracing::warn!(sku, error = %err, "failed to discard unconfirmed product");
        }
    }
}

impl FixtureBackend for HttpFixtureApi {
    fn create_product(&self, spec: &ProductSpec) -> Result<ProductRecord, FixtureError> {
        let fail = |message: String| FixtureError::Create {
            kind: "product",
            message,
        };
        let body = CreateProductBody {
            sku: &spec.sku,
            name: &spec.name,
        };
        let request = self.client.post(self.endpoint(&["products"])).json(&body);
        let response = match self.authorize(request).send() {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                self.discard_product(&spec.sku);
                return Err(fail(err.to_string()));
            }
            Err(err) => return Err(fail(err.to_string())),
        };
        if !response.status().is_success() {
            return Err(fail(status_message(response)));
        }
        response.json::<ProductRecord>().map_err(|err| {
            self.discard_product(&spec.sku);
            fail(format!("invalid response: {err}"))
        })
    }

    fn remove_product(&self, record: &ProductRecord) -> Result<(), FixtureError> {
        let url = self.endpoint(&["products", &record.sku]);
        self.remove("product", record.sku.clone(), url)
    }

    fn create_guest_cart(&self) -> Result<GuestCartRecord, FixtureError> {
        let fail = |message: String| FixtureError::Create {
            kind: "guest_cart",
            message,
        };
        let request = self.client.post(self.endpoint(&["guest-carts"]));
        let response = self.authorize(request).send().map_err(|err| fail(err.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(status_message(response)));
        }
        let body = response
            .json::<CreatedCartBody>()
            .map_err(|err| fail(format!("invalid response: {err}")))?;
        let id = CartId::new(body.id).map_err(|err| fail(err.to_string()))?;
        Ok(GuestCartRecord {
            id,
        })
    }

    fn remove_guest_cart(&self, record: &GuestCartRecord) -> Result<(), FixtureError> {
        let key = record.id.to_string();
        let url = self.endpoint(&["guest-carts", &key]);
        self.remove("guest_cart", key, url)
    }
}

impl MaskedCartIdResolver for HttpFixtureApi {
    fn execute(&self, cart_id: CartId) -> Result<MaskedCartId, MaskedIdError> {
        let key = cart_id.to_string();
        let url = self.endpoint(&["guest-carts", &key, "masked-id"]);
        let response = self
            .authorize(self.client.get(url))
            .send()
            .map_err(|err| MaskedIdError::Lookup(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MaskedIdError::NotFound(cart_id));
        }
        if !status.is_success() {
            return Err(MaskedIdError::Lookup(status_message(response)));
        }
        let body = response
            .json::<MaskedIdBody>()
            .map_err(|err| MaskedIdError::Lookup(format!("invalid response: {err}")))?;
        MaskedCartId::new(body.masked_id)
    }
}

/// Formats a failed response as `HTTP <status>: <body>`.
fn status_message(response: Response) -> String {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    format!("HTTP {status}: {}", body.trim())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "fixture_api_tests.rs"]
mod tests;
