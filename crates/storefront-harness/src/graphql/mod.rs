// crates/storefront-harness/src/graphql/mod.rs
// ============================================================================
// Module: Storefront GraphQL
// Description: GraphQL transport, mutation documents, and response decoding.
// Purpose: Issue add-to-cart mutations and decode the returned cart.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! [`GraphQlClient`] posts documents to a storefront endpoint and records a
//! transcript of every exchange. [`mutation`] builds the add-to-cart document
//! and [`response`] decodes its payload.
//! Invariants:
//! - Non-2xx statuses, malformed bodies, and GraphQL `errors` fail closed.
//! - Requests are never retried.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod client;
pub mod mutation;
pub mod response;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::GraphQlClient;
pub use client::GraphQlClientConfig;
pub use client::GraphQlError;
pub use client::GraphQlTransport;
pub use client::TranscriptEntry;
