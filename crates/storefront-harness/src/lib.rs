// crates/storefront-harness/src/lib.rs
// ============================================================================
// Module: Storefront Harness Library
// Description: Fixture orchestration and GraphQL helpers for storefront tests.
// Purpose: Drive add-to-cart product-name checks against a GraphQL storefront.
// Dependencies: reqwest, serde, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! The storefront harness creates catalog and guest-cart fixtures, resolves
//! masked cart identifiers, issues `addProductsToCart` mutations, and asserts
//! on the product names echoed back by the storefront.
//! Invariants:
//! - Every [`FixtureScope`] removes the records it created, including on panic.
//! - Fixture creation fails fast and never leaves partial state behind.
//! - Collaborators are passed in explicitly; nothing is resolved from globals.
//!
//! Security posture: mutation inputs are encoded as GraphQL string literals;
//! storefront responses are decoded into typed structures before assertions.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assertions;
pub mod case;
pub mod fixture_api;
pub mod fixtures;
pub mod graphql;
pub mod masked_id;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assertions::AssertionError;
pub use assertions::assert_single_item_named;
pub use case::CART_ALIAS;
pub use case::CaseError;
pub use case::CaseFailure;
pub use case::CaseReport;
pub use case::CaseRunner;
pub use case::CaseStage;
pub use case::PRODUCT_NAME_CASES;
pub use case::ProductNameCase;
pub use case::special_character_fixtures;
pub use fixture_api::HttpFixtureApi;
pub use fixture_api::HttpFixtureApiConfig;
pub use fixtures::FixtureBackend;
pub use fixtures::FixtureDeclaration;
pub use fixtures::FixtureError;
pub use fixtures::FixtureRecord;
pub use fixtures::FixtureScope;
pub use fixtures::FixtureSpec;
pub use fixtures::GuestCartRecord;
pub use fixtures::ProductRecord;
pub use fixtures::ProductSpec;
pub use graphql::GraphQlClient;
pub use graphql::GraphQlClientConfig;
pub use graphql::GraphQlError;
pub use graphql::GraphQlTransport;
pub use graphql::TranscriptEntry;
pub use masked_id::CartId;
pub use masked_id::MaskedCartId;
pub use masked_id::MaskedCartIdResolver;
pub use masked_id::MaskedIdError;
