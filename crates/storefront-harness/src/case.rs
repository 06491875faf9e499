// crates/storefront-harness/src/case.rs
// ============================================================================
// Module: Product Name Cases
// Description: Data table, fixtures, and runner for product-name cases.
// Purpose: Run SETUP → BUILD_QUERY → SEND → ASSERT → TEARDOWN per case.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! Each [`ProductNameCase`] runs against its own [`FixtureScope`]: five
//! products whose names carry special characters plus one guest cart. The
//! runner adds the case SKU to the cart and asserts the decoded name.
//! Invariants:
//! - Fixtures are torn down whether the case passes or fails.
//! - Masked-id lookup completes before any GraphQL request is sent.
//! - Stages run in a fixed order with no retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::assertions::AssertionError;
use crate::assertions::assert_single_item_named;
use crate::fixtures::FixtureBackend;
use crate::fixtures::FixtureDeclaration;
use crate::fixtures::FixtureError;
use crate::fixtures::FixtureScope;
use crate::graphql::GraphQlError;
use crate::graphql::GraphQlTransport;
use crate::graphql::mutation::ADD_PRODUCTS_TO_CART;
use crate::graphql::mutation::add_products_to_cart_mutation;
use crate::graphql::response::decode_add_products_to_cart;
use crate::masked_id::MaskedCartIdResolver;
use crate::masked_id::MaskedIdError;

// ============================================================================
// SECTION: Data Table
// ============================================================================

/// Alias of the guest cart fixture.
pub const CART_ALIAS: &str = "cart";

/// One row of the product-name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductNameCase {
    /// SKU added to the cart.
    pub sku: &'static str,
    /// Name expected back, with HTML entities decoded.
    pub expected_name: &'static str,
}

/// Product-name rows: literal glyphs, entity-encoded glyphs, and a plain name.
pub const PRODUCT_NAME_CASES: [ProductNameCase; 5] = [
    ProductNameCase {
        sku: "test-product-1",
        expected_name: "Test Product© 1",
    },
    ProductNameCase {
        sku: "test-product-2",
        expected_name: "Test Product™ 2",
    },
    ProductNameCase {
        sku: "test-product-3",
        expected_name: "Sample Product© 3",
    },
    ProductNameCase {
        sku: "test-product-4",
        expected_name: "Sample Product™ 4",
    },
    ProductNameCase {
        sku: "test-product-5",
        expected_name: "Test Product 5",
    },
];

/// Declares the catalog and cart fixtures every case runs against.
#[must_use]
pub fn special_character_fixtures() -> Vec<FixtureDeclaration> {
    vec![
        FixtureDeclaration::product("test-product-1", "Test Product© 1"),
        FixtureDeclaration::product("test-product-2", "Test Product™ 2"),
        FixtureDeclaration::product("test-product-3", "Sample Product&copy; 3"),
        FixtureDeclaration::product("test-product-4", "Sample Product&trade; 4"),
        FixtureDeclaration::product("test-product-5", "Test Product 5"),
        FixtureDeclaration::guest_cart().with_alias(CART_ALIAS),
    ]
}

// ============================================================================
// SECTION: Stages and Errors
// ============================================================================

/// Lifecycle stage of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStage {
    /// Fixture creation and masked-id lookup.
    Setup,
    /// Mutation document construction.
    BuildQuery,
    /// GraphQL exchange and response decoding.
    Send,
    /// Cart assertions.
    Assert,
    /// Fixture removal.
    Teardown,
}

impl CaseStage {
    /// Returns a stable label for the stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::BuildQuery => "build_query",
            Self::Send => "send",
            Self::Assert => "assert",
            Self::Teardown => "teardown",
        }
    }
}

impl fmt::Display for CaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Underlying cause of a case failure.
#[derive(Debug, Error)]
pub enum CaseFailure {
    /// Fixture creation, lookup, or removal failed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
    /// Masked-id lookup failed.
    #[error(transparent)]
    MaskedId(#[from] MaskedIdError),
    /// The GraphQL exchange failed.
    #[error(transparent)]
    GraphQl(#[from] GraphQlError),
    /// The returned cart did not match expectations.
    #[error(transparent)]
    Assertion(#[from] AssertionError),
}

/// Case failure tagged with the stage it occurred in.
#[derive(Debug, Error)]
#[error("{stage} failed for {sku}: {failure}")]
pub struct CaseError {
    /// Stage that failed.
    pub stage: CaseStage,
    /// SKU of the failing case.
    pub sku: String,
    /// Underlying cause.
    #[source]
    pub failure: CaseFailure,
}

impl CaseError {
    /// Creates a case error for `stage`.
    fn new(stage: CaseStage, sku: &str, failure: impl Into<CaseFailure>) -> Self {
        Self {
            stage,
            sku: sku.to_string(),
            failure: failure.into(),
        }
    }

    /// Returns true when the case failed before any assertion ran.
    #[must_use]
    pub const fn is_setup_failure(&self) -> bool {
        matches!(self.stage, CaseStage::Setup)
    }

    /// Returns the assertion mismatch when the case failed an assertion.
    #[must_use]
    pub const fn assertion(&self) -> Option<&AssertionError> {
        match &self.failure {
            CaseFailure::Assertion(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Outcome of a passing case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReport {
    /// SKU added to the cart.
    pub sku: String,
    /// Expected name.
    pub expected_name: String,
    /// Name returned by the storefront.
    pub actual_name: String,
    /// Masked cart id used for the mutation.
    pub masked_cart_id: String,
    /// Cart id echoed in the response.
    pub cart_id: String,
    /// Uid of the created cart item.
    pub item_uid: String,
}

/// Runs product-name cases against explicitly supplied collaborators.
pub struct CaseRunner {
    /// Creates and removes fixtures.
    backend: Arc<dyn FixtureBackend>,
    /// Masks internal cart ids.
    resolver: Arc<dyn MaskedCartIdResolver>,
    /// Sends GraphQL documents.
    transport: Arc<dyn GraphQlTransport>,
    /// Fixtures materialized for each case.
    declarations: Vec<FixtureDeclaration>,
}

impl CaseRunner {
    /// Creates a runner using [`special_character_fixtures`].
    #[must_use]
    pub fn new(
        backend: Arc<dyn FixtureBackend>,
        resolver: Arc<dyn MaskedCartIdResolver>,
        transport: Arc<dyn GraphQlTransport>,
    ) -> Self {
        Self {
            backend,
            resolver,
            transport,
            declarations: special_character_fixtures(),
        }
    }

    /// Replaces the fixture declarations. One must alias a cart as [`CART_ALIAS`].
    #[must_use]
    pub fn with_declarations(mut self, declarations: Vec<FixtureDeclaration>) -> Self {
        self.declarations = declarations;
        self
    }

    /// Runs one case against fresh fixtures.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] tagged with the stage that failed. When the case
    /// body fails, teardown still runs and its own failures are only logged.
    pub fn run(&self, case: &ProductNameCase) -> Result<CaseReport, CaseError> {
        let span = tracing::info_span!("product_name_case", sku = case.sku);
        let _entered = span.enter();

        tracing::debug!(stage = %CaseStage::Setup, "materializing fixtures");
        let scope = FixtureScope::materialize(Arc::clone(&self.backend), &self.declarations)
            .map_err(|err| CaseError::new(CaseStage::Setup, case.sku, err))?;
        let outcome = self.exercise(&scope, case);

        tracing::debug!(stage = %CaseStage::Teardown, "removing fixtures");
        let teardown = scope.teardown();
        match (outcome, teardown) {
            (Ok(report), Ok(())) => {
                tracing::info!(name = %report.actual_name, "case passed");
                Ok(report)
            }
            (Ok(_), Err(err)) => Err(CaseError::new(CaseStage::Teardown, case.sku, err)),
            (Err(err), teardown) => {
                if let Err(teardown_err) = teardown {
                    tracing::warn!(error = %teardown_err, "fixture teardown failed");
                }
                Err(err)
            }
        }
    }

    /// Runs the stages between setup and teardown.
    fn exercise(
        &self,
        scope: &FixtureScope,
        case: &ProductNameCase,
    ) -> Result<CaseReport, CaseError> {
        let cart = scope
            .guest_cart(CART_ALIAS)
            .map_err(|err| CaseError::new(CaseStage::Setup, case.sku, err))?;
        let masked_cart_id = self
            .resolver
            .execute(cart.id)
            .map_err(|err| CaseError::new(CaseStage::Setup, case.sku, err))?;

        tracing::debug!(stage = %CaseStage::BuildQuery, cart = %masked_cart_id, "building mutation");
        let document = add_products_to_cart_mutation(&masked_cart_id, case.sku);

        tracing::debug!(stage = %CaseStage::Send, "sending mutation");
        let output = self
            .transport
            .execute(ADD_PRODUCTS_TO_CART, &document)
            .and_then(decode_add_products_to_cart)
            .map_err(|err| CaseError::new(CaseStage::Send, case.sku, err))?;

        tracing::debug!(stage = %CaseStage::Assert, "checking cart");
        let item = assert_single_item_named(&output.cart, case.expected_name)
            .map_err(|err| CaseError::new(CaseStage::Assert, case.sku, err))?;

        Ok(CaseReport {
            sku: case.sku.to_string(),
            expected_name: case.expected_name.to_string(),
            actual_name: item.product.name.clone(),
            masked_cart_id: masked_cart_id.to_string(),
            cart_id: output.cart.id.clone(),
            item_uid: item.uid.clone(),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;
