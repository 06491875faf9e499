// crates/storefront-harness/src/fixtures/declaration.rs
// ============================================================================
// Module: Fixture Declarations
// Description: Fixture specs, aliases, and created-record types.
// Purpose: Describe what a case needs before anything is created.
// Dependencies: serde
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::masked_id::CartId;

// ============================================================================
// SECTION: Specs
// ============================================================================

/// Field values for a catalog product fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSpec {
    /// Unique stock-keeping unit.
    pub sku: String,
    /// Stored product name; may hold unicode glyphs or HTML entities.
    pub name: String,
}

/// Fixture kinds understood by a [`crate::fixtures::FixtureBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureSpec {
    /// Simple catalog product.
    Product(ProductSpec),
    /// Empty guest cart. Carries no fields.
    GuestCart,
}

impl FixtureSpec {
    /// Returns a stable label for the fixture kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Product(_) => "product",
            Self::GuestCart => "guest_cart",
        }
    }
}

/// A fixture spec plus the optional alias used to retrieve its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureDeclaration {
    /// What to create.
    pub spec: FixtureSpec,
    /// Lookup alias within the owning scope.
    pub alias: Option<String>,
}

impl FixtureDeclaration {
    /// Declares a product fixture.
    #[must_use]
    pub fn product(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spec: FixtureSpec::Product(ProductSpec {
                sku: sku.into(),
                name: name.into(),
            }),
            alias: None,
        }
    }

    /// Declares a guest cart fixture.
    #[must_use]
    pub const fn guest_cart() -> Self {
        Self {
            spec: FixtureSpec::GuestCart,
            alias: None,
        }
    }

    /// Registers the created record under `alias`.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Product created by a fixture backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductRecord {
    /// Backend-assigned entity id.
    pub id: u64,
    /// Stock-keeping unit.
    pub sku: String,
    /// Name as stored by the backend.
    pub name: String,
}

/// Guest cart created by a fixture backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuestCartRecord {
    /// Internal cart id. Must be masked before use over GraphQL.
    pub id: CartId,
}

/// Any record held by a [`crate::fixtures::FixtureScope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureRecord {
    /// Created product.
    Product(ProductRecord),
    /// Created guest cart.
    GuestCart(GuestCartRecord),
}

impl FixtureRecord {
    /// Returns a stable label for the record kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Product(_) => "product",
            Self::GuestCart(_) => "guest_cart",
        }
    }
}
