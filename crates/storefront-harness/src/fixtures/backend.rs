// crates/storefront-harness/src/fixtures/backend.rs
// ============================================================================
// Module: Fixture Backend
// Description: Backend trait and error type for fixture persistence.
// Purpose: Decouple fixture lifecycles from the service that stores records.
// Dependencies: thiserror
// ============================================================================

use thiserror::Error;

use crate::fixtures::declaration::GuestCartRecord;
use crate::fixtures::declaration::ProductRecord;
use crate::fixtures::declaration::ProductSpec;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted while creating, looking up, or removing fixtures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Backend refused or failed to create a record.
    #[error("failed to create {kind} fixture: {message}")]
    Create {
        /// Fixture kind label.
        kind: &'static str,
        /// Backend failure detail.
        message: String,
    },
    /// Backend failed to remove a record.
    #[error("failed to remove {kind} fixture {key}: {message}")]
    Remove {
        /// Fixture kind label.
        kind: &'static str,
        /// Record key (sku or cart id).
        key: String,
        /// Backend failure detail.
        message: String,
    },
    /// Two declarations in one scope share an alias.
    #[error("duplicate fixture alias: {0}")]
    DuplicateAlias(String),
    /// No record is registered under the alias.
    #[error("no fixture registered under alias: {0}")]
    MissingAlias(String),
    /// The aliased record has a different kind than requested.
    #[error("fixture {alias} is a {actual}, expected {expected}")]
    AliasKind {
        /// Requested alias.
        alias: String,
        /// Requested kind label.
        expected: &'static str,
        /// Actual kind label.
        actual: &'static str,
    },
    /// Backend client could not be constructed.
    #[error("fixture backend unavailable: {0}")]
    Backend(String),
}

// ============================================================================
// SECTION: Backend Trait
// ============================================================================

/// Persists and removes fixture records.
pub trait FixtureBackend: Send + Sync {
    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Create`] when the product cannot be created.
    fn create_product(&self, spec: &ProductSpec) -> Result<ProductRecord, FixtureError>;

    /// Removes a product. Removing an already-absent product succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Remove`] when removal fails.
    fn remove_product(&self, record: &ProductRecord) -> Result<(), FixtureError>;

    /// Creates an empty guest cart.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Create`] when the cart cannot be created.
    fn create_guest_cart(&self) -> Result<GuestCartRecord, FixtureError>;

    /// Removes a guest cart. Removing an already-absent cart succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Remove`] when removal fails.
    fn remove_guest_cart(&self, record: &GuestCartRecord) -> Result<(), FixtureError>;
}
