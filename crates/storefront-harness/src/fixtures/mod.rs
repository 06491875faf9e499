// crates/storefront-harness/src/fixtures/mod.rs
// ============================================================================
// Module: Fixture Orchestration
// Description: Declarative fixture specs, backends, and scoped lifecycles.
// Purpose: Create per-case catalog and cart records and guarantee cleanup.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! Fixtures are declared as a list of [`FixtureDeclaration`] values and
//! materialized through a [`FixtureBackend`] into a [`FixtureScope`]. The
//! scope owns every created record and removes them in reverse creation order
//! when it is torn down or dropped.
//! Invariants:
//! - Aliases are unique within a scope.
//! - A failed creation removes everything the scope already created.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod backend;
mod declaration;
mod scope;

// ============================================================================
// SECTION: Tests
// ============================================================================


// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use backend::FixtureBackend;
pub use backend::FixtureError;
pub use declaration::FixtureDeclaration;
pub use declaration::FixtureRecord;
pub use declaration::FixtureSpec;
pub use declaration::GuestCartRecord;
pub use declaration::ProductRecord;
pub use declaration::ProductSpec;
pub use scope::FixtureScope;
