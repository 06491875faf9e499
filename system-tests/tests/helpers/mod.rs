// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for storefront system-tests.
// Purpose: Provide the stub storefront, harness wiring, and artifact utilities.
// Dependencies: system-tests, storefront-harness
// ============================================================================

//! ## Overview
//! Shared helpers for storefront system-tests.
//! Invariants:
//! - Every suite either spawns its own stub or serializes on the live storefront.
//! - Artifacts land under the configured run root.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod readiness;
