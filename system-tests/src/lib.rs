// system-tests/src/lib.rs
// ============================================================================
// Module: Storefront System Tests Library
// Description: Shared configuration and logging for storefront system tests.
// Purpose: Provide common utilities for the storefront system-test binaries.
// Dependencies: tracing-subscriber, url
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration and logging setup used by the
//! storefront system-test binaries in `system-tests/tests`.
//! Security posture: environment inputs are untrusted and parsed fail-closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod logging;
