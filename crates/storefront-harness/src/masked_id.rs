// crates/storefront-harness/src/masked_id.rs
// ============================================================================
// Module: Masked Cart Identifiers
// Description: Cart identifier newtypes and the masking service interface.
// Purpose: Map internal numeric cart ids to opaque storefront tokens.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Storefronts never expose sequential cart ids to GraphQL clients. Internal
//! ids are [`CartId`] values; the token sent over GraphQL is a
//! [`MaskedCartId`] obtained from a [`MaskedCartIdResolver`].
//! Invariants:
//! - [`CartId`] is always a positive integer.
//! - [`MaskedCartId`] is never empty or whitespace-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU64;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted while resolving or validating cart identifiers.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum MaskedIdError {
    /// The internal id does not correspond to an existing cart.
    #[error("no such entity with cartId = {0}")]
    NotFound(CartId),
    /// Internal cart ids must be positive.
    #[error("cart id must be a positive integer")]
    InvalidCartId,
    /// Masked tokens must carry content.
    #[error("masked cart id must not be empty")]
    EmptyMaskedId,
    /// The lookup service failed for a reason other than a missing cart.
    #[error("masked cart id lookup failed: {0}")]
    Lookup(String),
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Internal numeric cart identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CartId(NonZeroU64);

impl CartId {
    /// Creates a cart id from a raw integer.
    ///
    /// # Errors
    ///
    /// Returns [`MaskedIdError::InvalidCartId`] when `raw` is zero.
    pub fn new(raw: u64) -> Result<Self, MaskedIdError> {
        NonZeroU64::new(raw).map(Self).ok_or(MaskedIdError::InvalidCartId)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for CartId {
    type Error = MaskedIdError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<CartId> for u64 {
    fn from(id: CartId) -> Self {
        id.get()
    }
}

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque cart token accepted by the storefront GraphQL API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MaskedCartId(String);

impl MaskedCartId {
    /// Creates a masked id from a token string.
    ///
    /// # Errors
    ///
    /// Returns [`MaskedIdError::EmptyMaskedId`] when the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, MaskedIdError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(MaskedIdError::EmptyMaskedId);
        }
        Ok(Self(token))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MaskedCartId {
    type Error = MaskedIdError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token)
    }
}

impl From<MaskedCartId> for String {
    fn from(id: MaskedCartId) -> Self {
        id.0
    }
}

impl fmt::Display for MaskedCartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// SECTION: Resolver Trait
// ============================================================================

/// Maps internal cart ids to masked storefront tokens.
pub trait MaskedCartIdResolver: Send + Sync {
    /// Returns the masked token for `cart_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MaskedIdError::NotFound`] when no cart has the given id.
    fn execute(&self, cart_id: CartId) -> Result<MaskedCartId, MaskedIdError>;
}

// ============================================================================
// SECTION: Tests
// ============================================================================
