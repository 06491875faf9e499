// crates/storefront-harness/src/assertions.rs
// ============================================================================
// Module: Cart Assertions
// Description: Checks applied to the cart returned by addProductsToCart.
// Purpose: Report field-level mismatches with expected and actual values.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`assert_single_item_named`] checks the cart in a fixed order: item count,
//! then quantity, then product name. The first mismatch is returned as an
//! [`AssertionError`] naming the field with both values.

use thiserror::Error;

use crate::graphql::response::Cart;
use crate::graphql::response::CartItem;

/// A single mismatched field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: expected {expected:?}, got {actual:?}")]
pub struct AssertionError {
    /// Path of the mismatched field in the response.
    pub field: &'static str,
    /// Expected value.
    pub expected: String,
    /// Observed value.
    pub actual: String,
}

/// Asserts the cart holds exactly one unit of one item named `expected_name`.
///
/// Checks run in order: item count, quantity, then exact name equality.
///
/// # Errors
///
/// Returns the first [`AssertionError`] encountered.
pub fn assert_single_item_named<'a>(
    cart: &'a Cart,
    expected_name: &str,
) -> Result<&'a CartItem, AssertionError> {
    let items = cart.items();
    let [item] = items else {
        return Err(AssertionError {
            field: "cart.items.length",
            expected: "1".to_string(),
            actual: items.len().to_string(),
        });
    };
    if (item.quantity - 1.0).abs() > f64::EPSILON {
        return Err(AssertionError {
            field: "cart.items[0].quantity",
            expected: "1".to_string(),
            actual: item.quantity.to_string(),
        });
    }
    if item.product.name != expected_name {
        return Err(AssertionError {
            field: "cart.items[0].product.name",
            expected: expected_name.to_string(),
            actual: item.product.name.clone(),
        });
    }
    Ok(item)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
