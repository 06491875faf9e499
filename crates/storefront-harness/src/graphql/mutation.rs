// crates/storefront-harness/src/graphql/mutation.rs
// ============================================================================
// Module: Add-To-Cart Mutation
// Description: Builds the addProductsToCart mutation document.
// Purpose: Keep the requested selection set in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Documents are assembled by string construction. Interpolated values are
//! encoded as GraphQL string literals, so a quote or backslash in a SKU can
//! never terminate the literal early.

use std::fmt::Write as _;

use crate::masked_id::MaskedCartId;

/// Root field name of the add-to-cart mutation.
pub const ADD_PRODUCTS_TO_CART: &str = "addProductsToCart";

/// Builds a mutation adding one unit of `sku` to the masked cart.
///
/// The selection requests the cart id and, per item, `uid`, `quantity` and
/// `product { sku name }`.
#[must_use]
pub fn add_products_to_cart_mutation(masked_cart_id: &MaskedCartId, sku: &str) -> String {
    let cart_id = graphql_string_literal(masked_cart_id.as_str());
    let sku = graphql_string_literal(sku);
    format!(
        r"mutation {{
  {ADD_PRODUCTS_TO_CART}(
    cartId: {cart_id},
    cartItems: [
      {{
        sku: {sku}
        quantity: 1
      }}
    ]
  ) {{
    cart {{
      id
      items {{
        uid
        quantity
        product {{
          sku
          name
        }}
      }}
    }}
  }}
}}"
    )
}

/// Encodes `value` as a quoted single-line GraphQL string literal.
#[must_use]
pub fn graphql_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(ch));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
