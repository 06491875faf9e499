// crates/storefront-harness/src/graphql/response.rs
// ============================================================================
// Module: Add-To-Cart Response
// Description: Typed view of the addProductsToCart payload.
// Purpose: Decode mutation data before assertions run.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Serde types for the `addProductsToCart` payload. A missing or `null`
//! `items` list decodes as an empty cart so the item-count check reports it.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::graphql::GraphQlError;

/// Product summary selected on each cart item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProductSummary {
    /// Product SKU.
    pub sku: String,
    /// Product name as rendered by the storefront.
    pub name: String,
}

/// Cart line item.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CartItem {
    /// Opaque item identifier.
    pub uid: String,
    /// Item quantity. Storefronts report it as a float.
    pub quantity: f64,
    /// Product in the line.
    pub product: ProductSummary,
}

/// Cart returned by the mutation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Cart {
    /// Masked cart id echoed by the storefront.
    pub id: String,
    /// Line items; storefronts may return `null` for an empty cart.
    #[serde(default)]
    pub items: Option<Vec<CartItem>>,
}

impl Cart {
    /// Returns the line items, treating `null` as empty.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// Output of `addProductsToCart`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AddProductsToCartOutput {
    /// Updated cart.
    pub cart: Cart,
}

#[derive(Debug, Deserialize)]
struct MutationData {
    #[serde(rename = "addProductsToCart")]
    add_products_to_cart: Option<AddProductsToCartOutput>,
}

/// Decodes the `data` member of an add-to-cart response.
///
/// # Errors
///
/// Returns [`GraphQlError::Decode`] when the payload is missing or malformed.
pub fn decode_add_products_to_cart(data: Value) -> Result<AddProductsToCartOutput, GraphQlError> {
    let decoded: MutationData =
        serde_json::from_value(data).map_err(|err| GraphQlError::Decode(err.to_string()))?;
    decoded
        .add_products_to_cart
        .ok_or_else(|| GraphQlError::Decode("addProductsToCart is null".to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
