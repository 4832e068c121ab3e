//! Cart wire types
//!
//! Payloads exchanged with the remote cart resource. The server is the
//! source of truth: every mutating endpoint echoes back the full item list,
//! and the client replaces its local copy wholesale with that response.

use serde::{Deserialize, Serialize};

use crate::models::ProductSnapshot;

/// One product-plus-quantity entry within a cart, as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Server-assigned line id, unique within a cart
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Display snapshot captured at add-time; may go stale relative to the
    /// live product record
    #[serde(default)]
    pub product: Option<ProductSnapshot>,
}

impl CartLine {
    /// Returns the product reference carried by this line's snapshot.
    pub fn product_ref(&self) -> Option<&str> {
        self.product
            .as_ref()
            .filter(|p| p.has_product_ref())
            .map(|p| p.id.as_str())
    }

    /// A line without a resolvable product reference is corrupt; such lines
    /// are dropped on load rather than repaired.
    pub fn is_valid(&self) -> bool {
        self.product_ref().is_some()
    }
}

/// Success body shared by every cart endpoint that returns the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartPayload {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Add-item request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: u32,
    pub product: ProductSnapshot,
}

/// Quantity update request body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_without_snapshot_is_invalid() {
        let line = CartLine {
            id: "l1".to_string(),
            product_id: Some("p1".to_string()),
            quantity: Some(1),
            product: None,
        };
        assert!(!line.is_valid());
        assert!(line.product_ref().is_none());
    }

    #[test]
    fn test_line_with_empty_product_id_is_invalid() {
        let line = CartLine {
            id: "l2".to_string(),
            product_id: None,
            quantity: Some(1),
            product: Some(ProductSnapshot::default()),
        };
        assert!(!line.is_valid());
    }

    #[test]
    fn test_line_wire_format() {
        let json = r#"{
            "id": "l3",
            "productId": "p9",
            "quantity": 2,
            "product": {"id": "p9", "name": "Planter", "price": 75.0}
        }"#;
        let line: CartLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.product_id.as_deref(), Some("p9"));
        assert_eq!(line.product_ref(), Some("p9"));
        assert!(line.is_valid());
    }

    #[test]
    fn test_payload_tolerates_missing_items() {
        let payload: CartPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.items.is_empty());
    }
}
