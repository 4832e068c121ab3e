//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity as returned by the catalog API.
///
/// Records from older catalog batches may miss individual fields, so
/// everything beyond the name is optional and defaulted on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Dimensions in centimeters
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Legacy single-image field still present on older records
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Discount in percentage (e.g., 10 = 10%)
    #[serde(default)]
    pub discount: Option<u32>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub min_order: Option<u32>,
    #[serde(default)]
    pub max_order: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Product {
    /// Returns the product identifier if it is present and non-empty.
    pub fn product_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Denormalized copy of product display fields stored alongside a cart line,
/// so the cart renders without re-fetching the product. Captured at add-time
/// and may go stale relative to the live product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Discount in percentage; absent on the wire means no discount
    #[serde(default)]
    pub discount: u32,
    #[serde(default = "default_min_order")]
    pub min_order: u32,
    #[serde(default = "default_max_order")]
    pub max_order: u32,
    #[serde(default)]
    pub stock: u32,
}

fn default_min_order() -> u32 {
    1
}

fn default_max_order() -> u32 {
    100
}

impl Default for ProductSnapshot {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            price: None,
            length: None,
            width: None,
            height: None,
            images: Vec::new(),
            discount: 0,
            min_order: default_min_order(),
            max_order: default_max_order(),
            stock: 0,
        }
    }
}

impl ProductSnapshot {
    /// Captures a display snapshot from a live product record.
    ///
    /// Defaults are applied here and nowhere else: absent discount becomes 0,
    /// absent min order 1, absent max order 100, absent stock 0. The image
    /// list keeps the multi-image field when populated and falls back to the
    /// legacy single-image field.
    pub fn from_product(product: &Product) -> Self {
        let images = if product.images.is_empty() {
            product.image.clone().into_iter().collect()
        } else {
            product.images.clone()
        };
        Self {
            id: product.id.clone().unwrap_or_default(),
            name: product.name.clone(),
            price: product.price,
            length: product.length,
            width: product.width,
            height: product.height,
            images,
            discount: product.discount.unwrap_or(0),
            min_order: product.min_order.unwrap_or(1),
            max_order: product.max_order.unwrap_or(100),
            stock: product.stock.unwrap_or(0),
        }
    }

    /// A snapshot is usable only while it still references a product.
    pub fn has_product_ref(&self) -> bool {
        !self.id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_snapshot_defaults_from_sparse_product() {
        let product = Product {
            id: Some("p1".to_string()),
            name: "Bamboo basket".to_string(),
            price: Some(Decimal::from(120)),
            ..Product::default()
        };

        let snapshot = ProductSnapshot::from_product(&product);
        assert_eq!(snapshot.id, "p1");
        assert_eq!(snapshot.discount, 0);
        assert_eq!(snapshot.min_order, 1);
        assert_eq!(snapshot.max_order, 100);
        assert_eq!(snapshot.stock, 0);
        assert!(snapshot.images.is_empty());
        assert!(snapshot.has_product_ref());
    }

    #[test]
    fn test_snapshot_falls_back_to_legacy_image() {
        let product = Product {
            id: Some("p2".to_string()),
            name: "Wall hanging".to_string(),
            image: Some("wall.jpg".to_string()),
            ..Product::default()
        };
        let snapshot = ProductSnapshot::from_product(&product);
        assert_eq!(snapshot.images, vec!["wall.jpg".to_string()]);

        let product = Product {
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            image: Some("ignored.jpg".to_string()),
            ..product
        };
        let snapshot = ProductSnapshot::from_product(&product);
        assert_eq!(snapshot.images.len(), 2);
    }

    #[test]
    fn test_snapshot_wire_defaults() {
        let snapshot: ProductSnapshot = serde_json::from_str(r#"{"id":"p3"}"#).unwrap();
        assert_eq!(snapshot.min_order, 1);
        assert_eq!(snapshot.max_order, 100);
        assert_eq!(snapshot.discount, 0);
        assert_eq!(snapshot.stock, 0);
        assert!(snapshot.price.is_none());
    }

    #[test]
    fn test_snapshot_camel_case_wire_names() {
        let json = r#"{"id":"p4","name":"Tray","price":49.5,"minOrder":2,"maxOrder":10,"stock":7}"#;
        let snapshot: ProductSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.min_order, 2);
        assert_eq!(snapshot.max_order, 10);
        assert_eq!(snapshot.price, Some(Decimal::new(495, 1)));
    }
}
