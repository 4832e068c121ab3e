//! Product catalog API

use shared::models::Product;

use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// List all products.
    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.get("/products").await
    }

    /// Get a product by id.
    pub async fn product(&self, id: &str) -> ClientResult<Product> {
        self.get(&format!("/products/{}", id)).await
    }

    /// Best sellers, most popular first.
    pub async fn best_sellers(&self, limit: u32) -> ClientResult<Vec<Product>> {
        self.get(&format!("/products/bestsellers?limit={}", limit))
            .await
    }

    /// Products within a category.
    pub async fn products_by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        self.get(&format!("/products/category/{}", category)).await
    }
}
