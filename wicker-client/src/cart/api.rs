//! Remote cart resource contract

use async_trait::async_trait;
use shared::cart::{AddItemRequest, CartPayload, UpdateQuantityRequest};

use crate::{ClientResult, HttpClient};

/// The remote cart resource consumed by the synchronizer.
///
/// The wire contract addresses cart items by product identity for both
/// update and removal; the synchronizer resolves line ids to product
/// references before reaching this boundary. Tests substitute an in-memory
/// implementation.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// GET /cart
    async fn fetch_cart(&self) -> ClientResult<CartPayload>;

    /// POST /cart/items
    async fn add_item(&self, request: &AddItemRequest) -> ClientResult<CartPayload>;

    /// PATCH /cart/items/{productId}
    async fn update_quantity(&self, product_id: &str, quantity: u32) -> ClientResult<CartPayload>;

    /// DELETE /cart/items/{productId}
    async fn remove_item(&self, product_id: &str) -> ClientResult<CartPayload>;

    /// DELETE /cart
    async fn clear(&self) -> ClientResult<()>;
}

#[async_trait]
impl CartApi for HttpClient {
    async fn fetch_cart(&self) -> ClientResult<CartPayload> {
        self.get("/cart").await
    }

    async fn add_item(&self, request: &AddItemRequest) -> ClientResult<CartPayload> {
        self.post("/cart/items", request).await
    }

    async fn update_quantity(&self, product_id: &str, quantity: u32) -> ClientResult<CartPayload> {
        self.patch(
            &format!("/cart/items/{}", product_id),
            &UpdateQuantityRequest { quantity },
        )
        .await
    }

    async fn remove_item(&self, product_id: &str) -> ClientResult<CartPayload> {
        self.delete(&format!("/cart/items/{}", product_id)).await
    }

    async fn clear(&self) -> ClientResult<()> {
        self.delete_no_content("/cart").await
    }
}
