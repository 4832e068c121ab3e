//! Orders API

use shared::order::{Order, PlaceOrderRequest};

use crate::{ClientResult, HttpClient};

impl HttpClient {
    /// Place an order from the current cart contents.
    ///
    /// The server empties the cart as part of placement; callers holding a
    /// cart synchronizer should invoke `on_order_placed` after success.
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<Order> {
        self.post("/orders", request).await
    }

    /// List the current user's orders.
    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/orders").await
    }
}
