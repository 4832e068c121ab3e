//! Wicker Client - HTTP client for the storefront API
//!
//! Provides the storefront's remote API surfaces (auth, catalog, orders)
//! and the cart synchronization subsystem. The server is the source of
//! truth for all remote state; this crate keeps cached copies consistent
//! with it.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{SessionData, SessionHandle};

// Re-export shared types for convenience
pub use shared::cart::{AddItemRequest, CartLine, CartPayload};
pub use shared::client::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
pub use shared::models::{Product, ProductSnapshot};
pub use shared::order::{Order, OrderItem, PlaceOrderRequest};

// Cart subsystem
pub use cart::{CartApi, CartError, CartPhase, CartStore, CartSynchronizer};
