//! Shared types for the Wicker storefront
//!
//! Common types used across client crates: product models, cart wire
//! payloads, auth DTOs, and order DTOs. Pure data plus serde, no I/O.

pub mod cart;
pub mod client;
pub mod models;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};
