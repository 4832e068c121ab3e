//! Cart synchronization subsystem
//!
//! The server is the source of truth for cart contents; this module keeps a
//! cached, eventually-consistent copy. Every mutation round-trips to the
//! server and replaces local state wholesale with the server's response.
//! Failed mutations trigger a single corrective re-fetch so the local copy
//! never diverges silently, and no operation ever leaves the store holding
//! optimistic, unconfirmed data.

mod api;
mod error;
mod store;
mod sync;

pub use api::CartApi;
pub use error::CartError;
pub use store::CartStore;
pub use sync::{CartPhase, CartSynchronizer};
