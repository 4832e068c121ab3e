//! Cart operation outcomes

use thiserror::Error;

use crate::ClientError;

/// Cart operation error type.
///
/// The first five variants are resolved locally and never reach the
/// network. `Fetch` and `Sync` wrap transport failures; `Sync` is reported
/// after the corrective re-fetch already ran, because the user's intended
/// action did not take effect even when consistency was restored.
#[derive(Debug, Error)]
pub enum CartError {
    /// Product data is missing an identifier
    #[error("invalid product data")]
    InvalidProduct,

    /// No active session; the caller should redirect to login
    #[error("authentication required")]
    AuthenticationRequired,

    /// The server rejected the call for this session
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// No cart line with the given id
    #[error("item {0} not found in cart")]
    ItemNotFound(String),

    /// Cart line is missing its product reference
    #[error("cart line {0} is missing product information")]
    CorruptLine(String),

    /// Initial cart load failed; retryable via `refresh`
    #[error("failed to load cart: {source}")]
    Fetch {
        #[source]
        source: ClientError,
    },

    /// A mutation failed after reaching the server
    #[error("failed to {operation}: {source}")]
    Sync {
        /// Which operation failed
        operation: &'static str,
        /// Whether the corrective re-fetch restored server truth; `false`
        /// means the store fell back to empty
        resynced: bool,
        #[source]
        source: ClientError,
    },
}

impl CartError {
    /// True for outcomes that should send the user to the login view.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::AuthenticationRequired | Self::AccessDenied(_))
    }
}
