//! Cart synchronizer
//!
//! Mediates every state-changing cart operation between consumers and the
//! remote cart resource, and keeps the store consistent with the server
//! even when individual calls fail. Preconditions are checked locally
//! before any network call; successful calls replace the store with the
//! server's response; failed calls trigger one corrective re-fetch.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use shared::cart::{AddItemRequest, CartLine, CartPayload};
use shared::models::{Product, ProductSnapshot};

use super::api::CartApi;
use super::error::CartError;
use super::store::CartStore;
use crate::ClientError;
use crate::session::SessionHandle;

/// Cart lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// Created, `initialize` not yet run
    Uninitialized,
    /// No authenticated session; settled without network calls
    Empty,
    /// Initial fetch in flight
    Loading,
    /// Synchronized with the server (possibly zero lines)
    Ready,
    /// Initial fetch failed; `refresh` retries
    Error,
}

/// Orchestrates cart state against the remote cart resource.
///
/// Explicitly constructed with its API seam and session handle and shared
/// behind an `Arc`; there is no ambient global cart. The synchronizer is
/// the store's only writer.
pub struct CartSynchronizer {
    api: Arc<dyn CartApi>,
    session: SessionHandle,
    store: CartStore,
    phase: RwLock<CartPhase>,
    loading: AtomicBool,
    seq: AtomicU64,
}

impl CartSynchronizer {
    pub fn new(api: Arc<dyn CartApi>, session: SessionHandle) -> Self {
        Self {
            api,
            session,
            store: CartStore::new(),
            phase: RwLock::new(CartPhase::Uninitialized),
            loading: AtomicBool::new(false),
            seq: AtomicU64::new(0),
        }
    }

    /// Read access to the cart snapshot and its derived queries.
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CartPhase {
        *self.phase.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a request is in flight. Consumers use this to gate controls
    /// while a mutation settles.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Relaxed)
    }

    fn set_phase(&self, phase: CartPhase) {
        *self.phase.write().unwrap_or_else(PoisonError::into_inner) = phase;
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        self.loading.store(true, Ordering::Relaxed);
        LoadingGuard(&self.loading)
    }

    // ========== Lifecycle ==========

    /// Fetch-on-mount. Without a session this settles into `Empty` without
    /// touching the network.
    pub async fn initialize(&self) -> Result<(), CartError> {
        self.load().await
    }

    /// Re-fetches the cart; the retry path out of the `Error` phase.
    pub async fn refresh(&self) -> Result<(), CartError> {
        self.load().await
    }

    /// Reacts to sign-in, sign-out, or a switched user.
    ///
    /// Sign-out clears the store immediately with no network call; a new
    /// identity reloads from the server as on initial mount.
    pub async fn on_session_changed(&self) -> Result<(), CartError> {
        self.load().await
    }

    /// Clears local state after a successful order placement. The server
    /// already emptied the cart as part of the order, so no round-trip is
    /// needed.
    pub fn on_order_placed(&self) {
        self.store.replace(self.next_seq(), Vec::new());
        self.set_phase(CartPhase::Ready);
    }

    async fn load(&self) -> Result<(), CartError> {
        if !self.session.is_authenticated() {
            self.store.replace(self.next_seq(), Vec::new());
            self.set_phase(CartPhase::Empty);
            return Ok(());
        }

        self.set_phase(CartPhase::Loading);
        let _loading = self.begin_loading();
        let seq = self.next_seq();

        match self.api.fetch_cart().await {
            Ok(payload) => {
                self.store.replace(seq, sanitize(payload.items));
                self.set_phase(CartPhase::Ready);
                Ok(())
            }
            // A missing cart is an empty cart, not an error.
            Err(err) if err.is_not_found() => {
                self.store.replace(seq, Vec::new());
                self.set_phase(CartPhase::Ready);
                Ok(())
            }
            Err(err) => {
                self.store.replace(seq, Vec::new());
                self.set_phase(CartPhase::Error);
                Err(CartError::Fetch { source: err })
            }
        }
    }

    // ========== Mutations ==========

    /// Adds a product to the cart.
    ///
    /// The server merges with an existing line for the same product; the
    /// client never computes that merge itself. The request carries a
    /// normalized display snapshot with defaults applied at construction.
    pub async fn add_item(&self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if !self.session.is_authenticated() {
            return Err(CartError::AuthenticationRequired);
        }
        let product_id = product.product_id().ok_or(CartError::InvalidProduct)?;

        let request = AddItemRequest {
            product_id: product_id.to_string(),
            quantity,
            product: ProductSnapshot::from_product(product),
        };

        let _loading = self.begin_loading();
        let seq = self.next_seq();
        let result = self.api.add_item(&request).await;
        self.apply_mutation("add item", seq, result.map(Some)).await
    }

    /// Forwards a new quantity for an existing line.
    ///
    /// Quantity is not clamped against the snapshot's min/max/stock here;
    /// the calling surface owns that rule and clamps before calling.
    pub async fn update_quantity(&self, line_id: &str, quantity: u32) -> Result<(), CartError> {
        let product_id = self.resolve_product_ref(line_id)?;

        let _loading = self.begin_loading();
        let seq = self.next_seq();
        let result = self.api.update_quantity(&product_id, quantity).await;
        self.apply_mutation("update quantity", seq, result.map(Some))
            .await
    }

    /// Removes a line from the cart.
    pub async fn remove_item(&self, line_id: &str) -> Result<(), CartError> {
        let product_id = self.resolve_product_ref(line_id)?;

        let _loading = self.begin_loading();
        let seq = self.next_seq();
        let result = self.api.remove_item(&product_id).await;
        self.apply_mutation("remove item", seq, result.map(Some))
            .await
    }

    /// Empties the cart server-side.
    pub async fn clear(&self) -> Result<(), CartError> {
        if !self.session.is_authenticated() {
            return Err(CartError::AuthenticationRequired);
        }

        let _loading = self.begin_loading();
        let seq = self.next_seq();
        let result = self.api.clear().await.map(|()| None);
        self.apply_mutation("clear cart", seq, result).await
    }

    // ========== Internals ==========

    /// Resolves a line id to the product reference the wire contract
    /// addresses. The store is sanitized on load, so `CorruptLine` only
    /// fires if a malformed line slipped in anyway.
    fn resolve_product_ref(&self, line_id: &str) -> Result<String, CartError> {
        let line = self
            .store
            .line(line_id)
            .ok_or_else(|| CartError::ItemNotFound(line_id.to_string()))?;
        line.product_ref()
            .map(str::to_string)
            .ok_or_else(|| CartError::CorruptLine(line_id.to_string()))
    }

    /// Applies a mutation outcome. `Ok(None)` marks a bulk clear whose
    /// success body is empty.
    async fn apply_mutation(
        &self,
        operation: &'static str,
        seq: u64,
        result: Result<Option<CartPayload>, ClientError>,
    ) -> Result<(), CartError> {
        match result {
            Ok(payload) => {
                let items = payload.map(|p| sanitize(p.items)).unwrap_or_default();
                if !self.store.replace(seq, items) {
                    tracing::debug!(operation, "newer response already applied");
                }
                self.set_phase(CartPhase::Ready);
                Ok(())
            }
            // The server did not act on the request, so local state still
            // matches server truth; no corrective re-fetch.
            Err(ClientError::Unauthorized) => Err(CartError::AuthenticationRequired),
            Err(ClientError::Forbidden(msg)) => {
                tracing::warn!(operation, "authorization rejected: {}", msg);
                Err(CartError::AccessDenied(msg))
            }
            Err(err) => self.resync(operation, err).await,
        }
    }

    /// One corrective GET after a failed mutation, so local state matches
    /// server truth again. The original operation is still reported as a
    /// failure: the user's intended action did not take effect.
    async fn resync(&self, operation: &'static str, source: ClientError) -> Result<(), CartError> {
        tracing::warn!(operation, error = %source, "mutation failed, re-fetching cart");
        let seq = self.next_seq();
        let resynced = match self.api.fetch_cart().await {
            Ok(payload) => {
                self.store.replace(seq, sanitize(payload.items));
                true
            }
            Err(err) if err.is_not_found() => {
                self.store.replace(seq, Vec::new());
                true
            }
            Err(refetch) => {
                tracing::error!(operation, error = %refetch, "corrective re-fetch failed, resetting cart");
                self.store.replace(seq, Vec::new());
                false
            }
        };
        self.set_phase(CartPhase::Ready);
        Err(CartError::Sync {
            operation,
            resynced,
            source,
        })
    }
}

impl std::fmt::Debug for CartSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSynchronizer")
            .field("phase", &self.phase())
            .field("lines", &self.store.len())
            .field("loading", &self.is_loading())
            .finish()
    }
}

/// Drops lines whose product snapshot is missing or unidentifiable.
/// Corrupt lines are dropped, not repaired, and dropping is idempotent:
/// loading the same malformed payload twice yields the same result.
fn sanitize(items: Vec<CartLine>) -> Vec<CartLine> {
    let total = items.len();
    let items: Vec<CartLine> = items.into_iter().filter(CartLine::is_valid).collect();
    let dropped = total - items.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropped cart lines with missing product data");
    }
    items
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}
