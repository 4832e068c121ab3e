//! In-memory cart snapshot with derived queries

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use rust_decimal::Decimal;
use shared::cart::CartLine;

/// The current authoritative snapshot of cart line items.
///
/// The synchronizer is the only writer; consumers read synchronous
/// snapshots. Replacement carries the issuing request's sequence number so
/// a response that lost the race against a later request is discarded
/// instead of clobbering newer state.
#[derive(Debug, Default)]
pub struct CartStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    items: Vec<CartLine>,
    applied_seq: u64,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current line items, in server order.
    pub fn items(&self) -> Vec<CartLine> {
        self.read().items.clone()
    }

    /// Number of cart lines (not quantities).
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    /// Looks up a line by its server-assigned id.
    pub fn line(&self, line_id: &str) -> Option<CartLine> {
        self.read().items.iter().find(|l| l.id == line_id).cloned()
    }

    /// Cart total: sum of price × quantity over lines carrying both.
    ///
    /// Lines missing price or quantity contribute nothing, so a malformed
    /// payload can never make this fail.
    pub fn total(&self) -> Decimal {
        self.read()
            .items
            .iter()
            .filter_map(|line| {
                let price = line.product.as_ref()?.price?;
                let quantity = line.quantity?;
                Some(price * Decimal::from(quantity))
            })
            .sum()
    }

    /// Total quantity across all lines, missing quantities counted as 0.
    pub fn count(&self) -> u32 {
        self.read()
            .items
            .iter()
            .map(|l| l.quantity.unwrap_or(0))
            .sum()
    }

    /// Wholesale replacement with a server-returned item list.
    ///
    /// `seq` is the sequence number of the request that produced `items`.
    /// Returns `false` without touching the store when a response for a
    /// newer request has already been applied.
    pub(crate) fn replace(&self, seq: u64, items: Vec<CartLine>) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if seq < inner.applied_seq {
            tracing::warn!(seq, applied = inner.applied_seq, "discarding stale cart response");
            return false;
        }
        inner.applied_seq = seq;
        inner.items = items;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductSnapshot;

    fn line(id: &str, price: Option<i64>, quantity: Option<u32>) -> CartLine {
        CartLine {
            id: id.to_string(),
            product_id: Some(format!("prod-{}", id)),
            quantity,
            product: Some(ProductSnapshot {
                id: format!("prod-{}", id),
                name: format!("Product {}", id),
                price: price.map(Decimal::from),
                ..ProductSnapshot::default()
            }),
        }
    }

    #[test]
    fn test_total_and_count() {
        let store = CartStore::new();
        store.replace(1, vec![line("a", Some(100), Some(2)), line("b", Some(50), Some(1))]);
        assert_eq!(store.total(), Decimal::from(250));
        assert_eq!(store.count(), 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_malformed_lines_contribute_nothing() {
        let store = CartStore::new();
        store.replace(
            1,
            vec![
                line("a", Some(100), Some(2)),
                line("no-price", None, Some(4)),
                line("no-quantity", Some(30), None),
                CartLine {
                    id: "no-product".to_string(),
                    product_id: None,
                    quantity: Some(5),
                    product: None,
                },
            ],
        );
        // Only the fully-formed line counts toward the total; quantities
        // still count whenever present.
        assert_eq!(store.total(), Decimal::from(200));
        assert_eq!(store.count(), 11);
    }

    #[test]
    fn test_empty_store_is_zero() {
        let store = CartStore::new();
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_stale_replace_is_discarded() {
        let store = CartStore::new();
        assert!(store.replace(2, vec![line("new", Some(10), Some(1))]));
        // A response for an earlier request arrives late and must lose.
        assert!(!store.replace(1, vec![line("old", Some(99), Some(9))]));
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "new");
    }

    #[test]
    fn test_line_lookup() {
        let store = CartStore::new();
        store.replace(1, vec![line("a", Some(10), Some(1))]);
        assert!(store.line("a").is_some());
        assert!(store.line("missing").is_none());
    }
}
