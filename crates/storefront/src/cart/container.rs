//! Observable owner of the cart state.

use std::fmt;

use tracing::debug;

use super::state::{CartAction, CartState};

/// Receives the cart after every transition that changed its contents.
///
/// Visibility-only transitions (open, close, toggle) are not reported.
pub trait CartListener: Send + Sync {
    fn on_change(&self, state: &CartState);
}

/// Holds the current [`CartState`] and notifies listeners on change.
#[derive(Default)]
pub struct CartStore {
    state: CartState,
    listeners: Vec<Box<dyn CartListener>>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store starting from `initial`.
    #[must_use]
    pub fn new(initial: CartState) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for content changes.
    pub fn subscribe(&mut self, listener: impl CartListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Apply `action` and return the new state.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        let next = self.state.clone().apply(action);
        let changed = next.items() != self.state.items() || next.total() != self.state.total();
        self.state = next;

        if changed {
            debug!(
                lines = self.state.items().len(),
                total = %self.state.total(),
                "Cart contents changed"
            );
            for listener in &self.listeners {
                listener.on_change(&self.state);
            }
        }
        &self.state
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::catalog::demo_products;

    struct Counter(Arc<AtomicUsize>);

    impl CartListener for Counter {
        fn on_change(&self, _state: &CartState) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_listeners_see_content_changes_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = CartStore::default();
        store.subscribe(Counter(Arc::clone(&calls)));

        let product = demo_products().remove(0);
        store.dispatch(CartAction::AddItem {
            product,
            quantity: 2,
            selected_color: None,
        });
        store.dispatch(CartAction::Toggle);
        store.dispatch(CartAction::RemoveItem {
            line_id: "missing".to_string(),
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.state().is_open());
        assert_eq!(store.item_count(), 2);

        store.dispatch(CartAction::ClearCart);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_overflowing_quantity_keeps_cart() {
        let mut store = CartStore::default();
        let mut charger = demo_products().remove(8);
        charger.price = sts_core::Price::new(rust_decimal::Decimal::from_i128_with_scale(
            10_i128.pow(20),
            0,
        ))
        .unwrap();
        store.dispatch(CartAction::AddItem {
            product: charger,
            quantity: 1,
            selected_color: None,
        });

        let state = store.dispatch(CartAction::UpdateQuantity {
            line_id: "9-default".to_string(),
            quantity: i64::from(u32::MAX),
        });
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.total(), rust_decimal::Decimal::MAX);
    }
}
