//! Saving and restoring the cart through a [`KeyValueStore`].
//!
//! Only `{ items, total }` is stored. The drawer flag is never persisted and a
//! hydrated cart always starts closed.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::container::CartListener;
use super::state::{CartLineItem, CartState};
use crate::store::{KeyValueStore, keys};

/// Stored cart layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_total"
    )]
    pub total: Decimal,
}

/// Read a stored total, treating `null` or a non-numeric value as zero.
fn lenient_total<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .and_then(|total| Decimal::try_from(total).ok())
        .unwrap_or_default())
}

impl From<&CartState> for CartSnapshot {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().to_vec(),
            total: state.total(),
        }
    }
}

/// Restore the cart from `store`.
///
/// A missing key, a read error or an unparseable value all yield the empty
/// cart. The stored total is not trusted; it is recomputed from the items.
#[must_use]
pub fn hydrate(store: &dyn KeyValueStore) -> CartState {
    let raw = match store.get(keys::CART) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored cart, starting empty");
            return CartState::empty();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            return CartState::empty();
        }
    };

    match serde_json::from_str::<CartSnapshot>(&raw) {
        Ok(snapshot) => {
            let stored_total = snapshot.total;
            let state = CartState::from_lines(snapshot.items);
            if state.total() != stored_total {
                debug!(
                    stored = %stored_total,
                    recomputed = %state.total(),
                    "Stored cart total differs from items"
                );
            }
            state
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is corrupt, starting empty");
            CartState::empty()
        }
    }
}

/// Write the cart contents to `store`.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save(store: &dyn KeyValueStore, state: &CartState) -> Result<(), SaveError> {
    let json = serde_json::to_string(&CartSnapshot::from(state))?;
    store.set(keys::CART, &json)?;
    Ok(())
}

/// Errors from [`save`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}

/// Listener that writes the cart on every content change.
///
/// Writes are fire-and-forget: a failure is logged and the in-memory cart
/// stays authoritative.
#[derive(Debug, Clone)]
pub struct CartPersister {
    store: Arc<dyn KeyValueStore>,
}

impl CartPersister {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl CartListener for CartPersister {
    fn on_change(&self, state: &CartState) {
        if let Err(e) = save(self.store.as_ref(), state) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
