//! Shopping cart.
//!
//! - [`state`] - the pure state machine
//! - [`container`] - the observable owner that dispatches actions
//! - [`persistence`] - hydration and the write-back listener
//! - [`input`] - validation of user input into actions

pub mod container;
pub mod input;
pub mod persistence;
pub mod state;

pub use container::{CartListener, CartStore};
pub use input::{CartInputError, ColorChoice, resolve_add, validate_add};
pub use persistence::{CartPersister, CartSnapshot, hydrate};
pub use state::{CartAction, CartLineItem, CartState, NO_COLOR, line_id};

use std::sync::Arc;

use crate::store::KeyValueStore;

/// Hydrate a cart from `store` and subscribe a persister writing back to it.
#[must_use]
pub fn open_persistent(store: Arc<dyn KeyValueStore>) -> CartStore {
    let mut cart = CartStore::new(hydrate(store.as_ref()));
    cart.subscribe(CartPersister::new(store));
    cart
}
