//! Checkout and the order summary.
//!
//! Submitting a checkout stores the order under `orderData`. The order
//! summary then reads it back, empties the cart and, exactly once per order,
//! produces the chat deep link that notifies the shop. The `orderSent` flag
//! makes a reload of the summary skip the notification.

pub mod message;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use sts_core::{CustomerInfo, OrderNumber, OrderStatus, PaymentMethod};

use crate::cart::{CartAction, CartLineItem, CartStore};
use crate::i18n::Translator;
use crate::store::{KeyValueStore, StoreError, keys};

pub use message::{deep_link, order_message};

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Required customer fields are blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    #[error("failed to serialize order: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw checkout form input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub city: String,
    pub street: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub landmark: Option<String>,
    pub notes: Option<String>,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Trim the input and check required fields.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingFields` naming every blank required
    /// field.
    pub fn validate(self) -> Result<CustomerInfo, CheckoutError> {
        let required = [
            ("name", self.name.trim()),
            ("phone", self.phone.trim()),
            ("city", self.city.trim()),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(CustomerInfo {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            city: self.city.trim().to_string(),
            street: optional(self.street),
            building: optional(self.building),
            floor: optional(self.floor),
            landmark: optional(self.landmark),
            notes: optional(self.notes),
            payment_method: self.payment_method,
        })
    }
}

/// A placed order as stored under `orderData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub items: Vec<CartLineItem>,
    pub customer_info: CustomerInfo,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// Place an order for the current cart.
///
/// Writes `orderData`, clears `orderSent` so the new order gets its own
/// notification, and closes the cart drawer. The cart itself is emptied
/// when the order summary is shown.
///
/// # Errors
///
/// Returns an error if the cart is empty, a required field is blank, or the
/// order cannot be stored.
#[instrument(skip_all)]
pub fn submit(
    cart: &mut CartStore,
    store: &dyn KeyValueStore,
    form: CheckoutForm,
    now: DateTime<Utc>,
) -> Result<OrderData, CheckoutError> {
    if cart.state().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let customer_info = form.validate()?;

    let order = OrderData {
        items: cart.state().items().to_vec(),
        customer_info,
        total: cart.state().total(),
        order_number: OrderNumber::from_timestamp_millis(now.timestamp_millis()),
        placed_at: now,
        status: OrderStatus::Pending,
    };

    store.set(keys::ORDER_DATA, &serde_json::to_string(&order)?)?;
    store.remove(keys::ORDER_SENT)?;
    cart.dispatch(CartAction::Close);

    info!(
        order_number = %order.order_number,
        lines = order.items.len(),
        total = %order.total,
        "Order placed"
    );
    Ok(order)
}

/// What the order summary page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order: OrderData,
    /// Deep link for the manual "send" button.
    pub share_url: String,
    /// Set only the first time the summary is shown for this order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_url: Option<String>,
}

/// Read the stored order for display.
///
/// Returns `None` when no order was placed or the stored value is corrupt;
/// the caller shows the home page instead. Otherwise the cart is emptied
/// and, unless `orderSent` is already set, the notification link is issued
/// and the flag written.
#[instrument(skip(cart, store, translator))]
pub fn load_summary(
    cart: &mut CartStore,
    store: &dyn KeyValueStore,
    translator: Translator,
    whatsapp_number: &str,
) -> Option<OrderSummary> {
    let raw = match store.get(keys::ORDER_DATA) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored order");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Failed to read stored order");
            return None;
        }
    };
    let order: OrderData = match serde_json::from_str(&raw) {
        Ok(order) => order,
        Err(e) => {
            warn!(error = %e, "Stored order is corrupt");
            return None;
        }
    };

    cart.dispatch(CartAction::ClearCart);

    let share_url = deep_link(whatsapp_number, &order_message(&order, translator));
    let already_sent = match store.get(keys::ORDER_SENT) {
        Ok(flag) => flag.is_some(),
        Err(e) => {
            warn!(error = %e, "Failed to read order notification flag");
            false
        }
    };

    let notification_url = if already_sent {
        None
    } else {
        if let Err(e) = store.set(keys::ORDER_SENT, "true") {
            warn!(error = %e, "Failed to record order notification");
        }
        info!(order_number = %order.order_number, "Issued order notification");
        Some(share_url.clone())
    };

    Some(OrderSummary {
        order,
        share_url,
        notification_url,
    })
}
