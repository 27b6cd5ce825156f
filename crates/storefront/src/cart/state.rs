//! Cart state and its transitions.
//!
//! [`CartState::apply`] is a pure function of the current state and a
//! [`CartAction`]. It never fails: input is validated before an action is
//! built (see [`super::input`]), and actions that reference a missing line
//! are no-ops.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sts_core::{Product, ProductId};

/// Line ID suffix used when no color is selected.
pub const NO_COLOR: &str = "default";

/// Derive the line ID for a product and optional color.
///
/// The same (product, color) pair always maps to the same ID, which is what
/// makes repeated adds merge into one line.
#[must_use]
pub fn line_id(product_id: &ProductId, selected_color: Option<&str>) -> String {
    format!("{product_id}-{}", selected_color.unwrap_or(NO_COLOR))
}

/// One product/color pair in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: String,
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartLineItem {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Intents the cart reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    AddItem {
        product: Product,
        quantity: u32,
        selected_color: Option<String>,
    },
    RemoveItem {
        line_id: String,
    },
    /// A quantity of zero or less removes the line.
    UpdateQuantity {
        line_id: String,
        quantity: i64,
    },
    ClearCart,
    Open,
    Close,
    Toggle,
}

/// Cart contents plus the drawer visibility flag.
///
/// `total` is private and recomputed from `items` after every change, so it
/// can never drift from the line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    is_open: bool,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
}

impl CartState {
    /// The empty, closed cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart drawer is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Total number of units, shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by ID.
    #[must_use]
    pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == line_id)
    }

    /// Apply an action and return the resulting state.
    #[must_use]
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddItem {
                product,
                quantity,
                selected_color,
            } => {
                if quantity == 0 {
                    return self;
                }
                let id = line_id(&product.id, selected_color.as_deref());
                match self.items.iter_mut().find(|item| item.id == id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(quantity);
                    }
                    None => self.items.push(CartLineItem {
                        id,
                        product,
                        quantity,
                        selected_color,
                    }),
                }
            }
            CartAction::RemoveItem { line_id } => {
                self.items.retain(|item| item.id != line_id);
            }
            CartAction::UpdateQuantity { line_id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.id != line_id);
                } else if let Some(item) = self.items.iter_mut().find(|item| item.id == line_id) {
                    item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::ClearCart => self.items.clear(),
            CartAction::Open => self.is_open = true,
            CartAction::Close => self.is_open = false,
            CartAction::Toggle => self.is_open = !self.is_open,
        }
        self.recompute_total();
        self
    }

    /// Rebuild a closed cart from stored lines.
    ///
    /// Lines are replayed through [`CartAction::AddItem`], so IDs are
    /// re-derived, duplicates merge and zero-quantity lines are dropped.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLineItem>) -> Self {
        lines.into_iter().fold(Self::empty(), |state, line| {
            state.apply(CartAction::AddItem {
                product: line.product,
                quantity: line.quantity,
                selected_color: line.selected_color,
            })
        })
    }

    fn recompute_total(&mut self) {
        self.total = self
            .items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add);
    }
}
