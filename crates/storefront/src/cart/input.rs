//! Validation of add-to-cart requests.
//!
//! The cart transitions assume well-formed input; this layer turns raw user
//! input into a [`CartAction`] or a typed error.

use thiserror::Error;

use sts_core::{Product, ProductId};

use super::state::CartAction;
use crate::catalog::{CatalogError, ProductRepository};

/// Errors for rejected cart input.
#[derive(Debug, Error)]
pub enum CartInputError {
    #[error("quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("product is out of stock: {0}")]
    OutOfStock(ProductId),

    #[error("product {product} has no color '{color}'")]
    UnknownColor { product: ProductId, color: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Which color an add-to-cart request selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// The product page default: the first listed color, if any.
    #[default]
    ProductDefault,
    /// No color, as from a quick-add button on a product card.
    Unselected,
    Explicit(String),
}

impl ColorChoice {
    /// Build from optional request fields.
    #[must_use]
    pub fn from_request(color: Option<String>, quick_add: bool) -> Self {
        match color {
            Some(color) => Self::Explicit(color),
            None if quick_add => Self::Unselected,
            None => Self::ProductDefault,
        }
    }
}

/// Validate an add request for a product already in hand.
///
/// # Errors
///
/// Returns an error if the quantity is below one, the product is out of
/// stock, or the color is not one of the product's colors.
pub fn validate_add(
    product: Product,
    quantity: i64,
    color: ColorChoice,
) -> Result<CartAction, CartInputError> {
    let quantity = u32::try_from(quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(CartInputError::InvalidQuantity(quantity))?;

    if !product.in_stock {
        return Err(CartInputError::OutOfStock(product.id));
    }

    let selected_color = match color {
        ColorChoice::ProductDefault => product.default_color().map(ToString::to_string),
        ColorChoice::Unselected => None,
        ColorChoice::Explicit(color) => {
            if !product.has_color(&color) {
                return Err(CartInputError::UnknownColor {
                    product: product.id,
                    color,
                });
            }
            Some(color)
        }
    };

    Ok(CartAction::AddItem {
        product,
        quantity,
        selected_color,
    })
}

/// Look up `product_id` and validate an add request for it.
///
/// # Errors
///
/// Returns [`CartInputError::ProductNotFound`] for unknown IDs, repository
/// errors, and any error from [`validate_add`].
pub async fn resolve_add<R: ProductRepository>(
    repo: &R,
    product_id: &ProductId,
    quantity: i64,
    color: ColorChoice,
) -> Result<CartAction, CartInputError> {
    let product = repo
        .by_id(product_id)
        .await?
        .ok_or_else(|| CartInputError::ProductNotFound(product_id.clone()))?;
    validate_add(product, quantity, color)
}
