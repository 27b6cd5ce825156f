//! Core types for the STS storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod email;
pub mod id;
pub mod language;
pub mod price;
pub mod product;
pub mod status;

pub use customer::{CustomerInfo, PaymentMethod};
pub use email::{Email, EmailError};
pub use id::*;
pub use language::Language;
pub use price::{Price, PriceError, format_amount};
pub use product::Product;
pub use status::OrderStatus;
