//! STS Core - Shared types library.
//!
//! This crate provides the domain types used across all STS components:
//! - `storefront` - Cart state machine, catalog, search, checkout, HTTP API
//! - `cli` - Command-line storefront driven by the same core
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no HTTP. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product records, prices, customer info, languages and IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
