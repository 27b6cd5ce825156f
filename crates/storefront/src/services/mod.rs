//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `checkout` - Order submission, order summary and the chat notification
//! - `auth` - Admin access code and demo sign-in
//! - `admin` - Dashboard statistics

pub mod admin;
pub mod auth;
pub mod checkout;
