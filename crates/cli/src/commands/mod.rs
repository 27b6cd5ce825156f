//! CLI command implementations.
//!
//! Each command opens the storefront state, performs one operation and
//! prints the result. Rendering lives in pure `render_*` functions so it can
//! be tested without capturing stdout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod language;
pub mod search;

use sts_storefront::cart::CartInputError;
use sts_storefront::catalog::CatalogError;
use sts_storefront::config::{ConfigError, StorefrontConfig};
use sts_storefront::i18n::Translator;
use sts_storefront::services::checkout::CheckoutError;
use sts_storefront::state::{AppState, StartupError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Startup(#[from] StartupError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    CartInput(#[from] CartInputError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Reading interactive input failed.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Storefront state shared by all commands.
pub struct Context {
    state: AppState,
}

impl Context {
    /// Load configuration and open the file store and catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the store or
    /// catalog cannot be opened.
    pub fn open() -> Result<Self, CommandError> {
        let config = StorefrontConfig::from_env()?;
        Ok(Self::new(AppState::open(config)?))
    }

    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Translator for the persisted language preference.
    pub async fn translator(&self) -> Translator {
        self.state.language().lock().await.translator()
    }
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}
