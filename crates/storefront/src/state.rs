//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::info;

use crate::cart::{self, CartStore};
use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::i18n::LanguagePreference;
use crate::search::SearchRanker;
use crate::services::auth::{AdminGate, AdminSession};
use crate::store::{FileStore, KeyValueStore, StoreError};

/// Error opening the application state.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open data directory: {0}")]
    Store(#[from] StoreError),
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The server holds a single
/// demo cart and language preference; handlers serialize access to them
/// through async mutexes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    store: Arc<dyn KeyValueStore>,
    ranker: Arc<SearchRanker<Catalog>>,
    admin_gate: AdminGate,
    cart: Arc<Mutex<CartStore>>,
    language: Mutex<LanguagePreference>,
    admin_session: Mutex<Option<AdminSession>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The cart and language preference are hydrated from `store`, and the
    /// cart writes itself back to it on every change.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, store: Arc<dyn KeyValueStore>) -> Self {
        let cart = cart::open_persistent(Arc::clone(&store));
        let language = LanguagePreference::load(Arc::clone(&store));
        let ranker = Arc::new(SearchRanker::new(catalog.clone(), config.search));
        let admin_gate = config.admin.gate();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
                ranker,
                admin_gate,
                cart: Arc::new(Mutex::new(cart)),
                language: Mutex::new(language),
                admin_session: Mutex::new(None),
            }),
        }
    }

    /// Open the file store and catalog named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// catalog file cannot be loaded.
    pub fn open(config: StorefrontConfig) -> Result<Self, StartupError> {
        let store = FileStore::open(&config.data_dir)?;
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::demo(),
        };
        info!(
            data_dir = %config.data_dir.display(),
            products = catalog.len(),
            "Opened storefront state"
        );
        Ok(Self::new(config, catalog, Arc::new(store)))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the key-value store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get the search ranker.
    #[must_use]
    pub fn ranker(&self) -> &Arc<SearchRanker<Catalog>> {
        &self.inner.ranker
    }

    /// Get the admin sign-in gate.
    #[must_use]
    pub fn admin_gate(&self) -> &AdminGate {
        &self.inner.admin_gate
    }

    /// The demo cart.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Run `f` against the locked cart on the blocking thread pool.
    ///
    /// Cart changes write through to the store, so the lock is held until
    /// `f` returns and writes land in dispatch order.
    ///
    /// # Errors
    ///
    /// Returns the join error if `f` panicked.
    pub async fn with_cart<F, R>(&self, f: F) -> Result<R, JoinError>
    where
        F: FnOnce(&mut CartStore, &dyn KeyValueStore) -> R + Send + 'static,
        R: Send + 'static,
    {
        let mut cart = Arc::clone(&self.inner.cart).lock_owned().await;
        let store = Arc::clone(&self.inner.store);
        tokio::task::spawn_blocking(move || f(&mut *cart, store.as_ref())).await
    }

    /// The display language preference.
    #[must_use]
    pub fn language(&self) -> &Mutex<LanguagePreference> {
        &self.inner.language
    }

    /// The signed-in admin, if any.
    #[must_use]
    pub fn admin_session(&self) -> &Mutex<Option<AdminSession>> {
        &self.inner.admin_session
    }
}
