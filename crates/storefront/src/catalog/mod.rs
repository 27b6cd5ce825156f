//! Read-only product catalog.
//!
//! The catalog is loaded once at startup, either from the built-in demo list
//! or from a JSON file, and never mutated afterwards. Consumers go through
//! [`ProductRepository`] so that search and the HTTP layer can be exercised
//! against failing repositories in tests.

mod data;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use sts_core::{Product, ProductId};

pub use data::{BRANDS, CATEGORIES, demo_products};

/// Errors that can occur when loading or querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The repository could not serve the request.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a valid product list.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an ID.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// Read access to the product list.
///
/// Every lookup is fallible and asynchronous so that a remote or simulated
/// backend can be swapped in without changing callers.
pub trait ProductRepository: Send + Sync {
    /// All products in catalog order.
    fn all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// The product with `id`, if any.
    fn by_id(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Products tagged with `category`. Unknown categories yield an empty list.
    fn by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Products of `brand`. Unknown brands yield an empty list.
    fn by_brand(&self, brand: &str)
    -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Products flagged as featured.
    fn featured(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Case-insensitive substring match over name, description, category
    /// and brand.
    fn search(&self, query: &str)
    -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;
}

/// The in-memory catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

impl Catalog {
    /// Catalog holding the built-in demo products.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: Arc::new(demo_products()),
        }
    }

    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an ID.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or has
    /// duplicate IDs.
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&content)?;
        info!(count = products.len(), "Loaded catalog from file");
        Self::new(products)
    }

    /// Borrow the full product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product synchronously.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Categories with product counts: the home page categories first, then
    /// any other tags present in the catalog.
    #[must_use]
    pub fn categories(&self) -> Vec<TagSummary> {
        self.summarize(CATEGORIES, |p| &p.category, "category")
    }

    /// Brands with product counts, in the same order rules as
    /// [`Catalog::categories`].
    #[must_use]
    pub fn brands(&self) -> Vec<TagSummary> {
        self.summarize(BRANDS, |p| &p.brand, "brand")
    }

    fn summarize(
        &self,
        known: &[&str],
        tag: impl Fn(&Product) -> &String,
        key_prefix: &str,
    ) -> Vec<TagSummary> {
        let mut ids: Vec<String> = known.iter().map(ToString::to_string).collect();
        for product in self.products.iter() {
            if !ids.contains(tag(product)) {
                ids.push(tag(product).clone());
            }
        }

        ids.into_iter()
            .map(|id| {
                let count = self.products.iter().filter(|p| tag(p) == &id).count();
                TagSummary {
                    name_key: format!("{key_prefix}.{id}"),
                    id,
                    count,
                }
            })
            .collect()
    }

    fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

impl ProductRepository for Catalog {
    async fn all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.to_vec())
    }

    async fn by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.get(id).cloned())
    }

    async fn by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.filtered(|p| p.category == category))
    }

    async fn by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.filtered(|p| p.brand == brand))
    }

    async fn featured(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.filtered(|p| p.featured))
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.to_lowercase();
        Ok(self.filtered(|p| {
            [&p.name, &p.description, &p.category, &p.brand]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        }))
    }
}

/// A category or brand with its product count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSummary {
    pub id: String,
    /// Translation key for the display name, e.g. `category.phones`.
    pub name_key: String,
    pub count: usize,
}

/// Product listing sort order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl ProductSort {
    /// Parse from a query parameter value. Unknown values keep catalog order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "priceAsc" | "price-ascending" => Self::PriceAsc,
            "priceDesc" | "price-descending" => Self::PriceDesc,
            "nameAsc" => Self::NameAsc,
            "nameDesc" => Self::NameDesc,
            _ => Self::Default,
        }
    }

    /// Convert to the query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "name",
            Self::PriceAsc => "priceAsc",
            Self::PriceDesc => "priceDesc",
            Self::NameAsc => "nameAsc",
            Self::NameDesc => "nameDesc",
        }
    }

    /// Sort `products` in place. The sort is stable.
    pub fn apply(self, products: &mut [Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::NameAsc => products.sort_by_cached_key(|p| p.name.to_lowercase()),
            Self::NameDesc => {
                products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()));
            }
        }
    }
}
