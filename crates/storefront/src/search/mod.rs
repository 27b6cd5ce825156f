//! Typo-tolerant product search.
//!
//! Ranking runs in two passes:
//! 1. Candidate narrowing through [`ProductRepository::search`] (substring
//!    match). When nothing contains the query verbatim, every product is a
//!    candidate so that misspelled queries still find their target.
//! 2. Fuzzy re-ranking with a bounded approximate-substring edit distance
//!    over name, description, category and brand. The best field wins.
//!
//! A hit is kept when `errors / query length` is within the configured
//! threshold. Hits are stable-sorted by ascending distance, so ties keep
//! catalog order.
//!
//! [`SearchSession`] adds the keystroke debounce on top.

mod fuzzy;
mod session;

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use sts_core::Product;

use crate::catalog::{CatalogError, ProductRepository};

pub use fuzzy::{fold, substring_distance};
pub use session::{Published, SearchSession};

/// Queries shorter than this (after trimming) return no results.
pub const MIN_QUERY_LEN: usize = 2;

/// Default maximum ratio of errors to query length.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Default quiet period before a typed query is ranked.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Tuning for the ranker and the debounced session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Maximum `errors / query length` for a product to match.
    pub threshold: f64,
    pub debounce: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// A ranked product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub product: Product,
    /// Edit distance of the best-matching field.
    pub distance: usize,
    /// `distance / query length`; 0 is an exact match.
    pub score: f64,
}

/// Result of a search that may have failed.
///
/// Repository failures do not propagate; they become an empty hit list with
/// `error` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub hits: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Ranks products against free-text queries.
#[derive(Debug, Clone)]
pub struct SearchRanker<R> {
    repo: R,
    config: SearchConfig,
}

impl<R: ProductRepository> SearchRanker<R> {
    pub const fn new(repo: R, config: SearchConfig) -> Self {
        Self { repo, config }
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repo
    }

    /// Rank products for `query`.
    ///
    /// # Errors
    ///
    /// Returns the repository error if candidates cannot be fetched.
    #[instrument(skip(self))]
    pub async fn rank(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let trimmed = query.trim();
        // Measured before folding: lowercasing may expand one character.
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let needle = fold(trimmed);

        let mut candidates = self.repo.search(trimmed).await?;
        if candidates.is_empty() {
            debug!("No substring candidates, ranking full catalog");
            candidates = self.repo.all().await?;
        }

        let max_errors = self.max_errors(needle.len());
        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter_map(|product| {
                let distance = best_field_distance(&needle, &product, max_errors)?;
                #[allow(clippy::cast_precision_loss)]
                let score = distance as f64 / needle.len() as f64;
                Some(SearchHit {
                    product,
                    distance,
                    score,
                })
            })
            .collect();
        hits.sort_by_key(|hit| hit.distance);

        debug!(hits = hits.len(), max_errors, "Ranked search candidates");
        Ok(hits)
    }

    /// Rank products for `query`, folding failures into the outcome.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        match self.rank(query).await {
            Ok(hits) => SearchOutcome {
                query: query.to_string(),
                hits,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, query, "Search failed");
                SearchOutcome {
                    query: query.to_string(),
                    hits: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn max_errors(&self, query_len: usize) -> usize {
        (self.config.threshold.clamp(0.0, 1.0) * query_len as f64).floor() as usize
    }
}

fn best_field_distance(needle: &[char], product: &Product, max_errors: usize) -> Option<usize> {
    [
        &product.name,
        &product.description,
        &product.category,
        &product.brand,
    ]
    .into_iter()
    .filter_map(|field| substring_distance(needle, &fold(field), max_errors))
    .min()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ranker() -> SearchRanker<Catalog> {
        SearchRanker::new(Catalog::demo(), SearchConfig::default())
    }

    #[tokio::test]
    async fn test_short_query_returns_nothing() {
        let ranker = ranker();
        assert!(ranker.rank("").await.unwrap().is_empty());
        assert!(ranker.rank(" i ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_char_that_lowercases_to_two_returns_nothing() {
        let mut case = crate::catalog::demo_products().remove(4);
        case.name = "İzmir Leather Case".to_string();
        let catalog = Catalog::new(vec![case]).unwrap();
        let ranker = SearchRanker::new(catalog, SearchConfig::default());

        assert_eq!(fold("İ").len(), 2);
        assert!(ranker.rank("İ").await.unwrap().is_empty());
        assert!(ranker.rank("é").await.unwrap().is_empty());
        assert_eq!(ranker.rank("İzmir").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_typo_finds_iphone() {
        let hits = ranker().rank("iphoen").await.unwrap();
        assert_eq!(hits[0].product.name, "iPhone 15 Pro Max");
        assert_eq!(hits[0].distance, 1);
        assert!(hits.iter().all(|h| h.score <= DEFAULT_THRESHOLD));
    }

    #[tokio::test]
    async fn test_nonsense_finds_nothing() {
        assert!(ranker().rank("xyzzy").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_substring_matches_rank_exact() {
        let hits = ranker().rank("Charger").await.unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.product.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Podoro Fast Wireless Charger", "Samsung 25W Super Fast Charger"]
        );
        assert!(hits.iter().all(|h| h.distance == 0));
    }

    #[tokio::test]
    async fn test_misspelled_brand() {
        let hits = ranker().rank("samsng").await.unwrap();
        let top: Vec<&str> = hits
            .iter()
            .take_while(|h| h.distance == 1)
            .map(|h| h.product.id.as_str())
            .collect();
        assert_eq!(top, vec!["2", "9"]);
    }

    #[tokio::test]
    async fn test_zero_threshold_is_exact_only() {
        let config = SearchConfig {
            threshold: 0.0,
            ..SearchConfig::default()
        };
        let ranker = SearchRanker::new(Catalog::demo(), config);
        assert!(ranker.rank("iphoen").await.unwrap().is_empty());
        assert_eq!(ranker.rank("iphone").await.unwrap().len(), 1);
    }

    #[test]
    fn test_threshold_allows_one_error_per_few_chars() {
        let ranker = ranker();
        assert_eq!(ranker.max_errors(2), 0);
        assert_eq!(ranker.max_errors(5), 2);
        assert_eq!(ranker.max_errors(6), 2);
        assert_eq!(ranker.max_errors(10), 4);
    }
}
