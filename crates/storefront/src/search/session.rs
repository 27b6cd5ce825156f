//! Debounced search-as-you-type.
//!
//! Every input gets a request ID from a monotonically increasing counter. A
//! pending ranking is aborted when new input arrives, and a ranking that
//! completes after a newer input is dropped instead of published.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{SearchOutcome, SearchRanker};
use crate::catalog::ProductRepository;

/// The latest published search result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Published {
    /// ID of the input that produced this result; 0 before the first one.
    pub request_id: u64,
    pub outcome: SearchOutcome,
}

/// A search box: feed it keystrokes, watch it for results.
pub struct SearchSession<R> {
    ranker: Arc<SearchRanker<R>>,
    latest: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    results: Arc<watch::Sender<Published>>,
}

impl<R> std::fmt::Debug for SearchSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl<R: ProductRepository + 'static> SearchSession<R> {
    #[must_use]
    pub fn new(ranker: Arc<SearchRanker<R>>) -> Self {
        let (results, _) = watch::channel(Published::default());
        Self {
            ranker,
            latest: Arc::new(AtomicU64::new(0)),
            pending: None,
            results: Arc::new(results),
        }
    }

    /// Receiver that observes every published result.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Published> {
        self.results.subscribe()
    }

    /// ID of the most recent input.
    #[must_use]
    pub fn latest_request(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Record new input and schedule its ranking after the debounce period.
    ///
    /// Returns the request ID assigned to this input.
    pub fn input(&mut self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let request_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(pending) = self.pending.take() {
            pending.abort();
        }

        let ranker = Arc::clone(&self.ranker);
        let latest = Arc::clone(&self.latest);
        let results = Arc::clone(&self.results);
        let debounce = ranker.config().debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != request_id {
                return;
            }

            let outcome = ranker.search(&query).await;
            if latest.load(Ordering::SeqCst) != request_id {
                debug!(request_id, "Dropping stale search result");
                return;
            }

            debug!(request_id, hits = outcome.hits.len(), "Publishing search result");
            results.send_replace(Published {
                request_id,
                outcome,
            });
        }));

        request_id
    }
}

impl<R> Drop for SearchSession<R> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use sts_core::{Product, ProductId};

    use super::*;
    use crate::catalog::{Catalog, CatalogError};
    use crate::search::SearchConfig;

    /// Catalog wrapper that counts searches, optionally slowly or failing.
    #[derive(Clone)]
    struct TestRepo {
        inner: Catalog,
        searches: Arc<AtomicUsize>,
        delay: Duration,
        fail: bool,
    }

    impl TestRepo {
        fn new() -> Self {
            Self {
                inner: Catalog::demo(),
                searches: Arc::new(AtomicUsize::new(0)),
                delay: Duration::ZERO,
                fail: false,
            }
        }
    }

    impl ProductRepository for TestRepo {
        async fn all(&self) -> Result<Vec<Product>, CatalogError> {
            self.inner.all().await
        }

        async fn by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
            self.inner.by_id(id).await
        }

        async fn by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
            self.inner.by_category(category).await
        }

        async fn by_brand(&self, brand: &str) -> Result<Vec<Product>, CatalogError> {
            self.inner.by_brand(brand).await
        }

        async fn featured(&self) -> Result<Vec<Product>, CatalogError> {
            self.inner.featured().await
        }

        async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(CatalogError::Unavailable("backend down".to_string()));
            }
            self.inner.search(query).await
        }
    }

    fn session(repo: TestRepo) -> SearchSession<TestRepo> {
        SearchSession::new(Arc::new(SearchRanker::new(repo, SearchConfig::default())))
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_ranks_once() {
        let repo = TestRepo::new();
        let searches = Arc::clone(&repo.searches);
        let mut session = session(repo);
        let rx = session.subscribe();

        session.input("ip");
        session.input("iph");
        let last = session.input("iphoen");
        tokio::time::sleep(Duration::from_millis(400)).await;

        let published = rx.borrow().clone();
        assert_eq!(published.request_id, last);
        assert_eq!(published.outcome.query, "iphoen");
        assert_eq!(published.outcome.hits[0].product.name, "iPhone 15 Pro Max");
        assert_eq!(searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_published_within_debounce() {
        let mut session = session(TestRepo::new());
        let rx = session.subscribe();

        session.input("samsung");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(rx.borrow().request_id, 0);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(rx.borrow().request_id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_dropped() {
        let repo = TestRepo {
            delay: Duration::from_millis(500),
            ..TestRepo::new()
        };
        let searches = Arc::clone(&repo.searches);
        let mut session = session(repo);
        let rx = session.subscribe();

        session.input("iphone");
        // Past the debounce: the first ranking is in flight.
        tokio::time::sleep(Duration::from_millis(350)).await;
        session.input("samsung");
        tokio::time::sleep(Duration::from_secs(2)).await;

        let published = rx.borrow().clone();
        assert_eq!(published.request_id, 2);
        assert_eq!(published.outcome.query, "samsung");
        assert_eq!(searches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repository_failure_sets_error() {
        let repo = TestRepo {
            fail: true,
            ..TestRepo::new()
        };
        let mut session = session(repo);
        let rx = session.subscribe();

        session.input("iphone");
        tokio::time::sleep(Duration::from_millis(400)).await;

        let published = rx.borrow().clone();
        assert!(published.outcome.is_error());
        assert!(published.outcome.hits.is_empty());
    }
}
