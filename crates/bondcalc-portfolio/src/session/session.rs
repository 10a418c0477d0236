//! Persistent portfolio session.

use std::sync::Arc;

use bondcalc_core::pricing::BondPricer;
use bondcalc_core::{BondError, BondTerms, BondType, PricedBond};
use bondcalc_traits::storage::{get_json, set_json};
use bondcalc_traits::KeyValueStore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::PortfolioObserver;
use crate::analytics::PortfolioMetrics;
use crate::error::{PortfolioError, PortfolioResult};
use crate::portfolio::Portfolio;

/// Storage key the portfolio is saved under.
pub const DEFAULT_PORTFOLIO_KEY: &str = "bondPortfolio";

/// Owns a portfolio, its backing store and its observers.
///
/// Every mutation is written through to the store. Storage failures are
/// logged and kept in [`last_storage_error`](Self::last_storage_error); the
/// in-memory portfolio stays authoritative.
pub struct PortfolioSession {
    store: Arc<dyn KeyValueStore>,
    key: String,
    pricer: BondPricer,
    portfolio: Portfolio,
    last_priced: Option<PricedBond>,
    last_storage_error: Option<BondError>,
    observers: Vec<Box<dyn PortfolioObserver>>,
}

impl std::fmt::Debug for PortfolioSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioSession")
            .field("key", &self.key)
            .field("pricer", &self.pricer)
            .field("entries", &self.portfolio.len())
            .field("last_priced", &self.last_priced.is_some())
            .field("last_storage_error", &self.last_storage_error)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PortfolioSession {
    /// Opens a session on the default key, loading any saved portfolio.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(store, DEFAULT_PORTFOLIO_KEY)
    }

    /// Opens a session on `key`.
    ///
    /// A missing, unreadable or corrupt saved portfolio starts empty.
    pub fn open_with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut session = Self {
            store,
            key: key.into(),
            pricer: BondPricer::default(),
            portfolio: Portfolio::new(),
            last_priced: None,
            last_storage_error: None,
            observers: Vec::new(),
        };
        session.reload();
        session
    }

    /// Sets the pricer used by [`price`](Self::price).
    #[must_use]
    pub fn with_pricer(mut self, pricer: BondPricer) -> Self {
        self.pricer = pricer;
        self
    }

    /// Re-reads the portfolio from the store, discarding in-memory state.
    pub fn reload(&mut self) {
        self.portfolio = match get_json::<Portfolio, _>(self.store.as_ref(), &self.key) {
            Ok(Some(portfolio)) => {
                info!(key = %self.key, entries = portfolio.len(), "loaded portfolio");
                self.last_storage_error = None;
                portfolio
            }
            Ok(None) => {
                debug!(key = %self.key, "no saved portfolio");
                self.last_storage_error = None;
                Portfolio::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not load portfolio, starting empty");
                self.last_storage_error = Some(BondError::storage(e.to_string()));
                Portfolio::new()
            }
        };
    }

    /// Registers an observer.
    pub fn subscribe(&mut self, observer: impl PortfolioObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Current portfolio.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Metrics for the current portfolio.
    #[must_use]
    pub fn metrics(&self) -> PortfolioMetrics {
        self.portfolio.metrics()
    }

    /// Most recently priced bond, if any.
    #[must_use]
    pub fn last_priced(&self) -> Option<&PricedBond> {
        self.last_priced.as_ref()
    }

    /// Most recent storage failure, cleared by the next successful write.
    #[must_use]
    pub fn last_storage_error(&self) -> Option<&BondError> {
        self.last_storage_error.as_ref()
    }

    /// Storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Prices `terms` and remembers the result as the bond to add next.
    ///
    /// On error the previously priced bond is kept.
    pub fn price(&mut self, terms: &BondTerms, bond_type: BondType) -> PortfolioResult<&PricedBond> {
        let bond = self.pricer.price_bond(terms, bond_type)?;
        Ok(self.record_priced(bond))
    }

    /// Remembers a bond priced elsewhere as the bond to add next.
    pub fn record_priced(&mut self, bond: PricedBond) -> &PricedBond {
        for observer in &self.observers {
            observer.on_priced(&bond);
        }
        self.last_priced.insert(bond)
    }

    /// Pricer used by [`price`](Self::price).
    #[must_use]
    pub fn pricer(&self) -> BondPricer {
        self.pricer
    }

    /// Adds the most recently priced bond and returns its entry id.
    pub fn add_last_priced(&mut self) -> PortfolioResult<Uuid> {
        let bond = self
            .last_priced
            .clone()
            .ok_or_else(|| PortfolioError::incomplete_state("no bond has been priced yet"))?;

        let id = self.portfolio.add(bond);
        debug!(%id, entries = self.portfolio.len(), "added portfolio entry");
        self.commit();
        Ok(id)
    }

    /// Removes an entry. Absent ids leave the portfolio and store untouched.
    pub fn remove(&mut self, id: Uuid) -> bool {
        if !self.portfolio.remove(id) {
            debug!(%id, "remove: no such entry");
            return false;
        }
        debug!(%id, entries = self.portfolio.len(), "removed portfolio entry");
        self.commit();
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.portfolio.clear();
        debug!("cleared portfolio");
        self.commit();
    }

    fn commit(&mut self) {
        self.persist();
        let metrics = self.portfolio.metrics();
        for observer in &self.observers {
            observer.on_portfolio_changed(&self.portfolio, &metrics);
        }
    }

    fn persist(&mut self) {
        match set_json(self.store.as_ref(), &self.key, &self.portfolio) {
            Ok(()) => self.last_storage_error = None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to save portfolio");
                self.last_storage_error = Some(BondError::storage(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondcalc_ext_file::InMemoryStore;
    use bondcalc_traits::TraitError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, TraitError> {
            Err(TraitError::IoError("unreadable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), TraitError> {
            Err(TraitError::IoError("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), TraitError> {
            Ok(())
        }
    }

    fn terms() -> BondTerms {
        BondTerms::new(1000.0, 0.05, 10.0, 0.045)
    }

    #[test]
    fn test_add_requires_priced_bond() {
        let mut session = PortfolioSession::open(Arc::new(InMemoryStore::new()));
        let err = session.add_last_priced().unwrap_err();
        assert!(err.is_incomplete_state());
        assert!(session.portfolio().is_empty());
    }

    #[test]
    fn test_add_persists() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = PortfolioSession::open(store.clone());
        session.price(&terms(), BondType::Custom).unwrap();
        let id = session.add_last_priced().unwrap();

        let reopened = PortfolioSession::open(store);
        assert_eq!(reopened.portfolio().len(), 1);
        assert_eq!(reopened.portfolio().entries()[0].id, id);
    }

    #[test]
    fn test_failed_price_keeps_previous() {
        let mut session = PortfolioSession::open(Arc::new(InMemoryStore::new()));
        session.price(&terms(), BondType::Custom).unwrap();
        assert!(session
            .price(&BondTerms::new(-1.0, 0.05, 10.0, 0.045), BondType::Custom)
            .is_err());
        assert_eq!(session.last_priced().unwrap().face_value, 1000.0);
    }

    #[test]
    fn test_record_priced_elsewhere() {
        let priced = Arc::new(AtomicUsize::new(0));
        let seen = priced.clone();

        struct CountPriced(Arc<AtomicUsize>);
        impl PortfolioObserver for CountPriced {
            fn on_portfolio_changed(&self, _: &Portfolio, _: &PortfolioMetrics) {}
            fn on_priced(&self, _bond: &PricedBond) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut session = PortfolioSession::open(Arc::new(InMemoryStore::new()));
        session.subscribe(CountPriced(seen));

        let bond = session.pricer().price_bond(&terms(), BondType::Custom).unwrap();
        session.record_priced(bond.clone());
        assert_eq!(priced.load(Ordering::SeqCst), 1);
        assert_eq!(session.last_priced(), Some(&bond));

        let id = session.add_last_priced().unwrap();
        assert_eq!(session.portfolio().get(id).unwrap().bond, bond);
    }

    #[test]
    fn test_corrupt_store_starts_empty() {
        let store = Arc::new(InMemoryStore::new());
        store.set(DEFAULT_PORTFOLIO_KEY, "[{\"id\": 12").unwrap();

        let session = PortfolioSession::open(store);
        assert!(session.portfolio().is_empty());
        assert!(matches!(
            session.last_storage_error(),
            Some(BondError::Storage { .. })
        ));
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut session = PortfolioSession::open(Arc::new(BrokenStore));
        assert!(session.last_storage_error().is_some());

        session.price(&terms(), BondType::Custom).unwrap();
        session.add_last_priced().unwrap();

        assert_eq!(session.portfolio().len(), 1);
        assert!(session
            .last_storage_error()
            .unwrap()
            .to_string()
            .contains("quota exceeded"));
    }

    #[test]
    fn test_observers_notified() {
        let changes = Arc::new(AtomicUsize::new(0));
        let seen = changes.clone();

        let mut session = PortfolioSession::open(Arc::new(InMemoryStore::new()));
        session.subscribe(move |_: &Portfolio, metrics: &PortfolioMetrics| {
            seen.store(metrics.bond_count + 100, Ordering::SeqCst);
        });

        session.price(&terms(), BondType::Custom).unwrap();
        let id = session.add_last_priced().unwrap();
        assert_eq!(changes.load(Ordering::SeqCst), 101);

        // absent id: no notification
        changes.store(0, Ordering::SeqCst);
        assert!(!session.remove(Uuid::new_v4()));
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        assert!(session.remove(id));
        assert_eq!(changes.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_clear_persists_empty_array() {
        let store = Arc::new(InMemoryStore::new());
        let mut session = PortfolioSession::open_with_key(store.clone(), "custom");
        session.price(&terms(), BondType::Custom).unwrap();
        session.add_last_priced().unwrap();
        session.add_last_priced().unwrap();
        session.clear();

        assert_eq!(store.get("custom").unwrap().as_deref(), Some("[]"));
        assert_eq!(session.key(), "custom");
    }
}
