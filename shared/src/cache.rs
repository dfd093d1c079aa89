//! Durable cache of the last known tour list.
//!
//! The list page renders whatever is cached before its fetch completes. Entries
//! carry a version stamp and the time they were saved; a version mismatch, an
//! undecodable entry or (when a TTL is configured) an expired entry reads as a
//! miss.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::{Envelope, EnvelopeShape};
use crate::error::{CacheError, GatewayError};
use crate::tours::TourSummary;

pub const TOUR_CACHE_KEY: &str = "asm_tours_cache";
pub const TOUR_CACHE_VERSION: u32 = 1;

/// String key-value storage, e.g. browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory store; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedTours {
    version: u32,
    saved_at_ms: i64,
    tours: Vec<TourSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTours {
    Versioned(CachedTours),
    /// Bare array written by earlier dashboard builds
    Legacy(Vec<TourSummary>),
}

/// What a `getTour` response did to the tour list
#[derive(Debug)]
pub enum TourFetchOutcome {
    /// The response held a list; it replaces the shown tours and the cache
    Replaced {
        tours: Vec<TourSummary>,
        /// Entries that were not objects and could not be read as tours
        skipped: usize,
        /// Set when the fresh list could not be written back
        cache_error: Option<CacheError>,
    },
    /// The payload was not a list; the current tours and cache stay
    NotAList(EnvelopeShape),
    /// The call failed; the current tours and cache stay
    Failed(GatewayError),
}

#[derive(Debug, Clone)]
pub struct TourCache<S> {
    store: S,
    key: String,
    ttl: Option<Duration>,
}

impl<S: KeyValueStore> TourCache<S> {
    /// Cache under the default key, never expiring
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: TOUR_CACHE_KEY.to_string(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn load(&self, now: DateTime<Utc>) -> Result<Option<Vec<TourSummary>>, CacheError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        let tours = match serde_json::from_str::<StoredTours>(&raw) {
            Ok(StoredTours::Versioned(cached)) => {
                if cached.version != TOUR_CACHE_VERSION || self.is_expired(cached.saved_at_ms, now) {
                    None
                } else {
                    Some(cached.tours)
                }
            }
            // Legacy entries have no timestamp, so they only count without a TTL
            Ok(StoredTours::Legacy(tours)) if self.ttl.is_none() => Some(tours),
            Ok(StoredTours::Legacy(_)) | Err(_) => None,
        };
        Ok(tours)
    }

    pub fn store(&self, tours: &[TourSummary], now: DateTime<Utc>) -> Result<(), CacheError> {
        let entry = CachedTours {
            version: TOUR_CACHE_VERSION,
            saved_at_ms: now.timestamp_millis(),
            tours: tours.to_vec(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.store.set(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(&self.key)
    }

    /// Fold a `getTour` result into the cache.
    ///
    /// Only a list payload touches the cache. Failures and other shapes leave
    /// whatever was cached for the caller to keep showing.
    pub fn apply_fetch(&self, result: Result<Envelope, GatewayError>, now: DateTime<Utc>) -> TourFetchOutcome {
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(e) => return TourFetchOutcome::Failed(e),
        };
        match envelope.decode_list::<TourSummary>() {
            Some((tours, skipped)) => {
                let cache_error = self.store(&tours, now).err();
                TourFetchOutcome::Replaced {
                    tours,
                    skipped,
                    cache_error,
                }
            }
            None => TourFetchOutcome::NotAList(envelope.shape()),
        }
    }

    fn is_expired(&self, saved_at_ms: i64, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => now.timestamp_millis() - saved_at_ms > ttl.num_milliseconds(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 19, 10, 0, 0).unwrap()
    }

    fn sample_tours() -> Vec<TourSummary> {
        vec![
            TourSummary {
                id: "T-1".to_string(),
                tour_name: Some("Durg".to_string()),
                status: json!(true),
                ..TourSummary::default()
            },
            TourSummary {
                id: "T-2".to_string(),
                status: json!(false),
                ..TourSummary::default()
            },
        ]
    }

    #[test]
    fn test_empty_store_is_a_miss() {
        let cache = TourCache::new(MemoryStore::new());
        assert_eq!(cache.load(now()).unwrap(), None);
    }

    #[test]
    fn test_store_then_load() {
        let store = MemoryStore::new();
        let cache = TourCache::new(store.clone());
        cache.store(&sample_tours(), now()).unwrap();

        assert_eq!(cache.load(now()).unwrap(), Some(sample_tours()));

        let raw = store.get(TOUR_CACHE_KEY).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["version"], TOUR_CACHE_VERSION);
    }

    #[test]
    fn test_overwrite_replaces_previous_entry() {
        let cache = TourCache::new(MemoryStore::new());
        cache.store(&sample_tours(), now()).unwrap();
        cache.store(&sample_tours()[..1], now()).unwrap();
        assert_eq!(cache.load(now()).unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_array_is_accepted_without_ttl() {
        let store = MemoryStore::new();
        store
            .set(TOUR_CACHE_KEY, r#"[{"id":"T-9","tourName":"Old","status":true}]"#)
            .unwrap();

        let cache = TourCache::new(store.clone());
        let tours = cache.load(now()).unwrap().unwrap();
        assert_eq!(tours[0].id, "T-9");

        let with_ttl = TourCache::new(store).with_ttl(Duration::hours(1));
        assert_eq!(with_ttl.load(now()).unwrap(), None);
    }

    #[test]
    fn test_legacy_array_with_numeric_fields_still_loads() {
        let store = MemoryStore::new();
        store
            .set(TOUR_CACHE_KEY, r#"[{"id":"T-9"},{"id":"T-10","phone":9000000000}]"#)
            .unwrap();

        let tours = TourCache::new(store).load(now()).unwrap().unwrap();
        assert_eq!(tours.len(), 2);
        assert_eq!(tours[1].mobile_label(), "9000000000");
    }

    #[test]
    fn test_version_mismatch_and_garbage_are_misses() {
        let store = MemoryStore::new();
        let cache = TourCache::new(store.clone());

        store
            .set(TOUR_CACHE_KEY, r#"{"version":99,"saved_at_ms":0,"tours":[]}"#)
            .unwrap();
        assert_eq!(cache.load(now()).unwrap(), None);

        store.set(TOUR_CACHE_KEY, "not json").unwrap();
        assert_eq!(cache.load(now()).unwrap(), None);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = TourCache::new(MemoryStore::new()).with_ttl(Duration::minutes(30));
        cache.store(&sample_tours(), now()).unwrap();

        assert!(cache.load(now() + Duration::minutes(29)).unwrap().is_some());
        assert!(cache.load(now() + Duration::minutes(31)).unwrap().is_none());
    }

    #[test]
    fn test_clear_and_custom_key() {
        let store = MemoryStore::new();
        let cache = TourCache::new(store.clone()).with_key("other_key");
        cache.store(&sample_tours(), now()).unwrap();
        assert!(store.get(TOUR_CACHE_KEY).unwrap().is_none());

        cache.clear().unwrap();
        assert_eq!(cache.load(now()).unwrap(), None);
    }

    fn seeded_cache() -> (MemoryStore, TourCache<MemoryStore>) {
        let store = MemoryStore::new();
        let cache = TourCache::new(store.clone());
        cache.store(&sample_tours(), now()).unwrap();
        (store, cache)
    }

    #[test]
    fn test_fetched_list_overwrites_cache() {
        let (_, cache) = seeded_cache();
        let body = json!({ "data": { "success": true, "data": [{ "id": "T-5", "status": true }] } });

        match cache.apply_fetch(Ok(Envelope(body)), now()) {
            TourFetchOutcome::Replaced { tours, skipped, cache_error } => {
                assert_eq!(tours.len(), 1);
                assert_eq!(skipped, 0);
                assert!(cache_error.is_none());
            }
            other => panic!("expected a replaced list, got {:?}", other),
        }
        let cached = cache.load(now()).unwrap().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "T-5");
    }

    #[test]
    fn test_failed_fetch_keeps_cache() {
        let (_, cache) = seeded_cache();
        let error = GatewayError::Network {
            function: "getTour".to_string(),
            message: "offline".to_string(),
        };

        assert!(matches!(cache.apply_fetch(Err(error), now()), TourFetchOutcome::Failed(_)));
        assert_eq!(cache.load(now()).unwrap(), Some(sample_tours()));
    }

    #[test]
    fn test_non_list_payload_keeps_cache() {
        let (_, cache) = seeded_cache();
        let body = json!({ "data": { "success": true, "data": { "unexpected": "object" } } });

        match cache.apply_fetch(Ok(Envelope(body)), now()) {
            TourFetchOutcome::NotAList(shape) => assert_eq!(shape, EnvelopeShape::Nested),
            other => panic!("expected the cache to be kept, got {:?}", other),
        }
        assert_eq!(cache.load(now()).unwrap(), Some(sample_tours()));
    }
}
