use dashmap::DashMap;
use std::time::{Duration, Instant};
use crate::data::types::ParsedMarket;

/// Search results per term list, kept for a fixed TTL.
pub struct SearchCache {
    cache: DashMap<String, CachedResult>,
    ttl: Duration,
}

struct CachedResult {
    markets: Vec<ParsedMarket>,
    timestamp: Instant,
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Cache key for a term list; order matters, as it does for the search.
    pub fn key(terms: &[String]) -> String {
        terms.join(",")
    }

    pub fn insert(&self, terms: &[String], markets: Vec<ParsedMarket>) {
        self.cache.insert(Self::key(terms), CachedResult {
            markets,
            timestamp: Instant::now(),
        });
    }

    /// Get results if not expired (evict on read)
    pub fn get(&self, terms: &[String]) -> Option<Vec<ParsedMarket>> {
        let key = Self::key(terms);
        let expired = match self.cache.get(&key) {
            Some(entry) if entry.timestamp.elapsed() <= self.ttl => {
                return Some(entry.markets.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.cache.remove(&key);
        }
        None
    }

    pub fn clear(&self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{Event, Market};
    use std::thread;

    fn sample(id: &str) -> ParsedMarket {
        let market = Market {
            id: id.to_string(),
            ..Default::default()
        };
        ParsedMarket::from_parts(&Event::default(), &market, Vec::new())
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_cache_insert_and_get() {
        let cache = SearchCache::default();
        cache.insert(&terms(&["bitcoin", "btc"]), vec![sample("m1")]);

        let hit = cache.get(&terms(&["bitcoin", "btc"])).unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].id, "m1");
        assert!(cache.get(&terms(&["btc", "bitcoin"])).is_none());
    }

    #[test]
    fn test_cache_ttl_expiration() {
        let cache = SearchCache::new(Duration::from_millis(100));
        cache.insert(&terms(&["eth"]), vec![sample("m2")]);

        assert!(cache.get(&terms(&["eth"])).is_some());

        thread::sleep(Duration::from_millis(200));

        assert!(cache.get(&terms(&["eth"])).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = SearchCache::default();
        cache.insert(&terms(&["sol"]), Vec::new());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
