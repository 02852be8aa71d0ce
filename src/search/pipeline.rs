use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use crate::data::cache::SearchCache;
use crate::data::gamma_api::{EventQuery, EventSource};
use crate::data::types::{Event, ParsedMarket};
use crate::matching::classifier::{is_crypto_related, matches_event, normalize_terms};
use crate::matching::outcomes::decode_outcomes;

pub const DEFAULT_MAX_RESULTS: usize = 10;

/// How a search ended. Callers of [`MarketSearch::search_events`] only see
/// the market list; the status tells an empty feed apart from a failed one.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Complete,
    Cached,
    UpstreamUnavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub markets: Vec<ParsedMarket>,
    pub status: SearchStatus,
}

/// Finds the markets relevant to one asset's search terms.
///
/// Each call does exactly one fetch from the source; everything after that
/// is local computation. No retry on failure.
pub struct MarketSearch<S: EventSource> {
    source: S,
    query: EventQuery,
    max_results: usize,
    cache: Option<SearchCache>,
}

impl<S: EventSource> MarketSearch<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            query: EventQuery::default(),
            max_results: DEFAULT_MAX_RESULTS,
            cache: None,
        }
    }

    pub fn with_query(mut self, query: EventQuery) -> Self {
        self.query = query;
        self
    }

    /// Lower the result budget. It never goes above [`DEFAULT_MAX_RESULTS`].
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.min(DEFAULT_MAX_RESULTS);
        self
    }

    pub fn with_cache(mut self, cache: SearchCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Ranked markets for `terms`, at most `max_results` of them. Upstream
    /// failures give an empty list.
    pub async fn search_events(&self, terms: &[String]) -> Vec<ParsedMarket> {
        self.search_report(terms).await.markets
    }

    pub async fn search_report(&self, terms: &[String]) -> SearchReport {
        let terms = normalize_terms(terms);

        if let Some(markets) = self.cache.as_ref().and_then(|c| c.get(&terms)) {
            debug!("Cache hit for terms [{}]", terms.join(", "));
            return SearchReport {
                markets,
                status: SearchStatus::Cached,
            };
        }

        let events = match self.source.fetch_events(&self.query).await {
            Ok(events) => events,
            Err(e) => {
                warn!("Event fetch failed, returning no markets: {}", e);
                return SearchReport {
                    markets: Vec::new(),
                    status: SearchStatus::UpstreamUnavailable {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let markets = rank_markets(&events, &terms, self.max_results);

        info!(
            "Search [{}]: {} events scanned, {} markets returned",
            terms.join(", "),
            events.len(),
            markets.len()
        );

        if let Some(cache) = &self.cache {
            cache.insert(&terms, markets.clone());
        }

        SearchReport {
            markets,
            status: SearchStatus::Complete,
        }
    }
}

/// Filter, flatten and rank one batch of events against normalized terms.
///
/// Events must be crypto-related, have markets, and match a term. Markets
/// must be active and open, and each market id is emitted once. Output is
/// ordered by 24h volume then total volume, both descending, and truncated
/// to `max_results`.
pub fn rank_markets(events: &[Event], terms: &[String], max_results: usize) -> Vec<ParsedMarket> {
    let mut results: Vec<ParsedMarket> = Vec::new();
    let mut seen_market_ids: HashSet<&str> = HashSet::new();

    for event in events {
        if !is_crypto_related(event, terms) {
            continue;
        }
        if event.markets.is_empty() {
            continue;
        }
        if !matches_event(event, terms) {
            continue;
        }

        for market in &event.markets {
            if seen_market_ids.contains(market.id.as_str()) {
                debug!("Skipping duplicate market {}", market.id);
                continue;
            }
            if !market.active || market.closed {
                continue;
            }

            seen_market_ids.insert(market.id.as_str());

            let outcomes = decode_outcomes(market);
            results.push(ParsedMarket::from_parts(event, market, outcomes));
        }
    }

    // Volumes are finite after decoding. Stable: full ties keep feed order
    results.sort_by(|a, b| {
        b.volume_24h
            .partial_cmp(&a.volume_24h)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal))
    });
    results.truncate(max_results);
    results
}
