use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// One prediction-market topic, decoded from the Gamma `/events` feed.
/// Optional upstream fields are already defaulted here.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: String,
    pub ticker: Option<String>,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub icon: Option<String>,
    pub active: bool,
    pub closed: bool,
    pub liquidity: f64,
    pub volume: f64,
    pub volume_24h: f64,
    pub markets: Vec<Market>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default)]
pub struct Tag {
    pub id: String,
    pub label: String,
    pub slug: String,
}

/// A tradable contract inside an [`Event`]. Outcome names and prices stay in
/// their encoded form until [`crate::matching::outcomes::decode_outcomes`]
/// runs on them.
#[derive(Debug, Clone, Default)]
pub struct Market {
    pub id: String,
    pub question: String,
    pub condition_id: String,
    pub slug: String,
    pub outcomes: Option<String>,
    pub outcome_prices: Option<String>,
    pub volume: f64,
    pub volume_24h: f64,
    pub liquidity: f64,
    pub active: bool,
    pub closed: bool,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub name: String,
    pub price: f64,
}

/// Flattened (event, market) projection returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMarket {
    pub id: String,
    pub event_id: String,
    pub event_title: String,
    pub event_slug: String,
    pub question: String,
    pub slug: String,
    pub outcomes: Vec<Outcome>,
    pub volume: f64,
    #[serde(rename = "volume24hr")]
    pub volume_24h: f64,
    pub liquidity: f64,
    pub active: bool,
    pub closed: bool,
    pub image: Option<String>,
    pub event_image: Option<String>,
}

impl ParsedMarket {
    pub fn from_parts(event: &Event, market: &Market, outcomes: Vec<Outcome>) -> Self {
        Self {
            id: market.id.clone(),
            event_id: event.id.clone(),
            event_title: event.title.clone(),
            event_slug: event.slug.clone(),
            question: market.question.clone(),
            slug: market.slug.clone(),
            outcomes,
            volume: market.volume,
            volume_24h: market.volume_24h,
            liquidity: market.liquidity,
            active: market.active,
            closed: market.closed,
            image: market.image.clone().or_else(|| event.image.clone()),
            event_image: event.image.clone(),
        }
    }

    /// Most probable outcome, if any decoded.
    pub fn top_outcome(&self) -> Option<&Outcome> {
        self.outcomes.first()
    }
}

/// What the caller knows about the asset being viewed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub chains: Option<Vec<String>>,
}
