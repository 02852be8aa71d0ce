use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use crate::data::types::{Event, Market, Tag};

pub const DEFAULT_GAMMA_URL: &str = "https://gamma-api.polymarket.com";

#[derive(Debug, thiserror::Error)]
pub enum GammaError {
    #[error("Request to Gamma API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gamma API returned status {0}")]
    Status(StatusCode),

    #[error("Failed to decode Gamma API response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Query sent to `/events`. Defaults mirror the feed the search expects:
/// open events only, busiest (24h volume) first.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub limit: u32,
    pub offset: u32,
    pub closed: bool,
    pub order: String,
    pub ascending: bool,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            limit: 200,
            offset: 0,
            closed: false,
            order: "volume24hr".to_string(),
            ascending: false,
        }
    }
}

impl EventQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("closed", self.closed.to_string()),
            ("order", self.order.clone()),
            ("ascending", self.ascending.to_string()),
        ]
    }
}

/// Anything that can hand the search one batch of events.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>, GammaError>;
}

pub struct GammaApiClient {
    client: Client,
    base_url: String,
}

impl GammaApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, GammaError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("polybets/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EventSource for GammaApiClient {
    /// Fetch one page of events from the Gamma API
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<Event>, GammaError> {
        let url = format!("{}/events", self.base_url);

        let response = self.client
            .get(&url)
            .query(&query.to_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GammaError::Status(status));
        }

        let payload: Value = response.json().await.map_err(GammaError::Decode)?;
        let events = events_from_payload(payload);

        debug!("Fetched {} events from {}", events.len(), url);
        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    ticker: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    closed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64")]
    liquidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    volume: Option<f64>,
    #[serde(default, rename = "volume24hr", deserialize_with = "lenient_f64")]
    volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_array")]
    markets: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_array")]
    tags: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GammaTag {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaMarket {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    question: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    condition_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    slug: Option<String>,
    // Usually a JSON-encoded string like "[\"Yes\", \"No\"]"
    #[serde(default, deserialize_with = "encoded_array")]
    outcomes: Option<String>,
    #[serde(default, deserialize_with = "encoded_array")]
    outcome_prices: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    volume: Option<f64>,
    #[serde(default, rename = "volume24hr", deserialize_with = "lenient_f64")]
    volume_24h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    liquidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    closed: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    image: Option<String>,
}

/// Decode a raw `/events` payload. Anything that is not an array is an
/// empty batch; individual events or markets that cannot be decoded are
/// dropped without affecting their siblings.
pub fn events_from_payload(payload: Value) -> Vec<Event> {
    let raw_events = match payload {
        Value::Array(items) => items,
        other => {
            warn!("Gamma events payload is not an array (got {}), treating as empty", json_kind(&other));
            return Vec::new();
        }
    };

    raw_events
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<GammaEvent>(raw) {
            Ok(ge) => convert_gamma_event(ge),
            Err(e) => {
                warn!("Skipping undecodable event: {}", e);
                None
            }
        })
        .collect()
}

fn convert_gamma_event(ge: GammaEvent) -> Option<Event> {
    let id = match ge.id {
        Some(id) if !id.is_empty() => id,
        _ => {
            debug!("Skipping event without id: {:?}", ge.title);
            return None;
        }
    };

    let markets = ge.markets
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<GammaMarket>(raw) {
            Ok(gm) => convert_gamma_market(gm),
            Err(e) => {
                debug!("Skipping undecodable market in event {}: {}", id, e);
                None
            }
        })
        .collect();

    let tags = ge.tags
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<GammaTag>(raw) {
            Ok(t) => Some(Tag {
                id: t.id.unwrap_or_default(),
                label: t.label.unwrap_or_default(),
                slug: t.slug.unwrap_or_default(),
            }),
            Err(e) => {
                debug!("Skipping undecodable tag in event {}: {}", id, e);
                None
            }
        })
        .collect();

    Some(Event {
        id,
        ticker: ge.ticker,
        slug: ge.slug.unwrap_or_default(),
        title: ge.title.unwrap_or_default(),
        description: ge.description.unwrap_or_default(),
        start_date: ge.start_date.as_deref().and_then(parse_timestamp),
        end_date: ge.end_date.as_deref().and_then(parse_timestamp),
        image: ge.image,
        icon: ge.icon,
        active: ge.active.unwrap_or(false),
        closed: ge.closed.unwrap_or(false),
        liquidity: ge.liquidity.unwrap_or(0.0),
        volume: ge.volume.unwrap_or(0.0),
        volume_24h: ge.volume_24h.unwrap_or(0.0),
        markets,
        tags,
    })
}

fn convert_gamma_market(gm: GammaMarket) -> Option<Market> {
    let id = gm.id.filter(|id| !id.is_empty())?;

    Some(Market {
        id,
        question: gm.question.unwrap_or_default(),
        condition_id: gm.condition_id.unwrap_or_default(),
        slug: gm.slug.unwrap_or_default(),
        outcomes: gm.outcomes,
        outcome_prices: gm.outcome_prices,
        volume: gm.volume.unwrap_or(0.0),
        volume_24h: gm.volume_24h.unwrap_or(0.0),
        liquidity: gm.liquidity.unwrap_or(0.0),
        active: gm.active.unwrap_or(false),
        closed: gm.closed.unwrap_or(false),
        image: gm.image.filter(|s| !s.is_empty()),
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strings, or scalars that upstream sometimes sends in place of strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers arrive either as JSON numbers or as numeric strings.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite()))
}

/// Flags arrive as booleans, "true"/"false", or 0/1. Anything else is absent.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Arrays whose entries are decoded one at a time. A non-array is absent.
fn lenient_array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    })
}

/// Keep outcome arrays in encoded text form. A literal array is re-encoded
/// so decoding happens in one place.
fn encoded_array<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
