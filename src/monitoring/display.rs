use crate::data::types::ParsedMarket;

pub const POLYMARKET_EVENT_URL: &str = "https://polymarket.com/event";

/// Chips shown for markets with more than two outcomes.
const MAX_OUTCOME_CHIPS: usize = 4;

/// Whole-number percentage for a price in [0, 1].
pub fn display_percentage(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub fn event_url(event_slug: &str) -> String {
    format!("{}/{}", POLYMARKET_EVENT_URL, event_slug)
}

/// Human-readable dollar amount, e.g. `$1.2m`.
pub fn format_volume(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.1}b", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.1}m", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.1}k", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

/// Render one market as a short text card.
pub fn render_market(market: &ParsedMarket) -> String {
    let title = if market.question.is_empty() {
        &market.event_title
    } else {
        &market.question
    };

    let mut line = String::new();
    if let Some(top) = market.top_outcome() {
        let name = if top.name.is_empty() { "Yes" } else { top.name.as_str() };
        line.push_str(&format!("{}% {}", display_percentage(top.price), name));
    }

    if market.outcomes.len() == 2 {
        let second = &market.outcomes[1];
        line.push_str(&format!("  {}% {}", display_percentage(second.price), second.name));
    }

    if market.volume_24h > 0.0 {
        line.push_str(&format!("  24h: {}", format_volume(market.volume_24h)));
    }
    line.push_str(&format!("  Vol: {}", format_volume(market.volume)));

    let mut card = format!("{}\n  {}", title, line.trim_start());

    if market.outcomes.len() > 2 {
        let chips: Vec<String> = market.outcomes
            .iter()
            .take(MAX_OUTCOME_CHIPS)
            .map(|o| format!("[{}% {}]", display_percentage(o.price), o.name))
            .collect();
        card.push_str(&format!("\n  {}", chips.join(" ")));

        if market.outcomes.len() > MAX_OUTCOME_CHIPS {
            card.push_str(&format!(" +{} more", market.outcomes.len() - MAX_OUTCOME_CHIPS));
        }
    }

    card.push_str(&format!("\n  {}", event_url(&market.event_slug)));
    card
}
