use crate::data::types::Event;
use crate::matching::keywords::matches_any_keyword;
use crate::matching::text::word_boundary_match;

/// Lower-case and trim caller terms, dropping anything one character or
/// shorter.
pub fn normalize_terms<S: AsRef<str>>(terms: &[S]) -> Vec<String> {
    terms
        .iter()
        .map(|term| term.as_ref().to_lowercase().trim().to_string())
        .filter(|term| term.chars().count() > 1)
        .collect()
}

/// Everything searchable about an event, lower-cased and space-joined.
fn event_text(event: &Event) -> String {
    let mut parts: Vec<&str> = vec![
        event.title.as_str(),
        event.description.as_str(),
        event.ticker.as_deref().unwrap_or(""),
        event.slug.as_str(),
    ];
    parts.extend(event.tags.iter().map(|tag| tag.label.as_str()));

    parts.join(" ").to_lowercase()
}

/// Whether the event is about crypto at all.
///
/// Any static keyword on a word boundary is enough. Otherwise one of the
/// caller's own terms has to appear as a whole word.
pub fn is_crypto_related(event: &Event, terms: &[String]) -> bool {
    let text = event_text(event);

    if matches_any_keyword(&text) {
        return true;
    }

    terms
        .iter()
        .any(|term| term.chars().count() > 1 && word_boundary_match(&text, term))
}

/// Whether the event is about the caller's asset.
///
/// Plain substring match against title, description, ticker, slug and tag
/// labels. Terms of three or more characters also match as a prefix of any
/// title word, so "eth" finds "Ethereum".
pub fn matches_event(event: &Event, terms: &[String]) -> bool {
    let title = event.title.to_lowercase();
    let description = event.description.to_lowercase();
    let ticker = event.ticker.as_deref().unwrap_or("").to_lowercase();
    let slug = event.slug.to_lowercase();
    let tags: Vec<String> = event.tags.iter().map(|tag| tag.label.to_lowercase()).collect();

    terms.iter().any(|term| {
        let term = term.as_str();
        title.contains(term)
            || description.contains(term)
            || ticker.contains(term)
            || slug.contains(term)
            || tags.iter().any(|tag| tag.contains(term))
            || (term.chars().count() >= 3
                && title.split_whitespace().any(|word| word.starts_with(term)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Tag;

    fn event(title: &str) -> Event {
        Event {
            id: "1".to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalize_terms() {
        let normalized = normalize_terms(&["  Bitcoin ", "x", " ", "ETH"]);
        assert_eq!(normalized, terms(&["bitcoin", "eth"]));
    }

    #[test]
    fn test_keyword_makes_event_crypto_related() {
        assert!(is_crypto_related(&event("Will Bitcoin reach $100k?"), &[]));
        assert!(!is_crypto_related(&event("Who wins the Super Bowl?"), &[]));
    }

    #[test]
    fn test_keyword_in_tags_or_ticker() {
        let mut tagged = event("Price above 10 by June?");
        tagged.tags.push(Tag {
            label: "Crypto".to_string(),
            ..Default::default()
        });
        assert!(is_crypto_related(&tagged, &[]));

        let mut ticked = event("Price above 10 by June?");
        ticked.ticker = Some("avax-june".to_string());
        assert!(is_crypto_related(&ticked, &[]));
    }

    #[test]
    fn test_caller_term_fallback() {
        let e = event("Will Hyperliquid flip its rival?");

        assert!(!is_crypto_related(&e, &[]));
        assert!(is_crypto_related(&e, &terms(&["hyperliquid"])));
        // Partial words don't count for the topic check
        assert!(!is_crypto_related(&e, &terms(&["hyper"])));
        // Single characters are ignored
        assert!(!is_crypto_related(&event("Plan B wins?"), &terms(&["b"])));
    }

    #[test]
    fn test_matches_event_substring() {
        let mut e = event("Will the Fed cut rates?");
        e.description = "Includes effects on stablecoin markets".to_string();

        assert!(matches_event(&e, &terms(&["stable"])));
        assert!(!matches_event(&e, &terms(&["bitcoin"])));
    }

    #[test]
    fn test_matches_event_slug_and_tags() {
        let mut e = event("Up or down today?");
        e.slug = "solana-up-or-down".to_string();
        assert!(matches_event(&e, &terms(&["solana"])));

        let mut t = event("Up or down today?");
        t.tags.push(Tag {
            label: "Arbitrum".to_string(),
            ..Default::default()
        });
        assert!(matches_event(&t, &terms(&["arbitrum"])));
    }

    #[test]
    fn test_matches_event_requires_terms() {
        assert!(!matches_event(&event("Will Bitcoin reach $100k?"), &[]));
    }

    #[test]
    fn test_title_word_prefix() {
        let e = event("Ethereum above 5k?");
        assert!(matches_event(&e, &terms(&["eth"])));
        assert!(matches_event(&e, &terms(&["ethe"])));
    }
}
