use lazy_static::lazy_static;
use regex::Regex;
use crate::data::types::AssetDescriptor;

const MAX_CHAIN_TERMS: usize = 3;

lazy_static! {
    // "Uniswap Protocol" is also searched as "Uniswap"
    static ref NAME_SUFFIX: Regex =
        Regex::new(r"(?i)\s+(protocol|finance|network|chain|swap|dex)$")
            .expect("suffix pattern is valid");
}

/// Derive the search vocabulary for an asset from its name, symbol and
/// first few chains. Terms are lower-cased, unique, and longer than one
/// character. No input gives no terms.
pub fn build_search_terms(asset: &AssetDescriptor) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    if let Some(name) = asset.name.as_deref().filter(|n| !n.is_empty()) {
        let lower = name.to_lowercase();
        let stripped = NAME_SUFFIX.replace(&lower, "").into_owned();
        let changed = stripped != lower;

        terms.push(lower);
        if changed {
            terms.push(stripped);
        }
    }

    if let Some(symbol) = asset.symbol.as_deref().filter(|s| !s.is_empty() && *s != "-") {
        terms.push(symbol.to_lowercase());
    }

    if let Some(chains) = &asset.chains {
        for chain in chains.iter().take(MAX_CHAIN_TERMS) {
            let chain = chain.to_lowercase();
            if !terms.contains(&chain) {
                terms.push(chain);
            }
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        if term.chars().count() > 1 && !unique.contains(&term) {
            unique.push(term);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: Option<&str>, symbol: Option<&str>, chains: Option<&[&str]>) -> AssetDescriptor {
        AssetDescriptor {
            name: name.map(str::to_string),
            symbol: symbol.map(str::to_string),
            chains: chains.map(|c| c.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_name_suffix_is_stripped() {
        let terms = build_search_terms(&asset(Some("Uniswap Protocol"), None, None));
        assert_eq!(terms, vec!["uniswap protocol", "uniswap"]);

        let terms = build_search_terms(&asset(Some("Lido FINANCE"), None, None));
        assert_eq!(terms, vec!["lido finance", "lido"]);
    }

    #[test]
    fn test_suffix_needs_preceding_whitespace() {
        let terms = build_search_terms(&asset(Some("SushiSwap"), None, None));
        assert_eq!(terms, vec!["sushiswap"]);
    }

    #[test]
    fn test_symbol_placeholder_is_ignored() {
        let terms = build_search_terms(&asset(None, Some("-"), None));
        assert!(terms.is_empty());

        let terms = build_search_terms(&asset(Some("Aave"), Some("AAVE"), None));
        assert_eq!(terms, vec!["aave"]);
    }

    #[test]
    fn test_at_most_three_chains() {
        let chains = ["Ethereum", "Arbitrum", "Base", "Optimism"];
        let terms = build_search_terms(&asset(Some("Chainlink"), Some("LINK"), Some(&chains)));

        assert_eq!(terms, vec!["chainlink", "link", "ethereum", "arbitrum", "base"]);
    }

    #[test]
    fn test_short_terms_dropped() {
        let terms = build_search_terms(&asset(Some("Q"), Some("x"), Some(&["Z", "Sui"])));
        assert_eq!(terms, vec!["sui"]);
        assert!(terms.iter().all(|t| t.chars().count() > 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_search_terms(&AssetDescriptor::default()).is_empty());
    }
}
