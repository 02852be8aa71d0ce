use lazy_static::lazy_static;
use regex::Regex;
use crate::matching::text::boundary_pattern;

/// Terms that mark an event as crypto-related no matter which asset is
/// being searched for.
pub const CRYPTO_KEYWORDS: &[&str] = &[
    "bitcoin", "btc", "ethereum", "eth", "crypto", "token", "solana", "sol",
    "xrp", "ripple", "cardano", "ada", "dogecoin", "doge", "polygon", "matic",
    "avalanche", "avax", "chainlink", "link", "uniswap", "uni", "aave",
    "compound", "defi", "nft", "blockchain", "altcoin", "stablecoin", "usdc",
    "usdt", "tether", "binance", "bnb", "coinbase", "kraken", "ftx",
    "polkadot", "dot", "cosmos", "atom", "near", "arbitrum", "arb",
    "optimism", "op", "base", "sui", "aptos", "apt", "sei", "celestia", "tia",
    "jupiter", "jup", "raydium", "orca", "marinade", "lido", "eigenlayer",
    "restaking", "memecoin", "meme coin", "pepe", "shiba", "floki", "bonk",
    "wif",
];

lazy_static! {
    static ref KEYWORD_PATTERNS: Vec<Regex> = CRYPTO_KEYWORDS
        .iter()
        .filter_map(|keyword| boundary_pattern(keyword).ok())
        .collect();
}

/// True if any static keyword appears as a whole word in `text`.
pub fn matches_any_keyword(text: &str) -> bool {
    KEYWORD_PATTERNS.iter().any(|re| re.is_match(text))
}
