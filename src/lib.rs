//! Finds the Polymarket prediction markets relevant to a crypto asset.
//!
//! [`search::terms::build_search_terms`] turns an asset's name, symbol and
//! chains into search terms; [`search::pipeline::MarketSearch`] fetches one
//! batch of events, keeps the crypto-related ones that match those terms,
//! and returns their open markets ranked by trading volume.

pub mod config;
pub mod data;
pub mod matching;
pub mod monitoring;
pub mod search;
