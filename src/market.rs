//! Payload returned by the market-data collaborator.
//!
//! The lookup itself lives outside this crate; it is fed the brand, model
//! and option list of a [`crate::NormalizedRecord`].

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketListing {
    pub brand: String,
    pub model: String,
    pub price: String,
    pub vendor: String,
    pub web_url: String,
    pub qty_available: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSearchResults {
    pub search_results: Vec<MarketListing>,
}

/// Decode a market-data response, `None` on any shape mismatch.
pub fn parse_market_results(raw: &str) -> Option<Vec<MarketListing>> {
    match serde_json::from_str::<MarketSearchResults>(raw) {
        Ok(results) => Some(results.search_results),
        Err(err) => {
            warn!(error = %err, "Unusable market data response");
            None
        }
    }
}
