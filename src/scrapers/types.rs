use serde::{Deserialize, Serialize};

/// Search parameters for a marketplace query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Keywords to search for
    pub query: String,
    /// Result page to fetch (1-based)
    pub page: Option<u32>,
    /// Minimum price (EUR)
    pub min_price: Option<f64>,
    /// Maximum price (EUR)
    pub max_price: Option<f64>,
    /// Restrict to buy-now listings
    pub buy_now_only: bool,
    /// Restrict to auctions
    pub auction_only: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            min_price: None,
            max_price: None,
            buy_now_only: false,
            auction_only: false,
        }
    }

    /// Query string pairs understood by the marketplace search endpoint.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("_nkw", self.query.clone())];
        if let Some(page) = self.page {
            params.push(("_pgn", page.to_string()));
        }
        if let Some(min_price) = self.min_price {
            params.push(("_udlo", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            params.push(("_udhi", max_price.to_string()));
        }
        if self.buy_now_only {
            params.push(("LH_BIN", "1".to_string()));
        }
        if self.auction_only {
            params.push(("LH_Auction", "1".to_string()));
        }
        params
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new("")
    }
}

/// Raw page markup plus the URL that produced it
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub url: String,
}
