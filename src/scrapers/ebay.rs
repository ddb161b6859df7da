use crate::models::SearchResult;
use crate::parser::SearchParser;
use crate::scrapers::traits::DocumentSource;
use crate::scrapers::types::{FetchedPage, SearchRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const SEARCH_ENDPOINT: &str = "https://www.ebay.de/sch/i.html";

/// eBay search scraper: fetches result pages over HTTP and runs them
/// through the search parser.
pub struct EbayScraper {
    client: Client,
    parser: SearchParser,
}

impl EbayScraper {
    /// Create a new eBay scraper with a default HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            parser: SearchParser::new(),
        })
    }

    /// Fetch one search results page and extract it into a [`SearchResult`].
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        let page = self.fetch(request).await?;

        debug!("Downloaded {} bytes of HTML", page.html.len());

        let result = self
            .parser
            .parse(&page.html, &page.url)
            .context("Document is not a recognizable search results page")?;

        info!(
            "Parsed {} items and {} ads out of {} total results",
            result.items.len(),
            result.ads.len(),
            result.total
        );

        Ok(result)
    }
}

#[async_trait]
impl DocumentSource for EbayScraper {
    async fn fetch(&self, request: &SearchRequest) -> Result<FetchedPage> {
        info!("Searching for '{}'", request.query);

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&request.query_params())
            .send()
            .await
            .context("Failed to fetch search page")?;

        if !response.status().is_success() {
            warn!("Search returned status: {}", response.status());
            anyhow::bail!("Failed to fetch search page: {}", response.status());
        }

        let url = response.url().to_string();
        let html = response.text().await.context("Failed to read response body")?;

        Ok(FetchedPage { html, url })
    }

    fn source_name(&self) -> &'static str {
        "eBay"
    }
}
