use crate::scrapers::types::{FetchedPage, SearchRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for anything that can produce a raw search results page.
/// Keeps the extraction core independent from how documents are obtained.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch raw markup for the given search request, together with the
    /// URL that actually produced it.
    async fn fetch(&self, request: &SearchRequest) -> Result<FetchedPage>;

    /// Get the name of the backing source
    fn source_name(&self) -> &'static str;
}
