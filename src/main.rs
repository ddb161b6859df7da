mod models;
mod parser;
mod scrapers;

use scrapers::{EbayScraper, SearchRequest};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🔎 eBay Scout - Search Scraper");
    info!("==============================");
    info!("");

    let query = std::env::args().nth(1).unwrap_or_else(|| "rtx 3080".to_string());
    let request = SearchRequest::new(query);

    let scraper = EbayScraper::new()?;
    let result = scraper.search(&request).await?;

    info!(
        "\n✅ Extracted {} listings and {} promoted ads ({} total results)\n",
        result.items.len(),
        result.ads.len(),
        result.total
    );

    for (i, item) in result.items.iter().enumerate() {
        println!("{}. {}", i + 1, item.title);
        if item.price >= 0.0 {
            println!("   {} {:.2} (+ {:.2} shipping)", item.currency, item.price, item.shipping);
        }
        println!("   Condition: {}", item.condition);
        println!("   ID: {}", item.id);
        println!();
    }

    // Save the full result for downstream consumers
    let json = serde_json::to_string_pretty(&result)?;
    tokio::fs::write("search_result.json", json).await?;
    info!("💾 Saved search result to search_result.json");

    Ok(())
}
