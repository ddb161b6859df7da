pub mod ebay;
pub mod traits;
pub mod types;

pub use ebay::EbayScraper;
pub use traits::DocumentSource;
pub use types::{FetchedPage, SearchRequest};
