pub mod item;
pub mod search;
pub mod text;

pub use item::ItemParser;
pub use search::SearchParser;

use thiserror::Error;

/// Fatal document-shape failures.
///
/// Field-level problems never surface here; every field extractor degrades
/// to its documented default instead. Only a document missing its required
/// structural anchor is reported, so callers can tell "not a search results
/// page" apart from a search with zero results.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("search result container not found in document")]
    MissingResultContainer,
}
