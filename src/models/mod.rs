use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Sale condition advertised for a listing.
///
/// Declaration order is match priority: labels that contain another label
/// ("Brandneu" contains "Neu", "Sehr gut" contains "Gut") must come first
/// so that substring matching stays unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCondition {
    BrandNew,
    LikeNew,
    Refurbished,
    New,
    VeryGood,
    Good,
    Acceptable,
    Defective,
    Used,
    Unknown,
}

impl ItemCondition {
    /// All conditions in match priority order.
    pub const ALL: [ItemCondition; 10] = [
        ItemCondition::BrandNew,
        ItemCondition::LikeNew,
        ItemCondition::Refurbished,
        ItemCondition::New,
        ItemCondition::VeryGood,
        ItemCondition::Good,
        ItemCondition::Acceptable,
        ItemCondition::Defective,
        ItemCondition::Used,
        ItemCondition::Unknown,
    ];

    /// Condition label as it appears on the marketplace.
    pub fn label(&self) -> &'static str {
        match self {
            ItemCondition::BrandNew => "Brandneu",
            ItemCondition::LikeNew => "Neuwertig",
            ItemCondition::Refurbished => "Refurbished",
            ItemCondition::New => "Neu",
            ItemCondition::VeryGood => "Sehr gut",
            ItemCondition::Good => "Gut",
            ItemCondition::Acceptable => "Akzeptabel",
            ItemCondition::Defective => "Defekt",
            ItemCondition::Used => "Gebraucht",
            ItemCondition::Unknown => "Unbekannt",
        }
    }

    /// Match free text against the known condition labels, case-insensitive.
    /// The first label contained in the text wins; `Unknown` if none does.
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|condition| text.contains(&condition.label().to_lowercase()))
            .unwrap_or(ItemCondition::Unknown)
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One CDN thumbnail reference, parsed out of the image URL path.
///
/// `variant` is the single-character class in the path (`/g/…/`, `/m/…/`);
/// `"m"` marks a thumbnail standing for a price range rather than one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemImage {
    pub id: String,
    pub variant: String,
}

/// One listing extracted from a search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    pub id: String,
    pub title: String,
    /// Carries the "newly listed" badge
    pub newly: bool,
    pub condition: ItemCondition,
    pub auction: bool,
    pub buy_now: bool,
    /// Seller accepts price suggestions
    pub suggest_price: bool,
    /// Thumbnail stands for a price range, not a single price
    pub price_range: bool,
    pub ebay_plus: bool,
    /// -1.0 when no price could be parsed
    pub price: f64,
    /// 0.0 when no separate shipping fee was found
    pub shipping: f64,
    pub currency: String,
    pub images: Vec<ItemImage>,
}

/// Full result of one search page extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// URL that produced the document
    pub url: String,
    /// Organic listings, in document order
    pub items: Vec<SearchItem>,
    /// Promoted listings, in document order
    pub ads: Vec<SearchItem>,
    /// Total result count reported by the page header
    pub total: u32,
    pub zip: String,
    /// Listing count per condition facet
    pub condition_counts: HashMap<ItemCondition, u32>,
    pub scraped_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_match_is_case_insensitive() {
        assert_eq!(ItemCondition::parse("Zustand: GEBRAUCHT"), ItemCondition::Used);
        assert_eq!(ItemCondition::parse("brandneu"), ItemCondition::BrandNew);
    }

    #[test]
    fn first_matching_condition_wins() {
        // "Refurbished" precedes "Sehr gut" in declaration order
        assert_eq!(
            ItemCondition::parse("Zustand: Sehr gut - Refurbished"),
            ItemCondition::Refurbished
        );
        // "Neuwertig" must not fall through to "Neu"
        assert_eq!(ItemCondition::parse("Neuwertig"), ItemCondition::LikeNew);
        assert_eq!(ItemCondition::parse("Sehr gut"), ItemCondition::VeryGood);
    }

    #[test]
    fn unmatched_text_falls_back_to_unknown() {
        assert_eq!(ItemCondition::parse("Gewerblich"), ItemCondition::Unknown);
        assert_eq!(ItemCondition::parse(""), ItemCondition::Unknown);
    }
}
