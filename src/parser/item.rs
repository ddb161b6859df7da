//! Per-listing field extraction.
//!
//! Every extractor works on one listing node and degrades to a documented
//! default when its data is missing, so assembling a listing never fails.

use crate::models::{ItemCondition, ItemImage, SearchItem};
use crate::parser::text::extract_decimal;
use scraper::{ElementRef, Selector};

/// Markers in the lowercased format line that identify how a listing can be
/// bought. A price suggestion always implies buy-now as well.
const AUCTION_MARKER: &str = "gebot";
const BUY_NOW_MARKER: &str = "sofort-kauf";
const OFFER_MARKER: &str = "preisvorschlag";

/// Image variant code for thumbnails that stand for a price range.
const RANGE_VARIANT: &str = "m";

/// Extracts all fields of a single listing node.
pub struct ItemParser {
    id: Selector,
    title: Selector,
    subtitle: Selector,
    price: Selector,
    fee: Selector,
    currency: Selector,
    format: Selector,
    plus: Selector,
    newly: Selector,
    image_src: Selector,
    image_url: Selector,
}

impl ItemParser {
    pub fn new() -> Self {
        Self {
            id: Selector::parse("[iid]").unwrap(),
            title: Selector::parse(".lvtitle > a").unwrap(),
            subtitle: Selector::parse(".lvsubtitle").unwrap(),
            price: Selector::parse(".lvprice").unwrap(),
            fee: Selector::parse(".fee").unwrap(),
            currency: Selector::parse("li.lvprice > span b").unwrap(),
            format: Selector::parse(".lvformat").unwrap(),
            plus: Selector::parse(".eplus-icon").unwrap(),
            newly: Selector::parse("span.newly").unwrap(),
            image_src: Selector::parse("img[src*=\"thumbs\"]").unwrap(),
            image_url: Selector::parse("img[imgurl*=\"thumbs\"]").unwrap(),
        }
    }

    /// Assemble one listing from its node.
    ///
    /// The extractors are independent and side-effect-free; the price-range
    /// flag is the one derived field, reusing the extracted image.
    pub fn parse_item(&self, element: ElementRef) -> SearchItem {
        let images = self.parse_images(element);
        let price_range = images
            .first()
            .map(|image| image.variant == RANGE_VARIANT)
            .unwrap_or(false);
        let format = self.class_text(element, &self.format).to_lowercase();

        SearchItem {
            id: self.parse_id(element),
            title: self.parse_title(element),
            newly: element.select(&self.newly).next().is_some(),
            condition: self.parse_condition(element),
            auction: format.contains(AUCTION_MARKER),
            buy_now: format.contains(BUY_NOW_MARKER) || format.contains(OFFER_MARKER),
            suggest_price: format.contains(OFFER_MARKER),
            price_range,
            ebay_plus: element.select(&self.plus).next().is_some(),
            price: extract_decimal(&self.class_text(element, &self.price)).unwrap_or(-1.0),
            shipping: extract_decimal(&self.class_text(element, &self.fee)).unwrap_or(0.0),
            currency: self.parse_currency(element),
            images,
        }
    }

    fn parse_id(&self, element: ElementRef) -> String {
        element
            .select(&self.id)
            .next()
            .and_then(|e| e.value().attr("iid"))
            .unwrap_or_default()
            .to_string()
    }

    /// Title anchor text with nested child markup stripped, so embedded
    /// badges do not leak into the title.
    fn parse_title(&self, element: ElementRef) -> String {
        element
            .select(&self.title)
            .next()
            .map(own_text)
            .unwrap_or_default()
    }

    /// The last subtitle line carries the condition; earlier ones hold
    /// seller info.
    fn parse_condition(&self, element: ElementRef) -> ItemCondition {
        element
            .select(&self.subtitle)
            .last()
            .map(|subtitle| ItemCondition::parse(&element_text(subtitle)))
            .unwrap_or(ItemCondition::Unknown)
    }

    fn parse_currency(&self, element: ElementRef) -> String {
        element
            .select(&self.currency)
            .next()
            .map(|e| element_text(e))
            .unwrap_or_default()
    }

    /// Zero or one thumbnail per listing: prefer the `src` reference,
    /// fall back to the lazy-load `imgurl` attribute.
    fn parse_images(&self, element: ElementRef) -> Vec<ItemImage> {
        element
            .select(&self.image_src)
            .next()
            .or_else(|| element.select(&self.image_url).next())
            .and_then(parse_image)
            .into_iter()
            .collect()
    }

    /// Concatenated text of every element matching `selector`, space-joined
    /// so digit runs from separate elements cannot fuse.
    fn class_text(&self, element: ElementRef, selector: &Selector) -> String {
        element
            .select(selector)
            .map(|e| element_text(e))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for ItemParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Whitespace-normalized text of an element and its descendants.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whitespace-normalized text of the element's own text nodes only.
fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_image(element: ElementRef) -> Option<ItemImage> {
    let url = match element.value().attr("imgurl") {
        Some(imgurl) if !imgurl.is_empty() => imgurl,
        _ => element.value().attr("src")?,
    };
    let (variant, id) = image_path_parts(url)?;
    Some(ItemImage {
        id: id.to_string(),
        variant: variant.to_string(),
    })
}

/// Find the `/<word-char>/<rest>/` section of a thumbnail URL.
///
/// `rest` runs to the last slash of the remainder, mirroring a greedy
/// match, so `/g/abc123/s-l225.jpg` yields `('g', "abc123")`.
fn image_path_parts(url: &str) -> Option<(char, &str)> {
    let bytes = url.as_bytes();
    for i in 0..bytes.len().saturating_sub(3) {
        if bytes[i] != b'/' || bytes[i + 2] != b'/' {
            continue;
        }
        let variant = bytes[i + 1] as char;
        if !variant.is_ascii_alphanumeric() && variant != '_' {
            continue;
        }
        let rest = &url[i + 3..];
        if let Some(last_slash) = rest.rfind('/') {
            return Some((variant, &rest[..last_slash]));
        }
    }
    None
}
