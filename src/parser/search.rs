//! Whole-page extraction: listing segmentation plus page-level facts.

use crate::models::{ItemCondition, SearchItem, SearchResult};
use crate::parser::text::parse_grouped_count;
use crate::parser::{ItemParser, ParseError};
use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::debug;

/// Parses one search results document into a [`SearchResult`].
///
/// Stateless apart from the compiled selectors; one instance can parse any
/// number of documents, concurrently if shared.
pub struct SearchParser {
    items: ItemParser,
    container: Selector,
    listing: Selector,
    ranked: Selector,
    total: Selector,
    zip: Selector,
    condition_input: Selector,
}

impl SearchParser {
    pub fn new() -> Self {
        Self {
            items: ItemParser::new(),
            container: Selector::parse("#ListViewInner").unwrap(),
            listing: Selector::parse("li[listingid]").unwrap(),
            ranked: Selector::parse("li[r=\"1\"]").unwrap(),
            total: Selector::parse(".rsHdr .rcnt").unwrap(),
            zip: Selector::parse("a[aria-describedby=\"loczip\"]").unwrap(),
            condition_input: Selector::parse("input[name=\"LH_ItemCondition\"]").unwrap(),
        }
    }

    /// Extract a full search result from raw markup.
    ///
    /// `url` is the request that produced the document and is carried
    /// through for provenance. Fails only when the listing container is
    /// missing entirely; a present-but-empty container is a valid search
    /// with zero results.
    pub fn parse(&self, html: &str, url: &str) -> Result<SearchResult, ParseError> {
        let document = Html::parse_document(html);

        let container = document
            .select(&self.container)
            .next()
            .ok_or(ParseError::MissingResultContainer)?;

        let (items, ads) = self.segment(container);
        debug!("Extracted {} items and {} ads", items.len(), ads.len());

        Ok(SearchResult {
            url: url.to_string(),
            items,
            ads,
            total: self.parse_total(&document),
            zip: self.parse_zip(&document),
            condition_counts: self.parse_condition_counts(&document),
            scraped_at: Utc::now(),
        })
    }

    /// Split the container's listing nodes into organic items and promoted
    /// ads.
    ///
    /// The page's top slot can appear both as organic result and as the
    /// first rank-1 promotion. The first node therefore always counts as
    /// organic, whatever its rank flag says, and the first rank-1 node is
    /// dropped from the ads so that slot is not counted twice.
    fn segment(&self, container: ElementRef) -> (Vec<SearchItem>, Vec<SearchItem>) {
        let nodes: Vec<ElementRef> = container.select(&self.listing).collect();

        let mut items = Vec::new();
        if let Some(&first) = nodes.first() {
            items.push(self.items.parse_item(first));
        }
        for &node in nodes.iter().skip(1) {
            if node.value().attr("r") != Some("1") {
                items.push(self.items.parse_item(node));
            }
        }

        let mut ads = Vec::new();
        let mut first_skipped = false;
        for ranked in container.select(&self.ranked) {
            if !first_skipped {
                first_skipped = true;
            } else {
                ads.push(self.items.parse_item(ranked));
            }
        }

        (items, ads)
    }

    fn parse_total(&self, document: &Html) -> u32 {
        document
            .select(&self.total)
            .next()
            .and_then(|e| parse_grouped_count(&element_text(e)))
            .unwrap_or(0)
    }

    fn parse_zip(&self, document: &Html) -> String {
        document
            .select(&self.zip)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    /// Pair each condition filter input with its two following siblings:
    /// the label and the facet count. Later duplicates for the same
    /// condition overwrite earlier ones.
    fn parse_condition_counts(&self, document: &Html) -> HashMap<ItemCondition, u32> {
        let mut counts = HashMap::new();

        for input in document.select(&self.condition_input) {
            if let Some(label) = next_element(input) {
                if let Some(value) = next_element(label) {
                    let condition = ItemCondition::parse(&element_text(label));
                    let count = parse_grouped_count(&element_text(value)).unwrap_or(0);
                    counts.insert(condition, count);
                }
            }
        }

        counts
    }
}

impl Default for SearchParser {
    fn default() -> Self {
        Self::new()
    }
}

fn next_element(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_HTML: &str = r##"
        <html><body>
        <div class="rsHdr"><h1>Ergebnisse <span class="rcnt">1.234</span></h1></div>
        <a aria-describedby="loczip" href="#">10115</a>
        <div class="facets">
          <input type="checkbox" name="LH_ItemCondition" value="1000"><span>Neu</span><span class="cnt">(1.056)</span>
          <input type="checkbox" name="LH_ItemCondition" value="3000"><span>Gebraucht</span><span class="cnt">(178)</span>
        </div>
        <ul id="ListViewInner">
          <li listingid="100">
            <h3 class="lvtitle"><a href="#" iid="100">Erstes Angebot</a></h3>
          </li>
          <li listingid="101" r="1">
            <h3 class="lvtitle"><a href="#" iid="101">Beworbenes Angebot</a></h3>
          </li>
          <li listingid="102" r="1">
            <h3 class="lvtitle"><a href="#" iid="102">Zweites beworbenes Angebot</a></h3>
          </li>
        </ul>
        </body></html>
    "##;

    fn parser() -> SearchParser {
        SearchParser::new()
    }

    fn ids(items: &[SearchItem]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn segments_items_and_ads() {
        let result = parser().parse(SEARCH_HTML, "https://www.ebay.de/sch/i.html").unwrap();

        // node0 is organic; node1 is the first rank-1 node and is consumed
        // by the top slot; node2 is the only remaining ad
        assert_eq!(ids(&result.items), vec!["100"]);
        assert_eq!(ids(&result.ads), vec!["102"]);
    }

    #[test]
    fn first_node_is_organic_even_when_rank_flagged() {
        let html = r##"
            <ul id="ListViewInner">
              <li listingid="200" r="1"><a iid="200" href="#">A</a></li>
              <li listingid="201" r="1"><a iid="201" href="#">B</a></li>
              <li listingid="202"><a iid="202" href="#">C</a></li>
            </ul>
        "##;
        let result = parser().parse(html, "").unwrap();

        assert_eq!(ids(&result.items), vec!["200", "202"]);
        assert_eq!(ids(&result.ads), vec!["201"]);
    }

    #[test]
    fn parses_page_level_facts() {
        let result = parser().parse(SEARCH_HTML, "https://www.ebay.de/sch/i.html").unwrap();

        assert_eq!(result.url, "https://www.ebay.de/sch/i.html");
        assert_eq!(result.total, 1234);
        assert_eq!(result.zip, "10115");
        assert_eq!(result.condition_counts.len(), 2);
        assert_eq!(result.condition_counts[&ItemCondition::New], 1056);
        assert_eq!(result.condition_counts[&ItemCondition::Used], 178);
    }

    #[test]
    fn duplicate_facet_entries_overwrite() {
        let html = r#"
            <ul id="ListViewInner"></ul>
            <input name="LH_ItemCondition" value="1"><span>Neu</span><span>(10)</span>
            <input name="LH_ItemCondition" value="2"><span>Neu</span><span>(20)</span>
        "#;
        let result = parser().parse(html, "").unwrap();

        assert_eq!(result.condition_counts.len(), 1);
        assert_eq!(result.condition_counts[&ItemCondition::New], 20);
    }

    #[test]
    fn facet_without_count_sibling_is_skipped() {
        let html = r#"
            <ul id="ListViewInner"></ul>
            <div><input name="LH_ItemCondition" value="1"><span>Neu</span></div>
        "#;
        let result = parser().parse(html, "").unwrap();
        assert!(result.condition_counts.is_empty());
    }

    #[test]
    fn missing_container_is_a_structural_failure() {
        let error = parser().parse("<html><body><p>Startseite</p></body></html>", "").unwrap_err();
        assert_eq!(error, ParseError::MissingResultContainer);
    }

    #[test]
    fn empty_container_is_a_valid_empty_result() {
        let result = parser().parse(r#"<ul id="ListViewInner"></ul>"#, "").unwrap();

        assert!(result.items.is_empty());
        assert!(result.ads.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.zip, "");
        assert!(result.condition_counts.is_empty());
    }
}
