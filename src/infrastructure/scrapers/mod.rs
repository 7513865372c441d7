use crate::error::{HarvestError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

pub(crate) mod match_cards;
pub(crate) mod player_stats;

pub use match_cards::ListingPage;

/// Turns a parsed page into data. Parsing never fails: anything the page
/// lacks comes back as an omitted field, a default, or an empty list.
pub trait DocumentParser {
    type Output;

    fn parse(&self, document: &Html) -> Self::Output;

    fn parse_str(&self, html: &str) -> Self::Output {
        self.parse(&Html::parse_document(html))
    }
}

/// A named field and the CSS selector that finds it.
pub struct FieldLocator {
    pub field: &'static str,
    selector: Selector,
}

impl FieldLocator {
    pub fn new(field: &'static str, selector: &str) -> Result<Self> {
        let selector = Selector::parse(selector).map_err(|e| HarvestError::Selector(e.to_string()))?;
        Ok(Self { field, selector })
    }

    /// Text of the first match under `element`, or `None` if nothing matches.
    pub fn locate(&self, element: ElementRef) -> Option<String> {
        element.select(&self.selector).next().map(stripped_text)
    }

    pub fn locate_all<'a>(&self, element: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        element.select(&self.selector).collect()
    }
}

/// Fields whose locator matched; a miss is left out rather than defaulted.
pub fn extract_fields(
    element: ElementRef,
    locators: &[FieldLocator],
) -> HashMap<&'static str, String> {
    locators
        .iter()
        .filter_map(|locator| locator.locate(element).map(|value| (locator.field, value)))
        .collect()
}

/// Every text node trimmed, empties dropped, joined without a separator.
pub fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}
