//! Product field extraction from listing elements and detail pages.
//!
//! Extraction never fails: a selector without a match yields an empty string
//! and stock text without digits yields a quantity of zero.

use crate::normalize::normalize;
use crate::record::ProductRecord;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// CSS selectors for the storefront's WooCommerce markup.
struct ProductSelectors {
    name: Selector,
    price: Selector,
    stock: Selector,
    categories: Selector,
    weight: Selector,
    dimensions: Selector,
}

fn selectors() -> &'static ProductSelectors {
    static SELECTORS: OnceLock<ProductSelectors> = OnceLock::new();
    SELECTORS.get_or_init(|| ProductSelectors {
        name: parse_selector("h2"),
        price: parse_selector("span.price"),
        stock: parse_selector("div.summary p.stock"),
        categories: parse_selector("div.summary span.posted_in"),
        weight: parse_selector("div.woocommerce-tabs td.product_weight"),
        dimensions: parse_selector("div.woocommerce-tabs td.product_dimensions"),
    })
}

pub(crate) fn parse_selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("selector {css:?} is valid: {e}"))
}

/// The listing-page half of a product: what is known before the detail fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    /// Trimmed heading text.
    pub name: String,
    /// Trimmed, not yet normalized, price text.
    pub price_text: String,
}

impl ListingItem {
    /// Read name and price from one `li.product` element.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let sel = selectors();
        Self {
            name: element_text(element, &sel.name),
            price_text: element_text(element, &sel.price),
        }
    }
}

/// Build the record for `listing` from its parsed detail page.
pub fn extract(listing: &ListingItem, detail: &Html) -> ProductRecord {
    let sel = selectors();
    let stock = document_text(detail, &sel.stock);

    ProductRecord {
        name: listing.name.clone(),
        price: normalize(&listing.price_text),
        quantity: parse_quantity(&stock),
        categories: normalize(&document_text(detail, &sel.categories)),
        weight: normalize(&document_text(detail, &sel.weight)),
        dimensions: document_text(detail, &sel.dimensions),
    }
}

/// One-call form: listing element plus detail page to record.
pub fn extract_product(element: ElementRef<'_>, detail: &Html) -> ProductRecord {
    extract(&ListingItem::from_element(element), detail)
}

/// First maximal digit run in `text`, or 0 when there is none or it
/// overflows `u32`.
pub fn parse_quantity(text: &str) -> u32 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d+").expect("digit regex is valid"));

    re.find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Concatenated text of every match under `element`, trimmed.
fn element_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn document_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .flat_map(|e| e.text())
        .collect::<String>()
        .trim()
        .to_string()
}
