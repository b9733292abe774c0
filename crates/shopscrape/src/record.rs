//! The persisted product record.

use serde::{Deserialize, Serialize};

/// One normalized product, as written to and reloaded from the JSON output.
///
/// Field order matches the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Listing heading text; also the detail-page path segment.
    pub name: String,
    /// Normalized display price, e.g. `"63.00"`. Not guaranteed numeric.
    pub price: String,
    /// Units in stock.
    pub quantity: u32,
    /// Normalized category text. Several categories collapse into one string.
    pub categories: String,
    /// Normalized weight without its unit.
    pub weight: String,
    /// Raw dimensions text.
    pub dimensions: String,
}
