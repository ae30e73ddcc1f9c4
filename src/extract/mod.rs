//! Product extraction module
//!
//! Turns a product page snapshot into a `ProductRecord`. Extraction never
//! fails: each field is produced by an ordered list of selector rules, and a
//! field whose rules all miss is left empty.
//!
//! # Fields
//!
//! | Field | Source |
//! |-------|--------|
//! | title | product title heading, then any `h1` |
//! | short_description / description | short description block, long description tab |
//! | categories | metadata category links, then breadcrumbs |
//! | tags, brand, sku | product metadata block |
//! | advantages | first list after the "advantages" heading |
//! | technical_info | `Label: value` lines of the technical-info paragraph |
//! | image_urls | product gallery images |

mod product;
mod record;
mod rules;
mod technical;

pub use product::{extract_product, ProductExtractor};
pub use record::ProductRecord;
pub use technical::parse_technical_info;
