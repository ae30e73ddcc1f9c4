//! URL handling module for Catalog-Harvest
//!
//! This module resolves links found in markup against the page they came
//! from, and derives directory and file names from product names and image
//! URLs.

mod resolve;
mod slug;

pub use resolve::{parse_http_url, resolve_link};
pub use slug::{image_file_name, last_path_segment, slugify};
