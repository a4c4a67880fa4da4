//! URL handling module for Spidered
//!
//! Turns raw hrefs into absolute URLs and decides which of them belong to the
//! crawled domain.

mod domain;
mod normalize;

pub use domain::{in_scope, is_root_url, parse_root_url};
pub use normalize::normalize;
