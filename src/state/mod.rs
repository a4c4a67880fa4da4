//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `TaskState`: The lifecycle of one URL's task (discovered, admitted, fetching, ...)
//! - `PageRecord`: The immutable result stored for each fetched page

mod page_record;
mod page_state;

// Re-export main types
pub use page_record::{checksum, PageRecord};
pub use page_state::TaskState;
