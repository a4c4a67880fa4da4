//! Shared crawl storage
//!
//! Two independent tables live here, each behind its own mutex:
//! - `DispatchedSet`: every URL a task has been scheduled for
//! - `ResultTable`: the page record of every completed fetch
//!
//! Neither lock is ever held across an `.await`.

mod dispatched;
mod results;

pub use dispatched::DispatchedSet;
pub use results::ResultTable;
