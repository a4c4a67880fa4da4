/// Task state definitions for tracking crawl progress
///
/// Every URL the crawl dispatches gets one task, and every task walks the same
/// short path through these states.
use std::fmt;

/// Represents the current state of a URL's task in the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    // ===== Active States =====
    /// URL passed every filter and was claimed in the dispatched set
    Discovered,

    /// Task holds a socket permit
    Admitted,

    /// The network fetch is in progress
    Fetching,

    // ===== Terminal States =====
    /// Page was fetched, its links followed and its record stored
    Completed,

    /// The fetch failed; no record exists for this URL
    FetchFailed,
}

impl TaskState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::FetchFailed)
    }

    /// Returns true if the task produced a page record
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks whether a task may move from this state to `next`
    ///
    /// The only legal moves are one step forward along
    /// `Discovered -> Admitted -> Fetching -> Completed | FetchFailed`.
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Admitted)
                | (Self::Admitted, Self::Fetching)
                | (Self::Fetching, Self::Completed)
                | (Self::Fetching, Self::FetchFailed)
        )
    }

    /// Returns the lowercase name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Admitted => "admitted",
            Self::Fetching => "fetching",
            Self::Completed => "completed",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all possible task states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Discovered,
            Self::Admitted,
            Self::Fetching,
            Self::Completed,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
