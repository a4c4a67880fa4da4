//! Robots.txt parser implementation
//!
//! This module wraps the robotstxt crate's matcher behind a small type that
//! answers "may this user agent fetch this path".

use robotstxt::DefaultMatcher;

/// A loaded robots.txt file
///
/// The matcher is cheap to build, so the raw content is kept and matched on
/// demand.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Creates a ParsedRobots from a raw response body
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the matcher ignores
    /// lines it cannot understand anyway.
    pub fn from_bytes(body: &[u8]) -> Self {
        Self::from_content(&String::from_utf8_lossy(body))
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Checks if a path is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `path` - The URL path to check (e.g., "/page.html")
    /// * `user_agent` - The user agent string
    ///
    /// # Returns
    ///
    /// * `true` - If the path is allowed
    /// * `false` - If the path is disallowed
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }
}
