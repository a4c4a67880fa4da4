use url::{ParseError, Url};

/// Checks whether a candidate URL belongs to the crawl
///
/// True iff the candidate is http or https and its host (including an
/// explicit port, if any) is non-empty and equal to the root's. Paths and
/// queries play no part here.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use spidered::url::in_scope;
///
/// let root = Url::parse("http://example.test/").unwrap();
/// assert!(in_scope(&root, &Url::parse("https://example.test/a/b").unwrap()));
/// assert!(!in_scope(&root, &Url::parse("http://other.test/").unwrap()));
/// ```
pub fn in_scope(root: &Url, candidate: &Url) -> bool {
    if candidate.scheme() != "http" && candidate.scheme() != "https" {
        return false;
    }

    match (root.host_str(), candidate.host_str()) {
        (Some(root_host), Some(host)) => {
            !host.is_empty() && host == root_host && candidate.port() == root.port()
        }
        _ => false,
    }
}

/// Checks whether a URL points at the domain root (path "/")
///
/// The url crate already turns an empty http(s) path into "/", so this only
/// rejects URLs that carry a real path.
pub fn is_root_url(url: &Url) -> bool {
    let path = url.path();
    path.is_empty() || path == "/"
}

/// Parses the crawl root, accepting a bare domain such as `example.com`
///
/// Input without a `scheme://` prefix is assumed to be plain http.
pub fn parse_root_url(input: &str) -> Result<Url, ParseError> {
    let input = input.trim();
    if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("http://{}", input))
    }
}
