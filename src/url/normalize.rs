use url::Url;

/// Resolves a discovered href into an absolute, fragment-free URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace from the href
/// 2. Resolve it against `base` (relative, root-relative, scheme-relative and
///    absolute hrefs are all accepted)
/// 3. Remove the fragment (everything after #)
/// 4. An empty path becomes "/"
///
/// This never fails in the sense of aborting anything: an href that cannot be
/// parsed at all yields `None`, which the scope filter treats as out of scope.
///
/// # Examples
///
/// ```
/// use spidered::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("http://example.test/").unwrap();
/// let url = normalize("/a#frag", &base).unwrap();
/// assert_eq!(url.as_str(), "http://example.test/a");
/// ```
pub fn normalize(href: &str, base: &Url) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;

    url.set_fragment(None);

    if url.path().is_empty() && !url.cannot_be_a_base() {
        url.set_path("/");
    }

    Some(url)
}
