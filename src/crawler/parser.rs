//! HTML link extraction
//!
//! Only `<a href="...">` start tags matter to the crawl. The hrefs are handed
//! back raw; resolving and filtering them is the caller's job.

use scraper::{Html, Selector};

/// The hrefs found on one page
///
/// A finite, consume-once sequence: iterate it to drain it, there is no way to
/// rewind. The parsed document itself is dropped before this is returned, so a
/// `Links` may be held across `.await` points.
#[derive(Debug)]
pub struct Links {
    hrefs: std::vec::IntoIter<String>,
}

impl Iterator for Links {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.hrefs.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hrefs.size_hint()
    }
}

impl ExactSizeIterator for Links {}

/// Extracts the href of every anchor tag in a response body
///
/// Anchors without an href, or with an empty one, are skipped. The body is
/// decoded as UTF-8 with invalid sequences replaced, so binary responses simply
/// yield no links.
///
/// # Example
///
/// ```
/// use spidered::crawler::extract_links;
///
/// let html = br#"<html><body><a href="/page">Link</a><a name="x">No href</a></body></html>"#;
/// let links: Vec<String> = extract_links(html).collect();
/// assert_eq!(links, vec!["/page".to_string()]);
/// ```
pub fn extract_links(body: &[u8]) -> Links {
    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    let mut hrefs = Vec::new();
    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if !href.trim().is_empty() {
                    hrefs.push(href.to_string());
                }
            }
        }
    }

    Links {
        hrefs: hrefs.into_iter(),
    }
}
