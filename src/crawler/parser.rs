//! HTML parser for extracting anchor hrefs
//!
//! Hrefs are returned exactly as written in the document; resolving and
//! filtering them is the job of `crate::url::normalize_link`.

use scraper::{Html, Selector};
use thiserror::Error;

/// HTML could not be turned into a link list
#[derive(Debug, Error)]
#[error("HTML parse error: {0}")]
pub struct ParseError(String);

/// Parses HTML content and returns the raw `href` of every `<a>` element
///
/// # Example
///
/// ```
/// use cache_warmer::crawler::extract_hrefs;
///
/// let html = r##"<html><body><a href="/page">Link</a><a href="#top">Top</a></body></html>"##;
/// assert_eq!(extract_hrefs(html).unwrap(), vec!["/page", "#top"]);
/// ```
pub fn extract_hrefs(html: &str) -> Result<Vec<String>, ParseError> {
    let selector = Selector::parse("a[href]").map_err(|e| ParseError(e.to_string()))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}
