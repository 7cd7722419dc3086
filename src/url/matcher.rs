/// Extensions of files worth warming; anything else with an extension is skipped
const ALLOWED_EXTENSIONS: &[&str] = &[".php", ".htm", ".html", ".aspx", ".js", ".css"];

/// Path fragments that are never crawled
const EXCLUDED_PATH_FRAGMENTS: &[&str] = &["/wp-admin/"];

/// Checks whether the last segment of a URL path looks like a crawlable page
///
/// A final segment without a `.` (or an empty one, as in `/docs/`) is treated as
/// a page. Otherwise its extension must appear in the allow-list, compared
/// case-sensitively.
///
/// # Examples
///
/// ```
/// use cache_warmer::url::has_crawlable_extension;
///
/// assert!(has_crawlable_extension("/about"));
/// assert!(has_crawlable_extension("/style.css"));
/// assert!(!has_crawlable_extension("/image.png"));
/// ```
pub fn has_crawlable_extension(path: &str) -> bool {
    let last_segment = path.rsplit('/').next().unwrap_or("");

    match last_segment.rfind('.') {
        None => true,
        Some(dot) => ALLOWED_EXTENSIONS.contains(&&last_segment[dot..]),
    }
}

/// Checks whether a URL path falls under an excluded area such as `/wp-admin/`
pub fn is_excluded_path(path: &str) -> bool {
    EXCLUDED_PATH_FRAGMENTS
        .iter()
        .any(|fragment| path.contains(fragment))
}
