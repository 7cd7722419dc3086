use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (`mailto:`, `javascript:` and the like), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use cache_warmer::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true when both URLs have exactly the same host
///
/// Subdomains count as different sites, and ports are ignored.
pub fn is_same_site(referrer: &Url, candidate: &Url) -> bool {
    match (extract_domain(referrer), extract_domain(candidate)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
