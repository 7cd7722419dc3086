use crate::url::domain::{extract_domain, is_same_site};
use crate::url::matcher::{has_crawlable_extension, is_excluded_path};
use crate::UrlError;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Absolute URL with its fragment removed, used as the crawl dedup key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Strips the fragment, keeping scheme, host, path and query
    pub fn from_url(mut url: Url) -> Self {
        url.set_fragment(None);
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a link was left out of the crawl frontier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("fragment-only link")]
    FragmentOnly,

    #[error("malformed link '{href}': {reason}")]
    Malformed { href: String, reason: String },

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("foreign host {0}")]
    ForeignHost(String),

    #[error("unwanted file extension")]
    Extension,

    #[error("excluded path")]
    ExcludedPath,
}

/// Reduces a raw href found on `referrer` to a canonical same-site URL
///
/// # Rules
///
/// 1. Links starting with `#` are rejected
/// 2. Root-relative links (`/about`) are resolved against the referrer; anything
///    else must already be an absolute URL
/// 3. The host must equal the referrer's host exactly
/// 4. The last path segment must have no extension, or an allowed one
/// 5. Paths containing `/wp-admin/` are rejected
/// 6. The fragment is dropped
///
/// Only `http` and `https` links are kept.
///
/// # Examples
///
/// ```
/// use cache_warmer::url::normalize_link;
/// use url::Url;
///
/// let page = Url::parse("https://a.example.com/").unwrap();
/// let link = normalize_link(&page, "/page?x=1#section").unwrap();
/// assert_eq!(link.as_str(), "https://a.example.com/page?x=1");
///
/// assert!(normalize_link(&page, "https://b.example.com/").is_err());
/// ```
pub fn normalize_link(referrer: &Url, raw_href: &str) -> Result<CanonicalUrl, Rejection> {
    let href = raw_href.trim();

    if href.starts_with('#') {
        return Err(Rejection::FragmentOnly);
    }

    let resolved = if href.starts_with('/') {
        referrer.join(href)
    } else {
        Url::parse(href)
    }
    .map_err(|e| Rejection::Malformed {
        href: href.to_string(),
        reason: e.to_string(),
    })?;

    if !is_same_site(referrer, &resolved) {
        return Err(Rejection::ForeignHost(
            extract_domain(&resolved).unwrap_or_else(|| resolved.scheme().to_string()),
        ));
    }

    if !is_http_scheme(resolved.scheme()) {
        return Err(Rejection::UnsupportedScheme(resolved.scheme().to_string()));
    }

    if !has_crawlable_extension(resolved.path()) {
        return Err(Rejection::Extension);
    }

    if is_excluded_path(resolved.path()) {
        return Err(Rejection::ExcludedPath);
    }

    Ok(CanonicalUrl::from_url(resolved))
}

/// Turns a configured site into the URL of its first fetch
///
/// Sites without an `http://` or `https://` prefix get `http://` prepended.
///
/// # Examples
///
/// ```
/// use cache_warmer::url::seed_url;
///
/// assert_eq!(seed_url("example.com").unwrap().as_str(), "http://example.com/");
/// assert_eq!(
///     seed_url("https://example.com/shop").unwrap().as_str(),
///     "https://example.com/shop"
/// );
/// ```
pub fn seed_url(site: &str) -> Result<Url, UrlError> {
    let site = site.trim();
    if site.is_empty() {
        return Err(UrlError::Malformed("empty site".to_string()));
    }

    let lowered = site.to_ascii_lowercase();
    let url = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        Url::parse(site)
    } else {
        Url::parse(&format!("http://{}", site))
    }
    .map_err(|e| UrlError::Parse(format!("{}: {}", site, e)))?;

    if !is_http_scheme(url.scheme()) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

fn is_http_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}
