//! URL Utility Functions
//!
//! Resolution of hrefs found on result pages and the repository-domain check
//! that keeps `DocumentLink` values pointing at the registry itself.

use url::Url;

use crate::error::ItemError;

/// Check if a string is a valid absolute URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) => {
            // Verify it has a host
            if url.host().is_some() {
                (true, Some(url))
            } else {
                (false, None)
            }
        }
        Err(_) => (false, None),
    }
}

/// Resolve a relative or absolute href to an absolute http(s) URL.
///
/// Returns `None` for empty hrefs, script/mail pseudo-links, fragments-only
/// links and relative hrefs without a base.
#[must_use]
pub fn resolve(href: &str, base: Option<&Url>) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    if let (true, Some(url)) = is_absolute_url(href) {
        return Some(url);
    }

    let resolved = base?.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https")
        .then_some(resolved)
        .filter(|url| url.host().is_some())
}

/// Normalize a hostname for comparison: lowercase, no trailing dot, no `www.`.
#[must_use]
pub fn normalize_domain(host: &str) -> String {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Whether `url` is hosted on `domain` or one of its subdomains.
#[must_use]
pub fn belongs_to_domain(url: &Url, domain: &str) -> bool {
    let domain = normalize_domain(domain);
    if domain.is_empty() {
        return false;
    }
    url.host_str().is_some_and(|host| {
        let host = normalize_domain(host);
        host == domain || host.ends_with(&format!(".{domain}"))
    })
}

/// Resolves hrefs on one page snapshot and enforces the repository domain.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Option<Url>,
    domain: String,
}

impl LinkResolver {
    /// Create a resolver for a page at `base` (if known) within `domain`.
    #[must_use]
    pub fn new(base: Option<&str>, domain: &str) -> Self {
        Self {
            base: base.and_then(|b| is_absolute_url(b).1),
            domain: domain.to_string(),
        }
    }

    /// Base URL of the page, if known.
    #[must_use]
    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Resolve `href` to an absolute URL on the repository domain, without
    /// its fragment.
    pub fn document_link(&self, href: &str) -> Result<Url, ItemError> {
        let mut url = resolve(href, self.base.as_ref())
            .ok_or_else(|| ItemError::UnresolvableLink(href.to_string()))?;
        url.set_fragment(None);

        if belongs_to_domain(&url, &self.domain) {
            Ok(url)
        } else {
            Err(ItemError::ForeignLink(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://www.fips.ru/iiss/document.xhtml").0);
        assert!(!is_absolute_url("/iiss/document.xhtml").0);
        assert!(!is_absolute_url("ftp://fips.ru/x").0);
        assert!(!is_absolute_url("").0);
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("https://www.fips.ru/iiss/search.xhtml").ok();
        let url = resolve("document.xhtml?id=42", base.as_ref());
        assert_eq!(
            url.map(|u| u.to_string()),
            Some("https://www.fips.ru/iiss/document.xhtml?id=42".to_string())
        );
    }

    #[test]
    fn test_resolve_rejects_pseudo_links() {
        let base = Url::parse("https://www.fips.ru/").ok();
        assert!(resolve("javascript:void(0)", base.as_ref()).is_none());
        assert!(resolve("#top", base.as_ref()).is_none());
        assert!(resolve("mailto:a@b.c", base.as_ref()).is_none());
        assert!(resolve("/relative", None).is_none());
    }

    #[test]
    fn test_belongs_to_domain() {
        let url = Url::parse("https://new.fips.ru/registers").ok();
        let url = url.as_ref();
        assert!(url.is_some_and(|u| belongs_to_domain(u, "fips.ru")));
        assert!(url.is_some_and(|u| belongs_to_domain(u, "www.fips.ru")));
        assert!(url.is_some_and(|u| !belongs_to_domain(u, "ips.ru")));
        assert!(url.is_some_and(|u| !belongs_to_domain(u, "")));
    }

    #[test]
    fn test_link_resolver() {
        let resolver = LinkResolver::new(Some("https://www.fips.ru/iiss/search.xhtml"), "fips.ru");
        assert!(resolver.document_link("/iiss/document.xhtml?id=1").is_ok());
        assert_eq!(
            resolver.document_link("https://example.com/document?id=1"),
            Err(ItemError::ForeignLink("https://example.com/document?id=1".to_string()))
        );
        assert_eq!(
            resolver.document_link("javascript:go()"),
            Err(ItemError::UnresolvableLink("javascript:go()".to_string()))
        );
    }
}
