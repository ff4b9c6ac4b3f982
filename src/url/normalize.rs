use crate::UrlError;
use std::collections::HashSet;
use url::Url;

/// Resolves a possibly-relative reference against a page address
///
/// Standard reference resolution applies: a path-only `target` inherits the
/// scheme and host of `base`, a `//host/path` target adopts only the scheme of
/// `base`, and an absolute `target` passes through unchanged.
///
/// # Arguments
///
/// * `base` - The absolute address of the page the reference was found on
/// * `target` - The raw reference
///
/// # Returns
///
/// * `Ok(Url)` - The absolute address
/// * `Err(UrlError::Malformed)` - `target` cannot be parsed as a URL
///
/// # Examples
///
/// ```
/// use site_mapper::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://foo.com").unwrap();
/// assert_eq!(resolve(&base, "path/to/x").unwrap().as_str(), "https://foo.com/path/to/x");
/// assert_eq!(resolve(&base, "//bar.com/x").unwrap().as_str(), "https://bar.com/x");
/// ```
pub fn resolve(base: &Url, target: &str) -> Result<Url, UrlError> {
    base.join(target).map_err(|e| UrlError::Malformed {
        reference: target.to_string(),
        reason: e.to_string(),
    })
}

/// Removes a trailing `#...` fragment; no-op when there is none
pub fn strip_fragment(reference: &str) -> &str {
    match reference.find('#') {
        Some(index) => &reference[..index],
        None => reference,
    }
}

/// Returns the page identity of an absolute address
///
/// Two addresses denote the same page iff their normalized forms (scheme,
/// host, path and query, fragment removed) are identical strings.
pub fn normalize(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

/// Parses a seed address for a crawl
///
/// The seed must be absolute, use `http` or `https`, and name a host. Its
/// fragment, if any, is dropped.
///
/// # Examples
///
/// ```
/// use site_mapper::url::parse_seed;
///
/// let seed = parse_seed("https://foo.com/start#intro").unwrap();
/// assert_eq!(seed.as_str(), "https://foo.com/start");
/// ```
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed).map_err(|e| UrlError::Malformed {
        reference: seed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(seed.to_string()));
    }

    Ok(normalize(&url))
}

/// Removes duplicate addresses, keeping the first occurrence of each
pub fn dedupe(urls: Vec<Url>) -> Vec<Url> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| seen.insert(url.as_str().to_string()))
        .collect()
}
