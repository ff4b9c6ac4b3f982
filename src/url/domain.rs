use crate::url::Reference;
use url::Url;

/// Returns true if `target` lies in the same domain as `page`
///
/// A reference without a host inherits the page's domain. Otherwise host and
/// port must match exactly; the scheme is deliberately not compared, so the
/// `http` and `https` variants of a host count as one domain.
pub fn is_same_domain(page: &Url, target: &Reference) -> bool {
    match target.host() {
        None => true,
        Some(host) => {
            page.host_str().map(|h| h.eq_ignore_ascii_case(host)) == Some(true)
                && page.port() == target.port()
        }
    }
}
