//! URL handling module for Site-Mapper
//!
//! Pure functions deciding what "the same page" means, what counts as a
//! followable link, and what is in-domain. No state, no I/O.

mod domain;
mod normalize;
mod reference;

use ::url::Url;

// Re-export main functions
pub use normalize::{dedupe, normalize, parse_seed, resolve, strip_fragment};
pub use reference::Reference;

/// Returns true if `reference` is a link the crawler would fetch and expand
///
/// Malformed references are never followable.
///
/// # Examples
///
/// ```
/// use site_mapper::url::is_followable_link;
///
/// assert!(is_followable_link("path/to/file"));
/// assert!(is_followable_link("path/to/file.html"));
/// assert!(!is_followable_link("ftp://foo.com"));
/// assert!(!is_followable_link("https://foo.com/file.png"));
/// ```
pub fn is_followable_link(reference: &str) -> bool {
    Reference::parse(reference)
        .map(|r| r.is_followable())
        .unwrap_or(false)
}

/// Returns true if `target` is in the same domain as `page`
///
/// See [`Reference`] for how relative targets are read. Malformed targets are
/// never in-domain.
pub fn is_same_domain(page: &Url, target: &str) -> bool {
    Reference::parse(target)
        .map(|r| domain::is_same_domain(page, &r))
        .unwrap_or(false)
}

/// Same as [`is_same_domain`] for an already-parsed reference
pub fn is_same_domain_ref(page: &Url, target: &Reference) -> bool {
    domain::is_same_domain(page, target)
}
