//! HTML extraction of links and assets
//!
//! Walks every element of a parsed document depth-first and sorts the
//! references it finds into the page's links and assets.

use crate::dom::{attr, classify};
use crate::sitemap::PageRecord;
use crate::url::{dedupe, is_same_domain_ref, resolve, strip_fragment, Reference};
use crate::UrlError;
use scraper::{ElementRef, Html};
use url::Url;

/// Parses HTML content into a page record
///
/// # Extraction Rules
///
/// | Element | Attribute | Goes to |
/// |---------|-----------|---------|
/// | `<a>` | `href` | `links`, if followable and same-domain |
/// | `<script>`, `<iframe>`, `<source>`, `<embed>`, `<img>` | `src` | `assets` |
/// | `<link rel="stylesheet">`, `<link rel="icon">` | `href` | `assets` |
/// | `<object>` | `data` | `assets` |
///
/// An element missing its attribute contributes nothing. A present attribute
/// whose value cannot be parsed as a URL aborts the whole page.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The page's own address, used to resolve relative references
///
/// # Returns
///
/// * `Ok(PageRecord)` - Deduplicated links and assets
/// * `Err(UrlError)` - A reference on the page is malformed
///
/// # Example
///
/// ```
/// use site_mapper::crawler::extract_page;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/about">About</a><img src="logo.png"></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let page = extract_page(html, &page_url).unwrap();
/// assert_eq!(page.links[0].as_str(), "https://example.com/about");
/// assert_eq!(page.assets[0].as_str(), "https://example.com/logo.png");
/// ```
pub fn extract_page(html: &str, page_url: &Url) -> Result<PageRecord, UrlError> {
    let document = Html::parse_document(html);
    extract_from_document(&document, page_url)
}

/// Extracts a page record from an already-parsed document
pub fn extract_from_document(document: &Html, page_url: &Url) -> Result<PageRecord, UrlError> {
    let mut page = PageRecord::new(page_url.clone());

    for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
        process_element(&mut page, element)?;
    }

    page.links = dedupe(page.links);
    page.assets = dedupe(page.assets);
    Ok(page)
}

fn process_element(page: &mut PageRecord, element: ElementRef<'_>) -> Result<(), UrlError> {
    let kind = classify(element.value());
    let Some(key) = kind.reference_attr() else {
        return Ok(());
    };

    let Ok(value) = attr(element.value(), key) else {
        return Ok(());
    };

    if kind.is_asset() {
        add_asset(page, value)
    } else {
        add_link(page, value)
    }
}

fn add_link(page: &mut PageRecord, href: &str) -> Result<(), UrlError> {
    let href = strip_fragment(href);
    let reference = Reference::parse(href)?;
    let absolute = resolve(&page.url, href)?;

    if reference.is_followable() && is_same_domain_ref(&page.url, &reference) {
        page.links.push(absolute);
    }
    Ok(())
}

fn add_asset(page: &mut PageRecord, value: &str) -> Result<(), UrlError> {
    let absolute = resolve(&page.url, value)?;
    page.assets.push(absolute);
    Ok(())
}
