//! Site map data model
//!
//! A [`SiteMap`] is the result of one crawl: one [`PageRecord`] per distinct
//! page successfully visited. Both serialize with every address rendered in
//! absolute string form:
//!
//! ```json
//! {"pages":[{"url":"https://foo.com/","links":["https://foo.com/about"],"assets":["https://foo.com/logo.png"]}]}
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// One fetched and parsed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized absolute address of the page
    pub url: Url,

    /// Distinct same-domain followable links, in discovery order
    pub links: Vec<Url>,

    /// Distinct asset references of any domain, in discovery order
    pub assets: Vec<Url>,
}

impl PageRecord {
    /// Creates a page record with no links or assets
    pub fn new(url: Url) -> Self {
        Self {
            url,
            links: Vec::new(),
            assets: Vec::new(),
        }
    }
}

/// The crawl result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMap {
    pub pages: Vec<PageRecord>,
}

impl SiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages in the map
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Looks up the record for a page address
    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|page| page.url.as_str() == url)
    }
}

impl From<Vec<PageRecord>> for SiteMap {
    fn from(pages: Vec<PageRecord>) -> Self {
        Self { pages }
    }
}
