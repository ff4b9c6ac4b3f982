//! Markup node classification
//!
//! Maps a parsed element to the kind of reference it carries and reads
//! attributes off it. No state, no I/O.

use crate::DomError;
use scraper::node::Element;

/// The semantic kind of a markup element, as far as site mapping cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `<a>`: a candidate link
    Anchor,
    /// `<script>`
    Script,
    /// `<link rel="stylesheet">`
    Stylesheet,
    /// `<link rel="icon">`
    Icon,
    /// `<iframe>`
    Iframe,
    /// `<source>`
    Source,
    /// `<embed>`
    Embed,
    /// `<object>`
    Object,
    /// `<img>`
    Image,
    /// Anything else
    Other,
}

impl NodeKind {
    /// The attribute holding the reference for this kind, if it carries one
    pub fn reference_attr(&self) -> Option<&'static str> {
        match self {
            Self::Anchor | Self::Stylesheet | Self::Icon => Some("href"),
            Self::Script | Self::Iframe | Self::Source | Self::Embed | Self::Image => Some("src"),
            Self::Object => Some("data"),
            Self::Other => None,
        }
    }

    /// Returns true if this kind references a non-page resource
    pub fn is_asset(&self) -> bool {
        !matches!(self, Self::Anchor | Self::Other)
    }
}

/// Classifies an element by tag name
///
/// `<link>` is a stylesheet or an icon depending on its `rel` attribute,
/// compared case-insensitively; any other `<link>` is [`NodeKind::Other`].
pub fn classify(element: &Element) -> NodeKind {
    match element.name() {
        "a" => NodeKind::Anchor,
        "script" => NodeKind::Script,
        "iframe" => NodeKind::Iframe,
        "source" => NodeKind::Source,
        "embed" => NodeKind::Embed,
        "object" => NodeKind::Object,
        "img" => NodeKind::Image,
        "link" => match attr(element, "rel") {
            Ok(rel) if rel.eq_ignore_ascii_case("stylesheet") => NodeKind::Stylesheet,
            Ok(rel) if rel.eq_ignore_ascii_case("icon") => NodeKind::Icon,
            _ => NodeKind::Other,
        },
        _ => NodeKind::Other,
    }
}

/// Returns the value of the first attribute named `key`
pub fn attr<'a>(element: &'a Element, key: &str) -> Result<&'a str, DomError> {
    element
        .attrs()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
        .ok_or_else(|| DomError::AttributeNotFound {
            element: element.name().to_string(),
            key: key.to_string(),
        })
}
