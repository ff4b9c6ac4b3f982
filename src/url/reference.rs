use crate::UrlError;
use url::{ParseError, Url};

/// A raw `href`/`src`/`data` value split into the parts link classification needs
///
/// Unlike [`Url`], a `Reference` can be relative: a path-only reference has
/// neither scheme nor host, and a network-path reference (`//host/path`) has
/// a host but no scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    path: String,
}

impl Reference {
    /// Parses a possibly-relative URL reference
    ///
    /// # Returns
    ///
    /// * `Ok(Reference)` - The reference parts
    /// * `Err(UrlError::Malformed)` - The value is not a URL reference at all
    ///
    /// # Examples
    ///
    /// ```
    /// use site_mapper::url::Reference;
    ///
    /// let reference = Reference::parse("path/to/page").unwrap();
    /// assert_eq!(reference.scheme(), None);
    /// assert_eq!(reference.host(), None);
    /// assert_eq!(reference.path(), "path/to/page");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        match Url::parse(raw) {
            Ok(url) => Ok(Self::from_url(&url, Some(url.scheme().to_string()))),

            Err(ParseError::RelativeUrlWithoutBase) => {
                if raw.starts_with("//") {
                    // Borrow a scheme only to let the parser find the authority
                    let url = Url::parse(&format!("http:{}", raw)).map_err(|e| malformed(raw, e))?;
                    return Ok(Self::from_url(&url, None));
                }

                let path = raw.split(['?', '#']).next().unwrap_or_default();
                Ok(Self {
                    scheme: None,
                    host: None,
                    port: None,
                    path: path.to_string(),
                })
            }

            Err(e) => Err(malformed(raw, e)),
        }
    }

    fn from_url(url: &Url, scheme: Option<String>) -> Self {
        Self {
            scheme,
            host: url.host_str().map(|h| h.to_lowercase()),
            port: url.port(),
            path: url.path().to_string(),
        }
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns true if a crawler should fetch and expand this reference
    ///
    /// Accepted schemes are `http`, `https`, or none at all for a path-only
    /// reference. A network-path reference (`//host/...`) has no scheme of its
    /// own and is rejected. The last path segment must either carry no
    /// extension or end in `.html`.
    pub fn is_followable(&self) -> bool {
        let valid_scheme = match (self.scheme(), self.host()) {
            (None, None) => true,
            (Some(scheme), _) => scheme == "http" || scheme == "https",
            (None, Some(_)) => false,
        };

        // `None < Some(_)`, so a path without any '.' always passes
        let valid_extension =
            self.path.ends_with(".html") || self.path.rfind('.') <= self.path.rfind('/');

        valid_scheme && valid_extension
    }
}

fn malformed(raw: &str, err: ParseError) -> UrlError {
    UrlError::Malformed {
        reference: raw.to_string(),
        reason: err.to_string(),
    }
}
