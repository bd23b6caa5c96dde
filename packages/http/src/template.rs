//! URL templates with named placeholders.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use comicdesk_http::UrlTemplate;
//!
//! const COMIC: UrlTemplate = UrlTemplate::new("/api/comics/{id}");
//!
//! let mut params = BTreeMap::new();
//! params.insert("id", "42".to_string());
//! assert_eq!(COMIC.expand(&params).unwrap(), "/api/comics/42");
//! ```
//!
//! Values are percent-encoded as single path segments, so `/`, `?` and `#`
//! in a value cannot change the shape of the path.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::Error;

/// Characters escaped in a substituted path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Placeholder values keyed by name.
pub type Params = BTreeMap<&'static str, String>;

/// A URL path with `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UrlTemplate(&'static str);

impl UrlTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Names of the placeholders, in order of appearance.
    pub fn placeholders(&self) -> Result<Vec<&'static str>, Error> {
        let mut names = Vec::new();
        for segment in self.segments()? {
            if let Segment::Placeholder(name) = segment {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Substitute every placeholder from `params`, percent-encoding each
    /// value.
    ///
    /// Fails when a placeholder has no value or the template is malformed.
    /// Extra parameters are ignored.
    pub fn expand<K, V>(&self, params: &BTreeMap<K, V>) -> Result<String, Error>
    where
        K: std::borrow::Borrow<str> + Ord,
        V: AsRef<str>,
    {
        let mut expanded = String::with_capacity(self.0.len());
        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => expanded.push_str(text),
                Segment::Placeholder(name) => {
                    let value = params.get(name).ok_or_else(|| Error::Template {
                        template: self.0.to_string(),
                        message: format!("no value for placeholder `{}`", name),
                    })?;
                    expanded.extend(utf8_percent_encode(value.as_ref(), SEGMENT));
                }
            }
        }
        Ok(expanded)
    }

    fn segments(&self) -> Result<Vec<Segment>, Error> {
        let template = self.0;
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(&rest[..open]));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| self.malformed("unclosed `{`"))?;
            let name = &after[..close];
            if name.is_empty() || name.contains('{') {
                return Err(self.malformed("empty or nested placeholder"));
            }
            segments.push(Segment::Placeholder(name));
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(self.malformed("unmatched `}`"));
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(segments)
    }

    fn malformed(&self, message: &str) -> Error {
        Error::Template {
            template: self.0.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

enum Segment {
    Literal(&'static str),
    Placeholder(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn expands_single_placeholder() {
        let template = UrlTemplate::new("/api/pages/blocked/{hash}");
        let params: Params = btree! { "hash" => "abc123".to_string() };
        assert_eq!(
            template.expand(&params).unwrap(),
            "/api/pages/blocked/abc123"
        );
    }

    #[test]
    fn expands_multiple_placeholders() {
        let template = UrlTemplate::new("/api/lists/{listId}/comics/{comicId}");
        let params: Params = btree! {
            "listId" => "7".to_string(),
            "comicId" => "99".to_string(),
        };
        assert_eq!(
            template.expand(&params).unwrap(),
            "/api/lists/7/comics/99"
        );
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        let template = UrlTemplate::new("/api/pages/blocked");
        assert_eq!(
            template.expand(&Params::new()).unwrap(),
            "/api/pages/blocked"
        );
        assert!(template.placeholders().unwrap().is_empty());
    }

    #[test]
    fn values_cannot_change_the_path_shape() {
        let template = UrlTemplate::new("/api/pages/blocked/{hash}");
        let params: Params = btree! { "hash" => "a/b?c#d e%".to_string() };
        assert_eq!(
            template.expand(&params).unwrap(),
            "/api/pages/blocked/a%2Fb%3Fc%23d%20e%25"
        );
    }

    #[test]
    fn plain_values_are_left_alone() {
        let template = UrlTemplate::new("/api/comics/{id}");
        let params: Params = btree! { "id" => "comic-42_v1.0~x".to_string() };
        assert_eq!(template.expand(&params).unwrap(), "/api/comics/comic-42_v1.0~x");
    }

    #[test]
    fn missing_value_is_an_error() {
        let template = UrlTemplate::new("/api/comics/{id}");
        let err = template.expand(&Params::new()).unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn extra_values_are_ignored() {
        let template = UrlTemplate::new("/api/comics/{id}");
        let params: Params = btree! {
            "id" => "1".to_string(),
            "unused" => "x".to_string(),
        };
        assert_eq!(template.expand(&params).unwrap(), "/api/comics/1");
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for bad in ["/api/{id", "/api/{}", "/api/id}", "/api/{a{b}"] {
            let template = UrlTemplate::new(bad);
            assert!(template.placeholders().is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn lists_placeholders_in_order() {
        let template = UrlTemplate::new("/a/{first}/b/{second}");
        assert_eq!(template.placeholders().unwrap(), vec!["first", "second"]);
    }
}
