//! Module dedicated to HTML sanitization.
//!
//! Email bodies come from the archive as raw markup and must never be
//! rendered as is. The [`Sanitize`] trait is the seam where another
//! HTML sanitizer can be plugged in; [`DefaultSanitizer`] relies on
//! [`ammonia`].

use std::collections::HashSet;

use tracing::trace;

/// Elements removed together with their content.
pub const FORBIDDEN_ELEMENTS: [&str; 8] = [
    "script", "iframe", "object", "embed", "applet", "meta", "link", "style",
];

/// The only URL schemes links and images may use.
pub const ALLOWED_URL_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// The HTML sanitizer trait.
pub trait Sanitize {
    /// Returns a version of the given markup safe to render.
    fn sanitize(&self, html: &str) -> String;
}

impl<F: Fn(&str) -> String> Sanitize for F {
    fn sanitize(&self, html: &str) -> String {
        self(html)
    }
}

/// The default sanitizer, based on the [`ammonia`] allow-list.
///
/// Event handler attributes are not part of the allow-list, so they
/// are always dropped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultSanitizer;

impl Sanitize for DefaultSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let html = ammonia::Builder::default()
            .rm_tags(FORBIDDEN_ELEMENTS)
            .add_clean_content_tags(FORBIDDEN_ELEMENTS)
            .url_schemes(HashSet::from(ALLOWED_URL_SCHEMES))
            .link_rel(None)
            .clean(html)
            .to_string();

        trace!("sanitized html: {html}");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultSanitizer, Sanitize};

    fn sanitize(html: &str) -> String {
        DefaultSanitizer.sanitize(html)
    }

    #[test]
    fn keeps_plain_markup() {
        let html = r#"<p>Hello <a href="https://enron.com">Enron</a></p>"#;
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn removes_forbidden_elements() {
        assert_eq!(
            sanitize("<p>a</p><SCRIPT type=\"text/javascript\">alert(1)</script><p>b</p>"),
            "<p>a</p><p>b</p>"
        );
        assert_eq!(
            sanitize("<style>p{}</style><iframe src=x></iframe>text"),
            "text"
        );
        assert_eq!(sanitize("<meta charset=utf-8><embed src=x>text"), "text");
    }

    #[test]
    fn removes_event_handlers() {
        assert_eq!(
            sanitize(r#"<img src="a.png" onerror="alert(1)" ONLOAD='x'>"#),
            r#"<img src="a.png">"#
        );
    }

    #[test]
    fn removes_dangerous_urls() {
        assert_eq!(
            sanitize(r#"<a href="javascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize(r#"<img src='data:image/png;base64,AAA'>"#),
            "<img>"
        );
        assert_eq!(sanitize("<a href=vbscript:x>x</a>"), "<a>x</a>");
    }

    #[test]
    fn removes_handlers_without_leading_space() {
        assert_eq!(sanitize("<svg/onload=alert(1)>"), "");
        assert_eq!(sanitize("<p/onclick=alert(1)>a</p>"), "<p>a</p>");
    }

    #[test]
    fn removes_entity_encoded_urls() {
        assert_eq!(
            sanitize(r#"<a href="&#106;avascript:alert(1)">x</a>"#),
            "<a>x</a>"
        );
        assert_eq!(
            sanitize(r#"<a href="mailto:kenneth.lay@enron.com">Ken</a>"#),
            r#"<a href="mailto:kenneth.lay@enron.com">Ken</a>"#
        );
    }

    #[test]
    fn closures_are_sanitizers() {
        let upper = |html: &str| html.to_uppercase();
        assert_eq!(upper.sanitize("<p>"), "<P>");
    }
}
