//! Markup sanitizer for article fragments.
//!
//! Turns whatever HTML the extractor produced into a fragment that can be
//! pasted into an XHTML document without breaking it. The sanitizer is
//! total: malformed input is repaired or dropped, never rejected.
//!
//! ## Pipeline Order
//!
//! 1. **Parse** - Tokenize and build a tolerant tree (stray end tags
//!    dropped, void end tags absorbed, unclosed elements closed)
//! 2. **Scripts/Styles** - Remove `<script>` and `<style>` subtrees
//! 3. **Comments** - Remove comment nodes
//! 4. **Namespaced** - Remove unnamed or prefixed elements such as `<o:p>`
//! 5. **Media** - Remove images, figures and captions (opt-in)
//! 6. **Pruner** - Remove `<p>`/`<div>` wrappers left empty by the above
//! 7. **Serialize** - Self-close void elements, escape text and attributes
//!
//! # Example
//!
//! ```
//! use web2epub::sanitize;
//!
//! let clean = sanitize("<p>Fish & chips<br></p><script>track()</script><p></p>");
//! assert_eq!(clean, "<p>Fish &amp; chips<br /></p>");
//! ```

mod pass;
mod prune;
mod serialize;
mod strip;

use tracing::debug;

use crate::dom::parse_fragment;

/// Configuration for the sanitizer.
#[derive(Debug, Clone, Default)]
pub struct SanitizeConfig {
    /// Also remove `<img>`, `<figure>`, `<figcaption>` and elements whose
    /// class mentions an image, photo or caption.
    pub strip_media: bool,
}

/// Markup sanitizer.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    config: SanitizeConfig,
}

impl Sanitizer {
    /// Create a sanitizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the sanitizer with custom settings.
    pub fn with_config(mut self, config: SanitizeConfig) -> Self {
        self.config = config;
        self
    }

    /// Sanitize an HTML fragment.
    pub fn sanitize(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let mut dom = parse_fragment(html);

        let scripts = strip::strip_scripts_and_styles(&mut dom);
        let comments = strip::strip_comments(&mut dom);
        let namespaced = strip::strip_namespaced(&mut dom);
        let media = if self.config.strip_media {
            strip::strip_media(&mut dom)
        } else {
            0
        };
        let pruned = prune::prune_empty_wrappers(&mut dom);

        let out = serialize::serialize_fragment(&dom);
        debug!(
            input_len = html.len(),
            output_len = out.len(),
            scripts,
            comments,
            namespaced,
            media,
            pruned,
            "sanitized fragment"
        );
        out
    }
}

/// Sanitize an HTML fragment with the default configuration.
///
/// The result has no scripts, styles or comments, every void element in
/// `<tag attrs />` form, no bare `&`, and no empty `<p>`/`<div>` wrappers.
/// Sanitizing the output again returns it unchanged.
pub fn sanitize(html: &str) -> String {
    Sanitizer::new().sanitize(html)
}

/// Visible text of an HTML fragment.
///
/// Script and style bodies and comments are not text; character
/// references are decoded.
pub fn text_content(html: &str) -> String {
    let mut dom = parse_fragment(html);
    strip::strip_scripts_and_styles(&mut dom);
    strip::strip_comments(&mut dom);
    dom.text_of(dom.document())
}
