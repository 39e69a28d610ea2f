//! # web2epub
//!
//! Package web articles as EPUB ebooks.
//!
//! An external extractor supplies a title, a byline and the article body as
//! an HTML fragment. This crate turns that into a single-document EPUB 2
//! file in two steps:
//!
//! 1. [`sanitize`] repairs the fragment into markup an XML parser accepts:
//!    no scripts, styles or comments, void elements self-closed, bare `&`
//!    escaped, empty wrappers pruned.
//! 2. [`package`] assembles the container: an uncompressed `mimetype`
//!    entry first, then the container pointer, package document,
//!    navigation map, stylesheet and the XHTML document.
//!
//! ## Quick Start
//!
//! ```
//! use web2epub::{Article, ExtractedArticle, package, suggested_filename};
//!
//! let article = Article::from_extracted(ExtractedArticle {
//!     title: "Hello".to_string(),
//!     byline: Some("Jane Doe".to_string()),
//!     content: "<p>Hi & bye<br></p><script>track()</script>".to_string(),
//! });
//! assert_eq!(article.content, "<p>Hi &amp; bye<br /></p>");
//!
//! let bytes = package(&article)?;
//! assert!(!bytes.is_empty());
//! assert_eq!(suggested_filename(&article.title), "Hello.epub");
//! # Ok::<(), web2epub::Error>(())
//! ```

pub mod article;
pub mod dom;
pub mod error;
pub mod export;
pub mod sanitize;
pub(crate) mod util;

pub use article::{Article, ExtractedArticle};
pub use error::{Error, Result};
pub use export::{
    EPUB_MIME_TYPE, EpubConfig, EpubExporter, content_disposition, package, write_epub,
    write_epub_to_writer,
};
pub use sanitize::{SanitizeConfig, Sanitizer, sanitize};
pub use util::suggested_filename;
