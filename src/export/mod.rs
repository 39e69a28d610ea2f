//! Export module for packaging articles as EPUB.
//!
//! # Architecture
//!
//! [`EpubExporter`] uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination, `package()`
//!   returns the finished archive as bytes
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//!
//! use web2epub::Article;
//! use web2epub::export::EpubExporter;
//!
//! let article = Article::new("Title", "Author", "<p>Body</p>");
//! let mut file = File::create("output.epub")?;
//! EpubExporter::new().export(&article, &mut file)?;
//! # Ok::<(), web2epub::Error>(())
//! ```

mod epub;
mod templates;
mod xhtml;

pub use epub::{
    EpubConfig, EpubExporter, content_disposition, package, write_epub, write_epub_to_writer,
};
pub use templates::{EPUB_MIME_TYPE, LANGUAGE};
pub use xhtml::{escape_xml, generate_document, generate_ncx, generate_opf};
