//! EPUB exporter.
//!
//! Writes one article as an EPUB 2 container. Entries go out in a fixed
//! order, and the first one is always the uncompressed `mimetype`: readers
//! sniff the format from that entry's position and raw bytes.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use tracing::{debug, trace};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::article::Article;
use crate::error::Result;
use crate::util::{suggested_filename, time_now_millis};

use super::templates::{
    CONTAINER_PATH, CONTAINER_XML, DOCUMENT_PATH, EPUB_MIME_TYPE, MIMETYPE_PATH, NCX_PATH,
    OPF_PATH, STYLESHEET, STYLESHEET_PATH,
};
use super::xhtml::{generate_document, generate_ncx, generate_opf};

/// Configuration for EPUB export.
#[derive(Debug, Clone, Default)]
pub struct EpubConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
    /// Identifier for `dc:identifier` and `dtb:uid`. When unset, the
    /// current time in milliseconds is used, which is only unique per
    /// packaging call.
    pub identifier: Option<String>,
}

/// EPUB format exporter.
///
/// # Example
///
/// ```
/// use web2epub::Article;
/// use web2epub::export::{EpubConfig, EpubExporter};
///
/// let article = Article::new("Title", "Author", "<p>Body</p>");
/// let bytes = EpubExporter::new()
///     .with_config(EpubConfig {
///         identifier: Some("urn:example:1".to_string()),
///         ..Default::default()
///     })
///     .package(&article)?;
/// assert_eq!(&bytes[30..38], b"mimetype");
/// # Ok::<(), web2epub::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpubExporter {
    config: EpubConfig,
}

impl EpubExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: EpubConfig) -> Self {
        self.config = config;
        self
    }

    /// Package the article into an in-memory EPUB.
    ///
    /// The returned bytes are only produced once the archive has been
    /// finalized, so a failure never yields a truncated file.
    pub fn package(&self, article: &Article) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.export(article, &mut buffer)?;
        Ok(buffer.into_inner())
    }

    /// Write the article as an EPUB to any `Write + Seek` destination.
    ///
    /// Returns once the central directory has been written. Any error from
    /// the destination or the archive encoder is returned as-is; the
    /// destination then holds an unusable partial archive and should be
    /// discarded.
    pub fn export<W: Write + Seek>(&self, article: &Article, writer: &mut W) -> Result<()> {
        let identifier = self
            .config
            .identifier
            .clone()
            .unwrap_or_else(|| time_now_millis().to_string());

        let compression_level = self.config.compression_level.unwrap_or(6).min(9);
        let stored = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default());
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64))
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(writer);

        // 1. Write mimetype (must be first, uncompressed)
        zip.start_file(MIMETYPE_PATH, stored)?;
        zip.write_all(EPUB_MIME_TYPE.as_bytes())?;
        trace!(entry = MIMETYPE_PATH, "wrote entry");

        // 2. Write container.xml
        zip.start_file(CONTAINER_PATH, deflated)?;
        zip.write_all(CONTAINER_XML)?;
        trace!(entry = CONTAINER_PATH, "wrote entry");

        // 3. Write content.opf
        let opf = generate_opf(article, &identifier);
        zip.start_file(OPF_PATH, deflated)?;
        zip.write_all(opf.as_bytes())?;
        trace!(entry = OPF_PATH, "wrote entry");

        // 4. Write toc.ncx
        let ncx = generate_ncx(article, &identifier);
        zip.start_file(NCX_PATH, deflated)?;
        zip.write_all(ncx.as_bytes())?;
        trace!(entry = NCX_PATH, "wrote entry");

        // 5. Write stylesheet
        zip.start_file(STYLESHEET_PATH, deflated)?;
        zip.write_all(STYLESHEET)?;
        trace!(entry = STYLESHEET_PATH, "wrote entry");

        // 6. Write the content document
        let document = generate_document(article);
        zip.start_file(DOCUMENT_PATH, deflated)?;
        zip.write_all(document.as_bytes())?;
        trace!(entry = DOCUMENT_PATH, "wrote entry");

        let archive_len = zip.finish()?.stream_position()?;
        debug!(
            title = %article.title,
            identifier = %identifier,
            document_len = document.len(),
            archive_len,
            "packaged epub"
        );
        Ok(())
    }
}

/// Package an article into EPUB bytes with the default configuration.
pub fn package(article: &Article) -> Result<Vec<u8>> {
    EpubExporter::new().package(article)
}

/// Write an article as an EPUB file on disk.
///
/// The archive is built in memory first, so a packaging failure leaves no
/// file behind.
pub fn write_epub<P: AsRef<Path>>(article: &Article, path: P) -> Result<()> {
    let bytes = package(article)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write an article as an EPUB to any [`Write`] + [`Seek`] destination.
pub fn write_epub_to_writer<W: Write + Seek>(article: &Article, writer: &mut W) -> Result<()> {
    EpubExporter::new().export(article, writer)
}

/// `Content-Disposition` header value for serving the article's EPUB.
///
/// ```
/// use web2epub::export::content_disposition;
///
/// assert_eq!(content_disposition("My Post"), r#"attachment; filename="My_Post.epub""#);
/// ```
pub fn content_disposition(title: &str) -> String {
    format!("attachment; filename=\"{}\"", suggested_filename(title))
}

#[cfg(test)]
mod tests {
    use std::io::{self, Read};

    use zip::ZipArchive;

    use super::*;

    fn article() -> Article {
        Article::new("A & B <Test>", "J. Doe", "<p>Hello</p><br />")
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_entry_order_and_mimetype() {
        let bytes = package(&article()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();

        let names: Vec<_> = archive.file_names().map(str::to_string).collect();
        assert_eq!(names.len(), 6);

        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        drop(first);

        let expected = [
            MIMETYPE_PATH,
            CONTAINER_PATH,
            OPF_PATH,
            NCX_PATH,
            STYLESHEET_PATH,
            DOCUMENT_PATH,
        ];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(archive.by_index(i).unwrap().name(), *name);
        }

        assert_eq!(read_entry(&bytes, "mimetype"), "application/epub+zip");
    }

    #[test]
    fn test_mimetype_bytes_at_start_of_file() {
        let bytes = package(&article()).unwrap();
        // Local file header signature, then name at offset 30 and the raw
        // content right after it.
        assert_eq!(&bytes[0..4], b"PK\x03\x04");
        assert_eq!(&bytes[30..38], b"mimetype");
        assert_eq!(&bytes[38..58], b"application/epub+zip");
    }

    #[test]
    fn test_identifier_shared_between_opf_and_ncx() {
        let exporter = EpubExporter::new().with_config(EpubConfig {
            identifier: Some("urn:test:7".to_string()),
            ..Default::default()
        });
        let bytes = exporter.package(&article()).unwrap();

        assert!(read_entry(&bytes, OPF_PATH).contains(">urn:test:7</dc:identifier>"));
        assert!(read_entry(&bytes, NCX_PATH).contains(r#"content="urn:test:7""#));
    }

    #[test]
    fn test_generated_identifier_is_timestamp() {
        let bytes = package(&article()).unwrap();
        let opf = read_entry(&bytes, OPF_PATH);
        let start = opf.find("<dc:identifier id=\"BookId\">").unwrap() + 27;
        let end = opf[start..].find('<').unwrap() + start;
        let id = &opf[start..end];
        assert!(id.parse::<u64>().is_ok(), "identifier {id:?}");
        assert!(read_entry(&bytes, NCX_PATH).contains(&format!("content=\"{id}\"")));
    }

    #[test]
    fn test_fixed_identifier_is_deterministic() {
        let exporter = EpubExporter::new().with_config(EpubConfig {
            identifier: Some("same".to_string()),
            ..Default::default()
        });
        let a = exporter.package(&article()).unwrap();
        let b = exporter.package(&article()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_document() {
        let bytes = package(&article()).unwrap();
        let doc = read_entry(&bytes, DOCUMENT_PATH);
        assert!(doc.contains("<h1>A &amp; B &lt;Test&gt;</h1>"));
        assert!(doc.contains("by J. Doe"));
        assert!(doc.contains("<p>Hello</p><br />"));
    }

    /// Writer that accepts a fixed number of bytes, then fails.
    struct FailingWriter {
        inner: Cursor<Vec<u8>>,
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.inner.get_ref().len() + buf.len() > self.budget {
                return Err(io::Error::other("disk full"));
            }
            self.inner.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for FailingWriter {
        fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut writer = FailingWriter {
            inner: Cursor::new(Vec::new()),
            budget: 64,
        };
        let result = EpubExporter::new().export(&article(), &mut writer);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("A & B <Test>"),
            r#"attachment; filename="A___B__Test_.epub""#
        );
    }
}
