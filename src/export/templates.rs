//! Fixed EPUB resources and archive paths.

/// Media type of an EPUB container, also the content of the `mimetype` entry.
pub const EPUB_MIME_TYPE: &str = "application/epub+zip";

pub const MIMETYPE_PATH: &str = "mimetype";
pub const CONTAINER_PATH: &str = "META-INF/container.xml";
pub const OPF_PATH: &str = "OEBPS/content.opf";
pub const NCX_PATH: &str = "OEBPS/toc.ncx";
pub const STYLESHEET_PATH: &str = "OEBPS/styles.css";
pub const DOCUMENT_PATH: &str = "OEBPS/content.xhtml";

/// Hrefs of the resources, relative to the package document.
pub const NCX_HREF: &str = "toc.ncx";
pub const STYLESHEET_HREF: &str = "styles.css";
pub const DOCUMENT_HREF: &str = "content.xhtml";

/// Language declared in the package metadata and on the document root.
pub const LANGUAGE: &str = "en";

/// Container.xml template.
pub const CONTAINER_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Stylesheet shipped with every article.
pub const STYLESHEET: &[u8] = br#"body {
  font-family: "Bookerly", "Amazon Ember", "Times New Roman", Times, serif;
  font-size: 1em;
  line-height: 1.5;
  margin: 1.5em 1em;
  text-align: left;
  color: #000;
  background: #fff;
}

h1, h2, h3, h4, h5, h6 {
  font-family: "Amazon Ember", "Helvetica Neue", Arial, sans-serif;
  font-weight: bold;
  line-height: 1.2;
  margin: 1.5em 0 0.75em 0;
}

h1 {
  font-size: 1.8em;
  margin-bottom: 0.5em;
  padding-bottom: 0.3em;
  border-bottom: 1px solid #ddd;
}

h2 { font-size: 1.5em; }
h3 { font-size: 1.3em; }
h4 { font-size: 1.1em; }

p {
  margin: 0 0 1em 0;
  text-align: justify;
  text-indent: 0;
  orphans: 2;
  widows: 2;
}

.byline {
  font-size: 0.95em;
  font-style: italic;
  color: #666;
  margin-bottom: 2em;
}

a {
  color: #0066cc;
  text-decoration: underline;
}

ul, ol {
  margin: 1em 0;
  padding-left: 2em;
}

li {
  margin: 0.5em 0;
}

blockquote {
  margin: 1.5em 2em;
  padding: 0.5em 1em;
  border-left: 3px solid #ddd;
  font-style: italic;
  background: #f9f9f9;
}

code {
  font-family: "Courier New", monospace;
  background: #f5f5f5;
  padding: 0.1em 0.3em;
  border-radius: 3px;
}

pre {
  white-space: pre-wrap;
}

strong, b {
  font-weight: bold;
}

em, i {
  font-style: italic;
}

.page-break {
  page-break-before: always;
}
"#;
