//! Package document, navigation map and content document generation.
//!
//! Everything here is a pure function of the article and the identifier.
//! Title and byline are plain text and are escaped before insertion; the
//! body fragment is trusted to be sanitized and goes in verbatim.

use std::borrow::Cow;

use quick_xml::escape::escape;

use crate::article::Article;

use super::templates::{DOCUMENT_HREF, LANGUAGE, NCX_HREF, STYLESHEET_HREF};

/// Escape the five XML special characters.
///
/// # Examples
///
/// ```
/// use web2epub::export::escape_xml;
///
/// assert_eq!(escape_xml(r#"A & B <"x"> 'y'"#), "A &amp; B &lt;&quot;x&quot;&gt; &apos;y&apos;");
/// ```
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Generate content.opf.
pub fn generate_opf(article: &Article, identifier: &str) -> String {
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId" version="2.0">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );

    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&article.title)
    ));
    opf.push_str(&format!(
        "    <dc:creator opf:role=\"aut\">{}</dc:creator>\n",
        escape_xml(&article.byline)
    ));
    opf.push_str(&format!("    <dc:language>{LANGUAGE}</dc:language>\n"));
    opf.push_str(&format!(
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>\n",
        escape_xml(identifier)
    ));
    opf.push_str("  </metadata>\n");

    // Manifest: navigation map, the document, the stylesheet
    opf.push_str("  <manifest>\n");
    opf.push_str(&format!(
        "    <item id=\"ncx\" href=\"{NCX_HREF}\" media-type=\"application/x-dtbncx+xml\"/>\n"
    ));
    opf.push_str(&format!(
        "    <item id=\"content\" href=\"{DOCUMENT_HREF}\" media-type=\"application/xhtml+xml\"/>\n"
    ));
    opf.push_str(&format!(
        "    <item id=\"css\" href=\"{STYLESHEET_HREF}\" media-type=\"text/css\"/>\n"
    ));
    opf.push_str("  </manifest>\n");

    opf.push_str("  <spine toc=\"ncx\">\n");
    opf.push_str("    <itemref idref=\"content\"/>\n");
    opf.push_str("  </spine>\n</package>\n");
    opf
}

/// Generate toc.ncx with a single navigation point.
pub fn generate_ncx(article: &Article, identifier: &str) -> String {
    let title = escape_xml(&article.title);
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
"#,
    );
    ncx.push_str(&format!(
        "    <meta name=\"dtb:uid\" content=\"{}\"/>\n",
        escape_xml(identifier)
    ));
    ncx.push_str(
        r#"    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
"#,
    );
    ncx.push_str(&format!(
        "  <docTitle>\n    <text>{title}</text>\n  </docTitle>\n"
    ));

    ncx.push_str("  <navMap>\n");
    ncx.push_str("    <navPoint id=\"navpoint-1\" playOrder=\"1\">\n");
    ncx.push_str(&format!(
        "      <navLabel>\n        <text>{title}</text>\n      </navLabel>\n"
    ));
    ncx.push_str(&format!("      <content src=\"{DOCUMENT_HREF}\"/>\n"));
    ncx.push_str("    </navPoint>\n  </navMap>\n</ncx>\n");
    ncx
}

/// Generate content.xhtml around the article body.
///
/// The byline paragraph is left out when the byline is empty.
pub fn generate_document(article: &Article) -> String {
    let title = escape_xml(&article.title);
    let mut doc = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="{LANGUAGE}">
<head>
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="{STYLESHEET_HREF}"/>
</head>
<body>
  <h1>{title}</h1>
"#
    );

    if !article.byline.is_empty() {
        doc.push_str(&format!(
            "  <p class=\"byline\">by {}</p>\n",
            escape_xml(&article.byline)
        ));
    }
    doc.push_str(&article.content);
    doc.push_str("\n</body>\n</html>\n");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article::new("A & B <Test>", "J. Doe", "<p>Hello</p><br />")
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello"), "Hello");
        assert_eq!(escape_xml("<script>"), "&lt;script&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"Say "hi""#), "Say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_opf_metadata_and_manifest() {
        let opf = generate_opf(&article(), "1700000000000");

        assert!(opf.contains("<dc:title>A &amp; B &lt;Test&gt;</dc:title>"));
        assert!(opf.contains(">J. Doe</dc:creator>"));
        assert!(opf.contains("<dc:language>en</dc:language>"));
        assert!(opf.contains(r#"<dc:identifier id="BookId">1700000000000</dc:identifier>"#));
        assert!(opf.contains(r#"href="toc.ncx" media-type="application/x-dtbncx+xml""#));
        assert!(opf.contains(r#"href="content.xhtml" media-type="application/xhtml+xml""#));
        assert!(opf.contains(r#"href="styles.css" media-type="text/css""#));
        assert!(opf.contains(r#"<itemref idref="content"/>"#));
    }

    #[test]
    fn test_ncx_uses_same_identifier_and_title() {
        let ncx = generate_ncx(&article(), "id-42");

        assert!(ncx.contains(r#"<meta name="dtb:uid" content="id-42"/>"#));
        assert_eq!(ncx.matches("<text>A &amp; B &lt;Test&gt;</text>").count(), 2);
        assert!(ncx.contains(r#"<content src="content.xhtml"/>"#));
    }

    #[test]
    fn test_document_structure() {
        let doc = generate_document(&article());

        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(doc.contains(r#"<html xmlns="http://www.w3.org/1999/xhtml""#));
        assert!(doc.contains("<title>A &amp; B &lt;Test&gt;</title>"));
        assert!(doc.contains(r#"<link rel="stylesheet" type="text/css" href="styles.css"/>"#));
        assert!(doc.contains("<h1>A &amp; B &lt;Test&gt;</h1>"));
        assert!(doc.contains(r#"<p class="byline">by J. Doe</p>"#));
        assert!(doc.contains("<p>Hello</p><br />"));
    }

    #[test]
    fn test_document_without_byline() {
        let doc = generate_document(&Article::new("T", "", "<p>x</p>"));
        assert!(!doc.contains("byline"));
    }

    #[test]
    fn test_byline_escaped() {
        let doc = generate_document(&Article::new("T", "Tom & \"Jerry\"", "<p>x</p>"));
        assert!(doc.contains("by Tom &amp; &quot;Jerry&quot;</p>"));
    }
}
