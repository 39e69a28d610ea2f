//! html5ever TokenSink that builds an ArenaDom without tree-construction rewrites.
//!
//! The HTML5 tree builder would hoist, reparent and invent elements (and turn
//! `</br>` into a second `<br>`). Article fragments only need a tolerant
//! stack of open elements, so the sink consumes raw tokens instead:
//!
//! - a start tag opens an element unless it is void or self-closed;
//! - an end tag closes the innermost open element with the same name, and
//!   anything opened inside it;
//! - an end tag with no matching open element is dropped;
//! - elements still open at end of input are closed implicitly.

use std::cell::RefCell;

use html5ever::LocalName;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::arena::{ArenaDom, ArenaNodeId, Attribute};
use crate::util::is_xml_name;

/// Elements that never have content and serialize as `<tag />`.
pub const VOID_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

/// Start tags that implicitly close a `<p>` left open directly above them.
const CLOSES_PARAGRAPH: &[&str] = &[
    "p",
    "div",
    "ul",
    "ol",
    "dl",
    "table",
    "blockquote",
    "pre",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "section",
    "article",
    "aside",
    "header",
    "footer",
    "figure",
    "hr",
];

/// Check whether a tag name is a void element.
pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Document-level tags that a fragment may carry over from a full page.
/// The tags themselves are dropped; their content stays in place.
const DOCUMENT_TAGS: &[&str] = &["html", "head", "body"];

/// Tokenizer state to switch to after a start tag, for elements whose
/// content is not markup.
///
/// Script and style bodies are never serialized, so they can stay raw.
/// Every other element keeps decoded text, otherwise a second pass would
/// escape its `&` again.
fn raw_kind(name: &str) -> Option<RawKind> {
    match name {
        "script" => Some(RawKind::ScriptData),
        "style" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

/// Attributes kept on elements: valid XML names without a namespace
/// prefix, except the predeclared `xml:` one. A default namespace
/// declaration would move the subtree out of XHTML, so `xmlns` goes too.
fn keep_attribute(name: &str) -> bool {
    if !is_xml_name(name) || name == "xmlns" {
        return false;
    }
    match name.split_once(':') {
        None => true,
        Some((prefix, local)) => prefix == "xml" && !local.is_empty() && !local.contains(':'),
    }
}

/// Stack-based builder fed by the token sink.
#[derive(Default)]
struct FragmentBuilder {
    dom: ArenaDom,
    open: Vec<ArenaNodeId>,
}

impl FragmentBuilder {
    fn current(&self) -> ArenaNodeId {
        self.open.last().copied().unwrap_or(self.dom.document())
    }

    /// Insert an element; returns true if it was left open.
    fn start_tag(&mut self, tag: Tag) -> bool {
        if DOCUMENT_TAGS.contains(&tag.name.as_ref()) {
            return false;
        }
        let void = is_void(&tag.name);

        if CLOSES_PARAGRAPH.contains(&tag.name.as_ref())
            && self.dom.is_element_named(self.current(), &["p"])
        {
            self.open.pop();
        }
        if tag.name.as_ref() == "li" && self.dom.is_element_named(self.current(), &["li"]) {
            self.open.pop();
        }

        let attrs = tag
            .attrs
            .into_iter()
            .filter(|a| keep_attribute(&a.name.local))
            .map(|a| Attribute {
                name: a.name.local,
                value: a.value.to_string(),
            })
            .collect();

        let id = self.dom.create_element(tag.name, attrs);
        let parent = self.current();
        self.dom.append(parent, id);

        if void || tag.self_closing {
            return false;
        }
        self.open.push(id);
        true
    }

    fn end_tag(&mut self, name: &LocalName) {
        if is_void(name) {
            // `</br>` and friends: the start tag already produced the element.
            return;
        }
        let matching = self
            .open
            .iter()
            .rposition(|&id| self.dom.element_name(id) == Some(name));
        if let Some(pos) = matching {
            self.open.truncate(pos);
        }
    }

    fn text(&mut self, text: &str) {
        let parent = self.current();
        self.dom.append_text(parent, text);
    }

    fn comment(&mut self, text: String) {
        let parent = self.current();
        let id = self.dom.create_comment(text);
        self.dom.append(parent, id);
    }
}

/// TokenSink implementation that builds an ArenaDom.
///
/// Uses interior mutability (RefCell) because html5ever's TokenSink trait
/// takes `&self` but we need to mutate the DOM.
#[derive(Default)]
pub struct ArenaTokenSink {
    builder: RefCell<FragmentBuilder>,
}

impl ArenaTokenSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the DOM built so far, leaving an empty one behind.
    pub fn take_dom(&self) -> ArenaDom {
        self.builder.take().dom
    }
}

impl TokenSink for ArenaTokenSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let mut builder = self.builder.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    let raw = raw_kind(&tag.name);
                    if builder.start_tag(tag)
                        && let Some(kind) = raw
                    {
                        return TokenSinkResult::RawData(kind);
                    }
                }
                TagKind::EndTag => builder.end_tag(&tag.name),
            },
            Token::CharacterTokens(text) => builder.text(&text),
            Token::CommentToken(text) => builder.comment(text.to_string()),
            // NUL characters, doctypes, parse errors and EOF carry nothing
            // worth keeping in a body fragment.
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Parse an HTML fragment into an arena DOM.
///
/// Never fails: malformed markup degrades into text or is dropped, the way
/// the HTML tokenizer recovers from it. Character references are decoded.
pub fn parse_fragment(html: &str) -> ArenaDom {
    let tokenizer = Tokenizer::new(ArenaTokenSink::new(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.take_dom()
}
