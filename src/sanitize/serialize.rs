//! XHTML fragment serialization.
//!
//! Writes the arena back out as markup that an XML parser accepts:
//! void elements as `<tag attrs />`, every other element with an explicit
//! end tag, text and attribute values escaped, and characters that XML 1.0
//! forbids dropped.

use crate::dom::{ArenaDom, ArenaNodeData, ArenaNodeId, Attribute, is_void};
use crate::util::is_xml_char;

enum Step {
    Open(ArenaNodeId),
    Close(ArenaNodeId),
}

/// Serialize all children of the document root.
pub fn serialize_fragment(dom: &ArenaDom) -> String {
    let mut out = String::new();
    let mut stack: Vec<Step> = dom.children(dom.document()).map(Step::Open).collect();
    stack.reverse();

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                let Some(node) = dom.get(id) else {
                    continue;
                };
                match &node.data {
                    ArenaNodeData::Text(text) => escape_text_into(&mut out, text),
                    ArenaNodeData::Element { name, attrs } => {
                        out.push('<');
                        out.push_str(name);
                        write_attributes(&mut out, attrs);
                        if is_void(name) {
                            out.push_str(" />");
                            continue;
                        }
                        out.push('>');
                        stack.push(Step::Close(id));
                        let mut children: Vec<_> = dom.children(id).map(Step::Open).collect();
                        children.reverse();
                        stack.extend(children);
                    }
                    ArenaNodeData::Comment(_) | ArenaNodeData::Document => {}
                }
            }
            Step::Close(id) => {
                if let Some(name) = dom.element_name(id) {
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
            }
        }
    }

    out
}

fn write_attributes(out: &mut String, attrs: &[Attribute]) {
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attr_into(out, &attr.value);
        out.push('"');
    }
}

fn escape_text_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
}

fn escape_attr_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\r' => out.push_str("&#13;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
}
