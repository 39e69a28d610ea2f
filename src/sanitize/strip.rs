//! Removal passes: scripts, styles, comments, namespaced elements, media.

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::util::is_xml_name;

use super::pass::remove_where;

/// Elements removed together with everything inside them.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Image-bearing elements dropped when media stripping is on.
const MEDIA_ELEMENTS: &[&str] = &["img", "figure", "figcaption"];

/// Class substrings that mark an element as image chrome.
const MEDIA_CLASS_HINTS: &[&str] = &["image", "photo", "caption"];

/// Remove `<script>` and `<style>` subtrees.
pub fn strip_scripts_and_styles(dom: &mut ArenaDom) -> usize {
    remove_where(dom, |dom, id| dom.is_element_named(id, RAW_TEXT_ELEMENTS))
}

/// Remove comment nodes.
pub fn strip_comments(dom: &mut ArenaDom) -> usize {
    remove_where(dom, |dom, id| dom.is_comment(id))
}

/// Remove elements with no tag name, a prefixed one like `<o:p>`, or one
/// the tokenizer salvaged from broken markup (`<a<b>` names `a<b`).
///
/// The fragment is embedded without namespace declarations, so an
/// undeclared prefix would make the whole document unreadable.
pub fn strip_namespaced(dom: &mut ArenaDom) -> usize {
    remove_where(dom, |dom, id| {
        dom.element_name(id)
            .is_some_and(|name| name.contains(':') || !is_xml_name(name))
    })
}

/// Remove images, figures, captions and anything classed like them.
pub fn strip_media(dom: &mut ArenaDom) -> usize {
    remove_where(dom, is_media)
}

fn is_media(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    if dom.is_element_named(id, MEDIA_ELEMENTS) {
        return true;
    }
    dom.get_attr(id, "class")
        .is_some_and(|class| MEDIA_CLASS_HINTS.iter().any(|hint| class.contains(hint)))
}
