//! Empty wrapper removal.

use crate::dom::{ArenaDom, ArenaNodeId};

use super::pass::walk_bottom_up;

/// Structural wrappers that may be pruned.
const WRAPPERS: &[&str] = &["p", "div"];

/// Void elements whose presence keeps a wrapper alive.
const CONTENT_VOIDS: &[&str] = &["img", "br", "hr"];

/// Remove `<p>` and `<div>` elements with no visible text and no
/// image, line break or rule anywhere inside them.
///
/// Runs bottom-up so that `<div><p> </p></div>` disappears entirely.
/// Returns the number of wrappers removed.
pub fn prune_empty_wrappers(dom: &mut ArenaDom) -> usize {
    let mut removed = 0;
    walk_bottom_up(dom, |dom, id| {
        if is_empty_wrapper(dom, id) {
            dom.detach(id);
            removed += 1;
        }
    });
    removed
}

fn is_empty_wrapper(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    if !dom.is_element_named(id, WRAPPERS) {
        return false;
    }
    if !dom.text_of(id).trim().is_empty() {
        return false;
    }
    dom.find_within(id, |node| {
        matches!(&node.data, crate::dom::ArenaNodeData::Element { name, .. }
            if CONTENT_VOIDS.contains(&name.as_ref()))
    })
    .is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    fn count(dom: &ArenaDom, tag: &str) -> usize {
        dom.descendants(dom.document())
            .into_iter()
            .filter(|&id| dom.is_element_named(id, &[tag]))
            .count()
    }

    #[test]
    fn test_prune_empty_paragraph() {
        let mut dom = parse_fragment("<p></p><p>text</p>");
        assert_eq!(prune_empty_wrappers(&mut dom), 1);
        assert_eq!(count(&dom, "p"), 1);
    }

    #[test]
    fn test_prune_whitespace_and_nbsp() {
        let mut dom = parse_fragment("<p>   </p><div>&nbsp;\n</div>");
        assert_eq!(prune_empty_wrappers(&mut dom), 2);
        assert!(dom.is_empty());
    }

    #[test]
    fn test_prune_cascades() {
        let mut dom = parse_fragment("<div><div><p> </p><span></span></div></div>");
        prune_empty_wrappers(&mut dom);
        assert!(dom.is_empty());
    }

    #[test]
    fn test_keep_wrapper_with_break() {
        let mut dom = parse_fragment("<p><br></p><div><span><hr></span></div>");
        assert_eq!(prune_empty_wrappers(&mut dom), 0);
    }

    #[test]
    fn test_keep_non_wrappers() {
        let mut dom = parse_fragment("<span></span><section></section>");
        assert_eq!(prune_empty_wrappers(&mut dom), 0);
    }
}
