//! Tree traversal utilities for sanitizer passes.

use crate::dom::{ArenaDom, ArenaNodeId};

/// Detach every node matching `predicate`, top-down.
///
/// A matching node is removed with its whole subtree, so the walk never
/// descends into it. Returns the number of subtrees removed.
pub fn remove_where<F>(dom: &mut ArenaDom, predicate: F) -> usize
where
    F: Fn(&ArenaDom, ArenaNodeId) -> bool,
{
    let mut removed = 0;
    let mut stack: Vec<_> = dom.children(dom.document()).collect();
    stack.reverse();

    while let Some(id) = stack.pop() {
        if predicate(dom, id) {
            dom.detach(id);
            removed += 1;
            continue;
        }
        let mut children: Vec<_> = dom.children(id).collect();
        children.reverse();
        stack.extend(children);
    }

    removed
}

/// Walk the tree bottom-up and call visitor at each node.
///
/// Children are visited before their parents, so a pass can remove a
/// child and then see its parent in the emptied state. The walk is
/// iterative: reversed pre-order puts every node after its descendants.
pub fn walk_bottom_up<F>(dom: &mut ArenaDom, mut visitor: F)
where
    F: FnMut(&mut ArenaDom, ArenaNodeId),
{
    let order = dom.descendants(dom.document());
    for id in order.into_iter().rev() {
        visitor(dom, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment;

    #[test]
    fn test_remove_where_counts_subtrees_once() {
        let mut dom = parse_fragment("<div><span>a</span><span>b</span></div><span>c</span>");

        let removed = remove_where(&mut dom, |dom, id| {
            dom.is_element_named(id, &["div", "span"])
        });

        // The nested spans go with their div.
        assert_eq!(removed, 2);
        assert!(dom.is_empty());
    }

    #[test]
    fn test_walk_bottom_up_visits_children_first() {
        let mut dom = parse_fragment("<div><p>x</p></div>");
        let mut seen = Vec::new();

        walk_bottom_up(&mut dom, |dom, id| {
            if let Some(name) = dom.element_name(id) {
                seen.push(name.to_string());
            }
        });

        assert_eq!(seen, vec!["p", "div"]);
    }
}
