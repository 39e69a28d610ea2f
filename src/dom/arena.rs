//! Arena-based DOM for HTML fragments.
//!
//! All nodes live in one vector and link to each other by index. Removing a
//! node only unlinks it; its slot stays allocated until the arena is dropped,
//! which keeps every `ArenaNodeId` handed out during a sanitizer run valid.

use html5ever::LocalName;

/// Index of a node in its [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Stands in for a missing parent, sibling or child link.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        *self != Self::NONE
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// What a node holds.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    /// Fragment root.
    Document,
    /// Element with name and attributes in source order.
    Element {
        name: LocalName,
        attrs: Vec<Attribute>,
    },
    /// Text content, with character references already decoded.
    Text(String),
    Comment(String),
}

/// Attribute as written in the source, minus its quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: LocalName,
    pub value: String,
}

/// Node payload plus its tree links.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn unlinked(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// A parsed fragment: one document root and everything hanging off it.
#[derive(Debug)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    root: ArenaNodeId,
}

impl ArenaDom {
    /// An empty fragment holding only its root.
    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::unlinked(ArenaNodeData::Document)],
            root: ArenaNodeId(0),
        }
    }

    fn push(&mut self, data: ArenaNodeData) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(ArenaNode::unlinked(data));
        id
    }

    /// The fragment root. Top-level nodes of the input are its children.
    pub fn document(&self) -> ArenaNodeId {
        self.root
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    fn link(&self, id: ArenaNodeId, pick: fn(&ArenaNode) -> ArenaNodeId) -> ArenaNodeId {
        self.get(id).map(pick).unwrap_or(ArenaNodeId::NONE)
    }

    /// Allocate an element that is not yet part of the tree.
    pub fn create_element(&mut self, name: LocalName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.push(ArenaNodeData::Element { name, attrs })
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Comment(text))
    }

    /// Link `child` in as the last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let prev = self.link(parent, |n| n.last_child);

        if let Some(node) = self.node_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = ArenaNodeId::NONE;
        }
        if let Some(node) = self.node_mut(prev) {
            node.next_sibling = child;
        }
        if let Some(node) = self.node_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = child;
            }
            node.last_child = child;
        }
    }

    /// Add text under `parent`, extending its last child when that is
    /// already a text node so adjacent runs stay one node.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last = self.link(parent, |n| n.last_child);
        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.node_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    /// Unlink a node (and with it, its whole subtree) from its parent.
    pub fn detach(&mut self, target: ArenaNodeId) {
        let Some(node) = self.get(target) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        match self.node_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.node_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.node_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.node_mut(parent) {
                    p.last_child = prev;
                }
            }
        }

        if let Some(node) = self.node_mut(target) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Direct children of `parent`, first to last.
    pub fn children(&self, parent: ArenaNodeId) -> Children<'_> {
        Children {
            dom: self,
            next: self.link(parent, |n| n.first_child),
        }
    }

    /// All nodes below `root` in document order (excluding `root`).
    pub fn descendants(&self, root: ArenaNodeId) -> Vec<ArenaNodeId> {
        let mut out = Vec::new();
        let mut pending: Vec<_> = self.children(root).collect();
        pending.reverse();
        while let Some(id) = pending.pop() {
            out.push(id);
            let before = pending.len();
            pending.extend(self.children(id));
            pending[before..].reverse();
        }
        out
    }

    /// First node below `root`, in document order, that satisfies `predicate`.
    pub fn find_within<F>(&self, root: ArenaNodeId, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// First element in the fragment with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find_within(self.root, |node| {
            matches!(&node.data, ArenaNodeData::Element { name, .. } if name.as_ref() == tag)
        })
    }

    /// Concatenated text of every text node below `root`.
    pub fn text_of(&self, root: ArenaNodeId) -> String {
        self.descendants(root)
            .into_iter()
            .filter_map(|id| self.text_content(id))
            .collect()
    }

    /// True when nothing is attached to the root.
    pub fn is_empty(&self) -> bool {
        self.link(self.root, |n| n.first_child).is_none()
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`ArenaDom::children`].
pub struct Children<'a> {
    dom: &'a ArenaDom,
    next: ArenaNodeId,
}

impl Iterator for Children<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<ArenaNodeId> {
        let id = self.next;
        let node = self.dom.get(id)?;
        self.next = node.next_sibling;
        Some(id)
    }
}

// Element and text accessors.
impl ArenaDom {
    /// Tag name, or `None` for anything but an element.
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        match &self.get(id)?.data {
            ArenaNodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// True for an element whose tag is one of `tags`.
    pub fn is_element_named(&self, id: ArenaNodeId, tags: &[&str]) -> bool {
        self.element_name(id)
            .is_some_and(|name| tags.contains(&name.as_ref()))
    }

    pub fn is_comment(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Comment(_)))
    }

    /// Text of a text node; `None` for every other kind.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(dom: &mut ArenaDom, tag: &str) -> ArenaNodeId {
        dom.create_element(LocalName::from(tag), Vec::new())
    }

    #[test]
    fn test_element_lookup() {
        let mut dom = ArenaDom::new();
        let section = dom.create_element(
            LocalName::from("section"),
            vec![Attribute {
                name: LocalName::from("id"),
                value: "main".to_string(),
            }],
        );
        let root = dom.document();
        dom.append(root, section);

        assert_eq!(dom.element_name(section).map(|n| &**n), Some("section"));
        assert_eq!(dom.get_attr(section, "id"), Some("main"));
        assert_eq!(dom.get_attr(section, "class"), None);
        assert_eq!(dom.find_by_tag("section"), Some(section));
        assert_eq!(dom.element_name(root), None);
    }

    #[test]
    fn test_children_in_append_order() {
        let mut dom = ArenaDom::new();
        let root = dom.document();
        let list = element(&mut dom, "ul");
        let items: Vec<_> = (0..3).map(|_| element(&mut dom, "li")).collect();

        dom.append(root, list);
        for &item in &items {
            dom.append(list, item);
        }

        assert_eq!(dom.children(list).collect::<Vec<_>>(), items);
        assert_eq!(dom.get(items[1]).map(|n| n.parent), Some(list));
    }

    #[test]
    fn test_adjacent_text_runs_merge() {
        let mut dom = ArenaDom::new();
        let root = dom.document();
        let em = element(&mut dom, "em");
        dom.append(root, em);

        dom.append_text(em, "half ");
        dom.append_text(em, "and half");

        let kids: Vec<_> = dom.children(em).collect();
        assert_eq!(kids.len(), 1);
        assert_eq!(dom.text_content(kids[0]), Some("half and half"));
    }

    #[test]
    fn test_detach_relinks_siblings() {
        let mut dom = ArenaDom::new();
        let root = dom.document();

        let a = element(&mut dom, "a");
        let b = element(&mut dom, "b");
        let c = element(&mut dom, "i");
        dom.append(root, a);
        dom.append(root, b);
        dom.append(root, c);

        dom.detach(b);
        assert_eq!(dom.children(root).collect::<Vec<_>>(), vec![a, c]);

        dom.detach(a);
        dom.detach(c);
        assert!(dom.is_empty());

        // Re-appending after a full detach works from a clean slate.
        dom.append(root, b);
        assert_eq!(dom.children(root).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_text_of_and_descendants_order() {
        let mut dom = ArenaDom::new();
        let root = dom.document();

        let div = element(&mut dom, "div");
        let p = element(&mut dom, "p");
        dom.append(root, div);
        dom.append_text(div, "one ");
        dom.append(div, p);
        dom.append_text(p, "two");
        dom.append_text(div, " three");

        assert_eq!(dom.text_of(root), "one two three");
        let order = dom.descendants(root);
        assert_eq!(order[0], div);
        assert_eq!(order[2], p);
    }
}
