//! Shared element tree.
//!
//! A [`Document`] is a cheap-to-clone handle. Every clone sees the same tree
//! and the same listener table, so components can keep a handle and mutate
//! the tree from inside event listeners.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{ElementBuilder, ElementData, NodeId};
use crate::error::{DomError, Result};
use crate::event::ListenerTable;

#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: Vec<ElementData>,
}

impl Tree {
    pub(crate) fn get(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0)
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    fn insert(&mut self, data: ElementData) -> NodeId {
        self.nodes.push(data);
        NodeId(self.nodes.len() - 1)
    }

    /// True if `node` is `ancestor` or lies inside its subtree.
    pub(crate) fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub(crate) fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.get(id) {
            Some(data) => data.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(data) = self.get(node) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(data) = self.get_mut(parent) {
            data.children.retain(|c| *c != id);
        }
        if let Some(data) = self.get_mut(id) {
            data.parent = None;
        }
    }

    fn text_into(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.get(id) else {
            return;
        };
        out.push_str(&data.text);
        for child in &data.children {
            self.text_into(*child, out);
        }
    }

    fn build(&mut self, builder: ElementBuilder) -> NodeId {
        let mut data = ElementData::new(&builder.tag);
        data.classes = builder.classes;
        data.attrs = builder.attrs.into_iter().collect();
        data.text = builder.text.unwrap_or_default();
        let id = self.insert(data);
        for child in builder.children {
            let child_id = self.build(child);
            if let Some(data) = self.get_mut(child_id) {
                data.parent = Some(id);
            }
            if let Some(data) = self.get_mut(id) {
                data.children.push(child_id);
            }
        }
        id
    }
}

struct DocumentInner {
    tree: RefCell<Tree>,
    listeners: RefCell<ListenerTable>,
    body: NodeId,
}

/// An in-memory element tree with class lists, attributes, text content and
/// event listeners.
#[derive(Clone)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("body", &self.inner.body)
            .field("nodes", &self.inner.tree.borrow().nodes.len())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing a single `body` element.
    pub fn new() -> Self {
        let mut tree = Tree::default();
        let body = tree.insert(ElementData::new("body"));
        Self {
            inner: Rc::new(DocumentInner {
                tree: RefCell::new(tree),
                listeners: RefCell::new(ListenerTable::default()),
                body,
            }),
        }
    }

    pub fn body(&self) -> NodeId {
        self.inner.body
    }

    pub(crate) fn tree(&self) -> std::cell::Ref<'_, Tree> {
        self.inner.tree.borrow()
    }

    pub(crate) fn listeners(&self) -> &RefCell<ListenerTable> {
        &self.inner.listeners
    }

    /// True if both handles point at the same document.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // Tree

    pub fn is_valid(&self, id: NodeId) -> bool {
        self.tree().get(id).is_some()
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.inner.tree.borrow_mut().insert(ElementData::new(tag))
    }

    /// Materialize a builder subtree and append it as the last child of `parent`.
    pub fn append(&self, parent: NodeId, builder: ElementBuilder) -> Result<NodeId> {
        let mut tree = self.inner.tree.borrow_mut();
        if tree.get(parent).is_none() {
            return Err(DomError::UnknownNode(parent));
        }
        let id = tree.build(builder);
        if let Some(data) = tree.get_mut(id) {
            data.parent = Some(parent);
        }
        if let Some(data) = tree.get_mut(parent) {
            data.children.push(id);
        }
        log::trace!("[dom] appended {} to {}", id, parent);
        Ok(id)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut tree = self.inner.tree.borrow_mut();
        for id in [parent, child] {
            if tree.get(id).is_none() {
                return Err(DomError::UnknownNode(id));
            }
        }
        if tree.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        tree.detach(child);
        if let Some(data) = tree.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = tree.get_mut(parent) {
            data.children.push(child);
        }
        Ok(())
    }

    /// Remove `id` from its parent. The subtree stays intact and can be re-attached.
    pub fn detach(&self, id: NodeId) {
        self.inner.tree.borrow_mut().detach(id);
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree().parent(id)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree()
            .get(id)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    /// Descendants in document order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.tree().descendants(id)
    }

    /// True if `node` is `ancestor` or is inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree().is_inclusive_ancestor(ancestor, node)
    }

    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.tree().get(id).map(|data| data.tag.clone())
    }

    /// Find the first attached element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree();
        let body = self.body();
        std::iter::once(body)
            .chain(tree.descendants(body))
            .find(|node| {
                tree.get(*node)
                    .and_then(|data| data.attrs.get("id"))
                    .is_some_and(|value| value == id)
            })
    }

    // Attributes

    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.tree().get(id)?.attrs.get(name).cloned()
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.tree()
            .get(id)
            .is_some_and(|data| data.attrs.contains_key(name))
    }

    pub fn set_attr(&self, id: NodeId, name: &str, value: &str) {
        if let Some(data) = self.inner.tree.borrow_mut().get_mut(id) {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attr(&self, id: NodeId, name: &str) {
        if let Some(data) = self.inner.tree.borrow_mut().get_mut(id) {
            data.attrs.remove(name);
        }
    }

    // Classes

    pub fn classes(&self, id: NodeId) -> Vec<String> {
        self.tree()
            .get(id)
            .map(|data| data.classes.clone())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, name: &str) -> bool {
        self.tree().get(id).is_some_and(|data| data.has_class(name))
    }

    pub fn add_class(&self, id: NodeId, name: &str) {
        if let Some(data) = self.inner.tree.borrow_mut().get_mut(id) {
            data.add_class(name);
        }
    }

    pub fn remove_class(&self, id: NodeId, name: &str) {
        if let Some(data) = self.inner.tree.borrow_mut().get_mut(id) {
            data.remove_class(name);
        }
    }

    /// Add the class when `force` is true, remove it otherwise.
    /// Empty class names are ignored.
    pub fn toggle_class(&self, id: NodeId, name: &str, force: bool) {
        if name.is_empty() {
            return;
        }
        if force {
            self.add_class(id, name);
        } else {
            self.remove_class(id, name);
        }
    }

    // Text

    /// Concatenated text of the element and all of its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.tree().text_into(id, &mut out);
        out
    }

    /// Replace the element's content with `text`. Existing children are detached.
    pub fn set_text(&self, id: NodeId, text: &str) {
        let mut tree = self.inner.tree.borrow_mut();
        let children = match tree.get_mut(id) {
            Some(data) => {
                data.text = text.to_string();
                std::mem::take(&mut data.children)
            }
            None => return,
        };
        for child in children {
            if let Some(data) = tree.get_mut(child) {
                data.parent = None;
            }
        }
    }
}
