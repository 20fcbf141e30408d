//! Spoiler widget state.

use std::cell::Cell;
use std::rc::Rc;

use zdom::{Document, Event, ListenerId, NodeId, Selector};

use super::events::ChangeStateDetail;
use super::options::SpoilerOptions;
use crate::base::{non_empty, Component};
use crate::error::Result;

/// Compiled selectors of a spoiler.
#[derive(Debug)]
struct Selectors {
    root: Option<Selector>,
    head: Option<Selector>,
    body: Option<Selector>,
}

impl Selectors {
    fn compile(options: &SpoilerOptions) -> Result<Self> {
        let parse = |value: &Option<String>| -> Result<Option<Selector>> {
            Ok(non_empty(value).map(Selector::parse).transpose()?)
        };
        Ok(Self {
            root: parse(&options.root_selector)?,
            head: parse(&options.head_selector)?,
            body: parse(&options.body_selector)?,
        })
    }
}

/// A disclosure widget with a clickable head and a collapsible body.
///
/// The open state lives here; the tree only mirrors it through classes and
/// text. Every change goes through [`set_opened`](Self::set_opened).
///
/// Head, body and text-attribute elements inside a nested spoiler belong to
/// that nested spoiler and are never touched by the outer one.
///
/// A root marked with the opened class opens through the regular events at
/// construction. If that opening is canceled the markup is reset to closed.
#[derive(Debug)]
pub struct Spoiler {
    doc: Document,
    root: NodeId,
    options: SpoilerOptions,
    selectors: Selectors,
    is_opened: Cell<bool>,
    head_listener: Cell<Option<ListenerId>>,
}

impl Spoiler {
    pub fn opened(&self) -> bool {
        self.is_opened.get()
    }

    /// Flip the state. Returns what [`set_opened`](Self::set_opened) returns.
    pub fn toggle(&self) -> bool {
        self.set_opened(!self.opened())
    }

    /// Open or close the spoiler.
    ///
    /// Returns false if a listener canceled the "before" event, in which case
    /// nothing changed. Setting the current state is a no-op returning true.
    pub fn set_opened(&self, value: bool) -> bool {
        if value == self.is_opened.get() {
            return true;
        }

        let detail = ChangeStateDetail {
            new_state_is_opened: value,
        };

        if let Some(name) = non_empty(&self.options.before_change_state_event) {
            let before = Event::custom(name, detail).bubbles(true).cancelable(true);
            if !self.doc.dispatch_event(self.root, before) {
                log::debug!("[spoiler] {} change to opened={} canceled", self.root, value);
                return false;
            }
        }

        self.is_opened.set(value);
        self.sync_classes();
        self.sync_text();
        log::debug!("[spoiler] {} opened={}", self.root, value);

        if let Some(name) = non_empty(&self.options.after_change_state_event) {
            self.doc
                .dispatch_event(self.root, Event::custom(name, detail).bubbles(true));
        }

        true
    }

    /// Descendants not inside a nested spoiler, in document order.
    fn owned_descendants(&self) -> Vec<NodeId> {
        self.doc
            .descendants(self.root)
            .into_iter()
            .filter(|node| self.owns(*node))
            .collect()
    }

    fn owns(&self, node: NodeId) -> bool {
        let Some(root_selector) = &self.selectors.root else {
            return true;
        };
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            if self.doc.matches(current, root_selector) {
                return false;
            }
            cursor = self.doc.parent(current);
        }
        false
    }

    fn owned_matching(&self, selector: &Option<Selector>) -> Vec<NodeId> {
        let Some(selector) = selector else {
            return Vec::new();
        };
        self.doc
            .select_all(self.root, selector)
            .into_iter()
            .filter(|node| self.owns(*node))
            .collect()
    }

    fn head(&self) -> Option<NodeId> {
        self.owned_matching(&self.selectors.head).into_iter().next()
    }

    fn sync_classes(&self) {
        let opened = self.is_opened.get();
        let options = &self.options;

        toggle_pair(
            &self.doc,
            &[self.root],
            opened,
            &options.opened_class,
            &options.closed_class,
        );
        toggle_pair(
            &self.doc,
            &self.owned_matching(&self.selectors.head),
            opened,
            &options.head_opened_class,
            &options.head_closed_class,
        );
        toggle_pair(
            &self.doc,
            &self.owned_matching(&self.selectors.body),
            opened,
            &options.body_opened_class,
            &options.body_closed_class,
        );
    }

    /// Only the side matching the current state is written. The root is
    /// skipped: replacing its text would detach the head and body.
    fn sync_text(&self) {
        let attr = if self.is_opened.get() {
            &self.options.opened_text_attr
        } else {
            &self.options.closed_text_attr
        };
        if attr.is_empty() {
            return;
        }

        for node in self.owned_descendants() {
            if let Some(text) = self.doc.attr(node, attr) {
                self.doc.set_text(node, &text);
            }
        }
    }
}

/// Put the opened-side class on and the closed-side class off when `opened`,
/// and the reverse otherwise.
fn toggle_pair(
    doc: &Document,
    nodes: &[NodeId],
    opened: bool,
    opened_class: &Option<String>,
    closed_class: &Option<String>,
) {
    for node in nodes {
        if let Some(class) = non_empty(opened_class) {
            doc.toggle_class(*node, class, opened);
        }
        if let Some(class) = non_empty(closed_class) {
            doc.toggle_class(*node, class, !opened);
        }
    }
}

impl Component for Spoiler {
    type Options = SpoilerOptions;
    type Services = ();

    fn bind(doc: &Document, root: NodeId, options: SpoilerOptions, _: &()) -> Result<Rc<Self>> {
        let selectors = Selectors::compile(&options)?;
        let spoiler = Rc::new(Self {
            doc: doc.clone(),
            root,
            options,
            selectors,
            is_opened: Cell::new(false),
            head_listener: Cell::new(None),
        });

        if let Some(head) = spoiler.head() {
            let weak = Rc::downgrade(&spoiler);
            let id = doc.add_event_listener(head, "click", move |e| {
                if let Some(spoiler) = weak.upgrade() {
                    spoiler.toggle();
                    e.prevent_default();
                }
            });
            spoiler.head_listener.set(Some(id));
        }

        let marked_open = non_empty(&spoiler.options.opened_class)
            .is_some_and(|class| doc.has_class(root, class));
        if !marked_open || !spoiler.set_opened(true) {
            spoiler.sync_classes();
        }

        if let Some(class) = non_empty(&spoiler.options.inited_class) {
            doc.add_class(root, class);
        }

        spoiler.sync_text();

        Ok(spoiler)
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn options(&self) -> &SpoilerOptions {
        &self.options
    }
}

impl Drop for Spoiler {
    fn drop(&mut self) {
        if let Some(id) = self.head_listener.take() {
            self.doc.remove_event_listener(id);
        }
    }
}
