//! Spoiler group: optional exclusivity among member spoilers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use zdom::{Document, Event, ListenerId, NodeId, Selector};

use super::events::ChangeStateDetail;
use super::options::SpoilerGroupOptions;
use super::state::Spoiler;
use crate::base::{bool_option, int_option, non_empty, Component, ComponentFactory};
use crate::error::{ComponentError, Result};

/// Coordinates the spoilers found under its root.
///
/// In exclusive mode, opening a member closes the member that was open
/// before, so at most one stays open. Members are not stored: they are
/// looked up through the tree and the spoiler factory whenever needed.
#[derive(Debug)]
pub struct SpoilerGroup {
    doc: Document,
    root: NodeId,
    options: SpoilerGroupOptions,
    exclusive: bool,
    member_selector: Selector,
    spoilers: ComponentFactory<Spoiler>,
    cur_opened_spoiler: RefCell<Option<Weak<Spoiler>>>,
    listener: Cell<Option<ListenerId>>,
}

impl SpoilerGroup {
    pub fn exclusive(&self) -> bool {
        self.exclusive
    }

    /// Number of member spoilers currently under the root.
    pub fn spoiler_count(&self) -> usize {
        self.doc.select_all(self.root, &self.member_selector).len()
    }

    /// The member tracked as open. Only maintained in exclusive mode.
    pub fn opened_spoiler(&self) -> Option<Rc<Spoiler>> {
        self.cur_opened_spoiler.borrow().as_ref()?.upgrade()
    }

    fn on_spoiler_state_changed(&self, event: &Event) {
        let Some(detail) = event.detail::<ChangeStateDetail>() else {
            return;
        };
        if !detail.new_state_is_opened || !self.exclusive {
            return;
        }

        let target = event.target();
        if let Some(current) = self.opened_spoiler() {
            if Some(current.root()) != target {
                log::debug!(
                    "[spoiler-group] {} closing {} for {:?}",
                    self.root,
                    current.root(),
                    target
                );
                current.set_opened(false);
            }
        }

        let opened = target.and_then(|node| self.spoilers.from_root(node));
        *self.cur_opened_spoiler.borrow_mut() = opened.as_ref().map(Rc::downgrade);
    }
}

impl Component for SpoilerGroup {
    type Options = SpoilerGroupOptions;
    type Services = ComponentFactory<Spoiler>;

    fn bind(
        doc: &Document,
        root: NodeId,
        options: SpoilerGroupOptions,
        spoilers: &ComponentFactory<Spoiler>,
    ) -> Result<Rc<Self>> {
        let exclusive = bool_option(
            doc,
            root,
            options.exclusive_attr.as_deref(),
            options.default_exclusive,
        );

        if let Some(group_selector) = non_empty(&options.root_selector) {
            if doc.query_selector(root, group_selector)?.is_some() {
                return Err(ComponentError::NestedGroup);
            }
        }

        let opened_index = int_option(
            doc,
            root,
            options.opened_index_attr.as_deref(),
            options.default_opened_index,
        );

        let after_event = non_empty(&options.spoiler_after_change_state_event)
            .ok_or(ComponentError::MissingOption("spoilerAfterChangeStateEvent"))?
            .to_string();
        let member_selector = non_empty(&options.spoiler_root_selector)
            .ok_or(ComponentError::MissingOption("spoilerRootSelector"))?;
        let member_selector = Selector::parse(member_selector)?;

        let members = doc.select_all(root, &member_selector);

        let mut cur_opened: Option<Rc<Spoiler>> = None;
        if exclusive {
            for member in &members {
                let Some(spoiler) = spoilers.from_root(*member) else {
                    continue;
                };
                if !spoiler.opened() {
                    continue;
                }
                if cur_opened.is_some() {
                    // A canceled close leaves this member open.
                    spoiler.set_opened(false);
                } else {
                    cur_opened = Some(spoiler);
                }
            }
        }

        let group = Rc::new(Self {
            doc: doc.clone(),
            root,
            options,
            exclusive,
            member_selector,
            spoilers: spoilers.clone(),
            cur_opened_spoiler: RefCell::new(cur_opened.as_ref().map(Rc::downgrade)),
            listener: Cell::new(None),
        });

        if exclusive {
            let weak = Rc::downgrade(&group);
            let id = doc.add_event_listener(root, &after_event, move |e| {
                if let Some(group) = weak.upgrade() {
                    group.on_spoiler_state_changed(e);
                }
            });
            group.listener.set(Some(id));
        }

        if cur_opened.is_none() && opened_index >= 0 {
            let to_open = usize::try_from(opened_index)
                .ok()
                .and_then(|index| members.get(index))
                .and_then(|member| spoilers.from_root(*member));
            if let Some(spoiler) = to_open {
                log::debug!("[spoiler-group] {} opening member #{}", root, opened_index);
                spoiler.set_opened(true);
            }
        }

        log::debug!(
            "[spoiler-group] {} bound: {} member(s), exclusive={}",
            root,
            members.len(),
            exclusive
        );
        Ok(group)
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn options(&self) -> &SpoilerGroupOptions {
        &self.options
    }
}

impl Drop for SpoilerGroup {
    fn drop(&mut self) {
        if let Some(id) = self.listener.take() {
            self.doc.remove_event_listener(id);
        }
    }
}
