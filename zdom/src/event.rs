//! Synchronous event dispatch with bubbling and cancelation.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::document::Document;
use crate::element::NodeId;

/// Event listener callback. Listeners may freely use the document,
/// including dispatching nested events.
pub type Listener = Rc<dyn Fn(&mut Event)>;

/// Handle returned by [`Document::add_event_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An event travelling from its target up through its ancestors.
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    bubbles: bool,
    cancelable: bool,
    detail: Option<Rc<dyn Any>>,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// A plain event that neither bubbles nor can be canceled.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            current_target: None,
            bubbles: false,
            cancelable: false,
            detail: None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// An event carrying typed detail data.
    pub fn custom<T: Any>(event_type: impl Into<String>, detail: T) -> Self {
        Self {
            detail: Some(Rc::new(detail)),
            ..Self::new(event_type)
        }
    }

    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The node the event was dispatched on. `None` before dispatch.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listeners are currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn is_bubbling(&self) -> bool {
        self.bubbles
    }

    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Detail data, if present and of type `T`.
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail.as_deref()?.downcast_ref::<T>()
    }

    /// Has no effect on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Finish the current node's listeners, then stop.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Skip the remaining listeners, including those on the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

struct Registration {
    id: ListenerId,
    event_type: String,
    listener: Listener,
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerTable {
    fn add(&mut self, node: NodeId, event_type: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_node.entry(node).or_default().push(Registration {
            id,
            event_type: event_type.to_string(),
            listener,
        });
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        for registrations in self.by_node.values_mut() {
            if let Some(pos) = registrations.iter().position(|r| r.id == id) {
                registrations.remove(pos);
                return true;
            }
        }
        false
    }

    fn contains(&self, node: NodeId, id: ListenerId) -> bool {
        self.by_node
            .get(&node)
            .is_some_and(|registrations| registrations.iter().any(|r| r.id == id))
    }

    fn snapshot(&self, node: NodeId, event_type: &str) -> Vec<(ListenerId, Listener)> {
        self.by_node
            .get(&node)
            .map(|registrations| {
                registrations
                    .iter()
                    .filter(|r| r.event_type == event_type)
                    .map(|r| (r.id, Rc::clone(&r.listener)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Document {
    /// Register `listener` for events of `event_type` reaching `node`.
    pub fn add_event_listener<F>(&self, node: NodeId, event_type: &str, listener: F) -> ListenerId
    where
        F: Fn(&mut Event) + 'static,
    {
        self.listeners()
            .borrow_mut()
            .add(node, event_type, Rc::new(listener))
    }

    /// Returns true if the listener was registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners().borrow_mut().remove(id)
    }

    /// Dispatch `event` on `target`.
    ///
    /// Listeners on the target run first, then, for bubbling events, listeners
    /// on each ancestor up to the root. Within a node listeners run in
    /// registration order. Everything runs before this returns.
    ///
    /// Returns false if a listener canceled the event.
    pub fn dispatch_event(&self, target: NodeId, mut event: Event) -> bool {
        event.target = Some(target);

        let path: Vec<NodeId> = {
            let tree = self.tree();
            if tree.get(target).is_none() {
                log::debug!("[dom] dispatch of {:?} on unknown {}", event.event_type, target);
                return true;
            }
            if event.bubbles {
                std::iter::successors(Some(target), |node| tree.parent(*node)).collect()
            } else {
                vec![target]
            }
        };

        log::trace!(
            "[dom] dispatch {:?} on {} (bubbles={}, cancelable={})",
            event.event_type,
            target,
            event.bubbles,
            event.cancelable
        );

        for node in path {
            event.current_target = Some(node);
            let snapshot = self.listeners().borrow().snapshot(node, &event.event_type);
            for (id, listener) in snapshot {
                // A listener earlier in this pass may have removed this one.
                if !self.listeners().borrow().contains(node, id) {
                    continue;
                }
                listener(&mut event);
                if event.immediate_propagation_stopped {
                    break;
                }
            }
            if event.propagation_stopped {
                break;
            }
        }
        event.current_target = None;

        !event.default_prevented
    }

    /// Dispatch a bubbling, cancelable `click` on `node`.
    pub fn click(&self, node: NodeId) -> bool {
        self.dispatch_event(node, Event::new("click").bubbles(true).cancelable(true))
    }
}
