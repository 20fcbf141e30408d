use std::cell::RefCell;
use std::rc::Rc;

use zdom::{el, Document, Event, NodeId};

fn nested() -> (Document, NodeId, NodeId, NodeId) {
    let doc = Document::new();
    let outer = doc
        .append(
            doc.body(),
            el("div")
                .id("outer")
                .child(el("div").id("middle").child(el("button").id("inner"))),
        )
        .unwrap();
    let middle = doc.element_by_id("middle").unwrap();
    let inner = doc.element_by_id("inner").unwrap();
    (doc, outer, middle, inner)
}

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn test_bubbling_order_target_then_ancestors() {
    let (doc, outer, middle, inner) = nested();
    let log = recorder();

    for (node, name) in [(outer, "outer"), (middle, "middle"), (inner, "inner-1"), (inner, "inner-2")] {
        let log = log.clone();
        doc.add_event_listener(node, "ping", move |e| {
            assert_eq!(e.target(), Some(inner));
            assert_eq!(e.current_target(), Some(node));
            log.borrow_mut().push(name.to_string());
        });
    }

    assert!(doc.dispatch_event(inner, Event::new("ping").bubbles(true)));
    assert_eq!(*log.borrow(), vec!["inner-1", "inner-2", "middle", "outer"]);
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let (doc, outer, _, inner) = nested();
    let log = recorder();
    {
        let log = log.clone();
        doc.add_event_listener(outer, "ping", move |_| log.borrow_mut().push("outer".into()));
    }
    {
        let log = log.clone();
        doc.add_event_listener(inner, "ping", move |_| log.borrow_mut().push("inner".into()));
    }

    doc.dispatch_event(inner, Event::new("ping"));
    assert_eq!(*log.borrow(), vec!["inner"]);
}

#[test]
fn test_listeners_only_see_their_event_type() {
    let (doc, outer, _, inner) = nested();
    let log = recorder();
    {
        let log = log.clone();
        doc.add_event_listener(outer, "other", move |_| log.borrow_mut().push("other".into()));
    }

    doc.dispatch_event(inner, Event::new("ping").bubbles(true));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_stop_propagation_finishes_current_node() {
    let (doc, outer, middle, inner) = nested();
    let log = recorder();
    {
        let log = log.clone();
        doc.add_event_listener(middle, "ping", move |e| {
            log.borrow_mut().push("middle-1".into());
            e.stop_propagation();
        });
    }
    {
        let log = log.clone();
        doc.add_event_listener(middle, "ping", move |_| log.borrow_mut().push("middle-2".into()));
    }
    {
        let log = log.clone();
        doc.add_event_listener(outer, "ping", move |_| log.borrow_mut().push("outer".into()));
    }

    doc.dispatch_event(inner, Event::new("ping").bubbles(true));
    assert_eq!(*log.borrow(), vec!["middle-1", "middle-2"]);
}

#[test]
fn test_stop_immediate_propagation() {
    let (doc, _, middle, inner) = nested();
    let log = recorder();
    {
        let log = log.clone();
        doc.add_event_listener(middle, "ping", move |e| {
            log.borrow_mut().push("middle-1".into());
            e.stop_immediate_propagation();
        });
    }
    {
        let log = log.clone();
        doc.add_event_listener(middle, "ping", move |_| log.borrow_mut().push("middle-2".into()));
    }

    doc.dispatch_event(inner, Event::new("ping").bubbles(true));
    assert_eq!(*log.borrow(), vec!["middle-1"]);
}

// ============================================================================
// Cancelation
// ============================================================================

#[test]
fn test_prevent_default_on_cancelable_event() {
    let (doc, outer, _, inner) = nested();
    doc.add_event_listener(outer, "ping", |e| e.prevent_default());

    assert!(!doc.dispatch_event(inner, Event::new("ping").bubbles(true).cancelable(true)));
}

#[test]
fn test_prevent_default_ignored_when_not_cancelable() {
    let (doc, outer, _, inner) = nested();
    doc.add_event_listener(outer, "ping", |e| {
        e.prevent_default();
        assert!(!e.default_prevented());
    });

    assert!(doc.dispatch_event(inner, Event::new("ping").bubbles(true)));
}

#[test]
fn test_click_bubbles_and_is_cancelable() {
    let (doc, outer, _, inner) = nested();
    doc.add_event_listener(outer, "click", |e| {
        assert!(e.is_bubbling());
        assert!(e.is_cancelable());
        e.prevent_default();
    });

    assert!(!doc.click(inner));
}

// ============================================================================
// Detail & listener management
// ============================================================================

#[derive(Debug, PartialEq)]
struct Payload {
    value: u32,
}

#[test]
fn test_custom_event_detail_is_typed() {
    let (doc, outer, _, inner) = nested();
    let seen = Rc::new(RefCell::new(None));
    {
        let seen = seen.clone();
        doc.add_event_listener(outer, "payload", move |e| {
            assert!(e.detail::<String>().is_none());
            *seen.borrow_mut() = e.detail::<Payload>().map(|p| p.value);
        });
    }

    doc.dispatch_event(inner, Event::custom("payload", Payload { value: 7 }).bubbles(true));
    assert_eq!(*seen.borrow(), Some(7));
}

#[test]
fn test_remove_event_listener() {
    let (doc, outer, _, inner) = nested();
    let log = recorder();
    let id = {
        let log = log.clone();
        doc.add_event_listener(outer, "ping", move |_| log.borrow_mut().push("outer".into()))
    };

    assert!(doc.remove_event_listener(id));
    assert!(!doc.remove_event_listener(id));
    doc.dispatch_event(inner, Event::new("ping").bubbles(true));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listener_removed_during_dispatch_does_not_run() {
    let (doc, outer, _, inner) = nested();
    let log = recorder();
    let second = Rc::new(RefCell::new(None));
    {
        let doc2 = doc.clone();
        let second = second.clone();
        doc.add_event_listener(outer, "ping", move |_| {
            if let Some(id) = second.borrow_mut().take() {
                doc2.remove_event_listener(id);
            }
        });
    }
    let id = {
        let log = log.clone();
        doc.add_event_listener(outer, "ping", move |_| log.borrow_mut().push("second".into()))
    };
    *second.borrow_mut() = Some(id);

    doc.dispatch_event(inner, Event::new("ping").bubbles(true));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listeners_can_mutate_tree_and_dispatch_nested_events() {
    let (doc, outer, middle, inner) = nested();
    let log = recorder();
    {
        let doc2 = doc.clone();
        doc.add_event_listener(inner, "first", move |_| {
            doc2.add_class(middle, "touched");
            doc2.dispatch_event(middle, Event::new("second").bubbles(true));
        });
    }
    {
        let log = log.clone();
        doc.add_event_listener(outer, "second", move |e| {
            log.borrow_mut().push(format!("second from {:?}", e.target()));
        });
    }

    doc.dispatch_event(inner, Event::new("first").bubbles(true));
    assert!(doc.has_class(middle, "touched"));
    assert_eq!(*log.borrow(), vec![format!("second from {:?}", Some(middle))]);
}
