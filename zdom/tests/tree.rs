use zdom::{el, Document, DomError};

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_append_builds_subtree_in_order() {
    let doc = Document::new();
    let list = doc
        .append(
            doc.body(),
            el("ul")
                .id("list")
                .child(el("li").id("a"))
                .child(el("li").id("b").child(el("span").id("b-inner")))
                .child(el("li").id("c")),
        )
        .unwrap();

    let ids: Vec<String> = doc
        .descendants(list)
        .into_iter()
        .filter_map(|node| doc.attr(node, "id"))
        .collect();
    assert_eq!(ids, vec!["a", "b", "b-inner", "c"]);
    assert_eq!(doc.element_by_id("list"), Some(list));
    assert_eq!(doc.parent(list), Some(doc.body()));
    assert_eq!(doc.tag(list).as_deref(), Some("ul"));
}

#[test]
fn test_builder_class_splits_whitespace_and_dedupes() {
    let doc = Document::new();
    let node = doc
        .append(doc.body(), el("div").class("a  b").class("b c"))
        .unwrap();
    assert_eq!(doc.classes(node), vec!["a", "b", "c"]);
}

#[test]
fn test_append_to_unknown_parent_fails() {
    let doc = Document::new();
    let other = Document::new();
    let foreign = other.append(other.body(), el("div")).unwrap();
    let foreign = other.append(foreign, el("div")).unwrap();

    assert!(matches!(
        doc.append(foreign, el("p")),
        Err(DomError::UnknownNode(_))
    ));
}

#[test]
fn test_append_child_moves_and_rejects_cycles() {
    let doc = Document::new();
    let outer = doc.append(doc.body(), el("div").id("outer")).unwrap();
    let inner = doc.append(outer, el("div").id("inner")).unwrap();
    let other = doc.append(doc.body(), el("div").id("other")).unwrap();

    doc.append_child(other, inner).unwrap();
    assert_eq!(doc.parent(inner), Some(other));
    assert!(doc.children(outer).is_empty());

    assert_eq!(
        doc.append_child(inner, other),
        Err(DomError::HierarchyRequest {
            parent: inner,
            child: other
        })
    );
    assert!(doc.contains(other, inner));
    assert!(!doc.contains(inner, other));
}

#[test]
fn test_created_element_is_detached_until_appended() {
    let doc = Document::new();
    let item = doc.create_element("li");
    doc.set_attr(item, "id", "late");

    assert_eq!(doc.tag(item).as_deref(), Some("li"));
    assert_eq!(doc.parent(item), None);
    assert_eq!(doc.element_by_id("late"), None);

    doc.append_child(doc.body(), item).unwrap();
    assert_eq!(doc.parent(item), Some(doc.body()));
    assert_eq!(doc.element_by_id("late"), Some(item));
}

#[test]
fn test_detached_elements_are_not_found_by_id() {
    let doc = Document::new();
    let node = doc.append(doc.body(), el("div").id("gone")).unwrap();
    doc.detach(node);

    assert!(doc.is_valid(node));
    assert_eq!(doc.parent(node), None);
    assert_eq!(doc.element_by_id("gone"), None);
}

// ============================================================================
// Classes & attributes
// ============================================================================

#[test]
fn test_toggle_class_with_force() {
    let doc = Document::new();
    let node = doc.append(doc.body(), el("div")).unwrap();

    doc.toggle_class(node, "open", true);
    doc.toggle_class(node, "open", true);
    assert_eq!(doc.classes(node), vec!["open"]);

    doc.toggle_class(node, "open", false);
    assert!(!doc.has_class(node, "open"));

    doc.toggle_class(node, "", true);
    assert!(doc.classes(node).is_empty());
}

#[test]
fn test_attributes() {
    let doc = Document::new();
    let node = doc
        .append(doc.body(), el("div").flag("data-flag").attr("data-n", "3"))
        .unwrap();

    assert!(doc.has_attr(node, "data-flag"));
    assert_eq!(doc.attr(node, "data-flag").as_deref(), Some(""));
    assert_eq!(doc.attr(node, "data-n").as_deref(), Some("3"));

    doc.set_attr(node, "data-n", "4");
    assert_eq!(doc.attr(node, "data-n").as_deref(), Some("4"));

    doc.remove_attr(node, "data-flag");
    assert!(!doc.has_attr(node, "data-flag"));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_concatenates_descendants() {
    let doc = Document::new();
    let node = doc
        .append(
            doc.body(),
            el("p")
                .text("Hello, ")
                .child(el("b").text("world"))
                .child(el("i").text("!")),
        )
        .unwrap();
    assert_eq!(doc.text(node), "Hello, world!");
}

#[test]
fn test_set_text_replaces_children() {
    let doc = Document::new();
    let node = doc
        .append(doc.body(), el("p").child(el("b").id("bold").text("x")))
        .unwrap();
    let bold = doc.element_by_id("bold").unwrap();

    doc.set_text(node, "plain");
    assert_eq!(doc.text(node), "plain");
    assert!(doc.children(node).is_empty());
    assert_eq!(doc.parent(bold), None);
}
