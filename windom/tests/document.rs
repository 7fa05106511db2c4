use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use windom::{listener, Document, Element, Event, EventKind, Key, NodeId};

fn list() -> (Document, NodeId, NodeId, NodeId) {
    let item = Element::div().class("item");
    let button = Element::button().child(Element::span().text("Label"));
    let span = match &button.content {
        windom::Content::Children(children) => children[0].node_id,
        _ => unreachable!(),
    };
    let button_id = button.node_id;
    let item = item.child(button);
    let item_id = item.node_id;
    (Document::new(Element::new("body").child(item)), item_id, button_id, span)
}

// ============================================================================
// Tree
// ============================================================================

#[test]
fn test_children_and_parent() {
    let (doc, item, button, span) = list();
    assert_eq!(doc.children(doc.root_id()), vec![item]);
    assert_eq!(doc.children(item), vec![button]);
    assert_eq!(doc.parent(span), Some(button));
    assert_eq!(doc.parent(doc.root_id()), None);
    assert_eq!(doc.ancestors(span), vec![span, button, item, doc.root_id()]);
}

#[test]
fn test_get_element_by_id_follows_attribute_changes() {
    let (mut doc, item, _, _) = list();
    assert_eq!(doc.get_element_by_id("first"), None);

    doc.get_mut(item).unwrap().set_attribute("id", "first");
    assert_eq!(doc.get_element_by_id("first"), Some(item));
}

#[test]
fn test_append_and_remove() {
    let (mut doc, item, button, span) = list();
    let extra = doc.append_child(item, Element::p().text("note")).unwrap();
    assert_eq!(doc.children(item), vec![button, extra]);

    let removed = doc.remove(button).unwrap();
    assert_eq!(removed.node_id, button);
    assert!(!doc.contains(button));
    assert!(!doc.contains(span));
    assert_eq!(doc.children(item), vec![extra]);

    // The root cannot be removed
    assert!(doc.remove(doc.root_id()).is_none());
}

#[test]
fn test_append_replaces_text_content() {
    let mut doc = Document::new(Element::new("body").text("placeholder"));
    let root = doc.root_id();
    doc.append_child(root, Element::div()).unwrap();
    assert_eq!(doc.children(root).len(), 1);
    assert_eq!(doc.root().text_content(), "");
}

#[test]
fn test_attribute_class_style_shortcuts() {
    let (mut doc, item, _, _) = list();
    {
        let el = doc.get_mut(item).unwrap();
        el.set_attribute("aria-hidden", "true");
        el.add_class("open");
        el.set_style_property("display", "block");
    }
    assert_eq!(doc.get_attribute(item, "aria-hidden").as_deref(), Some("true"));
    assert!(doc.has_class(item, "open"));
    assert!(doc.has_class(item, "item"));
    assert_eq!(doc.style_property(item, "display").as_deref(), Some("block"));

    doc.get_mut(item).unwrap().toggle_class("open");
    assert!(!doc.has_class(item, "open"));
}

#[test]
fn test_markup_rendering() {
    let doc = Document::new(
        Element::new("body").child(Element::button().attr("aria-expanded", "false").text("Go")),
    );
    assert_eq!(
        doc.to_string(),
        "<body><button aria-expanded=\"false\">Go</button></body>"
    );
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_click_bubbles_from_target_to_ancestors() {
    let (mut doc, item, button, span) = list();
    let seen: Arc<Mutex<Vec<(NodeId, NodeId)>>> = Arc::new(Mutex::new(Vec::new()));

    for node in [button, item] {
        let seen = Arc::clone(&seen);
        assert!(doc.add_event_listener(
            node,
            EventKind::Click,
            listener(move |_, event| {
                seen.lock()
                    .unwrap()
                    .push((event.target(), event.current_target()));
            }),
        ));
    }

    assert_eq!(doc.click(span), 2);
    assert_eq!(*seen.lock().unwrap(), vec![(span, button), (span, item)]);
}

#[test]
fn test_listeners_filter_by_kind() {
    let (mut doc, _, button, _) = list();
    let keys = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&keys);
    doc.add_event_listener(
        button,
        EventKind::Key,
        listener(move |_, event| {
            if let Event::Key { key, .. } = event {
                recorded.lock().unwrap().push(*key);
            }
        }),
    );

    assert_eq!(doc.click(button), 0);
    assert_eq!(doc.key(button, Key::Enter), 1);
    assert_eq!(doc.key(button, Key::Char(' ')), 1);
    assert_eq!(*keys.lock().unwrap(), vec![Key::Enter, Key::Char(' ')]);
    assert!(Key::Enter.is_activation());
    assert!(!Key::Escape.is_activation());
}

#[test]
fn test_listener_can_mutate_document() {
    let (mut doc, item, button, _) = list();
    doc.add_event_listener(
        button,
        EventKind::Click,
        listener(move |doc, _| {
            if let Some(el) = doc.get_mut(item) {
                el.toggle_class("open");
            }
        }),
    );

    doc.click(button);
    assert!(doc.has_class(item, "open"));
    doc.click(button);
    assert!(!doc.has_class(item, "open"));
}

#[test]
fn test_listener_on_missing_node_is_rejected() {
    let (mut doc, _, _, _) = list();
    let detached = Element::div().node_id;
    assert!(!doc.add_event_listener(detached, EventKind::Click, listener(|_, _| {})));
    assert_eq!(doc.click(detached), 0);
}

#[test]
fn test_removing_node_drops_its_listeners() {
    let (mut doc, item, button, _) = list();
    let calls = Arc::new(AtomicUsize::new(0));
    for node in [item, button] {
        let calls = Arc::clone(&calls);
        doc.add_event_listener(
            node,
            EventKind::Click,
            listener(move |_, _| {
                calls.fetch_add(1, Ordering::SeqCst);
            }),
        );
    }
    assert_eq!(doc.listener_count(button), 1);

    doc.remove(item);
    assert_eq!(doc.listener_count(button), 0);
    assert_eq!(doc.listener_count(item), 0);
    assert_eq!(doc.click(button), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_click_selector() {
    let (mut doc, _, button, _) = list();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    doc.add_event_listener(
        button,
        EventKind::Click,
        listener(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );

    assert_eq!(doc.click_selector(".item button").unwrap(), 1);
    assert_eq!(doc.click_selector(".nothing").unwrap(), 0);
    assert!(doc.click_selector("button >").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
