use windom::{Document, Element, Selector, SelectorError};

fn page() -> Document {
    Document::new(
        Element::new("body").child(
            Element::div()
                .id("main")
                .class("wrap")
                .child(
                    Element::section()
                        .class("panel")
                        .attr("data-kind", "faq")
                        .child(Element::button().class("toggle").text("One"))
                        .child(Element::div().class("body").text("First")),
                )
                .child(
                    Element::section()
                        .class("panel")
                        .class("wide")
                        .child(Element::button().text("Two"))
                        .child(Element::div().child(Element::p().text("Second"))),
                ),
        ),
    )
}

fn tags(doc: &Document, ids: &[windom::NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| doc.get(*id).map(|el| el.tag.clone()).unwrap_or_default())
        .collect()
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_empty_selector() {
    assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
}

#[test]
fn test_parse_unsupported_syntax() {
    for bad in ["div >", "a,,b", "[unclosed", "div:hover", "a + b", "#"] {
        assert!(
            matches!(Selector::parse(bad), Err(SelectorError::Unsupported(_))),
            "expected {bad:?} to be rejected"
        );
    }
}

#[test]
fn test_parse_keeps_source() {
    let selector: Selector = " .panel > button ".parse().unwrap();
    assert_eq!(selector.as_str(), ".panel > button");
    assert_eq!(selector.to_string(), ".panel > button");
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_type_selector_in_document_order() {
    let doc = page();
    let found = doc.query_selector_all("section").unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(tags(&doc, &found), vec!["section", "section"]);
}

#[test]
fn test_id_and_class_selectors() {
    let doc = page();
    assert!(doc.query_selector("#main").unwrap().is_some());
    assert!(doc.query_selector("#missing").unwrap().is_none());
    assert_eq!(doc.query_selector_all(".panel").unwrap().len(), 2);
    assert_eq!(doc.query_selector_all(".panel.wide").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("div.wrap").unwrap().len(), 1);
}

#[test]
fn test_attribute_selectors() {
    let doc = page();
    assert_eq!(doc.query_selector_all("[data-kind]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[data-kind=faq]").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[data-kind='faq']").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("[data-kind=\"other\"]").unwrap().len(), 0);
    // class is visible as an attribute too
    assert_eq!(doc.query_selector_all("[class=toggle]").unwrap().len(), 1);
}

#[test]
fn test_descendant_and_child_combinators() {
    let doc = page();
    // Both buttons are descendants of #main, neither is a direct child
    assert_eq!(doc.query_selector_all("#main button").unwrap().len(), 2);
    assert_eq!(doc.query_selector_all("#main > button").unwrap().len(), 0);
    assert_eq!(doc.query_selector_all("#main > section > button").unwrap().len(), 2);
    // Only the second panel's div has a paragraph below it
    assert_eq!(doc.query_selector_all("section div p").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("section > p").unwrap().len(), 0);
}

#[test]
fn test_descendant_match_backtracks_past_nearest_ancestor() {
    // `.outer > .mid .leaf` must skip the nearest `.mid` that is not a child of `.outer`
    let doc = Document::new(
        Element::new("body").child(
            Element::div().class("outer").child(
                Element::div().class("mid").child(
                    Element::div()
                        .class("mid")
                        .child(Element::span().class("leaf")),
                ),
            ),
        ),
    );
    assert_eq!(doc.query_selector_all(".outer > .mid .leaf").unwrap().len(), 1);
}

#[test]
fn test_selector_groups_deduplicate() {
    let doc = page();
    let found = doc.query_selector_all("button, .toggle, p").unwrap();
    assert_eq!(tags(&doc, &found), vec!["button", "button", "p"]);
}

#[test]
fn test_universal_selector() {
    let doc = page();
    // body, #main, 2 sections, 2 buttons, 3 divs below sections, 1 p
    assert_eq!(doc.query_selector_all("*").unwrap().len(), 9);
    assert_eq!(doc.query_selector_all("section > *").unwrap().len(), 4);
}

// ============================================================================
// Scoped queries
// ============================================================================

#[test]
fn test_scoped_query_excludes_scope_and_outside_nodes() {
    let doc = page();
    let sections = doc.query_selector_all("section").unwrap();
    let second = sections[1];

    let buttons = doc.query_selector_all_in(second, "button").unwrap();
    assert_eq!(buttons.len(), 1);
    assert_eq!(
        doc.get(buttons[0]).map(|el| el.text_content()),
        Some("Two".to_string())
    );

    // The scope itself is never returned
    assert!(doc.query_selector_in(second, "section").unwrap().is_none());
}

#[test]
fn test_scoped_query_sees_ancestors_for_combinators() {
    let doc = page();
    let first = doc.query_selector("section").unwrap().unwrap();
    // `#main` lies outside the scope but still satisfies the combinator
    assert!(doc.query_selector_in(first, "#main button").unwrap().is_some());
}
