use windom::{Document, NodeId};

/// Set every `name → value` pair on `target`.
///
/// Silently does nothing when `target` does not resolve to an element in
/// `doc`. Returns whether the attributes were applied.
pub fn set_attrs<K, V>(doc: &mut Document, target: NodeId, attrs: impl IntoIterator<Item = (K, V)>) -> bool
where
    K: AsRef<str>,
    V: ToString,
{
    let Some(element) = doc.get_mut(target) else {
        log::trace!("[windbox] set_attrs: {target} is not an element, skipped");
        return false;
    };

    for (name, value) in attrs {
        element.set_attribute(name.as_ref(), value.to_string());
    }
    true
}

#[cfg(test)]
mod tests {
    use windom::Element;

    use super::*;

    #[test]
    fn test_sets_mixed_value_types() {
        let mut doc = Document::default();
        let root = doc.root_id();
        let button = doc.append_child(root, Element::button()).unwrap();

        assert!(set_attrs(&mut doc, button, [("aria-expanded", false)]));
        assert!(set_attrs(&mut doc, button, [("aria-controls", "x")]));
        assert_eq!(doc.get_attribute(button, "aria-expanded").as_deref(), Some("false"));
        assert_eq!(doc.get_attribute(button, "aria-controls").as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_target_is_a_silent_no_op() {
        let mut doc = Document::default();
        let before = doc.to_string();
        let detached = Element::div().node_id;

        assert!(!set_attrs(&mut doc, detached, [("role", "region")]));
        assert_eq!(doc.to_string(), before);
    }
}
