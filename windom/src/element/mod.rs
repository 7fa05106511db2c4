mod content;
mod node;

pub use content::Content;
pub use node::{Element, NodeId};

/// Find an element by node ID in the tree.
pub fn find_element(root: &Element, node_id: NodeId) -> Option<&Element> {
    if root.node_id == node_id {
        return Some(root);
    }

    for child in root.content.children() {
        if let Some(found) = find_element(child, node_id) {
            return Some(found);
        }
    }

    None
}

/// Mutable variant of [`find_element`].
pub fn find_element_mut(root: &mut Element, node_id: NodeId) -> Option<&mut Element> {
    if root.node_id == node_id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, node_id) {
                return Some(found);
            }
        }
    }

    None
}

/// Path of node IDs from `root` down to `node_id`, both inclusive.
/// Returns None if the node is not in the tree.
pub fn find_path(root: &Element, node_id: NodeId) -> Option<Vec<NodeId>> {
    if root.node_id == node_id {
        return Some(vec![root.node_id]);
    }

    for child in root.content.children() {
        if let Some(mut path) = find_path(child, node_id) {
            path.insert(0, root.node_id);
            return Some(path);
        }
    }

    None
}

/// Remove the element with `node_id` from the subtree below `root`.
/// The root itself cannot be removed.
pub(crate) fn detach(root: &mut Element, node_id: NodeId) -> Option<Element> {
    let children = root.content.children_mut()?;

    if let Some(pos) = children.iter().position(|c| c.node_id == node_id) {
        return Some(children.remove(pos));
    }

    children.iter_mut().find_map(|child| detach(child, node_id))
}
