//! The retained document: an element tree plus event listeners.

use std::collections::HashMap;
use std::sync::Arc;

use crate::element::{self, find_element, find_element_mut, find_path, Content, Element, NodeId};
use crate::event::{Event, EventKind, Key};
use crate::selector::{Selector, SelectorError};

/// An event listener.
///
/// Listeners receive the document mutably so they can react to the event by
/// rewriting the tree. They are cloned out of the registry before being
/// invoked, so a listener may add or remove listeners while it runs.
pub type Listener = Arc<dyn Fn(&mut Document, &Event) + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&mut Document, &Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

struct Registration {
    kind: EventKind,
    listener: Listener,
}

pub struct Document {
    root: Element,
    listeners: HashMap<NodeId, Vec<Registration>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("listeners", &self.listener_total())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Element::new("body"))
    }
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            listeners: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.node_id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        find_element(&self.root, node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        find_element_mut(&mut self.root, node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let path = find_path(&self.root, node)?;
        path.len().checked_sub(2).map(|i| path[i])
    }

    /// Element children of `node`, in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|el| el.child_elements().iter().map(|c| c.node_id).collect())
            .unwrap_or_default()
    }

    /// `node` followed by its ancestors up to the root (bubbling order).
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = find_path(&self.root, node).unwrap_or_default();
        path.reverse();
        path
    }

    /// Find the element whose `id` attribute equals `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut found = None;
        walk(&self.root, &mut Vec::new(), &mut |el, _| {
            if found.is_none() && el.dom_id() == Some(id) {
                found = Some(el.node_id);
            }
        });
        found
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// First element in the document matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// All elements in the document matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector, None))
    }

    /// First descendant of `scope` matching `selector`.
    ///
    /// As with the DOM, the selector is matched against the whole document,
    /// so combinators may reach ancestors outside the scope. Only the matched
    /// element itself must lie below `scope`.
    pub fn query_selector_in(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.query_selector_all_in(scope, selector)?.into_iter().next())
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all_in(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector, Some(scope)))
    }

    /// Run a pre-parsed selector, optionally restricted to descendants of `scope`.
    pub fn select(&self, selector: &Selector, scope: Option<NodeId>) -> Vec<NodeId> {
        let mut matched = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut |el, ancestors| {
            let in_scope = match scope {
                Some(scope) => ancestors.iter().any(|a| a.node_id == scope),
                None => true,
            };
            if in_scope && selector.matches(el, ancestors) {
                matched.push(el.node_id);
            }
        });
        log::trace!(
            "[windom] select {:?} scope={:?} -> {} match(es)",
            selector.as_str(),
            scope,
            matched.len()
        );
        matched
    }

    // =========================================================================
    // Attribute / class / style shortcuts
    // =========================================================================

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.get_attribute(name)
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|el| el.has_class(class))
    }

    pub fn style_property(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.get_style_property(name).map(str::to_string)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append `child` under `parent`. Returns the new child's node ID, or None
    /// if `parent` is not in the document.
    pub fn append_child(&mut self, parent: NodeId, child: Element) -> Option<NodeId> {
        let parent = self.get_mut(parent)?;
        let child_id = child.node_id;
        match &mut parent.content {
            Content::Children(children) => children.push(child),
            content => *content = Content::Children(vec![child]),
        }
        log::trace!("[windom] appended {child_id}");
        Some(child_id)
    }

    /// Detach `node` and its subtree. Listeners registered anywhere in the
    /// subtree are dropped. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> Option<Element> {
        let removed = element::detach(&mut self.root, node)?;
        let mut dropped = 0usize;
        walk(&removed, &mut Vec::new(), &mut |el, _| {
            if let Some(regs) = self.listeners.remove(&el.node_id) {
                dropped += regs.len();
            }
        });
        log::debug!("[windom] removed {node} ({dropped} listener(s) dropped)");
        Some(removed)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe `listener` to `kind` events reaching `node`. Returns false
    /// (and registers nothing) when `node` is not in the document.
    pub fn add_event_listener(&mut self, node: NodeId, kind: EventKind, listener: Listener) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.listeners
            .entry(node)
            .or_default()
            .push(Registration { kind, listener });
        true
    }

    /// Drop every listener on `node`.
    pub fn remove_event_listeners(&mut self, node: NodeId) {
        self.listeners.remove(&node);
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners.get(&node).map(Vec::len).unwrap_or(0)
    }

    fn listener_total(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Fire a click at `node`. Returns the number of listeners invoked.
    pub fn click(&mut self, node: NodeId) -> usize {
        self.dispatch(Event::Click {
            target: node,
            current_target: node,
        })
    }

    /// Fire a key press at `node`. Returns the number of listeners invoked.
    pub fn key(&mut self, node: NodeId, key: Key) -> usize {
        self.dispatch(Event::Key {
            target: node,
            current_target: node,
            key,
        })
    }

    /// Click the first element matching `selector`.
    pub fn click_selector(&mut self, selector: &str) -> Result<usize, SelectorError> {
        match self.query_selector(selector)? {
            Some(node) => Ok(self.click(node)),
            None => Ok(0),
        }
    }

    /// Dispatch `event` at its target, bubbling up through ancestors.
    pub fn dispatch(&mut self, event: Event) -> usize {
        let path = self.ancestors(event.target());
        if path.is_empty() {
            log::debug!("[windom] dropped {:?}: target not in document", event.kind());
            return 0;
        }

        let kind = event.kind();
        let mut invoked = 0usize;
        for node in path {
            let listeners: Vec<Listener> = self
                .listeners
                .get(&node)
                .map(|regs| {
                    regs.iter()
                        .filter(|r| r.kind == kind)
                        .map(|r| Arc::clone(&r.listener))
                        .collect()
                })
                .unwrap_or_default();

            if listeners.is_empty() {
                continue;
            }

            let current = event.with_current_target(node);
            for listener in listeners {
                listener(self, &current);
                invoked += 1;
            }
        }

        log::trace!(
            "[windom] dispatched {:?} at {} to {} listener(s)",
            kind,
            event.target(),
            invoked
        );
        invoked
    }
}

/// Depth-first, document-order traversal. `ancestors` runs from the root
/// down to the visited element's parent.
fn walk<'a, F>(element: &'a Element, ancestors: &mut Vec<&'a Element>, f: &mut F)
where
    F: FnMut(&'a Element, &[&'a Element]),
{
    f(element, ancestors);
    ancestors.push(element);
    for child in element.child_elements() {
        walk(child, ancestors, f);
    }
    ancestors.pop();
}
