use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of an element.
///
/// Unlike the `id` attribute, which the page (or a widget) may rewrite at any
/// time, a `NodeId` never changes for the life of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub node_id: NodeId,
    pub tag: String,

    // Content
    pub content: Content,

    // Attributes, in insertion order. `class` and `style` live in their own fields.
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    /// Inline style properties, in insertion order.
    pub style: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node_id: NodeId::next(),
            tag: tag.into().to_ascii_lowercase(),
            content: Content::None,
            attributes: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn button() -> Self {
        Self::new("button")
    }

    pub fn section() -> Self {
        Self::new("section")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn p() -> Self {
        Self::new("p")
    }

    // Builders

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        self.add_class(class.as_ref());
        self
    }

    pub fn attr(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_attribute(name.as_ref(), value);
        self
    }

    pub fn style_property(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_style_property(name.as_ref(), value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => {
                // Text is replaced by children
                self.content = Content::Children(vec![child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            "class" => None,
            "style" if !self.style.is_empty() => Some(self.style_text()),
            "style" => None,
            _ => self
                .attributes
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone()),
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "class" => {
                self.classes.clear();
                for class in value.split_ascii_whitespace() {
                    self.add_class(class);
                }
            }
            "style" => {
                self.style.clear();
                for decl in value.split(';') {
                    if let Some((prop, val)) = decl.split_once(':') {
                        self.set_style_property(prop.trim(), val.trim());
                    }
                }
            }
            _ => match self.attributes.iter_mut().find(|(k, _)| *k == name) {
                Some((_, existing)) => *existing = value,
                None => self.attributes.push((name, value)),
            },
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.classes.clear(),
            "style" => self.style.clear(),
            _ => self.attributes.retain(|(k, _)| *k != name),
        }
    }

    /// Value of the `id` attribute, if set.
    pub fn dom_id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.as_str())
    }

    // Class list

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    // Inline style

    pub fn get_style_property(&self, name: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_style_property(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        if value.is_empty() {
            self.remove_style_property(&name);
            return;
        }
        match self.style.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.style.push((name, value)),
        }
    }

    pub fn remove_style_property(&mut self, name: &str) {
        self.style.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    }

    pub(crate) fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // Tree

    pub fn child_elements(&self) -> &[Element] {
        self.content.children()
    }

    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(text) => text.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }
}
