//! Arena-backed element tree.

use std::collections::BTreeMap;

/// Index of an element in its `ContentTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// One element: tag, classes, attributes, its own inner HTML and children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub inner_html: String,
    children: Vec<ElementId>,
    parent: Option<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = html.into();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

#[derive(Debug, Clone)]
pub struct ContentTree {
    elements: Vec<Element>,
}

impl ContentTree {
    /// A tree containing only `root`.
    pub fn new(root: Element) -> Self {
        Self {
            elements: vec![Element {
                children: Vec::new(),
                parent: None,
                ..root
            }],
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Attach `element` as the last child of `parent`.
    ///
    /// Returns `None` when `parent` does not belong to this tree.
    pub fn append(&mut self, parent: ElementId, element: Element) -> Option<ElementId> {
        if parent.0 >= self.elements.len() {
            return None;
        }
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            children: Vec::new(),
            parent: Some(parent),
            ..element
        });
        self.elements[parent.0].children.push(id);
        Some(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// `id` and everything below it, in document (pre-)order.
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.get(id).is_none() {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(element) = self.get(current) {
                stack.extend(element.children.iter().rev().copied());
            }
        }
        out
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node) = current {
            out.push(node);
            current = self.get(node).and_then(|element| element.parent);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
