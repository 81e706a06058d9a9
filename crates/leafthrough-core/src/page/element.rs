//! Element tree for rendered pages.
//!
//! A [`Page`] owns a tree of [`Element`]s addressed by [`ElementId`].
//! Ids are stable for the lifetime of the page, so interaction layers
//! can hold on to them and read element state fresh at event time.

/// Handle to one element of a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// What kind of node an element is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Grouping element with no content of its own
    Container,
    /// Section or page heading
    Heading,
    /// Plain text content
    Text,
    /// Link carrying an optional navigation target
    Anchor,
}

/// One element: a kind plus class markers, optional text and an
/// optional navigation target
#[derive(Debug, Clone)]
pub struct Element {
    pub kind: ElementKind,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub href: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            text: None,
            href: None,
        }
    }

    /// Add a class marker (builder style)
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Set the text content (builder style)
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the navigation target (builder style)
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

struct Node {
    element: Element,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// An element tree with a fixed root container
pub struct Page {
    nodes: Vec<Node>,
}

impl Page {
    /// Create an empty page holding only the root container
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                element: Element::new(ElementKind::Container),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Append an element as the last child of `parent`, returning its id
    pub fn append(&mut self, parent: ElementId, element: Element) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Borrow an element. Ids must come from this page.
    pub fn get(&self, id: ElementId) -> &Element {
        &self.nodes[id.0].element
    }

    /// Mutably borrow an element. Ids must come from this page.
    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.nodes[id.0].element
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.nodes[id.0].children
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.get(id).has_class(class)
    }

    /// Navigation target of an element, read at call time
    pub fn nav_target(&self, id: ElementId) -> Option<&str> {
        self.get(id).href.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root container always exists
        self.nodes.len() == 1
    }

    /// All elements matching `selector`, in document order
    pub fn select(&self, selector: &Selector) -> Vec<ElementId> {
        let mut matches = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            if selector.matches(self, id) {
                matches.push(id);
            }
            for child in self.children(id).iter().rev() {
                stack.push(*child);
            }
        }

        matches
    }

    fn descendant_of_class(&self, id: ElementId, class: &str) -> bool {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if self.has_class(ancestor, class) {
                return true;
            }
            current = self.parent(ancestor);
        }
        false
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

/// A small CSS-like query over a page: element kind, own class and an
/// ancestor class. Every part that is set must match.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    kind: Option<ElementKind>,
    class: Option<String>,
    within: Option<String>,
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a specific element kind
    pub fn kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require a class on the element itself
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Require a class on some ancestor of the element
    pub fn within(mut self, class: &str) -> Self {
        self.within = Some(class.to_string());
        self
    }

    fn matches(&self, page: &Page, id: ElementId) -> bool {
        if let Some(kind) = self.kind {
            if page.get(id).kind != kind {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !page.has_class(id, class) {
                return false;
            }
        }
        if let Some(class) = &self.within {
            if !page.descendant_of_class(id, class) {
                return false;
            }
        }
        true
    }
}
