//! Live node tree.
//!
//! Nodes are shared handles, so a node's identity survives every patch that
//! only touches its text or attributes. Two handles are the same node iff
//! [`NodeRef::ptr_eq`] holds.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html};
use std::cell::RefCell;
use std::rc::Rc;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

#[derive(Debug)]
enum Node {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeRef>,
    },
    Text(String),
}

/// Handle to a node of the live tree
#[derive(Debug, Clone)]
pub struct NodeRef(Rc<RefCell<Node>>);

impl NodeRef {
    pub fn element(tag: impl Into<String>) -> Self {
        NodeRef(Rc::new(RefCell::new(Node::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        })))
    }

    pub fn text(data: impl Into<String>) -> Self {
        NodeRef(Rc::new(RefCell::new(Node::Text(data.into()))))
    }

    /// Same node, not merely an equal one
    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_element(&self) -> bool {
        matches!(&*self.0.borrow(), Node::Element { .. })
    }

    pub fn tag(&self) -> Option<String> {
        match &*self.0.borrow() {
            Node::Element { tag, .. } => Some(tag.clone()),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> Vec<NodeRef> {
        match &*self.0.borrow() {
            Node::Element { children, .. } => children.clone(),
            Node::Text(_) => Vec::new(),
        }
    }

    /// Append `child`; text nodes cannot have children
    pub fn append_child(&self, child: NodeRef) {
        if let Node::Element { children, .. } = &mut *self.0.borrow_mut() {
            children.push(child);
        }
    }

    pub fn clear_children(&self) {
        if let Node::Element { children, .. } = &mut *self.0.borrow_mut() {
            children.clear();
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        match &*self.0.borrow() {
            Node::Element { attributes, .. } => attributes.clone(),
            Node::Text(_) => Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.0.borrow() {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
            Node::Text(_) => None,
        }
    }

    /// Set or overwrite an attribute. Returns whether anything changed.
    pub fn set_attribute(&self, name: &str, value: &str) -> bool {
        let Node::Element { attributes, .. } = &mut *self.0.borrow_mut() else {
            return false;
        };
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) if current == value => false,
            Some((_, current)) => {
                *current = value.to_string();
                true
            }
            None => {
                attributes.push((name.to_string(), value.to_string()));
                true
            }
        }
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        let Node::Element { attributes, .. } = &mut *self.0.borrow_mut() else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(n, _)| n != name);
        attributes.len() != before
    }

    /// Concatenated text of every descendant text node
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &*self.0.borrow() {
            Node::Text(data) => out.push_str(data),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// An element whose children are all text nodes
    pub fn is_leaf_element(&self) -> bool {
        match &*self.0.borrow() {
            Node::Element { children, .. } => children.iter().all(|c| !c.is_element()),
            Node::Text(_) => false,
        }
    }

    /// Replace the text of a leaf element, reusing its first text node.
    ///
    /// Elements with element children are left alone and `false` is returned.
    pub fn set_text_content(&self, text: &str) -> bool {
        if !self.is_leaf_element() {
            return false;
        }
        let Node::Element { children, .. } = &mut *self.0.borrow_mut() else {
            return false;
        };
        match children.first() {
            Some(first) => {
                if let Node::Text(data) = &mut *first.0.borrow_mut() {
                    *data = text.to_string();
                }
                children.truncate(1);
            }
            None => children.push(NodeRef::text(text)),
        }
        true
    }

    /// Deep structural equality: tag, attribute set, and children in order
    pub fn is_equal_node(&self, other: &NodeRef) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (&*self.0.borrow(), &*other.0.borrow()) {
            (Node::Text(a), Node::Text(b)) => a == b,
            (
                Node::Element {
                    tag: tag_a,
                    attributes: attrs_a,
                    children: children_a,
                },
                Node::Element {
                    tag: tag_b,
                    attributes: attrs_b,
                    children: children_b,
                },
            ) => {
                tag_a == tag_b
                    && attrs_a.len() == attrs_b.len()
                    && attrs_a.iter().all(|attr| attrs_b.contains(attr))
                    && children_a.len() == children_b.len()
                    && children_a
                        .iter()
                        .zip(children_b)
                        .all(|(a, b)| a.is_equal_node(b))
            }
            _ => false,
        }
    }

    /// Every descendant element in pre-order, excluding `self`
    pub fn descendant_elements(&self) -> Vec<NodeRef> {
        let mut out = Vec::new();
        for child in self.children() {
            child.collect_elements(&mut out);
        }
        out
    }

    fn collect_elements(&self, out: &mut Vec<NodeRef>) {
        if !self.is_element() {
            return;
        }
        out.push(self.clone());
        for child in self.children() {
            child.collect_elements(out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Serialized children, without the element's own tag
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in self.children() {
            child.write_html(&mut out);
        }
        out
    }

    fn write_html(&self, out: &mut String) {
        match &*self.0.borrow() {
            Node::Text(data) => out.push_str(&encode_text(data)),
            Node::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Parse a markup string into detached top-level nodes
pub fn parse_fragment(markup: &str) -> Vec<NodeRef> {
    let fragment = Html::parse_fragment(markup);
    convert_children(fragment.root_element())
}

fn convert_children(parent: ElementRef<'_>) -> Vec<NodeRef> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            nodes.push(convert_element(element));
        } else if let Some(text) = child.value().as_text() {
            nodes.push(NodeRef::text(&**text));
        }
    }
    nodes
}

fn convert_element(element: ElementRef<'_>) -> NodeRef {
    let node = NodeRef::element(element.value().name());
    for (name, value) in element.value().attrs() {
        node.set_attribute(name, value);
    }
    for child in convert_children(element) {
        node.append_child(child);
    }
    node
}
