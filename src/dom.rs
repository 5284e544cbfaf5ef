//! Element capability used by every component, plus an in-memory adapter.
//!
//! Components never reach for a global document: they are handed the elements they
//! operate on. `Node` is a cheap shared handle (clones point at the same element),
//! which mirrors how a page hands out references to live DOM nodes.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Read/mutate primitives the loader needs from a page element.
///
/// Methods take `&self`: elements are shared handles with interior mutability.
pub trait Element {
    fn has_class(&self, class: &str) -> bool;
    /// Class list in insertion order.
    fn classes(&self) -> Vec<String>;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn attribute(&self, name: &str) -> Option<String>;
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, markup: &str);
}

/// One recorded mutation on a `Node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomOp {
    AddClass(String),
    RemoveClass(String),
    SetInnerHtml(String),
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    inner_html: String,
    journal: Vec<DomOp>,
}

/// In-memory element. Every mutating call is journaled, including no-op ones.
#[derive(Debug, Clone, Default)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn new(tag: &str) -> Self {
        Node(Rc::new(RefCell::new(NodeData {
            tag: tag.to_string(),
            ..Default::default()
        })))
    }

    /// Build an element from raw attribute pairs. `class` is split on whitespace
    /// into the class list, like a browser does.
    pub fn from_attributes<I, K, V>(tag: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let node = Node::new(tag);
        {
            let mut data = node.0.borrow_mut();
            for (name, value) in attributes {
                let (name, value) = (name.into(), value.into());
                if name == "class" {
                    for class in value.split_whitespace() {
                        if !data.classes.iter().any(|c| c == class) {
                            data.classes.push(class.to_string());
                        }
                    }
                } else {
                    data.attributes.insert(name, value);
                }
            }
        }
        node
    }

    pub fn with_class(self, class: &str) -> Self {
        {
            let mut data = self.0.borrow_mut();
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn journal(&self) -> Vec<DomOp> {
        self.0.borrow().journal.clone()
    }

    /// How many times `op` was recorded.
    pub fn count(&self, op: &DomOp) -> usize {
        self.0.borrow().journal.iter().filter(|o| *o == op).count()
    }

    pub fn clear_journal(&self) {
        self.0.borrow_mut().journal.clear();
    }

    /// True when both handles refer to the same element.
    pub fn same_node(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Element for Node {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    fn add_class(&self, class: &str) {
        let mut data = self.0.borrow_mut();
        data.journal.push(DomOp::AddClass(class.to_string()));
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        let mut data = self.0.borrow_mut();
        data.journal.push(DomOp::RemoveClass(class.to_string()));
        data.classes.retain(|c| c != class);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let data = self.0.borrow();
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, markup: &str) {
        let mut data = self.0.borrow_mut();
        data.journal.push(DomOp::SetInnerHtml(markup.to_string()));
        data.inner_html = markup.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = Node::new("div");
        let b = a.clone();
        b.add_class("open");
        assert!(a.has_class("open"));
        assert!(a.same_node(&b));
        assert!(!a.same_node(&Node::new("div")));
    }

    #[test]
    fn from_attributes_splits_class_list() {
        let node = Node::from_attributes(
            "a",
            [
                ("class", "load-in-modal  extra load-in-modal"),
                ("href", "/about"),
            ],
        );
        assert_eq!(node.classes(), vec!["load-in-modal", "extra"]);
        assert_eq!(node.attribute("href").as_deref(), Some("/about"));
        assert_eq!(node.attribute("class").as_deref(), Some("load-in-modal extra"));
        assert_eq!(node.tag(), "a");
    }

    #[test]
    fn add_class_is_idempotent_but_journaled() {
        let node = Node::new("div");
        node.add_class("show");
        node.add_class("show");
        assert_eq!(node.classes(), vec!["show"]);
        assert_eq!(node.count(&DomOp::AddClass("show".into())), 2);
    }

    #[test]
    fn remove_missing_class_is_harmless() {
        let node = Node::new("div").with_class("a");
        node.remove_class("b");
        assert_eq!(node.classes(), vec!["a"]);
    }

    #[test]
    fn set_inner_html_replaces_content() {
        let node = Node::new("div");
        node.set_inner_html("<p>one</p>");
        node.set_inner_html("");
        assert_eq!(node.inner_html(), "");
        assert_eq!(
            node.journal(),
            vec![
                DomOp::SetInnerHtml("<p>one</p>".into()),
                DomOp::SetInnerHtml(String::new()),
            ]
        );
        node.clear_journal();
        assert!(node.journal().is_empty());
    }

    #[test]
    fn builder_does_not_journal() {
        let node = Node::new("a").with_class("x").with_attr("href", "/");
        assert!(node.journal().is_empty());
        assert_eq!(node.attribute("missing"), None);
    }
}
