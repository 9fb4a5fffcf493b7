//! Normalized element tree shared by every engine, transform and serializer.
//!
//! The shape mirrors the HTML abstract syntax tree used by the web tooling
//! that consumes highlighted code: text leaves and elements carrying a tag
//! name, ordered attributes and ordered children.

use indexmap::IndexMap;

/// Attribute key holding the space-separated class list.
pub const CLASS_NAME: &str = "className";

/// A scalar member of a record-valued attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Number(f64::from(value))
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

/// Value of an element attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Plain string value.
    String(String),
    /// List of tokens, space-joined when rendered.
    List(Vec<String>),
    /// Key/value record (e.g. an inline style object).
    Record(IndexMap<String, Primitive>),
}

impl AttributeValue {
    /// The value as a single string, if it has a flat string form.
    pub fn joined(&self) -> Option<String> {
        match self {
            AttributeValue::String(value) => Some(value.clone()),
            AttributeValue::List(values) => Some(values.join(" ")),
            AttributeValue::Record(_) => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::List(values)
    }
}

impl From<IndexMap<String, Primitive>> for AttributeValue {
    fn from(record: IndexMap<String, Primitive>) -> Self {
        AttributeValue::Record(record)
    }
}

/// Attributes in insertion order.
pub type Attributes = IndexMap<String, AttributeValue>;

/// An element node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag_name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set the class list. Blank class strings leave the attribute unset.
    pub fn with_class(mut self, class: &str) -> Self {
        self.set_class(class);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set the class list, normalizing whitespace and dropping duplicates.
    pub fn set_class(&mut self, class: &str) {
        match join_classes(class.split_whitespace()) {
            Some(class) => {
                self.attributes
                    .insert(CLASS_NAME.to_string(), AttributeValue::String(class));
            }
            None => {
                self.attributes.shift_remove(CLASS_NAME);
            }
        }
    }

    /// The class list as a single string.
    pub fn class_name(&self) -> Option<String> {
        self.attributes.get(CLASS_NAME).and_then(AttributeValue::joined)
    }

    /// Copy of this element with the same tag and attributes but new children.
    pub fn shallow_clone(&self, children: Vec<Node>) -> Self {
        Self {
            tag_name: self.tag_name.clone(),
            attributes: self.attributes.clone(),
            children,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(value) => Some(value),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Concatenated text of every leaf under this node.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(value) => value.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    /// Visit this node and all its descendants in document order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        if let Node::Element(element) = self {
            for child in &element.children {
                child.walk(visit);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// Top-level sequence of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Node>,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// A root holding `value` as a single text leaf.
    pub fn text(value: &str) -> Self {
        Self {
            children: vec![Node::text(value)],
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Visit every node in document order.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&'a Node)) {
        for child in &self.children {
            child.walk(&mut visit);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(value) => out.push_str(value),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Append text to a child list, merging into a trailing text leaf.
pub fn push_text(children: &mut Vec<Node>, value: &str) {
    if value.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = children.last_mut() {
        last.push_str(value);
    } else {
        children.push(Node::text(value));
    }
}

/// Join class tokens with single spaces, keeping the first occurrence of each.
pub fn join_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let mut seen: Vec<&str> = Vec::new();
    for class in classes.into_iter().flat_map(str::split_whitespace) {
        if !seen.contains(&class) {
            seen.push(class);
        }
    }
    if seen.is_empty() {
        None
    } else {
        Some(seen.join(" "))
    }
}
