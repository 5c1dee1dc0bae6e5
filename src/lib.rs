/*!
Build an HTML document tree from an [HTML5](https://html.spec.whatwg.org/) token stream.

The root point of the documentations is [`Document::parse`].

Unlike a browser, the tree builder doesn't try to repair the markup.
Every element must be closed by a matching close tag, unless it's a void element
or a self-closed one, and the doctype must precede any element.
Any violation aborts the parsing.

Tokenization is done by [html5ever](https://docs.rs/html5ever).

The tree structure itself is a heavily modified <https://github.com/programble/ego-tree>
License: ISC.

[`Document::parse`]: struct.Document.html#method.parse
*/

#![doc(html_root_url = "https://docs.rs/h5tree/0.1.0")]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate html5ever;
#[macro_use] extern crate log;

use std::fmt;
use std::io;

mod parse;
mod sink;
mod stack;
mod token;
mod tokenizer;
mod writer;

#[cfg(test)]
mod tokenizer_tests;

pub use parse::*;
pub use sink::TreeSink;
pub use stack::{AncestorStack, DEFAULT_STACK_CAPACITY, MAX_STACK_CAPACITY};
pub use token::{
    is_raw_text_element,
    is_void_element,
    AttributeName,
    HtmlEvents,
    Token,
    TokenAttribute,
    TokenKind,
};
pub use tokenizer::Tokenizer;
pub use writer::{reserialize, HtmlWriter, Serializer, TokenWriter};


/// An HTML tree container.
///
/// A tree consists of [`Nodes`].
/// There are no separate structs for each node type.
/// So you should check the current node type yourself via [`Node::node_type()`].
/// There are only [5 types](enum.NodeType.html):
/// Document, Doctype, Element, Comment and Text.
///
/// The document node is always present, even when the tree is empty.
/// Its children are an optional doctype, document-level comments and text,
/// and the root element.
///
/// Nodes are only referenced by [`NodeId`], so the document is the sole owner
/// of all of them.
///
/// [`Nodes`]: struct.Node.html
/// [`Node::node_type()`]: struct.Node.html#method.node_type
/// [`NodeId`]: struct.NodeId.html
#[derive(Clone, PartialEq)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Creates an empty document.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::new();
    /// assert!(doc.root().is_document());
    /// assert!(doc.root_element().is_none());
    /// ```
    pub fn new() -> Self {
        Document {
            nodes: vec![NodeData::new(NodeKind::Document)],
        }
    }

    /// Returns the document node.
    pub fn root(&self) -> Node {
        self.get(NodeId(0))
    }

    /// Returns the root element of the document.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<!-- comment --><e></e>").unwrap();
    /// assert!(doc.root_element().unwrap().has_tag_name("e"));
    /// ```
    pub fn root_element(&self) -> Option<Node> {
        self.root().first_element_child()
    }

    /// Returns the document type declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<!DOCTYPE html><html></html>").unwrap();
    /// assert_eq!(doc.doctype().unwrap().name(), "html");
    /// ```
    pub fn doctype(&self) -> Option<&Doctype> {
        self.root().children().filter_map(|n| n.doctype()).nth(0)
    }

    /// Returns a node by its ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID doesn't belong to this document.
    pub fn get(&self, id: NodeId) -> Node {
        Node { id, d: &self.nodes[id.0], doc: self }
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    pub fn descendants(&self) -> Descendants {
        self.root().descendants()
    }

    /// Returns the number of nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Writes the document as HTML.
    pub fn write_html<W: io::Write>(&self, out: W) -> io::Result<()> {
        writer::write_node(self.root(), out)
    }

    /// Returns the document as HTML.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<p class=a>1 &lt; 2<br></p>").unwrap();
    /// assert_eq!(doc.to_html(), "<p class=\"a\">1 &lt; 2<br></p>");
    /// ```
    pub fn to_html(&self) -> String {
        self.root().to_html()
    }

    fn new_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind));
        id
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut curr = Some(id);
        while let Some(id) = curr {
            if id == ancestor {
                return true;
            }

            curr = self.nodes[id.0].parent;
        }

        false
    }

    fn can_append(&self, parent_id: NodeId, child_id: NodeId) -> bool {
        if parent_id.0 >= self.nodes.len() || child_id.0 >= self.nodes.len() {
            return false;
        }

        let child = &self.nodes[child_id.0];
        if child.parent.is_some() || self.is_ancestor_or_self(child_id, parent_id) {
            return false;
        }

        match (&self.nodes[parent_id.0].kind, &child.kind) {
            (_, NodeKind::Document) => false,
            (NodeKind::Document, NodeKind::Doctype(_)) => {
                !self.get(parent_id).children().any(|n| n.is_doctype() || n.is_element())
            }
            (_, NodeKind::Doctype(_)) => false,
            (NodeKind::Document, _) | (NodeKind::Element { .. }, _) => true,
            (NodeKind::Comment, NodeKind::Text(_)) => self.nodes[parent_id.0].children.is_none(),
            _ => false,
        }
    }

    fn append(&mut self, parent_id: NodeId, new_child_id: NodeId) {
        self.nodes[new_child_id.0].parent = Some(parent_id);

        let last_child_id = self.nodes[parent_id.0].children.map(|(_, id)| id);
        self.nodes[new_child_id.0].prev_sibling = last_child_id;

        if let Some(id) = last_child_id {
            self.nodes[id.0].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.0].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.0].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            }
        );
    }

    // Puts `new_id` at the place of `old_id`, which becomes detached.
    fn replace(&mut self, old_id: NodeId, new_id: NodeId) {
        let old = &self.nodes[old_id.0];
        let (parent, prev, next) = (old.parent, old.prev_sibling, old.next_sibling);

        {
            let new = &mut self.nodes[new_id.0];
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = next;
        }

        if let Some(id) = prev {
            self.nodes[id.0].next_sibling = Some(new_id);
        }

        if let Some(id) = next {
            self.nodes[id.0].prev_sibling = Some(new_id);
        }

        if let Some(parent_id) = parent {
            if let Some((first, last)) = self.nodes[parent_id.0].children {
                let first = if first == old_id { new_id } else { first };
                let last = if last == old_id { new_id } else { last };
                self.nodes[parent_id.0].children = Some((first, last));
            }
        }

        let old = &mut self.nodes[old_id.0];
        old.parent = None;
        old.prev_sibling = None;
        old.next_sibling = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl TreeSink for Document {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        NodeId(0)
    }

    fn new_element(&mut self, name: &str) -> NodeId {
        self.new_node(NodeKind::Element {
            tag_name: name.to_string(),
            attributes: Vec::new(),
        })
    }

    fn new_text(&mut self, text: &str) -> NodeId {
        self.new_node(NodeKind::Text(text.to_string()))
    }

    fn new_comment(&mut self, text: NodeId) -> NodeId {
        let id = self.new_node(NodeKind::Comment);
        if self.can_append(id, text) {
            self.append(id, text);
        }
        id
    }

    fn new_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> NodeId {
        self.new_node(NodeKind::Doctype(Doctype {
            name: name.to_string(),
            public_id: public_id.map(|s| s.to_string()),
            system_id: system_id.map(|s| s.to_string()),
        }))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_append(parent, child) {
            return false;
        }

        self.append(parent, child);
        true
    }

    fn set_document_root(&mut self, node: NodeId) {
        let old_root = self.root_element().map(|n| n.id);
        match old_root {
            Some(old) if old != node => {
                warn!("the root element is replaced");
                self.replace(old, node);
            }
            Some(_) => {}
            None => {
                self.append(NodeId(0), node);
            }
        }
    }

    fn new_attribute(&mut self, owner: NodeId, name: &str, value: Option<&str>) {
        if let NodeKind::Element { ref mut attributes, .. } = self.nodes[owner.0].kind {
            attributes.push(Attribute {
                name: name.to_string(),
                value: value.map(|s| s.to_string()),
            });
        }
    }

    fn element_name(&self, node: NodeId) -> Option<&str> {
        match self.nodes.get(node.0).map(|d| &d.kind) {
            Some(NodeKind::Element { tag_name, .. }) => Some(tag_name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_children(parent: Node, depth: usize, f: &mut fmt::Formatter)
            -> Result<(), fmt::Error>
        {
            for child in parent.children() {
                if child.is_element() {
                    writeln_indented!(depth, f, "Element {{");
                    writeln_indented!(depth, f, "    tag_name: {:?}", child.tag_name());

                    if !child.attributes().is_empty() {
                        writeln_indented!(depth, f, "    attributes: [");
                        for attr in child.attributes() {
                            writeln_indented!(depth + 2, f, "{:?}", attr);
                        }
                        writeln_indented!(depth, f, "    ]");
                    }

                    if child.has_children() {
                        writeln_indented!(depth, f, "    children: [");
                        print_children(child, depth + 2, f)?;
                        writeln_indented!(depth, f, "    ]");
                    }

                    writeln_indented!(depth, f, "}}");
                } else {
                    writeln_indented!(depth, f, "{:?}", child);
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}


/// List of supported node types.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NodeType {
    /// The root node of the `Document`.
    Document,
    /// A document type declaration.
    Doctype,
    /// An element node.
    ///
    /// Only an element can have tag name and attributes.
    Element,
    /// A comment node.
    Comment,
    /// A text node.
    Text,
}


/// A document type declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Doctype {
    name: String,
    public_id: Option<String>,
    system_id: Option<String>,
}

impl Doctype {
    /// Returns the root element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the public identifier.
    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_ref().map(|s| s.as_str())
    }

    /// Returns the system identifier.
    pub fn system_id(&self) -> Option<&str> {
        self.system_id.as_ref().map(|s| s.as_str())
    }
}


/// Node ID.
///
/// Index into a `Document`-internal `Vec`.
/// Only valid for the document that created it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);


#[derive(Clone, PartialEq)]
enum NodeKind {
    Document,
    Doctype(Doctype),
    Element {
        tag_name: String,
        attributes: Vec<Attribute>,
    },
    Comment,
    Text(String),
}


#[derive(Clone, PartialEq)]
struct NodeData {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        NodeData {
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: None,
            kind,
        }
    }
}


/// An attribute.
#[derive(Clone, PartialEq)]
pub struct Attribute {
    name: String,
    value: Option<String>,
}

impl Attribute {
    /// Returns attribute's name.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<e a='b' c></e>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().attributes()[0].name(), "a");
    /// assert_eq!(doc.root_element().unwrap().attributes()[1].name(), "c");
    /// ```
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns attribute's value.
    ///
    /// An attribute without a value has an empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<e a='b' c></e>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().attributes()[0].value(), "b");
    /// assert_eq!(doc.root_element().unwrap().attributes()[1].value(), "");
    /// ```
    pub fn value(&self) -> &str {
        self.value.as_ref().map(|s| s.as_str()).unwrap_or("")
    }

    /// Checks that attribute has a value.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Attribute {{ name: {:?}, value: {:?} }}",
               self.name, self.value)
    }
}


/// A node.
pub struct Node<'a> {
    /// Node ID.
    id: NodeId,

    /// Tree containing the node.
    doc: &'a Document,

    d: &'a NodeData,
}

impl<'a> Copy for Node<'a> {}

impl<'a> Clone for Node<'a> {
    fn clone(&self) -> Self { *self }
}

impl<'a> Eq for Node<'a> {}

impl<'a> PartialEq for Node<'a> {
    fn eq(&self, other: &Self) -> bool {
           self.id == other.id
        && self.doc as *const _ == other.doc as *const _
        && self.d as *const _ == other.d as *const _
    }
}

impl<'a> Node<'a> {
    /// Returns node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns node's type.
    pub fn node_type(&self) -> NodeType {
        match self.d.kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::Doctype(_) => NodeType::Doctype,
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Comment => NodeType::Comment,
            NodeKind::Text(_) => NodeType::Text,
        }
    }

    /// Checks that node is the document node.
    pub fn is_document(&self) -> bool {
        self.node_type() == NodeType::Document
    }

    /// Checks that node is a doctype node.
    pub fn is_doctype(&self) -> bool {
        self.node_type() == NodeType::Doctype
    }

    /// Checks that node is an element node.
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Checks that node is a comment node.
    pub fn is_comment(&self) -> bool {
        self.node_type() == NodeType::Comment
    }

    /// Checks that node is a text node.
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Returns node's document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Returns node's tag name.
    ///
    /// Returns an empty string for non-element nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<e></e>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().tag_name(), "e");
    /// ```
    pub fn tag_name(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Element { ref tag_name, .. } => tag_name,
            _ => "",
        }
    }

    /// Checks that node has a specified tag name.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<e></e>").unwrap();
    ///
    /// assert!(doc.root_element().unwrap().has_tag_name("e"));
    /// assert!(!doc.root_element().unwrap().has_tag_name("b"));
    /// ```
    pub fn has_tag_name(&self, name: &str) -> bool {
        self.is_element() && self.tag_name() == name
    }

    /// Returns the value of the first attribute with the specified name.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<e a='b' a='c'></e>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().attribute("a"), Some("b"));
    /// ```
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes().iter().find(|a| a.name == name).map(|a| a.value())
    }

    /// Checks that element has a specified attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes().iter().any(|a| a.name == name)
    }

    /// Returns element's attributes.
    ///
    /// Attributes are stored in the source order and are never deduplicated.
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns node's text.
    ///
    /// - for an element will return a first text child
    /// - for a comment will return a self text
    /// - for a text node will return a self text
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<p>text</p>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().text(), Some("text"));
    /// ```
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<!-- comment --><e></e>").unwrap();
    ///
    /// assert_eq!(doc.root().first_child().unwrap().text(), Some(" comment "));
    /// ```
    pub fn text(&self) -> Option<&'a str> {
        match self.d.kind {
            NodeKind::Element { .. } | NodeKind::Comment => {
                match self.first_child() {
                    Some(child) => match child.d.kind {
                        NodeKind::Text(ref text) => Some(text.as_str()),
                        _ => None,
                    },
                    None => None,
                }
            }
            NodeKind::Text(ref text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns element's tail text.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<p>text1<br>text2</p>").unwrap();
    ///
    /// let br = doc.descendants().find(|n| n.has_tag_name("br")).unwrap();
    /// assert_eq!(br.tail(), Some("text2"));
    /// ```
    pub fn tail(&self) -> Option<&'a str> {
        if !self.is_element() {
            return None;
        }

        match self.next_sibling() {
            Some(node) => match node.d.kind {
                NodeKind::Text(ref text) => Some(text.as_str()),
                _ => None,
            },
            None => None,
        }
    }

    /// Returns node as a document type declaration.
    pub fn doctype(&self) -> Option<&'a Doctype> {
        match self.d.kind {
            NodeKind::Doctype(ref doctype) => Some(doctype),
            _ => None,
        }
    }

    /// Returns the node and its descendants as HTML.
    pub fn to_html(&self) -> String {
        let mut buf = Vec::new();
        match writer::write_node(*self, &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => String::new(),
        }
    }

    fn gen_node(&self, id: NodeId) -> Node<'a> {
        Node { id, d: &self.doc.nodes[id.0], doc: self.doc }
    }

    /// Returns the parent of this node.
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.gen_node(id))
    }

    /// Returns the parent element of this node.
    pub fn parent_element(&self) -> Option<Self> {
        self.ancestors().filter(|n| n.is_element()).nth(0)
    }

    /// Returns the previous sibling of this node.
    pub fn prev_sibling(&self) -> Option<Self> {
        self.d.prev_sibling.map(|id| self.gen_node(id))
    }

    /// Returns the next sibling of this node.
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.gen_node(id))
    }

    /// Returns the first child of this node.
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.gen_node(id))
    }

    /// Returns the first element child of this node.
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().filter(|n| n.is_element()).nth(0)
    }

    /// Returns the last child of this node.
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.gen_node(id))
    }

    /// Returns the last element child of this node.
    pub fn last_element_child(&self) -> Option<Self> {
        self.children().filter(|n| n.is_element()).last()
    }

    /// Returns true if this node has children.
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(self.parent())
    }

    /// Returns an iterator over next sibling nodes.
    pub fn next_siblings(&self) -> NextSiblings<'a> {
        NextSiblings(self.next_sibling())
    }

    /// Returns an iterator over children nodes.
    pub fn children(&self) -> Children<'a> {
        Children { front: self.first_child(), back: self.last_child() }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    pub fn traverse(&self) -> Traverse<'a> {
        Traverse { root: *self, edge: None }
    }

    /// Returns an iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }
}

impl<'a> fmt::Debug for Node<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.d.kind {
            NodeKind::Document => write!(f, "Document"),
            NodeKind::Doctype(ref doctype) => write!(f, "{:?}", doctype),
            NodeKind::Element { .. } => {
                write!(f, "Element {{ tag_name: {:?}, attributes: {:?} }}",
                       self.tag_name(), self.attributes())
            }
            NodeKind::Comment => write!(f, "Comment({:?})", self.text().unwrap_or("")),
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
        }
    }
}

macro_rules! axis_iterators {
    ($(#[$m:meta] $i:ident($f:path);)*) => {
        $(
            #[$m]
            pub struct $i<'a>(Option<Node<'a>>);
            impl<'a> Clone for $i<'a> {
                fn clone(&self) -> Self {
                    $i(self.0)
                }
            }
            impl<'a> Iterator for $i<'a> {
                type Item = Node<'a>;
                fn next(&mut self) -> Option<Self::Item> {
                    let node = self.0.take();
                    self.0 = node.as_ref().and_then($f);
                    node
                }
            }
        )*
    };
}

axis_iterators! {
    /// Iterator over ancestors.
    Ancestors(Node::parent);

    /// Iterator over next siblings.
    NextSiblings(Node::next_sibling);
}


/// Iterator over children.
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Clone for Children<'a> {
    fn clone(&self) -> Self {
        Self { front: self.front, back: self.back }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            let node = self.front.take();
            self.back = None;
            node
        } else {
            let node = self.front.take();
            self.front = node.as_ref().and_then(Node::next_sibling);
            node
        }
    }
}


/// Open or close edge of a node.
#[derive(Debug)]
pub enum Edge<'a> {
    /// Open.
    Open(Node<'a>),
    /// Close.
    Close(Node<'a>),
}

impl<'a> Copy for Edge<'a> {}

impl<'a> Clone for Edge<'a> {
    fn clone(&self) -> Self { *self }
}

impl<'a> Eq for Edge<'a> {}

impl<'a> PartialEq for Edge<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Edge::Open(a), Edge::Open(b)) | (Edge::Close(a), Edge::Close(b)) => a == b,
            _ => false,
        }
    }
}


/// Iterator which traverses a subtree.
pub struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Clone for Traverse<'a> {
    fn clone(&self) -> Self {
        Self { root: self.root, edge: self.edge }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}


/// Iterator over a node and its descendants.
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Clone for Descendants<'a> {
    fn clone(&self) -> Self {
        Descendants(self.0.clone())
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}
