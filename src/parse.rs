use std::error;
use std::fmt;
use std::io;

use crate::{
    is_void_element,
    AncestorStack,
    AttributeName,
    Document,
    HtmlEvents,
    NodeId,
    NodeType,
    Token,
    TokenKind,
    Tokenizer,
    TreeSink,
    MAX_STACK_CAPACITY,
};


/// A list of all possible errors.
#[derive(Debug)]
pub enum Error {
    /// Elements are nested deeper than the ancestor stack allows.
    ///
    /// Contains the stack capacity.
    StackOverflow(usize),

    /// A close tag without an open element.
    UnmatchedCloseTag(String),

    /// A close tag doesn't match the current element.
    #[allow(missing_docs)]
    UnexpectedCloseTag { expected: String, actual: String },

    /// A doctype after an element or after another doctype.
    UnexpectedDoctype,

    /// A doctype without a root element name.
    MissingDoctypeName,

    /// The sink refused to attach a closed element to its parent.
    UnexpectedEndOfDocument(String),

    /// The sink refused to attach a node of the specified type.
    AppendRejected(NodeType),

    /// The input ended inside an element.
    UnclosedElement(String),

    /// The input is not a valid UTF-8.
    ///
    /// Contains a byte offset of the invalid sequence.
    InvalidUtf8(usize),

    /// Errors reported by the tokenizer.
    Tokenizer(String),

    /// Output errors.
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::StackOverflow(capacity) => {
                write!(f, "max stack capacity of {} elements exceeded", capacity)
            }
            Error::UnmatchedCloseTag(ref name) => {
                write!(f, "unmatched '{}' close tag", name)
            }
            Error::UnexpectedCloseTag { ref expected, ref actual } => {
                write!(f, "expected '{}' tag, not '{}'", expected, actual)
            }
            Error::UnexpectedDoctype => {
                write!(f, "a doctype is allowed only once and before any element")
            }
            Error::MissingDoctypeName => {
                write!(f, "the doctype does not have a name")
            }
            Error::UnexpectedEndOfDocument(ref name) => {
                write!(f, "unexpected end of document at '{}' close tag", name)
            }
            Error::AppendRejected(node_type) => {
                write!(f, "failed to append a {:?} node", node_type)
            }
            Error::UnclosedElement(ref name) => {
                write!(f, "the '{}' element is not closed", name)
            }
            Error::InvalidUtf8(pos) => {
                write!(f, "invalid UTF-8 sequence at byte {}", pos)
            }
            Error::Tokenizer(ref msg) => {
                write!(f, "tokenizer error: {}", msg)
            }
            Error::Io(ref err) => {
                write!(f, "{}", err)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}


/// Parsing options.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParsingOptions {
    /// The maximum number of simultaneously open elements.
    ///
    /// Cannot exceed [`MAX_STACK_CAPACITY`].
    ///
    /// Default: 256
    ///
    /// [`MAX_STACK_CAPACITY`]: constant.MAX_STACK_CAPACITY.html
    pub max_depth: usize,

    /// Treat tokenizer parse errors as fatal.
    ///
    /// When disabled, they are logged and ignored.
    ///
    /// Default: false
    pub strict: bool,
}

impl Default for ParsingOptions {
    fn default() -> Self {
        ParsingOptions {
            max_depth: MAX_STACK_CAPACITY,
            strict: false,
        }
    }
}


/// An incremental tree builder.
///
/// Receives tokens one by one and mutates the tree owned by the sink.
/// Nesting must be exact: every structural violation is fatal.
pub struct TreeBuilder<S: TreeSink> {
    sink: S,
    stack: AncestorStack<S::Handle>,
    fragment_parent: Option<S::Handle>,
    fragment_open: bool,
    seen_element: bool,
    seen_doctype: bool,
}

impl<S: TreeSink> TreeBuilder<S> {
    /// Creates a builder for a whole document.
    pub fn new(sink: S, opt: ParsingOptions) -> Self {
        TreeBuilder {
            sink,
            stack: AncestorStack::with_max_capacity(opt.max_depth),
            fragment_parent: None,
            fragment_open: false,
            seen_element: false,
            seen_doctype: false,
        }
    }

    /// Creates a builder that appends parsed nodes to `parent`.
    ///
    /// `parent` becomes an implicit ancestor of the first element
    /// and can never be closed by a close tag.
    pub fn new_fragment(sink: S, parent: S::Handle, opt: ParsingOptions) -> Self {
        TreeBuilder {
            fragment_parent: Some(parent),
            ..TreeBuilder::new(sink, opt)
        }
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the number of currently open elements.
    ///
    /// Includes the fragment parent once the first element was opened.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Checks that all open elements were closed and returns the sink.
    pub fn finish(mut self) -> Result<S, Error> {
        if self.stack.len() > self.floor() {
            let name = self.stack.peek()
                .and_then(|node| self.sink.element_name(node))
                .unwrap_or("")
                .to_string();
            return Err(Error::UnclosedElement(name));
        }

        if self.fragment_open {
            self.stack.pop();
            self.fragment_open = false;
        }

        debug!("tree building finished");
        Ok(self.sink)
    }

    fn floor(&self) -> usize {
        if self.fragment_open { 1 } else { 0 }
    }

    fn insertion_point(&self) -> S::Handle {
        self.stack.peek()
            .or(self.fragment_parent)
            .unwrap_or_else(|| self.sink.document())
    }

    fn append(&mut self, node: S::Handle, node_type: NodeType) -> Result<(), Error> {
        let parent = self.insertion_point();
        if self.sink.append_child(parent, node) {
            Ok(())
        } else {
            Err(Error::AppendRejected(node_type))
        }
    }

    fn process_doctype(&mut self, token: &Token) -> Result<(), Error> {
        if !self.stack.is_empty() || self.seen_element || self.seen_doctype {
            return Err(Error::UnexpectedDoctype);
        }

        let name = match token.attributes.first() {
            Some(attr) => attr.name.as_str(),
            None => return Err(Error::MissingDoctypeName),
        };

        let (public_id, system_id) = match token.attributes.get(1) {
            Some(attr) => match attr.name {
                AttributeName::Public => (Some(attr.value.unwrap_or("")), None),
                AttributeName::System => (None, Some(attr.value.unwrap_or(""))),
                AttributeName::Local(_) => (None, None),
            },
            None => (None, None),
        };

        let doctype = self.sink.new_doctype(name, public_id, system_id);
        let document = self.sink.document();
        if !self.sink.append_child(document, doctype) {
            return Err(Error::AppendRejected(NodeType::Doctype));
        }

        self.seen_doctype = true;
        Ok(())
    }

    fn process_element(&mut self, token: &Token) -> Result<(), Error> {
        let is_void = is_void_element(token.name);
        if token.is_close() && !is_void {
            return self.end_element(token.name);
        }

        let node = self.start_element(token.name)?;

        // Close tokens of void elements, like `</br>`, never carry attributes.
        if !token.is_close() {
            for attr in &token.attributes {
                self.sink.new_attribute(node, attr.name.as_str(), attr.value);
            }
        }

        if is_void || token.self_closing {
            self.end_element(token.name)?;
        }

        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<S::Handle, Error> {
        let node = self.sink.new_element(name);

        if self.stack.is_empty() {
            match self.fragment_parent {
                Some(parent) => {
                    self.stack.push(parent)?;
                    self.fragment_open = true;
                }
                None => {
                    self.sink.set_document_root(node);
                }
            }
        }

        self.stack.push(node)?;
        self.seen_element = true;
        Ok(node)
    }

    fn end_element(&mut self, name: &str) -> Result<(), Error> {
        if self.stack.len() == self.floor() {
            return Err(Error::UnmatchedCloseTag(name.to_string()));
        }

        let node = match self.stack.pop() {
            Some(node) => node,
            None => return Err(Error::UnmatchedCloseTag(name.to_string())),
        };

        let open_name = self.sink.element_name(node).unwrap_or("");
        if open_name.as_bytes() != name.as_bytes() {
            return Err(Error::UnexpectedCloseTag {
                expected: open_name.to_string(),
                actual: name.to_string(),
            });
        }

        match self.stack.peek() {
            // The root element is already installed.
            None => Ok(()),
            Some(parent) => {
                if self.sink.append_child(parent, node) {
                    Ok(())
                } else {
                    Err(Error::UnexpectedEndOfDocument(name.to_string()))
                }
            }
        }
    }
}

impl<S: TreeSink> HtmlEvents for TreeBuilder<S> {
    fn token(&mut self, token: Token) -> Result<(), Error> {
        trace!("{:?} token, depth {}", token.kind, self.stack.len());

        match token.kind {
            TokenKind::EndOfFile => Ok(()),
            TokenKind::Text => {
                let node = self.sink.new_text(token.text);
                self.append(node, NodeType::Text)
            }
            TokenKind::Comment => {
                let text = self.sink.new_text(token.text);
                let node = self.sink.new_comment(text);
                self.append(node, NodeType::Comment)
            }
            TokenKind::Doctype => self.process_doctype(&token),
            TokenKind::ElementStart |
            TokenKind::ElementEnd => self.process_element(&token),
        }
    }
}


/// A chunked HTML parser.
///
/// # Examples
///
/// ```
/// use h5tree::{Document, Parser, ParsingOptions};
///
/// let mut parser = Parser::new(Document::new(), ParsingOptions::default()).unwrap();
/// parser.feed(b"<p>Hello, ").unwrap();
/// parser.feed(b"world!</p>").unwrap();
/// let doc = parser.finish().unwrap();
///
/// assert_eq!(doc.root_element().unwrap().text(), Some("Hello, world!"));
/// ```
pub struct Parser<S: TreeSink> {
    tokenizer: Tokenizer<TreeBuilder<S>>,
}

impl<S: TreeSink> Parser<S> {
    /// Creates a parser for a whole document.
    pub fn new(sink: S, opt: ParsingOptions) -> Result<Self, Error> {
        Self::with_builder(TreeBuilder::new(sink, opt), opt)
    }

    /// Creates a parser that appends parsed nodes to `parent`.
    pub fn new_fragment(sink: S, parent: S::Handle, opt: ParsingOptions) -> Result<Self, Error> {
        Self::with_builder(TreeBuilder::new_fragment(sink, parent, opt), opt)
    }

    fn with_builder(builder: TreeBuilder<S>, opt: ParsingOptions) -> Result<Self, Error> {
        let mut tokenizer = Tokenizer::new(builder, opt);
        tokenizer.begin()?;
        Ok(Parser { tokenizer })
    }

    /// Parses the next chunk of the input.
    ///
    /// Returns the number of accepted bytes.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize, Error> {
        self.tokenizer.feed_chunk(chunk)
    }

    /// Ends the input and returns the sink.
    pub fn finish(mut self) -> Result<S, Error> {
        self.tokenizer.end()?;
        self.tokenizer.into_events().finish()
    }
}


impl Document {
    /// Parses the input HTML string.
    ///
    /// Unlike a browser, the parser doesn't repair the markup:
    /// every element must be closed explicitly, unless it's a void
    /// or a self-closed one.
    ///
    /// # Examples
    ///
    /// ```
    /// let doc = h5tree::Document::parse("<p>text<br></p>").unwrap();
    /// assert_eq!(doc.descendants().filter(|n| n.is_element()).count(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Document, Error> {
        Self::parse_with_options(text, ParsingOptions::default())
    }

    /// Parses the input HTML string using the specified options.
    pub fn parse_with_options(text: &str, opt: ParsingOptions) -> Result<Document, Error> {
        let mut parser = Parser::new(Document::new(), opt)?;
        parser.feed(text.as_bytes())?;
        parser.finish()
    }

    /// Parses the input HTML string and appends the result to the `parent` node.
    ///
    /// On error, the document may contain a partially parsed fragment
    /// and should be discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut doc = h5tree::Document::parse("<ul></ul>").unwrap();
    /// let ul = doc.root_element().unwrap().id();
    /// doc.parse_fragment(ul, "<li>1</li><li>2</li>").unwrap();
    ///
    /// assert_eq!(doc.root_element().unwrap().children().count(), 2);
    /// ```
    pub fn parse_fragment(&mut self, parent: NodeId, text: &str) -> Result<(), Error> {
        let mut parser = Parser::new_fragment(self, parent, ParsingOptions::default())?;
        parser.feed(text.as_bytes())?;
        parser.finish()?;
        Ok(())
    }
}
