use std::io::{self, Write};

use crate::{
    is_raw_text_element,
    is_void_element,
    AttributeName,
    Edge,
    Error,
    HtmlEvents,
    Node,
    NodeType,
    ParsingOptions,
    Token,
    TokenKind,
    Tokenizer,
};


/// A streaming HTML writer.
///
/// Keeps track of open elements, so end tags don't need a name.
///
/// # Examples
///
/// ```
/// use h5tree::HtmlWriter;
///
/// let mut w = HtmlWriter::new(Vec::new());
/// w.start_element("p").unwrap();
/// w.write_attribute("class", Some("a")).unwrap();
/// w.write_text("1 < 2").unwrap();
/// w.start_element("br").unwrap();
/// w.end_document().unwrap();
///
/// assert_eq!(w.into_inner(), b"<p class=\"a\">1 &lt; 2<br></p>");
/// ```
pub struct HtmlWriter<W: Write> {
    out: W,
    scopes: Vec<String>,
    tag_open: bool,
}

impl<W: Write> HtmlWriter<W> {
    /// Creates a new writer.
    pub fn new(out: W) -> Self {
        HtmlWriter {
            out,
            scopes: Vec::new(),
            tag_open: false,
        }
    }

    /// Returns the number of open elements.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Writes an element start tag and opens a new scope.
    ///
    /// The tag stays open until the next non-attribute write.
    pub fn start_element(&mut self, name: &str) -> io::Result<()> {
        self.close_start_tag()?;
        write!(self.out, "<{}", name)?;
        self.scopes.push(name.to_string());
        self.tag_open = true;
        Ok(())
    }

    /// Writes an attribute of the current start tag.
    ///
    /// An attribute without a value is written as `name=""`.
    pub fn write_attribute(&mut self, name: &str, value: Option<&str>) -> io::Result<()> {
        if !self.tag_open {
            return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                      "an attribute outside of a start tag"));
        }

        write!(self.out, " {}=\"", name)?;
        write_escaped(&mut self.out, value.unwrap_or(""), true)?;
        self.out.write_all(b"\"")
    }

    /// Closes the innermost scope.
    ///
    /// Void elements don't get an end tag.
    pub fn end_element(&mut self) -> io::Result<()> {
        self.close_start_tag()?;

        let name = match self.scopes.pop() {
            Some(name) => name,
            None => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput,
                                          "no open element to close"));
            }
        };

        if !is_void_element(&name) {
            write!(self.out, "</{}>", name)?;
        }

        Ok(())
    }

    /// Writes text.
    ///
    /// Text inside `script`, `style` and similar elements is written as is.
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.close_start_tag()?;

        let is_raw = self.scopes.last().map(|s| is_raw_text_element(s)).unwrap_or(false);
        if is_raw {
            self.out.write_all(text.as_bytes())
        } else {
            write_escaped(&mut self.out, text, false)
        }
    }

    /// Writes a comment.
    pub fn write_comment(&mut self, text: &str) -> io::Result<()> {
        self.close_start_tag()?;
        write!(self.out, "<!--{}-->", text)
    }

    /// Writes a document type declaration.
    pub fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
    ) -> io::Result<()> {
        self.close_start_tag()?;
        write!(self.out, "<!DOCTYPE {}", name)?;

        match (public_id, system_id) {
            (Some(public_id), Some(system_id)) => {
                write!(self.out, " PUBLIC \"{}\" \"{}\"", public_id, system_id)?;
            }
            (Some(public_id), None) => write!(self.out, " PUBLIC \"{}\"", public_id)?,
            (None, Some(system_id)) => write!(self.out, " SYSTEM \"{}\"", system_id)?,
            (None, None) => {}
        }

        self.out.write_all(b">")
    }

    /// Closes all open scopes and flushes the output.
    pub fn end_document(&mut self) -> io::Result<()> {
        while !self.scopes.is_empty() {
            self.end_element()?;
        }

        self.out.flush()
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn close_start_tag(&mut self) -> io::Result<()> {
        if self.tag_open {
            self.tag_open = false;
            self.out.write_all(b">")?;
        }

        Ok(())
    }
}

fn write_escaped<W: Write>(out: &mut W, text: &str, is_attribute: bool) -> io::Result<()> {
    let mut start = 0;
    for (i, c) in text.char_indices() {
        let escaped = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '\u{a0}' => "&nbsp;",
            '"' if is_attribute => "&quot;",
            _ => continue,
        };

        out.write_all(text[start..i].as_bytes())?;
        out.write_all(escaped.as_bytes())?;
        start = i + c.len_utf8();
    }

    out.write_all(text[start..].as_bytes())
}


/// An `HtmlEvents` implementation that writes tokens back as markup.
pub struct TokenWriter<W: Write> {
    writer: HtmlWriter<W>,
}

impl<W: Write> TokenWriter<W> {
    /// Creates a new token writer.
    pub fn new(out: W) -> Self {
        TokenWriter { writer: HtmlWriter::new(out) }
    }

    /// Returns the underlying writer.
    pub fn writer(&self) -> &HtmlWriter<W> {
        &self.writer
    }

    /// Returns the underlying output.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_doctype(&mut self, token: &Token) -> Result<(), Error> {
        let name = match token.attributes.first() {
            Some(attr) => attr.name.as_str(),
            None => return Err(Error::MissingDoctypeName),
        };

        let (public_id, system_id) = match token.attributes.get(1) {
            Some(attr) => match attr.name {
                AttributeName::Public => (attr.value, None),
                AttributeName::System => (None, attr.value),
                AttributeName::Local(_) => (None, None),
            },
            None => (None, None),
        };

        self.writer.write_doctype(name, public_id, system_id)?;
        Ok(())
    }

    fn write_start(&mut self, token: &Token) -> Result<(), Error> {
        self.writer.start_element(token.name)?;
        for attr in &token.attributes {
            self.writer.write_attribute(attr.name.as_str(), attr.value)?;
        }

        if token.self_closing || is_void_element(token.name) {
            self.writer.end_element()?;
        }

        Ok(())
    }

    fn write_end(&mut self, token: &Token) -> Result<(), Error> {
        // `</br>` is written as `<br>`.
        if is_void_element(token.name) {
            self.writer.start_element(token.name)?;
            self.writer.end_element()?;
            return Ok(());
        }

        if self.writer.depth() == 0 {
            return Err(Error::UnmatchedCloseTag(token.name.to_string()));
        }

        self.writer.end_element()?;
        Ok(())
    }
}

impl<W: Write> HtmlEvents for TokenWriter<W> {
    fn token(&mut self, token: Token) -> Result<(), Error> {
        trace!("{:?} token, depth {}", token.kind, self.writer.depth());

        match token.kind {
            TokenKind::Text => self.writer.write_text(token.text)?,
            TokenKind::Comment => self.writer.write_comment(token.text)?,
            TokenKind::Doctype => self.write_doctype(&token)?,
            TokenKind::ElementStart => self.write_start(&token)?,
            TokenKind::ElementEnd => self.write_end(&token)?,
            TokenKind::EndOfFile => self.writer.end_document()?,
        }

        Ok(())
    }
}


/// A chunked HTML re-serializer.
///
/// # Examples
///
/// ```
/// use h5tree::{ParsingOptions, Serializer};
///
/// let mut s = Serializer::new(Vec::new(), ParsingOptions::default()).unwrap();
/// s.feed(b"<p>a &amp; ").unwrap();
/// s.feed(b"b</p>").unwrap();
///
/// assert_eq!(s.finish().unwrap(), b"<p>a &amp; b</p>");
/// ```
pub struct Serializer<W: Write> {
    tokenizer: Tokenizer<TokenWriter<W>>,
}

impl<W: Write> Serializer<W> {
    /// Creates a new serializer.
    pub fn new(out: W, opt: ParsingOptions) -> Result<Self, Error> {
        let mut tokenizer = Tokenizer::new(TokenWriter::new(out), opt);
        tokenizer.begin()?;
        Ok(Serializer { tokenizer })
    }

    /// Serializes the next chunk of the input.
    ///
    /// Returns the number of accepted bytes.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize, Error> {
        self.tokenizer.feed_chunk(chunk)
    }

    /// Ends the input, closes unclosed elements and returns the output.
    pub fn finish(mut self) -> Result<W, Error> {
        self.tokenizer.end()?;
        Ok(self.tokenizer.into_events().into_inner())
    }
}

/// Tokenizes the input HTML string and writes it back.
///
/// # Examples
///
/// ```
/// assert_eq!(h5tree::reserialize("<p>a<br>b").unwrap(), "<p>a<br>b</p>");
/// ```
pub fn reserialize(text: &str) -> Result<String, Error> {
    let mut s = Serializer::new(Vec::new(), ParsingOptions::default())?;
    s.feed(text.as_bytes())?;
    let buf = s.finish()?;
    String::from_utf8(buf).map_err(|e| Error::InvalidUtf8(e.utf8_error().valid_up_to()))
}


pub(crate) fn write_node<W: Write>(root: Node, out: W) -> io::Result<()> {
    let mut w = HtmlWriter::new(out);

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => match node.node_type() {
                NodeType::Document => {}
                NodeType::Doctype => {
                    if let Some(doctype) = node.doctype() {
                        w.write_doctype(doctype.name(), doctype.public_id(), doctype.system_id())?;
                    }
                }
                NodeType::Element => {
                    w.start_element(node.tag_name())?;
                    for attr in node.attributes() {
                        w.write_attribute(attr.name(), Some(attr.value()))?;
                    }
                }
                NodeType::Comment => w.write_comment(node.text().unwrap_or(""))?,
                NodeType::Text => {
                    // Already written as part of the comment.
                    let in_comment = node.parent().map(|p| p.is_comment()).unwrap_or(false);
                    if !in_comment {
                        w.write_text(node.text().unwrap_or(""))?;
                    }
                }
            },
            Edge::Close(node) => {
                if node.is_element() {
                    w.end_element()?;
                }
            }
        }
    }

    w.end_document()
}
