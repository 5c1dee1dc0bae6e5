use std::fmt;

use crate::Error;


/// A token kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A run of character data.
    Text,
    /// `<!-- text -->`
    Comment,
    /// `<!DOCTYPE name ...>`
    Doctype,
    /// `<name ...>` or `<name .../>`
    ElementStart,
    /// `</name>`
    ElementEnd,
    /// The end of the input.
    EndOfFile,
}


/// An attribute name.
///
/// Doctype tokens use the `Public` and `System` names for their external identifiers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttributeName<'t> {
    /// A doctype public identifier.
    Public,
    /// A doctype system identifier.
    System,
    /// Any other name.
    Local(&'t str),
}

impl<'t> AttributeName<'t> {
    /// Returns the name as a string.
    pub fn as_str(&self) -> &'t str {
        match *self {
            AttributeName::Public => "public",
            AttributeName::System => "system",
            AttributeName::Local(name) => name,
        }
    }
}


/// A token attribute.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenAttribute<'t> {
    /// Attribute's name.
    pub name: AttributeName<'t>,
    /// Attribute's value, if any.
    pub value: Option<&'t str>,
}

impl<'t> TokenAttribute<'t> {
    /// Creates a new attribute.
    pub fn new(name: &'t str, value: Option<&'t str>) -> Self {
        TokenAttribute { name: AttributeName::Local(name), value }
    }
}

impl<'t> fmt::Debug for TokenAttribute<'t> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={:?}", self.name.as_str(), value),
            None => write!(f, "{}", self.name.as_str()),
        }
    }
}


/// An HTML token.
///
/// Borrows its data from the token source and is only valid for a single callback.
#[derive(Clone, PartialEq, Debug)]
pub struct Token<'t> {
    /// Token's kind.
    pub kind: TokenKind,
    /// Tag name. Empty for non-element tokens.
    pub name: &'t str,
    /// Indicates `<name/>`.
    pub self_closing: bool,
    /// Text or comment data. Empty for other tokens.
    pub text: &'t str,
    /// Attributes in the source order.
    pub attributes: Vec<TokenAttribute<'t>>,
}

impl<'t> Token<'t> {
    fn new(kind: TokenKind) -> Self {
        Token {
            kind,
            name: "",
            self_closing: false,
            text: "",
            attributes: Vec::new(),
        }
    }

    /// Creates a text token.
    pub fn text(text: &'t str) -> Self {
        Token { text, ..Token::new(TokenKind::Text) }
    }

    /// Creates a comment token.
    pub fn comment(text: &'t str) -> Self {
        Token { text, ..Token::new(TokenKind::Comment) }
    }

    /// Creates a doctype token.
    ///
    /// The first attribute is a root element name, the second one is an optional
    /// public or system identifier.
    pub fn doctype(attributes: Vec<TokenAttribute<'t>>) -> Self {
        Token { attributes, ..Token::new(TokenKind::Doctype) }
    }

    /// Creates a start tag token.
    pub fn start(name: &'t str, attributes: Vec<TokenAttribute<'t>>) -> Self {
        Token { name, attributes, ..Token::new(TokenKind::ElementStart) }
    }

    /// Creates an end tag token.
    pub fn end(name: &'t str) -> Self {
        Token { name, ..Token::new(TokenKind::ElementEnd) }
    }

    /// Creates an end of file token.
    pub fn eof() -> Self {
        Token::new(TokenKind::EndOfFile)
    }

    /// Marks the token as self-closing.
    pub fn self_closed(mut self) -> Self {
        self.self_closing = true;
        self
    }

    /// Checks that the token closes an element.
    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::ElementEnd
    }
}


/// A per-token callback.
///
/// A token source calls it once for every token, in the input order,
/// and stops at the first error.
pub trait HtmlEvents {
    /// Processes a single token.
    fn token(&mut self, token: Token) -> Result<(), Error>;
}

impl<'a, E: HtmlEvents> HtmlEvents for &'a mut E {
    fn token(&mut self, token: Token) -> Result<(), Error> {
        (**self).token(token)
    }
}


/// Checks that an element with the given name never has content or an end tag.
pub fn is_void_element(name: &str) -> bool {
    match name {
          "area"
        | "base"
        | "basefont"
        | "bgsound"
        | "br"
        | "col"
        | "embed"
        | "frame"
        | "hr"
        | "img"
        | "input"
        | "keygen"
        | "link"
        | "meta"
        | "param"
        | "source"
        | "track"
        | "wbr" => true,
        _ => false,
    }
}

/// Checks that the content of an element with the given name is never escaped.
pub fn is_raw_text_element(name: &str) -> bool {
    match name {
          "style"
        | "script"
        | "xmp"
        | "iframe"
        | "noembed"
        | "noframes"
        | "noscript"
        | "plaintext" => true,
        _ => false,
    }
}
