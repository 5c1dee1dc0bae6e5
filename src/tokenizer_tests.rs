use crate::{AttributeName, HtmlEvents, ParsingOptions, TokenKind};
use crate::tokenizer::Tokenizer;

#[derive(PartialEq, Debug)]
pub enum Token {
    Text(String),
    Comment(String),
    Doctype(Vec<(String, Option<String>)>),
    ElementStart(String, Vec<(String, Option<String>)>, bool),
    ElementEnd(String),
    Eof,
    Error(String),
}

#[macro_export]
macro_rules! test {
    ($name:ident, $text:expr, $($token:expr),*) => (
        #[test]
        fn $name() {
            let tokens = collect_tokens(&[$text.as_bytes()], false);
            let mut iter = tokens.iter();
            $(
                let t = iter.next().unwrap();
                assert_eq!(*t, $token);
            )*
            assert!(iter.next().is_none());
        }
    )
}

struct EventsCollector {
    tokens: Vec<Token>,
}

fn attrs(list: &[crate::TokenAttribute]) -> Vec<(String, Option<String>)> {
    list.iter().map(|a| {
        let name = match a.name {
            AttributeName::Public => "PUBLIC",
            AttributeName::System => "SYSTEM",
            AttributeName::Local(name) => name,
        };
        (name.to_string(), a.value.map(|v| v.to_string()))
    }).collect()
}

impl HtmlEvents for EventsCollector {
    fn token(&mut self, token: crate::Token) -> Result<(), crate::Error> {
        let t = match token.kind {
            TokenKind::Text => Token::Text(token.text.to_string()),
            TokenKind::Comment => Token::Comment(token.text.to_string()),
            TokenKind::Doctype => Token::Doctype(attrs(&token.attributes)),
            TokenKind::ElementStart => {
                Token::ElementStart(token.name.to_string(), attrs(&token.attributes),
                                    token.self_closing)
            }
            TokenKind::ElementEnd => Token::ElementEnd(token.name.to_string()),
            TokenKind::EndOfFile => Token::Eof,
        };
        self.tokens.push(t);
        Ok(())
    }
}

#[inline(never)]
fn collect_tokens(chunks: &[&[u8]], strict: bool) -> Vec<Token> {
    let opt = ParsingOptions { strict, ..ParsingOptions::default() };
    let mut tokenizer = Tokenizer::new(EventsCollector { tokens: Vec::new() }, opt);
    let res = feed_all(&mut tokenizer, chunks);
    let mut tokens = tokenizer.into_events().tokens;
    if let Err(e) = res {
        tokens.push(Token::Error(e.to_string()));
    }
    tokens
}

fn feed_all(tokenizer: &mut Tokenizer<EventsCollector>, chunks: &[&[u8]])
    -> Result<(), crate::Error>
{
    tokenizer.begin()?;
    for chunk in chunks {
        tokenizer.feed_chunk(chunk)?;
    }
    tokenizer.end()
}

fn start(name: &str) -> Token {
    Token::ElementStart(name.to_string(), Vec::new(), false)
}

fn end(name: &str) -> Token {
    Token::ElementEnd(name.to_string())
}

fn text(text: &str) -> Token {
    Token::Text(text.to_string())
}

fn attr(name: &str, value: Option<&str>) -> (String, Option<String>) {
    (name.to_string(), value.map(|v| v.to_string()))
}

// Basic

test!(
    empty_01,
    "",
    Token::Eof
);

test!(
    element_01,
    "<a><b>text</b></a>",
    start("a"),
    start("b"),
    text("text"),
    end("b"),
    end("a"),
    Token::Eof
);

test!(
    element_02,
    "<P></P>",
    start("p"),
    end("p"),
    Token::Eof
);

test!(
    element_03,
    "<br/>",
    Token::ElementStart("br".to_string(), Vec::new(), true),
    Token::Eof
);

test!(
    element_04,
    "<a></b>",
    start("a"),
    end("b"),
    Token::Eof
);

// Attributes

test!(
    attribute_01,
    "<e a='b' c=\"d\" f=g></e>",
    Token::ElementStart("e".to_string(), vec![
        attr("a", Some("b")),
        attr("c", Some("d")),
        attr("f", Some("g")),
    ], false),
    end("e"),
    Token::Eof
);

test!(
    attribute_02,
    "<input disabled>",
    Token::ElementStart("input".to_string(), vec![attr("disabled", None)], false),
    Token::Eof
);

test!(
    attribute_03,
    "<e a=\"&lt;&amp;\"></e>",
    Token::ElementStart("e".to_string(), vec![attr("a", Some("<&"))], false),
    end("e"),
    Token::Eof
);

// Text

test!(
    text_01,
    "<p>a &amp; b</p>",
    start("p"),
    text("a & b"),
    end("p"),
    Token::Eof
);

test!(
    text_02,
    "text",
    text("text"),
    Token::Eof
);

test!(
    text_03,
    "<p>a\u{0}b</p>",
    start("p"),
    text("ab"),
    end("p"),
    Token::Eof
);

test!(
    text_04,
    "<p>\n  <br>\n</p>",
    start("p"),
    text("\n  "),
    start("br"),
    text("\n"),
    end("p"),
    Token::Eof
);

// Comments

test!(
    comment_01,
    "<!-- comment -->",
    Token::Comment(" comment ".to_string()),
    Token::Eof
);

test!(
    comment_02,
    "<p><!----></p>",
    start("p"),
    Token::Comment(String::new()),
    end("p"),
    Token::Eof
);

// Doctype

test!(
    doctype_01,
    "<!DOCTYPE html>",
    Token::Doctype(vec![attr("html", None)]),
    Token::Eof
);

test!(
    doctype_02,
    "<!DOCTYPE html SYSTEM \"about:legacy-compat\">",
    Token::Doctype(vec![
        attr("html", None),
        attr("SYSTEM", Some("about:legacy-compat")),
    ]),
    Token::Eof
);

test!(
    doctype_03,
    "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \
     \"http://www.w3.org/TR/html4/strict.dtd\">",
    Token::Doctype(vec![
        attr("html", None),
        attr("PUBLIC", Some("-//W3C//DTD HTML 4.01//EN")),
    ]),
    Token::Eof
);

test!(
    doctype_04,
    "<!DOCTYPE>",
    Token::Doctype(Vec::new()),
    Token::Eof
);

// Raw text

test!(
    script_01,
    "<script>if (a < b && c) {}</script>",
    start("script"),
    text("if (a < b && c) {}"),
    end("script"),
    Token::Eof
);

test!(
    style_01,
    "<style>p > a { }</style>",
    start("style"),
    text("p > a { }"),
    end("style"),
    Token::Eof
);

test!(
    title_01,
    "<title><b>&amp;</b></title>",
    start("title"),
    text("<b>&</b>"),
    end("title"),
    Token::Eof
);

// Chunks

#[test]
fn chunks_01() {
    let tokens = collect_tokens(&[&b"<p cl"[..], &b"ass=x>te"[..], &b"xt</"[..], &b"p>"[..]], false);
    assert_eq!(tokens, vec![
        Token::ElementStart("p".to_string(), vec![attr("class", Some("x"))], false),
        text("text"),
        end("p"),
        Token::Eof,
    ]);
}

#[test]
fn chunks_02() {
    let data = "<p>тест</p>".as_bytes();
    let tokens = collect_tokens(&[&data[..4], &data[4..7], &data[7..]], false);
    assert_eq!(tokens, vec![start("p"), text("тест"), end("p"), Token::Eof]);
}

#[test]
fn chunks_03() {
    let tokens = collect_tokens(&[&b"<p>"[..], &b""[..], &b"</p>"[..]], false);
    assert_eq!(tokens, vec![start("p"), end("p"), Token::Eof]);
}

#[test]
fn chunks_04() {
    // Markup split inside a declaration and a character reference.
    let tokens = collect_tokens(&[&b"<!DOC"[..], &b"TYPE html><p>a&am"[..], &b"p;b</p>"[..]], false);
    assert_eq!(tokens, vec![
        Token::Doctype(vec![attr("html", None)]),
        start("p"),
        text("a&b"),
        end("p"),
        Token::Eof,
    ]);
}

// Errors

#[test]
fn invalid_utf8_01() {
    let tokens = collect_tokens(&[&b"<p>\xff</p>"[..]], false);
    assert_eq!(tokens, vec![Token::Error("invalid UTF-8 sequence at byte 3".to_string())]);
}

#[test]
fn invalid_utf8_02() {
    let data = "<p>т".as_bytes();
    let tokens = collect_tokens(&[&data[..4]], false);
    assert_eq!(tokens.last(), Some(&Token::Error("invalid UTF-8 sequence at byte 3".to_string())));
}

#[test]
fn strict_01() {
    let tokens = collect_tokens(&[&b"<e a=1 a=2></e>"[..]], true);
    assert_eq!(tokens.len(), 1);
    match tokens[0] {
        Token::Error(ref msg) => assert!(msg.starts_with("tokenizer error: ")),
        ref t => panic!("unexpected token: {:?}", t),
    }
}

#[test]
fn strict_02() {
    let tokens = collect_tokens(&[&b"<e a=1 a=2></e>"[..]], false);
    assert_eq!(tokens, vec![
        Token::ElementStart("e".to_string(), vec![attr("a", Some("1"))], false),
        end("e"),
        Token::Eof,
    ]);
}

#[test]
fn state_01() {
    let opt = ParsingOptions::default();
    let mut tokenizer = Tokenizer::new(EventsCollector { tokens: Vec::new() }, opt);
    assert!(tokenizer.feed_chunk(b"<p>").is_err());
    tokenizer.begin().unwrap();
    assert!(tokenizer.begin().is_err());
    tokenizer.end().unwrap();
    assert!(tokenizer.feed_chunk(b"<p>").is_err());
    assert!(tokenizer.end().is_err());
    assert_eq!(tokenizer.events().tokens, vec![Token::Eof]);
}

#[test]
fn abort_01() {
    struct Abort(usize);

    impl HtmlEvents for Abort {
        fn token(&mut self, _: crate::Token) -> Result<(), crate::Error> {
            self.0 += 1;
            Err(crate::Error::UnexpectedDoctype)
        }
    }

    let mut tokenizer = Tokenizer::new(Abort(0), ParsingOptions::default());
    tokenizer.begin().unwrap();
    assert!(tokenizer.feed_chunk(b"<a><b><c>").is_err());
    assert!(tokenizer.feed_chunk(b"<d>").is_err());
    assert_eq!(tokenizer.events().0, 1);
}
