use std::mem;
use std::str;

use html5ever::buffer_queue::BufferQueue;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    self as html,
    TagKind,
    TokenSink,
    TokenSinkResult,
    TokenizerOpts,
};

use crate::{
    AttributeName,
    Error,
    HtmlEvents,
    ParsingOptions,
    Token,
    TokenAttribute,
};


#[derive(Clone, Copy, PartialEq, Debug)]
enum State {
    Created,
    Running,
    Ended,
    Failed,
}


/// An HTML token source.
///
/// Splits a chunked UTF-8 input into tokens and passes them
/// to the `HtmlEvents` callback, one at a time and in order.
/// Chunks can be split at any byte, even inside a tag or a character.
///
/// Adjacent character data is always reported as a single text token.
pub struct Tokenizer<E: HtmlEvents> {
    inner: html::Tokenizer<EventsSink<E>>,
    input: BufferQueue,
    incomplete: Vec<u8>,
    offset: usize,
    state: State,
}

impl<E: HtmlEvents> Tokenizer<E> {
    /// Creates a new tokenizer.
    pub fn new(events: E, opt: ParsingOptions) -> Self {
        let sink = EventsSink {
            events,
            text: String::new(),
            strict: opt.strict,
            error: None,
        };

        let opts = TokenizerOpts {
            exact_errors: opt.strict,
            ..TokenizerOpts::default()
        };

        Tokenizer {
            inner: html::Tokenizer::new(sink, opts),
            input: BufferQueue::default(),
            incomplete: Vec::new(),
            offset: 0,
            state: State::Created,
        }
    }

    /// Prepares the tokenizer to receive chunks.
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.state != State::Created {
            return Err(Error::Tokenizer("the tokenizer is already started".to_string()));
        }

        debug!("tokenizer started");
        self.state = State::Running;
        Ok(())
    }

    /// Tokenizes the next chunk.
    ///
    /// Returns the number of accepted bytes, which is always the chunk length.
    pub fn feed_chunk(&mut self, chunk: &[u8]) -> Result<usize, Error> {
        self.check_running()?;

        self.incomplete.extend_from_slice(chunk);
        let valid_len = match str::from_utf8(&self.incomplete) {
            Ok(_) => self.incomplete.len(),
            Err(e) => {
                if e.error_len().is_some() {
                    return self.fail(Error::InvalidUtf8(self.offset + e.valid_up_to()));
                }

                // The chunk ends in the middle of a character.
                e.valid_up_to()
            }
        };

        if valid_len != 0 {
            let tail = self.incomplete.split_off(valid_len);
            let bytes = mem::replace(&mut self.incomplete, tail);
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => return self.fail(Error::InvalidUtf8(self.offset + e.utf8_error().valid_up_to())),
            };

            self.offset += valid_len;
            self.input.push_back(StrTendril::from(text));
            self.run();
            self.check_events()?;
        }

        Ok(chunk.len())
    }

    /// Signals the end of the input.
    ///
    /// Emits the end of file token.
    pub fn end(&mut self) -> Result<(), Error> {
        self.check_running()?;

        if !self.incomplete.is_empty() {
            return self.fail(Error::InvalidUtf8(self.offset));
        }

        self.inner.end();
        self.check_events()?;

        debug!("tokenizer ended after {} bytes", self.offset);
        self.state = State::Ended;
        Ok(())
    }

    /// Returns the events callback.
    pub fn events(&self) -> &E {
        &self.inner.sink.events
    }

    /// Returns the events callback.
    pub fn into_events(self) -> E {
        self.inner.sink.events
    }

    fn run(&mut self) {
        loop {
            match self.inner.feed(&mut self.input) {
                html::TokenizerResult::Done => break,
                // The sink never asks for a script pause, so just resume.
                html::TokenizerResult::Script(_) => {
                    warn!("unexpected script pause, resuming");
                }
            }
        }
    }

    fn check_running(&self) -> Result<(), Error> {
        match self.state {
            State::Running => Ok(()),
            State::Created => Err(Error::Tokenizer("the tokenizer is not started".to_string())),
            State::Ended => Err(Error::Tokenizer("the input is already ended".to_string())),
            State::Failed => Err(Error::Tokenizer("parsing was aborted by a previous error".to_string())),
        }
    }

    fn check_events(&mut self) -> Result<(), Error> {
        match self.inner.sink.error.take() {
            Some(e) => self.fail(e),
            None => Ok(()),
        }
    }

    fn fail<T>(&mut self, e: Error) -> Result<T, Error> {
        self.state = State::Failed;
        Err(e)
    }
}


struct EventsSink<E: HtmlEvents> {
    events: E,
    text: String,
    strict: bool,
    error: Option<Error>,
}

impl<E: HtmlEvents> EventsSink<E> {
    fn emit(&mut self, token: Token) {
        if self.error.is_none() {
            if let Err(e) = self.events.token(token) {
                self.error = Some(e);
            }
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::replace(&mut self.text, String::new());
            self.emit(Token::text(&text));
        }
    }

    fn process_tag(&mut self, tag: html::Tag) -> TokenSinkResult<()> {
        let attributes: Vec<_> = tag.attrs.iter().map(|attr| {
            // The tokenizer doesn't distinguish `<e a>` from `<e a="">`.
            let value: &str = &attr.value;
            let value = if value.is_empty() { None } else { Some(value) };
            TokenAttribute::new(&attr.name.local, value)
        }).collect();

        let name: &str = &tag.name;
        match tag.kind {
            TagKind::StartTag => {
                let mut token = Token::start(name, attributes);
                token.self_closing = tag.self_closing;
                self.emit(token);

                if tag.self_closing {
                    return TokenSinkResult::Continue;
                }

                // The tokenizer relies on its consumer to switch
                // into the raw text states.
                match name {
                    "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
                        TokenSinkResult::RawData(RawKind::Rawtext)
                    }
                    "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
                    "plaintext" => TokenSinkResult::Plaintext,
                    _ => TokenSinkResult::Continue,
                }
            }
            TagKind::EndTag => {
                let mut token = Token::end(name);
                token.self_closing = tag.self_closing;
                self.emit(token);
                TokenSinkResult::Continue
            }
        }
    }

    fn process_doctype(&mut self, doctype: html::Doctype) {
        let mut attributes = Vec::new();

        if let Some(ref name) = doctype.name {
            attributes.push(TokenAttribute::new(name, None));

            if let Some(ref id) = doctype.public_id {
                attributes.push(TokenAttribute { name: AttributeName::Public, value: Some(&**id) });
            } else if let Some(ref id) = doctype.system_id {
                attributes.push(TokenAttribute { name: AttributeName::System, value: Some(&**id) });
            }
        }

        self.emit(Token::doctype(attributes));
    }
}

impl<E: HtmlEvents> TokenSink for EventsSink<E> {
    type Handle = ();

    fn process_token(&mut self, token: html::Token, _line_number: u64) -> TokenSinkResult<()> {
        // Everything after the first error is ignored.
        if self.error.is_some() {
            return TokenSinkResult::Continue;
        }

        match token {
            html::Token::CharacterTokens(text) => {
                self.text.push_str(&text);
                TokenSinkResult::Continue
            }
            html::Token::NullCharacterToken => {
                trace!("skipped a null character");
                TokenSinkResult::Continue
            }
            html::Token::ParseError(msg) => {
                if self.strict {
                    self.error = Some(Error::Tokenizer(msg.into_owned()));
                } else {
                    warn!("{}", msg);
                }
                TokenSinkResult::Continue
            }
            html::Token::TagToken(tag) => {
                self.flush_text();
                self.process_tag(tag)
            }
            html::Token::CommentToken(text) => {
                self.flush_text();
                self.emit(Token::comment(&text));
                TokenSinkResult::Continue
            }
            html::Token::DoctypeToken(doctype) => {
                self.flush_text();
                self.process_doctype(doctype);
                TokenSinkResult::Continue
            }
            html::Token::EOFToken => {
                self.flush_text();
                self.emit(Token::eof());
                TokenSinkResult::Continue
            }
        }
    }
}
