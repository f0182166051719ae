//! XML/XHTML tokenizer.
//!
//! A state machine over the input that emits tags, character data,
//! comments, and doctypes. It is deliberately lenient: nothing the input
//! does can make it fail, which makes it safe to point at arbitrary
//! files. Strict callers inspect [`Tokenizer::ended_inside_markup`] after
//! the run.
//!
//! Character data and attribute values are emitted *raw*; entity
//! references are resolved by the tree construction in
//! [`crate::parser`].

use crate::dom::Attribute;

// ------------------------------------------------------------------
// Token types
// ------------------------------------------------------------------

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartTag(StartTagToken),
    EndTag(String),
    /// Raw character data; entity references are still encoded.
    Text(String),
    Comment(String),
    /// Doctype text without the `<!DOCTYPE` prefix and closing `>`.
    Doctype(String),
    Eof,
}

/// A start tag with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTagToken {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

// ------------------------------------------------------------------
// Tag builder
// ------------------------------------------------------------------

/// Accumulates a tag while the state machine walks through it.
#[derive(Debug, Default)]
struct TagBuilder {
    name: String,
    attributes: Vec<Attribute>,
    current_attr_name: String,
    current_attr_value: String,
    is_end_tag: bool,
    self_closing: bool,
}

impl TagBuilder {
    fn start_tag() -> Self {
        Self::default()
    }

    fn end_tag() -> Self {
        Self {
            is_end_tag: true,
            ..Self::default()
        }
    }

    /// Commit the attribute currently being built. The first occurrence
    /// of a name wins; duplicates are dropped.
    fn finish_attribute(&mut self) {
        if self.current_attr_name.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.current_attr_name);
        let value = std::mem::take(&mut self.current_attr_value);
        if self.attributes.iter().any(|a| a.name == name) {
            return;
        }
        self.attributes.push(Attribute { name, value });
    }

    fn into_token(mut self) -> Token {
        self.finish_attribute();
        if self.is_end_tag {
            // attributes on an end tag are meaningless; drop them
            Token::EndTag(self.name)
        } else {
            Token::StartTag(StartTagToken {
                name: self.name,
                attributes: self.attributes,
                self_closing: self.self_closing,
            })
        }
    }
}

// ------------------------------------------------------------------
// States
// ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    MarkupDeclarationOpen,
    Comment,
    CommentEndDash,
    CommentEnd,
    Doctype,
    ProcessingInstruction,
    BogusComment,
}

// ------------------------------------------------------------------
// Tokenizer
// ------------------------------------------------------------------

/// Streaming tokenizer over a markup string.
pub struct Tokenizer {
    input: Vec<char>,
    pos: usize,
    state: State,
    current_tag: Option<TagBuilder>,
    /// Pending character data.
    buffer: String,
    /// Comment or doctype text being accumulated.
    scratch: String,
    /// Set when the input ended in the middle of a tag, comment, or
    /// doctype. The partial construct is dropped.
    truncated: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            state: State::Data,
            current_tag: None,
            buffer: String::new(),
            scratch: String::new(),
            truncated: false,
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token == Token::Eof;
            Self::push_coalesced(&mut tokens, token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Returns `true` if the input ended inside a tag, comment, or
    /// doctype.
    pub fn ended_inside_markup(&self) -> bool {
        self.truncated
    }

    /// Coalesce consecutive `Text` tokens.
    fn push_coalesced(tokens: &mut Vec<Token>, token: Token) {
        if let Token::Text(ref new_text) = token
            && let Some(Token::Text(prev)) = tokens.last_mut()
        {
            prev.push_str(new_text);
            return;
        }
        tokens.push(token);
    }

    // -- helpers ------------------------------------------------------------

    fn consume(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn reconsume(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
        }
    }

    /// Case-insensitive look-ahead.
    fn starts_with_ci(&self, s: &str) -> bool {
        let chars: Vec<char> = s.chars().collect();
        if self.pos + chars.len() > self.input.len() {
            return false;
        }
        chars
            .iter()
            .enumerate()
            .all(|(i, &expected)| self.input[self.pos + i].eq_ignore_ascii_case(&expected))
    }

    fn tag_mut(&mut self) -> &mut TagBuilder {
        // only called from states entered after a builder is installed
        self.current_tag.get_or_insert_with(TagBuilder::start_tag)
    }

    /// Emit the tag under construction and return to `Data`.
    fn emit_current_tag(&mut self) -> Option<Token> {
        self.state = State::Data;
        self.current_tag.take().map(TagBuilder::into_token)
    }

    /// The input ended inside markup: drop the partial construct.
    fn truncate_markup(&mut self) {
        self.truncated = true;
        self.current_tag = None;
        self.state = State::Data;
    }

    // -- main dispatch ------------------------------------------------------

    fn next_token(&mut self) -> Token {
        loop {
            let emitted = match self.state {
                State::Data => self.state_data(),
                State::TagOpen => self.state_tag_open(),
                State::EndTagOpen => self.state_end_tag_open(),
                State::TagName => self.state_tag_name(),
                State::BeforeAttributeName => self.state_before_attr_name(),
                State::AttributeName => self.state_attr_name(),
                State::AfterAttributeName => self.state_after_attr_name(),
                State::BeforeAttributeValue => self.state_before_attr_value(),
                State::AttributeValueDoubleQuoted => self.state_attr_value_quoted('"'),
                State::AttributeValueSingleQuoted => self.state_attr_value_quoted('\''),
                State::AttributeValueUnquoted => self.state_attr_value_unquoted(),
                State::AfterAttributeValueQuoted => self.state_after_attr_value_quoted(),
                State::SelfClosingStartTag => self.state_self_closing(),
                State::MarkupDeclarationOpen => self.state_markup_declaration_open(),
                State::Comment => self.state_comment(),
                State::CommentEndDash => self.state_comment_end_dash(),
                State::CommentEnd => self.state_comment_end(),
                State::Doctype => self.state_doctype(),
                State::ProcessingInstruction => self.state_processing_instruction(),
                State::BogusComment => self.state_bogus_comment(),
            };
            if let Some(token) = emitted {
                return token;
            }
        }
    }

    // -- state handlers -----------------------------------------------------

    fn state_data(&mut self) -> Option<Token> {
        match self.consume() {
            Some('<') => {
                self.state = State::TagOpen;
                if !self.buffer.is_empty() {
                    return Some(Token::Text(std::mem::take(&mut self.buffer)));
                }
                None
            },
            Some(c) => {
                self.buffer.push(c);
                None
            },
            None => {
                if !self.buffer.is_empty() {
                    return Some(Token::Text(std::mem::take(&mut self.buffer)));
                }
                Some(Token::Eof)
            },
        }
    }

    fn state_tag_open(&mut self) -> Option<Token> {
        match self.consume() {
            Some('/') => {
                self.state = State::EndTagOpen;
                None
            },
            Some('!') => {
                self.state = State::MarkupDeclarationOpen;
                None
            },
            Some('?') => {
                self.state = State::ProcessingInstruction;
                None
            },
            Some(c) if c.is_ascii_alphabetic() => {
                let mut tag = TagBuilder::start_tag();
                tag.name.push(c);
                self.current_tag = Some(tag);
                self.state = State::TagName;
                None
            },
            Some(_) => {
                // not a tag after all; the `<` was character data
                self.buffer.push('<');
                self.reconsume();
                self.state = State::Data;
                None
            },
            None => {
                self.truncated = true;
                self.buffer.push('<');
                self.state = State::Data;
                None
            },
        }
    }

    fn state_end_tag_open(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_alphabetic() => {
                let mut tag = TagBuilder::end_tag();
                tag.name.push(c);
                self.current_tag = Some(tag);
                self.state = State::TagName;
                None
            },
            Some('>') => {
                // stray `</>`: dropped
                self.state = State::Data;
                None
            },
            Some(_) => {
                self.reconsume();
                self.state = State::BogusComment;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_tag_name(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => {
                self.state = State::BeforeAttributeName;
                None
            },
            Some('/') => {
                self.state = State::SelfClosingStartTag;
                None
            },
            Some('>') => self.emit_current_tag(),
            Some(c) => {
                self.tag_mut().name.push(c);
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_before_attr_name(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => None,
            Some('/') => {
                self.state = State::SelfClosingStartTag;
                None
            },
            Some('>') => self.emit_current_tag(),
            Some(c) => {
                self.tag_mut().current_attr_name.push(c);
                self.state = State::AttributeName;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_attr_name(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => {
                self.state = State::AfterAttributeName;
                None
            },
            Some('=') => {
                self.state = State::BeforeAttributeValue;
                None
            },
            Some('/') => {
                self.tag_mut().finish_attribute();
                self.state = State::SelfClosingStartTag;
                None
            },
            Some('>') => {
                self.tag_mut().finish_attribute();
                self.emit_current_tag()
            },
            Some(c) => {
                self.tag_mut().current_attr_name.push(c);
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_after_attr_name(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => None,
            Some('=') => {
                self.state = State::BeforeAttributeValue;
                None
            },
            Some('/') => {
                self.tag_mut().finish_attribute();
                self.state = State::SelfClosingStartTag;
                None
            },
            Some('>') => {
                self.tag_mut().finish_attribute();
                self.emit_current_tag()
            },
            Some(c) => {
                // previous attribute had no value
                self.tag_mut().finish_attribute();
                self.tag_mut().current_attr_name.push(c);
                self.state = State::AttributeName;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_before_attr_value(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => None,
            Some('"') => {
                self.state = State::AttributeValueDoubleQuoted;
                None
            },
            Some('\'') => {
                self.state = State::AttributeValueSingleQuoted;
                None
            },
            Some('>') => {
                self.tag_mut().finish_attribute();
                self.emit_current_tag()
            },
            Some(c) => {
                self.tag_mut().current_attr_value.push(c);
                self.state = State::AttributeValueUnquoted;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_attr_value_quoted(&mut self, quote: char) -> Option<Token> {
        match self.consume() {
            Some(c) if c == quote => {
                self.tag_mut().finish_attribute();
                self.state = State::AfterAttributeValueQuoted;
                None
            },
            Some(c) => {
                self.tag_mut().current_attr_value.push(c);
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_attr_value_unquoted(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => {
                self.tag_mut().finish_attribute();
                self.state = State::BeforeAttributeName;
                None
            },
            Some('>') => {
                self.tag_mut().finish_attribute();
                self.emit_current_tag()
            },
            Some(c) => {
                self.tag_mut().current_attr_value.push(c);
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_after_attr_value_quoted(&mut self) -> Option<Token> {
        match self.consume() {
            Some(c) if c.is_ascii_whitespace() => {
                self.state = State::BeforeAttributeName;
                None
            },
            Some('/') => {
                self.state = State::SelfClosingStartTag;
                None
            },
            Some('>') => self.emit_current_tag(),
            Some(_) => {
                // missing space between attributes
                self.reconsume();
                self.state = State::BeforeAttributeName;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_self_closing(&mut self) -> Option<Token> {
        match self.consume() {
            Some('>') => {
                self.tag_mut().self_closing = true;
                self.emit_current_tag()
            },
            Some(_) => {
                // stray `/` inside a tag
                self.reconsume();
                self.state = State::BeforeAttributeName;
                None
            },
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_markup_declaration_open(&mut self) -> Option<Token> {
        if self.starts_with_ci("--") {
            self.pos += 2;
            self.scratch.clear();
            self.state = State::Comment;
        } else if self.starts_with_ci("doctype") {
            self.pos += 7;
            self.scratch.clear();
            self.state = State::Doctype;
        } else {
            self.state = State::BogusComment;
        }
        None
    }

    fn state_comment(&mut self) -> Option<Token> {
        match self.consume() {
            Some('-') => {
                self.state = State::CommentEndDash;
                None
            },
            Some(c) => {
                self.scratch.push(c);
                None
            },
            None => {
                self.truncate_markup();
                Some(Token::Comment(std::mem::take(&mut self.scratch)))
            },
        }
    }

    fn state_comment_end_dash(&mut self) -> Option<Token> {
        match self.consume() {
            Some('-') => {
                self.state = State::CommentEnd;
                None
            },
            Some(c) => {
                self.scratch.push('-');
                self.scratch.push(c);
                self.state = State::Comment;
                None
            },
            None => {
                self.truncate_markup();
                Some(Token::Comment(std::mem::take(&mut self.scratch)))
            },
        }
    }

    fn state_comment_end(&mut self) -> Option<Token> {
        match self.consume() {
            Some('>') => {
                self.state = State::Data;
                Some(Token::Comment(std::mem::take(&mut self.scratch)))
            },
            Some('-') => {
                // ---- runs: keep shifting one dash into the text
                self.scratch.push('-');
                None
            },
            Some(c) => {
                self.scratch.push_str("--");
                self.scratch.push(c);
                self.state = State::Comment;
                None
            },
            None => {
                self.truncate_markup();
                Some(Token::Comment(std::mem::take(&mut self.scratch)))
            },
        }
    }

    fn state_doctype(&mut self) -> Option<Token> {
        match self.consume() {
            Some('>') => {
                self.state = State::Data;
                Some(Token::Doctype(self.take_scratch_trimmed()))
            },
            Some(c) => {
                self.scratch.push(c);
                None
            },
            None => {
                self.truncate_markup();
                Some(Token::Doctype(self.take_scratch_trimmed()))
            },
        }
    }

    fn take_scratch_trimmed(&mut self) -> String {
        let text = std::mem::take(&mut self.scratch);
        text.trim().to_string()
    }

    fn state_processing_instruction(&mut self) -> Option<Token> {
        // `<?xml ...?>` and friends carry nothing we use; skip to `>`
        match self.consume() {
            Some('>') => {
                self.state = State::Data;
                None
            },
            Some(_) => None,
            None => {
                self.truncate_markup();
                None
            },
        }
    }

    fn state_bogus_comment(&mut self) -> Option<Token> {
        match self.consume() {
            Some('>') => {
                self.state = State::Data;
                None
            },
            Some(_) => None,
            None => {
                self.truncate_markup();
                None
            },
        }
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
