//! Lexer for Sigil
//!
//! Converts source code into a flat token sequence. The scanner is an
//! explicit finite-state machine: every call to [`Lexer::step`] runs one
//! state and returns to `Start`, so a single unrecognized character is
//! reported as an `ERROR` token and scanning resumes instead of aborting.

use log::debug;

use crate::frontend::token::{
    classify_operator, is_delimiter_fragment, is_operator_char, Keyword, Token, TokenKind, TypeTag,
};

/// Scanner states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Identifier,
    Number,
    Comment,
    TypeSigil,
    DelimiterOrOperator,
    Str,
    Error,
    Done,
}

/// The lexer state
pub struct Lexer {
    /// Source code as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Current machine state
    state: State,
    /// Tokens produced so far
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            state: State::Start,
            tokens: Vec::new(),
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Get the next character without advancing
    fn peek_next(&self) -> Option<char> {
        self.source.get(self.pos + 1).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn push_token(&mut self, kind: TokenKind, lexeme: String) {
        self.tokens.push(Token::new(kind, lexeme));
    }

    /// Text of the scanned region starting at `start`
    fn text_from(&self, start: usize) -> String {
        self.source[start..self.pos.min(self.source.len())]
            .iter()
            .collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\n' || c == '\r' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Run one state of the machine
    fn step(&mut self) {
        match self.state {
            State::Start => {
                self.skip_whitespace();
                let Some(c) = self.peek() else {
                    self.state = State::Done;
                    return;
                };
                self.state = if TypeTag::from_sigil(c).is_some() {
                    State::TypeSigil
                } else if c.is_alphabetic() {
                    State::Identifier
                } else if c.is_ascii_digit() {
                    State::Number
                } else if c == '\'' {
                    State::Str
                } else if c == '/' && self.peek_next() == Some('*') {
                    State::Comment
                } else if is_operator_char(c) {
                    State::DelimiterOrOperator
                } else {
                    State::Error
                };
            }
            State::Identifier => {
                self.read_identifier();
                self.state = State::Start;
            }
            State::Number => {
                self.read_number();
                self.state = State::Start;
            }
            State::Str => {
                self.read_string();
                self.state = State::Start;
            }
            State::Comment => {
                self.read_comment();
                self.state = State::Start;
            }
            State::TypeSigil => {
                self.read_type_sigil();
                self.state = State::Start;
            }
            State::DelimiterOrOperator => {
                self.read_operator();
                self.state = State::Start;
            }
            State::Error => {
                // One ERROR token per unrecognized character, then resume.
                if let Some(c) = self.advance() {
                    self.push_token(TokenKind::Error, format!("Unexpected character: {c}"));
                }
                self.state = State::Start;
            }
            State::Done => {}
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.text_from(start);
        let kind = if TypeTag::from_sigil_str(&text).is_some() {
            TokenKind::Type
        } else if Keyword::from_lexeme(&text).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Id
        };
        self.push_token(kind, text);
    }

    /// Read a number literal
    ///
    /// A leading `0` followed by `B`/`O`/`H` (either case) switches to the
    /// matching digit alphabet. Decimal literals take an optional fraction,
    /// an optional exponent, and an optional `D` suffix when not already
    /// real. Every form is emitted as `NUMBER`; only the lexeme records
    /// which one matched.
    fn read_number(&mut self) {
        let start = self.pos;

        if self.peek() == Some('0') {
            match self.peek_next() {
                Some('B') | Some('b') => {
                    self.advance();
                    self.advance();
                    while matches!(self.peek(), Some('0') | Some('1')) {
                        self.advance();
                    }
                    let text = self.text_from(start);
                    self.push_token(TokenKind::Number, text);
                    return;
                }
                Some('O') | Some('o') => {
                    self.advance();
                    self.advance();
                    while matches!(self.peek(), Some('0'..='7')) {
                        self.advance();
                    }
                    let text = self.text_from(start);
                    self.push_token(TokenKind::Number, text);
                    return;
                }
                Some('H') | Some('h') => {
                    self.advance();
                    self.advance();
                    while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        self.advance();
                    }
                    let text = self.text_from(start);
                    self.push_token(TokenKind::Number, text);
                    return;
                }
                _ => {}
            }
        }

        let mut is_real = false;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            is_real = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('E') | Some('e')) {
            is_real = true;
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if !is_real && matches!(self.peek(), Some('D') | Some('d')) {
            self.advance();
        }

        let text = self.text_from(start);
        self.push_token(TokenKind::Number, text);
    }

    /// Skip a `/* ... */` comment
    ///
    /// Running off the end of input without a closing `*/` is not an error;
    /// scanning simply stops there.
    fn read_comment(&mut self) {
        self.advance(); // step off the '/', leaving the opening '*' current
        while let Some(c) = self.peek() {
            if c == '*' && self.peek_next() == Some('/') {
                break;
            }
            self.advance();
        }
        self.advance(); // '*'
        self.advance(); // '/'
    }

    /// Read a string literal, re-wrapping the captured text in quotes
    ///
    /// No escape handling; an unterminated string runs to end of input
    /// without raising an error.
    fn read_string(&mut self) {
        self.advance(); // opening quote
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\'' {
                break;
            }
            self.advance();
        }
        let text = self.text_from(start);
        self.push_token(TokenKind::Str, format!("'{text}'"));
        self.advance(); // closing quote, if any
    }

    /// Read a delimiter or operator by maximal munch: keep extending the
    /// lexeme while the longer candidate is still in the operator set.
    fn read_operator(&mut self) {
        let start = self.pos;
        self.advance();
        while self.peek().is_some() {
            let candidate: String = self.source[start..self.pos + 1].iter().collect();
            if is_delimiter_fragment(&candidate) {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.text_from(start);
        let kind = classify_operator(&text);
        self.push_token(kind, text);
    }

    /// Read a single type sigil
    fn read_type_sigil(&mut self) {
        if let Some(c) = self.peek() {
            if TypeTag::from_sigil(c).is_some() {
                self.advance();
                self.push_token(TokenKind::Type, c.to_string());
            }
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize(&mut self) -> Vec<Token> {
        while self.state != State::Done {
            self.step();
        }
        debug!("scanned {} tokens", self.tokens.len());
        std::mem::take(&mut self.tokens)
    }
}
