//! Recursive-descent parser for old-style property lists.
//!
//! Accepts the subset Xcode emits: a dictionary document, `// ...` line
//! comments (the `// !$*UTF8*$!` header), `/* ... */` block comments,
//! quoted strings with escapes, and unquoted tokens. A block comment
//! directly following a token is kept as that token's annotation;
//! free-standing comments (the section markers) are discarded and
//! regenerated by the writer.

use std::fmt;

use super::value::{Atom, Dict, Entry, Value};

#[derive(Debug, Clone)]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.message, self.line, self.column)
    }
}

impl std::error::Error for ParseError {}

/// Parses a descriptor document. The root must be a dictionary.
pub fn parse(input: &str) -> Result<Dict, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if !parser.at_end() {
        return Err(parser.error("trailing content after document root"));
    }
    match value {
        Value::Dict(dict) => Ok(dict),
        _ => Err(parser.error("document root is not a dictionary")),
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Skips whitespace and free-standing comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek2() == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek2() == Some('*') => {
                    self.block_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consumes a `/* ... */` comment and returns its trimmed body.
    fn block_comment(&mut self) -> Result<String, ParseError> {
        self.bump();
        self.bump();
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('*') if self.peek2() == Some('/') => {
                    self.bump();
                    self.bump();
                    return Ok(text.trim().to_string());
                }
                Some(_) => {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
                None => return Err(self.error("unterminated comment")),
            }
        }
    }

    /// A block comment on the same line as the token it follows, with only
    /// spaces or tabs in between, is that token's annotation.
    fn take_annotation(&mut self) -> Result<Option<String>, ParseError> {
        let mut idx = self.pos;
        while matches!(self.chars.get(idx), Some(' ' | '\t')) {
            idx += 1;
        }
        if self.chars.get(idx) == Some(&'/') && self.chars.get(idx + 1) == Some(&'*') {
            while self.pos < idx {
                self.bump();
            }
            Ok(Some(self.block_comment()?))
        } else {
            Ok(None)
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some('{') => self.parse_dict().map(Value::Dict),
            Some('(') => self.parse_array().map(Value::Array),
            _ => self.parse_atom().map(Value::Atom),
        }
    }

    fn parse_dict(&mut self) -> Result<Dict, ParseError> {
        self.expect('{')?;
        let mut dict = Dict::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(dict);
                }
                None => return Err(self.error("unterminated dictionary")),
                _ => {}
            }
            let key = self.parse_atom()?;
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            self.skip_trivia()?;
            self.expect(';')?;
            dict.push(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Value>, ParseError> {
        self.expect('(')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(')') => {
                    self.bump();
                    return Ok(items);
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') => {
                    self.bump();
                    return Ok(items);
                }
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_atom(&mut self) -> Result<Atom, ParseError> {
        let text = match self.peek() {
            Some('"') => self.parse_quoted()?,
            Some(c) if is_unquoted_char(c) => self.parse_unquoted(),
            Some(c) => return Err(self.error(format!("unexpected character '{c}'"))),
            None => return Err(self.error("unexpected end of input")),
        };
        let annotation = self.take_annotation()?;
        Ok(Atom { text, annotation })
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some('"') => return Ok(text),
                Some('\\') => text.push(self.parse_escape()?),
                Some(c) => text.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char, ParseError> {
        match self.bump() {
            None => Err(self.error("unterminated escape sequence")),
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('U') => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let digit = self
                        .bump()
                        .and_then(|c| c.to_digit(16))
                        .ok_or_else(|| self.error("invalid \\U escape"))?;
                    code = code * 16 + digit;
                }
                char::from_u32(code).ok_or_else(|| self.error("invalid \\U escape"))
            }
            Some(c @ '0'..='7') => {
                let mut code = c as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            self.bump();
                            code = code * 8 + digit;
                        }
                        None => break,
                    }
                }
                char::from_u32(code).ok_or_else(|| self.error("invalid octal escape"))
            }
            Some(c) => Ok(c),
        }
    }

    fn parse_unquoted(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_unquoted_char(c) {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }
}

fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.' | '-')
}
