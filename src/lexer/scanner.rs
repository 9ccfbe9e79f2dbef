use num_bigint::BigInt;

use super::token::{Token, TokenKind};
use crate::error::{Error, Result};

/// Scanner for SBML source lines
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Column where the current token starts
    start_column: usize,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_column: 1,
        }
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// The last token is always [`TokenKind::Eof`].
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_column = self.column;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            String::new(),
            self.line,
            self.column,
        ));

        Ok(std::mem::take(&mut self.tokens))
    }

    fn scan_token(&mut self) -> Result<()> {
        let c = self.advance();

        match c {
            ' ' | '\r' | '\t' => {}
            '\n' => {
                self.line += 1;
                self.column = 1;
            }

            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '[' => self.add_token(TokenKind::LeftBracket),
            ']' => self.add_token(TokenKind::RightBracket),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            ';' => self.add_token(TokenKind::Semicolon),
            '#' => self.add_token(TokenKind::Hash),

            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '/' => self.add_token(TokenKind::Slash),
            '*' => {
                if self.match_char('*') {
                    self.add_token(TokenKind::StarStar);
                } else {
                    self.add_token(TokenKind::Star);
                }
            }
            ':' => {
                if self.match_char(':') {
                    self.add_token(TokenKind::ColonColon);
                } else {
                    return Err(self.unexpected(c));
                }
            }

            '=' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::Eq);
                } else {
                    self.add_token(TokenKind::Assign);
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::NotEq);
                } else {
                    return Err(self.unexpected(c));
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::LtEq);
                } else if self.match_char('>') {
                    self.add_token(TokenKind::NotEq);
                } else {
                    self.add_token(TokenKind::Lt);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::GtEq);
                } else {
                    self.add_token(TokenKind::Gt);
                }
            }

            '"' | '\'' => self.scan_string(c)?,

            '.' if self.peek().is_ascii_digit() => self.scan_fraction()?,
            c if c.is_ascii_digit() => self.scan_number()?,

            c if c.is_ascii_alphabetic() => self.scan_identifier_or_keyword(),

            _ => return Err(self.unexpected(c)),
        }

        Ok(())
    }

    fn scan_string(&mut self, quote: char) -> Result<()> {
        let mut value = String::new();

        // A backslash protects the next character from ending the string;
        // both are kept in the value
        while !self.is_at_end() && self.peek() != quote {
            let c = self.advance();
            value.push(c);
            if c == '\\' && !self.is_at_end() {
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            return Err(Error::UnterminatedString {
                column: self.start_column,
            });
        }

        self.advance(); // Closing quote

        self.add_token(TokenKind::String(value));
        Ok(())
    }

    /// Integer part already started; handles `12`, `12.`, `12.5`, `12e3`
    fn scan_number(&mut self) -> Result<()> {
        self.consume_digits();

        let mut is_float = false;
        if self.peek() == '.' {
            is_float = true;
            self.advance();
            self.consume_digits();
        }

        is_float |= self.scan_exponent();
        self.finish_number(is_float)
    }

    /// Leading `.` already consumed and a digit is next; handles `.5`, `.5e3`
    fn scan_fraction(&mut self) -> Result<()> {
        self.consume_digits();
        self.scan_exponent();
        self.finish_number(true)
    }

    fn scan_exponent(&mut self) -> bool {
        if !matches!(self.peek(), 'e' | 'E') {
            return false;
        }
        let signed = matches!(self.peek_at(1), '+' | '-');
        let first_digit = if signed { self.peek_at(2) } else { self.peek_at(1) };
        if !first_digit.is_ascii_digit() {
            return false;
        }

        self.advance(); // e
        if signed {
            self.advance();
        }
        self.consume_digits();
        true
    }

    fn finish_number(&mut self, is_float: bool) -> Result<()> {
        let text: String = self.source[self.start..self.current].iter().collect();

        if is_float {
            let value: f64 = text
                .parse()
                .map_err(|_| Error::InvalidNumber { literal: text.clone() })?;
            self.add_token(TokenKind::Float(value));
        } else {
            let value: BigInt = text
                .parse()
                .map_err(|_| Error::InvalidNumber { literal: text.clone() })?;
            self.add_token(TokenKind::Integer(value));
        }

        Ok(())
    }

    fn consume_digits(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
    }

    fn scan_identifier_or_keyword(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text: String = self.source[self.start..self.current].iter().collect();

        let token_kind = match TokenKind::keyword(&text) {
            Some(keyword) => keyword,
            None if text == "True" => TokenKind::Boolean(true),
            None if text == "False" => TokenKind::Boolean(false),
            None => TokenKind::Identifier(text),
        };

        self.add_token(token_kind);
    }

    fn unexpected(&self, ch: char) -> Error {
        Error::UnexpectedCharacter {
            ch,
            column: self.start_column,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> char {
        self.source
            .get(self.current + offset)
            .copied()
            .unwrap_or('\0')
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            self.column += 1;
            true
        }
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme: String = self.source[self.start..self.current].iter().collect();
        self.tokens
            .push(Token::new(kind, lexeme, self.line, self.start_column));
    }
}
