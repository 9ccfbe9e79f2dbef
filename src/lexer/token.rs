use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// A single token from the source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }
}

/// Coarse classification of tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Number,
    Boolean,
    String,
    Identifier,
    Keyword,
    Operator,
    Punctuation,
    Eof,
}

/// All possible token types in SBML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Integer literal, arbitrary precision
    Integer(#[serde(with = "super::decimal")] BigInt),
    /// Floating-point literal
    Float(f64),
    /// `True` or `False`
    Boolean(bool),
    /// String literal (quotes removed, escapes kept as written)
    String(String),

    /// Identifier that is not a reserved word
    Identifier(String),

    // Statement keywords (reserved, never valid in an expression)
    /// PRINT keyword
    Print,
    /// IF keyword
    If,
    /// ELSE keyword
    Else,
    /// WHILE keyword
    While,

    // Word operators
    /// Integer division (`div`)
    Div,
    /// Integer modulus (`mod`)
    Mod,
    /// Logical negation (`not`)
    Not,
    /// Short-circuit conjunction (`andalso`)
    AndAlso,
    /// Short-circuit disjunction (`orelse`)
    OrElse,
    /// Membership (`in`)
    In,

    // Symbolic operators
    /// Plus operator (+)
    Plus,
    /// Minus operator (-)
    Minus,
    /// Star operator (*)
    Star,
    /// Slash operator (/)
    Slash,
    /// Power operator (**)
    StarStar,
    /// Cons operator (::)
    ColonColon,
    /// Less than operator (<)
    Lt,
    /// Less than or equal operator (<=)
    LtEq,
    /// Equality operator (==)
    Eq,
    /// Inequality operator (<> or !=)
    NotEq,
    /// Greater than or equal operator (>=)
    GtEq,
    /// Greater than operator (>)
    Gt,
    /// Tuple projection marker (#)
    Hash,

    // Delimiters
    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left bracket [
    LeftBracket,
    /// Right bracket ]
    RightBracket,
    /// Left brace {
    LeftBrace,
    /// Right brace }
    RightBrace,
    /// Comma delimiter
    Comma,
    /// Semicolon delimiter
    Semicolon,
    /// Assignment (=)
    Assign,

    // Special
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Reserved word for `word`, if any
    ///
    /// `True` and `False` are literals and handled by the scanner, not here.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "print" => TokenKind::Print,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "div" => TokenKind::Div,
            "mod" => TokenKind::Mod,
            "not" => TokenKind::Not,
            "andalso" => TokenKind::AndAlso,
            "orelse" => TokenKind::OrElse,
            "in" => TokenKind::In,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if token is a reserved word
    pub fn is_keyword(&self) -> bool {
        self.class() == TokenClass::Keyword
    }

    /// Classify the token
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Integer(_) | TokenKind::Float(_) => TokenClass::Number,
            TokenKind::Boolean(_) => TokenClass::Boolean,
            TokenKind::String(_) => TokenClass::String,
            TokenKind::Identifier(_) => TokenClass::Identifier,
            TokenKind::Print
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::Div
            | TokenKind::Mod
            | TokenKind::Not
            | TokenKind::AndAlso
            | TokenKind::OrElse
            | TokenKind::In => TokenClass::Keyword,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::StarStar
            | TokenKind::ColonColon
            | TokenKind::Lt
            | TokenKind::LtEq
            | TokenKind::Eq
            | TokenKind::NotEq
            | TokenKind::GtEq
            | TokenKind::Gt
            | TokenKind::Hash => TokenClass::Operator,
            TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBracket
            | TokenKind::RightBracket
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Assign => TokenClass::Punctuation,
            TokenKind::Eof => TokenClass::Eof,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Float(fl) => write!(f, "{}", fl),
            TokenKind::Boolean(true) => write!(f, "True"),
            TokenKind::Boolean(false) => write!(f, "False"),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Identifier(id) => write!(f, "{}", id),
            TokenKind::Print => write!(f, "print"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::While => write!(f, "while"),
            TokenKind::Div => write!(f, "div"),
            TokenKind::Mod => write!(f, "mod"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::AndAlso => write!(f, "andalso"),
            TokenKind::OrElse => write!(f, "orelse"),
            TokenKind::In => write!(f, "in"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::StarStar => write!(f, "**"),
            TokenKind::ColonColon => write!(f, "::"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::Eq => write!(f, "=="),
            TokenKind::NotEq => write!(f, "<>"),
            TokenKind::GtEq => write!(f, ">="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Hash => write!(f, "#"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::LeftBracket => write!(f, "["),
            TokenKind::RightBracket => write!(f, "]"),
            TokenKind::LeftBrace => write!(f, "{{"),
            TokenKind::RightBrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::keyword("div"), Some(TokenKind::Div));
        assert_eq!(TokenKind::keyword("andalso"), Some(TokenKind::AndAlso));
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("True"), None);
        assert_eq!(TokenKind::keyword("divide"), None);
    }

    #[test]
    fn test_classes() {
        assert!(TokenKind::In.is_keyword());
        assert!(TokenKind::Print.is_keyword());
        assert!(!TokenKind::Integer(BigInt::from(42)).is_keyword());
        assert_eq!(TokenKind::Float(1.5).class(), TokenClass::Number);
        assert_eq!(TokenKind::Hash.class(), TokenClass::Operator);
        assert_eq!(TokenKind::Semicolon.class(), TokenClass::Punctuation);
        assert_eq!(
            TokenKind::Identifier("x".to_string()).class(),
            TokenClass::Identifier
        );
    }
}
