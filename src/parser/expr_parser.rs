use super::ast::{Associativity, BinaryOp, Expression, Number, Precedence, UnaryOp};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Precedence-climbing parser for one SBML line
///
/// The whole token stream must form exactly one expression; anything left
/// over after it is an error.
pub struct ExprParser {
    tokens: Vec<Token>,
    current: usize,
}

impl ExprParser {
    /// Creates a new parser over tokens produced by [`crate::lexer::Scanner`]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, String::new(), line, column));
        }
        ExprParser { tokens, current: 0 }
    }

    /// Parses the tokens into a single expression tree
    pub fn parse(&mut self) -> Result<Expression> {
        let expr = self.parse_expression(Precedence::OrElse)?;

        if !self.is_at_end() {
            let token = self.peek();
            return Err(Error::TrailingTokens {
                col: token.column,
                got: Self::token_kind_name(&token.kind),
            });
        }

        Ok(expr)
    }

    /// Parse operators binding at least as tightly as `min`
    fn parse_expression(&mut self, min: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;

        loop {
            // Indexing is postfix and binds tighter than any operator
            if self.check(&TokenKind::LeftBracket) {
                left = self.parse_index(left)?;
                continue;
            }

            let Some(op) = Self::infix_operator(self.peek()) else {
                break;
            };
            let precedence = op.precedence();
            if precedence < min {
                break;
            }
            self.advance();

            let right_min = match op.associativity() {
                Associativity::Left => precedence.next(),
                Associativity::Right => precedence,
            };
            let right = self.parse_expression(right_min)?;
            left = Expression::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let op = match self.peek().kind {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        self.advance();

        let operand = self.parse_expression(op.precedence())?;
        Ok(Expression::unary(op, operand))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek().kind {
            TokenKind::Integer(ref n) => {
                let n = n.clone();
                self.advance();
                Ok(Expression::Number(Number::Int(n)))
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expression::float(f))
            }
            TokenKind::Boolean(b) => {
                self.advance();
                Ok(Expression::Boolean(b))
            }
            TokenKind::String(ref s) => {
                let s = s.clone();
                self.advance();
                Ok(Expression::String(s))
            }
            TokenKind::LeftParen => self.parse_parenthesized(),
            TokenKind::LeftBracket => self.parse_list(),
            TokenKind::Hash => self.parse_tuple_index(),
            TokenKind::Eof => Err(Error::UnexpectedEof),
            _ => Err(self.syntax_error(format!(
                "Unexpected token {} in expression. Expected a number, string, boolean, \
                 `(`, `[`, `#`, `-`, `+` or `not`",
                Self::token_kind_name(&self.peek().kind)
            ))),
        }
    }

    /// `(E)` grouping, `(E,)` or `(E, E, ...)` tuple
    fn parse_parenthesized(&mut self) -> Result<Expression> {
        self.consume(TokenKind::LeftParen)?;
        let (mut items, tuple) = self.parse_paren_items()?;

        if tuple {
            Ok(Expression::Tuple(items))
        } else {
            Ok(items.remove(0))
        }
    }

    /// `#N(items)` where `N` is a number literal
    fn parse_tuple_index(&mut self) -> Result<Expression> {
        self.consume(TokenKind::Hash)?;

        let index = match self.peek().kind {
            TokenKind::Integer(ref n) => Number::Int(n.clone()),
            TokenKind::Float(f) => Number::Float(f),
            TokenKind::Eof => return Err(Error::UnexpectedEof),
            ref other => {
                return Err(self.syntax_error(format!(
                    "Expected number literal after `#`, found {}",
                    Self::token_kind_name(other)
                )))
            }
        };
        self.advance();

        self.consume(TokenKind::LeftParen)?;
        let (items, _) = self.parse_paren_items()?;

        Ok(Expression::TupleIndex {
            index: Box::new(Expression::Number(index)),
            tuple: Box::new(Expression::Tuple(items)),
        })
    }

    /// Items after an opening `(` up to and including the closing `)`
    ///
    /// Accepts `E)`, `E,)` and `E, E (, E)*)`. The flag is true when a comma
    /// was present, i.e. the items spell a tuple literal.
    fn parse_paren_items(&mut self) -> Result<(Vec<Expression>, bool)> {
        if self.check(&TokenKind::RightParen) {
            return Err(self.syntax_error("Empty parentheses are not an expression"));
        }

        let mut items = vec![self.parse_expression(Precedence::OrElse)?];
        let mut tuple = false;

        if self.match_token(&TokenKind::Comma) {
            tuple = true;
            if !self.check(&TokenKind::RightParen) {
                items.push(self.parse_expression(Precedence::OrElse)?);
                while self.match_token(&TokenKind::Comma) {
                    items.push(self.parse_expression(Precedence::OrElse)?);
                }
            }
        }

        self.consume(TokenKind::RightParen)?;
        Ok((items, tuple))
    }

    /// `[]` or `[E (, E)*]`
    fn parse_list(&mut self) -> Result<Expression> {
        self.consume(TokenKind::LeftBracket)?;

        let mut items = Vec::new();
        if !self.check(&TokenKind::RightBracket) {
            items.push(self.parse_expression(Precedence::OrElse)?);
            while self.match_token(&TokenKind::Comma) {
                items.push(self.parse_expression(Precedence::OrElse)?);
            }
        }

        self.consume(TokenKind::RightBracket)?;
        Ok(Expression::List(items))
    }

    fn parse_index(&mut self, collection: Expression) -> Result<Expression> {
        self.consume(TokenKind::LeftBracket)?;
        let index = self.parse_expression(Precedence::OrElse)?;
        self.consume(TokenKind::RightBracket)?;

        Ok(Expression::Index {
            collection: Box::new(collection),
            index: Box::new(index),
        })
    }

    fn infix_operator(token: &Token) -> Option<BinaryOp> {
        let op = match token.kind {
            TokenKind::OrElse => BinaryOp::OrElse,
            TokenKind::AndAlso => BinaryOp::AndAlso,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::NotEq if token.lexeme == "!=" => BinaryOp::BangEq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::ColonColon => BinaryOp::Cons,
            TokenKind::In => BinaryOp::In,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Div => BinaryOp::IntDiv,
            TokenKind::Mod => BinaryOp::Mod,
            TokenKind::StarStar => BinaryOp::Pow,
            _ => return None,
        };
        Some(op)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        // `new` guarantees a trailing Eof
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(&kind) {
            return Ok(self.advance());
        }
        if self.is_at_end() {
            return Err(Error::UnexpectedEof);
        }

        let message = format!(
            "Expected {}, found {}",
            Self::token_kind_name(&kind),
            Self::token_kind_name(&self.peek().kind)
        );
        Err(self.syntax_error(message))
    }

    fn token_kind_name(kind: &TokenKind) -> String {
        match kind {
            TokenKind::Integer(_) => "integer".to_string(),
            TokenKind::Float(_) => "float".to_string(),
            TokenKind::String(_) => "string".to_string(),
            TokenKind::Boolean(_) => "boolean".to_string(),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other),
        }
    }

    fn syntax_error(&self, message: impl Into<String>) -> Error {
        let token = self.peek();
        Error::syntax(token.line, token.column, message)
    }
}
