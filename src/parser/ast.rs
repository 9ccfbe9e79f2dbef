use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Expressions
///
/// One parsed line is a single `Expression` tree. Children are owned by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    // Literals
    /// Integer or floating-point literal
    Number(Number),
    /// `True` / `False`
    Boolean(bool),
    /// String literal
    String(String),

    // Collections
    /// `[a, b, ...]`
    List(Vec<Expression>),
    /// `(a,)` or `(a, b, ...)`
    Tuple(Vec<Expression>),

    /// Binary operations
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary operations
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    /// `collection[index]` on lists and strings, 0-based
    Index {
        collection: Box<Expression>,
        index: Box<Expression>,
    },

    /// `#index(tuple)` projection, 1-based
    TupleIndex {
        index: Box<Expression>,
        tuple: Box<Expression>,
    },
}

/// Numeric literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Number {
    /// Arbitrary-precision integer
    Int(#[serde(with = "crate::lexer::decimal")] BigInt),
    Float(f64),
}

impl Expression {
    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn int(value: impl Into<BigInt>) -> Self {
        Expression::Number(Number::Int(value.into()))
    }

    pub fn float(value: f64) -> Self {
        Expression::Number(Number::Float(value))
    }

    /// Name of the node kind, as shown in tree dumps
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Number(_) => "NumberNode",
            Expression::Boolean(_) => "BooleanNode",
            Expression::String(_) => "StringNode",
            Expression::List(_) => "ListNode",
            Expression::Tuple(_) => "TupleNode",
            Expression::Binary { .. } => "BinaryOpNode",
            Expression::Unary { .. } => "UnaryOpNode",
            Expression::Index { .. } => "IndexNode",
            Expression::TupleIndex { .. } => "TupleIndexNode",
        }
    }

    /// Literal payload of leaf nodes, rendered for display
    pub fn literal(&self) -> Option<String> {
        match self {
            Expression::Number(n) => Some(n.to_string()),
            Expression::Boolean(true) => Some("True".to_string()),
            Expression::Boolean(false) => Some("False".to_string()),
            Expression::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Operator symbol of operator nodes
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Expression::Binary { op, .. } => Some(op.symbol()),
            Expression::Unary { op, .. } => Some(op.symbol()),
            _ => None,
        }
    }

    /// Direct children in declaration order
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Number(_) | Expression::Boolean(_) | Expression::String(_) => Vec::new(),
            Expression::List(items) | Expression::Tuple(items) => items.iter().collect(),
            Expression::Binary { left, right, .. } => vec![&**left, &**right],
            Expression::Unary { operand, .. } => vec![&**operand],
            Expression::Index { collection, index } => vec![&**collection, &**index],
            Expression::TupleIndex { index, tuple } => vec![&**index, &**tuple],
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(fl) => write!(f, "{}", crate::runtime::format_float(*fl)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BinaryOp {
    // Logical
    OrElse,
    AndAlso,

    // Comparison
    Lt,
    LtEq,
    Eq,
    NotEq,
    /// `!=`, the alternate spelling of `<>`
    BangEq,
    GtEq,
    Gt,

    // List construction and membership
    Cons,
    In,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
}

/// Binding strength, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    OrElse,
    AndAlso,
    Not,
    Comparison,
    Cons,
    Membership,
    Term,
    Factor,
    Power,
    Unary,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl Precedence {
    /// The next tighter level; `Postfix` is the tightest
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::OrElse,
            Precedence::OrElse => Precedence::AndAlso,
            Precedence::AndAlso => Precedence::Not,
            Precedence::Not => Precedence::Comparison,
            Precedence::Comparison => Precedence::Cons,
            Precedence::Cons => Precedence::Membership,
            Precedence::Membership => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Power,
            Precedence::Power => Precedence::Unary,
            Precedence::Unary | Precedence::Postfix => Precedence::Postfix,
        }
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 18] = [
        BinaryOp::OrElse,
        BinaryOp::AndAlso,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::BangEq,
        BinaryOp::GtEq,
        BinaryOp::Gt,
        BinaryOp::Cons,
        BinaryOp::In,
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::IntDiv,
        BinaryOp::Mod,
        BinaryOp::Pow,
    ];

    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOp::OrElse => Precedence::OrElse,
            BinaryOp::AndAlso => Precedence::AndAlso,
            BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::BangEq
            | BinaryOp::GtEq
            | BinaryOp::Gt => Precedence::Comparison,
            BinaryOp::Cons => Precedence::Cons,
            BinaryOp::In => Precedence::Membership,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Term,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::IntDiv | BinaryOp::Mod => Precedence::Factor,
            BinaryOp::Pow => Precedence::Power,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            BinaryOp::Cons | BinaryOp::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn is_comparison(&self) -> bool {
        self.precedence() == Precedence::Comparison
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::OrElse => "orelse",
            BinaryOp::AndAlso => "andalso",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "<>",
            BinaryOp::BangEq => "!=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Gt => ">",
            BinaryOp::Cons => "::",
            BinaryOp::In => "in",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::IntDiv => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Pow => "**",
        }
    }
}

impl UnaryOp {
    pub fn precedence(&self) -> Precedence {
        match self {
            UnaryOp::Not => Precedence::Not,
            UnaryOp::Neg | UnaryOp::Plus => Precedence::Unary,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
        }
    }
}

impl FromStr for BinaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BinaryOp::ALL
            .iter()
            .copied()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| Error::UnknownOperator {
                symbol: s.to_string(),
            })
    }
}

impl FromStr for UnaryOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not" => Ok(UnaryOp::Not),
            "-" => Ok(UnaryOp::Neg),
            "+" => Ok(UnaryOp::Plus),
            _ => Err(Error::UnknownOperator {
                symbol: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for BinaryOp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for UnaryOp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BinaryOp> for String {
    fn from(op: BinaryOp) -> String {
        op.symbol().to_string()
    }
}

impl From<UnaryOp> for String {
    fn from(op: UnaryOp) -> String {
        op.symbol().to_string()
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
