//! SBML Parser Module
//!
//! Parses token streams into expression trees using precedence climbing.

mod ast;
mod expr_parser;
mod tree;

pub use ast::{Associativity, BinaryOp, Expression, Number, Precedence, UnaryOp};
pub use expr_parser::ExprParser;
pub use tree::{render_tree, TreeDump};
