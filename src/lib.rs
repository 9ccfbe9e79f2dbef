//! # SBML - A Line-Oriented Expression Interpreter
//!
//! SBML is a small, dynamically typed expression language. Every source line
//! is one expression: it is tokenized, parsed into an abstract syntax tree
//! with a precedence-climbing parser, and then either dumped as a tree or
//! evaluated to a value.
//!
//! ## Quick Start
//!
//! ```rust
//! use sbml::{Evaluator, Parser, Scanner, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Tokenize (scan)
//! let mut scanner = Scanner::new("1 + 2 * 3");
//! let tokens = scanner.scan_tokens()?;
//!
//! // Parse into AST
//! let mut parser = Parser::new(tokens);
//! let expr = parser.parse()?;
//!
//! // Evaluate
//! let evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate(&expr)?, Value::int(7));
//! # Ok(())
//! # }
//! ```
//!
//! The [`parse`] and [`evaluate`] shortcuts run the same pipeline:
//!
//! ```rust
//! # fn main() -> sbml::Result<()> {
//! let expr = sbml::parse("#2(1, \"two\", 3.0)")?;
//! assert_eq!(sbml::evaluate(&expr)?.render(), "'two'");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - **Literals**: integers `42`, floats `4.2`, `.5`, `1e3`, booleans
//!   `True`/`False`, strings `"a"` or `'a'`
//! - **Collections**: lists `[1, 2]`, tuples `(1, 2)` and `(1,)`
//! - **Arithmetic**: `+ - * / ** div mod`
//! - **Comparison**: `< <= == <> >= >`
//! - **Logic**: `not`, `andalso`, `orelse` (short-circuiting)
//! - **Lists and strings**: `x :: xs`, `x in xs`, `xs[0]`
//! - **Tuples**: `#1(a, b)` projects the first element
//!
//! ## Architecture
//!
//! ```text
//! Source Line → Scanner → Tokens → Parser → AST → Evaluator → Value
//! ```
//!
//! - [`Scanner`] - Tokenizes one line
//! - [`Parser`] - Builds an [`Expression`] tree
//! - [`Evaluator`] - Reduces the tree to a [`Value`]
//! - [`driver`] - Runs whole files line by line, optionally in parallel
//!
//! ## Error Handling
//!
//! Failures are either structural (the line does not lex or parse) or
//! semantic (the line parses but breaks a typing rule at runtime):
//!
//! ```rust
//! use sbml::ErrorClass;
//!
//! let err = sbml::parse("1 +").unwrap_err();
//! assert_eq!(err.class(), ErrorClass::Structural);
//!
//! let expr = sbml::parse("1 / 0").unwrap();
//! let err = sbml::evaluate(&expr).unwrap_err();
//! assert_eq!(err.class(), ErrorClass::Semantic);
//! assert!(err.to_string().contains("Division by zero"));
//! ```

/// Version of the SBML interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod driver;
pub mod error;
pub mod lexer;
pub mod parallel;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use driver::{run_source, DriverConfig, LineOutcome, RunMode};
pub use error::{Error, ErrorClass, Result, SemanticKind};
pub use lexer::{Token, TokenKind};
pub use parser::{BinaryOp, Expression, Number, UnaryOp};
pub use runtime::{Evaluator, EvaluatorConfig, NumericPolicy, Value};

/// Type alias for the line scanner (lexer).
pub type Scanner = lexer::Scanner;

/// Type alias for the expression parser.
pub type Parser = parser::ExprParser;

/// Tokenize and parse a single line
pub fn parse(line: &str) -> Result<Expression> {
    let mut scanner = Scanner::new(line);
    let tokens = scanner.scan_tokens()?;
    tracing::trace!(count = tokens.len(), "scanned tokens");

    let mut parser = Parser::new(tokens);
    let expr = parser.parse()?;
    tracing::trace!(root = expr.kind_name(), "parsed expression");
    Ok(expr)
}

/// Evaluate a tree with the default configuration
pub fn evaluate(expr: &Expression) -> Result<Value> {
    Evaluator::new().evaluate(expr)
}
