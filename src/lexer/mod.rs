//! Lexical analysis for SBML
//!
//! Converts one source line into a stream of classified tokens.

pub(crate) mod decimal;
mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenClass, TokenKind};
