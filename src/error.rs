//! Error types for the SBML interpreter

use num_bigint::BigInt;
use thiserror::Error;

/// SBML interpreter errors
///
/// Every variant belongs to exactly one [`ErrorClass`]: structural errors come
/// from the scanner and parser, semantic errors from the evaluator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors
    /// Character that starts no token
    ///
    /// **Triggered by:** `!`, a lone `:`, `_`, `$`, or a `.` not followed by a digit
    /// **Example:** `1 ! 2`
    #[error("Unexpected character '{ch}' at column {column}")]
    UnexpectedCharacter {
        /// Offending character
        ch: char,
        /// Column where it appeared (1-indexed)
        column: usize,
    },

    /// String literal missing its closing quote
    #[error("Unterminated string starting at column {column}")]
    UnterminatedString {
        /// Column of the opening quote
        column: usize,
    },

    /// Number literal whose text does not convert to a value
    #[error("Invalid number literal: {literal}")]
    InvalidNumber {
        /// Source text of the literal
        literal: String,
    },

    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** a token that cannot start or continue an expression
    /// **Example:** `1 + * 2`, `print 1`
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Input ended in the middle of an expression
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// A complete expression was followed by more tokens
    #[error("Unexpected trailing input at column {col}: {got}")]
    TrailingTokens {
        /// Column of the first extra token
        col: usize,
        /// Description of the first extra token
        got: String,
    },

    // Runtime errors
    /// Operand of the wrong type for a unary operator or operand position
    ///
    /// **Example:** `not 1`, `-"a"`, `1 :: 2`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Binary operator applied to an unsupported pair of types
    ///
    /// **Example:** `1 + "a"`, `[1] - [2]`, `7.0 div 2`
    #[error("Invalid operation: {op} on types {left_type} and {right_type}")]
    InvalidOperation {
        /// Operator symbol
        op: String,
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Comparison between kinds that have no ordering together
    ///
    /// **Example:** `1 < 1.5`, `"a" == 1`, `True == True`
    #[error("Invalid comparison between types {left_type} and {right_type}")]
    InvalidComparison {
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Division by zero error
    ///
    /// **Triggered by:** a zero right operand of `/`, `div` or `mod`, or `0 ** -n`
    #[error("Division by zero")]
    DivisionByZero,

    /// Index outside the collection bounds
    ///
    /// **Example:** `[1, 2, 3][5]`, `#0(10, 20)`
    #[error("Index out of bounds: {index} for {collection} of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: BigInt,
        /// Length of the indexed collection
        length: usize,
        /// Kind of collection indexed
        collection: String,
    },

    /// Index expression that did not evaluate to an integer
    #[error("Index must be an int, got {got}")]
    NonIntegerIndex {
        /// Actual type of the index
        got: String,
    },

    /// Indexing or projecting a value of the wrong collection kind
    #[error("Cannot index {got}: expected {expected}")]
    NotIndexable {
        /// Accepted collection kinds
        expected: String,
        /// Actual type
        got: String,
    },

    /// Operator symbol outside the language
    #[error("Unknown operator: {symbol}")]
    UnknownOperator {
        /// Symbol that was not recognised
        symbol: String,
    },

    /// Result too large to represent
    ///
    /// **Triggered by:** a float `**` that overflows, an integer too large to
    /// widen to a float, or an integer power too large to compute
    /// **Example:** `10.0 ** 400`, `10 ** 400 * 1.0`
    #[error("Numeric overflow in {op}")]
    Overflow {
        /// Operator symbol
        op: String,
    },
}

/// The two disjoint failure classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The line is not a well-formed program (lexing or parsing failed)
    Structural,
    /// The program is well-formed but violated a runtime rule
    Semantic,
}

/// Distinguishable kinds of semantic failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticKind {
    /// Operand types not accepted by the operator
    TypeMismatch,
    /// Comparison operands of different or unordered kinds
    ComparisonMismatch,
    /// Zero divisor
    DivisionByZero,
    /// Index outside `[0, len)` (lists, strings) or `[1, len]` (tuples)
    IndexOutOfRange,
    /// Index that is not an integer
    NonIntegerIndex,
    /// Target is not a list/string (indexing) or tuple (projection)
    WrongCollectionKind,
    /// Operator symbol outside the language
    UnknownOperator,
    /// Result too large to represent
    Overflow,
}

impl Error {
    /// Create a syntax error with a message
    pub fn syntax(line: usize, col: usize, message: impl Into<String>) -> Self {
        Error::SyntaxError {
            line,
            col,
            message: message.into(),
        }
    }

    /// Classify the error as structural or semantic
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::UnexpectedCharacter { .. }
            | Error::UnterminatedString { .. }
            | Error::InvalidNumber { .. }
            | Error::SyntaxError { .. }
            | Error::UnexpectedEof
            | Error::TrailingTokens { .. } => ErrorClass::Structural,

            Error::TypeError { .. }
            | Error::InvalidOperation { .. }
            | Error::InvalidComparison { .. }
            | Error::DivisionByZero
            | Error::IndexOutOfBounds { .. }
            | Error::NonIntegerIndex { .. }
            | Error::NotIndexable { .. }
            | Error::UnknownOperator { .. }
            | Error::Overflow { .. } => ErrorClass::Semantic,
        }
    }

    /// True for lexing and parsing failures
    pub fn is_structural(&self) -> bool {
        self.class() == ErrorClass::Structural
    }

    /// Sub-kind of a semantic error, `None` for structural errors
    pub fn semantic_kind(&self) -> Option<SemanticKind> {
        let kind = match self {
            Error::TypeError { .. } | Error::InvalidOperation { .. } => SemanticKind::TypeMismatch,
            Error::InvalidComparison { .. } => SemanticKind::ComparisonMismatch,
            Error::DivisionByZero => SemanticKind::DivisionByZero,
            Error::IndexOutOfBounds { .. } => SemanticKind::IndexOutOfRange,
            Error::NonIntegerIndex { .. } => SemanticKind::NonIntegerIndex,
            Error::NotIndexable { .. } => SemanticKind::WrongCollectionKind,
            Error::UnknownOperator { .. } => SemanticKind::UnknownOperator,
            Error::Overflow { .. } => SemanticKind::Overflow,
            _ => return None,
        };
        Some(kind)
    }
}

/// Result type for SBML operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_disjoint() {
        let structural = Error::UnexpectedEof;
        assert_eq!(structural.class(), ErrorClass::Structural);
        assert!(structural.is_structural());
        assert_eq!(structural.semantic_kind(), None);

        let semantic = Error::DivisionByZero;
        assert_eq!(semantic.class(), ErrorClass::Semantic);
        assert!(!semantic.is_structural());
        assert_eq!(semantic.semantic_kind(), Some(SemanticKind::DivisionByZero));
    }

    #[test]
    fn test_semantic_kinds() {
        let err = Error::InvalidComparison {
            left_type: "int".to_string(),
            right_type: "float".to_string(),
        };
        assert_eq!(err.semantic_kind(), Some(SemanticKind::ComparisonMismatch));

        let err = Error::NotIndexable {
            expected: "tuple".to_string(),
            got: "list".to_string(),
        };
        assert_eq!(err.semantic_kind(), Some(SemanticKind::WrongCollectionKind));
    }

    #[test]
    fn test_display() {
        let err = Error::syntax(1, 3, "Expected expression");
        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 3: Expected expression"
        );
        assert_eq!(Error::DivisionByZero.to_string(), "Division by zero");
    }
}
