//! Tree-walking evaluator for SBML expressions
//!
//! The evaluator holds no mutable state, so a single instance can be shared
//! across worker threads.

use std::fmt;
use std::str::FromStr;

use super::arithmetic::{apply_binary_op, apply_unary_op};
use super::value::Value;
use crate::error::Result;
use crate::parser::{BinaryOp, Expression, Number};

/// How mixed `Int`/`Float` operands are treated by `+`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericPolicy {
    /// `+` requires both operands to be the same numeric kind
    #[default]
    Exact,
    /// `+` widens a mixed pair to `Float`
    Unified,
}

impl FromStr for NumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(NumericPolicy::Exact),
            "unified" => Ok(NumericPolicy::Unified),
            other => Err(format!(
                "unknown numeric policy '{}' (expected 'exact' or 'unified')",
                other
            )),
        }
    }
}

impl fmt::Display for NumericPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericPolicy::Exact => write!(f, "exact"),
            NumericPolicy::Unified => write!(f, "unified"),
        }
    }
}

/// Evaluator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluatorConfig {
    pub numeric_policy: NumericPolicy,
}

/// Reduces an [`Expression`] to a [`Value`]
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an evaluator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates an expression
    ///
    /// Operands are reduced left to right. `andalso` and `orelse` skip their
    /// right operand when the left one decides the result.
    pub fn evaluate(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Number(Number::Int(n)) => Ok(Value::Int(n.clone())),
            Expression::Number(Number::Float(f)) => Ok(Value::Float(*f)),
            Expression::Boolean(b) => Ok(Value::Bool(*b)),
            Expression::String(s) => Ok(Value::String(s.clone())),

            Expression::List(items) => self.evaluate_all(items).map(Value::list),
            Expression::Tuple(items) => self.evaluate_all(items).map(Value::tuple),

            Expression::Binary { op, left, right } => match op {
                BinaryOp::AndAlso | BinaryOp::OrElse => self.short_circuit(*op, left, right),
                _ => {
                    let left = self.evaluate(left)?;
                    let right = self.evaluate(right)?;
                    apply_binary_op(*op, left, right, self.config.numeric_policy)
                }
            },

            Expression::Unary { op, operand } => apply_unary_op(*op, self.evaluate(operand)?),

            Expression::Index { collection, index } => {
                let collection = self.evaluate(collection)?;
                let index = self.evaluate(index)?;
                collection.get_index(&index)
            }

            Expression::TupleIndex { index, tuple } => {
                let index = self.evaluate(index)?;
                let tuple = self.evaluate(tuple)?;
                tuple.project(&index)
            }
        }
    }

    fn evaluate_all(&self, items: &[Expression]) -> Result<Vec<Value>> {
        items.iter().map(|item| self.evaluate(item)).collect()
    }

    fn short_circuit(&self, op: BinaryOp, left: &Expression, right: &Expression) -> Result<Value> {
        let left = self.evaluate(left)?.as_bool()?;
        match (op, left) {
            (BinaryOp::AndAlso, false) => Ok(Value::Bool(false)),
            (BinaryOp::OrElse, true) => Ok(Value::Bool(true)),
            _ => Ok(Value::Bool(self.evaluate(right)?.as_bool()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parser::UnaryOp;

    fn eval(expr: &Expression) -> Result<Value> {
        Evaluator::new().evaluate(expr)
    }

    /// A subexpression that fails if it is ever evaluated
    fn poison() -> Expression {
        Expression::binary(BinaryOp::IntDiv, Expression::int(1), Expression::int(0))
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval(&Expression::int(3)), Ok(Value::int(3)));
        assert_eq!(eval(&Expression::Boolean(true)), Ok(Value::Bool(true)));
        assert_eq!(
            eval(&Expression::Tuple(vec![Expression::int(1), Expression::float(2.0)])),
            Ok(Value::tuple(vec![Value::int(1), Value::Float(2.0)]))
        );
    }

    #[test]
    fn test_short_circuit_skips_right_operand() {
        let and = Expression::binary(BinaryOp::AndAlso, Expression::Boolean(false), poison());
        assert_eq!(eval(&and), Ok(Value::Bool(false)));

        let or = Expression::binary(BinaryOp::OrElse, Expression::Boolean(true), poison());
        assert_eq!(eval(&or), Ok(Value::Bool(true)));

        let and = Expression::binary(BinaryOp::AndAlso, Expression::Boolean(true), poison());
        assert_eq!(eval(&and), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_logical_operands_must_be_bool() {
        let expr = Expression::binary(BinaryOp::OrElse, Expression::int(1), Expression::Boolean(true));
        assert!(matches!(eval(&expr), Err(Error::TypeError { .. })));

        let expr = Expression::binary(BinaryOp::AndAlso, Expression::Boolean(true), Expression::int(1));
        assert!(matches!(eval(&expr), Err(Error::TypeError { .. })));
    }

    #[test]
    fn test_index_and_projection() {
        let list = Expression::List(vec![Expression::int(4), Expression::int(5)]);
        let expr = Expression::Index {
            collection: Box::new(list),
            index: Box::new(Expression::int(1)),
        };
        assert_eq!(eval(&expr), Ok(Value::int(5)));

        let tuple = Expression::Tuple(vec![Expression::int(4), Expression::String("x".into())]);
        let expr = Expression::TupleIndex {
            index: Box::new(Expression::int(2)),
            tuple: Box::new(tuple),
        };
        assert_eq!(eval(&expr), Ok(Value::String("x".to_string())));
    }

    #[test]
    fn test_numeric_policy() {
        let mixed = Expression::binary(BinaryOp::Add, Expression::int(1), Expression::float(0.5));
        assert!(eval(&mixed).is_err());

        let unified = Evaluator::with_config(EvaluatorConfig {
            numeric_policy: NumericPolicy::Unified,
        });
        assert_eq!(unified.evaluate(&mixed), Ok(Value::Float(1.5)));
    }

    #[test]
    fn test_errors_propagate_from_operands() {
        let expr = Expression::unary(UnaryOp::Neg, poison());
        assert_eq!(eval(&expr), Err(Error::DivisionByZero));

        let expr = Expression::List(vec![Expression::int(1), poison()]);
        assert_eq!(eval(&expr), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("exact".parse(), Ok(NumericPolicy::Exact));
        assert_eq!("Unified".parse(), Ok(NumericPolicy::Unified));
        assert!("loose".parse::<NumericPolicy>().is_err());
    }

    #[test]
    fn test_evaluator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }
}
