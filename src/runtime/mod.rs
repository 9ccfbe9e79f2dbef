//! Runtime values and expression evaluation

mod arithmetic;
mod evaluator;
mod value;

pub use evaluator::{Evaluator, EvaluatorConfig, NumericPolicy};
pub use value::{format_float, Value};
