//! Line driver
//!
//! Splits a source text into lines and runs each one through the pipeline in
//! either parse mode (structure dump) or evaluate mode. Every line is
//! independent: a failure on one line produces an error marker for that line
//! and processing continues with the next.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, ErrorClass};
use crate::parallel::{process_lines_parallel, ParallelConfig};
use crate::parser::{render_tree, Expression, TreeDump};
use crate::runtime::{Evaluator, EvaluatorConfig, Value};

/// Marker printed for a line that fails to lex or parse
pub const SYNTAX_ERROR: &str = "SYNTAX ERROR";
/// Marker printed for a line that parses but fails to evaluate
pub const SEMANTIC_ERROR: &str = "SEMANTIC ERROR";

/// What to do with each parsed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Dump the expression tree (`-P`)
    Parse,
    /// Evaluate and print the value (`-E`)
    #[default]
    Evaluate,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "parse" | "-P" | "P" => Ok(RunMode::Parse),
            "evaluate" | "eval" | "-E" | "E" => Ok(RunMode::Evaluate),
            other => Err(format!(
                "unknown mode '{}' (expected 'parse' or 'evaluate')",
                other
            )),
        }
    }
}

/// Driver settings
#[derive(Debug, Clone, Default)]
pub struct DriverConfig {
    pub mode: RunMode,
    pub evaluator: EvaluatorConfig,
    /// Process lines on a thread pool when set
    pub parallel: Option<ParallelConfig>,
    /// Dump trees as JSON instead of the indented listing
    pub json: bool,
}

/// Result of processing one line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(Expression),
    Evaluated(Value),
    SyntaxError(Error),
    SemanticError(Error),
}

impl LineOutcome {
    fn failed(err: Error) -> Self {
        match err.class() {
            ErrorClass::Structural => LineOutcome::SyntaxError(err),
            ErrorClass::Semantic => LineOutcome::SemanticError(err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LineOutcome::SyntaxError(_) | LineOutcome::SemanticError(_))
    }

    /// The underlying failure, if the line failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            LineOutcome::SyntaxError(err) | LineOutcome::SemanticError(err) => Some(err),
            _ => None,
        }
    }

    /// Render the outcome, dumping trees as JSON when `json` is set
    pub fn render(&self, json: bool) -> String {
        match self {
            LineOutcome::Parsed(expr) if json => match serde_json::to_string_pretty(expr) {
                Ok(text) => text,
                Err(err) => {
                    debug!(error = %err, "JSON dump failed, using tree listing");
                    render_tree(expr)
                }
            },
            other => other.to_string(),
        }
    }
}

impl fmt::Display for LineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LineOutcome::Parsed(expr) => write!(f, "{}", TreeDump(expr)),
            LineOutcome::Evaluated(value) => write!(f, "{}", value.render()),
            LineOutcome::SyntaxError(_) => write!(f, "{}", SYNTAX_ERROR),
            LineOutcome::SemanticError(_) => write!(f, "{}", SEMANTIC_ERROR),
        }
    }
}

/// Trimmed, non-blank lines of `source`
pub fn source_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Run one line through the pipeline
pub fn process_line(line: &str, mode: RunMode, evaluator: &Evaluator) -> LineOutcome {
    let expr = match crate::parse(line) {
        Ok(expr) => expr,
        Err(err) => {
            debug!(line, error = %err, class = ?err.class(), "line failed to parse");
            return LineOutcome::failed(err);
        }
    };

    match mode {
        RunMode::Parse => LineOutcome::Parsed(expr),
        RunMode::Evaluate => match evaluator.evaluate(&expr) {
            Ok(value) => LineOutcome::Evaluated(value),
            Err(err) => {
                debug!(line, error = %err, class = ?err.class(), "line failed to evaluate");
                LineOutcome::failed(err)
            }
        },
    }
}

/// Process every line of `source`, in order
pub fn run_source(source: &str, config: &DriverConfig) -> Vec<LineOutcome> {
    let lines = source_lines(source);
    let evaluator = Evaluator::with_config(config.evaluator);
    let process = |line: &str| process_line(line, config.mode, &evaluator);

    match &config.parallel {
        Some(parallel) => process_lines_parallel(&lines, process, parallel),
        None => lines.iter().map(|line| process(*line)).collect(),
    }
}
