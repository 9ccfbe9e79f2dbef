//! Property-based fuzzing tests for the SBML scanner, parser and evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. The pipeline never panics on arbitrary input
//! 2. Numeric literals evaluate to themselves, at any integer size
//! 3. Parsing and evaluation are deterministic
//! 4. Parallel and sequential line processing agree

use num_bigint::BigInt;
use proptest::prelude::*;
use sbml::driver::run_source;
use sbml::lexer::Scanner;
use sbml::parallel::ParallelConfig;
use sbml::parser::ExprParser;
use sbml::runtime::{Evaluator, Value};
use sbml::{DriverConfig, RunMode};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,200}").unwrap()
}

/// Generate token soup that looks like SBML
fn sbml_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(sbml_token(), 0..40).prop_map(|tokens| tokens.join(" "))
}

fn sbml_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(",".to_string()),
        Just("#".to_string()),
        // Keywords
        Just("not".to_string()),
        Just("andalso".to_string()),
        Just("orelse".to_string()),
        Just("in".to_string()),
        Just("div".to_string()),
        Just("mod".to_string()),
        Just("True".to_string()),
        Just("False".to_string()),
        // Operators
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("**".to_string()),
        Just("::".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just("==".to_string()),
        Just("<>".to_string()),
        // Numbers
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
        (0.0f64..100.0f64).prop_map(|f| format!("{:.2}", f)),
        Just("0".to_string()),
        // Strings
        "\"[a-z ]{0,8}\"".prop_map(|s| s),
    ]
}

/// Generate well-formed arithmetic expressions
fn arith_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (-100i64..100i64).prop_map(|n| n.to_string()),
        (-100i64..100i64).prop_map(|n| format!("{}.5", n)),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        (
            inner.clone(),
            prop_oneof![
                Just("+"),
                Just("-"),
                Just("*"),
                Just("/"),
                Just("div"),
                Just("mod"),
                Just("<"),
                Just("=="),
            ],
            inner,
        )
            .prop_map(|(l, op, r)| format!("({} {} {})", l, op, r))
    })
}

fn run(source: &str) -> Result<Value, sbml::Error> {
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens()?;
    let mut parser = ExprParser::new(tokens);
    let expr = parser.parse()?;
    Evaluator::new().evaluate(&expr)
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    /// The scanner should never panic on arbitrary input
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let mut scanner = Scanner::new(&source);
        // Should either succeed or return an error, never panic
        let _ = scanner.scan_tokens();
    }

    /// The full pipeline handles SBML-like token soup without panic
    #[test]
    fn pipeline_never_panics(source in sbml_like_string()) {
        let _ = run(&source);
    }

    /// Parser handles deeply nested parentheses
    #[test]
    fn parser_handles_deep_nesting(depth in 1usize..100) {
        let source = format!("{}1 + 1{}", "(".repeat(depth), ")".repeat(depth));
        prop_assert_eq!(run(&source), Ok(Value::int(2)));
    }

    /// Unbalanced brackets are structural errors, never panics
    #[test]
    fn parser_handles_unbalanced_parens(opens in 0usize..30, closes in 0usize..30) {
        let source = format!("{}1{}", "(".repeat(opens), ")".repeat(closes));
        let result = run(&source);
        if opens == closes {
            prop_assert_eq!(result, Ok(Value::int(1)));
        } else {
            prop_assert!(matches!(result, Err(ref err) if err.is_structural()));
        }
    }
}

// =============================================================================
// SEMANTICS
// =============================================================================

proptest! {
    /// Integer literals evaluate to themselves
    #[test]
    fn integer_literal_round_trip(n in any::<i64>()) {
        prop_assert_eq!(run(&n.to_string()), Ok(Value::int(n)));
    }

    /// Literals of any length keep every digit
    #[test]
    fn long_integer_literal_round_trip(digits in "[1-9][0-9]{0,80}") {
        let expected: BigInt = digits.parse().unwrap();
        prop_assert_eq!(run(&digits), Ok(Value::Int(expected)));
        prop_assert_eq!(run(&digits).unwrap().render(), digits);
    }

    /// Integer `+` and `*` agree with big-integer arithmetic
    #[test]
    fn integer_arithmetic_is_exact(a in any::<i64>(), b in any::<i64>()) {
        let (x, y) = (BigInt::from(a), BigInt::from(b));
        prop_assert_eq!(run(&format!("{} + {}", a, b)), Ok(Value::Int(&x + &y)));
        prop_assert_eq!(run(&format!("{} * {}", a, b)), Ok(Value::Int(x * y)));
    }

    /// Float literals evaluate to themselves
    #[test]
    fn float_literal_round_trip(f in -1.0e12f64..1.0e12f64) {
        prop_assert_eq!(run(&format!("{:?}", f)), Ok(Value::Float(f)));
    }

    /// Re-parsing and re-evaluating yields identical results
    #[test]
    fn evaluation_is_deterministic(source in arith_expr()) {
        let first = sbml::parse(&source);
        let second = sbml::parse(&source);
        prop_assert_eq!(&first, &second);

        if let (Ok(a), Ok(b)) = (first, second) {
            prop_assert_eq!(sbml::evaluate(&a), sbml::evaluate(&b));
        }
    }

    /// Every failure belongs to exactly one class
    #[test]
    fn failures_are_classified(source in sbml_like_string()) {
        if let Err(err) = run(&source) {
            prop_assert_eq!(err.is_structural(), err.semantic_kind().is_none());
        }
    }

    /// Parallel line processing matches the sequential run
    #[test]
    fn parallel_matches_sequential(lines in prop::collection::vec(arith_expr(), 1..30)) {
        let source = lines.join("\n");
        let sequential = DriverConfig {
            mode: RunMode::Evaluate,
            ..DriverConfig::default()
        };
        let parallel = DriverConfig {
            parallel: Some(ParallelConfig::with_parallelism(4)),
            ..sequential.clone()
        };

        prop_assert_eq!(run_source(&source, &sequential), run_source(&source, &parallel));
    }
}
