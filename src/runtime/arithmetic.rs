//! Operator implementations over runtime values

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::evaluator::NumericPolicy;
use super::value::Value;
use crate::error::{Error, Result};
use crate::parser::{BinaryOp, UnaryOp};

/// Largest integer power result, in bits, that `**` will compute
const MAX_POWER_BITS: u64 = 1 << 24;

/// Apply a binary operator to two evaluated operands
///
/// `andalso`/`orelse` are accepted here without short-circuiting; the
/// evaluator handles them before both sides are reduced.
pub(crate) fn apply_binary_op(
    op: BinaryOp,
    left: Value,
    right: Value,
    policy: NumericPolicy,
) -> Result<Value> {
    match op {
        BinaryOp::Add => add(left, right, policy),
        BinaryOp::Sub | BinaryOp::Mul => numeric(op, left, right),
        BinaryOp::Div => divide(left, right),
        BinaryOp::IntDiv | BinaryOp::Mod => integer_division(op, left, right),
        BinaryOp::Pow => power(left, right),
        BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::BangEq
        | BinaryOp::GtEq
        | BinaryOp::Gt => compare(op, &left, &right),
        BinaryOp::Cons => cons(left, right),
        BinaryOp::In => membership(&left, &right),
        BinaryOp::AndAlso | BinaryOp::OrElse => {
            let (l, r) = (left.as_bool()?, right.as_bool()?);
            let result = if op == BinaryOp::AndAlso { l && r } else { l || r };
            Ok(Value::Bool(result))
        }
    }
}

pub(crate) fn apply_unary_op(op: UnaryOp, operand: Value) -> Result<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Plus, value @ (Value::Int(_) | Value::Float(_))) => Ok(value),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Not, other) => Err(Error::TypeError {
            expected: "bool".to_string(),
            got: other.type_name(),
        }),
        (_, other) => Err(Error::TypeError {
            expected: "number".to_string(),
            got: other.type_name(),
        }),
    }
}

fn add(left: Value, right: Value, policy: NumericPolicy) -> Result<Value> {
    let unified = policy == NumericPolicy::Unified;

    match (left, right) {
        (Value::Int(l), Value::Int(r)) => Ok(Value::Int(l + r)),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l + r)),
        (l @ Value::Int(_), r @ Value::Float(_)) | (l @ Value::Float(_), r @ Value::Int(_))
            if unified =>
        {
            let (l, r) = float_operands(BinaryOp::Add, &l, &r)?;
            Ok(Value::Float(l + r))
        }
        (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
        (Value::List(l), Value::List(r)) => {
            let mut result = (*l).clone();
            result.extend(r.iter().cloned());
            Ok(Value::list(result))
        }
        (l, r) => Err(invalid(BinaryOp::Add, &l, &r)),
    }
}

/// `-` and `*`: integers stay integers, any float widens the result
fn numeric(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    if let (Value::Int(l), Value::Int(r)) = (&left, &right) {
        let result = match op {
            BinaryOp::Sub => l - r,
            _ => l * r,
        };
        return Ok(Value::Int(result));
    }

    let (l, r) = float_operands(op, &left, &right)?;
    let result = match op {
        BinaryOp::Sub => l - r,
        _ => l * r,
    };
    Ok(Value::Float(result))
}

fn divide(left: Value, right: Value) -> Result<Value> {
    let (l, r) = float_operands(BinaryOp::Div, &left, &right)?;
    if r == 0.0 {
        return Err(Error::DivisionByZero);
    }
    Ok(Value::Float(l / r))
}

/// `div` floors toward negative infinity; `mod` takes the divisor's sign
fn integer_division(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    let (l, r) = match (&left, &right) {
        (Value::Int(l), Value::Int(r)) => (l, r),
        _ => return Err(invalid(op, &left, &right)),
    };
    if r.is_zero() {
        return Err(Error::DivisionByZero);
    }

    let (quotient, remainder) = (l / r, l % r);
    let inexact = !remainder.is_zero() && remainder.is_negative() != r.is_negative();

    let result = match (op, inexact) {
        (BinaryOp::IntDiv, true) => quotient - BigInt::one(),
        (BinaryOp::IntDiv, false) => quotient,
        (_, true) => remainder + r,
        (_, false) => remainder,
    };
    Ok(Value::Int(result))
}

fn power(left: Value, right: Value) -> Result<Value> {
    let (base, exp) = match (&left, &right) {
        (Value::Int(base), Value::Int(exp)) => (base, exp),
        _ => return float_power(&left, &right),
    };

    if exp.is_negative() {
        if base.is_zero() {
            return Err(Error::DivisionByZero);
        }
        return float_power(&left, &right);
    }

    if base.is_zero() {
        let result = if exp.is_zero() { 1 } else { 0 };
        return Ok(Value::int(result));
    }
    if base.is_one() {
        return Ok(Value::int(1));
    }
    if *base == -BigInt::one() {
        let even = (exp % BigInt::from(2)).is_zero();
        return Ok(Value::int(if even { 1 } else { -1 }));
    }

    let exp = exp.to_u32().ok_or_else(|| overflow("**"))?;
    if base.bits().saturating_mul(u64::from(exp)) > MAX_POWER_BITS {
        return Err(overflow("**"));
    }
    Ok(Value::Int(base.pow(exp)))
}

fn float_power(left: &Value, right: &Value) -> Result<Value> {
    let (base, exp) = float_operands(BinaryOp::Pow, left, right)?;
    if base == 0.0 && exp < 0.0 {
        return Err(Error::DivisionByZero);
    }
    // No complex results
    if base < 0.0 && exp.fract() != 0.0 {
        return Err(invalid(BinaryOp::Pow, left, right));
    }

    let result = base.powf(exp);
    if result.is_infinite() && base.is_finite() && exp.is_finite() {
        return Err(overflow("**"));
    }
    Ok(Value::Float(result))
}

/// Both operands widened to `f64`
///
/// An integer beyond the float range is an overflow rather than an infinity.
fn float_operands(op: BinaryOp, left: &Value, right: &Value) -> Result<(f64, f64)> {
    let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) else {
        return Err(invalid(op, left, right));
    };

    let too_large = |value: &Value, widened: f64| {
        matches!(value, Value::Int(_)) && widened.is_infinite()
    };
    if too_large(left, l) || too_large(right, r) {
        return Err(overflow(op.symbol()));
    }
    Ok((l, r))
}

/// Same-kind comparison of ints, floats or strings
fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::Float(l), Value::Float(r)) => l.partial_cmp(r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => {
            return Err(Error::InvalidComparison {
                left_type: left.type_name(),
                right_type: right.type_name(),
            })
        }
    };

    // NaN is unordered: only inequality holds
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(matches!(op, BinaryOp::NotEq | BinaryOp::BangEq)));
    };

    let holds = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq | BinaryOp::BangEq => ordering != Ordering::Equal,
        BinaryOp::GtEq => ordering != Ordering::Less,
        BinaryOp::Gt => ordering == Ordering::Greater,
        other => {
            return Err(Error::UnknownOperator {
                symbol: other.symbol().to_string(),
            })
        }
    };
    Ok(Value::Bool(holds))
}

fn cons(head: Value, tail: Value) -> Result<Value> {
    let tail = tail.as_list()?;
    let mut result = Vec::with_capacity(tail.len() + 1);
    result.push(head);
    result.extend(tail.iter().cloned());
    Ok(Value::list(result))
}

fn membership(needle: &Value, haystack: &Value) -> Result<Value> {
    match (needle, haystack) {
        (_, Value::List(items)) => Ok(Value::Bool(
            items.iter().any(|item| item.loosely_equals(needle)),
        )),
        (Value::String(n), Value::String(h)) => Ok(Value::Bool(h.contains(n.as_str()))),
        _ => Err(invalid(BinaryOp::In, needle, haystack)),
    }
}

fn invalid(op: BinaryOp, left: &Value, right: &Value) -> Error {
    Error::InvalidOperation {
        op: op.symbol().to_string(),
        left_type: left.type_name(),
        right_type: right.type_name(),
    }
}

fn overflow(op: &str) -> Error {
    Error::Overflow { op: op.to_string() }
}
