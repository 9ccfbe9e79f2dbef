use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::{Error, Result};

/// Runtime value representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Primitives
    /// Arbitrary-precision integer value
    Int(BigInt),
    /// 64-bit floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),

    // Collections (use Arc for large values)
    /// Ordered list of values (reference-counted)
    List(Arc<Vec<Value>>),
    /// Fixed tuple of values (reference-counted, never empty when built by the parser)
    Tuple(Arc<Vec<Value>>),
}

impl Value {
    /// Creates an integer value
    pub fn int(value: impl Into<BigInt>) -> Self {
        Value::Int(value.into())
    }

    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Arc::new(values))
    }

    /// Creates a tuple value from a vector of values
    pub fn tuple(values: Vec<Value>) -> Self {
        Value::Tuple(Arc::new(values))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::String(_) => "string".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
        }
    }

    /// True for `Int` and `Float`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric value widened to `f64`
    ///
    /// Integers beyond the float range widen to an infinity of the same sign.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(n.to_f64().unwrap_or(match n.sign() {
                Sign::Minus => f64::NEG_INFINITY,
                _ => f64::INFINITY,
            })),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean value
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(Error::TypeError {
                expected: "bool".to_string(),
                got: self.type_name(),
            }),
        }
    }

    /// Returns a reference to the list elements
    pub fn as_list(&self) -> Result<&Vec<Value>> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(Error::TypeError {
                expected: "list".to_string(),
                got: self.type_name(),
            }),
        }
    }

    /// Equality used by membership tests
    ///
    /// Like `==` on values, except that an `Int` and a `Float` with the same
    /// numeric value are equal, at any nesting depth.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                b.fract() == 0.0 && BigInt::from_f64(*b).as_ref() == Some(a)
            }
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.loosely_equals(y))
            }
            _ => self == other,
        }
    }

    /// Gets an element from a list or a character from a string, 0-based
    pub fn get_index(&self, index: &Value) -> Result<Value> {
        let idx = Self::integer_index(index)?;

        match self {
            Value::List(items) => idx
                .to_usize()
                .and_then(|i| items.get(i))
                .cloned()
                .ok_or_else(|| self.out_of_bounds(idx, items.len())),
            Value::String(s) => idx
                .to_usize()
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::String(c.to_string()))
                .ok_or_else(|| self.out_of_bounds(idx, s.chars().count())),
            _ => Err(Error::NotIndexable {
                expected: "list or string".to_string(),
                got: self.type_name(),
            }),
        }
    }

    /// Projects a tuple element, 1-based
    pub fn project(&self, index: &Value) -> Result<Value> {
        let idx = Self::integer_index(index)?;

        match self {
            Value::Tuple(items) => idx
                .to_usize()
                .filter(|&i| i >= 1)
                .and_then(|i| items.get(i - 1))
                .cloned()
                .ok_or_else(|| self.out_of_bounds(idx, items.len())),
            _ => Err(Error::NotIndexable {
                expected: "tuple".to_string(),
                got: self.type_name(),
            }),
        }
    }

    fn integer_index(index: &Value) -> Result<&BigInt> {
        match index {
            Value::Int(n) => Ok(n),
            other => Err(Error::NonIntegerIndex {
                got: other.type_name(),
            }),
        }
    }

    fn out_of_bounds(&self, index: &BigInt, length: usize) -> Error {
        Error::IndexOutOfBounds {
            index: index.clone(),
            length,
            collection: self.type_name(),
        }
    }

    /// Top-level rendering: strings in plain single quotes, everything else
    /// in its canonical literal form
    pub fn render(&self) -> String {
        match self {
            Value::String(s) => format!("'{}'", s),
            other => other.to_string(),
        }
    }
}

/// Shortest round-trip float text, `.0` on integral values, scientific
/// notation outside `1e-4 <= |x| < 1e16`
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let positional = value.to_string();
        if positional.contains('.') {
            positional
        } else {
            positional + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

/// Quoted string literal with backslash escapes
fn quote_string(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(fl) => write!(f, "{}", format_float(*fl)),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::String(s) => write!(f, "{}", quote_string(s)),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}
