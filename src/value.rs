//! Runtime values for Ri
//!
//! A value is one of four scalar kinds. Lists live in their own store and
//! are never values themselves; reading a list name as a scalar produces a
//! descriptor string instead.
//!
//! Arithmetic follows the rules the language has always had: booleans
//! count as integers, `+` concatenates two strings, `*` repeats a string by
//! an integer, `/` always produces a float, and any other mix of a string
//! with a number is a type error.

use crate::eval::EvalError;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

/// Literal spelled for boolean true
pub const TRUE_LITERAL: &str = "истина";
/// Literal spelled for boolean false
pub const FALSE_LITERAL: &str = "ложь";
/// Largest string, in bytes, that `*` may build by repetition
pub const MAX_REPEAT_BYTES: usize = 1 << 28;

/// A scalar value
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

/// Numeric view of a value (booleans widen to integers)
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }
}

/// Comparison operators recognised by the expression ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Ge,
    Le,
    Eq,
    Ne,
    Gt,
    Lt,
}

impl CompareOp {
    /// Operators in the order the evaluator tries them
    pub const SCAN_ORDER: [CompareOp; 6] = [
        CompareOp::Ge,
        CompareOp::Le,
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Gt,
        CompareOp::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Integer(0)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_num(), other.as_num()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => a == b,
            (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
            _ => match (self, other) {
                (Value::Str(a), Value::Str(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => f.write_str(s),
            Value::Bool(true) => f.write_str(TRUE_LITERAL),
            Value::Bool(false) => f.write_str(FALSE_LITERAL),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Format a float the way script authors expect: integral floats keep a
/// trailing `.0`, very large or very small magnitudes use an exponent.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let raw = format!("{:e}", x);
        return match raw.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ('-', d),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => raw,
        };
    }
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// `s * count`; non-positive counts give an empty string
fn repeat(s: &str, count: i64) -> Result<Value, EvalError> {
    let count = usize::try_from(count.max(0)).map_err(|_| EvalError::Overflow)?;
    match s.len().checked_mul(count) {
        Some(bytes) if bytes <= MAX_REPEAT_BYTES => Ok(Value::Str(s.repeat(count))),
        _ => Err(EvalError::Overflow),
    }
}

impl Value {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "целое",
            Value::Float(_) => "дробное",
            Value::Str(_) => "строка",
            Value::Bool(_) => "булево",
        }
    }

    fn as_num(&self) -> Option<Num> {
        match self {
            Value::Integer(i) => Some(Num::Int(*i)),
            Value::Float(x) => Some(Num::Float(*x)),
            Value::Bool(b) => Some(Num::Int(*b as i64)),
            Value::Str(_) => None,
        }
    }

    /// Integer view, used for indices and repeat counts
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_num().is_some()
    }

    /// Whether this value equals numeric zero (strings never do)
    pub fn is_zero(&self) -> bool {
        self.as_num().map(|n| n.as_f64() == 0.0).unwrap_or(false)
    }

    /// Truthiness: numbers are true when nonzero, strings are false when
    /// empty, `0`, or a spelling of false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => {
                let lower = s.to_lowercase();
                !matches!(lower.as_str(), "" | "0" | FALSE_LITERAL | "false")
            }
        }
    }

    /// Convert to float, accepting numeric strings
    pub fn to_f64(&self) -> Result<f64, EvalError> {
        match self {
            Value::Str(s) => s.trim().parse::<f64>().map_err(|_| {
                EvalError::Conversion(format!("не удалось преобразовать '{}' в дробное", s))
            }),
            other => Ok(other.as_num().map(Num::as_f64).unwrap_or_default()),
        }
    }

    /// Convert to integer, truncating floats and accepting integer strings
    pub fn to_i64(&self) -> Result<i64, EvalError> {
        match self {
            Value::Integer(i) => Ok(*i),
            Value::Bool(b) => Ok(*b as i64),
            Value::Float(x) if x.is_finite() => Ok(x.trunc() as i64),
            Value::Float(x) => Err(EvalError::Conversion(format!(
                "не удалось преобразовать {} в целое",
                format_float(*x)
            ))),
            Value::Str(s) => s.trim().parse::<i64>().map_err(|_| {
                EvalError::Conversion(format!("не удалось преобразовать '{}' в целое", s))
            }),
        }
    }

    fn type_error(op: &str, left: &Value, right: &Value) -> EvalError {
        EvalError::TypeError {
            op: op.to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }
    }

    pub fn add(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.as_num(), other.as_num()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => {
                a.checked_add(b).map(Value::Integer).ok_or(EvalError::Overflow)
            }
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() + b.as_f64())),
            _ => match (self, other) {
                (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
                _ => Err(Self::type_error("+", self, other)),
            },
        }
    }

    pub fn sub(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.as_num(), other.as_num()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => {
                a.checked_sub(b).map(Value::Integer).ok_or(EvalError::Overflow)
            }
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() - b.as_f64())),
            _ => Err(Self::type_error("-", self, other)),
        }
    }

    pub fn mul(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.as_num(), other.as_num()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => {
                a.checked_mul(b).map(Value::Integer).ok_or(EvalError::Overflow)
            }
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() * b.as_f64())),
            _ => match (self, other) {
                (Value::Str(s), n) | (n, Value::Str(s)) => match n.as_index() {
                    Some(count) => repeat(s, count),
                    None => Err(Self::type_error("*", self, other)),
                },
                _ => Err(Self::type_error("*", self, other)),
            },
        }
    }

    /// True division; the caller handles a zero denominator
    pub fn div(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.as_num(), other.as_num()) {
            (Some(_), Some(b)) if b.as_f64() == 0.0 => Err(EvalError::ZeroDivision),
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() / b.as_f64())),
            _ => Err(Self::type_error("/", self, other)),
        }
    }

    pub fn pow(&self, other: &Value) -> Result<Value, EvalError> {
        match (self.as_num(), other.as_num()) {
            (Some(Num::Int(base)), Some(Num::Int(exp))) if exp >= 0 => {
                let exp = u32::try_from(exp).map_err(|_| EvalError::Overflow)?;
                base.checked_pow(exp).map(Value::Integer).ok_or(EvalError::Overflow)
            }
            (Some(base), Some(exp)) => {
                let (b, e) = (base.as_f64(), exp.as_f64());
                if b == 0.0 && e < 0.0 {
                    return Err(EvalError::ZeroDivision);
                }
                if b < 0.0 && e.fract() != 0.0 {
                    return Err(EvalError::Domain(
                        "отрицательное основание с дробной степенью".to_string(),
                    ));
                }
                Ok(Value::Float(b.powf(e)))
            }
            _ => Err(Self::type_error("^", self, other)),
        }
    }

    /// Relational comparison. Equality never fails; ordering between a
    /// string and a number is a type error.
    pub fn compare(&self, op: CompareOp, other: &Value) -> Result<bool, EvalError> {
        match op {
            CompareOp::Eq => return Ok(self == other),
            CompareOp::Ne => return Ok(self != other),
            _ => {}
        }
        let ordering = match (self.as_num(), other.as_num()) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => Some(a.cmp(&b)),
            (Some(a), Some(b)) => a.as_f64().partial_cmp(&b.as_f64()),
            _ => match (self, other) {
                (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
                _ => return Err(Self::type_error(op.symbol(), self, other)),
            },
        };
        // NaN compares false for every ordering operator
        let Some(ordering) = ordering else {
            return Ok(false);
        };
        Ok(match op {
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Ge => ordering != Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Eq | CompareOp::Ne => unreachable!("handled above"),
        })
    }

    /// JSON form for hosts that serialise graphics operands or variables
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Integer(i) => JsonValue::from(*i),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_display_keeps_trailing_zero() {
        assert_eq!(Value::Float(6.0).to_string(), "6.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn float_display_uses_exponent_for_extremes() {
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
    }

    #[test]
    fn bool_display_is_localized() {
        assert_eq!(Value::Bool(true).to_string(), "истина");
        assert_eq!(Value::Bool(false).to_string(), "ложь");
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(!Value::Str("0".into()).is_truthy());
        assert!(!Value::Str("ЛОЖЬ".into()).is_truthy());
        assert!(!Value::Str("False".into()).is_truthy());
        assert!(Value::Str("нет".into()).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::Integer(-1).is_truthy());
    }

    #[test]
    fn bool_counts_as_integer_in_arithmetic() {
        assert_eq!(Value::Bool(true).add(&Value::Integer(1)).unwrap(), Value::Integer(2));
    }

    #[test]
    fn string_plus_number_is_type_error() {
        let err = Value::Integer(0).add(&Value::Str("a".into())).unwrap_err();
        assert!(matches!(err, EvalError::TypeError { .. }));
    }

    #[test]
    fn string_repeat() {
        let v = Value::Str("ab".into()).mul(&Value::Integer(3)).unwrap();
        assert_eq!(v, Value::Str("ababab".into()));
        let v = Value::Integer(1).mul(&Value::Str("ab".into())).unwrap();
        assert_eq!(v, Value::Str("ab".into()));
        let v = Value::Str("ab".into()).mul(&Value::Integer(-2)).unwrap();
        assert_eq!(v, Value::Str(String::new()));
    }

    #[test]
    fn huge_repeat_is_overflow() {
        let s = Value::Str("ab".into());
        assert_eq!(s.mul(&Value::Integer(i64::MAX)), Err(EvalError::Overflow));
        let limit = (MAX_REPEAT_BYTES / 2 + 1) as i64;
        assert_eq!(s.mul(&Value::Integer(limit)), Err(EvalError::Overflow));
        // empty strings never grow
        let empty = Value::Str(String::new()).mul(&Value::Integer(i64::MAX)).unwrap();
        assert_eq!(empty, Value::Str(String::new()));
    }

    #[test]
    fn integer_overflow_and_power_errors() {
        assert_eq!(Value::Integer(i64::MAX).mul(&Value::Integer(2)), Err(EvalError::Overflow));
        assert_eq!(Value::Integer(2).pow(&Value::Integer(64)), Err(EvalError::Overflow));
        assert_eq!(Value::Integer(0).pow(&Value::Float(-1.0)), Err(EvalError::ZeroDivision));
        assert!(matches!(
            Value::Integer(-8).pow(&Value::Float(0.5)),
            Err(EvalError::Domain(_))
        ));
        assert!(matches!(
            Value::Bool(true).pow(&Value::Str("a".into())),
            Err(EvalError::TypeError { .. })
        ));
    }

    #[test]
    fn division_is_always_float() {
        assert!(matches!(Value::Integer(6).div(&Value::Integer(3)).unwrap(), Value::Float(x) if x == 2.0));
    }

    #[test]
    fn integer_power_stays_integer() {
        assert!(matches!(Value::Integer(2).pow(&Value::Integer(10)).unwrap(), Value::Integer(1024)));
        assert!(matches!(Value::Integer(2).pow(&Value::Integer(-1)).unwrap(), Value::Float(x) if x == 0.5));
    }

    #[test]
    fn mixed_ordering_fails_but_equality_does_not() {
        let s = Value::Str("a".into());
        let n = Value::Integer(1);
        assert!(s.compare(CompareOp::Gt, &n).is_err());
        assert!(!s.compare(CompareOp::Eq, &n).unwrap());
        assert!(s.compare(CompareOp::Ne, &n).unwrap());
        assert!(Value::Integer(1).compare(CompareOp::Eq, &Value::Float(1.0)).unwrap());
    }
}
