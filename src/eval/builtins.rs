use super::{EvalError, Interpreter};
use crate::host::DebugEvent;
use crate::lexer;
use crate::value::Value;
use rand::Rng;

/// Native functions callable as `name(args)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Random,
    Length,
    Sqrt,
    Sin,
    Cos,
    Round,
    Str,
    Num,
    Type,
    Time,
    ListLength,
    Element,
    Append,
    Remove,
}

impl Builtin {
    pub const ALL: [Builtin; 14] = [
        Builtin::Random,
        Builtin::Length,
        Builtin::Sqrt,
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Round,
        Builtin::Str,
        Builtin::Num,
        Builtin::Type,
        Builtin::Time,
        Builtin::ListLength,
        Builtin::Element,
        Builtin::Append,
        Builtin::Remove,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Random => "случайно",
            Builtin::Length => "длина",
            Builtin::Sqrt => "корень",
            Builtin::Sin => "синус",
            Builtin::Cos => "косинус",
            Builtin::Round => "округлить",
            Builtin::Str => "строка",
            Builtin::Num => "число",
            Builtin::Type => "тип",
            Builtin::Time => "время",
            Builtin::ListLength => "список_длина",
            Builtin::Element => "элемент",
            Builtin::Append => "добавить",
            Builtin::Remove => "удалить",
        }
    }

    pub fn lookup(name: &str) -> Option<Builtin> {
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Accepted argument counts, inclusive
    fn arity(self) -> (usize, usize) {
        match self {
            Builtin::Random => (0, 2),
            Builtin::Round => (1, 2),
            Builtin::Time => (0, 0),
            Builtin::Element | Builtin::Append | Builtin::Remove => (2, 2),
            _ => (1, 1),
        }
    }

    fn arity_label(self) -> &'static str {
        match self.arity() {
            (0, 2) => "0-2",
            (1, 2) => "1-2",
            (0, 0) => "0",
            (2, 2) => "2",
            _ => "1",
        }
    }
}

/// Round half to even at `digits` decimal places
fn round_half_even(x: f64, digits: i64) -> f64 {
    let digits = digits.clamp(-308, 308) as i32;
    let factor = 10f64.powi(digits);
    let scaled = x * factor;
    if !scaled.is_finite() {
        return x;
    }
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    rounded / factor
}

impl Interpreter {
    /// Call the built-in named in `text` (`[target =] name(args)`).
    ///
    /// Returns `None` when the name is not a built-in or the call failed;
    /// failures are reported on the debug channel.
    pub(crate) fn call_builtin(&mut self, text: &str) -> Option<Value> {
        let call = match text.split_once('=') {
            Some((_, rhs)) => rhs.trim(),
            None => text.trim(),
        };
        let (name, args) = lexer::enclosed(call, '(', ')')?;
        let Some(builtin) = Builtin::lookup(name) else {
            tracing::trace!(name, "not a built-in");
            return None;
        };
        let args: Vec<&str> = if args.is_empty() {
            Vec::new()
        } else {
            args.split(',').map(str::trim).collect()
        };

        match self.apply_builtin(builtin, &args) {
            Ok(value) => Some(value),
            Err(e) => {
                let message = format!("Ошибка вызова функции: {}", e);
                tracing::debug!(%message, "built-in failed");
                self.callbacks.debug(DebugEvent::Error(message));
                None
            }
        }
    }

    /// Resolve a list argument: its text as a list name first, otherwise a
    /// string value that names a list
    fn list_argument(&mut self, raw: &str) -> Option<String> {
        if self.lists.contains_key(raw) {
            return Some(raw.to_string());
        }
        match self.evaluate(raw) {
            Value::Str(name) if self.lists.contains_key(&name) => Some(name),
            _ => None,
        }
    }

    fn apply_builtin(&mut self, builtin: Builtin, args: &[&str]) -> Result<Value, EvalError> {
        let (min, max) = builtin.arity();
        if args.len() < min || args.len() > max {
            return Err(EvalError::Arity {
                name: builtin.name(),
                expected: builtin.arity_label(),
                got: args.len(),
            });
        }

        match builtin {
            Builtin::Length => {
                if let Some(items) = self.lists.get(args[0]) {
                    return Ok(Value::Integer(items.len() as i64));
                }
            }
            Builtin::ListLength => {
                let len = self
                    .list_argument(args[0])
                    .and_then(|list| self.lists.get(&list).map(Vec::len));
                return Ok(Value::Integer(len.unwrap_or(0) as i64));
            }
            Builtin::Element => {
                let Some(list) = self.list_argument(args[0]) else {
                    return Ok(Value::Integer(0));
                };
                let index = self.evaluate(args[1]);
                return self.list_element(&list, &index);
            }
            Builtin::Append => {
                let list = self.list_argument(args[0]);
                let value = self.evaluate(args[1]);
                let len = list.and_then(|list| self.list_push(&list, value));
                return Ok(Value::Integer(len.unwrap_or(0) as i64));
            }
            Builtin::Remove => {
                let Some(list) = self.list_argument(args[0]) else {
                    return Ok(Value::Integer(0));
                };
                let index = self.evaluate(args[1]);
                return Ok(self.list_remove(&list, &index)?.unwrap_or_default());
            }
            _ => {}
        }

        let values: Vec<Value> = args.iter().map(|arg| self.evaluate(arg)).collect();
        scalar_builtin(builtin, &values)
    }
}

/// Built-ins that only look at evaluated argument values
fn scalar_builtin(builtin: Builtin, args: &[Value]) -> Result<Value, EvalError> {
    Ok(match builtin {
        Builtin::Random => {
            let lo = args.first().map(Value::to_i64).transpose()?.unwrap_or(0);
            let hi = args.get(1).map(Value::to_i64).transpose()?.unwrap_or(1);
            if lo > hi {
                return Err(EvalError::Domain(format!("пустой диапазон {}..{}", lo, hi)));
            }
            Value::Integer(rand::thread_rng().gen_range(lo..=hi))
        }
        Builtin::Length => match &args[0] {
            Value::Str(s) => Value::Integer(s.chars().count() as i64),
            _ => Value::Integer(0),
        },
        Builtin::Sqrt => match args[0].to_f64() {
            Ok(x) if x >= 0.0 => Value::Float(x.sqrt()),
            _ => Value::Integer(0),
        },
        Builtin::Sin => Value::Float(args[0].to_f64()?.sin()),
        Builtin::Cos => Value::Float(args[0].to_f64()?.cos()),
        Builtin::Round => {
            let digits = args.get(1).map(Value::to_i64).transpose()?.unwrap_or(0);
            Value::Float(round_half_even(args[0].to_f64()?, digits))
        }
        Builtin::Str => Value::Str(args[0].to_string()),
        Builtin::Num => {
            let text = args[0].to_string();
            let parsed = if text.contains('.') {
                text.trim().parse::<f64>().ok().map(Value::Float)
            } else {
                args[0].to_i64().ok().map(Value::Integer)
            };
            parsed.unwrap_or_default()
        }
        Builtin::Type => Value::from(match &args[0] {
            Value::Integer(_) | Value::Bool(_) => "целое",
            Value::Float(_) => "дробное",
            Value::Str(_) => "строка",
        }),
        Builtin::Time => Value::Integer(chrono::Utc::now().timestamp_millis()),
        // resolved in apply_builtin before arguments are evaluated
        Builtin::ListLength | Builtin::Element | Builtin::Append | Builtin::Remove => Value::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name() {
        assert_eq!(Builtin::lookup("корень"), Some(Builtin::Sqrt));
        assert_eq!(Builtin::lookup("список_длина"), Some(Builtin::ListLength));
        assert_eq!(Builtin::lookup("печать"), None);
        for b in Builtin::ALL {
            assert_eq!(Builtin::lookup(b.name()), Some(b));
        }
    }

    #[test]
    fn rounding_is_half_even() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(-2.5, 0), -2.0);
        assert_eq!(round_half_even(2.6, 0), 3.0);
        assert_eq!(round_half_even(1234.0, -2), 1200.0);
    }

    #[test]
    fn scalar_results() {
        assert_eq!(scalar_builtin(Builtin::Sqrt, &[Value::Integer(16)]).unwrap(), Value::Float(4.0));
        assert_eq!(scalar_builtin(Builtin::Sqrt, &[Value::Integer(-1)]).unwrap(), Value::Integer(0));
        assert_eq!(scalar_builtin(Builtin::Sqrt, &[Value::from("abc")]).unwrap(), Value::Integer(0));
        assert_eq!(scalar_builtin(Builtin::Num, &[Value::from("12")]).unwrap(), Value::Integer(12));
        assert!(matches!(
            scalar_builtin(Builtin::Num, &[Value::from("1.5")]).unwrap(),
            Value::Float(x) if x == 1.5
        ));
        assert_eq!(scalar_builtin(Builtin::Num, &[Value::from("abc")]).unwrap(), Value::Integer(0));
        assert_eq!(scalar_builtin(Builtin::Type, &[Value::Bool(true)]).unwrap(), Value::from("целое"));
        assert_eq!(scalar_builtin(Builtin::Length, &[Value::from("привет")]).unwrap(), Value::Integer(6));
    }

    #[test]
    fn random_is_inclusive_and_checks_range() {
        for _ in 0..50 {
            let v = scalar_builtin(Builtin::Random, &[Value::Integer(3), Value::Integer(3)]).unwrap();
            assert_eq!(v, Value::Integer(3));
        }
        assert!(scalar_builtin(Builtin::Random, &[Value::Integer(5), Value::Integer(1)]).is_err());
    }
}
