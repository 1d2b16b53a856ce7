//! The expression ladder
//!
//! Expressions are reduced textually by a fixed sequence of rules; the
//! first rule that applies decides the result. Operators are not ranked by
//! precedence: `2 * 3 + 1` splits on `+` first and `3 * 4` in `2 + 3 * 4`
//! is read as one simple operand (which is `0`).

use super::{Builtin, EvalError, Interpreter};
use crate::host::DebugEvent;
use crate::lexer;
use crate::value::{CompareOp, Value, FALSE_LITERAL, TRUE_LITERAL};

const NOT_INFIX: &str = " не ";
const NOT_PREFIX: &str = "не ";
const AND_INFIX: &str = " и ";
const OR_INFIX: &str = " или ";

impl Interpreter {
    /// Reduce an expression to a value. Never fails: errors are reported on
    /// the debug channel and yield `0`.
    pub fn evaluate(&mut self, expr: &str) -> Value {
        let expr = expr.trim();
        match self.eval_ladder(expr) {
            Ok(value) => value,
            Err(e) => {
                let message = format!("Ошибка вычисления '{}': {}", expr, e);
                tracing::debug!(%message, "expression failed");
                self.callbacks.debug(DebugEvent::Error(message));
                Value::default()
            }
        }
    }

    fn eval_ladder(&mut self, expr: &str) -> Result<Value, EvalError> {
        if expr.contains('(') && expr.contains(')') {
            let head = expr.split('(').next().unwrap_or_default().trim();
            if Builtin::lookup(head).is_some() {
                return Ok(self.call_builtin(expr).unwrap_or_default());
            }
        }

        if expr.contains('[') && expr.contains(']') {
            if let Some((name, index)) = lexer::enclosed(expr, '[', ']') {
                if self.lists.contains_key(name) {
                    let index = self.evaluate(index);
                    return self.list_element(name, &index);
                }
            }
        }

        let spliced = self.splice_parens(expr);
        let expr = spliced.as_str();

        if expr.contains(NOT_INFIX) {
            if let [_, operand] = expr.split(NOT_INFIX).collect::<Vec<_>>().as_slice() {
                return Ok(Value::Bool(!self.evaluate(operand).is_truthy()));
            }
        } else if let Some(operand) = expr.strip_prefix(NOT_PREFIX) {
            return Ok(Value::Bool(!self.evaluate(operand).is_truthy()));
        }

        if expr.contains(AND_INFIX) {
            for part in expr.split(AND_INFIX) {
                if !self.evaluate(part).is_truthy() {
                    return Ok(Value::Bool(false));
                }
            }
            return Ok(Value::Bool(true));
        }

        if expr.contains(OR_INFIX) {
            for part in expr.split(OR_INFIX) {
                if self.evaluate(part).is_truthy() {
                    return Ok(Value::Bool(true));
                }
            }
            return Ok(Value::Bool(false));
        }

        for op in CompareOp::SCAN_ORDER {
            if !expr.contains(op.symbol()) {
                continue;
            }
            if let [left, right] = expr.split(op.symbol()).collect::<Vec<_>>().as_slice() {
                let left = self.simple_value(left);
                let right = self.simple_value(right);
                return left.compare(op, &right).map(Value::Bool);
            }
        }

        if expr.contains('+') {
            let mut sum = Value::Integer(0);
            for part in expr.split('+') {
                sum = sum.add(&self.simple_value(part))?;
            }
            return Ok(sum);
        }

        if expr.matches('-').count() == 1 && !expr.starts_with('-') {
            if let Some((left, right)) = expr.split_once('-') {
                return self.simple_value(left).sub(&self.simple_value(right));
            }
        }

        if expr.contains('*') {
            let mut product = Value::Integer(1);
            for part in expr.split('*') {
                product = product.mul(&self.simple_value(part))?;
            }
            return Ok(product);
        }

        if expr.contains('/') {
            if let [left, right] = expr.split('/').collect::<Vec<_>>().as_slice() {
                let denominator = self.simple_value(right);
                if denominator.is_zero() {
                    return Ok(Value::Integer(0));
                }
                return self.simple_value(left).div(&denominator);
            }
        }

        if expr.contains('^') {
            if let [base, exponent] = expr.split('^').collect::<Vec<_>>().as_slice() {
                return self.simple_value(base).pow(&self.simple_value(exponent));
            }
        }

        Ok(self.simple_value(expr))
    }

    /// Replace parenthesised groups with their values, innermost last `(`
    /// first, until none are left.
    fn splice_parens(&mut self, expr: &str) -> String {
        let mut text = expr.to_string();
        // spliced values may themselves contain parentheses
        let mut budget = text.matches('(').count();

        while budget > 0 && text.contains('(') && text.contains(')') {
            let Some(start) = text.rfind('(') else { break };
            let Some(offset) = text[start..].find(')') else { break };
            let end = start + offset;
            let value = self.evaluate(&text[start + 1..end]);
            text = format!("{}{}{}", &text[..start], value, &text[end + 1..]);
            budget -= 1;
        }
        text
    }

    /// Resolve a literal, variable, list descriptor or reserved name without
    /// going through the operator ladder. Unknown text is `0`.
    pub(crate) fn simple_value(&self, text: &str) -> Value {
        let text = text.trim();

        for quote in ['"', '\''] {
            if text.starts_with(quote) && text.ends_with(quote) {
                let inner = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
                return Value::Str(inner.to_string());
            }
        }
        if text.starts_with('[') && text.ends_with(']') {
            return Value::Str(text.to_string());
        }

        if text.contains('.') {
            if let Ok(x) = text.parse::<f64>() {
                return Value::Float(x);
            }
        } else if let Ok(i) = text.parse::<i64>() {
            return Value::Integer(i);
        }

        if let Some(value) = self.variables.get(text) {
            return value.clone();
        }
        if let Some(items) = self.lists.get(text) {
            return Value::Str(format!("список[{} элементов]", items.len()));
        }

        let lower = text.to_lowercase();
        if lower == TRUE_LITERAL {
            return Value::Bool(true);
        }
        if lower == FALSE_LITERAL {
            return Value::Bool(false);
        }

        self.mouse.lookup(text).unwrap_or_default()
    }
}
