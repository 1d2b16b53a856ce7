use super::{EvalError, Interpreter};
use crate::lexer;
use crate::value::Value;

impl Interpreter {
    /// `список name = [a, b, ...]`; anything but a bracketed literal makes an empty list
    pub(crate) fn declare_list(&mut self, name: &str, items: Option<Vec<&str>>) -> Result<(), EvalError> {
        if !lexer::is_identifier(name) {
            return Err(EvalError::InvalidName(name.to_string()));
        }
        let values = items
            .unwrap_or_default()
            .into_iter()
            .map(|item| self.evaluate(item))
            .collect();
        self.lists.insert(name.to_string(), values);
        Ok(())
    }

    /// `добавить name, expr`; unknown lists are ignored
    pub(crate) fn append_to_list(&mut self, name: &str, expr: &str) {
        let value = self.evaluate(expr);
        if self.list_push(name, value).is_none() {
            tracing::debug!(list = name, "append to unknown list ignored");
        }
    }

    /// `удалить name, index`; unknown lists and bad indices are ignored
    pub(crate) fn remove_from_list(&mut self, name: &str, index_expr: &str) {
        let index = self.evaluate(index_expr);
        if let Err(e) = self.list_remove(name, &index) {
            tracing::debug!(list = name, error = %e, "remove ignored");
        }
    }

    /// Push onto a list, returning its new length
    pub(crate) fn list_push(&mut self, name: &str, value: Value) -> Option<usize> {
        let items = self.lists.get_mut(name)?;
        items.push(value);
        Some(items.len())
    }

    /// Remove and return the element at `index`; `None` when out of range
    pub(crate) fn list_remove(&mut self, name: &str, index: &Value) -> Result<Option<Value>, EvalError> {
        let Some(items) = self.lists.get_mut(name) else {
            return Ok(None);
        };
        let index = index.as_index().ok_or(EvalError::Index(index.type_name()))?;
        if index < 0 || index as usize >= items.len() {
            return Ok(None);
        }
        Ok(Some(items.remove(index as usize)))
    }

    /// Element at `index`, or `0` when out of range
    pub(crate) fn list_element(&self, name: &str, index: &Value) -> Result<Value, EvalError> {
        let Some(items) = self.lists.get(name) else {
            return Ok(Value::Integer(0));
        };
        let index = index.as_index().ok_or(EvalError::Index(index.type_name()))?;
        if index < 0 {
            return Ok(Value::Integer(0));
        }
        Ok(items.get(index as usize).cloned().unwrap_or_default())
    }
}
