use super::Interpreter;
use crate::host::EventQuery;
use crate::value::Value;

pub const MOUSE_X: &str = "мышь_х";
pub const MOUSE_Y: &str = "мышь_у";
pub const MOUSE_PRESSED: &str = "мышь_нажата";
/// Prefix of the variable a key query stores into (`клавиша_<code>`)
pub const KEY_PREFIX: &str = "клавиша_";

/// Last answers to mouse queries, readable as bare names in expressions
#[derive(Debug, Clone)]
pub(crate) struct MouseState {
    pub(crate) x: Value,
    pub(crate) y: Value,
    pub(crate) pressed: Value,
}

impl Default for MouseState {
    fn default() -> Self {
        MouseState {
            x: Value::Integer(0),
            y: Value::Integer(0),
            pressed: Value::Bool(false),
        }
    }
}

impl MouseState {
    pub(crate) fn lookup(&self, name: &str) -> Option<Value> {
        match name {
            MOUSE_X => Some(self.x.clone()),
            MOUSE_Y => Some(self.y.clone()),
            MOUSE_PRESSED => Some(self.pressed.clone()),
            _ => None,
        }
    }
}

impl Interpreter {
    /// `мышь_х()` / `мышь_у()` / `мышь_нажата()`: ask the host, cache and store
    pub(crate) fn query_mouse(&mut self, query: EventQuery) {
        let (slot, name) = match query {
            EventQuery::MouseX => (&mut self.mouse.x, MOUSE_X),
            EventQuery::MouseY => (&mut self.mouse.y, MOUSE_Y),
            EventQuery::MousePressed => (&mut self.mouse.pressed, MOUSE_PRESSED),
            _ => return,
        };
        let Some(value) = self.callbacks.event(query) else {
            return;
        };
        *slot = value.clone();
        self.variables.insert(name.to_string(), value);
    }

    /// `клавиша_нажата("code")`: store the answer in `клавиша_<code>`
    pub(crate) fn query_key(&mut self, code: String) {
        let name = format!("{}{}", KEY_PREFIX, code);
        if let Some(value) = self.callbacks.event(EventQuery::KeyPressed(code)) {
            self.variables.insert(name, value);
        }
    }

    /// `установить_обработчик event handler`: forwarded, no local state
    pub(crate) fn set_handler(&mut self, event: &str, handler: &str) {
        tracing::debug!(event, handler, "handler registered");
        self.callbacks.event(EventQuery::SetHandler {
            event: event.to_string(),
            handler: handler.to_string(),
        });
    }
}
