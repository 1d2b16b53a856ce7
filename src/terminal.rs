use ri::{Callbacks, Debugger, EventQuery, GraphicsCommand, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Host callbacks for running in a terminal.
///
/// Input is read with rustyline; there is no window, so mouse and key
/// queries answer `0`/`ложь`. With `graphics` set, every flushed command
/// is printed to stderr as a JSON line.
pub(crate) fn callbacks(debugger: Arc<Debugger>, graphics: bool) -> Callbacks {
    let mut callbacks = Callbacks::new()
        .on_input(move |prompt| read_line(&debugger, prompt))
        .on_event(answer_event);
    if graphics {
        callbacks = callbacks.on_graphics(print_graphics);
    }
    callbacks
}

/// Read one line for `ввести`; Ctrl+C stops the program
fn read_line(debugger: &Debugger, prompt: &str) -> String {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::warn!(error = %e, "line editor unavailable");
            return String::new();
        }
    };
    match editor.readline(prompt) {
        Ok(line) => line,
        Err(ReadlineError::Interrupted) => {
            debugger.request_stop();
            String::new()
        }
        Err(ReadlineError::Eof) => String::new(),
        Err(e) => {
            tracing::warn!(error = %e, "input failed");
            String::new()
        }
    }
}

pub(crate) fn answer_event(query: EventQuery) -> Value {
    match query {
        EventQuery::MouseX | EventQuery::MouseY => Value::Integer(0),
        EventQuery::MousePressed | EventQuery::KeyPressed(_) => Value::Bool(false),
        EventQuery::SetHandler { event, handler } => {
            tracing::debug!(%event, %handler, "handler registered");
            Value::Integer(0)
        }
    }
}

fn print_graphics(commands: &[GraphicsCommand]) {
    for command in commands {
        eprintln!("{}", command.to_json());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_have_neutral_answers() {
        assert_eq!(answer_event(EventQuery::MouseX), Value::Integer(0));
        assert_eq!(answer_event(EventQuery::KeyPressed("a".into())), Value::Bool(false));
        let registration = EventQuery::SetHandler {
            event: "click".into(),
            handler: "на_клик".into(),
        };
        assert_eq!(answer_event(registration), Value::Integer(0));
    }
}
