use super::{EvalError, Flow, Interpreter};
use crate::ast::{Program, Statement};
use crate::graphics::GraphicsCommand;
use crate::host::EventQuery;
use crate::lexer;
use crate::value::Value;

/// Coerce text from the input host: `.` means float, all digits means
/// integer, anything else (or a failed parse) stays a string
pub(crate) fn coerce_input(text: &str) -> Value {
    let parsed = if text.contains('.') {
        text.trim().parse::<f64>().ok().map(Value::Float)
    } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        text.parse::<i64>().ok().map(Value::Integer)
    } else {
        None
    };
    parsed.unwrap_or_else(|| Value::Str(text.to_string()))
}

impl Interpreter {
    /// Perform one classified line
    pub(crate) fn dispatch(
        &mut self,
        program: &Program,
        index: usize,
        statement: Statement<'_>,
    ) -> Result<Flow, EvalError> {
        match statement {
            Statement::Var { name, expr } | Statement::Assign { name, expr } => {
                let value = self.evaluate(expr);
                self.assign(name, value)?;
            }
            Statement::Print(expr) => {
                let value = self.evaluate(expr);
                self.output.push(value.to_string());
            }
            Statement::Input(name) => self.read_input(name)?,
            Statement::If(condition) => return Ok(self.run_if(program, index, condition)),
            Statement::While(condition) => return Ok(self.run_while(program, index, condition)),
            Statement::Function(name) => return Ok(self.skip_function(program, index, name)),
            Statement::List { name, items } => self.declare_list(name, items)?,
            Statement::Append { list, expr } => self.append_to_list(list, expr),
            Statement::Remove { list, index } => self.remove_from_list(list, index),
            Statement::Window(args) => self.draw_window(&args),
            Statement::Rect(args) => self.draw_rect(&args),
            Statement::Circle(args) => self.draw_circle(&args),
            Statement::Line(args) => self.draw_line(&args),
            Statement::Text { text, args } => self.draw_text(text, &args),
            Statement::Delay(expr) => self.delay(expr),
            Statement::Clear(color) => self.clear_screen(color),
            Statement::SetHandler { event, handler } => self.set_handler(event, handler),
            Statement::MouseX => self.query_mouse(EventQuery::MouseX),
            Statement::MouseY => self.query_mouse(EventQuery::MouseY),
            Statement::MousePressed => self.query_mouse(EventQuery::MousePressed),
            Statement::KeyPressed(code) => self.query_key(code),
            Statement::UpdateScreen => self.emit(GraphicsCommand::Update),
            Statement::Stop => return Ok(Flow::Stop),
            Statement::Call { target, call } => {
                if let Some(value) = self.call_builtin(call) {
                    if let Some(name) = target {
                        self.assign(name, value)?;
                    }
                }
            }
            Statement::BlockMarker | Statement::Nop => {}
        }
        Ok(Flow::Next)
    }

    /// Store a variable after checking the name
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        if !lexer::is_identifier(name) {
            return Err(EvalError::InvalidName(name.to_string()));
        }
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    /// `ввести name`: blocks on the input host; without one the value is ""
    fn read_input(&mut self, name: &str) -> Result<(), EvalError> {
        let prompt = format!("Введите значение для '{}': ", name);
        let value = match self.callbacks.input(&prompt) {
            Some(text) => coerce_input(&text),
            None => Value::Str(String::new()),
        };
        self.assign(name, value)
    }
}
