//! Interactive debugger console
//!
//! The console lives inside the debug callback, so it runs on the thread
//! executing the program. When a pause is reported it reads commands until
//! one of them resumes or stops the run; by the time the callback returns
//! the pause is already lifted.

use ri::{display, DebugEvent, Debugger, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::HashMap;
use std::sync::Arc;

const PROMPT: &str = "(ri) ";
const COMMANDS: &str = "(c)ontinue, (n)ext, (s)tep, (o)ut, (v)ars, stack, (b)reak N, (d)elete N, (q)uit";

/// Whether a console command handed control back to the program
#[derive(Debug, PartialEq)]
enum Outcome {
    Resume,
    Stay,
}

pub(crate) struct Console {
    debugger: Arc<Debugger>,
    lines: Vec<String>,
    variables: HashMap<String, Value>,
    call_stack: Vec<String>,
}

impl Console {
    pub(crate) fn new(debugger: Arc<Debugger>, source: &str) -> Self {
        Console {
            debugger,
            lines: source.lines().map(str::to_string).collect(),
            variables: HashMap::new(),
            call_stack: Vec::new(),
        }
    }

    /// React to one debugger notification
    pub(crate) fn handle(&mut self, event: DebugEvent) {
        match event {
            DebugEvent::LineExecuted(_) => {}
            DebugEvent::VariablesUpdated(vars) => self.variables = vars,
            DebugEvent::CallStackUpdated(frames) => self.call_stack = frames,
            DebugEvent::BreakpointHit(line) => self.pause("точка останова", line),
            DebugEvent::StepHit(line) => self.pause("шаг", line),
            DebugEvent::Error(message) => eprintln!("\x1b[31m{}\x1b[0m", message),
            DebugEvent::ProgramStopped => eprintln!("\x1b[33mПрограмма остановлена\x1b[0m"),
        }
    }

    fn pause(&mut self, reason: &str, line: usize) {
        let source = line.checked_sub(1).and_then(|i| self.lines.get(i));
        eprintln!("{}", display::format_pause(reason, line, source.map(String::as_str)));
        eprintln!("\x1b[90m{}\x1b[0m", COMMANDS);

        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::warn!(error = %e, "line editor unavailable, continuing");
                self.debugger.continue_execution();
                return;
            }
        };

        loop {
            match editor.readline(PROMPT) {
                Ok(input) => {
                    let _ = editor.add_history_entry(input.as_str());
                    if self.command(input.trim()) == Outcome::Resume {
                        return;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.debugger.request_stop();
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "console input failed, continuing");
                    self.debugger.continue_execution();
                    return;
                }
            }
        }
    }

    fn command(&mut self, input: &str) -> Outcome {
        let (cmd, arg) = match input.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd.to_lowercase().as_str() {
            "c" | "continue" => self.debugger.continue_execution(),
            // Enter repeats the most common action
            "n" | "next" | "" => self.debugger.step_over(),
            "s" | "step" => self.debugger.step_into(),
            "o" | "out" => self.debugger.step_out(),
            "q" | "quit" => self.debugger.request_stop(),
            "v" | "vars" => {
                eprintln!("{}", display::format_variables(&self.variables));
                return Outcome::Stay;
            }
            "bt" | "stack" => {
                eprintln!("{}", display::format_call_stack(&self.call_stack));
                return Outcome::Stay;
            }
            "b" | "break" => {
                self.set_breakpoint(arg);
                return Outcome::Stay;
            }
            "d" | "delete" => {
                self.delete_breakpoint(arg);
                return Outcome::Stay;
            }
            other => {
                eprintln!("\x1b[31mНеизвестная команда: {}\x1b[0m", other);
                eprintln!("\x1b[90m{}\x1b[0m", COMMANDS);
                return Outcome::Stay;
            }
        }
        Outcome::Resume
    }

    fn set_breakpoint(&self, arg: &str) {
        if arg.is_empty() {
            let points = self.debugger.breakpoints();
            if points.is_empty() {
                eprintln!("\x1b[33mТочек останова нет\x1b[0m");
            } else {
                eprintln!("\x1b[33mТочки останова:\x1b[0m");
                for line in points {
                    eprintln!("  - {}", line);
                }
            }
            return;
        }
        match arg.parse::<usize>() {
            Ok(line) => {
                self.debugger.add_breakpoint(line);
                eprintln!("\x1b[33mТочка останова на строке {}\x1b[0m", line);
            }
            Err(_) => eprintln!("\x1b[31mНужен номер строки: {}\x1b[0m", arg),
        }
    }

    fn delete_breakpoint(&self, arg: &str) {
        match arg.parse::<usize>() {
            Ok(line) if self.debugger.remove_breakpoint(line) => {
                eprintln!("\x1b[33mТочка останова на строке {} убрана\x1b[0m", line);
            }
            Ok(line) => eprintln!("\x1b[31mНа строке {} нет точки останова\x1b[0m", line),
            Err(_) => eprintln!("\x1b[31mНужен номер строки: {}\x1b[0m", arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ri::StepMode;

    fn console() -> Console {
        let debugger = Arc::new(Debugger::new());
        debugger.set_enabled(true);
        Console::new(debugger, "перем x = 1\nвывести x")
    }

    #[test]
    fn stepping_commands_resume() {
        let mut c = console();
        assert_eq!(c.command("s"), Outcome::Resume);
        assert_eq!(c.debugger.step_mode(), StepMode::StepInto);
        assert_eq!(c.command("next"), Outcome::Resume);
        assert_eq!(c.debugger.step_mode(), StepMode::StepOver);
        assert_eq!(c.command("c"), Outcome::Resume);
        assert_eq!(c.debugger.step_mode(), StepMode::Run);
    }

    #[test]
    fn inspection_commands_stay() {
        let mut c = console();
        c.handle(DebugEvent::VariablesUpdated(HashMap::from([(
            "x".to_string(),
            Value::Integer(1),
        )])));
        c.handle(DebugEvent::CallStackUpdated(vec!["цикл (строка 2, итерация 1)".into()]));
        assert_eq!(c.command("vars"), Outcome::Stay);
        assert_eq!(c.command("stack"), Outcome::Stay);
        assert_eq!(c.command("что"), Outcome::Stay);
        assert_eq!(c.variables.len(), 1);
        assert_eq!(c.call_stack.len(), 1);
    }

    #[test]
    fn breakpoint_commands() {
        let mut c = console();
        assert_eq!(c.command("break 2"), Outcome::Stay);
        assert_eq!(c.debugger.breakpoints(), vec![2]);
        c.command("delete 2");
        assert!(c.debugger.breakpoints().is_empty());
        c.command("b x");
        assert!(c.debugger.breakpoints().is_empty());
    }

    #[test]
    fn quit_requests_stop() {
        let mut c = console();
        assert_eq!(c.command("q"), Outcome::Resume);
        assert!(c.debugger.is_stop_requested());
    }
}
