use super::{resolve_block, Flow, Interpreter};
use crate::ast::Program;
use crate::debug::Pause;
use crate::host::DebugEvent;
use crate::parser;

/// Output line appended when a loop hits the iteration cap
pub const LOOP_LIMIT_WARNING: &str =
    "Предупреждение: Превышено максимальное количество итераций цикла";

impl Interpreter {
    /// Execute lines `start..end`, following jumps past resolved blocks
    pub(crate) fn run_range(&mut self, program: &Program, start: usize, end: usize) -> Flow {
        let mut index = start;
        while index < end {
            let line = &program.lines[index];
            if !self.gate(line.number) {
                return Flow::Stop;
            }
            if line.is_blank() {
                index += 1;
                continue;
            }
            match self.step_line(program, index) {
                Flow::Next => index += 1,
                Flow::Jump(terminator) => index = terminator + 1,
                Flow::Stop => return Flow::Stop,
            }
        }
        Flow::Next
    }

    /// Per-line debug gate. Blocks while paused; false once a stop is requested.
    fn gate(&mut self, line: usize) -> bool {
        if self.debugger.is_stop_requested() {
            return false;
        }
        if let Some(pause) = self.debugger.check(line) {
            tracing::debug!(line, ?pause, "execution paused");
            if self.callbacks.has_debug() {
                self.callbacks.debug(DebugEvent::VariablesUpdated(self.variables.clone()));
            }
            self.callbacks.debug(match pause {
                Pause::Breakpoint => DebugEvent::BreakpointHit(line),
                Pause::Step => DebugEvent::StepHit(line),
            });
            self.debugger.wait_while_paused();
        }
        !self.debugger.is_stop_requested()
    }

    /// Dispatch one non-blank line, turning a failure into an output line
    fn step_line(&mut self, program: &Program, index: usize) -> Flow {
        let line = &program.lines[index];
        if self.callbacks.has_debug() {
            self.callbacks.debug(DebugEvent::LineExecuted(line.number));
            self.callbacks.debug(DebugEvent::VariablesUpdated(self.variables.clone()));
        }

        let statement = parser::parse_line(&line.code);
        tracing::trace!(line = line.number, kind = statement.kind(), "dispatch");

        match self.dispatch(program, index, statement) {
            Ok(flow) => flow,
            Err(e) => {
                let message = format!("Ошибка в строке {}: {}", line.number, e);
                self.output.push(message.clone());
                self.callbacks.debug(DebugEvent::Error(message));
                Flow::Next
            }
        }
    }

    pub(crate) fn push_frame(&mut self, frame: String) {
        self.call_stack.push(frame);
        self.sync_call_stack();
    }

    pub(crate) fn pop_frame(&mut self) {
        self.call_stack.pop();
        self.sync_call_stack();
    }

    fn sync_call_stack(&mut self) {
        self.debugger.set_depth(self.call_stack.len());
        if self.callbacks.has_debug() {
            self.callbacks.debug(DebugEvent::CallStackUpdated(self.call_stack.clone()));
        }
    }

    /// `если cond то ... [иначе ...] конец`
    pub(crate) fn run_if(&mut self, program: &Program, index: usize, condition: Option<&str>) -> Flow {
        // A header without `то` is inert
        let Some(condition) = condition else {
            return Flow::Next;
        };
        let taken = self.evaluate(condition).is_truthy();
        let block = resolve_block(program, index);

        let flow = if taken {
            self.run_range(program, index + 1, block.else_at.unwrap_or(block.end))
        } else if let Some(else_at) = block.else_at {
            self.run_range(program, else_at + 1, block.end)
        } else {
            Flow::Next
        };

        match flow {
            Flow::Stop => Flow::Stop,
            _ => Flow::Jump(block.end),
        }
    }

    /// `цикл cond ... конец`, capped at the configured iteration count
    pub(crate) fn run_while(&mut self, program: &Program, index: usize, condition: &str) -> Flow {
        let block = resolve_block(program, index);
        let number = program.lines[index].number;
        let cap = self.config.max_loop_iterations;
        let mut iterations = 0usize;

        while self.evaluate(condition).is_truthy() && iterations < cap {
            self.push_frame(format!("цикл (строка {}, итерация {})", number, iterations + 1));
            let flow = self.run_range(program, index + 1, block.end);
            self.pop_frame();
            iterations += 1;
            if flow == Flow::Stop {
                return Flow::Stop;
            }
        }

        if iterations >= cap {
            tracing::warn!(line = number, cap, "loop iteration cap reached");
            self.output.push(LOOP_LIMIT_WARNING.to_string());
        }
        Flow::Jump(block.end)
    }

    /// `функция name(...) ... конец`: shown on the call stack, body skipped
    pub(crate) fn skip_function(&mut self, program: &Program, index: usize, name: &str) -> Flow {
        let number = program.lines[index].number;
        self.push_frame(format!("функция {} (строка {})", name, number));
        let block = resolve_block(program, index);
        self.pop_frame();
        Flow::Jump(block.end)
    }
}
