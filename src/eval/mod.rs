//! Interpreter for Ri - line-at-a-time execution with host callbacks
//!
//! The interpreter walks the program line by line:
//! - Every line passes the debug gate first (breakpoints, stepping, stop)
//! - Blank and comment-only lines are skipped
//! - The line is classified by the parser and dispatched
//! - `если`/`цикл`/`функция` resolve their block and resume after `конец`
//!
//! # Module layout
//!
//! `Interpreter` is split across files by concern, each adding an `impl`
//! block: the expression ladder (`expr`), built-in functions (`builtins`),
//! block resolution (`blocks`), control flow and the debug gate
//! (`control`), statement dispatch (`statement`), graphics emission
//! (`graphics`), list storage (`lists`) and host event queries (`events`).
//!
//! # Errors
//!
//! Nothing escapes [`Interpreter::execute`]. Expression failures are
//! reported on the debug channel and evaluate to `0`; statement failures
//! become `Ошибка в строке N: ...` lines in the output and execution moves
//! on to the next line.

mod blocks;
mod builtins;
mod control;
mod events;
mod expr;
mod graphics;
mod lists;
mod statement;

pub use blocks::{resolve_block, Block};
pub use builtins::Builtin;

use crate::config::Config;
use crate::debug::{Debugger, StepMode};
use crate::graphics::GraphicsCommand;
use crate::host::{Callbacks, DebugEvent};
use crate::parser;
use crate::value::Value;
use events::MouseState;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("неподдерживаемые типы для {op}: {left} и {right}")]
    TypeError { op: String, left: String, right: String },
    #[error("{0}")]
    Conversion(String),
    #[error("переполнение целого числа")]
    Overflow,
    #[error("деление на ноль")]
    ZeroDivision,
    #[error("математическая ошибка: {0}")]
    Domain(String),
    #[error("{name}() ожидает аргументов: {expected}, получено {got}")]
    Arity { name: &'static str, expected: &'static str, got: usize },
    #[error("индекс списка должен быть целым, получено {0}")]
    Index(&'static str),
    #[error("недопустимое имя переменной '{0}'")]
    InvalidName(String),
}

/// Where execution goes after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    /// Advance to the following line
    Next,
    /// Resume after the line at this index (a block terminator)
    Jump(usize),
    /// `остановить()` or an external stop request
    Stop,
}

/// The interpreter holds the stores for one run plus the shared debugger
pub struct Interpreter {
    pub(crate) config: Config,
    /// Scalar variables
    pub(crate) variables: HashMap<String, Value>,
    /// Named lists, a namespace separate from variables
    pub(crate) lists: HashMap<String, Vec<Value>>,
    /// Display-only frames for loop iterations and skipped functions
    pub(crate) call_stack: Vec<String>,
    pub(crate) output: Vec<String>,
    /// Every graphics command emitted this run
    pub(crate) graphics: Vec<GraphicsCommand>,
    /// Last answers to mouse queries
    pub(crate) mouse: MouseState,
    pub(crate) callbacks: Callbacks,
    pub(crate) debugger: Arc<Debugger>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Interpreter {
            config,
            variables: HashMap::new(),
            lists: HashMap::new(),
            call_stack: Vec::new(),
            output: Vec::new(),
            graphics: Vec::new(),
            mouse: MouseState::default(),
            callbacks: Callbacks::default(),
            debugger: Arc::new(Debugger::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a whole program and return its output lines joined by `\n`.
    ///
    /// Stores, output, graphics log and call stack start empty; breakpoints
    /// and debug mode carry over from earlier runs.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute(&mut self, source: &str, callbacks: Callbacks) -> String {
        self.reset();
        self.callbacks = callbacks;
        self.debugger.begin_run();

        let program = parser::parse(source);
        tracing::debug!(lines = program.len(), "run started");

        let flow = self.run_range(&program, 0, program.len());
        if flow == Flow::Stop {
            tracing::debug!("program stopped");
            self.callbacks.debug(DebugEvent::ProgramStopped);
        }

        // Resend everything once more for hosts that missed a live flush
        if self.graphics.iter().any(GraphicsCommand::is_drawing) {
            self.callbacks.graphics(&self.graphics);
        }

        self.callbacks = Callbacks::default();
        tracing::debug!(output_lines = self.output.len(), "run finished");
        self.output.join("\n")
    }

    fn reset(&mut self) {
        self.variables.clear();
        self.lists.clear();
        self.call_stack.clear();
        self.output.clear();
        self.graphics.clear();
        self.mouse = MouseState::default();
    }

    /// Variables as left by the last run (or the current one, from a callback)
    pub fn variables(&self) -> &HashMap<String, Value> {
        &self.variables
    }

    pub fn lists(&self) -> &HashMap<String, Vec<Value>> {
        &self.lists
    }

    pub fn call_stack(&self) -> &[String] {
        &self.call_stack
    }

    /// Output lines of the last run
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Graphics log of the last run
    pub fn graphics(&self) -> &[GraphicsCommand] {
        &self.graphics
    }

    // === Debugger control methods ===

    /// Handle for a controller on another thread
    pub fn debugger(&self) -> Arc<Debugger> {
        Arc::clone(&self.debugger)
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.debugger.set_enabled(enabled);
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debugger.is_enabled()
    }

    pub fn add_breakpoint(&self, line: usize) {
        self.debugger.add_breakpoint(line);
    }

    pub fn remove_breakpoint(&self, line: usize) -> bool {
        self.debugger.remove_breakpoint(line)
    }

    pub fn clear_breakpoints(&self) {
        self.debugger.clear_breakpoints();
    }

    pub fn breakpoints(&self) -> Vec<usize> {
        self.debugger.breakpoints()
    }

    pub fn pause_execution(&self) {
        self.debugger.pause();
    }

    pub fn continue_execution(&self) {
        self.debugger.continue_execution();
    }

    pub fn step_over(&self) {
        self.debugger.step_over();
    }

    pub fn step_into(&self) {
        self.debugger.step_into();
    }

    pub fn step_out(&self) {
        self.debugger.step_out();
    }

    pub fn step_mode(&self) -> StepMode {
        self.debugger.step_mode()
    }

    pub fn request_stop(&self) {
        self.debugger.request_stop();
    }
}
