//! Host callbacks
//!
//! The interpreter talks to the outside world only through four optional
//! callbacks. Every one of them may be absent: graphics are still logged,
//! `ввести` yields an empty string, event queries leave the cached values
//! untouched, and debug notifications are skipped entirely.

use crate::graphics::GraphicsCommand;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// Synchronous query sent to the event host
#[derive(Debug, Clone, PartialEq)]
pub enum EventQuery {
    MouseX,
    MouseY,
    MousePressed,
    KeyPressed(String),
    /// Fire-and-forget registration; the answer is ignored
    SetHandler { event: String, handler: String },
}

impl EventQuery {
    pub fn kind(&self) -> &'static str {
        match self {
            EventQuery::MouseX => "get_mouse_x",
            EventQuery::MouseY => "get_mouse_y",
            EventQuery::MousePressed => "get_mouse_pressed",
            EventQuery::KeyPressed(_) => "get_key_pressed",
            EventQuery::SetHandler { .. } => "set_handler",
        }
    }

    /// Payload in the `event:handler` / key-code form hosts expect
    pub fn data(&self) -> String {
        match self {
            EventQuery::KeyPressed(code) => code.clone(),
            EventQuery::SetHandler { event, handler } => format!("{}:{}", event, handler),
            _ => String::new(),
        }
    }
}

/// Notification sent to the debug host
#[derive(Debug, Clone, PartialEq)]
pub enum DebugEvent {
    LineExecuted(usize),
    VariablesUpdated(HashMap<String, Value>),
    CallStackUpdated(Vec<String>),
    BreakpointHit(usize),
    StepHit(usize),
    ProgramStopped,
    Error(String),
}

impl DebugEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            DebugEvent::LineExecuted(_) => "line_executed",
            DebugEvent::VariablesUpdated(_) => "variables_updated",
            DebugEvent::CallStackUpdated(_) => "call_stack_updated",
            DebugEvent::BreakpointHit(_) => "breakpoint_hit",
            DebugEvent::StepHit(_) => "step_hit",
            DebugEvent::ProgramStopped => "program_stopped",
            DebugEvent::Error(_) => "error",
        }
    }
}

pub type GraphicsFn = Box<dyn FnMut(&[GraphicsCommand]) + Send>;
pub type InputFn = Box<dyn FnMut(&str) -> String + Send>;
pub type EventFn = Box<dyn FnMut(EventQuery) -> Value + Send>;
pub type DebugFn = Box<dyn FnMut(DebugEvent) + Send>;

/// The set of host callbacks for one run
#[derive(Default)]
pub struct Callbacks {
    pub(crate) graphics: Option<GraphicsFn>,
    pub(crate) input: Option<InputFn>,
    pub(crate) event: Option<EventFn>,
    pub(crate) debug: Option<DebugFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("graphics", &self.graphics.is_some())
            .field("input", &self.input.is_some())
            .field("event", &self.event.is_some())
            .field("debug", &self.debug.is_some())
            .finish()
    }
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives each flushed batch of graphics commands
    pub fn on_graphics(mut self, f: impl FnMut(&[GraphicsCommand]) + Send + 'static) -> Self {
        self.graphics = Some(Box::new(f));
        self
    }

    /// Answers `ввести` with a line of text; receives the prompt
    pub fn on_input(mut self, f: impl FnMut(&str) -> String + Send + 'static) -> Self {
        self.input = Some(Box::new(f));
        self
    }

    /// Answers mouse/keyboard queries and receives handler registrations
    pub fn on_event(mut self, f: impl FnMut(EventQuery) -> Value + Send + 'static) -> Self {
        self.event = Some(Box::new(f));
        self
    }

    /// Receives debugger notifications
    pub fn on_debug(mut self, f: impl FnMut(DebugEvent) + Send + 'static) -> Self {
        self.debug = Some(Box::new(f));
        self
    }

    pub fn has_debug(&self) -> bool {
        self.debug.is_some()
    }

    pub(crate) fn graphics(&mut self, commands: &[GraphicsCommand]) {
        if let Some(f) = self.graphics.as_mut() {
            f(commands);
        }
    }

    pub(crate) fn input(&mut self, prompt: &str) -> Option<String> {
        self.input.as_mut().map(|f| f(prompt))
    }

    pub(crate) fn event(&mut self, query: EventQuery) -> Option<Value> {
        self.event.as_mut().map(|f| f(query))
    }

    pub(crate) fn debug(&mut self, event: DebugEvent) {
        if let Some(f) = self.debug.as_mut() {
            f(event);
        }
    }
}
