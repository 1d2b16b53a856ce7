//! Common test utilities for Ri integration tests

#![allow(dead_code)]

pub use ri::{Callbacks, DebugEvent, EventQuery, GraphicsCommand, Interpreter, Value};
use std::sync::{Arc, Mutex};

/// Run a program with no hosts attached and return its output
pub fn run_source(source: &str) -> String {
    ri::run(source, Callbacks::new())
}

/// Everything the hosts saw during a run
#[derive(Default)]
pub struct Recorded {
    pub graphics: Vec<Vec<GraphicsCommand>>,
    pub queries: Vec<EventQuery>,
    pub debug: Vec<DebugEvent>,
}

/// Callbacks that record every graphics batch, event query and debug
/// event; event queries are answered by `answer`.
pub fn recording(
    answer: impl Fn(&EventQuery) -> Value + Send + 'static,
) -> (Callbacks, Arc<Mutex<Recorded>>) {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let (g, e, d) = (Arc::clone(&recorded), Arc::clone(&recorded), Arc::clone(&recorded));
    let callbacks = Callbacks::new()
        .on_graphics(move |batch| g.lock().unwrap().graphics.push(batch.to_vec()))
        .on_event(move |query| {
            let value = answer(&query);
            e.lock().unwrap().queries.push(query);
            value
        })
        .on_debug(move |event| d.lock().unwrap().debug.push(event));
    (callbacks, recorded)
}

/// Kinds of the recorded debug events, in order
pub fn debug_kinds(recorded: &Arc<Mutex<Recorded>>) -> Vec<&'static str> {
    recorded.lock().unwrap().debug.iter().map(DebugEvent::kind).collect()
}
