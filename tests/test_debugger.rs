//! Integration tests for the debug controller driven from another thread

#[path = "common/mod.rs"]
mod common;
use common::{Callbacks, DebugEvent, Interpreter};
use ri::Debugger;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const NESTED: &str = "\
перем i = 0
цикл i < 2
  перем j = 0
  цикл j < 2
    j = j + 1
  конец
  i = i + 1
конец
вывести i";

/// Start `source` on a worker thread with debugging enabled; `setup`
/// runs against the debugger before the program starts.
fn spawn(
    source: &'static str,
    setup: impl FnOnce(&Debugger),
) -> (Arc<Debugger>, Receiver<DebugEvent>, JoinHandle<String>) {
    let mut interp = Interpreter::new();
    let debugger = interp.debugger();
    debugger.set_enabled(true);
    setup(&debugger);

    let (tx, rx) = mpsc::channel();
    let callbacks = Callbacks::new().on_debug(move |event| {
        let _ = tx.send(event);
    });
    let handle = thread::spawn(move || interp.execute(source, callbacks));
    (debugger, rx, handle)
}

/// Next breakpoint or step pause, skipping other notifications
fn next_pause(rx: &Receiver<DebugEvent>) -> DebugEvent {
    loop {
        let event = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("engine did not pause");
        if matches!(event, DebugEvent::BreakpointHit(_) | DebugEvent::StepHit(_)) {
            return event;
        }
    }
}

#[test]
fn test_breakpoint_blocks_until_continue() {
    let (debugger, rx, handle) = spawn("перем x = 1\nвывести x\nвывести 2", |d| d.add_breakpoint(2));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(2));
    assert!(debugger.is_paused());
    thread::sleep(Duration::from_millis(100));
    assert!(!handle.is_finished());

    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "1\n2");
}

#[test]
fn test_pause_snapshot_precedes_hit() {
    let (debugger, rx, handle) = spawn("перем x = 7\nвывести x", |d| d.add_breakpoint(2));

    let mut snapshot = None;
    loop {
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            DebugEvent::VariablesUpdated(vars) => snapshot = Some(vars),
            DebugEvent::BreakpointHit(2) => break,
            _ => {}
        }
    }
    let vars = snapshot.unwrap();
    assert_eq!(vars["x"], ri::Value::Integer(7));

    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "7");
}

#[test]
fn test_step_into_and_over_in_nested_loops() {
    let (debugger, rx, handle) = spawn(NESTED, |d| d.add_breakpoint(3));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(3));
    debugger.clear_breakpoints();
    debugger.step_into();
    assert_eq!(next_pause(&rx), DebugEvent::StepHit(4));

    // into the inner loop body, one level deeper
    debugger.step_into();
    assert_eq!(next_pause(&rx), DebugEvent::StepHit(5));
    assert_eq!(debugger.depth(), 2);

    // at the same depth step_over still stops on the next iteration
    debugger.step_over();
    assert_eq!(next_pause(&rx), DebugEvent::StepHit(5));

    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "2");
}

#[test]
fn test_step_over_skips_deeper_lines() {
    let (debugger, rx, handle) = spawn(NESTED, |d| d.add_breakpoint(4));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(4));
    debugger.clear_breakpoints();
    debugger.step_over();
    // the inner body runs at depth 2 and is not reported
    assert_eq!(next_pause(&rx), DebugEvent::StepHit(7));

    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "2");
}

#[test]
fn test_step_out_runs_until_shallower() {
    let (debugger, rx, handle) = spawn(NESTED, |d| d.add_breakpoint(5));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(5));
    debugger.clear_breakpoints();
    // captured depth is 2 - 1, so only top-level lines stop
    debugger.step_out();
    assert_eq!(next_pause(&rx), DebugEvent::StepHit(9));

    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "2");
}

#[test]
fn test_pause_before_run_stops_on_first_line() {
    let (debugger, rx, handle) = spawn("вывести 1\nвывести 2", |d| d.pause());

    assert_eq!(next_pause(&rx), DebugEvent::StepHit(1));
    debugger.continue_execution();
    assert_eq!(handle.join().unwrap(), "1\n2");
}

#[test]
fn test_stop_request_releases_pause() {
    let (debugger, rx, handle) = spawn("вывести 1\nвывести 2\nвывести 3", |d| d.add_breakpoint(2));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(2));
    debugger.request_stop();
    assert_eq!(handle.join().unwrap(), "1");
    assert!(rx.try_iter().any(|e| e == DebugEvent::ProgramStopped));
}

#[test]
fn test_disabling_debug_releases_pause() {
    let (debugger, rx, handle) = spawn("вывести 1\nвывести 2", |d| d.add_breakpoint(1));

    assert_eq!(next_pause(&rx), DebugEvent::BreakpointHit(1));
    debugger.set_enabled(false);
    assert_eq!(handle.join().unwrap(), "1\n2");
}

#[test]
fn test_breakpoints_survive_between_runs() {
    let mut interp = Interpreter::new();
    interp.add_breakpoint(5);
    interp.execute("вывести 1", Callbacks::new());
    assert_eq!(interp.breakpoints(), vec![5]);
    assert!(!interp.is_debug_mode());
}
