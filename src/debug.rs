//! Debug controller
//!
//! Shared between the thread running a program and a controller thread
//! (an IDE, the terminal console, a test). The engine calls [`Debugger::check`]
//! before every line; when that reports a pause it notifies its host and
//! blocks in [`Debugger::wait_while_paused`] until the controller continues,
//! steps, disables debugging, or requests a stop.
//!
//! Breakpoints and step mode outlive a single run; the pause flag, call
//! depth and stop request are reset at the start of each run.

use parking_lot::{Condvar, Mutex};
use std::collections::BTreeSet;

/// Stepping granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    #[default]
    Run,
    StepOver,
    StepInto,
    StepOut,
}

impl StepMode {
    /// Whether a line at call depth `depth` should pause, given the depth
    /// captured when stepping was requested.
    pub fn should_stop(self, depth: usize, step_depth: usize) -> bool {
        match self {
            StepMode::Run => false,
            StepMode::StepInto => true,
            StepMode::StepOver => depth <= step_depth,
            StepMode::StepOut => depth < step_depth,
        }
    }
}

/// Why the engine paused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Breakpoint,
    Step,
}

#[derive(Debug, Default)]
struct DebugState {
    enabled: bool,
    paused: bool,
    mode: StepMode,
    step_depth: usize,
    depth: usize,
    breakpoints: BTreeSet<usize>,
    stop_requested: bool,
}

/// Breakpoints, step mode and the pause/resume handshake
#[derive(Debug, Default)]
pub struct Debugger {
    state: Mutex<DebugState>,
    resumed: Condvar,
}

impl Debugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn debug mode on or off. Turning it off releases a paused run.
    pub fn set_enabled(&self, enabled: bool) {
        let mut st = self.state.lock();
        st.enabled = enabled;
        if !enabled {
            st.paused = false;
            st.mode = StepMode::Run;
        }
        drop(st);
        self.resumed.notify_all();
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    pub fn add_breakpoint(&self, line: usize) {
        self.state.lock().breakpoints.insert(line);
    }

    /// Remove a breakpoint, returning whether it was set
    pub fn remove_breakpoint(&self, line: usize) -> bool {
        self.state.lock().breakpoints.remove(&line)
    }

    pub fn clear_breakpoints(&self) {
        self.state.lock().breakpoints.clear();
    }

    /// Breakpoint lines in ascending order
    pub fn breakpoints(&self) -> Vec<usize> {
        self.state.lock().breakpoints.iter().copied().collect()
    }

    /// Ask the engine to stop at the next line it executes
    pub fn pause(&self) {
        let mut st = self.state.lock();
        st.mode = StepMode::StepInto;
        st.step_depth = st.depth;
    }

    /// Resume free running
    pub fn continue_execution(&self) {
        let mut st = self.state.lock();
        st.paused = false;
        st.mode = StepMode::Run;
        drop(st);
        self.resumed.notify_all();
    }

    pub fn step_over(&self) {
        self.resume_stepping(StepMode::StepOver, |depth| depth);
    }

    pub fn step_into(&self) {
        self.resume_stepping(StepMode::StepInto, |depth| depth);
    }

    pub fn step_out(&self) {
        self.resume_stepping(StepMode::StepOut, |depth| depth.saturating_sub(1));
    }

    fn resume_stepping(&self, mode: StepMode, capture: impl FnOnce(usize) -> usize) {
        let mut st = self.state.lock();
        st.paused = false;
        st.mode = mode;
        st.step_depth = capture(st.depth);
        drop(st);
        self.resumed.notify_all();
    }

    /// Stop the running program at its next line and release any pause
    pub fn request_stop(&self) {
        let mut st = self.state.lock();
        st.stop_requested = true;
        st.paused = false;
        drop(st);
        self.resumed.notify_all();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.state.lock().stop_requested
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    pub fn step_mode(&self) -> StepMode {
        self.state.lock().mode
    }

    /// Current call-stack depth of the running program
    pub fn depth(&self) -> usize {
        self.state.lock().depth
    }

    /// Clear per-run state before a program starts
    pub(crate) fn begin_run(&self) {
        let mut st = self.state.lock();
        st.paused = false;
        st.depth = 0;
        st.stop_requested = false;
    }

    pub(crate) fn set_depth(&self, depth: usize) {
        self.state.lock().depth = depth;
    }

    /// Per-line gate. Marks the run paused and reports why, or returns
    /// `None` when the line may run immediately.
    pub(crate) fn check(&self, line: usize) -> Option<Pause> {
        let mut st = self.state.lock();
        if !st.enabled || st.paused || st.stop_requested {
            return None;
        }
        if st.breakpoints.contains(&line) {
            st.paused = true;
            return Some(Pause::Breakpoint);
        }
        if st.mode.should_stop(st.depth, st.step_depth) {
            st.paused = true;
            return Some(Pause::Step);
        }
        None
    }

    /// Block until the pause is lifted, debugging is disabled, or a stop
    /// is requested
    pub(crate) fn wait_while_paused(&self) {
        let mut st = self.state.lock();
        while st.paused && st.enabled && !st.stop_requested {
            self.resumed.wait(&mut st);
        }
    }
}
