//! Interpreter tunables
//!
//! Defaults match what scripts have always seen. Hosts that want them
//! adjustable read the `RI_*` environment variables through
//! [`Config::from_env`].

use std::env;

/// Default loop iteration cap
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;
/// Color for shapes drawn without one
pub const DEFAULT_COLOR: &str = "черный";
/// Color for `очистить` without an argument
pub const CLEAR_COLOR: &str = "белый";

/// Runtime settings for one interpreter
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Iterations after which a `цикл` gives up with a warning
    pub max_loop_iterations: usize,
    pub default_color: String,
    pub clear_color: String,
    /// Title for `окно` without one
    pub window_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_loop_iterations: DEFAULT_MAX_ITERATIONS,
            default_color: DEFAULT_COLOR.to_string(),
            clear_color: CLEAR_COLOR.to_string(),
            window_title: format!("Графика Ri от {}", crate::LANGUAGE_CREATOR),
        }
    }
}

impl Config {
    /// Defaults overridden by `RI_MAX_ITERATIONS`, `RI_DEFAULT_COLOR`,
    /// `RI_CLEAR_COLOR` and `RI_WINDOW_TITLE`. Unparseable or empty values
    /// are ignored.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            max_loop_iterations: env::var("RI_MAX_ITERATIONS")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_loop_iterations),
            default_color: non_empty_var("RI_DEFAULT_COLOR").unwrap_or(defaults.default_color),
            clear_color: non_empty_var("RI_CLEAR_COLOR").unwrap_or(defaults.clear_color),
            window_title: non_empty_var("RI_WINDOW_TITLE").unwrap_or(defaults.window_title),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
