//! Ri - a teaching language with Russian keywords
//!
//! # Overview
//!
//! Ri programs are plain text, one statement per line. The interpreter
//! evaluates them line by line, collects printed output, streams graphics
//! commands to a host and lets a debugger pause between lines.
//!
//! # Core Concepts
//!
//! ## Statements
//!
//! ```text
//! перем x = 5              // declare a variable
//! вывести x + 1            // print: 6
//! если x > 3 то            // blocks end with конец
//!     вывести "большое"
//! иначе
//!     вывести "маленькое"
//! конец
//! цикл x < 10              // capped at 10000 iterations
//!     x = x + 1
//! конец
//! ```
//!
//! ## Expressions
//!
//! Expressions are resolved by a fixed ladder of rules rather than a
//! grammar: the first rule that matches wins, and each operand is either a
//! nested expression or a simple value. There is no operator precedence.
//!
//! ```text
//! 1 + 2          // 3
//! 2 * 3 + 1      // `+` splits first, `2 * 3` is not a simple value: 1
//! корень(16)     // built-in call: 4.0
//! числа[0]       // list element
//! ```
//!
//! ## Hosts
//!
//! Graphics, input, mouse/keyboard events and debugger notifications go
//! through [`Callbacks`]. Any of them may be missing.
//!
//! # Example
//!
//! ```rust
//! use ri::{Callbacks, Interpreter};
//!
//! let mut interp = Interpreter::new();
//! let output = interp.execute("перем x = 5\nвывести x + 1", Callbacks::new());
//! assert_eq!(output, "6");
//! ```

pub mod ast;
pub mod config;
pub mod debug;
pub mod display;
pub mod eval;
pub mod graphics;
pub mod host;
pub mod lexer;
pub mod parser;
pub mod value;

use std::sync::Once;

// Re-export commonly used items
pub use ast::{Program, Statement};
pub use config::Config;
pub use debug::{Debugger, StepMode};
pub use eval::{resolve_block, Block, Builtin, EvalError, Interpreter};
pub use graphics::GraphicsCommand;
pub use host::{Callbacks, DebugEvent, EventQuery};
pub use parser::{parse, parse_line};
pub use value::Value;

pub const LANGUAGE_VERSION: &str = "2.13.1";
pub const LANGUAGE_CREATOR: &str = "KITTEN";
pub const LANGUAGE_YEAR: &str = "2025";

/// What the language offers, as listed by `ri --version`
pub const FEATURES: &[&str] = &[
    "Переменные и типы данных",
    "Условные операторы и циклы",
    "Графические примитивы",
    "Обработка событий мыши/клавиатуры",
    "Базовые математические операции",
    "Отладка с точками останова",
    "Встроенные функции",
    "Списки и массивы",
];

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Convenience function to run a Ri program with a fresh interpreter
pub fn run(source: &str, callbacks: Callbacks) -> String {
    Interpreter::new().execute(source, callbacks)
}
