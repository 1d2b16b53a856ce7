//! ri - interpreter for the Ri teaching language
//!
//! Usage:
//!   ri script.ri         Run a script file
//!   ri -c "код"          Run inline code
//!   ri --debug script.ri Run under the debugger console

mod cli;
mod repl;
mod terminal;

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    ri::init_tracing();

    let args: Vec<String> = env::args().collect();
    let cli = match cli::parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            eprintln!("Справка: ri --help");
            return ExitCode::from(2);
        }
    };

    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    cli::run(&cli)
}
