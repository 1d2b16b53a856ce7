use crate::repl::Console;
use crate::terminal;
use ri::{display, Config, Interpreter, FEATURES, LANGUAGE_CREATOR, LANGUAGE_VERSION, LANGUAGE_YEAR};
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors raised before a program gets to run
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("неизвестный флаг '{0}'")]
    UnknownFlag(String),

    #[error("флагу '{0}' нужно значение")]
    MissingValue(&'static str),

    #[error("неверное значение '{value}' для '{flag}'")]
    InvalidValue { flag: &'static str, value: String },

    #[error("не удалось прочитать {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("нет программы: укажите файл или -c <код>")]
    NoProgram,
}

/// Parsed command-line arguments
#[derive(Debug, Default)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) graphics: bool,
    pub(crate) debug: bool,
    pub(crate) step: bool,
    pub(crate) dump: bool,
    pub(crate) breakpoints: Vec<usize>,
    pub(crate) max_iterations: Option<usize>,
}

impl CliArgs {
    /// Whether the debugger console should be attached
    pub(crate) fn debugging(&self) -> bool {
        self.debug || self.step || !self.breakpoints.is_empty()
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &'static str) -> Result<&'a str, CliError> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or(CliError::MissingValue(flag))
}

fn parse_number(value: &str, flag: &'static str) -> Result<usize, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, CliError> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the program
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
                return Err(CliError::MissingValue("-c"));
            }
            "-b" | "--break" => {
                let value = flag_value(args, i, "--break")?;
                cli.breakpoints.push(parse_number(value, "--break")?);
                i += 1;
            }
            "--max-iterations" => {
                let value = flag_value(args, i, "--max-iterations")?;
                cli.max_iterations = Some(parse_number(value, "--max-iterations")?);
                i += 1;
            }
            "-g" | "--graphics" => cli.graphics = true,
            "-d" | "--debug" => cli.debug = true,
            "--step" => cli.step = true,
            "--dump" => cli.dump = true,
            "--help" | "-h" => cli.help = true,
            "--version" | "-V" => cli.version = true,
            flag if flag.starts_with('-') => return Err(CliError::UnknownFlag(flag.to_string())),
            path => cli.script = Some(path.to_string()),
        }
        i += 1;
    }

    Ok(cli)
}

pub(crate) fn print_help() {
    println!(
        r#"ri-{} - интерпретатор языка Ri

ИСПОЛЬЗОВАНИЕ:
    ri <файл.ri>              Выполнить программу из файла
    ri -c <код>               Выполнить код из командной строки
    ri --help                 Показать эту справку
    ri --version              Показать версию и возможности языка

ФЛАГИ:
    -g, --graphics            Печатать графические команды в stderr (JSON)
    -d, --debug               Включить отладчик
    -b, --break <строка>      Точка останова (можно повторять)
    --step                    Остановиться на первой строке
    --dump                    После выполнения показать переменные и списки
    --max-iterations <N>      Предел итераций одного цикла

ОТЛАДЧИК:
    c, continue               Продолжить до следующей точки останова
    n, next                   Следующая строка, не заходя в блоки
    s, step                   Следующая строка, заходя в блоки
    o, out                    Выйти из текущего блока
    v, vars                   Показать переменные
    bt, stack                 Показать стек вызовов
    b, break [N]              Поставить точку останова / список точек
    d, delete N               Убрать точку останова
    q, quit                   Остановить программу

ОКРУЖЕНИЕ:
    RI_MAX_ITERATIONS         Предел итераций цикла (10000)
    RI_DEFAULT_COLOR          Цвет фигур по умолчанию (черный)
    RI_CLEAR_COLOR            Цвет очистки по умолчанию (белый)
    RI_WINDOW_TITLE           Заголовок окна по умолчанию
    RUST_LOG                  Журнал интерпретатора (например, ri=debug)"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("Ri {} ({}, {})", LANGUAGE_VERSION, LANGUAGE_CREATOR, LANGUAGE_YEAR);
    println!("ri-{}", VERSION);
    println!();
    println!("Возможности:");
    for feature in FEATURES {
        println!("  \u{2022} {}", feature);
    }
}

fn load_source(cli: &CliArgs) -> Result<String, CliError> {
    if let Some(code) = &cli.command {
        return Ok(code.clone());
    }
    let path = cli.script.as_deref().ok_or(CliError::NoProgram)?;
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// Run the program named by the arguments and print its output
pub(crate) fn run(cli: &CliArgs) -> ExitCode {
    match run_program(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Ошибка: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_program(cli: &CliArgs) -> Result<(), CliError> {
    let source = load_source(cli)?;

    let mut config = Config::from_env();
    if let Some(max) = cli.max_iterations {
        config.max_loop_iterations = max;
    }
    let mut interp = Interpreter::with_config(config);
    let debugger = interp.debugger();

    let stopper = Arc::clone(&debugger);
    if let Err(e) = ctrlc::set_handler(move || stopper.request_stop()) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    let mut callbacks = terminal::callbacks(Arc::clone(&debugger), cli.graphics);
    if cli.debugging() {
        debugger.set_enabled(true);
        for line in &cli.breakpoints {
            debugger.add_breakpoint(*line);
        }
        if cli.step {
            debugger.pause();
        }
        let mut console = Console::new(Arc::clone(&debugger), &source);
        callbacks = callbacks.on_debug(move |event| console.handle(event));
    }

    let output = interp.execute(&source, callbacks);
    if !output.is_empty() {
        println!("{}", output);
    }

    if cli.dump {
        eprintln!("{}", display::format_variables(interp.variables()));
        let mut names: Vec<_> = interp.lists().keys().collect();
        names.sort();
        for name in names {
            eprintln!("{}", display::format_list(name, &interp.lists()[name]));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("ri")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn script_and_flags() {
        let cli = parse_args(&args(&["--graphics", "-b", "3", "--break", "7", "prog.ri"])).unwrap();
        assert_eq!(cli.script.as_deref(), Some("prog.ri"));
        assert!(cli.graphics);
        assert_eq!(cli.breakpoints, vec![3, 7]);
        assert!(cli.debugging());
    }

    #[test]
    fn inline_code_takes_the_rest() {
        let cli = parse_args(&args(&["-c", "вывести", "1"])).unwrap();
        assert_eq!(cli.command.as_deref(), Some("вывести 1"));
        assert!(!cli.debugging());
    }

    #[test]
    fn max_iterations_override() {
        let cli = parse_args(&args(&["--max-iterations", "50", "a.ri"])).unwrap();
        assert_eq!(cli.max_iterations, Some(50));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(matches!(parse_args(&args(&["--nope"])), Err(CliError::UnknownFlag(_))));
        assert!(matches!(parse_args(&args(&["-b"])), Err(CliError::MissingValue("--break"))));
        assert!(matches!(
            parse_args(&args(&["-b", "x"])),
            Err(CliError::InvalidValue { flag: "--break", .. })
        ));
    }

    #[test]
    fn missing_program() {
        let cli = parse_args(&args(&[])).unwrap();
        assert!(matches!(load_source(&cli), Err(CliError::NoProgram)));
    }
}
