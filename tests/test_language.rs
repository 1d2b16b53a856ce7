//! Integration tests for whole Ri programs

#[path = "common/mod.rs"]
mod common;
use common::{debug_kinds, recording, run_source, Callbacks, DebugEvent, EventQuery, GraphicsCommand, Interpreter, Value};

#[test]
fn test_var_and_print() {
    assert_eq!(run_source("перем x = 5\nвывести x + 1"), "6");
}

#[test]
fn test_if_prints_yes() {
    assert_eq!(run_source("если 1 > 0 то\nвывести \"да\"\nконец"), "да");
}

#[test]
fn test_integer_round_trip() {
    for literal in ["0", "42", "-7", "9223372036854775807"] {
        let mut interp = Interpreter::new();
        interp.execute(&format!("перем x = {}", literal), Callbacks::new());
        let expected: i64 = literal.parse().unwrap();
        assert_eq!(interp.evaluate("x"), Value::Integer(expected), "literal {}", literal);
    }
}

#[test]
fn test_ladder_regressions() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.evaluate("1 + 2"), Value::Integer(3));
    // `+` is split first and `2 * 3` is not a simple operand
    assert_eq!(interp.evaluate("2 * 3 + 1"), Value::Integer(1));
    assert_eq!(interp.evaluate("2 + 3 * 4"), Value::Integer(2));
    // parentheses are spliced before the operators
    assert_eq!(interp.evaluate("(2 * 3) + 1"), Value::Integer(7));
}

#[test]
fn test_list_builtins() {
    let src = "\
список numbers = [10, 20, 30]
вывести элемент(numbers, 1)
удалить(numbers, 1)
вывести список_длина(numbers)";
    assert_eq!(run_source(src), "20\n2");
}

#[test]
fn test_list_statements_and_indexing() {
    let src = "\
список оценки = []
добавить оценки, 5
добавить оценки, 4
добавить оценки, 3
удалить оценки, 0
вывести оценки[0]
вывести оценки[1]
вывести длина(оценки)";
    assert_eq!(run_source(src), "4\n3\n2");
}

#[test]
fn test_infinite_loop_is_capped() {
    let src = "перем n = 0\nцикл n >= 0\nn = n + 1\nконец\nвывести n";
    let out = run_source(src);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, ["Предупреждение: Превышено максимальное количество итераций цикла", "10000"]);
}

#[test]
fn test_division_by_zero_expression_is_zero() {
    assert_eq!(run_source("перем z = 0\nвывести 10 / z"), "0");
    assert_eq!(run_source("вывести 10 / (5 - 5)"), "0");
    assert_eq!(run_source("вывести 10 / 4"), "2.5");
}

#[test]
fn test_counting_program() {
    let src = "\
// сумма чисел от 1 до 5
перем сумма = 0
перем i = 1
цикл i <= 5
    сумма = сумма + i
    i = i + 1
конец
если сумма == 15 то
    вывести \"сумма: \" + строка(сумма)
иначе
    вывести \"ошибка\"
конец";
    // `+` starts from integer 0, so joining strings is an evaluation error
    assert_eq!(run_source(src), "0");
}

#[test]
fn test_builtins_in_programs() {
    let src = "\
перем x = корень(16)
вывести x
вывести округлить(3.14159, 2)
вывести тип(\"а\")
перем n = число(\"7\")
вывести n + 1";
    assert_eq!(run_source(src), "4.0\n3.14\nстрока\n8");
}

#[test]
fn test_errors_do_not_stop_the_run() {
    let (callbacks, recorded) = recording(|_| Value::Integer(0));
    let out = ri::run("моя переменная = 3\nвывести 1", callbacks);
    assert_eq!(out, "Ошибка в строке 1: недопустимое имя переменной 'моя переменная'\n1");
    assert!(debug_kinds(&recorded).contains(&"error"));
}

#[test]
fn test_graphics_program() {
    let src = "\
окно 400 300 Моя игра
очистить
прямоугольник 10 20 30 40 красный
линия 0 0 100 100
обновить_экран()";
    let (callbacks, recorded) = recording(|_| Value::Integer(0));
    ri::run(src, callbacks);
    let recorded = recorded.lock().unwrap();
    // one batch per command, then the final flush of everything
    assert_eq!(recorded.graphics.len(), 6);
    assert_eq!(
        recorded.graphics[0],
        vec![GraphicsCommand::Window {
            width: Value::Integer(400),
            height: Value::Integer(300),
            title: "Моя игра".to_string(),
        }]
    );
    assert_eq!(recorded.graphics[1], vec![GraphicsCommand::Clear { color: "белый".to_string() }]);
    assert!(matches!(
        &recorded.graphics[3][0],
        GraphicsCommand::Line { color, .. } if color == "черный"
    ));
    assert_eq!(recorded.graphics[5].len(), 5);
}

#[test]
fn test_mouse_answers_feed_expressions() {
    let (callbacks, recorded) = recording(|query| match query {
        EventQuery::MouseX => Value::Integer(30),
        EventQuery::MousePressed => Value::Bool(true),
        _ => Value::Integer(0),
    });
    let src = "\
мышь_х()
мышь_нажата()
если мышь_нажата == истина то
    вывести мышь_х + 5
конец";
    assert_eq!(ri::run(src, callbacks), "35");
    let kinds: Vec<&str> = recorded.lock().unwrap().queries.iter().map(EventQuery::kind).collect();
    assert_eq!(kinds, ["get_mouse_x", "get_mouse_pressed"]);
}

#[test]
fn test_stop_reports_to_debug_host() {
    let (callbacks, recorded) = recording(|_| Value::Integer(0));
    assert_eq!(ri::run("вывести 1\nостановить()\nвывести 2", callbacks), "1");
    let events = &recorded.lock().unwrap().debug;
    assert_eq!(events.last(), Some(&DebugEvent::ProgramStopped));
}

#[test]
fn test_function_shows_on_call_stack() {
    let (callbacks, recorded) = recording(|_| Value::Integer(0));
    ri::run("функция f()\nвывести 1\nконец", callbacks);
    let stacks: Vec<Vec<String>> = recorded
        .lock()
        .unwrap()
        .debug
        .iter()
        .filter_map(|e| match e {
            DebugEvent::CallStackUpdated(frames) => Some(frames.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(stacks, vec![vec!["функция f (строка 1)".to_string()], vec![]]);
}

#[test]
fn test_delay_and_overflow_do_not_abort() {
    let src = "\
задержка 1.0e30
задержка -5
вывести \"ab\" * 9223372036854775807
вывести 2 ^ 64
вывести 1";
    let (callbacks, recorded) = recording(|_| Value::Integer(0));
    assert_eq!(ri::run(src, callbacks), "0\n0\n1");
    let errors = debug_kinds(&recorded).iter().filter(|k| **k == "error").count();
    assert_eq!(errors, 2);
}
