//! Parser for Ri
//!
//! Splits source text into lines and classifies each stripped line by its
//! leading keyword. Classification is prefix based and the first matching
//! rule wins; a line that matches nothing is a no-op rather than an error.

use crate::ast::{Line, Program, Statement};
use crate::lexer::{self, Keyword, ELSE, END, THEN};

/// Bare form of the clear command (no color argument)
const CLEAR_BARE: &str = "очистить";

/// Split source text into a program, one entry per line
pub fn parse(source: &str) -> Program {
    let lines = source
        .lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            code: lexer::strip_comment(text).to_string(),
        })
        .collect();
    Program { lines }
}

fn words(rest: &str) -> Vec<&str> {
    rest.split_whitespace().collect()
}

/// Split `name = expr` at the first `=`
fn binding(rest: &str) -> Option<(&str, &str)> {
    rest.split_once('=').map(|(name, expr)| (name.trim(), expr.trim()))
}

/// Split `list, expr` at commas, keeping the first two pieces
fn list_operands(rest: &str) -> Option<(&str, &str)> {
    let mut parts = rest.split(',');
    let list = parts.next()?.trim();
    let operand = parts.next()?.trim();
    Some((list, operand))
}

fn list_items(expr: &str) -> Option<Vec<&str>> {
    let inner = expr.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    Some(inner.split(',').map(str::trim).collect())
}

fn keyword_statement(keyword: Keyword, rest: &str) -> Statement<'_> {
    let rest = rest.trim();
    match keyword {
        Keyword::Var => match binding(rest) {
            Some((name, expr)) => Statement::Var { name, expr },
            None => Statement::Nop,
        },
        Keyword::Print => Statement::Print(rest),
        Keyword::Input => Statement::Input(rest),
        Keyword::If => {
            Statement::If(rest.find(THEN).map(|pos| rest[..pos].trim()))
        }
        Keyword::While => Statement::While(rest),
        Keyword::Function => {
            let name = rest.split('(').next().unwrap_or_default().trim();
            Statement::Function(name)
        }
        Keyword::List => match binding(rest) {
            Some((name, expr)) => Statement::List { name, items: list_items(expr) },
            None => Statement::Nop,
        },
        Keyword::Append => match list_operands(rest) {
            Some((list, expr)) => Statement::Append { list, expr },
            None => Statement::Nop,
        },
        Keyword::Remove => match list_operands(rest) {
            Some((list, index)) => Statement::Remove { list, index },
            None => Statement::Nop,
        },
        Keyword::Window => Statement::Window(words(rest)),
        Keyword::Rect => Statement::Rect(words(rest)),
        Keyword::Circle => Statement::Circle(words(rest)),
        Keyword::Line => Statement::Line(words(rest)),
        Keyword::Text => match lexer::quoted(rest) {
            Some((text, remaining)) => Statement::Text {
                text,
                args: remaining.split_whitespace().map(String::from).collect(),
            },
            None => Statement::Nop,
        },
        Keyword::Delay => Statement::Delay(rest),
        Keyword::Clear => Statement::Clear(Some(rest).filter(|c| !c.is_empty())),
        Keyword::SetHandler => match words(rest).as_slice() {
            [event, handler, ..] => Statement::SetHandler { event: *event, handler: *handler },
            _ => Statement::Nop,
        },
        Keyword::MouseX => Statement::MouseX,
        Keyword::MouseY => Statement::MouseY,
        Keyword::MousePressed => Statement::MousePressed,
        Keyword::KeyPressed => match lexer::key_code(rest) {
            Some(code) => Statement::KeyPressed(code),
            None => Statement::Nop,
        },
        Keyword::UpdateScreen => Statement::UpdateScreen,
        Keyword::Stop => Statement::Stop,
    }
}

/// Classify one stripped line
pub fn parse_line(code: &str) -> Statement<'_> {
    let code = code.trim();
    if let Ok((rest, keyword)) = lexer::keyword(code) {
        return keyword_statement(keyword, rest);
    }
    if code == END || code == ELSE {
        return Statement::BlockMarker;
    }
    if code == CLEAR_BARE {
        return Statement::Clear(None);
    }
    if code.contains('(') && code.contains(')') {
        let target = code.split_once('=').map(|(name, _)| name.trim());
        return Statement::Call { target, call: code };
    }
    match binding(code) {
        Some((name, expr)) => Statement::Assign { name, expr },
        None => Statement::Nop,
    }
}
