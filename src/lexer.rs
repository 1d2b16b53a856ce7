//! Line scanning for Ri
//!
//! Ri has no token stream: every logical line is recognised by its leading
//! keyword, and expressions are split textually by the evaluator. This
//! module holds the small nom recognisers the parser and evaluator share.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::char,
    combinator::value,
    sequence::{delimited, preceded, tuple},
    IResult,
};

/// Comment marker; everything after it on a line is ignored
pub const COMMENT: &str = "//";

/// Leading keyword of a statement line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Var,
    Print,
    Input,
    If,
    While,
    Function,
    List,
    Append,
    Remove,
    Window,
    Rect,
    Circle,
    Line,
    Text,
    Delay,
    Clear,
    SetHandler,
    MouseX,
    MouseY,
    MousePressed,
    KeyPressed,
    UpdateScreen,
    Stop,
}

/// Opener prefixes that start a block closed by `конец`
pub const BLOCK_OPENERS: [&str; 3] = ["если ", "цикл ", "функция "];
/// Block terminator line
pub const END: &str = "конец";
/// Else-branch separator line
pub const ELSE: &str = "иначе";
/// Separates an `если` condition from `то`
pub const THEN: &str = " то";

fn declaration_keyword(input: &str) -> IResult<&str, Keyword> {
    alt((
        value(Keyword::Var, tag("перем ")),
        value(Keyword::Print, tag("вывести ")),
        value(Keyword::Input, tag("ввести ")),
        value(Keyword::If, tag("если ")),
        value(Keyword::While, tag("цикл ")),
        value(Keyword::Function, tag("функция ")),
        value(Keyword::List, tag("список ")),
        value(Keyword::Append, tag("добавить ")),
        value(Keyword::Remove, tag("удалить ")),
    ))(input)
}

fn graphics_keyword(input: &str) -> IResult<&str, Keyword> {
    alt((
        value(Keyword::Window, tag("окно ")),
        value(Keyword::Rect, tag("прямоугольник ")),
        value(Keyword::Circle, tag("круг ")),
        value(Keyword::Line, tag("линия ")),
        value(Keyword::Text, tag("текст ")),
        value(Keyword::Delay, tag("задержка ")),
        value(Keyword::Clear, tag("очистить ")),
    ))(input)
}

fn event_keyword(input: &str) -> IResult<&str, Keyword> {
    alt((
        value(Keyword::SetHandler, tag("установить_обработчик ")),
        value(Keyword::MouseX, tag("мышь_х()")),
        value(Keyword::MouseY, tag("мышь_у()")),
        value(Keyword::MousePressed, tag("мышь_нажата()")),
        value(Keyword::KeyPressed, tag("клавиша_нажата(")),
        value(Keyword::UpdateScreen, tag("обновить_экран()")),
        value(Keyword::Stop, tag("остановить()")),
    ))(input)
}

/// Recognise the leading keyword of a trimmed line, returning the rest
pub fn keyword(input: &str) -> IResult<&str, Keyword> {
    alt((declaration_keyword, graphics_keyword, event_keyword))(input)
}

/// Remove a trailing `//` comment and surrounding whitespace
pub fn strip_comment(line: &str) -> &str {
    let code = match line.find(COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    };
    code.trim()
}

/// Whether a trimmed line carries no code
pub fn is_blank(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT)
}

fn head_and_inner(input: &str, open: char, close: char) -> IResult<&str, (&str, &str)> {
    let mut buf = [0u8; 4];
    let opener: &str = open.encode_utf8(&mut buf);
    let (input, head) = take_until(opener)(input)?;
    let (input, inner) = preceded(char(open), take_till(|c| c == open || c == close))(input)?;
    Ok((input, (head, inner)))
}

/// Split `head(inner...` at the first `open`.
///
/// The inner part runs to the first `close` or the next `open`, whichever
/// comes first, so nested calls are not understood: `f(g(x))` yields
/// `("f", "g")`.
pub fn enclosed(input: &str, open: char, close: char) -> Option<(&str, &str)> {
    head_and_inner(input, open, close)
        .ok()
        .map(|(_, (head, inner))| (head.trim(), inner.trim()))
}

/// Find the first double-quoted run in `input`.
///
/// Returns the quoted text and `input` with every occurrence of the quoted
/// run (quotes included) removed.
pub fn quoted(input: &str) -> Option<(String, String)> {
    let parsed: IResult<&str, (&str, &str)> = tuple((
        take_until("\""),
        delimited(char('"'), take_until("\""), char('"')),
    ))(input);
    let (_, (_, text)) = parsed.ok()?;
    let remaining = input.replace(&format!("\"{}\"", text), "");
    Some((text.to_string(), remaining.trim().to_string()))
}

/// Parse the key code out of `"code")`, the tail of a `клавиша_нажата(` line
pub fn key_code(input: &str) -> Option<String> {
    let parsed: IResult<&str, &str> = take_until(")")(input);
    let (_, code) = parsed.ok()?;
    Some(code.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
}

/// Whether `name` is a usable identifier: one or more Unicode word characters
pub fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}
