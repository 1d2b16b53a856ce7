//! Program and statement types for Ri
//!
//! A program is the list of source lines, each kept with its comment
//! stripped. A statement is the classification of one stripped
//! line; it borrows its operands from the line text and is rebuilt every
//! time the line executes, so loops re-read the same text each iteration.

/// One source line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// 1-based line number in the source text
    pub number: usize,
    /// Trimmed text with any trailing `//` comment removed
    pub code: String,
}

impl Line {
    /// Whether the line carries no code (blank or comment-only)
    pub fn is_blank(&self) -> bool {
        self.code.is_empty()
    }
}

/// A whole program, one entry per source line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub lines: Vec<Line>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stripped code of the line at `index` (0-based)
    pub fn code(&self, index: usize) -> &str {
        self.lines.get(index).map(|l| l.code.as_str()).unwrap_or("")
    }
}

/// Classified statement for one logical line.
///
/// Operand slices are the untouched expression text; evaluation happens
/// in the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `перем name = expr`
    Var { name: &'a str, expr: &'a str },
    /// `вывести expr`
    Print(&'a str),
    /// `ввести name`
    Input(&'a str),
    /// `если cond то`; `None` when the line has no ` то`
    If(Option<&'a str>),
    /// `цикл cond`
    While(&'a str),
    /// `функция name(...)`
    Function(&'a str),
    /// `список name = [a, b]`; items are `None` when the right side is not bracketed
    List { name: &'a str, items: Option<Vec<&'a str>> },
    /// `добавить name, expr`
    Append { list: &'a str, expr: &'a str },
    /// `удалить name, index`
    Remove { list: &'a str, index: &'a str },
    /// `окно w h [title]`
    Window(Vec<&'a str>),
    /// `прямоугольник x y w h [color]`
    Rect(Vec<&'a str>),
    /// `круг x y r [color]`
    Circle(Vec<&'a str>),
    /// `линия x1 y1 x2 y2 [color]`
    Line(Vec<&'a str>),
    /// `текст x y "s" [color]`; the quoted text plus the remaining words
    Text { text: String, args: Vec<String> },
    /// `задержка ms`
    Delay(&'a str),
    /// `очистить [color]`
    Clear(Option<&'a str>),
    /// `установить_обработчик event handler`
    SetHandler { event: &'a str, handler: &'a str },
    MouseX,
    MouseY,
    MousePressed,
    /// `клавиша_нажата("code")`
    KeyPressed(String),
    UpdateScreen,
    Stop,
    /// `конец` or `иначе` reached in straight-line flow
    BlockMarker,
    /// A line with parentheses: a built-in call, optionally assigned
    Call { target: Option<&'a str>, call: &'a str },
    /// `name = expr`
    Assign { name: &'a str, expr: &'a str },
    /// Anything else (declarations without `=`, malformed lines)
    Nop,
}

impl Statement<'_> {
    /// Short name for tracing
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Var { .. } => "var",
            Statement::Print(_) => "print",
            Statement::Input(_) => "input",
            Statement::If(_) => "if",
            Statement::While(_) => "while",
            Statement::Function(_) => "function",
            Statement::List { .. } => "list",
            Statement::Append { .. } => "append",
            Statement::Remove { .. } => "remove",
            Statement::Window(_) => "window",
            Statement::Rect(_) => "rect",
            Statement::Circle(_) => "circle",
            Statement::Line(_) => "line",
            Statement::Text { .. } => "text",
            Statement::Delay(_) => "delay",
            Statement::Clear(_) => "clear",
            Statement::SetHandler { .. } => "set_handler",
            Statement::MouseX => "mouse_x",
            Statement::MouseY => "mouse_y",
            Statement::MousePressed => "mouse_pressed",
            Statement::KeyPressed(_) => "key_pressed",
            Statement::UpdateScreen => "update_screen",
            Statement::Stop => "stop",
            Statement::BlockMarker => "block_marker",
            Statement::Call { .. } => "call",
            Statement::Assign { .. } => "assign",
            Statement::Nop => "nop",
        }
    }
}
