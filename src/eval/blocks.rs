use crate::ast::Program;
use crate::lexer::{BLOCK_OPENERS, ELSE, END};

/// Extent of a block that starts at an opener line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Index of the depth-0 `иначе`, if any (the last one wins)
    pub else_at: Option<usize>,
    /// Index of the matching `конец`, or the program length when the block
    /// is never closed
    pub end: usize,
}

/// Scan forward from the opener at `start` for its `иначе` and `конец`.
///
/// Blank and comment-only lines are skipped. Nested openers raise the
/// depth, and only a terminator at depth 0 closes the block.
pub fn resolve_block(program: &Program, start: usize) -> Block {
    let mut depth = 0usize;
    let mut else_at = None;

    for index in start + 1..program.len() {
        let code = program.code(index);
        if code.is_empty() {
            continue;
        }
        if code == END {
            if depth == 0 {
                return Block { else_at, end: index };
            }
            depth -= 1;
        } else if BLOCK_OPENERS.iter().any(|opener| code.starts_with(opener)) {
            depth += 1;
        } else if code == ELSE && depth == 0 {
            else_at = Some(index);
        }
    }

    Block { else_at, end: program.len() }
}
