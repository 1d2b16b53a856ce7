//! Display formatting for the debugger console
//!
//! Renders variable snapshots, call stacks and pause banners with the
//! same ANSI colouring the console prompt uses.

use crate::value::Value;
use std::collections::HashMap;

/// Format a value on one line; strings are quoted so `"5"` and `5` differ
pub fn format_value_inline(val: &Value) -> String {
    match val {
        Value::Str(s) => format!("\x1b[32m\"{}\"\x1b[0m", s),
        Value::Bool(_) => format!("\x1b[35m{}\x1b[0m", val),
        _ => val.to_string(),
    }
}

/// Format a variable snapshot as aligned `name: value` pairs, sorted by name
pub fn format_variables(vars: &HashMap<String, Value>) -> String {
    if vars.is_empty() {
        return "\x1b[90m(нет переменных)\x1b[0m".to_string();
    }

    let max_key_len = vars.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut entries: Vec<_> = vars.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::from("\x1b[90m{\x1b[0m\n");
    for (name, val) in entries {
        out.push_str(&format!(
            "  \x1b[36m{:width$}\x1b[0m: {} \x1b[90m({})\x1b[0m\n",
            name,
            format_value_inline(val),
            val.type_name(),
            width = max_key_len
        ));
    }
    out.push_str("\x1b[90m}\x1b[0m");
    out
}

/// Format a list's elements, eliding the middle of long lists
pub fn format_list(name: &str, items: &[Value]) -> String {
    let parts: Vec<String> = if items.len() <= 10 {
        items.iter().map(format_value_inline).collect()
    } else {
        let mut parts: Vec<String> = items[..5].iter().map(format_value_inline).collect();
        parts.push(format!("\x1b[90m... ещё {} ...\x1b[0m", items.len() - 8));
        parts.extend(items[items.len() - 3..].iter().map(format_value_inline));
        parts
    };
    format!("\x1b[36m{}\x1b[0m = \x1b[90m[\x1b[0m{}\x1b[90m]\x1b[0m", name, parts.join(", "))
}

/// Format call-stack frames innermost first, numbered from the top
pub fn format_call_stack(frames: &[String]) -> String {
    if frames.is_empty() {
        return "\x1b[90m(стек вызовов пуст)\x1b[0m".to_string();
    }
    frames
        .iter()
        .rev()
        .enumerate()
        .map(|(i, frame)| format!("  \x1b[33m#{}\x1b[0m {}", i, frame))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Banner shown when execution pauses at `line`
pub fn format_pause(reason: &str, line: usize, source: Option<&str>) -> String {
    let mut out = format!("\x1b[33m[{}]\x1b[0m строка \x1b[1m{}\x1b[0m", reason, line);
    if let Some(text) = source {
        out.push_str(&format!("\n  \x1b[90m{:>4} |\x1b[0m {}", line, text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_are_sorted_and_typed() {
        let mut vars = HashMap::new();
        vars.insert("б".to_string(), Value::Integer(2));
        vars.insert("а".to_string(), Value::Str("x".into()));
        let out = format_variables(&vars);
        let a = out.find("а").unwrap();
        let b = out.find("б").unwrap();
        assert!(a < b);
        assert!(out.contains("\"x\""));
        assert!(out.contains("(целое)"));
    }

    #[test]
    fn empty_snapshots() {
        assert!(format_variables(&HashMap::new()).contains("нет переменных"));
        assert!(format_call_stack(&[]).contains("пуст"));
    }

    #[test]
    fn call_stack_innermost_first() {
        let frames = vec!["внешний".to_string(), "внутренний".to_string()];
        let out = format_call_stack(&frames);
        assert!(out.find("внутренний").unwrap() < out.find("внешний").unwrap());
    }

    #[test]
    fn long_lists_are_elided() {
        let items: Vec<Value> = (0..20).map(Value::Integer).collect();
        let out = format_list("l", &items);
        assert!(out.contains("ещё 12"));
        assert!(out.contains("19"));
    }

    #[test]
    fn pause_banner_shows_source() {
        let out = format_pause("breakpoint", 3, Some("вывести x"));
        assert!(out.contains("вывести x"));
        assert!(out.contains('3'));
    }
}
