//! Drawing commands emitted to the rendering host
//!
//! Operands are the evaluated values as written in the script (no
//! coercion to pixels happens here); colors and titles are passed through
//! as raw words.

use crate::value::Value;
use serde_json::{json, Value as JsonValue};

/// An immutable drawing or window instruction
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCommand {
    Window { width: Value, height: Value, title: String },
    Rectangle { x: Value, y: Value, width: Value, height: Value, color: String },
    Circle { x: Value, y: Value, radius: Value, color: String },
    Line { x1: Value, y1: Value, x2: Value, y2: Value, color: String },
    Text { x: Value, y: Value, text: String, color: String },
    Clear { color: String },
    Update,
}

impl GraphicsCommand {
    /// Operation name as seen by hosts
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsCommand::Window { .. } => "window",
            GraphicsCommand::Rectangle { .. } => "rectangle",
            GraphicsCommand::Circle { .. } => "circle",
            GraphicsCommand::Line { .. } => "line",
            GraphicsCommand::Text { .. } => "text",
            GraphicsCommand::Clear { .. } => "clear",
            GraphicsCommand::Update => "update",
        }
    }

    /// Whether the command draws or opens something (everything but `update`)
    pub fn is_drawing(&self) -> bool {
        !matches!(self, GraphicsCommand::Update)
    }

    /// JSON object with an `op` field plus the named operands
    pub fn to_json(&self) -> JsonValue {
        let op = self.name();
        match self {
            GraphicsCommand::Window { width, height, title } => json!({
                "op": op,
                "width": width.to_json(),
                "height": height.to_json(),
                "title": title,
            }),
            GraphicsCommand::Rectangle { x, y, width, height, color } => json!({
                "op": op,
                "x": x.to_json(),
                "y": y.to_json(),
                "width": width.to_json(),
                "height": height.to_json(),
                "color": color,
            }),
            GraphicsCommand::Circle { x, y, radius, color } => json!({
                "op": op,
                "x": x.to_json(),
                "y": y.to_json(),
                "radius": radius.to_json(),
                "color": color,
            }),
            GraphicsCommand::Line { x1, y1, x2, y2, color } => json!({
                "op": op,
                "x1": x1.to_json(),
                "y1": y1.to_json(),
                "x2": x2.to_json(),
                "y2": y2.to_json(),
                "color": color,
            }),
            GraphicsCommand::Text { x, y, text, color } => json!({
                "op": op,
                "x": x.to_json(),
                "y": y.to_json(),
                "text": text,
                "color": color,
            }),
            GraphicsCommand::Clear { color } => json!({ "op": op, "color": color }),
            GraphicsCommand::Update => json!({ "op": op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_json() {
        let cmd = GraphicsCommand::Circle {
            x: Value::Integer(10),
            y: Value::Float(2.5),
            radius: Value::Integer(3),
            color: "красный".into(),
        };
        let json = cmd.to_json();
        assert_eq!(json["op"], "circle");
        assert_eq!(json["x"], 10);
        assert_eq!(json["y"], 2.5);
        assert_eq!(json["color"], "красный");
    }

    #[test]
    fn update_is_not_drawing() {
        assert!(!GraphicsCommand::Update.is_drawing());
        assert!(GraphicsCommand::Clear { color: "белый".into() }.is_drawing());
    }
}
