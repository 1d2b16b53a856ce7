use super::Interpreter;
use crate::graphics::GraphicsCommand;
use std::thread;
use std::time::Duration;

impl Interpreter {
    /// Log a command and hand it to the host straight away
    pub(crate) fn emit(&mut self, command: GraphicsCommand) {
        tracing::trace!(op = command.name(), "graphics");
        self.callbacks.graphics(std::slice::from_ref(&command));
        self.graphics.push(command);
    }

    fn color_or_default(&self, words: &[&str]) -> String {
        words
            .first()
            .map(|c| c.to_string())
            .unwrap_or_else(|| self.config.default_color.clone())
    }

    /// `окно w h [title words...]`
    pub(crate) fn draw_window(&mut self, args: &[&str]) {
        let [width, height, title @ ..] = args else { return };
        let width = self.evaluate(width);
        let height = self.evaluate(height);
        let title = if title.is_empty() {
            self.config.window_title.clone()
        } else {
            title.join(" ")
        };
        self.emit(GraphicsCommand::Window { width, height, title });
    }

    /// `прямоугольник x y w h [color]`
    pub(crate) fn draw_rect(&mut self, args: &[&str]) {
        let [x, y, width, height, rest @ ..] = args else { return };
        let command = GraphicsCommand::Rectangle {
            x: self.evaluate(x),
            y: self.evaluate(y),
            width: self.evaluate(width),
            height: self.evaluate(height),
            color: self.color_or_default(rest),
        };
        self.emit(command);
    }

    /// `круг x y r [color]`
    pub(crate) fn draw_circle(&mut self, args: &[&str]) {
        let [x, y, radius, rest @ ..] = args else { return };
        let command = GraphicsCommand::Circle {
            x: self.evaluate(x),
            y: self.evaluate(y),
            radius: self.evaluate(radius),
            color: self.color_or_default(rest),
        };
        self.emit(command);
    }

    /// `линия x1 y1 x2 y2 [color]`
    pub(crate) fn draw_line(&mut self, args: &[&str]) {
        let [x1, y1, x2, y2, rest @ ..] = args else { return };
        let command = GraphicsCommand::Line {
            x1: self.evaluate(x1),
            y1: self.evaluate(y1),
            x2: self.evaluate(x2),
            y2: self.evaluate(y2),
            color: self.color_or_default(rest),
        };
        self.emit(command);
    }

    /// `текст x y "text" [color]`; `args` are the words left after the quoted text
    pub(crate) fn draw_text(&mut self, text: String, args: &[String]) {
        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        let [x, y, rest @ ..] = words.as_slice() else { return };
        let command = GraphicsCommand::Text {
            x: self.evaluate(x),
            y: self.evaluate(y),
            text,
            color: self.color_or_default(rest),
        };
        self.emit(command);
    }

    /// `очистить [color]`
    pub(crate) fn clear_screen(&mut self, color: Option<&str>) {
        let color = color
            .map(str::to_string)
            .unwrap_or_else(|| self.config.clear_color.clone());
        self.emit(GraphicsCommand::Clear { color });
    }

    /// `задержка ms`; negative, non-numeric or unrepresentable durations are skipped
    pub(crate) fn delay(&mut self, expr: &str) {
        let value = self.evaluate(expr);
        if !value.is_numeric() {
            return;
        }
        let Ok(ms) = value.to_f64() else { return };
        if !(ms.is_finite() && ms > 0.0) {
            return;
        }
        match Duration::try_from_secs_f64(ms / 1000.0) {
            Ok(duration) => thread::sleep(duration),
            Err(e) => tracing::debug!(ms, error = %e, "delay skipped"),
        }
    }
}
