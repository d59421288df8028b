//! Terminal output for streamed events
//!
//! Lines arrive pre-rendered by the relay; this only decides color.

use owo_colors::{OwoColorize, Style};

/// Prints streamed event lines to stdout
pub struct Printer {
    use_color: bool,
}

impl Printer {
    /// Create a printer; color is decided by the caller based on TTY
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Print one event's rendered lines
    pub fn print(&self, kind: &str, data: &str) {
        let style = self.kind_style(kind);
        for line in data.lines() {
            println!("{}", line.style(style));
        }
    }

    /// Only errors stand out; traces are dimmed secondary detail
    fn kind_style(&self, kind: &str) -> Style {
        if !self.use_color {
            return Style::new();
        }
        match kind {
            "error" => Style::new().red(),
            "trace" => Style::new().cyan(),
            _ => Style::new(),
        }
    }
}
