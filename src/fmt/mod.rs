//! Code formatting for all three tree levels
//!
//! - [`surface`] prints programs, declarations, expressions and patterns
//! - [`core`] prints the simple language
//! - [`lambda`] prints lambda terms and constants

use std::fmt::Display;

pub mod core;
pub mod lambda;
pub mod surface;

/// Single-line output buffer shared by the printers.
struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_display(&mut self, value: &impl Display) {
        self.buffer.push_str(&value.to_string());
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn open_if(&mut self, parens: bool) {
        if parens {
            self.buffer.push('(');
        }
    }

    fn close_if(&mut self, parens: bool) {
        if parens {
            self.buffer.push(')');
        }
    }

    fn finish(self) -> String {
        self.buffer
    }
}
