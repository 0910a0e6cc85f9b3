#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_resolver;

extern crate regex;

/// A byte offset into a named source.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// Joins two spans into one covering both.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// Returns the 1-based line number, the text of that line and the 0-based
/// column of `position` within `source`.
///
/// Positions past the end of the source (the EOF token) map onto the end of
/// the last line.
pub fn get_line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // Past the last newline: either the source is empty or ends with '\n'
    let last = source.rsplit('\n').next().unwrap_or("");
    if source.ends_with('\n') || source.is_empty() {
        (line_number, String::new(), 0)
    } else {
        (line_number - 1, last.to_string(), last.len())
    }
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: UnexpectedToken (message)
        -> main.fs:20:9
           |
        20 | let a = #;
           |         ^
    */

    let span = error.get_span();
    let (line, line_text, line_pos) = get_line_at_position(source, span.start.0);
    let (end_line, _, end_pos) = get_line_at_position(source, span.end.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}", error.get_error_name());
    } else {
        eprintln!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    eprintln!("-> {}:{}:{}", span.start.1, line, line_pos + 1);
    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_string, line_text_removed.trim_end());

    let offset = line_pos.saturating_sub(removed_whitespace);
    let width = if end_line == line && end_pos > line_pos {
        end_pos - line_pos
    } else {
        1
    };

    eprintln!(
        "{:>padding$} {}^{}",
        "|",
        " ".repeat(offset),
        "~".repeat(width - 1)
    );
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 27);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        let (line_number, line, line_pos) = super::get_line_at_position("let x = 1", 9);
        assert_eq!(line_number, 1);
        assert_eq!(line, "let x = 1");
        assert_eq!(line_pos, 9);

        let (line_number, _, line_pos) = super::get_line_at_position("a\n", 2);
        assert_eq!(line_number, 2);
        assert_eq!(line_pos, 0);
    }
}
