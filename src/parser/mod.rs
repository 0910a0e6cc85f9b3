//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! and types with binding powers for precedence handling:
//!
//! - Statement parsing (variable declarations, functions, control flow)
//! - Expression parsing (binary ops, calls, member access, literals)
//! - Type parsing for annotations and alias declarations
//! - Error recovery, so a single parse reports every syntax error
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! looked up in tables that are built once and shared between parses.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
