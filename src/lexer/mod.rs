//! Lexical analysis.
//!
//! Converts source text into a stream of tokens, each carrying the span it
//! was read from. Whitespace and comments are dropped, and the stream always
//! ends with a single `EOF` token.

pub mod lexer;
pub mod tokens;
