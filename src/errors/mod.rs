//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout parsing and
//! evaluation. It includes:
//!
//! - Error structures with source span information
//! - Specific error variants grouped into syntax, name, type and internal
//!   categories
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
