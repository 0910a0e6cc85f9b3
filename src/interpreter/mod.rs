//! Tree-walking evaluator.
//!
//! Statements and expressions are reduced to [`values::RuntimeVal`]s over a
//! chain of [`environment::Environment`] scopes:
//!
//! - Blocks, branches and loop iterations run in a fresh child scope
//! - Calls run in a child of the function's declaration scope
//! - `break`, `continue` and `return` travel up as [`interpreter::ControlFlow`]
//! - Builtins live in the global scope created by [`native::create_global_environment`]

pub mod conversions;
pub mod environment;
pub mod expr;
pub mod interpreter;
pub mod native;
pub mod stmt;
pub mod values;
