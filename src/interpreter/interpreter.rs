use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{ast::Stmt, statements::ProgramStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Span,
};

use super::{environment::Environment, stmt::execute_stmt, values::RuntimeVal};

/// Outcome of executing one statement. Anything other than `Normal`
/// unwinds through enclosing statements until a loop or call consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Normal(RuntimeVal),
    Break,
    Continue,
    Return(RuntimeVal),
}

impl ControlFlow {
    fn signal_name(&self) -> &'static str {
        match self {
            ControlFlow::Normal(_) => "value",
            ControlFlow::Break => "break",
            ControlFlow::Continue => "continue",
            ControlFlow::Return(_) => "return",
        }
    }

    /// The carried value, or an error if a jump has nowhere left to go.
    pub fn into_value(self, span: &Span) -> Result<RuntimeVal, Error> {
        match self {
            ControlFlow::Normal(value) => Ok(value),
            other => Err(Error::new(
                ErrorImpl::ControlFlowEscaped {
                    signal: other.signal_name().to_string(),
                },
                span.clone(),
            )),
        }
    }
}

fn reject_placeholders<'a>(mut stmts: impl Iterator<Item = &'a Stmt>) -> Result<(), Error> {
    match stmts.find(|stmt| stmt.contains_error()) {
        Some(broken) => Err(Error::new(ErrorImpl::ErrorNodeEvaluated, broken.get_span().clone())),
        None => Ok(()),
    }
}

/// Evaluates a statement to its value. A statement that still holds error
/// placeholders anywhere inside it is rejected before anything runs.
pub fn evaluate_stmt(stmt: &Stmt, env: &Environment) -> Result<RuntimeVal, Error> {
    reject_placeholders(std::iter::once(stmt))?;
    execute_stmt(stmt, env)?.into_value(stmt.get_span())
}

/// Evaluates every statement of a program directly in `env`, with the same
/// placeholder check as [`evaluate_stmt`] applied to the whole program first.
pub fn evaluate_program(program: &ProgramStmt, env: &Environment) -> Result<RuntimeVal, Error> {
    reject_placeholders(program.iter())?;

    let mut last = RuntimeVal::Null;
    for stmt in program.iter() {
        last = execute_stmt(stmt, env)?.into_value(stmt.get_span())?;
    }

    Ok(last)
}

/// Tokenizes, parses and evaluates `source` in `env`.
///
/// Nothing is evaluated if tokenizing or parsing failed; every syntax error
/// found is returned instead. A runtime failure is returned on its own.
pub fn interpret(source: &str, file: Option<String>, env: &Environment) -> Result<RuntimeVal, Vec<Error>> {
    let file_name = Rc::new(file.clone().unwrap_or_else(|| String::from("shell")));

    let tokens = tokenize(source.to_string(), file).map_err(|error| vec![error])?;
    let (program, errors) = parse(tokens, file_name);
    if !errors.is_empty() {
        debug!(count = errors.len(), "refusing to evaluate a program with syntax errors");
        return Err(errors);
    }

    evaluate_program(&program, env).map_err(|error| vec![error])
}
