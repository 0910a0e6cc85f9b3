//! Host-provided builtins registered in the global environment.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_resolver::type_resolver::infer_type,
    Span,
};

use super::{
    conversions::{to_bool, to_float, to_int, to_string},
    environment::Environment,
    interpreter::interpret,
    values::{NativeFn, NativeFunctionVal, RuntimeVal},
};

const BUILTINS: &[(&str, NativeFn)] = &[
    ("print", native_print),
    ("println", native_println),
    ("sprintf", native_sprintf),
    ("int", native_int),
    ("float", native_float),
    ("string", native_string),
    ("bool", native_bool),
    ("len", native_len),
    ("typeof", native_typeof),
    ("input", native_input),
    ("eval", native_eval),
    ("exit", native_exit),
];

/// A fresh root environment holding every builtin as a constant.
pub fn create_global_environment() -> Environment {
    Environment::with_constants(BUILTINS.iter().map(|(name, call)| {
        let function = RuntimeVal::NativeFunction(NativeFunctionVal {
            name: name.to_string(),
            call: *call,
        });
        (name.to_string(), function)
    }))
}

fn native_error(function: &str, message: impl Into<String>, span: &Span) -> Error {
    Error::new(
        ErrorImpl::NativeError {
            function: function.to_string(),
            message: message.into(),
        },
        span.clone(),
    )
}

fn expect_arity(arguments: &[RuntimeVal], min: usize, max: usize, span: &Span) -> Result<(), Error> {
    let received = arguments.len();
    if received < min {
        return Err(Error::new(ErrorImpl::MissingArguments { expected: min, received }, span.clone()));
    }
    if received > max {
        return Err(Error::new(ErrorImpl::UnexpectedArguments { expected: max, received }, span.clone()));
    }

    Ok(())
}

/// The single argument of a one-argument builtin.
fn single(arguments: Vec<RuntimeVal>, span: &Span) -> Result<RuntimeVal, Error> {
    expect_arity(&arguments, 1, 1, span)?;
    Ok(arguments.into_iter().next().unwrap_or(RuntimeVal::Undefined))
}

fn format_arguments(arguments: &[RuntimeVal]) -> String {
    arguments.iter().map(|argument| argument.to_string()).collect()
}

fn native_print(arguments: Vec<RuntimeVal>, _: &Environment, _: &Span) -> Result<RuntimeVal, Error> {
    print!("{}", format_arguments(&arguments));
    let _ = io::stdout().flush();
    Ok(RuntimeVal::Null)
}

fn native_println(arguments: Vec<RuntimeVal>, _: &Environment, _: &Span) -> Result<RuntimeVal, Error> {
    println!("{}", format_arguments(&arguments));
    Ok(RuntimeVal::Null)
}

fn native_sprintf(arguments: Vec<RuntimeVal>, _: &Environment, _: &Span) -> Result<RuntimeVal, Error> {
    Ok(RuntimeVal::String(format_arguments(&arguments)))
}

fn native_int(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let value = single(arguments, span)?;
    Ok(RuntimeVal::Int(to_int(&value, span)?))
}

fn native_float(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let value = single(arguments, span)?;
    Ok(RuntimeVal::Float(to_float(&value, span)?))
}

fn native_string(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let value = single(arguments, span)?;
    Ok(RuntimeVal::String(to_string(&value)))
}

fn native_bool(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let value = single(arguments, span)?;
    Ok(RuntimeVal::Bool(to_bool(&value)))
}

fn native_len(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    match single(arguments, span)? {
        RuntimeVal::Array(elements) => Ok(RuntimeVal::Int(elements.len() as i64)),
        RuntimeVal::String(string) => Ok(RuntimeVal::Int(string.chars().count() as i64)),
        other => Err(native_error("len", format!("cannot take the length of {}", other.kind_name()), span)),
    }
}

fn native_typeof(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let value = single(arguments, span)?;
    Ok(RuntimeVal::String(infer_type(&value, span.clone()).to_string()))
}

fn native_input(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    expect_arity(&arguments, 0, 1, span)?;
    if let Some(prompt) = arguments.first() {
        print!("{}", prompt);
        let _ = io::stdout().flush();
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|error| native_error("input", error.to_string(), span))?;

    Ok(RuntimeVal::String(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
}

/// Runs a string as a program in the global scope of the caller.
fn native_eval(arguments: Vec<RuntimeVal>, env: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    let source = match single(arguments, span)? {
        RuntimeVal::String(source) => source,
        other => return Err(native_error("eval", format!("expected a string, received {}", other.kind_name()), span)),
    };

    debug!(source = %source, "evaluating string");
    interpret(&source, Some(String::from("eval")), &env.global()).map_err(|errors| {
        errors
            .into_iter()
            .next()
            .unwrap_or_else(|| native_error("eval", "evaluation failed", span))
    })
}

fn native_exit(arguments: Vec<RuntimeVal>, _: &Environment, span: &Span) -> Result<RuntimeVal, Error> {
    expect_arity(&arguments, 0, 1, span)?;
    let code = match arguments.first() {
        Some(code) => to_int(code, span)?,
        None => 0,
    };
    let code = i32::try_from(code)
        .map_err(|_| native_error("exit", format!("exit code {} is out of range", code), span))?;

    let _ = io::stdout().flush();
    std::process::exit(code)
}
