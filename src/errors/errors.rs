use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position, Span};

/// Broad classes of failure, used by callers to decide how to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The token stream does not match the grammar.
    Syntax,
    /// Undeclared, redeclared or constant names.
    Name,
    /// An operation applied to runtime values of the wrong kind.
    Type,
    /// A grammar/evaluator mismatch. Never expected in a valid tree.
    Internal,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "SyntaxError"),
            ErrorCategory::Name => write!(f, "NameError"),
            ErrorCategory::Type => write!(f, "TypeError"),
            ErrorCategory::Internal => write!(f, "InternalError"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    span: Span,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.get_category(), self.internal_error)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(error_impl: ErrorImpl, span: Span) -> Self {
        Error {
            internal_error: error_impl,
            span,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::ControlFlowOutsideScope { .. } => ErrorCategory::Syntax,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::ConstantReassignment { .. }
            | ErrorImpl::ConstantWithoutValue { .. } => ErrorCategory::Name,
            ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::InvalidConversion { .. }
            | ErrorImpl::InvalidAssignmentTarget { .. }
            | ErrorImpl::NotCallable { .. }
            | ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::NotATypeAlias { .. }
            | ErrorImpl::UnknownProperty { .. }
            | ErrorImpl::IndexOutOfBounds { .. }
            | ErrorImpl::NativeError { .. } => ErrorCategory::Type,
            ErrorImpl::ErrorNodeEvaluated
            | ErrorImpl::ControlFlowEscaped { .. }
            | ErrorImpl::NotImplementedError => ErrorCategory::Internal,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ControlFlowOutsideScope { .. } => "ControlFlowOutsideScope",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::ConstantReassignment { .. } => "ConstantReassignment",
            ErrorImpl::ConstantWithoutValue { .. } => "ConstantWithoutValue",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::InvalidConversion { .. } => "InvalidConversion",
            ErrorImpl::InvalidAssignmentTarget { .. } => "InvalidAssignmentTarget",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::NotATypeAlias { .. } => "NotATypeAlias",
            ErrorImpl::UnknownProperty { .. } => "UnknownProperty",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::NativeError { .. } => "NativeError",
            ErrorImpl::ErrorNodeEvaluated => "ErrorNodeEvaluated",
            ErrorImpl::ControlFlowEscaped { .. } => "ControlFlowEscaped",
            ErrorImpl::NotImplementedError => "NotImplementedError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedToken {
                expected,
                received,
                token,
            } => ErrorTip::Suggestion(format!(
                "Expected {} but found {} (`{}`)",
                expected, received, token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::ControlFlowOutsideScope { keyword } => ErrorTip::Suggestion(format!(
                "`{}` is not allowed here",
                keyword
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared in this scope", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::ConstantReassignment { variable } => ErrorTip::Suggestion(format!(
                "Cannot reassign `{}` as it was declared constant",
                variable
            )),
            ErrorImpl::ConstantWithoutValue { variable } => ErrorTip::Suggestion(format!(
                "Constant `{}` needs an initial value",
                variable
            )),
            ErrorImpl::InvalidOperands {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidOperand { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::InvalidConversion { value, target } => {
                ErrorTip::Suggestion(format!("Cannot convert `{}` to {}", value, target))
            }
            ErrorImpl::InvalidAssignmentTarget { target } => {
                ErrorTip::Suggestion(format!("Cannot assign to {}, expected an identifier", target))
            }
            ErrorImpl::NotCallable { value } => {
                ErrorTip::Suggestion(format!("Value of kind `{}` is not callable", value))
            }
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::NotATypeAlias { name, received } => ErrorTip::Suggestion(format!(
                "`{}` is a {} value, not a type",
                name, received
            )),
            ErrorImpl::UnknownProperty { property, value } => ErrorTip::Suggestion(format!(
                "`{}` has no property `{}`",
                value, property
            )),
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is out of bounds for length {}",
                index, length
            )),
            ErrorImpl::NativeError { function, message } => {
                ErrorTip::Suggestion(format!("{}: {}", function, message))
            }
            ErrorImpl::ErrorNodeEvaluated => ErrorTip::Suggestion(String::from(
                "A tree with syntax errors cannot be evaluated",
            )),
            ErrorImpl::ControlFlowEscaped { signal } => {
                ErrorTip::Suggestion(format!("`{}` escaped its enclosing construct", signal))
            }
            ErrorImpl::NotImplementedError => ErrorTip::Suggestion(String::from(
                "This feature is expected to be handled, but has not yet been implemented",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected {expected} but found {received} ({token:?})")]
    ExpectedToken {
        expected: TokenKind,
        received: TokenKind,
        token: String,
    },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{keyword:?} used outside of its enclosing construct")]
    ControlFlowOutsideScope { keyword: String },

    // Name
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("cannot reassign constant {variable:?}")]
    ConstantReassignment { variable: String },
    #[error("constant {variable:?} declared without a value")]
    ConstantWithoutValue { variable: String },

    // Type
    #[error("operator {operator:?} cannot be applied to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator {operator:?} cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("cannot convert {value:?} to {target}")]
    InvalidConversion { value: String, target: String },
    #[error("invalid assignment target: {target}")]
    InvalidAssignmentTarget { target: String },
    #[error("value of kind {value} is not callable")]
    NotCallable { value: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("{name:?} is a {received} value, not a type alias")]
    NotATypeAlias { name: String, received: String },
    #[error("{value} has no property {property:?}")]
    UnknownProperty { property: String, value: String },
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("{function}: {message}")]
    NativeError { function: String, message: String },

    // Internal
    #[error("attempted to evaluate an error placeholder")]
    ErrorNodeEvaluated,
    #[error("{signal} escaped its enclosing construct")]
    ControlFlowEscaped { signal: String },
    #[error("not implemented error")]
    NotImplementedError,
}
