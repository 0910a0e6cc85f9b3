use tracing::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{AssignmentExpr, BinaryExpr, CallExpr, MemberExpr, UnaryExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    conversions::{to_bool, to_float, to_int, to_string},
    environment::Environment,
    interpreter::ControlFlow,
    stmt::execute_body,
    values::{FunctionVal, RuntimeVal},
};

pub fn evaluate_expr(expr: &Expr, env: &Environment) -> Result<RuntimeVal, Error> {
    match expr {
        Expr::Identifier(symbol) => Ok(env.lookup(&symbol.value, &symbol.span)?.value),
        Expr::Int(int) => Ok(RuntimeVal::Int(int.value)),
        Expr::Float(float) => Ok(RuntimeVal::Float(float.value)),
        Expr::String(string) => Ok(RuntimeVal::String(string.value.clone())),
        Expr::Bool(boolean) => Ok(RuntimeVal::Bool(boolean.value)),
        Expr::Null(_) => Ok(RuntimeVal::Null),
        Expr::Undefined(_) => Ok(RuntimeVal::Undefined),
        Expr::Array(array) => {
            let elements = array
                .elements
                .iter()
                .map(|element| evaluate_expr(element, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RuntimeVal::Array(elements))
        }
        Expr::Unary(unary) => evaluate_unary_expr(unary, env),
        Expr::Binary(binary) => evaluate_binary_expr(binary, env),
        Expr::Assignment(assignment) => evaluate_assignment_expr(assignment, env),
        Expr::Call(call) => evaluate_call_expr(call, env),
        Expr::Conditional(conditional) => {
            if to_bool(&evaluate_expr(&conditional.condition, env)?) {
                evaluate_expr(&conditional.consequent, env)
            } else {
                evaluate_expr(&conditional.alternate, env)
            }
        }
        Expr::Member(member) => evaluate_member_expr(member, env),
        Expr::Error(error) => Err(Error::new(ErrorImpl::ErrorNodeEvaluated, error.span.clone())),
    }
}

fn invalid_operands(operator: &str, left: &RuntimeVal, right: &RuntimeVal, span: &Span) -> Error {
    Error::new(
        ErrorImpl::InvalidOperands {
            operator: operator.to_string(),
            left: left.kind_name().to_string(),
            right: right.kind_name().to_string(),
        },
        span.clone(),
    )
}

fn invalid_operand(operator: &str, operand: &RuntimeVal, span: &Span) -> Error {
    Error::new(
        ErrorImpl::InvalidOperand {
            operator: operator.to_string(),
            operand: operand.kind_name().to_string(),
        },
        span.clone(),
    )
}

fn invalid_assignment_target(target: &Expr) -> Error {
    Error::new(
        ErrorImpl::InvalidAssignmentTarget {
            target: target.kind_name().to_string(),
        },
        target.get_span().clone(),
    )
}

/// Arithmetic dispatches on the left operand: numbers always produce a
/// float, strings concatenate or repeat, booleans add as integers.
pub fn apply_arithmetic(
    kind: TokenKind,
    operator: &str,
    left: &RuntimeVal,
    right: &RuntimeVal,
    span: &Span,
) -> Result<RuntimeVal, Error> {
    let invalid = || invalid_operands(operator, left, right, span);

    match left {
        RuntimeVal::Int(_) | RuntimeVal::Float(_) => {
            let lhs = to_float(left, span)?;
            let rhs = to_float(right, span).map_err(|_| invalid())?;

            let result = match kind {
                TokenKind::Plus => lhs + rhs,
                TokenKind::Dash => lhs - rhs,
                TokenKind::Star => lhs * rhs,
                TokenKind::Slash => lhs / rhs,
                TokenKind::Percent => lhs % rhs,
                _ => return Err(invalid()),
            };
            Ok(RuntimeVal::Float(result))
        }
        RuntimeVal::String(string) => match (kind, right) {
            (TokenKind::Plus, _) => Ok(RuntimeVal::String(format!("{}{}", string, to_string(right)))),
            (TokenKind::Star, RuntimeVal::Int(count)) => {
                // Negative counts repeat zero times
                let count = usize::try_from(*count).unwrap_or(0);
                match string.len().checked_mul(count) {
                    Some(length) if length <= isize::MAX as usize => Ok(RuntimeVal::String(string.repeat(count))),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        },
        RuntimeVal::Bool(_) if kind == TokenKind::Plus => {
            let lhs = to_int(left, span)?;
            let rhs = to_int(right, span).map_err(|_| invalid())?;
            Ok(RuntimeVal::Int(lhs.wrapping_add(rhs)))
        }
        _ => Err(invalid()),
    }
}

fn evaluate_binary_expr(expr: &BinaryExpr, env: &Environment) -> Result<RuntimeVal, Error> {
    // Both sides are always evaluated, including for `&&` and `||`
    let left = evaluate_expr(&expr.left, env)?;
    let right = evaluate_expr(&expr.right, env)?;
    let operator = &expr.operator;

    match operator.kind {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
            apply_arithmetic(operator.kind, &operator.value, &left, &right, &expr.span)
        }
        TokenKind::Equals => Ok(RuntimeVal::Bool(to_bool(&left) == to_bool(&right))),
        TokenKind::NotEquals => Ok(RuntimeVal::Bool(to_bool(&left) != to_bool(&right))),
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals => {
            let invalid = |_: Error| invalid_operands(&operator.value, &left, &right, &expr.span);
            let lhs = to_float(&left, &expr.span).map_err(invalid)?;
            let rhs = to_float(&right, &expr.span).map_err(invalid)?;

            Ok(RuntimeVal::Bool(match operator.kind {
                TokenKind::Less => lhs < rhs,
                TokenKind::LessEquals => lhs <= rhs,
                TokenKind::Greater => lhs > rhs,
                _ => lhs >= rhs,
            }))
        }
        TokenKind::And => Ok(RuntimeVal::Bool(to_bool(&left) && to_bool(&right))),
        TokenKind::Or => Ok(RuntimeVal::Bool(to_bool(&left) || to_bool(&right))),
        _ => Err(invalid_operands(&operator.value, &left, &right, &expr.span)),
    }
}

fn evaluate_unary_expr(expr: &UnaryExpr, env: &Environment) -> Result<RuntimeVal, Error> {
    let operator = &expr.operator;

    match operator.kind {
        TokenKind::Dash => {
            let operand = evaluate_expr(&expr.operand, env)?;
            let value = to_float(&operand, &expr.span).map_err(|_| invalid_operand(&operator.value, &operand, &expr.span))?;
            Ok(RuntimeVal::Float(-value))
        }
        TokenKind::Not => Ok(RuntimeVal::Bool(!to_bool(&evaluate_expr(&expr.operand, env)?))),
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let Expr::Identifier(symbol) = expr.operand.as_ref() else {
                return Err(invalid_assignment_target(&expr.operand));
            };

            let old = env.lookup(&symbol.value, &symbol.span)?.value;
            let number = to_float(&old, &expr.span).map_err(|_| invalid_operand(&operator.value, &old, &expr.span))?;
            let step = if operator.kind == TokenKind::PlusPlus { 1.0 } else { -1.0 };

            let new = env.assign(&symbol.value, RuntimeVal::Float(number + step), &expr.span)?;
            Ok(if expr.prefix { new } else { old })
        }
        _ => Err(Error::new(ErrorImpl::NotImplementedError, expr.span.clone())),
    }
}

/// The arithmetic operator behind a compound assignment, if any.
fn compound_operator(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::PlusEquals => Some(TokenKind::Plus),
        TokenKind::MinusEquals => Some(TokenKind::Dash),
        TokenKind::StarEquals => Some(TokenKind::Star),
        TokenKind::SlashEquals => Some(TokenKind::Slash),
        TokenKind::PercentEquals => Some(TokenKind::Percent),
        _ => None,
    }
}

fn evaluate_assignment_expr(expr: &AssignmentExpr, env: &Environment) -> Result<RuntimeVal, Error> {
    let Expr::Identifier(symbol) = expr.assignee.as_ref() else {
        return Err(invalid_assignment_target(&expr.assignee));
    };

    let value = evaluate_expr(&expr.value, env)?;
    let value = match compound_operator(expr.operator.kind) {
        Some(kind) => {
            let current = env.lookup(&symbol.value, &symbol.span)?.value;
            let operator = expr.operator.value.trim_end_matches('=');
            apply_arithmetic(kind, operator, &current, &value, &expr.span)?
        }
        None => value,
    };

    env.assign(&symbol.value, value, &expr.span)
}

fn evaluate_call_expr(expr: &CallExpr, env: &Environment) -> Result<RuntimeVal, Error> {
    let callee = evaluate_expr(&expr.callee, env)?;
    let arguments = expr
        .arguments
        .iter()
        .map(|argument| evaluate_expr(argument, env))
        .collect::<Result<Vec<_>, _>>()?;

    call_value(&callee, arguments, env, &expr.span)
}

/// Invokes a callable value. Natives see the caller's environment, user
/// functions run in a fresh scope under the one they were declared in.
pub fn call_value(
    callee: &RuntimeVal,
    arguments: Vec<RuntimeVal>,
    env: &Environment,
    span: &Span,
) -> Result<RuntimeVal, Error> {
    match callee {
        RuntimeVal::NativeFunction(native) => {
            trace!(function = %native.name, arguments = arguments.len(), "calling native function");
            (native.call)(arguments, env, span)
        }
        RuntimeVal::Function(function) => call_function(function, arguments, span),
        other => Err(Error::new(
            ErrorImpl::NotCallable {
                value: other.kind_name().to_string(),
            },
            span.clone(),
        )),
    }
}

fn call_function(function: &FunctionVal, arguments: Vec<RuntimeVal>, span: &Span) -> Result<RuntimeVal, Error> {
    let expected = function.parameters.len();
    let received = arguments.len();

    if received < expected {
        return Err(Error::new(ErrorImpl::MissingArguments { expected, received }, span.clone()));
    }
    if received > expected {
        return Err(Error::new(ErrorImpl::UnexpectedArguments { expected, received }, span.clone()));
    }

    trace!(function = %function.name, arguments = received, "calling function");

    let scope = function.declaration_env.child();
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        scope.declare(&parameter.name, argument, false, &parameter.span)?;
    }

    match execute_body(&function.body, &scope)? {
        ControlFlow::Normal(value) | ControlFlow::Return(value) => Ok(value),
        jump => jump.into_value(span),
    }
}

fn out_of_bounds(index: i64, length: usize, span: &Span) -> Error {
    Error::new(ErrorImpl::IndexOutOfBounds { index, length }, span.clone())
}

fn evaluate_member_expr(expr: &MemberExpr, env: &Environment) -> Result<RuntimeVal, Error> {
    let object = evaluate_expr(&expr.object, env)?;
    let unknown_property = |property: String| {
        Error::new(
            ErrorImpl::UnknownProperty {
                property,
                value: object.kind_name().to_string(),
            },
            expr.span.clone(),
        )
    };

    if !expr.computed {
        let property = match expr.property.as_ref() {
            Expr::Identifier(symbol) => symbol.value.clone(),
            other => other.kind_name().to_string(),
        };

        let length = match (&object, property.as_str()) {
            (RuntimeVal::Array(elements), "length") => Some(elements.len()),
            (RuntimeVal::String(string), "length") => Some(string.chars().count()),
            _ => None,
        };

        return length
            .map(|length| RuntimeVal::Int(length as i64))
            .ok_or_else(|| unknown_property(property));
    }

    let property = evaluate_expr(&expr.property, env)?;
    match &object {
        RuntimeVal::Array(elements) => {
            let index = to_int(&property, &expr.span)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .ok_or_else(|| out_of_bounds(index, elements.len(), &expr.span))
        }
        RuntimeVal::String(string) => {
            let index = to_int(&property, &expr.span)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| string.chars().nth(i))
                .map(|c| RuntimeVal::String(c.to_string()))
                .ok_or_else(|| out_of_bounds(index, string.chars().count(), &expr.span))
        }
        _ => Err(unknown_property(property.to_string())),
    }
}
