use tracing::{debug, trace};

use crate::{
    ast::{
        ast::Stmt,
        statements::{FnDeclStmt, IfStmt, LoopStmt, TypeAliasStmt, VarDeclStmt},
    },
    errors::errors::{Error, ErrorImpl},
    type_resolver::type_resolver::resolve_type,
};

use super::{
    conversions::to_bool,
    environment::Environment,
    expr::evaluate_expr,
    interpreter::ControlFlow,
    values::{FunctionVal, RuntimeVal, TypeAliasVal},
};

/// Executes a statement, passing jumps up to the caller.
pub fn execute_stmt(stmt: &Stmt, env: &Environment) -> Result<ControlFlow, Error> {
    match stmt {
        Stmt::Program(program) => execute_body(&program.body, env),
        Stmt::Block(block) => execute_body(&block.body, &env.child()),
        Stmt::Expression(stmt) => Ok(ControlFlow::Normal(evaluate_expr(&stmt.expression, env)?)),
        Stmt::VarDecl(stmt) => execute_var_decl(stmt, env).map(ControlFlow::Normal),
        Stmt::FnDecl(stmt) => execute_fn_decl(stmt, env).map(ControlFlow::Normal),
        Stmt::If(stmt) => execute_if(stmt, env),
        Stmt::TypeAlias(stmt) => execute_type_alias(stmt, env).map(ControlFlow::Normal),
        Stmt::Loop(stmt) => execute_loop(stmt, env),
        Stmt::Break(_) => Ok(ControlFlow::Break),
        Stmt::Continue(_) => Ok(ControlFlow::Continue),
        Stmt::Return(stmt) => {
            let value = match &stmt.value {
                Some(value) => evaluate_expr(value, env)?,
                None => RuntimeVal::Null,
            };
            Ok(ControlFlow::Return(value))
        }
    }
}

/// Runs statements in order in `env`. The result is the last statement's
/// value (`null` when empty) or the first jump encountered.
pub fn execute_body(body: &[Stmt], env: &Environment) -> Result<ControlFlow, Error> {
    let mut last = RuntimeVal::Null;
    for stmt in body {
        match execute_stmt(stmt, env)? {
            ControlFlow::Normal(value) => last = value,
            jump => return Ok(jump),
        }
    }

    Ok(ControlFlow::Normal(last))
}

fn execute_var_decl(stmt: &VarDeclStmt, env: &Environment) -> Result<RuntimeVal, Error> {
    if let Some(explicit_type) = &stmt.explicit_type {
        let resolved = resolve_type(explicit_type, env)?;
        trace!(variable = %stmt.identifier, ty = %resolved, "resolved declared type");
    }

    let value = match &stmt.assigned_value {
        Some(value) => evaluate_expr(value, env)?,
        None if stmt.constant => {
            return Err(Error::new(
                ErrorImpl::ConstantWithoutValue {
                    variable: stmt.identifier.clone(),
                },
                stmt.span.clone(),
            ))
        }
        None => RuntimeVal::Undefined,
    };

    env.declare(&stmt.identifier, value, stmt.constant, &stmt.span)
}

fn execute_fn_decl(stmt: &FnDeclStmt, env: &Environment) -> Result<RuntimeVal, Error> {
    let function = RuntimeVal::Function(FunctionVal {
        name: stmt.name.clone(),
        parameters: stmt.parameters.clone(),
        body: stmt.body.clone(),
        return_type: stmt.return_type.clone(),
        declaration_env: env.clone(),
    });

    env.declare(&stmt.name, function, true, &stmt.span)
}

fn execute_if(stmt: &IfStmt, env: &Environment) -> Result<ControlFlow, Error> {
    let condition = evaluate_expr(&stmt.condition, env)?;

    if to_bool(&condition) {
        execute_body(&stmt.consequent, &env.child())
    } else if let Some(alternate) = &stmt.alternate {
        execute_body(alternate, &env.child())
    } else {
        Ok(ControlFlow::Normal(RuntimeVal::Null))
    }
}

fn execute_loop(stmt: &LoopStmt, env: &Environment) -> Result<ControlFlow, Error> {
    loop {
        if let Some(condition) = &stmt.condition {
            if !to_bool(&evaluate_expr(condition, env)?) {
                break;
            }
        }

        match execute_body(&stmt.body, &env.child())? {
            ControlFlow::Break => break,
            ControlFlow::Normal(_) | ControlFlow::Continue => continue,
            ret @ ControlFlow::Return(_) => return Ok(ret),
        }
    }

    Ok(ControlFlow::Normal(RuntimeVal::Null))
}

fn execute_type_alias(stmt: &TypeAliasStmt, env: &Environment) -> Result<RuntimeVal, Error> {
    let ty = resolve_type(&stmt.ty, env)?;
    debug!(alias = %stmt.name, ty = %ty, "declared type alias");

    env.declare(
        &stmt.name,
        RuntimeVal::TypeAlias(TypeAliasVal {
            name: stmt.name.clone(),
            ty,
        }),
        true,
        &stmt.span,
    )
}
