use std::slice::Iter;

use crate::Span;

use super::ast::{Expr, Param, Stmt, Type};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl ProgramStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

/// Variable Declaration
/// `let`/`var` with an optional value, or `const` which requires one.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub constant: bool,
    pub assigned_value: Option<Expr>,
    pub explicit_type: Option<Type>,
    pub span: Span,
}

/// Function Declaration
/// The return type defaults to `void` when none is written.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub parameters: Vec<Param>,
    pub body: Vec<Stmt>,
    pub return_type: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub consequent: Vec<Stmt>,
    pub alternate: Option<Vec<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasStmt {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

/// Loop Statement
/// `loop { ... }` has no condition, `while cond { ... }` does.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopStmt {
    pub condition: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}
