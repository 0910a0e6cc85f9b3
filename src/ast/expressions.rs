use crate::{lexer::tokens::Token, Span};

use super::ast::Expr;

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub struct IntExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NullExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedExpr {
    pub span: Span,
}

/// Symbol Expression
/// A reference to a name in the enclosing scope chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub span: Span,
}

// COMPLEX

/// Unary Expression
/// `-x`, `!x`, `++x` and `--x`, plus the postfix forms `x++` and `x--`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
    pub prefix: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Assignment Expression
/// The operator is `=` or one of the compound forms (`+=`, `-=`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expr>,
    pub operator: Token,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
    pub span: Span,
}

/// Member Expression
/// `object.property` when not computed, `object[property]` when computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Box<Expr>,
    pub computed: bool,
    pub span: Span,
}

/// Placeholder for an expression or statement that failed to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorExpr {
    pub span: Span,
}
