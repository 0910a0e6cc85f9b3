use crate::Span;

use super::{expressions::*, statements::*, types::*};

/// Statement
///
/// A closed set of statement kinds. Every variant carries its own span.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Program(ProgramStmt),
    Block(BlockStmt),
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    TypeAlias(TypeAliasStmt),
    Loop(LoopStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Return(ReturnStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Program(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::TypeAlias(stmt) => &stmt.span,
            Stmt::Loop(stmt) => &stmt.span,
            Stmt::Break(stmt) => &stmt.span,
            Stmt::Continue(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
        }
    }

    /// Whether this statement, or anything nested in it, is an error placeholder.
    pub fn contains_error(&self) -> bool {
        match self {
            Stmt::Program(ProgramStmt { body, .. }) | Stmt::Block(BlockStmt { body, .. }) => {
                body.iter().any(Stmt::contains_error)
            }
            Stmt::Expression(stmt) => stmt.expression.contains_error(),
            Stmt::VarDecl(stmt) => stmt
                .assigned_value
                .as_ref()
                .is_some_and(Expr::contains_error),
            Stmt::FnDecl(stmt) => stmt.body.iter().any(Stmt::contains_error),
            Stmt::If(stmt) => {
                stmt.condition.contains_error()
                    || stmt.consequent.iter().any(Stmt::contains_error)
                    || stmt
                        .alternate
                        .as_ref()
                        .is_some_and(|alternate| alternate.iter().any(Stmt::contains_error))
            }
            Stmt::Loop(stmt) => {
                stmt.condition.as_ref().is_some_and(Expr::contains_error)
                    || stmt.body.iter().any(Stmt::contains_error)
            }
            Stmt::Return(stmt) => stmt.value.as_ref().is_some_and(Expr::contains_error),
            Stmt::TypeAlias(_) | Stmt::Break(_) | Stmt::Continue(_) => false,
        }
    }
}

/// Expression
///
/// A closed set of expression kinds. `Error` stands in for an expression the
/// parser could not build so that parsing can continue.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(SymbolExpr),
    Int(IntExpr),
    Float(FloatExpr),
    String(StringExpr),
    Bool(BoolExpr),
    Null(NullExpr),
    Undefined(UndefinedExpr),
    Array(ArrayExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Conditional(ConditionalExpr),
    Member(MemberExpr),
    Error(ErrorExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Identifier(expr) => &expr.span,
            Expr::Int(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::Null(expr) => &expr.span,
            Expr::Undefined(expr) => &expr.span,
            Expr::Array(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Assignment(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
            Expr::Conditional(expr) => &expr.span,
            Expr::Member(expr) => &expr.span,
            Expr::Error(expr) => &expr.span,
        }
    }

    /// Short name of the expression kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Identifier(_) => "identifier",
            Expr::Int(_) => "int literal",
            Expr::Float(_) => "float literal",
            Expr::String(_) => "string literal",
            Expr::Bool(_) => "bool literal",
            Expr::Null(_) => "null",
            Expr::Undefined(_) => "undefined",
            Expr::Array(_) => "array literal",
            Expr::Unary(_) => "unary expression",
            Expr::Binary(_) => "binary expression",
            Expr::Assignment(_) => "assignment",
            Expr::Call(_) => "call expression",
            Expr::Conditional(_) => "conditional expression",
            Expr::Member(_) => "member expression",
            Expr::Error(_) => "error",
        }
    }

    pub fn contains_error(&self) -> bool {
        match self {
            Expr::Error(_) => true,
            Expr::Array(expr) => expr.elements.iter().any(Expr::contains_error),
            Expr::Unary(expr) => expr.operand.contains_error(),
            Expr::Binary(expr) => expr.left.contains_error() || expr.right.contains_error(),
            Expr::Assignment(expr) => {
                expr.assignee.contains_error() || expr.value.contains_error()
            }
            Expr::Call(expr) => {
                expr.callee.contains_error() || expr.arguments.iter().any(Expr::contains_error)
            }
            Expr::Conditional(expr) => {
                expr.condition.contains_error()
                    || expr.consequent.contains_error()
                    || expr.alternate.contains_error()
            }
            Expr::Member(expr) => expr.object.contains_error() || expr.property.contains_error(),
            Expr::Identifier(_)
            | Expr::Int(_)
            | Expr::Float(_)
            | Expr::String(_)
            | Expr::Bool(_)
            | Expr::Null(_)
            | Expr::Undefined(_) => false,
        }
    }
}

/// Type
///
/// Type expressions as written in annotations and alias declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Keyword(KeywordType),
    Literal(LiteralType),
    Alias(AliasType),
    Array(ArrayType),
    Union(UnionType),
    Intersection(IntersectionType),
    Function(FunctionType),
    Struct(StructType),
}

impl Type {
    pub fn get_span(&self) -> &Span {
        match self {
            Type::Keyword(ty) => &ty.span,
            Type::Literal(ty) => &ty.span,
            Type::Alias(ty) => &ty.span,
            Type::Array(ty) => &ty.span,
            Type::Union(ty) => &ty.span,
            Type::Intersection(ty) => &ty.span,
            Type::Function(ty) => &ty.span,
            Type::Struct(ty) => &ty.span,
        }
    }

    /// Whether an alias reference remains anywhere in this type.
    pub fn has_alias(&self) -> bool {
        match self {
            Type::Alias(_) => true,
            Type::Keyword(_) | Type::Literal(_) => false,
            Type::Array(ty) => ty.element.has_alias(),
            Type::Union(UnionType { members, .. })
            | Type::Intersection(IntersectionType { members, .. }) => {
                members.iter().any(Type::has_alias)
            }
            Type::Function(ty) => {
                ty.parameters.iter().any(|param| param.ty.has_alias()) || ty.return_type.has_alias()
            }
            Type::Struct(ty) => ty.members.iter().any(|member| match member {
                Member::Property(property) => property.ty.has_alias(),
                Member::Method(method) => {
                    method.parameters.iter().any(|param| param.ty.has_alias())
                        || method.return_type.has_alias()
                }
            }),
        }
    }
}

/// A named, typed parameter of a function, function type or method signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}
