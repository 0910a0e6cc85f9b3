//! Type expressions.
//!
//! These are the shapes produced by the type sub-grammar. Keywords and
//! literal types are canonical as written; aliases are names that the
//! type resolver replaces with the type they were declared as.

use std::fmt::Display;

use crate::Span;

use super::ast::{Param, Type};

/// The primitive type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Int,
    Float,
    String,
    Bool,
    Null,
    Undefined,
    Object,
    Array,
    Any,
    Void,
    Fun,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Keyword::Int => "int",
            Keyword::Float => "float",
            Keyword::String => "string",
            Keyword::Bool => "bool",
            Keyword::Null => "null",
            Keyword::Undefined => "undefined",
            Keyword::Object => "object",
            Keyword::Array => "array",
            Keyword::Any => "any",
            Keyword::Void => "void",
            Keyword::Fun => "fun",
        };
        write!(f, "{}", name)
    }
}

/// An exact value used as a type, e.g. `42` or `"north"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literals {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordType {
    pub keyword: Keyword,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralType {
    pub literal: Literals,
    pub span: Span,
}

/// A reference to a type alias by name, not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasType {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub members: Vec<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionType {
    pub members: Vec<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<Param>,
    pub return_type: Box<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub members: Vec<Member>,
    pub span: Span,
}

/// A struct member: either a typed property or a method signature.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(PropertySignature),
    Method(MethodSignature),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: Type,
    pub span: Span,
}

fn write_params(f: &mut std::fmt::Formatter<'_>, parameters: &[Param]) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", param.name, param.ty)?;
    }
    write!(f, ")")
}

fn write_joined(f: &mut std::fmt::Formatter<'_>, members: &[Type], separator: &str) -> std::fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", separator)?;
        }
        write!(f, "{}", member)?;
    }
    Ok(())
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Keyword(ty) => write!(f, "{}", ty.keyword),
            Type::Literal(ty) => match &ty.literal {
                Literals::Int(value) => write!(f, "{}", value),
                Literals::Float(value) => write!(f, "{:?}", value),
                Literals::String(value) => write!(f, "{:?}", value),
                Literals::Bool(value) => write!(f, "{}", value),
            },
            Type::Alias(ty) => write!(f, "{}", ty.name),
            Type::Array(ty) => match ty.element.as_ref() {
                Type::Union(_) | Type::Intersection(_) | Type::Function(_) => {
                    write!(f, "({})[]", ty.element)
                }
                element => write!(f, "{}[]", element),
            },
            Type::Union(ty) => write_joined(f, &ty.members, "|"),
            Type::Intersection(ty) => {
                for (i, member) in ty.members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    match member {
                        Type::Union(_) => write!(f, "({})", member)?,
                        _ => write!(f, "{}", member)?,
                    }
                }
                Ok(())
            }
            Type::Function(ty) => {
                write!(f, "fun")?;
                write_params(f, &ty.parameters)?;
                write!(f, ": {}", ty.return_type)
            }
            Type::Struct(ty) => {
                if ty.members.is_empty() {
                    return write!(f, "struct {{}}");
                }

                write!(f, "struct {{ ")?;
                for (i, member) in ty.members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match member {
                        Member::Property(property) => write!(f, "{}: {}", property.name, property.ty)?,
                        Member::Method(method) => {
                            write!(f, "{}", method.name)?;
                            write_params(f, &method.parameters)?;
                            write!(f, ": {}", method.return_type)?;
                        }
                    }
                }
                write!(f, " }}")
            }
        }
    }
}
