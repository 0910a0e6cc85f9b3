use std::fmt::Display;

use crate::{
    ast::ast::{Param, Stmt, Type},
    errors::errors::Error,
    Span,
};

use super::environment::Environment;

/// Signature of a host-provided builtin: the evaluated arguments, the
/// caller's environment and the span of the call.
pub type NativeFn = fn(Vec<RuntimeVal>, &Environment, &Span) -> Result<RuntimeVal, Error>;

/// A user-defined function and the environment it was declared in.
#[derive(Debug, Clone)]
pub struct FunctionVal {
    pub name: String,
    pub parameters: Vec<Param>,
    pub body: Vec<Stmt>,
    pub return_type: Type,
    pub declaration_env: Environment,
}

#[derive(Clone)]
pub struct NativeFunctionVal {
    pub name: String,
    pub call: NativeFn,
}

impl std::fmt::Debug for NativeFunctionVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunctionVal")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A declared type alias, stored already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasVal {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub enum RuntimeVal {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    Undefined,
    Array(Vec<RuntimeVal>),
    Function(FunctionVal),
    NativeFunction(NativeFunctionVal),
    TypeAlias(TypeAliasVal),
}

impl RuntimeVal {
    /// Name of the value's runtime kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeVal::Int(_) => "int",
            RuntimeVal::Float(_) => "float",
            RuntimeVal::String(_) => "string",
            RuntimeVal::Bool(_) => "bool",
            RuntimeVal::Null => "null",
            RuntimeVal::Undefined => "undefined",
            RuntimeVal::Array(_) => "array",
            RuntimeVal::Function(_) => "function",
            RuntimeVal::NativeFunction(_) => "native function",
            RuntimeVal::TypeAlias(_) => "type alias",
        }
    }
}

/// Structural equality for data values. Functions compare by name, since
/// their captured environments cannot be compared.
impl PartialEq for RuntimeVal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeVal::Int(a), RuntimeVal::Int(b)) => a == b,
            (RuntimeVal::Float(a), RuntimeVal::Float(b)) => a == b,
            (RuntimeVal::String(a), RuntimeVal::String(b)) => a == b,
            (RuntimeVal::Bool(a), RuntimeVal::Bool(b)) => a == b,
            (RuntimeVal::Null, RuntimeVal::Null) => true,
            (RuntimeVal::Undefined, RuntimeVal::Undefined) => true,
            (RuntimeVal::Array(a), RuntimeVal::Array(b)) => a == b,
            (RuntimeVal::Function(a), RuntimeVal::Function(b)) => a.name == b.name,
            (RuntimeVal::NativeFunction(a), RuntimeVal::NativeFunction(b)) => a.name == b.name,
            (RuntimeVal::TypeAlias(a), RuntimeVal::TypeAlias(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for RuntimeVal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeVal::Int(value) => write!(f, "{}", value),
            RuntimeVal::Float(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    write!(f, "{:.1}", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            RuntimeVal::String(value) => write!(f, "{}", value),
            RuntimeVal::Bool(value) => write!(f, "{}", value),
            RuntimeVal::Null => write!(f, "null"),
            RuntimeVal::Undefined => write!(f, "undefined"),
            RuntimeVal::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            RuntimeVal::Function(function) => {
                let params: Vec<&str> = function.parameters.iter().map(|param| param.name.as_str()).collect();
                write!(f, "{}({})", function.name, params.join(", "))
            }
            RuntimeVal::NativeFunction(function) => write!(f, "{}()", function.name),
            RuntimeVal::TypeAlias(alias) => write!(f, "type {} = {}", alias.name, alias.ty),
        }
    }
}
