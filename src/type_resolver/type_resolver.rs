use crate::{
    ast::{
        ast::{Param, Type},
        types::{
            ArrayType, FunctionType, IntersectionType, Keyword, KeywordType, Member, MethodSignature,
            PropertySignature, StructType, UnionType,
        },
    },
    errors::errors::{Error, ErrorImpl},
    interpreter::{environment::Environment, values::RuntimeVal},
    Span,
};

/// Expands every alias in `ty` using the bindings visible from `env`.
///
/// The result contains no `Type::Alias` nodes. Resolving an already
/// resolved type returns an equal type.
pub fn resolve_type(ty: &Type, env: &Environment) -> Result<Type, Error> {
    match ty {
        Type::Keyword(_) | Type::Literal(_) => Ok(ty.clone()),
        Type::Alias(alias) => {
            let binding = env.lookup(&alias.name, &alias.span)?;
            match binding.value {
                RuntimeVal::TypeAlias(target) => resolve_type(&target.ty, env),
                other => Err(Error::new(
                    ErrorImpl::NotATypeAlias {
                        name: alias.name.clone(),
                        received: other.kind_name().to_string(),
                    },
                    alias.span.clone(),
                )),
            }
        }
        Type::Array(array) => Ok(Type::Array(ArrayType {
            element: Box::new(resolve_type(&array.element, env)?),
            span: array.span.clone(),
        })),
        Type::Union(union) => Ok(Type::Union(UnionType {
            members: resolve_all(&union.members, env)?,
            span: union.span.clone(),
        })),
        Type::Intersection(intersection) => Ok(Type::Intersection(IntersectionType {
            members: resolve_all(&intersection.members, env)?,
            span: intersection.span.clone(),
        })),
        Type::Function(function) => Ok(Type::Function(FunctionType {
            parameters: resolve_params(&function.parameters, env)?,
            return_type: Box::new(resolve_type(&function.return_type, env)?),
            span: function.span.clone(),
        })),
        Type::Struct(structure) => {
            let members = structure
                .members
                .iter()
                .map(|member| resolve_member(member, env))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Type::Struct(StructType {
                members,
                span: structure.span.clone(),
            }))
        }
    }
}

fn resolve_all(types: &[Type], env: &Environment) -> Result<Vec<Type>, Error> {
    types.iter().map(|ty| resolve_type(ty, env)).collect()
}

fn resolve_params(params: &[Param], env: &Environment) -> Result<Vec<Param>, Error> {
    params
        .iter()
        .map(|param| {
            Ok(Param {
                name: param.name.clone(),
                ty: resolve_type(&param.ty, env)?,
                span: param.span.clone(),
            })
        })
        .collect()
}

fn resolve_member(member: &Member, env: &Environment) -> Result<Member, Error> {
    Ok(match member {
        Member::Property(property) => Member::Property(PropertySignature {
            name: property.name.clone(),
            ty: resolve_type(&property.ty, env)?,
            span: property.span.clone(),
        }),
        Member::Method(method) => Member::Method(MethodSignature {
            name: method.name.clone(),
            parameters: resolve_params(&method.parameters, env)?,
            return_type: resolve_type(&method.return_type, env)?,
            span: method.span.clone(),
        }),
    })
}

fn keyword(keyword: Keyword, span: &Span) -> Type {
    Type::Keyword(KeywordType {
        keyword,
        span: span.clone(),
    })
}

/// The type describing a runtime value.
///
/// Arrays whose elements all share one type get that element type, any
/// other array is `any[]`. User functions keep their declared signature.
pub fn infer_type(value: &RuntimeVal, span: Span) -> Type {
    match value {
        RuntimeVal::Int(_) => keyword(Keyword::Int, &span),
        RuntimeVal::Float(_) => keyword(Keyword::Float, &span),
        RuntimeVal::String(_) => keyword(Keyword::String, &span),
        RuntimeVal::Bool(_) => keyword(Keyword::Bool, &span),
        RuntimeVal::Null => keyword(Keyword::Null, &span),
        RuntimeVal::Undefined => keyword(Keyword::Undefined, &span),
        RuntimeVal::Array(elements) => {
            let element_types: Vec<Type> = elements
                .iter()
                .map(|element| infer_type(element, span.clone()))
                .collect();
            let element = match element_types.split_first() {
                Some((first, rest)) if rest.iter().all(|other| other == first) => first.clone(),
                _ => keyword(Keyword::Any, &span),
            };

            Type::Array(ArrayType {
                element: Box::new(element),
                span,
            })
        }
        RuntimeVal::Function(function) => Type::Function(FunctionType {
            parameters: function.parameters.clone(),
            return_type: Box::new(function.return_type.clone()),
            span,
        }),
        RuntimeVal::NativeFunction(_) => keyword(Keyword::Fun, &span),
        RuntimeVal::TypeAlias(alias) => alias.ty.clone(),
    }
}
