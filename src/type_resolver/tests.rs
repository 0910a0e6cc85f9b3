//! Unit tests for type resolution and inference.

use std::rc::Rc;

use crate::{
    ast::{
        ast::Type,
        types::{Keyword, KeywordType},
    },
    errors::errors::{ErrorCategory, ErrorImpl},
    interpreter::{environment::Environment, interpreter::interpret, values::RuntimeVal},
    lexer::lexer::tokenize,
    parser::{
        lookups::{BindingPower, Lookups},
        parser::Parser,
        types::parse_type,
    },
    Span,
};

use super::type_resolver::{infer_type, resolve_type};

fn parse_type_source(source: &str) -> Type {
    let tokens = tokenize(source.to_string(), Some("test.fs".to_string())).unwrap();
    let lookups = Lookups::new();
    let mut parser = Parser::new(tokens, Rc::new("test.fs".to_string()), &lookups);
    parse_type(&mut parser, BindingPower::Default).unwrap()
}

fn env_with(source: &str) -> Environment {
    let env = Environment::new();
    interpret(source, None, &env).unwrap();
    env
}

fn resolve_source(ty: &str, env: &Environment) -> Type {
    resolve_type(&parse_type_source(ty), env).unwrap()
}

#[test]
fn test_primitive_is_unchanged() {
    let env = Environment::new();
    let ty = parse_type_source("int");

    assert_eq!(resolve_type(&ty, &env).unwrap(), ty);
}

#[test]
fn test_alias_chain_flattens() {
    let env = env_with("type A = int; type B = A;");
    let resolved = resolve_source("B", &env);

    assert!(matches!(
        resolved,
        Type::Keyword(KeywordType {
            keyword: Keyword::Int,
            ..
        })
    ));
    assert!(!resolved.has_alias());
}

#[test]
fn test_resolution_is_idempotent() {
    let env = env_with("type A = int | string; type B = A[];");
    let once = resolve_source("B | fun(x: A): B", &env);
    let twice = resolve_type(&once, &env).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.to_string(), "(int | string)[] | fun(x: int | string): (int | string)[]");
}

#[test]
fn test_struct_members_resolve() {
    let env = env_with("type Id = int; type Name = string;");
    let resolved = resolve_source("struct { id: Id, rename(to: Name): Name }", &env);

    assert_eq!(resolved.to_string(), "struct { id: int, rename(to: string): string }");
}

#[test]
fn test_intersection_members_resolve() {
    let env = env_with("type A = struct { a: int }; type B = struct { b: float };");
    let resolved = resolve_source("A & B", &env);

    assert_eq!(resolved.to_string(), "struct { a: int } & struct { b: float }");
}

#[test]
fn test_value_is_not_a_type() {
    let env = env_with("let x = 5;");
    let error = resolve_type(&parse_type_source("x"), &env).unwrap_err();

    assert_eq!(error.get_category(), ErrorCategory::Type);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NotATypeAlias {
            name: "x".to_string(),
            received: "int".to_string(),
        }
    );
}

#[test]
fn test_unknown_alias() {
    let env = Environment::new();
    let error = resolve_type(&parse_type_source("Missing[]"), &env).unwrap_err();

    assert_eq!(error.get_category(), ErrorCategory::Name);
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
}

#[test]
fn test_alias_visible_from_child_scope() {
    let env = env_with("type A = bool;");
    let child = env.child().child();

    assert_eq!(resolve_source("A[]", &child).to_string(), "bool[]");
}

#[test]
fn test_infer_primitive_types() {
    let cases = [
        (RuntimeVal::Int(1), "int"),
        (RuntimeVal::Float(1.5), "float"),
        (RuntimeVal::String("a".to_string()), "string"),
        (RuntimeVal::Bool(true), "bool"),
        (RuntimeVal::Null, "null"),
        (RuntimeVal::Undefined, "undefined"),
    ];

    for (value, expected) in cases {
        assert_eq!(infer_type(&value, Span::null()).to_string(), expected);
    }
}

#[test]
fn test_infer_array_types() {
    let ints = RuntimeVal::Array(vec![RuntimeVal::Int(1), RuntimeVal::Int(2)]);
    let mixed = RuntimeVal::Array(vec![RuntimeVal::Int(1), RuntimeVal::String("a".to_string())]);
    let empty = RuntimeVal::Array(vec![]);

    assert_eq!(infer_type(&ints, Span::null()).to_string(), "int[]");
    assert_eq!(infer_type(&mixed, Span::null()).to_string(), "any[]");
    assert_eq!(infer_type(&empty, Span::null()).to_string(), "any[]");
}

#[test]
fn test_infer_function_signature() {
    let env = env_with("fun add(a: int, b: int): int { a + b }");
    let add = env.lookup("add", &Span::null()).unwrap().value;

    assert_eq!(infer_type(&add, Span::null()).to_string(), "fun(a: int, b: int): int");
}
