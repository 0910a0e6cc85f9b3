//! Integration tests for the full pipeline.
//!
//! These tests run source text through tokenization, parsing, type alias
//! resolution and evaluation using only the public API.

use std::rc::Rc;

use finescript::{
    ast::{
        ast::Type,
        types::{AliasType, Keyword},
    },
    errors::errors::{Error, ErrorCategory, ErrorImpl},
    interpreter::{
        environment::Environment,
        interpreter::{evaluate_program, interpret},
        native::create_global_environment,
        values::RuntimeVal,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_resolver::type_resolver::resolve_type,
    Span,
};

fn eval(source: &str) -> Result<RuntimeVal, Error> {
    let env = create_global_environment();
    interpret(source, Some("test.fs".to_string()), &env).map_err(|mut errors| errors.remove(0))
}

#[test]
fn test_precedence() {
    assert_eq!(eval("1 + 2 * 3").unwrap(), RuntimeVal::Float(7.0));
    assert_eq!(eval("(1 + 2) * 3").unwrap(), RuntimeVal::Float(9.0));
}

#[test]
fn test_associativity() {
    assert_eq!(eval("10 - 3 - 2").unwrap(), RuntimeVal::Float(5.0));
}

#[test]
fn test_scoping() {
    let error = eval("if true { let inner = 1; } inner").unwrap_err();
    assert_eq!(error.get_category(), ErrorCategory::Name);

    let source = "
        let name = \"outer\";
        fun shadow() { let name = \"inner\"; name }
        shadow();
        name
    ";
    assert_eq!(eval(source).unwrap(), RuntimeVal::String("outer".to_string()));
}

#[test]
fn test_constants() {
    let error = eval("const x = 1; x = 2").unwrap_err();
    assert_eq!(error.get_category(), ErrorCategory::Name);

    let error = eval("const x;").unwrap_err();
    assert_eq!(error.get_category(), ErrorCategory::Name);
}

#[test]
fn test_arity() {
    let declare = "fun pair(a: int, b: int) { a * b } ";

    assert_eq!(eval(&format!("{}pair(2, 3)", declare)).unwrap(), RuntimeVal::Float(6.0));
    for call in ["pair(1)", "pair(1, 2, 3)"] {
        let error = eval(&format!("{}{}", declare, call)).unwrap_err();
        assert_eq!(error.get_category(), ErrorCategory::Type);
    }
}

#[test]
fn test_string_repetition() {
    assert_eq!(eval("\"ab\" * 3").unwrap(), RuntimeVal::String("ababab".to_string()));
    assert_eq!(eval("3 * \"ab\"").unwrap_err().get_category(), ErrorCategory::Type);
}

#[test]
fn test_type_alias_round_trip() {
    let env = create_global_environment();
    interpret("type T = int; let y: T = 5", None, &env).unwrap();

    let alias = Type::Alias(AliasType {
        name: "T".to_string(),
        span: Span::null(),
    });
    let resolved = resolve_type(&alias, &env).unwrap();
    assert!(matches!(resolved, Type::Keyword(ref ty) if ty.keyword == Keyword::Int));
    assert!(!resolved.has_alias());
    assert_eq!(eval("type T = int; let y: T = 5; y").unwrap(), RuntimeVal::Int(5));
}

#[test]
fn test_idempotent_resolution() {
    let env = Environment::new();
    interpret("type A = int; type B = A;", None, &env).unwrap();

    let alias = Type::Alias(AliasType {
        name: "B".to_string(),
        span: Span::null(),
    });
    let once = resolve_type(&alias, &env).unwrap();
    let twice = resolve_type(&once, &env).unwrap();

    assert_eq!(once, twice);
    assert_eq!(once.to_string(), "int");
}

#[test]
fn test_closure_capture() {
    let source = "
        fun outer() {
            let secret = \"captured\";
            fun inner() { secret }
            inner
        }
        let f = outer();
        fun caller() { let secret = \"caller\"; f() }
        caller()
    ";
    assert_eq!(eval(source).unwrap(), RuntimeVal::String("captured".to_string()));
}

#[test]
fn test_control_flow() {
    let source = "
        fun first_over(limit: int) {
            let i = 0;
            while true {
                i++;
                if i < limit { continue }
                return i
            }
        }
        let total = 0;
        loop {
            total += first_over(3);
            if total > 5 { break }
        }
        total
    ";
    assert_eq!(eval(source).unwrap(), RuntimeVal::Float(6.0));
}

#[test]
fn test_eval_builtin() {
    let source = "
        let program = \"let base = 10;\";
        eval(program);
        eval(\"base * 2\")
    ";
    assert_eq!(eval(source).unwrap(), RuntimeVal::Float(20.0));
}

#[test]
fn test_syntax_errors_accumulate() {
    let env = create_global_environment();
    let errors = interpret("let = 1;\nfun (a) {}\nprint(\"never\")", None, &env).unwrap_err();

    assert!(errors.len() >= 2);
    assert!(errors.iter().all(|error| error.get_category() == ErrorCategory::Syntax));
    assert!(!env.has_own("a"));
}

#[test]
fn test_unrecognised_character() {
    let error = eval("let x = 1 @ 2").unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnrecognisedToken {
            token: "@".to_string()
        }
    );
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_program_value_and_persistent_environment() {
    let env = create_global_environment();
    let tokens = tokenize("let xs = [1, 2, 3]; xs.length".to_string(), None).unwrap();
    let (program, errors) = parse(tokens, Rc::new("shell".to_string()));
    assert!(errors.is_empty());

    assert_eq!(evaluate_program(&program, &env).unwrap(), RuntimeVal::Int(3));
    assert_eq!(interpret("xs[2]", None, &env).unwrap(), RuntimeVal::Int(3));
}
