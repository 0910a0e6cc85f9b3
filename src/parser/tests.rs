//! Unit tests for the parser module.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, Stmt, Type},
        expressions::{BinaryExpr, SymbolExpr},
        statements::ProgramStmt,
        types::{Keyword, Literals, Member},
    },
    errors::errors::{Error, ErrorCategory, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::{
    lookups::{BindingPower, Lookups},
    parser::{parse, parse_with, Parser},
    types::parse_type,
};

fn parse_source(source: &str) -> (ProgramStmt, Vec<Error>) {
    let tokens = tokenize(source.to_string(), Some("test.fs".to_string())).unwrap();
    parse(tokens, Rc::new("test.fs".to_string()))
}

fn parse_ok(source: &str) -> Vec<Stmt> {
    let (program, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    program.body
}

fn parse_single_expr(source: &str) -> Expr {
    let mut body = parse_ok(source);
    assert_eq!(body.len(), 1);
    match body.remove(0) {
        Stmt::Expression(stmt) => stmt.expression,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

fn parse_type_source(source: &str) -> Type {
    let tokens = tokenize(source.to_string(), Some("test.fs".to_string())).unwrap();
    let lookups = Lookups::new();
    let mut parser = Parser::new(tokens, Rc::new("test.fs".to_string()), &lookups);
    let ty = parse_type(&mut parser, BindingPower::Default).unwrap();
    assert!(!parser.has_tokens(), "type did not consume all input");
    ty
}

fn binary_parts(expr: &Expr) -> (&Expr, TokenKind, &Expr) {
    match expr {
        Expr::Binary(BinaryExpr {
            left,
            operator,
            right,
            ..
        }) => (left, operator.kind, right),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

fn identifier(expr: &Expr) -> &str {
    match expr {
        Expr::Identifier(SymbolExpr { value, .. }) => value,
        other => panic!("expected an identifier, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declarations() {
    let body = parse_ok("let x = 42; var y; const PI: float = 3.14");

    assert_eq!(body.len(), 3);
    match &body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier, "x");
            assert!(!decl.constant);
            assert!(matches!(decl.assigned_value, Some(Expr::Int(_))));
        }
        other => panic!("unexpected {:?}", other),
    }
    match &body[1] {
        Stmt::VarDecl(decl) => assert!(decl.assigned_value.is_none()),
        other => panic!("unexpected {:?}", other),
    }
    match &body[2] {
        Stmt::VarDecl(decl) => {
            assert!(decl.constant);
            assert!(matches!(&decl.explicit_type, Some(Type::Keyword(ty)) if ty.keyword == Keyword::Float));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_const_without_value_parses() {
    // Rejected when evaluated, not when parsed
    let body = parse_ok("const x;");
    assert!(matches!(&body[0], Stmt::VarDecl(decl) if decl.constant && decl.assigned_value.is_none()));
}

#[test]
fn test_precedence() {
    let expr = parse_single_expr("1 + 2 * 3");

    let (left, operator, right) = binary_parts(&expr);
    assert!(matches!(left, Expr::Int(int) if int.value == 1));
    assert_eq!(operator, TokenKind::Plus);
    let (_, operator, _) = binary_parts(right);
    assert_eq!(operator, TokenKind::Star);
}

#[test]
fn test_grouping_overrides_precedence() {
    let expr = parse_single_expr("(1 + 2) * 3");

    let (left, operator, _) = binary_parts(&expr);
    assert_eq!(operator, TokenKind::Star);
    let (_, operator, _) = binary_parts(left);
    assert_eq!(operator, TokenKind::Plus);
}

#[test]
fn test_left_associativity() {
    let expr = parse_single_expr("a - b - c");

    let (left, _, right) = binary_parts(&expr);
    assert_eq!(identifier(right), "c");
    let (inner_left, _, inner_right) = binary_parts(left);
    assert_eq!(identifier(inner_left), "a");
    assert_eq!(identifier(inner_right), "b");
}

#[test]
fn test_assignment_is_right_associative() {
    let expr = parse_single_expr("a = b = 3");

    match expr {
        Expr::Assignment(assignment) => {
            assert_eq!(identifier(&assignment.assignee), "a");
            assert!(matches!(*assignment.value, Expr::Assignment(_)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_logical_binds_looser_than_relational() {
    let expr = parse_single_expr("a < b && c == d");

    let (left, operator, right) = binary_parts(&expr);
    assert_eq!(operator, TokenKind::And);
    assert_eq!(binary_parts(left).1, TokenKind::Less);
    assert_eq!(binary_parts(right).1, TokenKind::Equals);
}

#[test]
fn test_call_and_member_chain() {
    // f(x).y(z) is ((f(x)).y)(z)
    let expr = parse_single_expr("f(x).y(z)");

    let Expr::Call(outer) = expr else {
        panic!("expected a call");
    };
    assert_eq!(outer.arguments.len(), 1);
    let Expr::Member(member) = *outer.callee else {
        panic!("expected a member expression");
    };
    assert!(!member.computed);
    assert_eq!(identifier(&member.property), "y");
    assert!(matches!(*member.object, Expr::Call(_)));
}

#[test]
fn test_computed_member_and_array_literal() {
    let expr = parse_single_expr("[1, 2.5, \"three\"][0]");

    let Expr::Member(member) = expr else {
        panic!("expected a member expression");
    };
    assert!(member.computed);
    match *member.object {
        Expr::Array(array) => assert_eq!(array.elements.len(), 3),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_unary_expressions() {
    let Expr::Unary(unary) = parse_single_expr("-x") else {
        panic!("expected unary");
    };
    assert!(unary.prefix);
    assert_eq!(unary.operator.kind, TokenKind::Dash);

    let Expr::Unary(unary) = parse_single_expr("x++") else {
        panic!("expected unary");
    };
    assert!(!unary.prefix);
    assert_eq!(unary.operator.kind, TokenKind::PlusPlus);

    // Prefix minus applies after the postfix increment
    let Expr::Unary(unary) = parse_single_expr("-x--") else {
        panic!("expected unary");
    };
    assert_eq!(unary.operator.kind, TokenKind::Dash);
    assert!(matches!(*unary.operand, Expr::Unary(ref inner) if !inner.prefix));
}

#[test]
fn test_conditional_expression() {
    let Expr::Conditional(conditional) = parse_single_expr("a ? 1 : b ? 2 : 3") else {
        panic!("expected a conditional");
    };
    assert_eq!(identifier(&conditional.condition), "a");
    assert!(matches!(*conditional.alternate, Expr::Conditional(_)));
}

#[test]
fn test_type_keywords_are_callable_names() {
    let Expr::Call(call) = parse_single_expr("int(\"5\")") else {
        panic!("expected a call");
    };
    assert_eq!(identifier(&call.callee), "int");
}

#[test]
fn test_optional_semicolons() {
    let body = parse_ok("let a = 1\nlet b = 2\na + b\nprint(a)");
    assert_eq!(body.len(), 4);
}

#[test]
fn test_parse_function_declaration() {
    let body = parse_ok("fun add(a: int, b: int): int { return a + b }");

    let Stmt::FnDecl(function) = &body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(function.name, "add");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[1].name, "b");
    assert!(matches!(&function.return_type, Type::Keyword(ty) if ty.keyword == Keyword::Int));
    assert!(matches!(function.body[0], Stmt::Return(_)));
}

#[test]
fn test_function_defaults_to_void_and_single_statement_body() {
    let body = parse_ok("fun greet(name: string) print(name)");

    let Stmt::FnDecl(function) = &body[0] else {
        panic!("expected a function declaration");
    };
    assert!(matches!(&function.return_type, Type::Keyword(ty) if ty.keyword == Keyword::Void));
    assert_eq!(function.body.len(), 1);
}

#[test]
fn test_parse_if_else_if_chain() {
    let body = parse_ok("if x > 0 { 1 } else if x < 0 { 2 } else { 3 }");

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("expected an if statement");
    };
    let alternate = if_stmt.alternate.as_ref().unwrap();
    assert_eq!(alternate.len(), 1);
    let Stmt::If(nested) = &alternate[0] else {
        panic!("expected a nested if");
    };
    assert!(nested.alternate.is_some());
}

#[test]
fn test_parse_loops() {
    let body = parse_ok("loop { break } while i < 10 { i++; continue; }");

    assert!(matches!(&body[0], Stmt::Loop(stmt) if stmt.condition.is_none()));
    assert!(matches!(&body[1], Stmt::Loop(stmt) if stmt.condition.is_some() && stmt.body.len() == 2));
}

#[test]
fn test_control_flow_outside_scope() {
    let (_, errors) = parse_source("break; continue; return 1;");

    assert_eq!(errors.len(), 3);
    for error in &errors {
        assert!(matches!(error.get_impl(), ErrorImpl::ControlFlowOutsideScope { .. }));
        assert_eq!(error.get_category(), ErrorCategory::Syntax);
    }
}

#[test]
fn test_loop_does_not_enclose_function_body() {
    let (_, errors) = parse_source("while true { fun f() { break } }");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_error_recovery_accumulates() {
    let (program, errors) = parse_source("let = 5; let y = ; print(1)");

    assert_eq!(errors.len(), 2);
    assert_eq!(program.body.len(), 3);
    assert!(program.body[0].contains_error());
    assert!(program.body[1].contains_error());
    assert!(!program.body[2].contains_error());
}

#[test]
fn test_error_recovery_inside_block() {
    let (program, errors) = parse_source("{ let x = ); x } let z = 1");

    assert_eq!(errors.len(), 1);
    assert_eq!(program.body.len(), 2);
    let Stmt::Block(block) = &program.body[0] else {
        panic!("expected a block");
    };
    assert_eq!(block.body.len(), 2);
    assert!(matches!(program.body[1], Stmt::VarDecl(_)));
}

#[test]
fn test_error_recovery_inside_struct_type() {
    let (program, errors) = parse_source("{ let x: struct { a: } = 1; print(1) } let z = 1");

    assert_eq!(errors.len(), 1);
    assert_eq!(program.body.len(), 2);
    let Stmt::Block(block) = &program.body[0] else {
        panic!("expected a block");
    };
    assert_eq!(block.body.len(), 2);
    assert!(matches!(block.body[1], Stmt::Expression(_)));
    assert!(matches!(program.body[1], Stmt::VarDecl(_)));
}

#[test]
fn test_missing_close_paren() {
    let (_, errors) = parse_source("print(1, 2");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].get_impl(),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::Comma,
            received: TokenKind::EOF,
            ..
        }
    ));
}

#[test]
fn test_missing_parameter_separator() {
    let (_, errors) = parse_source("fun f(a: int b: int) {}");

    assert_eq!(errors.len(), 1);
    let error = &errors[0];
    assert!(matches!(
        error.get_impl(),
        ErrorImpl::ExpectedToken {
            expected: TokenKind::Comma,
            received: TokenKind::Identifier,
            ..
        }
    ));
    assert_eq!(error.get_position().0, 13);
}

#[test]
fn test_unexpected_token_reports_span() {
    let (_, errors) = parse_source("let x = 1 + *");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_span().start.0, 12);
    assert_eq!(errors[0].get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_type_alias_statement() {
    let body = parse_ok("type Id = int | string");

    let Stmt::TypeAlias(alias) = &body[0] else {
        panic!("expected a type alias");
    };
    assert_eq!(alias.name, "Id");
    assert!(matches!(&alias.ty, Type::Union(union) if union.members.len() == 2));
}

#[test]
fn test_union_and_intersection_precedence() {
    // & binds tighter than |, and chains flatten
    let Type::Union(union) = parse_type_source("A | B & C | D") else {
        panic!("expected a union");
    };
    assert_eq!(union.members.len(), 3);
    assert!(matches!(&union.members[1], Type::Intersection(intersection) if intersection.members.len() == 2));
}

#[test]
fn test_array_and_grouped_types() {
    let Type::Array(array) = parse_type_source("int[]") else {
        panic!("expected an array type");
    };
    assert!(matches!(*array.element, Type::Keyword(_)));

    let Type::Array(array) = parse_type_source("(int | string)[]") else {
        panic!("expected an array type");
    };
    assert!(matches!(*array.element, Type::Union(_)));
}

#[test]
fn test_literal_types() {
    let Type::Union(union) = parse_type_source("1 | 2.5 | \"north\" | true") else {
        panic!("expected a union");
    };
    let literals: Vec<Literals> = union
        .members
        .into_iter()
        .map(|member| match member {
            Type::Literal(literal) => literal.literal,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(
        literals,
        vec![
            Literals::Int(1),
            Literals::Float(2.5),
            Literals::String("north".to_string()),
            Literals::Bool(true),
        ]
    );
}

#[test]
fn test_function_types() {
    let Type::Function(function) = parse_type_source("fun(a: int, b: string): bool") else {
        panic!("expected a function type");
    };
    assert_eq!(function.parameters.len(), 2);
    assert!(matches!(*function.return_type, Type::Keyword(ref ty) if ty.keyword == Keyword::Bool));

    assert!(matches!(
        parse_type_source("fun"),
        Type::Keyword(ty) if ty.keyword == Keyword::Fun
    ));
}

#[test]
fn test_struct_type() {
    let Type::Struct(structure) = parse_type_source("struct { name: string, greet(other: Person): void, age: int }")
    else {
        panic!("expected a struct type");
    };

    assert_eq!(structure.members.len(), 3);
    assert!(matches!(&structure.members[0], Member::Property(property) if property.name == "name"));
    assert!(matches!(&structure.members[1], Member::Method(method) if method.parameters.len() == 1));
}

#[test]
fn test_type_display() {
    let ty = parse_type_source("struct { a: int[], m(x: A | B): 1 }");
    assert_eq!(ty.to_string(), "struct { a: int[], m(x: A | B): 1 }");

    let ty = parse_type_source("(A | B) & C");
    assert_eq!(ty.to_string(), "(A | B) & C");
}

#[test]
fn test_parse_with_custom_lookups() {
    let tokens = tokenize("1 + 2".to_string(), None).unwrap();
    let lookups = Lookups::new();
    let (program, errors) = parse_with(tokens, Rc::new("shell".to_string()), &lookups);

    assert!(errors.is_empty());
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("// only a comment").is_empty());
}
