use crate::{
    ast::{
        ast::{Stmt, Type},
        statements::{
            BlockStmt, BreakStmt, ContinueStmt, ExpressionStmt, FnDeclStmt, IfStmt, LoopStmt, ReturnStmt,
            TypeAliasStmt, VarDeclStmt,
        },
        types::{Keyword, KeywordType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{
    parser::{parse_stmt_recovering, Parser},
    types::{parse_params, parse_type},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.lookups().stmt.get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.consume_semicolon();

    Ok(Stmt::Expression(ExpressionStmt {
        span: expression.get_span().clone(),
        expression,
    }))
}

/// Parses `{ ... }`, recovering from errors in the statements inside it.
/// Returns the statements and the span of the whole block.
fn parse_block_body(parser: &mut Parser) -> Result<(Vec<Stmt>, Span), Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span;
    parser.enter_block();

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt_recovering(parser));
    }

    parser.expect(TokenKind::CloseCurly)?;
    parser.exit_block();

    Ok((body, parser.span_from(&start)))
}

/// A body is either a block or a single statement.
fn parse_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        let (body, _) = parse_block_body(parser)?;
        return Ok(body);
    }

    Ok(vec![parse_stmt(parser)?])
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (body, span) = parse_block_body(parser)?;

    Ok(Stmt::Block(BlockStmt { body, span }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance();
    let constant = start_token.kind == TokenKind::Const;

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: format!("expected variable name after `{}`", start_token.value),
        },
        parser.current_token().span.clone(),
    );
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let explicit_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.consume_semicolon();

    Ok(Stmt::VarDecl(VarDeclStmt {
        span: parser.span_from(&start_token.span),
        identifier,
        constant,
        assigned_value,
        explicit_type,
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_params(parser, TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        parse_type(parser, BindingPower::Default)?
    } else {
        Type::Keyword(KeywordType {
            keyword: Keyword::Void,
            span: name.span.clone(),
        })
    };

    let outer_loops = parser.enter_function();
    let body = parse_body(parser);
    parser.exit_function(outer_loops);

    Ok(Stmt::FnDecl(FnDeclStmt {
        span: parser.span_from(&start),
        name: name.value,
        parameters,
        body: body?,
        return_type,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.consume_semicolon();
    let consequent = parse_body(parser)?;

    let alternate = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(vec![parse_if_stmt(parser)?])
        } else {
            Some(parse_body(parser)?)
        }
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        span: parser.span_from(&start),
        condition,
        consequent,
        alternate,
    }))
}

pub fn parse_type_alias_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span;

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Assignment)?;
    let ty = parse_type(parser, BindingPower::Default)?;
    parser.consume_semicolon();

    Ok(Stmt::TypeAlias(TypeAliasStmt {
        span: parser.span_from(&start),
        name,
        ty,
    }))
}

/// `loop body` or `while condition body`.
pub fn parse_loop_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance();

    let condition = if start_token.kind == TokenKind::While {
        let condition = parse_expr(parser, BindingPower::Default)?;
        parser.consume_semicolon();
        Some(condition)
    } else {
        None
    };

    parser.enter_loop();
    let body = parse_body(parser);
    parser.exit_loop();

    Ok(Stmt::Loop(LoopStmt {
        span: parser.span_from(&start_token.span),
        condition,
        body: body?,
    }))
}

fn control_flow_outside_scope(keyword: &str, span: Span) -> Error {
    Error::new(
        ErrorImpl::ControlFlowOutsideScope {
            keyword: keyword.to_string(),
        },
        span,
    )
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    if !parser.in_loop() {
        return Err(control_flow_outside_scope(&token.value, token.span));
    }
    parser.consume_semicolon();

    Ok(Stmt::Break(BreakStmt { span: token.span }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    if !parser.in_loop() {
        return Err(control_flow_outside_scope(&token.value, token.span));
    }
    parser.consume_semicolon();

    Ok(Stmt::Continue(ContinueStmt { span: token.span }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance();
    if !parser.in_function() {
        return Err(control_flow_outside_scope(&start.value, start.span));
    }

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF => None,
        _ => Some(parse_expr(parser, BindingPower::Default)?),
    };
    parser.consume_semicolon();

    Ok(Stmt::Return(ReturnStmt {
        span: parser.span_from(&start.span),
        value,
    }))
}
