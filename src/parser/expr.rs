use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AssignmentExpr, BinaryExpr, BoolExpr, CallExpr, ConditionalExpr, FloatExpr, IntExpr,
            MemberExpr, NullExpr, StringExpr, SymbolExpr, UnaryExpr, UndefinedExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token = parser.current_token();
    let Some(nud_fn) = parser.lookups().nud.get(&token.kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: format!("expected an expression, found {}", token.kind),
            },
            token.span.clone(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than `bp`, keep extending the lhs
    while parser.lookups().binding_power_of(parser.current_token_kind()) > bp {
        let token = parser.current_token();
        let Some(led_fn) = parser.lookups().led.get(&token.kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.clone(),
            ));
        };

        let operator_bp = parser.lookups().binding_power_of(token.kind);
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let span = token.span.clone();

    match token.kind {
        TokenKind::Int => match token.value.parse() {
            Ok(value) => Ok(Expr::Int(IntExpr { value, span })),
            Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, span)),
        },
        TokenKind::Float => match token.value.parse() {
            Ok(value) => Ok(Expr::Float(FloatExpr { value, span })),
            Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, span)),
        },
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.value,
            span,
        })),
        TokenKind::True | TokenKind::False => Ok(Expr::Bool(BoolExpr {
            value: token.kind == TokenKind::True,
            span,
        })),
        TokenKind::Null => Ok(Expr::Null(NullExpr { span })),
        TokenKind::Undefined => Ok(Expr::Undefined(UndefinedExpr { span })),
        TokenKind::Identifier
        | TokenKind::IntType
        | TokenKind::FloatType
        | TokenKind::StringType
        | TokenKind::BoolType => Ok(Expr::Identifier(SymbolExpr {
            value: token.value,
            span,
        })),
        _ => Err(Error::new(ErrorImpl::UnexpectedToken { token: token.value }, span)),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: left.get_span().to(right.get_span()),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: operator.span.to(operand.get_span()),
        operator,
        operand: Box::new(operand),
        prefix: true,
    }))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance();

    Ok(Expr::Unary(UnaryExpr {
        span: left.get_span().to(&operator.span),
        operator,
        operand: Box::new(left),
        prefix: false,
    }))
}

/// Assignment is right-associative: the value is parsed one level below
/// assignment so that `a = b = c` assigns `c` to both.
pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Assignment(AssignmentExpr {
        span: left.get_span().to(value.get_span()),
        assignee: Box::new(left),
        operator,
        value: Box::new(value),
    }))
}

pub fn parse_conditional_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let consequent = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let alternate = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::Conditional(ConditionalExpr {
        span: left.get_span().to(alternate.get_span()),
        condition: Box::new(left),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses comma separated expressions up to and including `closing`.
fn parse_expr_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    while parser.has_tokens() && parser.current_token_kind() != closing {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() != closing {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(closing)?;
    Ok(items)
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayExpr {
        elements,
        span: parser.span_from(&start),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span()),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let property = parser.expect(TokenKind::Identifier)?;

    Ok(Expr::Member(MemberExpr {
        span: left.get_span().to(&property.span),
        object: Box::new(left),
        property: Box::new(Expr::Identifier(SymbolExpr {
            value: property.value,
            span: property.span,
        })),
        computed: false,
    }))
}

pub fn parse_computed_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let property = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Member(MemberExpr {
        span: parser.span_from(left.get_span()),
        object: Box::new(left),
        property: Box::new(property),
        computed: true,
    }))
}
