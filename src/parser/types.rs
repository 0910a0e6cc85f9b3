//! Type parsing implementation.
//!
//! Type expressions have their own NUD/LED tables. They share tokens with
//! expressions but not their meaning: `|` and `&` build unions and
//! intersections here, and identifiers are alias references.

use crate::{
    ast::{
        ast::{Param, Type},
        types::{
            AliasType, ArrayType, FunctionType, IntersectionType, Keyword, KeywordType, LiteralType, Literals,
            Member, MethodSignature, PropertySignature, StructType, UnionType,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{BindingPower, Lookups},
    parser::Parser,
};

pub fn create_token_type_lookups(lookups: &mut Lookups) {
    lookups.type_nud(TokenKind::Identifier, parse_alias_type);
    lookups.type_nud(TokenKind::Struct, parse_struct_type);
    lookups.type_nud(TokenKind::Fun, parse_fun_type);
    lookups.type_nud(TokenKind::OpenParen, parse_grouping_type);

    for kind in [
        TokenKind::Null,
        TokenKind::Undefined,
        TokenKind::IntType,
        TokenKind::FloatType,
        TokenKind::StringType,
        TokenKind::BoolType,
        TokenKind::ObjectType,
        TokenKind::ArrayType,
        TokenKind::AnyType,
        TokenKind::VoidType,
    ] {
        lookups.type_nud(kind, parse_keyword_type);
    }

    for kind in [
        TokenKind::Int,
        TokenKind::Float,
        TokenKind::String,
        TokenKind::True,
        TokenKind::False,
    ] {
        lookups.type_nud(kind, parse_literal_type);
    }

    lookups.type_led(TokenKind::Pipe, BindingPower::Additive, parse_union_type);
    lookups.type_led(TokenKind::Ampersand, BindingPower::Multiplicative, parse_intersection_type);
    lookups.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<Type, Error> {
    // First parse NUD
    let token = parser.current_token();
    let Some(nud_fn) = parser.lookups().type_nud.get(&token.kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: format!("expected a type, found {}", token.kind),
            },
            token.span.clone(),
        ));
    };

    let mut left = nud_fn(parser)?;

    while parser.lookups().type_binding_power_of(parser.current_token_kind()) > bp {
        let token = parser.current_token();
        let Some(led_fn) = parser.lookups().type_led.get(&token.kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.clone(),
            ));
        };

        let operator_bp = parser.lookups().type_binding_power_of(token.kind);
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_alias_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(Type::Alias(AliasType {
        name: token.value,
        span: token.span,
    }))
}

pub fn parse_keyword_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance();

    let keyword = match token.kind {
        TokenKind::Null => Keyword::Null,
        TokenKind::Undefined => Keyword::Undefined,
        TokenKind::IntType => Keyword::Int,
        TokenKind::FloatType => Keyword::Float,
        TokenKind::StringType => Keyword::String,
        TokenKind::BoolType => Keyword::Bool,
        TokenKind::ObjectType => Keyword::Object,
        TokenKind::ArrayType => Keyword::Array,
        TokenKind::AnyType => Keyword::Any,
        TokenKind::VoidType => Keyword::Void,
        TokenKind::Fun => Keyword::Fun,
        _ => return Err(Error::new(ErrorImpl::UnexpectedToken { token: token.value }, token.span)),
    };

    Ok(Type::Keyword(KeywordType {
        keyword,
        span: token.span,
    }))
}

pub fn parse_literal_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance();
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.clone(),
        )
    };

    let literal = match token.kind {
        TokenKind::Int => Literals::Int(token.value.parse().map_err(|_| number_error())?),
        TokenKind::Float => Literals::Float(token.value.parse().map_err(|_| number_error())?),
        TokenKind::String => Literals::String(token.value.clone()),
        TokenKind::True => Literals::Bool(true),
        TokenKind::False => Literals::Bool(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.clone(),
            ))
        }
    };

    Ok(Type::Literal(LiteralType {
        literal,
        span: token.span.clone(),
    }))
}

pub fn parse_grouping_type(parser: &mut Parser) -> Result<Type, Error> {
    parser.advance();
    let ty = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(ty)
}

/// Parses an optional `: type` suffix, defaulting to `void`.
fn parse_return_type(parser: &mut Parser, fallback: &Span) -> Result<Type, Error> {
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        return parse_type(parser, BindingPower::Default);
    }

    Ok(Type::Keyword(KeywordType {
        keyword: Keyword::Void,
        span: fallback.clone(),
    }))
}

/// `fun(a: int): int` is a function type, a bare `fun` is the keyword type.
pub fn parse_fun_type(parser: &mut Parser) -> Result<Type, Error> {
    if parser.peek_kind() != TokenKind::OpenParen {
        return parse_keyword_type(parser);
    }

    let start = parser.advance().span;
    parser.expect(TokenKind::OpenParen)?;
    let parameters = parse_params(parser, TokenKind::CloseParen)?;
    let return_type = parse_return_type(parser, &start)?;

    Ok(Type::Function(FunctionType {
        parameters,
        return_type: Box::new(return_type),
        span: parser.span_from(&start),
    }))
}

/// `struct { name: type, method(param: type): type }`
pub fn parse_struct_type(parser: &mut Parser) -> Result<Type, Error> {
    let start = parser.advance().span;
    parser.expect(TokenKind::OpenCurly)?;

    let mut members = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        let error = Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a member name in struct type"),
            },
            parser.current_token().span.clone(),
        );
        let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

        if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            let ty = parse_type(parser, BindingPower::Default)?;
            members.push(Member::Property(PropertySignature {
                span: parser.span_from(&name.span),
                name: name.value,
                ty,
            }));
        } else {
            parser.expect(TokenKind::OpenParen)?;
            let parameters = parse_params(parser, TokenKind::CloseParen)?;
            let return_type = parse_return_type(parser, &name.span)?;
            members.push(Member::Method(MethodSignature {
                span: parser.span_from(&name.span),
                name: name.value,
                parameters,
                return_type,
            }));
        }

        if parser.current_token_kind() != TokenKind::CloseCurly {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Type::Struct(StructType {
        members,
        span: parser.span_from(&start),
    }))
}

pub fn parse_union_type(parser: &mut Parser, left: Type, bp: BindingPower) -> Result<Type, Error> {
    parser.advance();
    let right = parse_type(parser, bp)?;
    let span = left.get_span().to(right.get_span());

    let members = match left {
        Type::Union(union) => {
            let mut members = union.members;
            members.push(right);
            members
        }
        left => vec![left, right],
    };

    Ok(Type::Union(UnionType { members, span }))
}

pub fn parse_intersection_type(parser: &mut Parser, left: Type, bp: BindingPower) -> Result<Type, Error> {
    parser.advance();
    let right = parse_type(parser, bp)?;
    let span = left.get_span().to(right.get_span());

    let members = match left {
        Type::Intersection(intersection) => {
            let mut members = intersection.members;
            members.push(right);
            members
        }
        left => vec![left, right],
    };

    Ok(Type::Intersection(IntersectionType { members, span }))
}

pub fn parse_array_type(parser: &mut Parser, left: Type, _bp: BindingPower) -> Result<Type, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Type::Array(ArrayType {
        span: parser.span_from(left.get_span()),
        element: Box::new(left),
    }))
}

/// Parses `name: type` pairs separated by commas, up to and including
/// `closing`. Shared by function declarations, function types and struct
/// method signatures.
pub fn parse_params(parser: &mut Parser, closing: TokenKind) -> Result<Vec<Param>, Error> {
    let mut params = vec![];

    while parser.has_tokens() && parser.current_token_kind() != closing {
        let name = parser.expect(TokenKind::Identifier)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser, BindingPower::Default)?;

        params.push(Param {
            span: parser.span_from(&name.span),
            name: name.value,
            ty,
        });

        if parser.current_token_kind() != closing {
            parser.expect(TokenKind::Comma)?;
        }
    }

    parser.expect(closing)?;
    Ok(params)
}
