use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("undefined", TokenKind::Undefined);
        map.insert("let", TokenKind::Let);
        map.insert("var", TokenKind::Var);
        map.insert("const", TokenKind::Const);
        map.insert("type", TokenKind::Type);
        map.insert("struct", TokenKind::Struct);
        map.insert("fun", TokenKind::Fun);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("loop", TokenKind::Loop);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("return", TokenKind::Return);
        map.insert("int", TokenKind::IntType);
        map.insert("float", TokenKind::FloatType);
        map.insert("string", TokenKind::StringType);
        map.insert("bool", TokenKind::BoolType);
        map.insert("object", TokenKind::ObjectType);
        map.insert("array", TokenKind::ArrayType);
        map.insert("any", TokenKind::AnyType);
        map.insert("void", TokenKind::VoidType);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Int,
    Float,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Pipe,      // |
    Ampersand, // &

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,
    PercentEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    True,
    False,
    Null,
    Undefined,
    Let,
    Var,
    Const,
    Type,
    Struct,
    Fun,
    If,
    Else,
    Loop,
    While,
    Break,
    Continue,
    Return,

    // Type keywords
    IntType,
    FloatType,
    StringType,
    BoolType,
    ObjectType,
    ArrayType,
    AnyType,
    VoidType,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn debug(&self) -> String {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Int,
            TokenKind::Float,
        ]) {
            format!("{} ({})", self.kind, self.value)
        } else {
            format!("{} ()", self.kind)
        }
    }
}
