use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt, Type},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*, types::create_token_type_lookups};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Assignment,
    Conditional,
    Logical,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;
pub type TypeNUDHandler = fn(&mut Parser) -> Result<Type, Error>;
pub type TypeLEDHandler = fn(&mut Parser, Type, BindingPower) -> Result<Type, Error>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;

lazy_static! {
    /// The grammar tables, built on first use and shared by every parse.
    pub static ref LOOKUPS: Lookups = Lookups::new();
}

/// Handler and binding power tables for the expression, statement and type
/// grammars.
///
/// Only infix registrations assign a binding power. A token that can only
/// start an expression therefore ends the one before it, which is what lets
/// statements omit their semicolons.
#[derive(Default)]
pub struct Lookups {
    pub stmt: StmtLookup,
    pub nud: NUDLookup,
    pub led: LEDLookup,
    pub binding_power: BPLookup,
    pub type_nud: TypeNUDLookup,
    pub type_led: TypeLEDLookup,
    pub type_binding_power: BPLookup,
}

impl Lookups {
    pub fn new() -> Self {
        let mut lookups = Lookups::default();
        create_token_lookups(&mut lookups);
        create_token_type_lookups(&mut lookups);
        lookups
    }

    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power.insert(kind, binding_power);
        self.led.insert(kind, led_fn);
    }

    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt.insert(kind, stmt_fn);
    }

    pub fn type_led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: TypeLEDHandler) {
        self.type_binding_power.insert(kind, binding_power);
        self.type_led.insert(kind, led_fn);
    }

    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud.insert(kind, nud_fn);
    }

    pub fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    pub fn type_binding_power_of(&self, kind: TokenKind) -> BindingPower {
        self.type_binding_power
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }
}

pub fn create_token_lookups(lookups: &mut Lookups) {
    lookups.led(TokenKind::Assignment, BindingPower::Assignment, parse_assignment_expr);
    lookups.led(TokenKind::PlusEquals, BindingPower::Assignment, parse_assignment_expr);
    lookups.led(TokenKind::MinusEquals, BindingPower::Assignment, parse_assignment_expr);
    lookups.led(TokenKind::StarEquals, BindingPower::Assignment, parse_assignment_expr);
    lookups.led(TokenKind::SlashEquals, BindingPower::Assignment, parse_assignment_expr);
    lookups.led(TokenKind::PercentEquals, BindingPower::Assignment, parse_assignment_expr);

    lookups.led(TokenKind::Question, BindingPower::Conditional, parse_conditional_expr);

    // Logical
    lookups.led(TokenKind::And, BindingPower::Logical, parse_binary_expr);
    lookups.led(TokenKind::Or, BindingPower::Logical, parse_binary_expr);

    // Relational
    lookups.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::Equals, BindingPower::Relational, parse_binary_expr);
    lookups.led(TokenKind::NotEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    lookups.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    lookups.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);
    lookups.led(TokenKind::Percent, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix, call and member
    lookups.led(TokenKind::PlusPlus, BindingPower::Call, parse_postfix_expr);
    lookups.led(TokenKind::MinusMinus, BindingPower::Call, parse_postfix_expr);
    lookups.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    lookups.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    lookups.led(TokenKind::OpenBracket, BindingPower::Member, parse_computed_member_expr);

    // Literals and symbols
    lookups.nud(TokenKind::Int, parse_primary_expr);
    lookups.nud(TokenKind::Float, parse_primary_expr);
    lookups.nud(TokenKind::String, parse_primary_expr);
    lookups.nud(TokenKind::Identifier, parse_primary_expr);
    lookups.nud(TokenKind::True, parse_primary_expr);
    lookups.nud(TokenKind::False, parse_primary_expr);
    lookups.nud(TokenKind::Null, parse_primary_expr);
    lookups.nud(TokenKind::Undefined, parse_primary_expr);

    // Conversion builtins share their names with type keywords
    lookups.nud(TokenKind::IntType, parse_primary_expr);
    lookups.nud(TokenKind::FloatType, parse_primary_expr);
    lookups.nud(TokenKind::StringType, parse_primary_expr);
    lookups.nud(TokenKind::BoolType, parse_primary_expr);

    lookups.nud(TokenKind::Dash, parse_prefix_expr);
    lookups.nud(TokenKind::Not, parse_prefix_expr);
    lookups.nud(TokenKind::PlusPlus, parse_prefix_expr);
    lookups.nud(TokenKind::MinusMinus, parse_prefix_expr);
    lookups.nud(TokenKind::OpenParen, parse_grouping_expr);
    lookups.nud(TokenKind::OpenBracket, parse_array_expr);

    // Statements
    lookups.stmt(TokenKind::OpenCurly, parse_block_stmt);
    lookups.stmt(TokenKind::Let, parse_var_decl_stmt);
    lookups.stmt(TokenKind::Var, parse_var_decl_stmt);
    lookups.stmt(TokenKind::Const, parse_var_decl_stmt);
    lookups.stmt(TokenKind::Fun, parse_fn_decl_stmt);
    lookups.stmt(TokenKind::If, parse_if_stmt);
    lookups.stmt(TokenKind::Type, parse_type_alias_stmt);
    lookups.stmt(TokenKind::Loop, parse_loop_stmt);
    lookups.stmt(TokenKind::While, parse_loop_stmt);
    lookups.stmt(TokenKind::Break, parse_break_stmt);
    lookups.stmt(TokenKind::Continue, parse_continue_stmt);
    lookups.stmt(TokenKind::Return, parse_return_stmt);
}
