//! Parser state and the program entry point.
//!
//! The parser walks a token stream that always ends in `EOF`, dispatching
//! through the shared [`Lookups`] tables. Statement-level failures are
//! recorded and replaced with error placeholders so that one parse reports
//! every syntax error it can find.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::ErrorExpr,
        statements::{ExpressionStmt, ProgramStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{Lookups, LOOKUPS},
    stmt::parse_stmt,
};

/// Tokens that can begin a statement; error recovery resumes at these.
const STATEMENT_KEYWORDS: [TokenKind; 11] = [
    TokenKind::Let,
    TokenKind::Var,
    TokenKind::Const,
    TokenKind::Fun,
    TokenKind::If,
    TokenKind::Type,
    TokenKind::Loop,
    TokenKind::While,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Return,
];

/// Nesting counters saved before each statement and restored on failure.
#[derive(Debug, Clone, Copy)]
pub struct Depths {
    block: usize,
    loops: usize,
    functions: usize,
}

pub struct Parser<'a> {
    /// The list of tokens to parse, terminated by `EOF`
    tokens: Vec<Token>,
    /// Index of the current token
    pos: usize,
    /// The name of the source being parsed
    file: Rc<String>,
    lookups: &'a Lookups,
    errors: Vec<Error>,
    block_depth: usize,
    loop_depth: usize,
    function_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>, lookups: &'a Lookups) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            file,
            lookups,
            errors: vec![],
            block_depth: 0,
            loop_depth: 0,
            function_depth: 0,
        }
    }

    /// The grammar tables. The returned reference is not tied to `self`, so
    /// a handler can be fetched and then called with the parser.
    pub fn lookups(&self) -> &'a Lookups {
        self.lookups
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token after the current one.
    pub fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map(|token| token.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Advances to the next token and returns the previous one. Never moves
    /// past `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    pub fn expect_error(&mut self, expected_kind: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: expected_kind,
                    received: token.kind,
                    token: token.value.clone(),
                },
                token.span.clone(),
            )),
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes a `;` if one is present.
    pub fn consume_semicolon(&mut self) {
        if self.current_token_kind() == TokenKind::Semicolon {
            self.advance();
        }
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Span from the start of `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        let end = if self.pos == 0 {
            start.end.clone()
        } else {
            self.tokens[self.pos - 1].span.end.clone()
        };

        Span {
            start: start.start.clone(),
            end,
        }
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn push_error(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn enter_block(&mut self) {
        self.block_depth += 1;
    }

    pub fn exit_block(&mut self) {
        self.block_depth = self.block_depth.saturating_sub(1);
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn in_function(&self) -> bool {
        self.function_depth > 0
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    /// Enters a function body. Loops outside the function do not enclose its
    /// body, so the loop depth is cleared and returned for [`Self::exit_function`].
    pub fn enter_function(&mut self) -> usize {
        self.function_depth += 1;
        std::mem::take(&mut self.loop_depth)
    }

    pub fn exit_function(&mut self, loop_depth: usize) {
        self.function_depth = self.function_depth.saturating_sub(1);
        self.loop_depth = loop_depth;
    }

    pub fn save_depths(&self) -> Depths {
        Depths {
            block: self.block_depth,
            loops: self.loop_depth,
            functions: self.function_depth,
        }
    }

    pub fn restore_depths(&mut self, depths: Depths) {
        self.block_depth = depths.block;
        self.loop_depth = depths.loops;
        self.function_depth = depths.functions;
    }

    /// Skips tokens after a failed statement that began at token index `start`.
    ///
    /// Stops after a `;`, before a `}` closing the enclosing block, or before
    /// a statement keyword. Always consumes at least one token unless the
    /// failure consumed some already or sits on the enclosing block's `}`.
    pub fn synchronize(&mut self, start: usize) {
        if self.pos == start {
            if self.current_token_kind() == TokenKind::CloseCurly && self.block_depth > 0 {
                return;
            }
            self.advance();
        }

        // Braces the failed statement opened, such as a `struct {` type
        let mut nesting = self.tokens[start..self.pos]
            .iter()
            .fold(0usize, |depth, token| match token.kind {
                TokenKind::OpenCurly => depth + 1,
                TokenKind::CloseCurly => depth.saturating_sub(1),
                _ => depth,
            });
        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::Semicolon if nesting == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::OpenCurly => {
                    nesting += 1;
                    self.advance();
                }
                TokenKind::CloseCurly if nesting > 0 => {
                    nesting -= 1;
                    self.advance();
                }
                TokenKind::CloseCurly if self.block_depth > 0 => return,
                TokenKind::CloseCurly => {
                    self.advance();
                }
                kind if nesting == 0 && STATEMENT_KEYWORDS.contains(&kind) => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

/// Parses one statement, recording a failure and substituting a placeholder
/// instead of propagating it.
pub fn parse_stmt_recovering(parser: &mut Parser) -> Stmt {
    let start = parser.pos;
    let start_span = parser.current_token().span.clone();
    let depths = parser.save_depths();

    match parse_stmt(parser) {
        Ok(stmt) => stmt,
        Err(error) => {
            debug!(error = %error, "recovering from syntax error");
            parser.push_error(error);
            parser.restore_depths(depths);
            parser.synchronize(start);

            let span = parser.span_from(&start_span);
            Stmt::Expression(ExpressionStmt {
                expression: Expr::Error(ErrorExpr { span: span.clone() }),
                span,
            })
        }
    }
}

/// Parses a token stream into a program.
///
/// The returned program is complete even when errors were found: each
/// statement that failed to parse is present as an error placeholder. A
/// program is only safe to evaluate when the error list is empty.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (ProgramStmt, Vec<Error>) {
    parse_with(tokens, file, &LOOKUPS)
}

/// Like [`parse`], with explicit grammar tables.
pub fn parse_with(tokens: Vec<Token>, file: Rc<String>, lookups: &Lookups) -> (ProgramStmt, Vec<Error>) {
    let mut parser = Parser::new(tokens, file, lookups);

    let mut body = vec![];
    while parser.has_tokens() {
        body.push(parse_stmt_recovering(&mut parser));
    }

    let program = ProgramStmt {
        body,
        span: Span {
            start: Position(0, parser.get_file()),
            end: parser.current_token().span.end.clone(),
        },
    };

    (program, parser.errors)
}
