/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Expr`, `Stmt` and `Type` sum types
/// - expressions: Payloads of the expression variants
/// - statements: Payloads of the statement variants
/// - types: Payloads of the type variants and their display form
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
