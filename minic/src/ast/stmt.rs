//! Statement AST nodes

use super::{Expr, VarDecl};
use serde::{Deserialize, Serialize};

/// Statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Declaration statement: one or more variable declarations
    Decl(Vec<VarDecl>),
    /// Expression statement
    Expr(Expr),
    /// Compound statement
    Block(Vec<Stmt>),
    /// Conditional
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// While loop
    While { cond: Expr, body: Box<Stmt> },
    /// For loop. All three clauses are optional; an absent condition
    /// reads as nonzero, as in C.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    /// Return from the current function
    Return(Option<Expr>),
    /// Null statement
    Empty,
}
