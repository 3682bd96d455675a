//! Abstract Syntax Tree definitions
//!
//! The evaluator consumes an already-parsed, already-typed tree produced
//! by an external front end. The front end assigns every expression node
//! a stable [`ExprId`] and every declared variable a program-unique
//! [`DeclId`]; the whole tree serializes with serde, which is the
//! interchange format the `minic` driver reads from disk.

mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// Identity of a declared variable. Frames key their bindings on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclId(pub u32);

/// Identity of an expression node, used as the per-frame memo key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprId(pub u32);

/// A program is a sequence of top-level declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub decls: Vec<TopLevel>,
}

/// Top-level declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TopLevel {
    Func(FuncDecl),
    Var(VarDecl),
}

/// Function declaration
///
/// A `body` of `None` marks an extern declaration; the built-ins arrive
/// that way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub ret_ty: Type,
    pub body: Option<Stmt>,
}

/// Function parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub id: DeclId,
    pub name: String,
    pub ty: Type,
}

/// Variable declaration, top-level or inside a declaration statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarDecl {
    pub id: DeclId,
    pub name: String,
    pub ty: Type,
    pub init: Option<Expr>,
}
