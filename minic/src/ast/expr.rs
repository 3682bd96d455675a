//! Expression AST nodes

use super::{DeclId, ExprId, Type};
use serde::{Deserialize, Serialize};

/// Expression: a stable identity, the front end's static type, and the kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub id: ExprId,
    pub ty: Type,
    pub kind: ExprKind,
}

/// Expression kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExprKind {
    /// Integer literal
    IntLit(i64),
    /// Character literal
    CharLit(char),
    /// Reference to a declared variable
    Var { decl: DeclId, name: String },
    /// Unary operation
    Unary { op: UnOp, operand: Box<Expr> },
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Assignment; the target is a variable, subscript, or dereference
    Assign { target: Box<Expr>, value: Box<Expr> },
    /// Array subscript: base[index]
    Index { base: Box<Expr>, index: Box<Expr> },
    /// Function call
    Call { callee: String, args: Vec<Expr> },
    /// Parenthesized expression
    Paren(Box<Expr>),
    /// Explicit or implicit cast. All values share one representation, so
    /// the target type only matters to the front end's own typing.
    Cast { to: Type, operand: Box<Expr> },
    /// sizeof(type)
    Sizeof(Type),
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Lt,
    Gt,
    Eq,
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Lt => write!(f, "<"),
            BinOp::Gt => write!(f, ">"),
            BinOp::Eq => write!(f, "=="),
        }
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnOp {
    /// Negation (-)
    Neg,
    /// Identity (+)
    Plus,
    /// Pointer dereference (*)
    Deref,
    /// Address of an lvalue (&)
    AddrOf,
}

impl std::fmt::Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Neg => write!(f, "-"),
            UnOp::Plus => write!(f, "+"),
            UnOp::Deref => write!(f, "*"),
            UnOp::AddrOf => write!(f, "&"),
        }
    }
}
