//! Type AST nodes

use serde::{Deserialize, Serialize};

/// Static type tag the front end attaches to every expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Signed integer
    Int,
    /// Character
    Char,
    /// Pointer to an element type
    Ptr(Box<Type>),
    /// Fixed-size array: element type and declared length
    Array(Box<Type>, usize),
}

impl Type {
    /// Whether a value of this type holds an address, so that `+`/`-` on
    /// it move in whole slots rather than raw integers. Array variables
    /// bind to their block's base address, so they count as addresses.
    pub fn is_address(&self) -> bool {
        matches!(self, Type::Ptr(_) | Type::Array(_, _))
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Char => write!(f, "char"),
            Type::Ptr(inner) => write!(f, "{inner}*"),
            Type::Array(elem, len) => write!(f, "{elem}[{len}]"),
        }
    }
}
