//! Stack frames
//!
//! One activation record per function call: bindings from declared
//! variables to values, a memo from expression nodes to their
//! last-computed value, the currently-executing node, and the pending
//! return state. A frame's bindings and memo are owned exclusively; only
//! the active (top) frame is ever read or written.

use super::value::Value;
use crate::ast::{DeclId, ExprId};
use std::collections::HashMap;

/// One function activation
#[derive(Debug, Default)]
pub struct StackFrame {
    /// Bindings from declared variables to values
    vars: HashMap<DeclId, Value>,
    /// Last-computed value per expression node
    exprs: HashMap<ExprId, Value>,
    /// The node currently being evaluated
    pc: Option<ExprId>,
    /// Set once this activation has executed a return statement
    returned: bool,
    /// Pending return value; stays 0 when the body exhausts its statements
    ret_val: Value,
}

impl StackFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a declared variable to a value
    pub fn bind_decl(&mut self, decl: DeclId, val: Value) {
        self.vars.insert(decl, val);
    }

    /// Look up a declared variable's binding
    pub fn decl_val(&self, decl: DeclId) -> Option<Value> {
        self.vars.get(&decl).copied()
    }

    /// Whether this frame binds the given variable
    pub fn binds(&self, decl: DeclId) -> bool {
        self.vars.contains_key(&decl)
    }

    /// Memoize a value for an expression node, returning it.
    /// Nodes are revisited on every loop iteration or call, overwriting
    /// the previous entry.
    pub fn bind_expr(&mut self, expr: ExprId, val: Value) -> Value {
        self.exprs.insert(expr, val);
        val
    }

    /// Last value memoized for an expression node
    pub fn expr_val(&self, expr: ExprId) -> Option<Value> {
        self.exprs.get(&expr).copied()
    }

    pub fn set_pc(&mut self, expr: ExprId) {
        self.pc = Some(expr);
    }

    pub fn pc(&self) -> Option<ExprId> {
        self.pc
    }

    /// Record the activation's return value. The first return wins;
    /// later attempts in the same activation are ignored.
    pub fn set_return(&mut self, val: Value) {
        if !self.returned {
            self.returned = true;
            self.ret_val = val;
        }
    }

    pub fn has_returned(&self) -> bool {
        self.returned
    }

    /// Pending return value; 0 unless a return statement stored one
    pub fn return_value(&self) -> Value {
        self.ret_val
    }
}
