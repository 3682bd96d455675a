//! Runtime errors for the evaluator

use thiserror::Error;

/// Result type for evaluator operations
pub type InterpResult<T> = Result<T, RuntimeError>;

/// Runtime error during evaluation.
///
/// Every variant is fatal: the driver reports the message and exits with
/// a nonzero status. Non-fatal conditions (inexact division) are stderr
/// diagnostics, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    #[error("entry function `main` is missing")]
    MissingEntry,

    #[error("undefined function: {0}")]
    UndefinedFunction(String),

    #[error("function {name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unsupported assignment target")]
    UnsupportedAssignTarget,

    #[error("cannot take the address of this operand")]
    UnsupportedAddressOf,

    #[error("input error: {0}")]
    Input(String),

    #[error("output error: {0}")]
    Output(String),

    #[error("call stack exhausted")]
    CallStackExhausted,
}
