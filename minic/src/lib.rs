//! Mini-C Evaluator Library
//!
//! Tree-walking evaluator for a miniature C subset: integers, characters,
//! pointers, fixed-size arrays, by-value functions, and a simulated heap.
//! Programs arrive as already-parsed, already-typed trees produced by an
//! external front end.

pub mod ast;
pub mod error;
pub mod interp;

pub use error::{LoadError, Result};
