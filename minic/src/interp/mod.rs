//! Tree-walking evaluation: values, simulated heap, stack frames, the
//! call-stack environment, and the expression/statement dispatcher

mod env;
mod error;
mod eval;
mod frame;
mod heap;
mod value;

pub use env::{Builtin, Environment};
pub use error::{InterpResult, RuntimeError};
pub use eval::Interpreter;
pub use frame::StackFrame;
pub use heap::Heap;
pub use value::{SLOT_SIZE, Value, truthy};
