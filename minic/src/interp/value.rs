//! Runtime values for the evaluator

/// Runtime value: a 64-bit signed integer.
///
/// Integers, characters, comparison results, and heap addresses all share
/// this one representation; pointers are addresses reinterpreted as
/// integers.
pub type Value = i64;

/// Width in bytes of every scalar slot, pointers included.
pub const SLOT_SIZE: i64 = 8;

/// Check if a value is truthy (any nonzero value)
pub fn truthy(v: Value) -> bool {
    v != 0
}
