//! Centralized limits and thresholds.
//!
//! Every bound that protects an iterative algorithm against malformed or
//! adversarial input lives here so the values stay consistent between the
//! crates that enforce them.

/// Maximum number of `extends` hops followed when assembling the effective
/// alias configuration.
///
/// A config whose `extends` chain is longer than this (or cycles back on
/// itself) is treated as if no config existed.
///
/// # Example
///
/// ```json
/// // tsconfig.json
/// { "extends": "./tsconfig.base.json" }
/// // tsconfig.base.json
/// { "extends": "./tsconfig.json" }   // cycle: aborted after 10 hops
/// ```
pub const MAX_EXTENDS_DEPTH: usize = 10;

/// Maximum nesting depth of blocks accepted by the stylesheet parser.
///
/// The brace parser keeps an explicit stack, so this is not a stack-overflow
/// guard; it bounds memory on pathological input such as `{{{{{{...`.
pub const MAX_BLOCK_DEPTH: usize = 4096;
