//! Common types and utilities for the cssm crates.
//!
//! This crate provides foundational types used across all cssm crates:
//! - Position/Range types for source locations (1-based parser positions
//!   and 0-based editor positions)
//! - End-of-line detection and UTF-16 length helpers
//! - Centralized limits

// Position/Range types for line/column source locations
pub mod position;
pub use position::{Location, Position, Range, SourcePosition};

// Line ending and column measurement helpers
pub mod text;
pub use text::{detect_eol, utf16_len, utf16_to_byte_offset};

// Centralized limits and thresholds
pub mod limits;
