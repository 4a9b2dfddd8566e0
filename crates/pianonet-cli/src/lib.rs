//! Pianonet CLI library.
//!
//! Command implementations and logging setup for the `pianonet` binary,
//! which inspects, slices, and converts saved note sequences.

pub mod commands;
pub mod logging;
