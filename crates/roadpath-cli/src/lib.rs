//! roadpath CLI library.
//!
//! Argument parsers, terminal styling, and output formatting used by the
//! `roadpath-cli` binary.

pub mod input;
pub mod output;
pub mod terminal;
