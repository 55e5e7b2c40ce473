//! Argument processing for the vzc CLI.
//!
//! Operation options are given as repeated `-p key=value` flags. This module
//! turns them into the ordered [`Options`](vzcmd_core::parameters::Options)
//! handed to the commander.

pub mod processing;

// Re-exports for convenience
pub use processing::parse_options;
