//! vzcmd CLI Library
//!
//! This crate provides the command-line interface for vzcmd. It parses the
//! requested container operation and its options, loads the operations
//! config and hands the operation to the core commander.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`arguments`]: Processing of `-p key=value` options
//! - [`dispatch`]: Commander construction and operation dispatch
//!
//! # Examples
//!
//! The CLI binary (`vzc`) can be used in several ways:
//!
//! ```bash
//! # Create a container with extra options
//! vzc create 101 ubuntu-22.04 -p ram=1G
//!
//! # Change container parameters
//! vzc set 101 -p ram=2G -p cpus=2
//!
//! # Show what would run without running it
//! vzc --dry-run delete 101
//!
//! # Use another config file and fail on unresolved placeholders
//! vzc -c ./commands.yml --strict start 101
//! ```

pub mod arguments;
pub mod cli_args;
pub mod dispatch;
