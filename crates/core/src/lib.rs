//! vzcmd Core Library
//!
//! This crate translates container-lifecycle operations (create, delete,
//! set-parameters and friends) into invocations of an external container
//! management tool. The mapping is declared in a YAML config file: every
//! operation names a program, its argument templates and the variables that
//! may be substituted into them.
//!
//! # Key Features
//!
//! - **Operation Definitions**: Load operation recipes from a YAML config file
//! - **Placeholder Binding**: Resolve `{{name}}` placeholders against per-call parameters
//! - **Execution**: Run the resolved invocation and capture its output
//! - **Error Handling**: Typed errors for every failure, none of which abort the host
//!
//! # Examples
//!
//! Creating a container with the operations from a config file:
//!
//! ```no_run
//! use vzcmd_core::commander::{Commander, ContainerLifecycle};
//! use vzcmd_core::parameters::Options;
//!
//! let commander = Commander::from_path("/etc/vzcmd/commands.yml")?;
//! let output = commander.create_container("101", "ubuntu-22.04", &Options::new())?;
//! println!("{}", output.stdout);
//! # Ok::<(), vzcmd_core::error::Error>(())
//! ```

pub mod commander;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod invocation;
pub mod operation_definitions;
pub mod parameters;
