//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate. Every container operation is a subcommand; flags that affect how
//! operations are resolved are global.

use clap::{Parser, Subcommand};
use vzcmd_core::interpolation::SubstitutionPolicy;

/// Command-line arguments for the `vzc` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use vzcmd_cli::cli_args::{Action, Args};
///
/// let args = Args::parse_from(["vzc", "--dry-run", "delete", "101"]);
/// assert!(args.dry_run);
/// assert_eq!(args.action, Action::Delete { name: "101".to_string() });
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the operations config file YAML.
    ///
    /// If not provided, defaults to `~/.vzcmd/commands.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config_path: Option<String>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action, global = true)]
    pub dry_run: bool,

    /// Fail on placeholders that cannot be resolved instead of passing them through.
    #[arg(long, action, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub action: Action,
}

impl Args {
    #[must_use]
    pub fn policy(&self) -> SubstitutionPolicy {
        if self.strict {
            SubstitutionPolicy::Strict
        } else {
            SubstitutionPolicy::Permissive
        }
    }
}

/// The container operation to perform.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Action {
    /// Create a container from an OS template.
    Create {
        name: String,
        os_template: String,

        /// Extra options in the format key=value, repeatable.
        #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
        parameters: Vec<String>,
    },

    /// Delete a container.
    Delete { name: String },

    /// Set container parameters.
    Set {
        name: String,

        /// Parameters in the format key=value, repeatable. At least one is required.
        #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
        parameters: Vec<String>,
    },

    /// List containers.
    List,

    /// Start a container.
    Start { name: String },

    /// Stop a container.
    Stop { name: String },

    /// Restart a container.
    Restart { name: String },

    /// Suspend a container.
    Suspend { name: String },

    /// Resume a suspended container.
    Resume { name: String },
}
