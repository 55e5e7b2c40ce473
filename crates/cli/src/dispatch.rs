//! Wiring between parsed arguments and the core commander.

use std::process::ExitStatus;

use log::{debug, info};
use vzcmd_core::commander::{Commander, ContainerLifecycle};
use vzcmd_core::config;
use vzcmd_core::error::Result;
use vzcmd_core::execution::{ExecutionOutput, ExecutionResult, ProcessRunner, Runner};
use vzcmd_core::invocation::InvocationDescriptor;

use crate::arguments::parse_options;
use crate::cli_args::{Action, Args};

/// Runner selected by the `--dry-run` flag.
#[derive(Debug, Clone, Copy)]
pub enum CliRunner {
    /// Execute the invocation as a child process.
    Process(ProcessRunner),
    /// Report the invocation as the command output without executing it.
    DryRun,
}

impl CliRunner {
    #[must_use]
    pub fn for_args(args: &Args) -> Self {
        if args.dry_run {
            CliRunner::DryRun
        } else {
            CliRunner::Process(ProcessRunner)
        }
    }
}

impl Runner for CliRunner {
    fn run(&self, descriptor: &InvocationDescriptor) -> ExecutionResult {
        match self {
            CliRunner::Process(runner) => runner.run(descriptor),
            CliRunner::DryRun => {
                info!("Dry run is specified, not executing.");
                Ok(ExecutionOutput {
                    stdout: format!("{descriptor}\n"),
                    status: ExitStatus::default(),
                })
            }
        }
    }
}

/// Builds a ready commander from the config file and flags in `args`.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
pub fn build_commander(args: &Args) -> Result<Commander<CliRunner>> {
    let config_path = config::get_config_path(args.config_path.as_deref());
    debug!("Config path: `{}`", config_path);

    let commander = Commander::with_runner(CliRunner::for_args(args)).with_policy(args.policy());
    commander.load(&config_path)?;

    Ok(commander)
}

/// Performs `action` through `lifecycle`.
///
/// # Errors
///
/// Returns an error if the action's options are malformed, or the
/// operation's own error.
pub fn dispatch<L: ContainerLifecycle + ?Sized>(lifecycle: &L, action: &Action) -> ExecutionResult {
    match action {
        Action::Create {
            name,
            os_template,
            parameters,
        } => {
            let options = parse_options(parameters)?;
            lifecycle.create_container(name, os_template, &options)
        }
        Action::Delete { name } => lifecycle.delete_container(name),
        Action::Set { name, parameters } => {
            let options = parse_options(parameters)?;
            lifecycle.set_container_parameters(name, &options)
        }
        Action::List => lifecycle.list_containers(),
        Action::Start { name } => lifecycle.start_container(name),
        Action::Stop { name } => lifecycle.stop_container(name),
        Action::Restart { name } => lifecycle.restart_container(name),
        Action::Suspend { name } => lifecycle.suspend_container(name),
        Action::Resume { name } => lifecycle.resume_container(name),
    }
}
