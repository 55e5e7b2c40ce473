//! The public operation surface.
//!
//! A [`Commander`] holds the operation table and turns lifecycle calls into a
//! bind → build → run sequence. It is `Unconfigured` until a table is loaded
//! and `Ready` afterwards; the table can be set once and never changes after
//! that, so a ready commander can be shared between threads freely.

use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use crate::error::ConfigError::{AlreadyLoaded, NotLoaded, OperationNotConfigured};
use crate::error::ValidationError::MissingParameters;
use crate::error::Result;
use crate::execution::{ExecutionResult, ProcessRunner, Runner};
use crate::file_handling::load_operation_table;
use crate::interpolation::{bind, SubstitutionPolicy};
use crate::invocation::{build, InvocationDescriptor};
use crate::operation_definitions::{Operation, OperationTable};
use crate::parameters::{Options, ParameterSet};

/// Container lifecycle operations backed by configured invocations.
///
/// Every method assembles a parameter set, resolves the matching operation
/// and returns the outcome of running it.
pub trait ContainerLifecycle {
    /// Creates container `name` from `os_template`.
    ///
    /// The template variables are `options` plus `name` and `ostemplate`;
    /// the explicit arguments win over options of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn create_container(
        &self,
        name: &str,
        os_template: &str,
        options: &Options,
    ) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn delete_container(&self, name: &str) -> ExecutionResult;

    /// Applies `options` to container `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingParameters`] if `options` is empty, otherwise an error
    /// if the operation cannot be resolved or its invocation fails.
    fn set_container_parameters(&self, name: &str, options: &Options) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn list_containers(&self) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn start_container(&self, name: &str) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn stop_container(&self, name: &str) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn restart_container(&self, name: &str) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn suspend_container(&self, name: &str) -> ExecutionResult;

    /// # Errors
    ///
    /// Returns an error if the operation cannot be resolved or its invocation
    /// fails.
    fn resume_container(&self, name: &str) -> ExecutionResult;
}

/// Translates lifecycle operations into invocations of external programs.
#[derive(Debug)]
pub struct Commander<R: Runner = ProcessRunner> {
    table: OnceLock<OperationTable>,
    policy: SubstitutionPolicy,
    runner: R,
}

impl Commander<ProcessRunner> {
    /// An unconfigured commander that runs invocations as child processes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(ProcessRunner)
    }

    /// A ready commander whose table is loaded from `path`.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`ConfigError`](crate::error::ConfigError) if the
    /// file cannot be loaded.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let commander = Self::new();
        commander.load(path)?;
        Ok(commander)
    }
}

impl Default for Commander<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runner> Commander<R> {
    /// An unconfigured commander that hands invocations to `runner`.
    pub fn with_runner(runner: R) -> Self {
        Self {
            table: OnceLock::new(),
            policy: SubstitutionPolicy::default(),
            runner,
        }
    }

    /// A ready commander using an already built table.
    pub fn from_table(table: OperationTable, runner: R) -> Self {
        Self {
            table: OnceLock::from(table),
            policy: SubstitutionPolicy::default(),
            runner,
        }
    }

    /// Sets how placeholders that cannot be resolved are handled.
    #[must_use]
    pub fn with_policy(mut self, policy: SubstitutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.table.get().is_some()
    }

    /// The loaded table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&OperationTable> {
        self.table.get()
    }

    /// Loads the operation table from `path`, making the commander ready.
    ///
    /// A failed load leaves the commander unconfigured.
    ///
    /// # Errors
    ///
    /// Returns the loader's error if the file cannot be loaded, or
    /// [`AlreadyLoaded`] if a table was loaded before.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_ready() {
            return Err(AlreadyLoaded.into());
        }

        let path = path.as_ref();
        debug!("Loading operations from `{}`", path.display());
        let table = load_operation_table(path)?;

        self.table.set(table).map_err(|_| AlreadyLoaded)?;
        Ok(())
    }

    /// Resolves `operation` against `parameters` without running it.
    ///
    /// # Errors
    ///
    /// Returns [`NotLoaded`] before a table is loaded,
    /// [`OperationNotConfigured`] if the table has no entry for `operation`,
    /// and a bind error under the strict policy.
    pub fn prepare(
        &self,
        operation: Operation,
        parameters: &ParameterSet,
    ) -> Result<InvocationDescriptor> {
        let table = self.table.get().ok_or(NotLoaded)?;
        let spec = table
            .get(operation)
            .ok_or(OperationNotConfigured(operation))?;

        let arguments = bind(spec, parameters, self.policy)?;
        let descriptor = build(spec, arguments);
        debug!("Resolved {operation}: {descriptor}");

        Ok(descriptor)
    }

    /// Resolves and runs `operation` with `parameters`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`prepare`](Self::prepare) and those of the
    /// runner.
    pub fn run(&self, operation: Operation, parameters: &ParameterSet) -> ExecutionResult {
        let descriptor = self.prepare(operation, parameters)?;
        self.runner.run(&descriptor)
    }

    fn run_named(&self, operation: Operation, name: &str) -> ExecutionResult {
        let parameters = ParameterSet::new().with("name", name)?;
        self.run(operation, &parameters)
    }
}

/// Parameters for `create`: `options`, then `name` and `ostemplate` on top.
fn create_parameters(name: &str, os_template: &str, options: &Options) -> Result<ParameterSet> {
    ParameterSet::from_options(options)?
        .with("name", name)?
        .with("ostemplate", os_template)
}

fn set_parameters(name: &str, options: &Options) -> Result<ParameterSet> {
    if options.is_empty() {
        return Err(MissingParameters(Operation::SetParameters).into());
    }

    ParameterSet::from_options(options)?.with("name", name)
}

impl<R: Runner> ContainerLifecycle for Commander<R> {
    fn create_container(
        &self,
        name: &str,
        os_template: &str,
        options: &Options,
    ) -> ExecutionResult {
        let parameters = create_parameters(name, os_template, options)?;
        self.run(Operation::Create, &parameters)
    }

    fn delete_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Delete, name)
    }

    fn set_container_parameters(&self, name: &str, options: &Options) -> ExecutionResult {
        let parameters = set_parameters(name, options)?;
        self.run(Operation::SetParameters, &parameters)
    }

    fn list_containers(&self) -> ExecutionResult {
        self.run(Operation::List, &ParameterSet::new())
    }

    fn start_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Start, name)
    }

    fn stop_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Stop, name)
    }

    fn restart_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Restart, name)
    }

    fn suspend_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Suspend, name)
    }

    fn resume_container(&self, name: &str) -> ExecutionResult {
        self.run_named(Operation::Resume, name)
    }
}
