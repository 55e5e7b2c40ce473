use std::process::{ExitStatus, Stdio};

use log::{debug, info, warn};

use crate::error::ExecutionError::{NonZeroExit, SpawnFailed};
use crate::error::Result;
use crate::invocation::InvocationDescriptor;

/// Output of a successfully completed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub status: ExitStatus,
}

/// Either the output of a zero-status child or the reason the call failed.
pub type ExecutionResult = Result<ExecutionOutput>;

/// Runs resolved invocations on behalf of a commander.
pub trait Runner {
    /// Runs `descriptor` to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation could not be started or did not
    /// succeed.
    fn run(&self, descriptor: &InvocationDescriptor) -> ExecutionResult;
}

/// Runs invocations as child processes of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, descriptor: &InvocationDescriptor) -> ExecutionResult {
        execute(descriptor)
    }
}

/// Executes an invocation, capturing its standard output.
///
/// The child inherits the environment and stderr of the current process and
/// reads stdin from the null device. The call blocks until the child exits;
/// there is no timeout.
///
/// # Errors
///
/// Returns [`SpawnFailed`] if the program could not be started and
/// [`NonZeroExit`] if it exited unsuccessfully. The latter carries the
/// captured stdout.
pub fn execute(descriptor: &InvocationDescriptor) -> ExecutionResult {
    info!("Executing: {descriptor}");

    let output = descriptor
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|source| SpawnFailed {
            program: descriptor.program.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    debug!("Stdout:\n{stdout}");

    if output.status.success() {
        Ok(ExecutionOutput {
            stdout,
            status: output.status,
        })
    } else {
        warn!("`{}` exited with {}", descriptor.program, output.status);
        Err(NonZeroExit {
            code: output.status.code(),
            stdout,
        }
        .into())
    }
}
