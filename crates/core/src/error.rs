use thiserror::Error;

use crate::operation_definitions::Operation;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Failures loading the operation table or using a commander without one.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found at `{}`", .path)]
    NotFound { path: String },

    #[error("IO error with config file at path `{}`: {}", .path, .original)]
    Unreadable {
        path: String,
        original: std::io::Error,
    },

    #[error("Error reading config file at `{}`: {}", .path, .original)]
    Malformed {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No operations were found in the config YAML. Is `{}` empty?", .path)]
    Empty { path: String },

    #[error("Operation {} is defined more than once in `{}`", .operation, .path)]
    DuplicateOperation { operation: Operation, path: String },

    #[error("Found a non-unique variable on operation {}: `{}`", .0, .1)]
    DuplicateVariable(Operation, String),

    #[error("Operation {} has an empty program", .0)]
    EmptyProgram(Operation),

    #[error("No operations are loaded. Load a config file first.")]
    NotLoaded,

    #[error("Operations are already loaded; reloading is not supported.")]
    AlreadyLoaded,

    #[error("Operation {} is not defined in the config file.", .0)]
    OperationNotConfigured(Operation),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing parameters for operation {}: at least one option is required.", .0)]
    MissingParameters(Operation),

    #[error("Invalid parameter name `{}`: names may not be empty or contain braces or whitespace", .0)]
    InvalidParameterName(String),

    #[error("Invalid parameter format `{}`, expected `key=value`", .0)]
    ParameterFormat(String),

    #[error("Parameter `{}` was given more than once", .0)]
    DuplicateParameter(String),
}

#[derive(Error, Debug)]
pub enum BindError {
    #[error("Unresolved placeholder `{{{{{}}}}}` in argument `{}`", .placeholder, .argument)]
    UnresolvedPlaceholder {
        argument: String,
        placeholder: String,
    },
}

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Error starting sub process `{}`: {}", .program, .source)]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("The sub process exited with non-success code{}.", exit_code_suffix(.code))]
    NonZeroExit { code: Option<i32>, stdout: String },
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" {code}"),
        None => " (terminated by signal)".to_string(),
    }
}

impl ConfigError {
    pub fn not_found(path: String) -> Self {
        Self::NotFound { path }
    }

    pub fn unreadable(path: String, original: std::io::Error) -> Self {
        Self::Unreadable { path, original }
    }

    pub fn malformed(path: String, original: serde_yaml::Error) -> Self {
        Self::Malformed { path, original }
    }

    pub fn empty(path: String) -> Self {
        Self::Empty { path }
    }
}

impl ExecutionError {
    /// Captured standard output of a child that exited unsuccessfully.
    #[must_use]
    pub fn stdout(&self) -> Option<&str> {
        match self {
            Self::NonZeroExit { stdout, .. } => Some(stdout),
            Self::SpawnFailed { .. } => None,
        }
    }
}
