use std::fmt::{Display, Formatter};
use std::process::Command;

use crate::operation_definitions::OperationSpec;

/// A fully resolved program invocation, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationDescriptor {
    pub program: String,
    pub arguments: Vec<String>,
}

impl InvocationDescriptor {
    /// Creates a [`Command`] for this invocation with default stdio settings.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.arguments);
        command
    }
}

/// Pairs the spec's program with already bound arguments. Nothing is
/// validated here; a bad program only shows up when it is executed.
#[must_use]
pub fn build(spec: &OperationSpec, arguments: Vec<String>) -> InvocationDescriptor {
    InvocationDescriptor {
        program: spec.program.clone(),
        arguments,
    }
}

fn needs_quoting(word: &str) -> bool {
    word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"')
}

fn write_word(formatter: &mut Formatter<'_>, word: &str) -> std::fmt::Result {
    if needs_quoting(word) {
        write!(formatter, "'{}'", word.replace('\'', r"'\''"))
    } else {
        formatter.write_str(word)
    }
}

impl Display for InvocationDescriptor {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write_word(formatter, &self.program)?;
        for argument in &self.arguments {
            formatter.write_str(" ")?;
            write_word(formatter, argument)?;
        }
        Ok(())
    }
}
