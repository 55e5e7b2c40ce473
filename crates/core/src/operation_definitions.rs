use std::fmt::{Display, Formatter};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A named container-lifecycle action that can be backed by a config entry.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    #[serde(alias = "ct-create")]
    Create,
    #[serde(alias = "ct-set")]
    SetParameters,
    #[serde(alias = "ct-delete")]
    Delete,
    List,
    Start,
    Stop,
    Restart,
    Suspend,
    Resume,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Create,
        Operation::SetParameters,
        Operation::Delete,
        Operation::List,
        Operation::Start,
        Operation::Stop,
        Operation::Restart,
        Operation::Suspend,
        Operation::Resume,
    ];

    /// The key this operation is declared under in the config file.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::SetParameters => "set-parameters",
            Operation::Delete => "delete",
            Operation::List => "list",
            Operation::Start => "start",
            Operation::Stop => "stop",
            Operation::Restart => "restart",
            Operation::Suspend => "suspend",
            Operation::Resume => "resume",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Invocation recipe for one operation: the program, its argument templates
/// and the variables allowed to be substituted into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    pub program: String,
    pub arguments: Vec<String>,
    pub vars: IndexSet<String>,
}

impl OperationSpec {
    pub fn new<P, A, V>(program: P, arguments: A, vars: V) -> Self
    where
        P: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            program: program.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for OperationSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.program)?;
        for argument in &self.arguments {
            write!(formatter, " {argument}")?;
        }
        Ok(())
    }
}

/// Operation recipes keyed by operation, in declaration order.
///
/// Built once by the loader and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTable {
    operations: IndexMap<Operation, OperationSpec>,
}

impl OperationTable {
    #[must_use]
    pub fn get(&self, operation: Operation) -> Option<&OperationSpec> {
        self.operations.get(&operation)
    }

    #[must_use]
    pub fn contains(&self, operation: Operation) -> bool {
        self.operations.contains_key(&operation)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operation, &OperationSpec)> {
        self.operations.iter().map(|(operation, spec)| (*operation, spec))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl From<IndexMap<Operation, OperationSpec>> for OperationTable {
    fn from(operations: IndexMap<Operation, OperationSpec>) -> Self {
        Self { operations }
    }
}

impl FromIterator<(Operation, OperationSpec)> for OperationTable {
    fn from_iter<T: IntoIterator<Item = (Operation, OperationSpec)>>(iter: T) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
