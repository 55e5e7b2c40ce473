//! Loading of the operation table from a YAML config file.
//!
//! The document maps operation names to their invocation recipes:
//!
//! ```yaml
//! create:
//!   program: vzctl
//!   arguments: ["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
//!   vars: ["name", "ostemplate"]
//! delete:
//!   program: vzctl
//!   arguments: ["destroy", "{{name}}"]
//!   vars: ["name"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use log::warn;
use serde::Deserialize;

use crate::error::ConfigError::{self, DuplicateOperation, DuplicateVariable, EmptyProgram};
use crate::interpolation::placeholders;
use crate::operation_definitions::{Operation, OperationSpec, OperationTable};

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct OperationDocument {
    program: String,
    arguments: Vec<String>,
    #[serde(default)]
    vars: Vec<String>,
}

fn read_document(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::not_found(path.display().to_string()),
        _ => ConfigError::unreadable(path.display().to_string(), e),
    })
}

fn parse_operation(key: &str) -> serde_yaml::Result<Operation> {
    Operation::deserialize(serde_yaml::Value::String(key.to_string()))
}

fn validate_vars(
    operation: Operation,
    vars: Vec<String>,
) -> Result<IndexSet<String>, ConfigError> {
    let mut unique = IndexSet::with_capacity(vars.len());
    for var in vars {
        if unique.contains(&var) {
            return Err(DuplicateVariable(operation, var));
        }
        unique.insert(var);
    }
    Ok(unique)
}

fn to_spec(
    operation: Operation,
    document: OperationDocument,
) -> Result<OperationSpec, ConfigError> {
    if document.program.is_empty() {
        return Err(EmptyProgram(operation));
    }

    let vars = validate_vars(operation, document.vars)?;
    warn_undeclared(operation, &document.arguments, &vars);

    Ok(OperationSpec {
        program: document.program,
        arguments: document.arguments,
        vars,
    })
}

fn warn_undeclared(operation: Operation, arguments: &[String], vars: &IndexSet<String>) {
    for name in arguments
        .iter()
        .map(String::as_str)
        .flat_map(placeholders)
        .filter(|name| !vars.contains(*name))
    {
        warn!("{operation}: placeholder `{name}` is not in vars and will never be substituted");
    }
}

/// Parses a config document that has already been read into memory.
///
/// `path` is only used for error messages.
///
/// # Errors
///
/// Returns [`ConfigError::Malformed`] if the document does not match the
/// schema, [`ConfigError::Empty`] if it declares no operations, and a
/// structural error for duplicated operations or variables and empty programs.
pub fn parse_operation_table(document: &str, path: &str) -> Result<OperationTable, ConfigError> {
    if document.trim().is_empty() {
        return Err(ConfigError::empty(path.to_string()));
    }

    let parsed: Option<IndexMap<String, OperationDocument>> = serde_yaml::from_str(document)
        .map_err(|e| ConfigError::malformed(path.to_string(), e))?;

    let Some(parsed) = parsed else {
        return Err(ConfigError::empty(path.to_string()));
    };

    if parsed.is_empty() {
        return Err(ConfigError::empty(path.to_string()));
    }

    let mut seen = HashSet::new();
    let mut operations = IndexMap::with_capacity(parsed.len());

    for (key, document) in parsed {
        let operation =
            parse_operation(&key).map_err(|e| ConfigError::malformed(path.to_string(), e))?;

        // `create` and its legacy alias `ct-create` are different keys to YAML
        if !seen.insert(operation) {
            return Err(DuplicateOperation {
                operation,
                path: path.to_string(),
            });
        }

        operations.insert(operation, to_spec(operation, document)?);
    }

    Ok(OperationTable::from(operations))
}

/// Loads the operation table from the YAML config file at `path`.
///
/// Argument templates are not checked against the declared variables here;
/// unresolved placeholders are handled when an operation is bound.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if there is no file at `path`,
/// [`ConfigError::Unreadable`] if it cannot be read, and the errors of
/// [`parse_operation_table`] if its content is invalid.
///
/// # Examples
///
/// ```no_run
/// use vzcmd_core::file_handling::load_operation_table;
/// use vzcmd_core::operation_definitions::Operation;
///
/// let table = load_operation_table("/etc/vzcmd/commands.yml")?;
/// assert!(table.contains(Operation::Create));
/// # Ok::<(), vzcmd_core::error::ConfigError>(())
/// ```
pub fn load_operation_table(path: impl AsRef<Path>) -> Result<OperationTable, ConfigError> {
    let path = path.as_ref();
    let document = read_document(path)?;
    parse_operation_table(&document, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REFERENCE_CONFIG: &str = r#"
create:
  program: "vzctl"
  arguments: ["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
  vars: ["name", "ostemplate"]
set-parameters:
  program: "vzctl"
  arguments: ["set", "{{name}}", "--ram", "{{ram}}", "--save"]
  vars: ["name", "ram"]
delete:
  program: "vzctl"
  arguments: ["destroy", "{{name}}"]
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    #[test]
    fn test_parse_reference_config() {
        let table = parse_operation_table(REFERENCE_CONFIG, "inline").unwrap();

        assert_eq!(table.len(), 3);

        let create = table.get(Operation::Create).unwrap();
        assert_eq!(create.program, "vzctl");
        assert_eq!(
            create.arguments,
            vec!["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
        );
        assert_eq!(
            create.vars.iter().collect::<Vec<_>>(),
            vec!["name", "ostemplate"]
        );

        let delete = table.get(Operation::Delete).unwrap();
        assert!(delete.vars.is_empty());
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let table = parse_operation_table(REFERENCE_CONFIG, "inline").unwrap();
        let operations: Vec<Operation> = table.iter().map(|(operation, _)| operation).collect();
        assert_eq!(
            operations,
            vec![Operation::Create, Operation::SetParameters, Operation::Delete]
        );
    }

    #[test]
    fn test_parse_legacy_keys() {
        let yaml_content = r#"
ct-create:
  program: "vzctl"
  arguments: ["create", "{{name}}"]
  vars: ["name"]
ct-set:
  program: "vzctl"
  arguments: ["set", "{{name}}"]
  vars: ["name"]
ct-delete:
  program: "vzctl"
  arguments: ["destroy", "{{name}}"]
  vars: ["name"]
"#;
        let table = parse_operation_table(yaml_content, "inline").unwrap();

        assert!(table.contains(Operation::Create));
        assert!(table.contains(Operation::SetParameters));
        assert!(table.contains(Operation::Delete));
    }

    #[test]
    fn test_parse_does_not_check_templates_against_vars() {
        let yaml_content = r#"
start:
  program: "vzctl"
  arguments: ["start", "{{undeclared}}"]
"#;
        let table = parse_operation_table(yaml_content, "inline").unwrap();
        assert_eq!(
            table.get(Operation::Start).unwrap().arguments,
            vec!["start", "{{undeclared}}"]
        );
    }

    #[test]
    fn test_parse_alias_collision() {
        let yaml_content = r#"
create:
  program: "vzctl"
  arguments: []
ct-create:
  program: "vzctl"
  arguments: []
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(
            result,
            Err(DuplicateOperation {
                operation: Operation::Create,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_unknown_operation() {
        let yaml_content = r#"
migrate:
  program: "vzmigrate"
  arguments: []
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_parse_missing_program() {
        let yaml_content = r#"
delete:
  arguments: ["destroy"]
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_parse_unknown_field() {
        let yaml_content = r#"
delete:
  program: "vzctl"
  arguments: ["destroy"]
  environment: {}
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_parse_duplicate_variable() {
        let yaml_content = r#"
delete:
  program: "vzctl"
  arguments: ["destroy", "{{name}}"]
  vars: ["name", "name"]
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(
            result,
            Err(DuplicateVariable(Operation::Delete, ref var)) if var == "name"
        ));
    }

    #[test]
    fn test_parse_empty_program() {
        let yaml_content = r#"
delete:
  program: ""
  arguments: []
"#;
        let result = parse_operation_table(yaml_content, "inline");
        assert!(matches!(result, Err(EmptyProgram(Operation::Delete))));
    }

    #[test]
    fn test_parse_empty_documents() {
        for yaml_content in ["", "  \n", "{}", "~"] {
            let result = parse_operation_table(yaml_content, "inline");
            assert!(
                matches!(result, Err(ConfigError::Empty { .. })),
                "`{yaml_content}` should be rejected as empty"
            );
        }
    }

    #[test]
    fn test_load_valid_file() {
        let temp_file = write_config(REFERENCE_CONFIG);
        let table = load_operation_table(temp_file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_file_not_found() {
        let result = load_operation_table("/this/path/does/not/exist.yml");
        match result {
            Err(ConfigError::NotFound { path }) => {
                assert_eq!(path, "/this/path/does/not/exist.yml");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = write_config("invalid: yaml: content: [");
        let result = load_operation_table(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Malformed { .. })));
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_operation_table(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_load_invalid_utf8_is_unreadable() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

        let result = load_operation_table(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }
}
