//! Integration tests for vzcmd-core
//!
//! These tests verify that loading, binding, building and execution work
//! together correctly by running complete workflows end-to-end.

use std::io::Write;
use std::thread;

use tempfile::NamedTempFile;
use vzcmd_core::{
    commander::{Commander, ContainerLifecycle},
    error::{ConfigError, Error, ExecutionError, ValidationError},
    file_handling::load_operation_table,
    interpolation::{bind, SubstitutionPolicy},
    invocation::{build, InvocationDescriptor},
    operation_definitions::Operation,
    parameters::{Options, ParameterSet},
};

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{content}").unwrap();
    temp_file
}

/// Test loading a configuration and reading every spec back unchanged
#[test]
fn test_configuration_round_trip_workflow() {
    let yaml_content = r#"
create:
  program: "toolctl"
  arguments: ["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
  vars: ["name", "ostemplate"]
set-parameters:
  program: "toolctl"
  arguments: ["set", "{{name}}", "--ram", "{{ram}}", "--cpus", "{{cpus}}", "--save"]
  vars: ["ram", "name", "cpus"]
delete:
  program: "/usr/sbin/toolctl"
  arguments: ["destroy", "{{name}}"]
  vars: []
"#;
    let temp_file = write_config(yaml_content);

    let table = load_operation_table(temp_file.path()).unwrap();

    let create = table.get(Operation::Create).unwrap();
    assert_eq!(create.program, "toolctl");
    assert_eq!(
        create.arguments,
        vec!["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
    );
    assert_eq!(
        create.vars.iter().collect::<Vec<_>>(),
        vec!["name", "ostemplate"]
    );

    let set = table.get(Operation::SetParameters).unwrap();
    assert_eq!(
        set.arguments,
        vec!["set", "{{name}}", "--ram", "{{ram}}", "--cpus", "{{cpus}}", "--save"]
    );
    assert_eq!(
        set.vars.iter().collect::<Vec<_>>(),
        vec!["ram", "name", "cpus"]
    );

    let delete = table.get(Operation::Delete).unwrap();
    assert_eq!(delete.program, "/usr/sbin/toolctl");
    assert!(delete.vars.is_empty());
}

/// Test the create call resolving to the exact expected invocation
#[test]
fn test_create_resolution_workflow() {
    let yaml_content = r#"
create:
  program: "toolctl"
  arguments: ["create", "{{name}}", "--ostemplate", "{{ostemplate}}"]
  vars: ["name", "ostemplate"]
"#;
    let temp_file = write_config(yaml_content);
    let table = load_operation_table(temp_file.path()).unwrap();
    let spec = table.get(Operation::Create).unwrap();

    let parameters = ParameterSet::new()
        .with("name", "101")
        .unwrap()
        .with("ostemplate", "ubuntu")
        .unwrap();
    let arguments = bind(spec, &parameters, SubstitutionPolicy::Permissive).unwrap();

    assert_eq!(
        build(spec, arguments),
        InvocationDescriptor {
            program: "toolctl".to_string(),
            arguments: vec![
                "create".to_string(),
                "101".to_string(),
                "--ostemplate".to_string(),
                "ubuntu".to_string(),
            ],
        }
    );
}

/// Test error handling for configurations that cannot be loaded
#[test]
fn test_configuration_error_workflow() {
    let result = Commander::from_path("/this/path/does/not/exist.yml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::NotFound { .. }))
    ));

    let invalid = write_config("create: [unterminated");
    let result = Commander::from_path(invalid.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::Malformed { .. }))
    ));

    let wrong_shape = write_config("create: \"just a string\"");
    let result = Commander::from_path(wrong_shape.path());
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::Malformed { .. }))
    ));
}

/// Test the unconfigured to ready transition of a commander
#[test]
fn test_commander_state_workflow() {
    let commander = Commander::new();
    assert!(!commander.is_ready());
    assert!(matches!(
        commander.delete_container("101"),
        Err(Error::Config(ConfigError::NotLoaded))
    ));

    let temp_file = write_config(
        r#"
delete:
  program: "true"
  arguments: ["{{name}}"]
  vars: ["name"]
"#,
    );
    commander.load(temp_file.path()).unwrap();
    assert!(commander.is_ready());

    assert!(matches!(
        commander.load(temp_file.path()),
        Err(Error::Config(ConfigError::AlreadyLoaded))
    ));
}

/// Test validation errors coming back as values
#[test]
fn test_missing_parameters_workflow() {
    let temp_file = write_config(
        r#"
set-parameters:
  program: "toolctl"
  arguments: ["set", "{{name}}"]
  vars: ["name"]
"#,
    );
    let commander = Commander::from_path(temp_file.path()).unwrap();

    let result = commander.set_container_parameters("x", &Options::new());

    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MissingParameters(
            Operation::SetParameters
        )))
    ));
}

/// Test executing real processes through the commander
#[cfg(unix)]
#[test]
fn test_execution_workflow() {
    let temp_file = write_config(
        r#"
create:
  program: "/bin/sh"
  arguments: ["-c", "echo created {{name}} from {{ostemplate}}"]
  vars: ["name", "ostemplate"]
set-parameters:
  program: "/bin/sh"
  arguments: ["-c", "echo setting {{name}}; exit {{code}}"]
  vars: ["name", "code"]
delete:
  program: "/this/program/does/not/exist"
  arguments: ["{{name}}"]
  vars: ["name"]
"#,
    );
    let commander = Commander::from_path(temp_file.path()).unwrap();

    let output = commander
        .create_container("101", "ubuntu", &Options::new())
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, "created 101 from ubuntu\n");

    let mut options = Options::new();
    options.insert("code".to_string(), "1".to_string());
    match commander.set_container_parameters("101", &options) {
        Err(Error::Execution(ExecutionError::NonZeroExit { code, stdout })) => {
            assert_eq!(code, Some(1));
            assert_eq!(stdout, "setting 101\n");
        }
        other => panic!("expected non-zero exit, got {other:?}"),
    }

    assert!(matches!(
        commander.delete_container("101"),
        Err(Error::Execution(ExecutionError::SpawnFailed { .. }))
    ));
}

/// Test that concurrent callers sharing a commander do not interfere
#[cfg(unix)]
#[test]
fn test_concurrent_calls_workflow() {
    let temp_file = write_config(
        r#"
start:
  program: "/bin/sh"
  arguments: ["-c", "echo {{name}}"]
  vars: ["name"]
"#,
    );
    let commander = Commander::from_path(temp_file.path()).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let commander = &commander;
                scope.spawn(move || {
                    let name = format!("ct-{index}");
                    let output = commander.start_container(&name).unwrap();
                    assert_eq!(output.stdout, format!("{name}\n"));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    });
}
