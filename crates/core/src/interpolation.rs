//! Placeholder substitution for operation argument templates.
//!
//! An argument template is literal text that may contain `{{name}}`
//! placeholders. Binding replaces each placeholder whose name is declared in
//! the operation's `vars` and supplied in the [`ParameterSet`]. Substituted
//! values are copied through as-is and never rescanned, so the output does not
//! depend on the order variables are declared in.

use crate::error::BindError::UnresolvedPlaceholder;
use crate::error::Result;
use crate::operation_definitions::OperationSpec;
use crate::parameters::ParameterSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// What to do with a placeholder that cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubstitutionPolicy {
    /// Leave the placeholder in the argument verbatim.
    #[default]
    Permissive,
    /// Fail with [`UnresolvedPlaceholder`].
    Strict,
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder { token: &'a str, name: &'a str },
}

/// Splits a template into literal runs and well-formed placeholders.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find(OPEN) {
        let open = cursor + offset;
        let name_start = open + OPEN.len();

        let placeholder = template[name_start..].find(CLOSE).and_then(|length| {
            let name = &template[name_start..name_start + length];
            let is_name = !name.is_empty() && !name.contains(['{', '}']);
            is_name.then_some((name, name_start + length + CLOSE.len()))
        });

        match placeholder {
            Some((name, end)) => {
                if literal_start < open {
                    segments.push(Segment::Literal(&template[literal_start..open]));
                }
                segments.push(Segment::Placeholder {
                    token: &template[open..end],
                    name,
                });
                literal_start = end;
                cursor = end;
            }
            // `{` is one byte, so stepping past it stays on a char boundary.
            None => cursor = open + 1,
        }
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }

    segments
}

/// Names of all placeholders in `template`, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    segments(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

fn bind_argument(
    template: &str,
    spec: &OperationSpec,
    parameters: &ParameterSet,
    policy: SubstitutionPolicy,
) -> Result<String> {
    let mut argument = String::with_capacity(template.len());

    for segment in segments(template) {
        match segment {
            Segment::Literal(text) => argument.push_str(text),
            Segment::Placeholder { token, name } => {
                let value = spec
                    .vars
                    .contains(name)
                    .then(|| parameters.get(name))
                    .flatten();

                match (value, policy) {
                    (Some(value), _) => argument.push_str(value),
                    (None, SubstitutionPolicy::Permissive) => argument.push_str(token),
                    (None, SubstitutionPolicy::Strict) => {
                        return Err(UnresolvedPlaceholder {
                            argument: template.to_string(),
                            placeholder: name.to_string(),
                        }
                        .into());
                    }
                }
            }
        }
    }

    Ok(argument)
}

/// Resolves every argument template of `spec` against `parameters`.
///
/// Produces one argument per template, in order. A placeholder is replaced
/// only when its name is in `spec.vars` and present in `parameters`; what
/// happens to the rest is decided by `policy`.
///
/// # Errors
///
/// Only under [`SubstitutionPolicy::Strict`]: returns [`UnresolvedPlaceholder`]
/// for the first placeholder that could not be resolved.
pub fn bind(
    spec: &OperationSpec,
    parameters: &ParameterSet,
    policy: SubstitutionPolicy,
) -> Result<Vec<String>> {
    spec.arguments
        .iter()
        .map(|template| bind_argument(template, spec, parameters, policy))
        .collect()
}
