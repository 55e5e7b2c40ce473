use itertools::Itertools;
use vzcmd_core::error::Result;
use vzcmd_core::error::ValidationError::{DuplicateParameter, ParameterFormat};
use vzcmd_core::parameters::Options;

/// Splits one named parameter at its first `=`.
fn parse_named_parameter(param_str: &str) -> Result<(String, String)> {
    match param_str.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(ParameterFormat(param_str.to_string()).into()),
    }
}

/// Parses named parameters in the format `key=value` into options, keeping
/// the order they were given in.
///
/// Values may themselves contain `=`; only the first one separates the key.
///
/// # Errors
///
/// Returns an error if:
/// - A parameter has no `=` or an empty key
/// - The same key is given more than once
///
/// # Examples
///
/// ```rust
/// use vzcmd_cli::arguments::parse_options;
///
/// let options = parse_options(&["ram=1G".to_string(), "cpus=2".to_string()]).unwrap();
/// assert_eq!(options.get("ram").map(String::as_str), Some("1G"));
/// ```
pub fn parse_options(named_params: &[String]) -> Result<Options> {
    let pairs: Vec<(String, String)> = named_params
        .iter()
        .map(|param_str| parse_named_parameter(param_str))
        .collect::<Result<_>>()?;

    if let Some(key) = pairs.iter().map(|(key, _)| key).duplicates().next() {
        return Err(DuplicateParameter(key.clone()).into());
    }

    Ok(pairs.into_iter().collect())
}
