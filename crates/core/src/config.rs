//! Configuration path utilities for vzcmd.
//!
//! This module resolves the path of the operations config file and expands
//! shell shorthand like `~` in it.

/// Default path for the operations configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.vzcmd/commands.yml";

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Arguments
///
/// * `config_path_arg` - Optional custom configuration file path
///
/// # Examples
///
/// ```
/// use vzcmd_core::config::get_config_path;
///
/// let default_path = get_config_path(None);
/// assert!(default_path.ends_with("commands.yml"));
///
/// let custom_path = get_config_path(Some("/etc/vzcmd/commands.yml"));
/// assert_eq!(custom_path, "/etc/vzcmd/commands.yml");
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: Option<&str>) -> String {
    let config_path = config_path_arg.unwrap_or(DEFAULT_CONFIG_PATH);

    shellexpand::tilde(config_path).to_string()
}
