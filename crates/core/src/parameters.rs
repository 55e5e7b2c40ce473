//! Per-call parameter sets used to resolve placeholders.
//!
//! A [`ParameterSet`] is built by the commander for a single operation call
//! and dropped when the call returns. Names are caller-controlled and need not
//! match any declared variable; only the empty name is rejected.

use indexmap::IndexMap;

use crate::error::ValidationError::InvalidParameterName;
use crate::error::{Error, Result};

/// Caller-supplied extra options for an operation, in the order given.
pub type Options = IndexMap<String, String>;

/// Validated name/value pairs for one operation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: IndexMap<String, String>,
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(InvalidParameterName(name.to_string()).into());
    }

    Ok(())
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from caller options, validating every name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameterName`] for the first invalid option name.
    pub fn from_options<S: ::std::hash::BuildHasher>(
        options: &IndexMap<String, String, S>,
    ) -> Result<Self> {
        let mut parameters = Self::new();
        for (name, value) in options {
            parameters.insert(name.clone(), value.clone())?;
        }
        Ok(parameters)
    }

    /// Sets `name` to `value`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameterName`] if `name` is empty.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        self.values.insert(name, value.into());
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<&Options> for ParameterSet {
    type Error = Error;

    fn try_from(options: &Options) -> Result<Self> {
        Self::from_options(options)
    }
}
