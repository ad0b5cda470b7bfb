use std::collections::HashMap;

use crate::error::SqlBinderError;
use crate::types::ParamValue;

const MIXED_STYLES: &str = "use either positional or named query parameters, not both";

/// Accumulated arguments for one statement: either an ordered positional
/// sequence or a name-to-value mapping, never both.
///
/// The single-style invariant is enforced when an argument is added, not
/// deferred to execution, so misuse fails at the offending call site.
#[derive(Debug, Clone, Default)]
pub struct ParamBuffer {
    positional: Vec<ParamValue>,
    named: HashMap<String, ParamValue>,
}

impl ParamBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument; insertion order is bind order.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::ParameterError`] if a named argument has
    /// already been supplied.
    pub fn add_positional(&mut self, value: ParamValue) -> Result<(), SqlBinderError> {
        if !self.named.is_empty() {
            return Err(SqlBinderError::ParameterError(MIXED_STYLES.to_string()));
        }
        self.positional.push(value);
        Ok(())
    }

    /// Insert a named argument, overwriting any prior value for the same
    /// name. One leading `:` is stripped from the name if present.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::ParameterError`] if a positional argument
    /// has already been supplied.
    pub fn add_named(&mut self, name: &str, value: ParamValue) -> Result<(), SqlBinderError> {
        if !self.positional.is_empty() {
            return Err(SqlBinderError::ParameterError(MIXED_STYLES.to_string()));
        }
        let name = name.strip_prefix(':').unwrap_or(name);
        self.named.insert(name.to_string(), value);
        Ok(())
    }

    /// Whether the buffer holds named arguments.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.named.is_empty()
    }

    #[must_use]
    pub fn positional(&self) -> &[ParamValue] {
        &self.positional
    }

    #[must_use]
    pub fn named(&self) -> &HashMap<String, ParamValue> {
        &self.named
    }

    pub(crate) fn into_positional(self) -> Vec<ParamValue> {
        self.positional
    }
}
