use crate::error::SqlBinderError;
use crate::types::ParamValue;

/// A prepared statement handle: bindable by position, executable, closeable.
///
/// Implementations convert each [`ParamValue`] to their native parameter
/// type; a typed null must bind a SQL NULL of the declared kind rather than
/// fail or skip the position.
pub trait PreparedDml {
    /// Bind one argument at a 1-based position.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver rejects the bind (bad index, closed
    /// handle, unsupported type).
    fn bind_param(&mut self, index: usize, value: &ParamValue) -> Result<(), SqlBinderError>;

    /// Run the statement and return the affected-row count.
    ///
    /// # Errors
    ///
    /// Returns an error if execution fails.
    fn execute_update(&mut self) -> Result<usize, SqlBinderError>;

    /// Release the statement. Safe to call more than once; later calls are
    /// no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver reports a failure during release. The
    /// executor logs and swallows it so it never masks the primary outcome.
    fn close(&mut self) -> Result<(), SqlBinderError>;
}

/// A connection that can prepare DML statements with positional placeholders.
pub trait DmlConnection {
    /// Prepare a statement for the given SQL text.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed SQL or a lost connection.
    fn prepare_dml<'conn>(
        &'conn mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedDml + 'conn>, SqlBinderError>;
}
