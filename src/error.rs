use thiserror::Error;

use crate::diagnostics::SqlDiagnostics;

/// Error type covering argument misuse, driver failures, and the row-count
/// contract.
///
/// [`WrongNumberOfRows`](SqlBinderError::WrongNumberOfRows) and
/// [`ExecutionError`](SqlBinderError::ExecutionError) are distinct variants on
/// purpose so callers can pattern-match a failed expectation without string
/// inspection. Both carry [`SqlDiagnostics`]: the resolved SQL, the argument
/// values, and a correlation code.
#[derive(Debug, Error)]
pub enum SqlBinderError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Argument misuse: mixed positional/named styles, or a named token in
    /// the SQL with no supplied value.
    #[error("Parameter error: {0}")]
    ParameterError(String),

    /// Driver-level failure outside the wrapped execution path.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The statement ran, but affected a different number of rows than the
    /// caller declared.
    #[error(
        "The number of affected rows was {actual}, but {expected} were expected. {diagnostics}"
    )]
    WrongNumberOfRows {
        actual: usize,
        expected: usize,
        diagnostics: SqlDiagnostics,
    },

    /// Statement preparation, binding, or execution failed. The driver error
    /// is preserved as the source.
    #[error("Error executing SQL. {diagnostics}")]
    ExecutionError {
        diagnostics: SqlDiagnostics,
        #[source]
        cause: Box<SqlBinderError>,
    },
}

impl SqlBinderError {
    /// The correlation code attached to this failure, if it carries one.
    ///
    /// The code is the only part of a failure that is safe to hand to an
    /// untrusted boundary; everything else (SQL text, argument values) stays
    /// in trusted logs.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            SqlBinderError::WrongNumberOfRows { diagnostics, .. }
            | SqlBinderError::ExecutionError { diagnostics, .. } => {
                Some(diagnostics.error_code())
            }
            _ => None,
        }
    }
}
