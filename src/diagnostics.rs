use std::fmt;

use tracing::{debug, error};
use uuid::Uuid;

use crate::metric::Metric;
use crate::types::ParamValue;

/// Settings governing failure correlation and what the diagnostic records may
/// contain.
///
/// Argument values are useful when debugging a production failure but may be
/// sensitive; turn `log_parameters` off to render only the argument kinds.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Prefix for generated correlation codes.
    pub code_prefix: String,
    /// Include argument values in diagnostics (kinds only when off).
    pub log_parameters: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            code_prefix: "err".to_string(),
            log_parameters: true,
        }
    }
}

impl LogSettings {
    /// Produce an opaque correlation code.
    ///
    /// The code ties a user-facing error to the detailed server-side record
    /// without exposing SQL or argument values across that boundary.
    #[must_use]
    pub fn generate_error_code(&self) -> String {
        format!("{}-{}", self.code_prefix, Uuid::new_v4().simple())
    }
}

/// Failure context captured at the point of a statement error: the resolved
/// SQL, the rendered argument values, and the correlation code.
#[derive(Debug, Clone)]
pub struct SqlDiagnostics {
    error_code: String,
    sql: String,
    params: String,
}

impl SqlDiagnostics {
    #[must_use]
    pub fn new(settings: &LogSettings, sql: &str, params: &[ParamValue]) -> Self {
        Self {
            error_code: settings.generate_error_code(),
            sql: sql.to_string(),
            params: render_params(params, settings.log_parameters),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn params(&self) -> &str {
        &self.params
    }
}

impl fmt::Display for SqlDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "errorCode={} sql=\"{}\" params={}",
            self.error_code, self.sql, self.params
        )
    }
}

pub(crate) fn render_params(params: &[ParamValue], with_values: bool) -> String {
    let mut out = String::from("[");
    for (i, value) in params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if with_values {
            out.push_str(&format!("{value:?}"));
        } else {
            out.push_str(value.kind().as_str());
        }
    }
    out.push(']');
    out
}

/// Emit the single success record for an execution.
pub(crate) fn log_success(
    kind: &str,
    metric: &Metric,
    sql: &str,
    params: &[ParamValue],
    rows: usize,
    settings: &LogSettings,
) {
    debug!(
        timing = %metric.render(),
        sql,
        params = %render_params(params, settings.log_parameters),
        rows,
        "{kind} succeeded",
    );
}

/// Emit the single failure record for an execution.
pub(crate) fn log_failure(
    kind: &str,
    metric: &Metric,
    error_code: Option<&str>,
    sql: &str,
    params: &[ParamValue],
    settings: &LogSettings,
) {
    error!(
        timing = %metric.render(),
        error_code = error_code.unwrap_or("-"),
        sql,
        params = %render_params(params, settings.log_parameters),
        "{kind} failed",
    );
}
