use crate::binding::{bind_parameters, close_quietly};
use crate::diagnostics::{self, LogSettings, SqlDiagnostics};
use crate::driver::{DmlConnection, PreparedDml};
use crate::error::SqlBinderError;
use crate::metric::Metric;
use crate::params::ParamBuffer;
use crate::translation::NamedParamSql;
use crate::types::ParamValue;

use super::DmlBuilder;

impl<C: DmlConnection + ?Sized> DmlBuilder<'_, C> {
    /// Run the statement and return the affected-row count, with no
    /// expectation on what that count is.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::ParameterError`] for argument misuse and
    /// [`SqlBinderError::ExecutionError`] for prepare/bind/execute failures.
    pub fn execute(self) -> Result<usize, SqlBinderError> {
        self.run(0)
    }

    /// Run the statement and require exactly `expected` affected rows.
    ///
    /// An `expected` of zero disables the check (same as
    /// [`execute`](DmlBuilder::execute)).
    ///
    /// # Errors
    ///
    /// As [`execute`](DmlBuilder::execute), plus
    /// [`SqlBinderError::WrongNumberOfRows`] when the affected-row count
    /// differs from a positive `expected`.
    pub fn execute_expecting(self, expected: usize) -> Result<usize, SqlBinderError> {
        self.run(expected)
    }

    fn run(self, expected_rows: usize) -> Result<usize, SqlBinderError> {
        let DmlBuilder {
            conn,
            sql,
            params,
            log,
        } = self;
        let mut metric = Metric::new();

        // Argument misuse surfaces before any driver interaction.
        let (exec_sql, args) = match resolve(sql, params) {
            Ok(resolved) => resolved,
            Err(err) => {
                diagnostics::log_failure("DML", &metric, None, sql, &[], &log);
                return Err(err);
            }
        };

        let outcome = run_statement(conn, &exec_sql, &args, expected_rows, &log, &mut metric);
        match &outcome {
            Ok(rows) => diagnostics::log_success("DML", &metric, &exec_sql, &args, *rows, &log),
            Err(err) => {
                diagnostics::log_failure("DML", &metric, err.error_code(), &exec_sql, &args, &log);
            }
        }
        outcome
    }
}

/// Select the SQL text and argument array for execution: rewrite named
/// placeholders when named arguments were supplied, otherwise pass the
/// template and the positional sequence through verbatim.
fn resolve(
    sql: &str,
    params: ParamBuffer,
) -> Result<(String, Vec<ParamValue>), SqlBinderError> {
    if params.is_named() {
        let parsed = NamedParamSql::parse(sql);
        let args = parsed.to_positional_args(params.named())?;
        Ok((parsed.into_sql(), args))
    } else {
        Ok((sql.to_owned(), params.into_positional()))
    }
}

fn run_statement<C: DmlConnection + ?Sized>(
    conn: &mut C,
    sql: &str,
    args: &[ParamValue],
    expected_rows: usize,
    log: &LogSettings,
    metric: &mut Metric,
) -> Result<usize, SqlBinderError> {
    let result = match conn.prepare_dml(sql) {
        Ok(mut stmt) => {
            let result = bind_and_execute(stmt.as_mut(), sql, args, expected_rows, log, metric);
            close_quietly(stmt.as_mut());
            result
        }
        Err(cause) => Err(execution_error(log, sql, args, cause)),
    };
    metric.checkpoint("close");
    result
}

fn bind_and_execute(
    stmt: &mut (dyn PreparedDml + '_),
    sql: &str,
    args: &[ParamValue],
    expected_rows: usize,
    log: &LogSettings,
    metric: &mut Metric,
) -> Result<usize, SqlBinderError> {
    bind_parameters(stmt, args).map_err(|cause| execution_error(log, sql, args, cause))?;
    metric.checkpoint("prepare");

    let affected = stmt
        .execute_update()
        .map_err(|cause| execution_error(log, sql, args, cause))?;
    metric.checkpoint("execute");

    if expected_rows > 0 && affected != expected_rows {
        return Err(SqlBinderError::WrongNumberOfRows {
            actual: affected,
            expected: expected_rows,
            diagnostics: SqlDiagnostics::new(log, sql, args),
        });
    }
    Ok(affected)
}

fn execution_error(
    log: &LogSettings,
    sql: &str,
    args: &[ParamValue],
    cause: SqlBinderError,
) -> SqlBinderError {
    SqlBinderError::ExecutionError {
        diagnostics: SqlDiagnostics::new(log, sql, args),
        cause: Box::new(cause),
    }
}
