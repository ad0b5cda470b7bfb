use tracing::warn;

use crate::driver::PreparedDml;
use crate::error::SqlBinderError;
use crate::types::ParamValue;

/// Bind every argument by 1-based position.
///
/// # Errors
///
/// Propagates the first driver bind failure.
pub fn bind_parameters(
    stmt: &mut (dyn PreparedDml + '_),
    params: &[ParamValue],
) -> Result<(), SqlBinderError> {
    for (i, value) in params.iter().enumerate() {
        stmt.bind_param(i + 1, value)?;
    }
    Ok(())
}

/// Release a prepared statement, logging (never raising) any error so the
/// release cannot mask the execution outcome.
pub fn close_quietly(stmt: &mut (dyn PreparedDml + '_)) {
    if let Err(err) = stmt.close() {
        warn!(error = %err, "failed to close prepared statement");
    }
}
