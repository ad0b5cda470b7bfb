//! Convenient imports for common functionality.

pub use crate::diagnostics::LogSettings;
pub use crate::driver::{DmlConnection, PreparedDml};
pub use crate::error::SqlBinderError;
pub use crate::params::ParamBuffer;
pub use crate::statement::{DmlBuilder, dml};
pub use crate::translation::NamedParamSql;
pub use crate::types::{ParamKind, ParamValue};
