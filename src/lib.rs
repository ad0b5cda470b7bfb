//! Parameterized SQL statement execution with named-placeholder support.
//!
//! This crate takes a SQL template containing either traditional positional
//! placeholders (`?`) or named placeholders (`:name`), collects typed
//! arguments for it, rewrites named-placeholder SQL into the positional form
//! the driver accepts, binds every argument with correct NULL handling, runs
//! the statement, and checks the affected-row count against the caller's
//! expectation.
//!
//! ```rust
//! use sql_binder::prelude::*;
//! use sql_binder::sqlite::rusqlite::Connection;
//!
//! # fn demo() -> Result<(), SqlBinderError> {
//! let mut conn = Connection::open_in_memory()?;
//! conn.execute_batch("CREATE TABLE t (x INTEGER, y TEXT)")?;
//!
//! dml(&mut conn, "insert into t (x, y) values (:x, :y)")
//!     .arg_int_named("x", Some(5))?
//!     .arg_text_named("y", Some("hi"))?
//!     .execute_expecting(1)?;
//! # Ok(()) }
//! ```
//!
//! Positional and named styles may not be mixed on one statement; a named
//! token in the SQL with no supplied value fails before the database is
//! touched; a `None` argument binds a typed SQL NULL rather than being
//! dropped. Failures carry the SQL text, the resolved argument values, and an
//! opaque correlation code that is safe to show outside trusted logs.

pub mod binding;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod metric;
pub mod params;
pub mod prelude;
pub mod statement;
pub mod translation;
pub mod types;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::SqlBinderError;
pub use statement::{DmlBuilder, dml};
pub use types::{ParamKind, ParamValue};
