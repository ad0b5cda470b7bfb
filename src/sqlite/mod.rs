// SQLite backend over rusqlite.
//
// - params: conversion from ParamValue to rusqlite values
// - statement handle: raw positional binding + raw execution

pub mod params;

pub use rusqlite;

use rusqlite::Statement;

use crate::driver::{DmlConnection, PreparedDml};
use crate::error::SqlBinderError;
use crate::types::ParamValue;

use params::param_to_sqlite_value;

/// A prepared `SQLite` statement. Closing finalizes the underlying handle;
/// later operations on a closed handle fail rather than re-prepare.
pub struct SqliteStatement<'conn> {
    stmt: Option<Statement<'conn>>,
}

impl<'conn> SqliteStatement<'conn> {
    fn live(&mut self) -> Result<&mut Statement<'conn>, SqlBinderError> {
        self.stmt.as_mut().ok_or_else(|| {
            SqlBinderError::ConnectionError("prepared statement already closed".to_string())
        })
    }
}

impl PreparedDml for SqliteStatement<'_> {
    fn bind_param(&mut self, index: usize, value: &ParamValue) -> Result<(), SqlBinderError> {
        let converted = param_to_sqlite_value(value);
        self.live()?.raw_bind_parameter(index, converted)?;
        Ok(())
    }

    fn execute_update(&mut self) -> Result<usize, SqlBinderError> {
        Ok(self.live()?.raw_execute()?)
    }

    fn close(&mut self) -> Result<(), SqlBinderError> {
        match self.stmt.take() {
            Some(stmt) => Ok(stmt.finalize()?),
            None => Ok(()),
        }
    }
}

impl DmlConnection for rusqlite::Connection {
    fn prepare_dml<'conn>(
        &'conn mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedDml + 'conn>, SqlBinderError> {
        let stmt = self.prepare(sql)?;
        Ok(Box::new(SqliteStatement { stmt: Some(stmt) }))
    }
}
