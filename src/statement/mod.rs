use std::io::Read;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::diagnostics::LogSettings;
use crate::driver::DmlConnection;
use crate::error::SqlBinderError;
use crate::params::ParamBuffer;
use crate::types::ParamValue;

mod exec;

/// Start a fluent DML statement against a connection.
pub fn dml<'a, C: DmlConnection + ?Sized>(conn: &'a mut C, sql: &'a str) -> DmlBuilder<'a, C> {
    DmlBuilder::new(conn, sql)
}

/// Fluent builder for one parameterized DML execution.
///
/// Arguments are supplied either positionally (`arg_int`, `arg_text`, ...) or
/// by name (`arg_int_named`, ...); the two styles cannot be mixed on one
/// builder and misuse fails at the offending call. A `None` argument binds a
/// typed SQL NULL of that kind.
///
/// The builder is single-use: [`execute`](DmlBuilder::execute) or
/// [`execute_expecting`](DmlBuilder::execute_expecting) consumes it, runs the
/// statement, and releases the prepared handle on every exit path.
///
/// ```rust,no_run
/// use sql_binder::prelude::*;
/// use sql_binder::sqlite::rusqlite::Connection;
///
/// # fn demo(conn: &mut Connection) -> Result<(), SqlBinderError> {
/// let rows = dml(conn, "insert into t (x, y) values (:x, :y)")
///     .arg_long_named("x", Some(5))?
///     .arg_text_named("y", Some("hi"))?
///     .execute_expecting(1)?;
/// assert_eq!(rows, 1);
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct DmlBuilder<'a, C: DmlConnection + ?Sized> {
    conn: &'a mut C,
    sql: &'a str,
    params: ParamBuffer,
    log: LogSettings,
}

macro_rules! typed_args {
    ($(#[$doc:meta] $positional:ident / $named:ident => $variant:ident($ty:ty);)+) => {
        $(
            #[$doc]
            pub fn $positional(self, value: Option<$ty>) -> Result<Self, SqlBinderError> {
                self.positional(ParamValue::$variant(value))
            }

            #[$doc]
            pub fn $named(self, name: &str, value: Option<$ty>) -> Result<Self, SqlBinderError> {
                self.named(name, ParamValue::$variant(value))
            }
        )+
    };
}

impl<'a, C: DmlConnection + ?Sized> DmlBuilder<'a, C> {
    pub fn new(conn: &'a mut C, sql: &'a str) -> Self {
        Self {
            conn,
            sql,
            params: ParamBuffer::new(),
            log: LogSettings::default(),
        }
    }

    /// Override the default diagnostics settings.
    #[must_use]
    pub fn log_settings(mut self, settings: LogSettings) -> Self {
        self.log = settings;
        self
    }

    typed_args! {
        /// 32-bit integer argument.
        arg_int / arg_int_named => Int(i32);
        /// 64-bit integer argument.
        arg_long / arg_long_named => BigInt(i64);
        /// 32-bit float argument.
        arg_float / arg_float_named => Float(f32);
        /// 64-bit float argument.
        arg_double / arg_double_named => Double(f64);
        /// Exact decimal argument.
        arg_decimal / arg_decimal_named => Decimal(Decimal);
        /// Boolean argument.
        arg_bool / arg_bool_named => Bool(bool);
        /// Timestamp argument.
        arg_timestamp / arg_timestamp_named => Timestamp(NaiveDateTime);
        /// Binary argument from an owned byte buffer.
        arg_blob / arg_blob_named => Bytes(Vec<u8>);
        /// JSON argument.
        arg_json / arg_json_named => Json(JsonValue);
    }

    /// Text argument.
    pub fn arg_text<S: Into<String>>(self, value: Option<S>) -> Result<Self, SqlBinderError> {
        self.positional(ParamValue::Text(value.map(Into::into)))
    }

    /// Text argument bound by name.
    pub fn arg_text_named<S: Into<String>>(
        self,
        name: &str,
        value: Option<S>,
    ) -> Result<Self, SqlBinderError> {
        self.named(name, ParamValue::Text(value.map(Into::into)))
    }

    /// Large character argument from text.
    pub fn arg_clob<S: Into<String>>(self, value: Option<S>) -> Result<Self, SqlBinderError> {
        self.positional(ParamValue::Clob(value.map(Into::into)))
    }

    /// Large character argument from text, bound by name.
    pub fn arg_clob_named<S: Into<String>>(
        self,
        name: &str,
        value: Option<S>,
    ) -> Result<Self, SqlBinderError> {
        self.named(name, ParamValue::Clob(value.map(Into::into)))
    }

    /// Binary argument drained from a stream at this call.
    pub fn arg_blob_stream(self, reader: Option<impl Read>) -> Result<Self, SqlBinderError> {
        let value = ParamValue::bytes_from_reader(reader)?;
        self.positional(value)
    }

    /// Binary argument drained from a stream, bound by name.
    pub fn arg_blob_stream_named(
        self,
        name: &str,
        reader: Option<impl Read>,
    ) -> Result<Self, SqlBinderError> {
        let value = ParamValue::bytes_from_reader(reader)?;
        self.named(name, value)
    }

    /// Large character argument drained from a stream at this call.
    pub fn arg_clob_reader(self, reader: Option<impl Read>) -> Result<Self, SqlBinderError> {
        let value = ParamValue::clob_from_reader(reader)?;
        self.positional(value)
    }

    /// Large character argument drained from a stream, bound by name.
    pub fn arg_clob_reader_named(
        self,
        name: &str,
        reader: Option<impl Read>,
    ) -> Result<Self, SqlBinderError> {
        let value = ParamValue::clob_from_reader(reader)?;
        self.named(name, value)
    }

    /// Append a batch of positional arguments in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::ParameterError`] if named arguments were
    /// already supplied.
    pub fn args(
        mut self,
        values: impl IntoIterator<Item = ParamValue>,
    ) -> Result<Self, SqlBinderError> {
        for value in values {
            self.params.add_positional(value)?;
        }
        Ok(self)
    }

    fn positional(mut self, value: ParamValue) -> Result<Self, SqlBinderError> {
        self.params.add_positional(value)?;
        Ok(self)
    }

    fn named(mut self, name: &str, value: ParamValue) -> Result<Self, SqlBinderError> {
        self.params.add_named(name, value)?;
        Ok(self)
    }
}
