use std::io::Read;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;

use crate::error::SqlBinderError;

/// A typed statement argument.
///
/// Every variant carries `Option<T>` so an absent value stays tagged with the
/// kind it would have held. The driver binds a typed SQL NULL for `None`
/// instead of omitting the parameter:
/// ```rust
/// use sql_binder::ParamValue;
///
/// let present = ParamValue::Int(Some(5));
/// let null_of_int = ParamValue::Int(None);
/// assert!(null_of_int.is_null());
/// assert_eq!(present.kind(), null_of_int.kind());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer value (32-bit)
    Int(Option<i32>),
    /// Integer value (64-bit)
    BigInt(Option<i64>),
    /// Floating point value (32-bit)
    Float(Option<f32>),
    /// Floating point value (64-bit)
    Double(Option<f64>),
    /// Exact decimal value
    Decimal(Option<Decimal>),
    /// Text/string value
    Text(Option<String>),
    /// Boolean value
    Bool(Option<bool>),
    /// Timestamp value
    Timestamp(Option<NaiveDateTime>),
    /// Binary data
    Bytes(Option<Vec<u8>>),
    /// Large character data
    Clob(Option<String>),
    /// JSON value
    Json(Option<JsonValue>),
}

/// The data kind a [`ParamValue`] is tagged with, independent of whether a
/// value is present. Used when rendering diagnostics for typed nulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Text,
    Bool,
    Timestamp,
    Bytes,
    Clob,
    Json,
}

impl ParamKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Int => "int",
            ParamKind::BigInt => "bigint",
            ParamKind::Float => "float",
            ParamKind::Double => "double",
            ParamKind::Decimal => "decimal",
            ParamKind::Text => "text",
            ParamKind::Bool => "bool",
            ParamKind::Timestamp => "timestamp",
            ParamKind::Bytes => "bytes",
            ParamKind::Clob => "clob",
            ParamKind::Json => "json",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ParamValue {
    /// The declared kind of this argument.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::BigInt(_) => ParamKind::BigInt,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Double(_) => ParamKind::Double,
            ParamValue::Decimal(_) => ParamKind::Decimal,
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Timestamp(_) => ParamKind::Timestamp,
            ParamValue::Bytes(_) => ParamKind::Bytes,
            ParamValue::Clob(_) => ParamKind::Clob,
            ParamValue::Json(_) => ParamKind::Json,
        }
    }

    /// Check if this argument is a typed NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            ParamValue::Int(v) => v.is_none(),
            ParamValue::BigInt(v) => v.is_none(),
            ParamValue::Float(v) => v.is_none(),
            ParamValue::Double(v) => v.is_none(),
            ParamValue::Decimal(v) => v.is_none(),
            ParamValue::Text(v) | ParamValue::Clob(v) => v.is_none(),
            ParamValue::Bool(v) => v.is_none(),
            ParamValue::Timestamp(v) => v.is_none(),
            ParamValue::Bytes(v) => v.is_none(),
            ParamValue::Json(v) => v.is_none(),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        if let ParamValue::Int(value) = self {
            *value
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bigint(&self) -> Option<i64> {
        if let ParamValue::BigInt(value) = self {
            *value
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        if let ParamValue::Double(value) = self {
            *value
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(value) | ParamValue::Clob(value) => value.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => *value,
            ParamValue::Int(Some(1)) | ParamValue::BigInt(Some(1)) => Some(true),
            ParamValue::Int(Some(0)) | ParamValue::BigInt(Some(0)) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let ParamValue::Timestamp(value) = self {
            *value
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let ParamValue::Bytes(value) = self {
            value.as_deref()
        } else {
            None
        }
    }

    /// Drain a binary stream into a [`ParamValue::Bytes`] argument.
    ///
    /// A `None` reader becomes the typed NULL of the binary kind.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::IoError`] if reading the stream fails.
    pub fn bytes_from_reader(reader: Option<impl Read>) -> Result<Self, SqlBinderError> {
        match reader {
            Some(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(ParamValue::Bytes(Some(buf)))
            }
            None => Ok(ParamValue::Bytes(None)),
        }
    }

    /// Drain a character stream into a [`ParamValue::Clob`] argument.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::IoError`] if reading fails or the stream is
    /// not valid UTF-8.
    pub fn clob_from_reader(reader: Option<impl Read>) -> Result<Self, SqlBinderError> {
        match reader {
            Some(mut reader) => {
                let mut buf = String::new();
                reader.read_to_string(&mut buf)?;
                Ok(ParamValue::Clob(Some(buf)))
            }
            None => Ok(ParamValue::Clob(None)),
        }
    }
}

macro_rules! impl_from_value {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for ParamValue {
            fn from(value: $ty) -> Self {
                ParamValue::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for ParamValue {
            fn from(value: Option<$ty>) -> Self {
                ParamValue::$variant(value)
            }
        }
    };
}

impl_from_value!(Int, i32);
impl_from_value!(BigInt, i64);
impl_from_value!(Float, f32);
impl_from_value!(Double, f64);
impl_from_value!(Decimal, Decimal);
impl_from_value!(Text, String);
impl_from_value!(Bool, bool);
impl_from_value!(Timestamp, NaiveDateTime);
impl_from_value!(Bytes, Vec<u8>);
impl_from_value!(Json, JsonValue);

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(Some(value.to_string()))
    }
}

impl From<Option<&str>> for ParamValue {
    fn from(value: Option<&str>) -> Self {
        ParamValue::Text(value.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_null_keeps_its_kind() {
        let null_int = ParamValue::Int(None);
        assert!(null_int.is_null());
        assert_eq!(null_int.kind(), ParamKind::Int);
        assert_ne!(null_int.kind(), ParamValue::Text(None).kind());
    }

    #[test]
    fn from_option_preserves_none() {
        let v: ParamValue = Option::<i64>::None.into();
        assert_eq!(v, ParamValue::BigInt(None));
        let v: ParamValue = Some(7i64).into();
        assert_eq!(v.as_bigint(), Some(7));
    }

    #[test]
    fn reader_drains_to_bytes() {
        let v = ParamValue::bytes_from_reader(Some(&b"abc"[..])).unwrap();
        assert_eq!(v.as_bytes(), Some(&b"abc"[..]));

        let v = ParamValue::bytes_from_reader(None::<&[u8]>).unwrap();
        assert_eq!(v, ParamValue::Bytes(None));
    }

    #[test]
    fn reader_drains_to_clob() {
        let v = ParamValue::clob_from_reader(Some("hello".as_bytes())).unwrap();
        assert_eq!(v.as_text(), Some("hello"));

        let v = ParamValue::clob_from_reader(None::<&[u8]>).unwrap();
        assert_eq!(v, ParamValue::Clob(None));
    }

    #[test]
    fn clob_reader_rejects_invalid_utf8() {
        let bad: &[u8] = &[0xff, 0xfe];
        assert!(ParamValue::clob_from_reader(Some(bad)).is_err());
    }
}
