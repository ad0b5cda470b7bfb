use rusqlite::types::Value;

use crate::types::ParamValue;

/// Convert a single argument to a rusqlite `Value`.
///
/// A typed null of any kind becomes `Value::Null`; `SQLite` has no per-type
/// NULL marker, so the kind tag only survives into diagnostics. Timestamps
/// are stored in the `%F %T%.f` text form, booleans as integers, JSON and
/// decimals as their text renderings.
#[must_use]
pub fn param_to_sqlite_value(value: &ParamValue) -> Value {
    match value {
        ParamValue::Int(v) => v.map_or(Value::Null, |i| Value::Integer(i64::from(i))),
        ParamValue::BigInt(v) => v.map_or(Value::Null, Value::Integer),
        ParamValue::Float(v) => v.map_or(Value::Null, |f| Value::Real(f64::from(f))),
        ParamValue::Double(v) => v.map_or(Value::Null, Value::Real),
        ParamValue::Decimal(v) => v.map_or(Value::Null, |d| Value::Text(d.to_string())),
        ParamValue::Text(v) | ParamValue::Clob(v) => {
            v.as_ref().map_or(Value::Null, |s| Value::Text(s.clone()))
        }
        ParamValue::Bool(v) => v.map_or(Value::Null, |b| Value::Integer(i64::from(b))),
        ParamValue::Timestamp(v) => {
            v.map_or(Value::Null, |dt| Value::Text(dt.format("%F %T%.f").to_string()))
        }
        ParamValue::Bytes(v) => v.as_ref().map_or(Value::Null, |b| Value::Blob(b.clone())),
        ParamValue::Json(v) => v.as_ref().map_or(Value::Null, |j| Value::Text(j.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    #[test]
    fn values_map_to_native_types() {
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Int(Some(5))),
            Value::Integer(5)
        );
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Bool(Some(true))),
            Value::Integer(1)
        );
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Double(Some(1.5))),
            Value::Real(1.5)
        );
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Bytes(Some(vec![1, 2]))),
            Value::Blob(vec![1, 2])
        );
    }

    #[test]
    fn typed_nulls_all_become_sql_null() {
        for value in [
            ParamValue::Int(None),
            ParamValue::Text(None),
            ParamValue::Timestamp(None),
            ParamValue::Bytes(None),
            ParamValue::Decimal(None),
        ] {
            assert_eq!(param_to_sqlite_value(&value), Value::Null);
        }
    }

    #[test]
    fn timestamps_use_fractional_text_form() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 678)
            .unwrap();
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Timestamp(Some(dt))),
            Value::Text("2024-01-02 03:04:05.678".to_string())
        );
    }

    #[test]
    fn decimal_and_json_render_as_text() {
        let d = Decimal::new(12345, 2);
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Decimal(Some(d))),
            Value::Text("123.45".to_string())
        );
        assert_eq!(
            param_to_sqlite_value(&ParamValue::Json(Some(json!({"a": 1})))),
            Value::Text("{\"a\":1}".to_string())
        );
    }
}
