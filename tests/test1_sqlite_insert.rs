#![cfg(feature = "sqlite")]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sql_binder::prelude::*;
use sql_binder::sqlite::rusqlite::Connection;

fn setup() -> Result<Connection, Box<dyn std::error::Error>> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(
        "CREATE TABLE t (
            x INTEGER,
            y TEXT
        );",
    )?;
    Ok(conn)
}

#[test]
fn positional_insert_binds_typed_nulls() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = setup()?;

    // A None argument must bind SQL NULL, not drop the placeholder.
    let rows = dml(&mut conn, "insert into t (x, y) values (?, ?)")
        .arg_int(None)?
        .arg_text(Some("row1"))?
        .execute()?;
    assert_eq!(rows, 1);

    let (x, y): (Option<i64>, String) =
        conn.query_row("select x, y from t", [], |r| Ok((r.get(0)?, r.get(1)?)))?;
    assert_eq!(x, None);
    assert_eq!(y, "row1");
    Ok(())
}

#[test]
fn named_insert_with_expected_row_count() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = setup()?;

    let rows = dml(&mut conn, "insert into t (x, y) values (:x, :y)")
        .arg_int_named("x", Some(5))?
        .arg_text_named("y", Some("hi"))?
        .execute_expecting(1)?;
    assert_eq!(rows, 1);

    let (x, y): (i64, String) = conn.query_row("select x, y from t where x = 5", [], |r| {
        Ok((r.get(0)?, r.get(1)?))
    })?;
    assert_eq!(x, 5);
    assert_eq!(y, "hi");
    Ok(())
}

#[test]
fn update_touching_no_rows_fails_the_expectation() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = setup()?;

    let err = dml(&mut conn, "update t set y = :y where x = :x")
        .arg_int_named("x", Some(999))?
        .arg_text_named("y", Some("nope"))?
        .execute_expecting(1)
        .expect_err("no row matches, expectation of 1 must fail");

    match err {
        SqlBinderError::WrongNumberOfRows {
            actual,
            expected,
            diagnostics,
        } => {
            assert_eq!(actual, 0);
            assert_eq!(expected, 1);
            assert!(diagnostics.error_code().starts_with("err-"));
            assert!(diagnostics.sql().contains("update t set"));
        }
        other => panic!("expected WrongNumberOfRows, got {other:?}"),
    }

    // An unchecked execute is fine with zero affected rows.
    let rows = dml(&mut conn, "update t set y = 'x' where x = 999").execute()?;
    assert_eq!(rows, 0);
    Ok(())
}

#[test]
fn every_kind_round_trips_through_a_file_backed_db() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut conn = Connection::open(dir.path().join("kinds.db"))?;
    conn.execute_batch(
        "CREATE TABLE kinds (
            i INTEGER, l INTEGER, f REAL, d REAL, dec TEXT,
            t TEXT, b INTEGER, ts TEXT, bl BLOB, c TEXT, j TEXT
        );",
    )?;

    let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let rows = dml(
        &mut conn,
        "insert into kinds values (:i, :l, :f, :d, :dec, :t, :b, :ts, :bl, :c, :j)",
    )
    .arg_int_named("i", Some(1))?
    .arg_long_named("l", Some(2))?
    .arg_float_named("f", Some(1.5))?
    .arg_double_named("d", Some(2.5))?
    .arg_decimal_named("dec", Some(Decimal::new(12345, 2)))?
    .arg_text_named("t", Some("text"))?
    .arg_bool_named("b", Some(true))?
    .arg_timestamp_named("ts", Some(ts))?
    .arg_blob_named("bl", Some(vec![1u8, 2, 3]))?
    .arg_clob_named("c", Some("clob body"))?
    .arg_json_named("j", Some(json!({"k": "v"})))?
    .execute_expecting(1)?;
    assert_eq!(rows, 1);

    let (dec, b, ts_text, bl): (String, i64, String, Vec<u8>) =
        conn.query_row("select dec, b, ts, bl from kinds", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })?;
    assert_eq!(dec, "123.45");
    assert_eq!(b, 1);
    assert_eq!(ts_text, "2024-01-02 03:04:05");
    assert_eq!(bl, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn stream_arguments_drain_before_binding() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = setup()?;
    conn.execute_batch("CREATE TABLE blobs (data BLOB, body TEXT)")?;

    let rows = dml(&mut conn, "insert into blobs (data, body) values (:data, :body)")
        .arg_blob_stream_named("data", Some(&b"\x00\x01binary"[..]))?
        .arg_clob_reader_named("body", Some("streamed text".as_bytes()))?
        .execute_expecting(1)?;
    assert_eq!(rows, 1);

    let (data, body): (Vec<u8>, String) =
        conn.query_row("select data, body from blobs", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })?;
    assert_eq!(data, b"\x00\x01binary");
    assert_eq!(body, "streamed text");

    // A None stream is the typed null of its kind.
    let rows = dml(&mut conn, "insert into blobs (data, body) values (?, ?)")
        .arg_blob_stream(None::<&[u8]>)?
        .arg_clob_reader(None::<&[u8]>)?
        .execute()?;
    assert_eq!(rows, 1);
    let nulls: (Option<Vec<u8>>, Option<String>) = conn.query_row(
        "select data, body from blobs where data is null",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;
    assert_eq!(nulls, (None, None));
    Ok(())
}

#[test]
fn malformed_sql_surfaces_as_execution_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = setup()?;

    let err = dml(&mut conn, "insert into missing_table (x) values (?)")
        .arg_int(Some(1))?
        .execute()
        .expect_err("preparing against a missing table must fail");

    match err {
        SqlBinderError::ExecutionError { diagnostics, cause } => {
            assert!(diagnostics.error_code().starts_with("err-"));
            assert!(matches!(*cause, SqlBinderError::SqliteError(_)));
        }
        other => panic!("expected ExecutionError, got {other:?}"),
    }
    Ok(())
}
