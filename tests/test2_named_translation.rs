#![cfg(feature = "test-utils")]

use sql_binder::prelude::*;
use sql_binder::test_utils::{MockConnection, StatementScript};

#[test]
fn driver_sees_rewritten_sql_and_ordered_binds() {
    let mut conn = MockConnection::new().with_script(StatementScript::returning(1));

    let rows = dml(&mut conn, "update t set a = :a, b = :b where a = :a")
        .arg_int_named("a", Some(1))
        .unwrap()
        .arg_int_named("b", Some(2))
        .unwrap()
        .execute()
        .unwrap();
    assert_eq!(rows, 1);

    let record = conn.last_record().unwrap();
    assert_eq!(record.sql, "update t set a = ?, b = ? where a = ?");
    // Duplicate names expand to one bind per occurrence, left to right.
    assert_eq!(
        record.binds,
        vec![
            (1, ParamValue::Int(Some(1))),
            (2, ParamValue::Int(Some(2))),
            (3, ParamValue::Int(Some(1))),
        ]
    );
}

#[test]
fn quoted_literals_survive_untouched() {
    let mut conn = MockConnection::new().with_script(StatementScript::returning(1));

    dml(&mut conn, "insert into t (a, b) values (':not_a_param', :a)")
        .arg_text_named("a", Some("v"))
        .unwrap()
        .execute()
        .unwrap();

    let record = conn.last_record().unwrap();
    assert_eq!(record.sql, "insert into t (a, b) values (':not_a_param', ?)");
    assert_eq!(record.binds.len(), 1);
}

#[test]
fn missing_named_value_fails_before_driver_interaction() {
    let mut conn = MockConnection::new();

    let err = dml(&mut conn, "insert into t (x) values (:x)")
        .arg_int_named("y", Some(1))
        .unwrap()
        .execute()
        .expect_err("`:x` has no supplied value");

    assert!(matches!(err, SqlBinderError::ParameterError(_)));
    assert!(err.to_string().contains(":x"));
    assert!(conn.records().is_empty(), "nothing may reach the driver");
}

#[test]
fn sigil_prefixed_names_match_their_tokens() {
    let mut conn = MockConnection::new().with_script(StatementScript::returning(1));

    dml(&mut conn, "insert into t (x) values (:x)")
        .arg_int_named(":x", Some(7))
        .unwrap()
        .execute()
        .unwrap();

    let record = conn.last_record().unwrap();
    assert_eq!(record.binds, vec![(1, ParamValue::Int(Some(7)))]);
}

#[test]
fn typed_null_named_value_satisfies_the_token() {
    let mut conn = MockConnection::new().with_script(StatementScript::returning(1));

    dml(&mut conn, "insert into t (x) values (:x)")
        .arg_text_named("x", None::<String>)
        .unwrap()
        .execute()
        .unwrap();

    let record = conn.last_record().unwrap();
    assert_eq!(record.binds, vec![(1, ParamValue::Text(None))]);
}

#[test]
fn positional_template_passes_through_verbatim() {
    let mut conn = MockConnection::new().with_script(StatementScript::returning(1));

    dml(&mut conn, "insert into t (x, y) values (?, ?)")
        .arg_int(Some(1))
        .unwrap()
        .arg_text(Some("a"))
        .unwrap()
        .execute()
        .unwrap();

    let record = conn.last_record().unwrap();
    assert_eq!(record.sql, "insert into t (x, y) values (?, ?)");
    assert_eq!(record.binds.len(), 2);
}
