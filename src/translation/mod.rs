use std::collections::HashMap;

mod scanner;

use scanner::{
    State, ends_block_comment, scan_identifier, starts_block_comment, starts_line_comment,
};

use crate::error::SqlBinderError;
use crate::types::ParamValue;

/// A SQL template with `:name` placeholders rewritten to the positional `?`
/// form a driver accepts.
///
/// Parsing records each name in order of occurrence, duplicates included, so
/// a name→value mapping can be flattened into the argument array aligned with
/// the rewritten placeholders:
/// ```rust
/// use sql_binder::translation::NamedParamSql;
///
/// let parsed = NamedParamSql::parse("update t set a = :a, b = :b where a = :a");
/// assert_eq!(parsed.sql_to_execute(), "update t set a = ?, b = ? where a = ?");
/// assert_eq!(parsed.names(), ["a", "b", "a"]);
/// ```
///
/// The scan skips single- and double-quoted literals (doubled quotes are the
/// literal's own escape), `--` line comments, and `/* */` block comments with
/// nesting. A `::` cast and a bare `:` are copied verbatim.
#[derive(Debug, Clone)]
pub struct NamedParamSql {
    sql_to_execute: String,
    names: Vec<String>,
}

impl NamedParamSql {
    #[must_use]
    pub fn parse(sql: &str) -> Self {
        let bytes = sql.as_bytes();
        let mut rewritten = String::with_capacity(sql.len());
        let mut names = Vec::new();
        // Everything before `copied` has been flushed to the output; spans
        // between placeholders are copied as whole slices so multi-byte
        // characters pass through untouched.
        let mut copied = 0;
        let mut state = State::Normal;
        let mut idx = 0;

        while idx < bytes.len() {
            let b = bytes[idx];
            match state {
                State::Normal => match b {
                    b'\'' => state = State::SingleQuoted,
                    b'"' => state = State::DoubleQuoted,
                    _ if starts_line_comment(bytes, idx) => {
                        state = State::LineComment;
                        idx += 1;
                    }
                    _ if starts_block_comment(bytes, idx) => {
                        state = State::BlockComment(1);
                        idx += 1;
                    }
                    b':' => {
                        if bytes.get(idx + 1) == Some(&b':') {
                            // cast syntax; both colons stay verbatim
                            idx += 1;
                        } else if let Some((end, ident)) = scan_identifier(bytes, idx + 1) {
                            rewritten.push_str(&sql[copied..idx]);
                            rewritten.push('?');
                            names.push(ident.to_string());
                            copied = end;
                            idx = end;
                            continue;
                        }
                    }
                    _ => {}
                },
                State::SingleQuoted => {
                    if b == b'\'' {
                        if bytes.get(idx + 1) == Some(&b'\'') {
                            idx += 1; // skip escaped quote
                        } else {
                            state = State::Normal;
                        }
                    }
                }
                State::DoubleQuoted => {
                    if b == b'"' {
                        if bytes.get(idx + 1) == Some(&b'"') {
                            idx += 1; // skip escaped quote
                        } else {
                            state = State::Normal;
                        }
                    }
                }
                State::LineComment => {
                    if b == b'\n' {
                        state = State::Normal;
                    }
                }
                State::BlockComment(depth) => {
                    if starts_block_comment(bytes, idx) {
                        state = State::BlockComment(depth + 1);
                        idx += 1;
                    } else if ends_block_comment(bytes, idx) {
                        state = if depth == 1 {
                            State::Normal
                        } else {
                            State::BlockComment(depth - 1)
                        };
                        idx += 1;
                    }
                }
            }
            idx += 1;
        }
        rewritten.push_str(&sql[copied..]);

        Self {
            sql_to_execute: rewritten,
            names,
        }
    }

    /// The rewritten SQL, with `?` in place of each named token.
    #[must_use]
    pub fn sql_to_execute(&self) -> &str {
        &self.sql_to_execute
    }

    /// Parameter names in order of occurrence, duplicates preserved.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn into_sql(self) -> String {
        self.sql_to_execute
    }

    /// Flatten a name→value mapping into the argument array aligned with the
    /// rewritten SQL's `?` positions. Each occurrence of a repeated name gets
    /// its own entry.
    ///
    /// # Errors
    ///
    /// Returns [`SqlBinderError::ParameterError`] if a name used in the SQL
    /// has no entry in `supplied` — every named parameter in the text must be
    /// given a value, even if that value is a typed null.
    pub fn to_positional_args(
        &self,
        supplied: &HashMap<String, ParamValue>,
    ) -> Result<Vec<ParamValue>, SqlBinderError> {
        let mut args = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match supplied.get(name) {
                Some(value) => args.push(value.clone()),
                None => {
                    return Err(SqlBinderError::ParameterError(format!(
                        "the SQL references parameter `:{name}` but no value was supplied"
                    )));
                }
            }
        }
        Ok(args)
    }
}
