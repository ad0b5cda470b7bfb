//! Scripted driver for exercising the execution pipeline without a real
//! database.
//!
//! Each prepared statement consumes the next [`StatementScript`] from the
//! connection's queue (an empty queue yields the default script: succeed,
//! zero rows). Everything the executor does — the SQL it prepared, each bind
//! call, execute and close counts — is recorded for assertion.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::driver::{DmlConnection, PreparedDml};
use crate::error::SqlBinderError;
use crate::types::ParamValue;

/// Outcome script for one prepared statement.
#[derive(Debug, Clone, Default)]
pub struct StatementScript {
    prepare_error: Option<String>,
    bind_error: Option<String>,
    execute_error: Option<String>,
    close_error: Option<String>,
    affected_rows: usize,
}

impl StatementScript {
    /// Succeed, reporting `rows` affected rows.
    #[must_use]
    pub fn returning(rows: usize) -> Self {
        Self {
            affected_rows: rows,
            ..Self::default()
        }
    }

    /// Fail statement preparation.
    #[must_use]
    pub fn failing_prepare(message: &str) -> Self {
        Self {
            prepare_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Fail the first bind call.
    #[must_use]
    pub fn failing_bind(message: &str) -> Self {
        Self {
            bind_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Fail execution.
    #[must_use]
    pub fn failing_execute(message: &str) -> Self {
        Self {
            execute_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Make the close call report an error (the executor must swallow it).
    #[must_use]
    pub fn with_close_error(mut self, message: &str) -> Self {
        self.close_error = Some(message.to_string());
        self
    }
}

/// What actually happened to one prepared statement.
#[derive(Debug, Clone, Default)]
pub struct StatementRecord {
    pub sql: String,
    /// Bind calls as (1-based position, value) in call order.
    pub binds: Vec<(usize, ParamValue)>,
    pub execute_calls: usize,
    pub close_calls: usize,
}

/// A connection whose statements follow pre-arranged scripts.
#[derive(Debug, Default)]
pub struct MockConnection {
    scripts: VecDeque<StatementScript>,
    records: Arc<Mutex<Vec<StatementRecord>>>,
}

impl MockConnection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a script for the next prepared statement (FIFO).
    #[must_use]
    pub fn with_script(mut self, script: StatementScript) -> Self {
        self.scripts.push_back(script);
        self
    }

    /// Snapshot of every statement prepared so far.
    #[must_use]
    pub fn records(&self) -> Vec<StatementRecord> {
        self.records.lock().unwrap().clone()
    }

    /// The most recently prepared statement, if any.
    #[must_use]
    pub fn last_record(&self) -> Option<StatementRecord> {
        self.records.lock().unwrap().last().cloned()
    }
}

impl DmlConnection for MockConnection {
    fn prepare_dml<'conn>(
        &'conn mut self,
        sql: &str,
    ) -> Result<Box<dyn PreparedDml + 'conn>, SqlBinderError> {
        let script = self.scripts.pop_front().unwrap_or_default();
        if let Some(message) = &script.prepare_error {
            return Err(SqlBinderError::ConnectionError(message.clone()));
        }

        let mut records = self.records.lock().unwrap();
        records.push(StatementRecord {
            sql: sql.to_string(),
            ..StatementRecord::default()
        });
        let index = records.len() - 1;
        drop(records);

        Ok(Box::new(MockStatement {
            script,
            records: Arc::clone(&self.records),
            index,
        }))
    }
}

/// Statement handle produced by [`MockConnection`].
pub struct MockStatement {
    script: StatementScript,
    records: Arc<Mutex<Vec<StatementRecord>>>,
    index: usize,
}

impl PreparedDml for MockStatement {
    fn bind_param(&mut self, index: usize, value: &ParamValue) -> Result<(), SqlBinderError> {
        self.records.lock().unwrap()[self.index]
            .binds
            .push((index, value.clone()));
        match &self.script.bind_error {
            Some(message) => Err(SqlBinderError::ConnectionError(message.clone())),
            None => Ok(()),
        }
    }

    fn execute_update(&mut self) -> Result<usize, SqlBinderError> {
        self.records.lock().unwrap()[self.index].execute_calls += 1;
        match &self.script.execute_error {
            Some(message) => Err(SqlBinderError::ConnectionError(message.clone())),
            None => Ok(self.script.affected_rows),
        }
    }

    fn close(&mut self) -> Result<(), SqlBinderError> {
        self.records.lock().unwrap()[self.index].close_calls += 1;
        match &self.script.close_error {
            Some(message) => Err(SqlBinderError::ConnectionError(message.clone())),
            None => Ok(()),
        }
    }
}
