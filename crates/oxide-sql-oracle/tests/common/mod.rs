#![allow(dead_code)]

use std::sync::Mutex;

use oxide_sql_core::{
    BoxFuture, ColumnDescriptor, ExecuteError, Executor, InsertResult, QueryResult,
    SchemaIntrospector, SqlValue,
};

/// Executor that records every statement and answers from a script.
///
/// Responses and failures are matched by substring, first match wins.
#[derive(Default)]
pub struct RecordingExecutor {
    statements: Mutex<Vec<String>>,
    id_inserts: Mutex<Vec<(String, i64)>>,
    responses: Vec<(String, QueryResult)>,
    failures: Vec<String>,
    last_insert_id: Option<i64>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, result: QueryResult) -> Self {
        self.responses.push((pattern.to_string(), result));
        self
    }

    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    pub fn last_insert_id(mut self, id: i64) -> Self {
        self.last_insert_id = Some(id);
        self
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn id_inserts(&self) -> Vec<(String, i64)> {
        self.id_inserts.lock().unwrap().clone()
    }

    fn run(&self, sql: &str) -> Result<QueryResult, ExecuteError> {
        self.statements.lock().unwrap().push(sql.to_string());
        if self.failures.iter().any(|p| sql.contains(p.as_str())) {
            return Err(ExecuteError::statement(sql, "ORA-02289: sequence does not exist"));
        }
        Ok(self
            .responses
            .iter()
            .find(|(p, _)| sql.contains(p.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }
}

impl Executor for RecordingExecutor {
    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<QueryResult, ExecuteError>> {
        Box::pin(async move { self.run(sql) })
    }

    fn exec_insert<'a>(
        &'a self,
        sql: &'a str,
        _binds: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>> {
        Box::pin(async move {
            self.run(sql)?;
            Ok(InsertResult {
                rows_affected: 1,
                last_insert_id: self.last_insert_id,
            })
        })
    }

    fn execute_id_insert<'a>(
        &'a self,
        sql: &'a str,
        id: i64,
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>> {
        Box::pin(async move {
            self.run(sql)?;
            self.id_inserts.lock().unwrap().push((sql.to_string(), id));
            Ok(InsertResult {
                rows_affected: 1,
                last_insert_id: Some(id),
            })
        })
    }
}

/// Introspector serving a fixed column list for every table.
pub struct StaticIntrospector {
    pub columns: Vec<ColumnDescriptor>,
    pub tables: Vec<String>,
    pub seen_schema: Mutex<Option<String>>,
}

impl StaticIntrospector {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            tables: Vec::new(),
            seen_schema: Mutex::new(None),
        }
    }
}

impl SchemaIntrospector for StaticIntrospector {
    fn columns<'a>(
        &'a self,
        _table: &'a str,
        schema: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ColumnDescriptor>, ExecuteError>> {
        Box::pin(async move {
            *self.seen_schema.lock().unwrap() = schema.map(str::to_string);
            Ok(self.columns.clone())
        })
    }

    fn tables<'a>(
        &'a self,
        schema: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<String>, ExecuteError>> {
        Box::pin(async move {
            *self.seen_schema.lock().unwrap() = schema.map(str::to_string);
            Ok(self.tables.clone())
        })
    }
}

/// Single-row result.
pub fn row(columns: &[&str], values: Vec<SqlValue>) -> QueryResult {
    QueryResult::new(columns.iter().copied()).with_row(values)
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}
