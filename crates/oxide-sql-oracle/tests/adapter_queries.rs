//! Tests for executor-backed queries: pagination, inserts, session metadata,
//! explain plans and introspection.

mod common;
use common::*;

use oxide_sql_core::{ColumnDescriptor, ColumnType, QueryResult, SqlValue};
use oxide_sql_oracle::{
    ColumnOptions, InsertOptions, OracleAdapter, OracleConfig, OracleError, PaginationSpec,
};

fn adapter(executor: RecordingExecutor) -> OracleAdapter<RecordingExecutor> {
    OracleAdapter::new(executor, OracleConfig::default())
}

// ---------------------------------------------------------------------------
// select
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paginated_select_strips_row_number() {
    let result = QueryResult::new(["ID", "TITLE", "RN"])
        .with_row(vec![SqlValue::Int(21), text("a"), SqlValue::Int(21)])
        .with_row(vec![SqlValue::Int(22), text("b"), SqlValue::Int(22)]);
    let adapter = adapter(RecordingExecutor::new().respond("ROWNUM", result));

    let rows = adapter
        .select(
            "SELECT * FROM posts ORDER BY id",
            &PaginationSpec::new().limit(10).offset(20),
        )
        .await
        .unwrap();

    assert_eq!(rows.columns, vec!["ID", "TITLE"]);
    assert!(rows.rows.iter().all(|row| row.len() == 2));
    let sql = &adapter.executor().statements()[0];
    assert!(sql.contains("ROWNUM <= 30"));
    assert!(sql.contains("rn > 20"));
}

#[tokio::test]
async fn paginated_select_keeps_query_rn_column() {
    let result = QueryResult::new(["ID", "RN", "RN"]).with_row(vec![
        SqlValue::Int(1),
        text("user-rank"),
        SqlValue::Int(1),
    ]);
    let adapter = adapter(RecordingExecutor::new().respond("ROWNUM", result));

    let rows = adapter
        .select(
            "SELECT id, rank AS rn FROM scores",
            &PaginationSpec::new().limit(5),
        )
        .await
        .unwrap();

    assert_eq!(rows.columns, vec!["ID", "RN"]);
    assert_eq!(rows.rows[0], vec![SqlValue::Int(1), text("user-rank")]);
}

#[tokio::test]
async fn unpaginated_select_keeps_columns() {
    let result = QueryResult::new(["ID", "RN"]).with_row(vec![SqlValue::Int(1), SqlValue::Int(9)]);
    let adapter = adapter(RecordingExecutor::new().respond("FROM scores", result));

    let rows = adapter
        .select("SELECT id, rn FROM scores", &PaginationSpec::new())
        .await
        .unwrap();

    assert_eq!(rows.columns, vec!["ID", "RN"]);
    assert_eq!(
        adapter.executor().statements(),
        vec!["SELECT id, rn FROM scores"]
    );
}

// ---------------------------------------------------------------------------
// insert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_draws_key_from_table_sequence() {
    let executor =
        RecordingExecutor::new().respond("nextval", row(&["ID"], vec![SqlValue::Int(10_000)]));
    let adapter = adapter(executor);
    let sql = "INSERT INTO posts (id, title) VALUES (?, ?)";

    let id = adapter
        .insert(sql, &InsertOptions::new().pk("id"), &[text("hello")])
        .await
        .unwrap();

    assert_eq!(id, Some(10_000));
    assert_eq!(
        adapter.executor().statements()[0],
        "SELECT \"POSTS_SEQ\".nextval id FROM dual"
    );
    assert_eq!(
        adapter.executor().id_inserts(),
        vec![(sql.to_string(), 10_000)]
    );
}

#[tokio::test]
async fn insert_with_explicit_sequence() {
    let executor =
        RecordingExecutor::new().respond("nextval", row(&["ID"], vec![SqlValue::Int(7)]));
    let adapter = adapter(executor);

    let id = adapter
        .insert(
            "INSERT INTO app.posts (id) VALUES (?)",
            &InsertOptions::new().pk("id").sequence_name("app.post_ids"),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(id, Some(7));
    assert_eq!(
        adapter.executor().statements()[0],
        "SELECT \"APP\".\"POST_IDS\".nextval id FROM dual"
    );
}

#[tokio::test]
async fn insert_with_assigned_key_skips_sequence() {
    let adapter = adapter(RecordingExecutor::new());
    let sql = "INSERT INTO posts (id, title) VALUES (42, 'x')";

    let id = adapter
        .insert(sql, &InsertOptions::new().pk("id").id_value(42), &[])
        .await
        .unwrap();

    assert_eq!(id, Some(42));
    assert_eq!(adapter.executor().statements(), vec![sql]);
    assert!(adapter.executor().id_inserts().is_empty());
}

#[tokio::test]
async fn insert_without_primary_key_reports_driver_id() {
    let adapter = adapter(RecordingExecutor::new().last_insert_id(3));
    let id = adapter
        .insert("INSERT INTO posts_tags VALUES (1, 2)", &InsertOptions::new(), &[])
        .await
        .unwrap();
    assert_eq!(id, Some(3));
}

#[tokio::test]
async fn insert_with_unlocatable_table() {
    let adapter = adapter(RecordingExecutor::new());
    let err = adapter
        .insert(
            "MERGE INTO posts USING dual ON (1 = 0)",
            &InsertOptions::new().pk("id"),
            &[],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OracleError::InsertTable(_)));
    assert!(adapter.executor().statements().is_empty());
}

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn column_statements() {
    let adapter = adapter(RecordingExecutor::new());
    adapter
        .rename_column("users", "email", "mail")
        .await
        .unwrap();
    adapter.remove_column("users", &["a", "b"]).await.unwrap();
    adapter.remove_index("index_users_on_mail").await.unwrap();
    adapter
        .change_column(
            "users",
            "name",
            ColumnType::String,
            &ColumnOptions::new().limit(80).not_null(),
        )
        .await
        .unwrap();
    adapter
        .change_column_default("users", "active", &SqlValue::Bool(false))
        .await
        .unwrap();

    assert_eq!(
        adapter.executor().statements(),
        vec![
            "ALTER TABLE \"USERS\" RENAME COLUMN \"EMAIL\" TO \"MAIL\"",
            "ALTER TABLE \"USERS\" DROP COLUMN \"A\"",
            "ALTER TABLE \"USERS\" DROP COLUMN \"B\"",
            "DROP INDEX index_users_on_mail",
            "ALTER TABLE \"USERS\" MODIFY \"NAME\" VARCHAR2(80) NOT NULL",
            "ALTER TABLE \"USERS\" MODIFY \"ACTIVE\" DEFAULT 0",
        ]
    );
}

#[tokio::test]
async fn remove_column_stops_at_first_failure() {
    let adapter = adapter(RecordingExecutor::new().fail_on("\"A\""));
    assert!(adapter.remove_column("users", &["a", "b"]).await.is_err());
    assert_eq!(adapter.executor().statements().len(), 1);
}

// ---------------------------------------------------------------------------
// Session metadata
// ---------------------------------------------------------------------------

#[tokio::test]
async fn current_user_and_database_are_memoised() {
    let executor = RecordingExecutor::new()
        .respond("session_user", row(&["SU"], vec![text("SCOTT")]))
        .respond("db_name", row(&["DB"], vec![text("ORCL")]));
    let adapter = adapter(executor);

    assert_eq!(adapter.current_user().await.unwrap().as_deref(), Some("SCOTT"));
    assert_eq!(adapter.current_user().await.unwrap().as_deref(), Some("SCOTT"));
    assert_eq!(adapter.current_database().await.unwrap().as_deref(), Some("ORCL"));
    assert_eq!(adapter.current_database().await.unwrap().as_deref(), Some("ORCL"));

    assert_eq!(adapter.executor().statements().len(), 2);
}

#[tokio::test]
async fn current_schema_is_queried_each_time() {
    let executor = RecordingExecutor::new()
        .respond("current_schema')", row(&["SCHEMA"], vec![text("APP")]));
    let adapter = adapter(executor);

    assert_eq!(adapter.current_schema().await.unwrap().as_deref(), Some("APP"));
    adapter.set_current_schema("OTHER").await.unwrap();
    adapter.current_schema().await.unwrap();

    let statements = adapter.executor().statements();
    assert_eq!(statements.len(), 3);
    assert_eq!(statements[1], "ALTER SESSION SET current_schema=OTHER");
}

#[tokio::test]
async fn table_metadata() {
    let executor = RecordingExecutor::new()
        .respond("SELECT temporary", row(&["TEMPORARY"], vec![text("Y")]))
        .respond("tablespace_name", row(&["TABLESPACE_NAME"], vec![text("USERS")]));
    let adapter = adapter(executor);

    assert!(adapter.temporary_table("session_data").await.unwrap());
    assert_eq!(
        adapter.tablespace("posts").await.unwrap().as_deref(),
        Some("USERS")
    );
    let statements = adapter.executor().statements();
    assert!(statements[0].ends_with("table_name = 'SESSION_DATA'"));
    assert!(statements[1].ends_with("table_name = 'POSTS'"));
}

#[tokio::test]
async fn table_name_literal_is_escaped() {
    let adapter = adapter(RecordingExecutor::new());
    assert!(!adapter.temporary_table("x' OR '1'='1").await.unwrap());
    assert!(adapter.executor().statements()[0].ends_with("'X'' OR ''1''=''1'"));
}

#[tokio::test]
async fn database_parameters_charset_and_collation() {
    let parameters = QueryResult::new(["PARAMETER", "VALUE"])
        .with_row(vec![text("NLS_CHARACTERSET"), text("AL32UTF8")])
        .with_row(vec![text("NLS_COMP"), text("BINARY")]);
    let adapter = adapter(RecordingExecutor::new().respond("NLS_DATABASE_PARAMETERS", parameters));

    assert_eq!(adapter.charset().await.unwrap().as_deref(), Some("AL32UTF8"));
    assert_eq!(adapter.collation().await.unwrap().as_deref(), Some("BINARY"));
    assert_eq!(adapter.database_parameters().await.unwrap().len(), 2);
    assert_eq!(adapter.executor().statements().len(), 1);
}

// ---------------------------------------------------------------------------
// explain
// ---------------------------------------------------------------------------

#[tokio::test]
async fn explain_joins_plan_lines() {
    let plan = QueryResult::new(["PLAN_TABLE_OUTPUT"])
        .with_row(vec![text("Plan hash value: 1")])
        .with_row(vec![text("| 0 | SELECT STATEMENT |")]);
    let adapter = adapter(RecordingExecutor::new().respond("DBMS_XPLAN", plan));

    let output = adapter.explain("SELECT * FROM posts").await.unwrap();

    assert_eq!(
        output.as_deref(),
        Some("Plan hash value: 1\n| 0 | SELECT STATEMENT |")
    );
    assert_eq!(
        adapter.executor().statements(),
        vec![
            "EXPLAIN PLAN FOR SELECT * FROM posts",
            "SELECT * FROM TABLE(DBMS_XPLAN.DISPLAY)",
        ]
    );
}

#[tokio::test]
async fn explain_skips_dictionary_views() {
    let adapter = adapter(RecordingExecutor::new());
    let output = adapter
        .explain("SELECT owner FROM all_tables")
        .await
        .unwrap();
    assert_eq!(output, None);
    assert!(adapter.executor().statements().is_empty());
}

// ---------------------------------------------------------------------------
// Introspection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn prefetch_primary_key_follows_columns() {
    let config = OracleConfig::from_json(r#"{"username": "scott"}"#).unwrap();
    let adapter = OracleAdapter::new(RecordingExecutor::new(), config);

    let keyed = StaticIntrospector::new(vec![
        ColumnDescriptor::new("id", ColumnType::Integer).primary_key(),
        ColumnDescriptor::new("title", ColumnType::String),
    ]);
    assert!(adapter.prefetch_primary_key(&keyed, "posts").await.unwrap());
    assert_eq!(keyed.seen_schema.lock().unwrap().as_deref(), Some("scott"));

    let join = StaticIntrospector::new(vec![ColumnDescriptor::new(
        "post_id",
        ColumnType::Integer,
    )]);
    assert!(!adapter.prefetch_primary_key(&join, "posts_tags").await.unwrap());
}

#[tokio::test]
async fn tables_use_configured_schema() {
    let config = OracleConfig::from_json(r#"{"schema": "APP", "username": "scott"}"#).unwrap();
    let adapter = OracleAdapter::new(RecordingExecutor::new(), config);
    let mut introspector = StaticIntrospector::new(Vec::new());
    introspector.tables = vec![String::from("POSTS")];

    assert_eq!(adapter.tables(&introspector).await.unwrap(), vec!["POSTS"]);
    assert_eq!(introspector.seen_schema.lock().unwrap().as_deref(), Some("APP"));
}
