//! oxide-oracle CLI
//!
//! Renders Oracle SQL fragments from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_sql_core::{
    BoxFuture, ColumnDescriptor, ColumnType, Dialect, ExecuteError, Executor, InsertResult,
    QueryResult, SqlValue,
};
use oxide_sql_oracle::{
    CreateTableOptions, OracleConfig, OracleDialect, PaginationSpec, SequenceManager,
};

/// Oracle SQL dialect toolbox.
#[derive(Parser)]
#[command(name = "oxide-oracle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, env = "OXIDE_ORACLE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a column name.
    QuoteColumn {
        /// Column name.
        name: String,
    },

    /// Quote a table reference (`[schema.]table[@dblink]`).
    QuoteTable {
        /// Table reference.
        name: String,
    },

    /// Print the native declaration of an abstract column type.
    TypeSql {
        /// Abstract type (`string`, `text`, `decimal`, ...).
        column_type: ColumnType,

        /// Length.
        #[arg(short, long)]
        limit: Option<u32>,

        /// Precision.
        #[arg(short, long)]
        precision: Option<u32>,

        /// Scale.
        #[arg(short, long)]
        scale: Option<u32>,
    },

    /// Wrap a query in ROWNUM pagination.
    Paginate {
        /// Query to paginate.
        sql: String,

        /// Maximum number of rows.
        #[arg(short, long)]
        limit: Option<u64>,

        /// Number of rows to skip.
        #[arg(short, long, default_value_t = 0)]
        offset: u64,
    },

    /// Build a DISTINCT select list that honours an ORDER BY.
    Distinct {
        /// Distinct columns.
        columns: String,

        /// ORDER BY list.
        #[arg(short, long, default_value = "")]
        order: String,
    },

    /// Print the default sequence name of a table.
    SequenceName {
        /// Table name.
        table: String,
    },

    /// Print the statements creating a table's sequence (dry run).
    CreateSequence {
        /// Table name.
        table: String,

        /// Explicit sequence name.
        #[arg(long)]
        sequence_name: Option<String>,

        /// First sequence value.
        #[arg(long)]
        start: Option<i64>,
    },

    /// Quote a value as an Oracle literal.
    QuoteValue {
        /// Value, as text.
        value: Option<String>,

        /// Abstract type of the target column.
        #[arg(short = 't', long)]
        column_type: Option<ColumnType>,

        /// Native type of the target column (e.g. `CLOB`).
        #[arg(long)]
        sql_type: Option<String>,
    },
}

/// Executor that prints statements instead of running them.
struct PrintExecutor;

impl Executor for PrintExecutor {
    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<QueryResult, ExecuteError>> {
        Box::pin(async move {
            println!("{sql};");
            Ok(QueryResult::default())
        })
    }

    fn exec_insert<'a>(
        &'a self,
        sql: &'a str,
        _binds: &'a [SqlValue],
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>> {
        Box::pin(async move {
            println!("{sql};");
            Ok(InsertResult::default())
        })
    }

    fn execute_id_insert<'a>(
        &'a self,
        sql: &'a str,
        id: i64,
    ) -> BoxFuture<'a, Result<InsertResult, ExecuteError>> {
        Box::pin(async move {
            println!("{sql}; -- id = {id}");
            Ok(InsertResult {
                rows_affected: 1,
                last_insert_id: Some(id),
            })
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<OracleConfig> {
    let Some(path) = path else {
        return Ok(OracleConfig::default());
    };
    let json =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = OracleConfig::from_json(&json)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_ref())?;
    let dialect = OracleDialect::from_config(&config);

    match cli.command {
        Commands::QuoteColumn { name } => {
            println!("{}", dialect.quote_column_name(&name));
        }

        Commands::QuoteTable { name } => {
            println!("{}", dialect.quote_table_name(&name));
        }

        Commands::TypeSql {
            column_type,
            limit,
            precision,
            scale,
        } => {
            println!(
                "{}",
                dialect.type_to_sql(column_type, limit, precision, scale)?
            );
        }

        Commands::Paginate { sql, limit, offset } => {
            let mut sql = sql;
            dialect.add_limit_offset(&mut sql, &PaginationSpec { limit, offset });
            println!("{sql}");
        }

        Commands::Distinct { columns, order } => {
            println!("{}", dialect.distinct(&columns, &order));
        }

        Commands::SequenceName { table } => {
            println!("{}", dialect.default_sequence_name(&table));
        }

        Commands::CreateSequence {
            table,
            sequence_name,
            start,
        } => {
            let mut options = CreateTableOptions::new();
            options.sequence_name = sequence_name;
            options.sequence_start_value = start;

            info!("Dry run mode - SQL will be printed but not executed.");
            let sequences = SequenceManager::new(&PrintExecutor, &dialect)
                .default_start(config.sequence_start_value);
            if let Some(sequence) = sequences.create_sequence(&table, &options).await? {
                debug!(sequence = %sequence.name, start = sequence.start_value, "Sequence resolved");
            }
        }

        Commands::QuoteValue {
            value,
            column_type,
            sql_type,
        } => {
            let value = value.map_or(SqlValue::Null, SqlValue::Text);
            let column = column_type.map(|column_type| {
                let column = ColumnDescriptor::new("value", column_type);
                match sql_type {
                    Some(sql_type) => column.sql_type(sql_type),
                    None => column,
                }
            });
            println!("{}", dialect.quote(&value, column.as_ref()));
        }
    }

    Ok(())
}
