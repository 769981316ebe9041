use sea_orm::DbErr;
use std::time::Duration;
use thiserror::Error;

/// An error raised while introspecting a schema or assembling the entity model
#[derive(Error, Debug)]
pub enum ScaffoldErr {
    /// A database connection could not be established or acquired
    #[error("Connection unavailable: {0}")]
    ConnectionUnavailable(String),
    /// A metadata query failed, or one of its rows could not be decoded
    #[error("Query `{query}` failed: {source}")]
    QueryExecution {
        query: &'static str,
        #[source]
        source: DbErr,
    },
    /// A query expected to produce exactly one row produced another count
    #[error("Query `{query}` returned {rows} rows, expected exactly one")]
    CardinalityMismatch { query: &'static str, rows: usize },
    /// A metadata query exceeded the configured timeout
    #[error("Query `{query}` timed out after {elapsed:?}")]
    Timeout {
        query: &'static str,
        elapsed: Duration,
    },
    /// A table expected to be an entity table produced no primary key column
    #[error("Table `{0}` has no primary key column")]
    MissingPrimaryKey(String),
    /// The configuration is incomplete or malformed
    #[error("Config Error: {0}")]
    Config(String),
    /// A build finished with error diagnostics, some schema data is missing
    #[error("Entity model is incomplete, {} problem(s) were recorded", .0.len())]
    Incomplete(crate::Diagnostics),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ScaffoldErr {
    pub(crate) fn query(query: &'static str, source: DbErr) -> Self {
        match source {
            DbErr::ConnectionAcquire(err) => Self::ConnectionUnavailable(err.to_string()),
            DbErr::Conn(err) => Self::ConnectionUnavailable(err.to_string()),
            source => Self::QueryExecution { query, source },
        }
    }
}
