use super::{ColumnInfo, JunctionKey, SchemaSource, TableInfo};
use crate::{ConnectionConfig, ForeignKeyEdge, ScaffoldErr};
use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, QueryResult,
    Statement, TryGetable, Value,
};
use std::time::Duration;

const SQL_TABLE_NAMES: &str = r#"SELECT t.table_name AS table_name, t.table_comment AS table_comment
FROM information_schema.tables t
WHERE t.table_schema = ? AND t.table_type = 'BASE TABLE'
ORDER BY t.table_name"#;

const SQL_COUNT_PRIMARY_KEY: &str = r#"SELECT COUNT(k.column_name) AS pk_count
FROM information_schema.key_column_usage k
WHERE k.constraint_name = 'PRIMARY' AND k.table_schema = ? AND k.table_name = ?"#;

const SQL_TABLE_COLUMNS: &str = r#"SELECT c.column_name AS column_name, c.column_type AS column_type,
    c.is_nullable AS is_nullable, c.column_default AS column_default,
    c.column_comment AS column_comment, c.column_key AS column_key
FROM information_schema.columns c
WHERE c.table_schema = ? AND c.table_name = ?
ORDER BY c.ordinal_position"#;

const SQL_ALL_FOREIGN_KEY: &str = r#"SELECT k.table_name AS source_table, k.column_name AS source_column,
    k.referenced_table_name AS target_table, k.referenced_column_name AS target_column
FROM information_schema.key_column_usage k
WHERE k.referenced_table_name IS NOT NULL AND k.table_schema = ?
ORDER BY k.table_name, k.constraint_name, k.ordinal_position"#;

// No DISTINCT: MySQL rejects it with an ORDER BY on unselected columns,
// duplicates are dropped after decoding
const SQL_JUNCTION_KEYS: &str = r#"SELECT k.referenced_table_name AS table_name, k.column_name AS column_name
FROM information_schema.key_column_usage k
WHERE k.constraint_schema = ? AND k.referenced_table_name IS NOT NULL AND k.table_name = ?
ORDER BY k.constraint_name, k.ordinal_position"#;

/// Reads MySQL metadata from `information_schema` through a SeaORM connection
#[derive(Debug)]
pub struct MySqlSchemaSource {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl MySqlSchemaSource {
    /// Wrap an established connection, e.g. a `MockDatabase` connection
    pub fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    /// Connect to the database described by the config.
    ///
    /// The pool holds at most one connection: queries run one at a time and
    /// each one acquires and releases the connection on its own.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ScaffoldErr> {
        let url = config.database_url()?;
        let mut opt = ConnectOptions::new(url.to_string());
        opt.max_connections(1)
            .min_connections(0)
            .connect_timeout(config.connect_timeout())
            .acquire_timeout(config.connect_timeout())
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connecting to MySQL"
        );
        let db = Database::connect(opt)
            .await
            .map_err(|err| ScaffoldErr::ConnectionUnavailable(err.to_string()))?;
        Ok(Self::new(db, config.query_timeout()))
    }

    pub fn into_connection(self) -> DatabaseConnection {
        self.db
    }

    async fn query_all(
        &self,
        query: &'static str,
        sql: &str,
        values: Vec<Value>,
    ) -> Result<Vec<QueryResult>, ScaffoldErr> {
        tracing::debug!(query, ?values, "{}", sql);
        let stmt = Statement::from_sql_and_values(DbBackend::MySql, sql, values);
        with_timeout(query, self.query_timeout, self.db.query_all(stmt)).await
    }
}

async fn with_timeout<T, F>(query: &'static str, timeout: Duration, fut: F) -> Result<T, ScaffoldErr>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res.map_err(|err| ScaffoldErr::query(query, err)),
        Err(_) => Err(ScaffoldErr::Timeout {
            query,
            elapsed: timeout,
        }),
    }
}

fn get<T>(query: &'static str, row: &QueryResult, col: &str) -> Result<T, ScaffoldErr>
where
    T: TryGetable,
{
    row.try_get::<T>("", col)
        .map_err(|err: DbErr| ScaffoldErr::query(query, err))
}

#[async_trait]
impl SchemaSource for MySqlSchemaSource {
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableInfo>, ScaffoldErr> {
        const QUERY: &str = "list_tables";
        self.query_all(QUERY, SQL_TABLE_NAMES, vec![schema.into()])
            .await?
            .iter()
            .map(|row| -> Result<TableInfo, ScaffoldErr> {
                Ok(TableInfo {
                    name: get(QUERY, row, "table_name")?,
                    comment: get(QUERY, row, "table_comment")?,
                })
            })
            .collect()
    }

    async fn count_primary_key_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<i64, ScaffoldErr> {
        const QUERY: &str = "count_primary_key_columns";
        let rows = self
            .query_all(
                QUERY,
                SQL_COUNT_PRIMARY_KEY,
                vec![schema.into(), table.into()],
            )
            .await?;
        match rows.as_slice() {
            [row] => get(QUERY, row, "pk_count"),
            rows => Err(ScaffoldErr::CardinalityMismatch {
                query: QUERY,
                rows: rows.len(),
            }),
        }
    }

    async fn list_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<ColumnInfo>, ScaffoldErr> {
        const QUERY: &str = "list_columns";
        self.query_all(QUERY, SQL_TABLE_COLUMNS, vec![schema.into(), table.into()])
            .await?
            .iter()
            .map(|row| -> Result<ColumnInfo, ScaffoldErr> {
                Ok(ColumnInfo {
                    name: get(QUERY, row, "column_name")?,
                    column_type: get(QUERY, row, "column_type")?,
                    nullable: get(QUERY, row, "is_nullable")?,
                    default: get(QUERY, row, "column_default")?,
                    comment: get(QUERY, row, "column_comment")?,
                    key: get::<Option<String>>(QUERY, row, "column_key")?.unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn list_foreign_keys(&self, schema: &str) -> Result<Vec<ForeignKeyEdge>, ScaffoldErr> {
        const QUERY: &str = "list_foreign_keys";
        self.query_all(QUERY, SQL_ALL_FOREIGN_KEY, vec![schema.into()])
            .await?
            .iter()
            .map(|row| -> Result<ForeignKeyEdge, ScaffoldErr> {
                Ok(ForeignKeyEdge {
                    column_name: get(QUERY, row, "source_column")?,
                    source_table: get(QUERY, row, "source_table")?,
                    target_table: get(QUERY, row, "target_table")?,
                    target_column: get(QUERY, row, "target_column")?,
                })
            })
            .collect()
    }

    async fn list_junction_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<JunctionKey>, ScaffoldErr> {
        const QUERY: &str = "list_junction_keys";
        let rows = self
            .query_all(QUERY, SQL_JUNCTION_KEYS, vec![schema.into(), table.into()])
            .await?;
        let mut keys: Vec<JunctionKey> = Vec::with_capacity(rows.len());
        for row in &rows {
            let key = JunctionKey {
                referenced_table: get(QUERY, row, "table_name")?,
                column_name: get(QUERY, row, "column_name")?,
            };
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[tokio::test]
    async fn test_query_timeout() {
        let res = with_timeout(
            "list_tables",
            Duration::from_millis(20),
            std::future::pending::<Result<(), DbErr>>(),
        )
        .await;
        assert!(matches!(
            res,
            Err(ScaffoldErr::Timeout {
                query: "list_tables",
                elapsed,
            }) if elapsed == Duration::from_millis(20)
        ));
    }

    #[tokio::test]
    async fn test_query_errors() {
        let res = with_timeout("list_columns", Duration::from_secs(1), async {
            Err::<(), _>(DbErr::Conn(RuntimeErr::Internal("refused".to_owned())))
        })
        .await;
        assert!(matches!(res, Err(ScaffoldErr::ConnectionUnavailable(_))));

        let res = with_timeout("list_columns", Duration::from_secs(1), async {
            Err::<(), _>(DbErr::Custom("bad row".to_owned()))
        })
        .await;
        assert!(matches!(
            res,
            Err(ScaffoldErr::QueryExecution {
                query: "list_columns",
                ..
            })
        ));

        let res = with_timeout("list_columns", Duration::from_secs(1), async {
            Ok::<_, DbErr>(3)
        })
        .await;
        assert!(matches!(res, Ok(3)));
    }
}
