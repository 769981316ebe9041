mod memory;
mod mysql;
mod reader;

pub use memory::*;
pub use mysql::*;
pub use reader::*;

use crate::{ForeignKeyEdge, ScaffoldErr};
use async_trait::async_trait;
use serde::Deserialize;

/// A table as listed by the schema, before any entity filtering
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Column metadata of a table, in the shape `information_schema.columns` reports it
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Full native type, e.g. `varchar(255)` or `int(11) unsigned`
    pub column_type: String,
    /// `YES` or `NO`
    #[serde(default = "default_nullable")]
    pub nullable: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// `PRI`, `UNI`, `MUL` or empty
    #[serde(default)]
    pub key: String,
}

fn default_nullable() -> String {
    "YES".to_owned()
}

impl ColumnInfo {
    pub fn new(name: &str, column_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            column_type: column_type.to_owned(),
            nullable: default_nullable(),
            default: None,
            comment: None,
            key: String::new(),
        }
    }

    pub fn primary_key(self) -> Self {
        self.key("PRI").not_null()
    }

    pub fn unique(self) -> Self {
        self.key("UNI")
    }

    /// Mark the column as indexed by a foreign key (`MUL`)
    pub fn foreign_key(self) -> Self {
        self.key("MUL")
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_owned();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = "NO".to_owned();
        self
    }

    pub fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_owned());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }
}

/// A foreign key of a junction candidate: the referenced table and the referencing column
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JunctionKey {
    pub referenced_table: String,
    pub column_name: String,
}

/// Read-only metadata queries the model builder depends on.
///
/// Implementations issue one query per call. Calls are made one after another,
/// never concurrently.
#[async_trait]
pub trait SchemaSource: std::fmt::Debug + Send + Sync {
    /// Tables of the schema with their comments
    async fn list_tables(&self, schema: &str) -> Result<Vec<TableInfo>, ScaffoldErr>;

    /// Number of columns making up the primary key of a table
    async fn count_primary_key_columns(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<i64, ScaffoldErr>;

    /// Columns of a table in ordinal order
    async fn list_columns(&self, schema: &str, table: &str)
    -> Result<Vec<ColumnInfo>, ScaffoldErr>;

    /// Every foreign key of the schema, whatever table holds it
    async fn list_foreign_keys(&self, schema: &str) -> Result<Vec<ForeignKeyEdge>, ScaffoldErr>;

    /// Distinct foreign keys held by a single table
    async fn list_junction_keys(
        &self,
        schema: &str,
        table: &str,
    ) -> Result<Vec<JunctionKey>, ScaffoldErr>;
}
