use super::{ColumnInfo, JunctionKey, SchemaSource, TableInfo};
use crate::{ForeignKeyEdge, ScaffoldErr};
use async_trait::async_trait;
use serde::Deserialize;
use std::{fs, path::Path};

/// A schema snapshot held in memory.
///
/// It answers the same metadata queries as [`MySqlSchemaSource`](super::MySqlSchemaSource),
/// which makes it usable offline from a JSON snapshot and in tests.
/// The schema name passed to each query is ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MemorySchema {
    #[serde(default)]
    pub tables: Vec<MemoryTable>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemoryTable {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub foreign_keys: Vec<MemoryForeignKey>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MemoryForeignKey {
    pub column: String,
    pub target_table: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
}

fn default_target_column() -> String {
    "id".to_owned()
}

impl MemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_file<P>(path: P) -> Result<Self, ScaffoldErr>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn table(mut self, table: MemoryTable) -> Self {
        self.tables.push(table);
        self
    }

    fn find(&self, table: &str) -> Option<&MemoryTable> {
        self.tables.iter().find(|t| t.name == table)
    }
}

impl MemoryTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            comment: None,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_owned());
        self
    }

    pub fn column(mut self, column: ColumnInfo) -> Self {
        self.columns.push(column);
        self
    }

    pub fn references(mut self, column: &str, target_table: &str, target_column: &str) -> Self {
        self.foreign_keys.push(MemoryForeignKey {
            column: column.to_owned(),
            target_table: target_table.to_owned(),
            target_column: target_column.to_owned(),
        });
        self
    }
}

#[async_trait]
impl SchemaSource for MemorySchema {
    async fn list_tables(&self, _: &str) -> Result<Vec<TableInfo>, ScaffoldErr> {
        Ok(self
            .tables
            .iter()
            .map(|table| TableInfo {
                name: table.name.clone(),
                comment: table.comment.clone(),
            })
            .collect())
    }

    async fn count_primary_key_columns(&self, _: &str, table: &str) -> Result<i64, ScaffoldErr> {
        // An unknown table yields no row, as a `COUNT` over an empty set would not
        let table = self
            .find(table)
            .ok_or(ScaffoldErr::CardinalityMismatch {
                query: "count_primary_key_columns",
                rows: 0,
            })?;
        Ok(table
            .columns
            .iter()
            .filter(|column| column.key == "PRI")
            .count() as i64)
    }

    async fn list_columns(&self, _: &str, table: &str) -> Result<Vec<ColumnInfo>, ScaffoldErr> {
        Ok(self
            .find(table)
            .map(|table| table.columns.clone())
            .unwrap_or_default())
    }

    async fn list_foreign_keys(&self, _: &str) -> Result<Vec<ForeignKeyEdge>, ScaffoldErr> {
        Ok(self
            .tables
            .iter()
            .flat_map(|table| {
                table.foreign_keys.iter().map(|fk| ForeignKeyEdge {
                    column_name: fk.column.clone(),
                    source_table: table.name.clone(),
                    target_table: fk.target_table.clone(),
                    target_column: fk.target_column.clone(),
                })
            })
            .collect())
    }

    async fn list_junction_keys(&self, _: &str, table: &str) -> Result<Vec<JunctionKey>, ScaffoldErr> {
        let mut keys: Vec<JunctionKey> = Vec::new();
        for fk in self.find(table).into_iter().flat_map(|t| t.foreign_keys.iter()) {
            let key = JunctionKey {
                referenced_table: fk.target_table.clone(),
                column_name: fk.column.clone(),
            };
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}
