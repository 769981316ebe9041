use super::{ColumnInfo, SchemaSource};
use crate::{Diagnostics, Field, KeyType, NameTransformer, ScaffoldErr, map_type, util::first_upper};
use std::collections::HashSet;

/// Outcome of sorting tables out by their primary key
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableClassification {
    /// Entity tables and their comments, in schema order
    pub entity_tables: Vec<(String, String)>,
    /// Tables whose primary key could not be counted
    pub unclassified: Vec<String>,
}

impl TableClassification {
    /// Tables that must never be taken for a junction: the entity tables, even
    /// those whose fields later fail to read, and the unclassified ones
    pub fn non_junction_tables(&self) -> HashSet<String> {
        self.entity_tables
            .iter()
            .map(|(table, _)| table.clone())
            .chain(self.unclassified.iter().cloned())
            .collect()
    }
}

/// Lists entity tables and reads their fields
#[derive(Debug)]
pub struct SchemaReader<'a> {
    source: &'a dyn SchemaSource,
    transformer: &'a dyn NameTransformer,
    schema: &'a str,
}

impl<'a> SchemaReader<'a> {
    pub fn new(
        source: &'a dyn SchemaSource,
        transformer: &'a dyn NameTransformer,
        schema: &'a str,
    ) -> Self {
        Self {
            source,
            transformer,
            schema,
        }
    }

    /// Sort the tables of the schema out by their primary key.
    ///
    /// Tables having exactly one primary key column are entity tables, listed
    /// with their comments (empty when none is set) in schema order. Tables with
    /// a composite primary key or none at all are left out: they are junction
    /// candidates. A table whose primary key count fails is unclassified, it is
    /// neither an entity nor a junction candidate. A failed table listing yields
    /// no table. Both failures are recorded.
    pub async fn list_entity_tables(&self, diagnostics: &mut Diagnostics) -> TableClassification {
        tracing::info!(schema = self.schema, "Listing tables");
        let mut classification = TableClassification::default();
        let tables = match self.source.list_tables(self.schema).await {
            Ok(tables) => tables,
            Err(err) => {
                diagnostics.push_err(None, &err);
                return classification;
            }
        };

        for table in tables {
            match self
                .source
                .count_primary_key_columns(self.schema, &table.name)
                .await
            {
                Ok(1) => classification
                    .entity_tables
                    .push((table.name, table.comment.unwrap_or_default())),
                Ok(count) => {
                    tracing::debug!(table = %table.name, count, "Not an entity table");
                }
                Err(err) => {
                    diagnostics.push_err(Some(table.name.as_str()), &err);
                    classification.unclassified.push(table.name);
                }
            }
        }
        classification
    }

    /// Fields of a table and its primary key.
    ///
    /// Foreign key columns (`MUL`) are dropped, they only surface as associations.
    /// The first primary key column is split off the field list.
    pub async fn read_fields(&self, table: &str) -> Result<(Vec<Field>, Field), ScaffoldErr> {
        let columns = self.source.list_columns(self.schema, table).await?;

        let mut primary_key = None;
        let mut fields = Vec::with_capacity(columns.len());
        for field in columns.iter().map(|column| self.to_field(column)) {
            match field.key_type {
                KeyType::ForeignKey => {}
                KeyType::PrimaryKey if primary_key.is_none() => primary_key = Some(field),
                _ => fields.push(field),
            }
        }

        let primary_key =
            primary_key.ok_or_else(|| ScaffoldErr::MissingPrimaryKey(table.to_owned()))?;
        Ok((fields, primary_key))
    }

    fn to_field(&self, column: &ColumnInfo) -> Field {
        let field_name = self.transformer.column_to_field_name(&column.name);
        let (field_type, length) = map_type(&column.column_type);
        Field {
            column_name: column.name.clone(),
            field_name_first_upper: first_upper(&field_name),
            field_name,
            key_type: KeyType::from_indicator(&column.key),
            field_type,
            length,
            not_null: column.nullable == "NO",
            default_value: column.default.clone(),
            comment: column.comment.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldType, MemorySchema, MemoryTable, SnakeCaseTransformer};
    use pretty_assertions::assert_eq;

    fn schema() -> MemorySchema {
        MemorySchema::new()
            .table(
                MemoryTable::new("blog_post")
                    .comment("Blog posts")
                    .column(ColumnInfo::new("id", "bigint(20)").primary_key())
                    .column(ColumnInfo::new("slug", "varchar(64)").unique().not_null())
                    .column(ColumnInfo::new("author_id", "int(11)").foreign_key())
                    .column(
                        ColumnInfo::new("published_at", "datetime")
                            .default_value("CURRENT_TIMESTAMP")
                            .comment("Publication time"),
                    ),
            )
            .table(
                MemoryTable::new("blog_post_tag")
                    .column(ColumnInfo::new("post_id", "bigint(20)").primary_key())
                    .column(ColumnInfo::new("tag_id", "bigint(20)").primary_key()),
            )
            .table(MemoryTable::new("blog_log").column(ColumnInfo::new("line", "text")))
            .table(MemoryTable::new("blog_tag").column(ColumnInfo::new("id", "int").primary_key()))
    }

    #[tokio::test]
    async fn test_list_entity_tables() {
        let schema = schema();
        let transformer = SnakeCaseTransformer::new(true);
        let reader = SchemaReader::new(&schema, &transformer, "blog");
        let mut diagnostics = Diagnostics::new();

        let classification = reader.list_entity_tables(&mut diagnostics).await;
        assert_eq!(
            classification,
            TableClassification {
                entity_tables: vec![
                    ("blog_post".to_owned(), "Blog posts".to_owned()),
                    ("blog_tag".to_owned(), String::new()),
                ],
                unclassified: Vec::new(),
            }
        );
        assert_eq!(
            classification.non_junction_tables(),
            HashSet::from(["blog_post".to_owned(), "blog_tag".to_owned()])
        );
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_read_fields() -> Result<(), ScaffoldErr> {
        let schema = schema();
        let transformer = SnakeCaseTransformer::new(true);
        let reader = SchemaReader::new(&schema, &transformer, "blog");

        let (fields, primary_key) = reader.read_fields("blog_post").await?;
        assert_eq!(
            primary_key,
            Field {
                column_name: "id".to_owned(),
                field_name: "id".to_owned(),
                field_name_first_upper: "Id".to_owned(),
                key_type: KeyType::PrimaryKey,
                field_type: FieldType::Long,
                length: None,
                not_null: true,
                default_value: None,
                comment: String::new(),
            }
        );
        assert_eq!(
            fields,
            vec![
                Field {
                    column_name: "slug".to_owned(),
                    field_name: "slug".to_owned(),
                    field_name_first_upper: "Slug".to_owned(),
                    key_type: KeyType::UniqueKey,
                    field_type: FieldType::String,
                    length: Some(64),
                    not_null: true,
                    default_value: None,
                    comment: String::new(),
                },
                Field {
                    column_name: "published_at".to_owned(),
                    field_name: "publishedAt".to_owned(),
                    field_name_first_upper: "PublishedAt".to_owned(),
                    key_type: KeyType::NotKey,
                    field_type: FieldType::Date,
                    length: Some(19),
                    not_null: false,
                    default_value: Some("CURRENT_TIMESTAMP".to_owned()),
                    comment: "Publication time".to_owned(),
                },
            ]
        );
        assert!(fields.iter().all(|f| f.column_name != "author_id"));
        Ok(())
    }

    #[tokio::test]
    async fn test_read_fields_without_primary_key() {
        let schema = schema();
        let transformer = SnakeCaseTransformer::new(true);
        let reader = SchemaReader::new(&schema, &transformer, "blog");

        assert!(matches!(
            reader.read_fields("blog_log").await,
            Err(ScaffoldErr::MissingPrimaryKey(table)) if table == "blog_log"
        ));
    }
}
