use crate::Entity;
use serde::Serialize;

/// A foreign key from a source table to a target table, as discovered in the schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignKeyEdge {
    /// Column of the source table holding the reference
    pub column_name: String,
    pub source_table: String,
    pub target_table: String,
    pub target_column: String,
}

/// The owning side of a foreign key: the entity holding the column points at its parent
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManyToOne {
    pub table_name: String,
    pub column_name: String,
    pub module_name: String,
    pub entity_name: String,
    pub entity_name_lower: String,
    pub entity_comment: String,
}

/// The inverse side of a foreign key: a child entity referencing this one
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OneToMany {
    pub table_name: String,
    pub column_name: String,
    pub module_name: String,
    pub entity_name: String,
    pub entity_name_lower: String,
    pub entity_comment: String,
}

impl ManyToOne {
    pub fn new(target: &Entity, column_name: &str) -> Self {
        Self {
            table_name: target.table_name.clone(),
            column_name: column_name.to_owned(),
            module_name: target.module_name.clone(),
            entity_name: target.entity_name.clone(),
            entity_name_lower: target.entity_name_lower.clone(),
            entity_comment: target.entity_comment.clone(),
        }
    }
}

impl OneToMany {
    pub fn new(child: &Entity, column_name: &str) -> Self {
        Self {
            table_name: child.table_name.clone(),
            column_name: column_name.to_owned(),
            module_name: child.module_name.clone(),
            entity_name: child.entity_name.clone(),
            entity_name_lower: child.entity_name_lower.clone(),
            entity_comment: child.entity_comment.clone(),
        }
    }
}
