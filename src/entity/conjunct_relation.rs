use crate::Entity;
use serde::Serialize;

/// An association to a peer entity through a junction table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ManyToMany {
    pub schema_name: String,
    /// The junction table carrying the association
    pub via: String,
    pub table_name: String,
    pub module_name: String,
    pub entity_name: String,
    pub entity_name_lower: String,
    pub entity_comment: String,
    /// Junction column referencing the entity this record is attached to
    pub join_column: String,
    /// Junction column referencing the peer entity
    pub inverse_join_column: String,
}

impl ManyToMany {
    pub fn new(
        schema_name: &str,
        via: &str,
        peer: &Entity,
        join_column: &str,
        inverse_join_column: &str,
    ) -> Self {
        Self {
            schema_name: schema_name.to_owned(),
            via: via.to_owned(),
            table_name: peer.table_name.clone(),
            module_name: peer.module_name.clone(),
            entity_name: peer.entity_name.clone(),
            entity_name_lower: peer.entity_name_lower.clone(),
            entity_comment: peer.entity_comment.clone(),
            join_column: join_column.to_owned(),
            inverse_join_column: inverse_join_column.to_owned(),
        }
    }
}
