use crate::{Field, ManyToMany, ManyToOne, OneToMany};
use serde::Serialize;
use std::collections::HashMap;

/// A table with a single-column primary key, ready to be rendered
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entity {
    pub table_name: String,
    pub entity_comment: String,
    pub entity_name: String,
    pub entity_name_lower: String,
    pub module_name: String,
    /// Non-key and unique-key fields in column order. Never holds the primary
    /// key nor any foreign-key column.
    pub fields: Vec<Field>,
    pub primary_key: Field,
    pub has_date_type: bool,
    /// Random per-entity tag for generated serialization metadata
    pub serial_version_uid: i64,
    pub one_to_many: Vec<OneToMany>,
    pub many_to_one: Vec<ManyToOne>,
    pub many_to_many: Vec<ManyToMany>,
}

impl Entity {
    pub fn field(&self, column_name: &str) -> Option<&Field> {
        std::iter::once(&self.primary_key)
            .chain(self.fields.iter())
            .find(|field| field.column_name == column_name)
    }
}

/// Entities of one build, in discovery order and addressable by table name
#[derive(Clone, Debug, Default)]
pub struct EntityMap {
    entities: Vec<Entity>,
    by_table: HashMap<String, usize>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, replacing any previous entity of the same table in place
    pub fn insert(&mut self, entity: Entity) {
        match self.by_table.get(&entity.table_name) {
            Some(&index) => self.entities[index] = entity,
            None => {
                self.by_table
                    .insert(entity.table_name.clone(), self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.by_table.contains_key(table_name)
    }

    pub fn get(&self, table_name: &str) -> Option<&Entity> {
        self.by_table
            .get(table_name)
            .map(|&index| &self.entities[index])
    }

    pub fn get_mut(&mut self, table_name: &str) -> Option<&mut Entity> {
        self.by_table
            .get(table_name)
            .map(|&index| &mut self.entities[index])
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn into_vec(self) -> Vec<Entity> {
        self.entities
    }
}

impl FromIterator<Entity> for EntityMap {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut map = Self::new();
        for entity in iter {
            map.insert(entity);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldType, KeyType};

    fn entity(table_name: &str, entity_comment: &str) -> Entity {
        Entity {
            table_name: table_name.to_owned(),
            entity_comment: entity_comment.to_owned(),
            entity_name: String::new(),
            entity_name_lower: String::new(),
            module_name: String::new(),
            fields: Vec::new(),
            primary_key: Field {
                column_name: "id".to_owned(),
                field_name: "id".to_owned(),
                field_name_first_upper: "Id".to_owned(),
                key_type: KeyType::PrimaryKey,
                field_type: FieldType::Integer,
                length: None,
                not_null: true,
                default_value: None,
                comment: String::new(),
            },
            has_date_type: false,
            serial_version_uid: 0,
            one_to_many: Vec::new(),
            many_to_one: Vec::new(),
            many_to_many: Vec::new(),
        }
    }

    #[test]
    fn test_entity_map() {
        let mut entities: EntityMap = [entity("cake", "Cakes"), entity("fruit", "Fruits")]
            .into_iter()
            .collect();
        assert!(entities.contains("cake"));
        assert!(!entities.contains("filling"));

        entities.insert(entity("cake", "Cakes, again"));
        assert_eq!(entities.len(), 2);
        assert_eq!(entities.get("cake").unwrap().entity_comment, "Cakes, again");
        assert_eq!(
            entities
                .into_vec()
                .iter()
                .map(|e| e.table_name.as_str())
                .collect::<Vec<_>>(),
            vec!["cake", "fruit"]
        );
    }
}
