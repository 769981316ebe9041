use crate::{
    DiagnosticKind, Diagnostics, EntityMap, ForeignKeyEdge, GeneratorConfig, JunctionKey,
    ManyToMany, ManyToOne, OneToMany, SchemaSource,
};
use std::collections::HashSet;

/// Turns foreign keys into associations between entities
#[derive(Copy, Clone, Debug)]
pub struct RelationshipResolver {
    config: GeneratorConfig,
}

impl RelationshipResolver {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Attach every association the foreign keys of the schema describe.
    ///
    /// Foreign keys held by an entity table become one-to-many and many-to-one
    /// associations. A table holding foreign keys without being an entity is a
    /// junction candidate: its own foreign keys are queried and, when they point
    /// at exactly two entities, both entities are linked many-to-many.
    ///
    /// Tables in `non_junction_tables` are never junction candidates, whether or
    /// not they made it into `entities`.
    pub async fn resolve(
        &self,
        source: &dyn SchemaSource,
        schema: &str,
        edges: Vec<ForeignKeyEdge>,
        entities: &mut EntityMap,
        non_junction_tables: &HashSet<String>,
        diagnostics: &mut Diagnostics,
    ) {
        let junction_candidates = self.link_foreign_keys(&edges, entities, non_junction_tables);
        if !self.config.many_to_many {
            return;
        }
        for junction in junction_candidates {
            match source.list_junction_keys(schema, &junction).await {
                Ok(keys) => self.link_junction(schema, &junction, keys, entities, diagnostics),
                Err(err) => diagnostics.push_err(Some(junction.as_str()), &err),
            }
        }
    }

    /// Attach direct associations and return the junction candidates, in the
    /// order they were first met.
    pub fn link_foreign_keys(
        &self,
        edges: &[ForeignKeyEdge],
        entities: &mut EntityMap,
        non_junction_tables: &HashSet<String>,
    ) -> Vec<String> {
        let mut junction_candidates: Vec<String> = Vec::new();
        for edge in edges {
            let Some(source) = entities.get(&edge.source_table) else {
                if non_junction_tables.contains(&edge.source_table) {
                    tracing::debug!(
                        source = %edge.source_table,
                        "Foreign key held by an entity table missing from the model"
                    );
                } else if !junction_candidates.contains(&edge.source_table) {
                    junction_candidates.push(edge.source_table.clone());
                }
                continue;
            };
            let Some(target) = entities.get(&edge.target_table) else {
                tracing::debug!(
                    source = %edge.source_table,
                    target = %edge.target_table,
                    "Foreign key references a table that is not an entity"
                );
                continue;
            };
            let child = OneToMany::new(source, &edge.column_name);
            let parent = ManyToOne::new(target, &edge.column_name);

            if self.config.one_to_many {
                if let Some(target) = entities.get_mut(&edge.target_table) {
                    tracing::debug!(
                        "{} has many {} by {}",
                        target.table_name,
                        child.table_name,
                        child.column_name
                    );
                    target.one_to_many.push(child);
                }
            }
            if self.config.many_to_one {
                if let Some(source) = entities.get_mut(&edge.source_table) {
                    tracing::debug!(
                        "{} belongs to {} by {}",
                        source.table_name,
                        parent.table_name,
                        parent.column_name
                    );
                    source.many_to_one.push(parent);
                }
            }
        }
        junction_candidates
    }

    /// Link the two entities a junction table references, one record on each side.
    ///
    /// Only a junction with exactly two distinct foreign keys is linked; any other
    /// shape, or a reference to a table that is not an entity, is recorded as a
    /// warning and left unlinked.
    pub fn link_junction(
        &self,
        schema: &str,
        junction: &str,
        keys: Vec<JunctionKey>,
        entities: &mut EntityMap,
        diagnostics: &mut Diagnostics,
    ) {
        let mut distinct: Vec<JunctionKey> = Vec::with_capacity(keys.len());
        for key in keys {
            if !distinct.contains(&key) {
                distinct.push(key);
            }
        }

        let (left, right) = match distinct.as_slice() {
            [left, right] => (left, right),
            [] | [_] => {
                diagnostics.push_warning(
                    DiagnosticKind::JunctionTooFewKeys,
                    junction,
                    format!(
                        "Junction candidate has {} foreign key(s), two are needed",
                        distinct.len()
                    ),
                );
                return;
            }
            keys => {
                diagnostics.push_warning(
                    DiagnosticKind::UnsupportedJunctionShape,
                    junction,
                    format!(
                        "Junction candidate has {} foreign keys ({}), only two are supported",
                        keys.len(),
                        keys.iter()
                            .map(|key| format!("{} -> {}", key.column_name, key.referenced_table))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                );
                return;
            }
        };

        let (Some(left_entity), Some(right_entity)) = (
            entities.get(&left.referenced_table),
            entities.get(&right.referenced_table),
        ) else {
            diagnostics.push_warning(
                DiagnosticKind::UnresolvedJunctionTarget,
                junction,
                format!(
                    "Junction candidate references {} and {}, which are not both entities",
                    left.referenced_table, right.referenced_table
                ),
            );
            return;
        };

        let to_right = ManyToMany::new(
            schema,
            junction,
            right_entity,
            &left.column_name,
            &right.column_name,
        );
        let to_left = ManyToMany::new(
            schema,
            junction,
            left_entity,
            &right.column_name,
            &left.column_name,
        );
        tracing::debug!(
            "{} and {} are linked many-to-many via {}",
            left.referenced_table,
            right.referenced_table,
            junction
        );
        if let Some(entity) = entities.get_mut(&left.referenced_table) {
            entity.many_to_many.push(to_right);
        }
        if let Some(entity) = entities.get_mut(&right.referenced_table) {
            entity.many_to_many.push(to_left);
        }
    }
}
