use crate::{
    Diagnostics, Entity, EntityMap, Field, GeneratorConfig, NameTransformer, RelationshipResolver,
    ScaffoldErr, SchemaReader, SchemaSource, SnakeCaseTransformer, util::first_lower,
};
use std::collections::{BTreeSet, HashSet};

/// The result of one build: entities in discovery order, the module names they
/// live in, and every problem met on the way
#[derive(Clone, Debug, PartialEq)]
pub struct EntityModel {
    pub entities: Vec<Entity>,
    pub modules: BTreeSet<String>,
    pub diagnostics: Diagnostics,
}

impl EntityModel {
    /// Whether the model holds all the schema data, i.e. no error was recorded
    pub fn is_complete(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn entity(&self, table_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.table_name == table_name)
    }

    /// Reject a model missing some schema data
    pub fn into_result(self) -> Result<Self, ScaffoldErr> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(ScaffoldErr::Incomplete(self.diagnostics))
        }
    }
}

/// Builds an [`EntityModel`] out of the metadata of a schema
#[derive(Debug)]
pub struct EntityModelBuilder<'a> {
    source: &'a dyn SchemaSource,
    config: GeneratorConfig,
    transformer: Box<dyn NameTransformer>,
}

impl<'a> EntityModelBuilder<'a> {
    pub fn new(source: &'a dyn SchemaSource, config: GeneratorConfig) -> Self {
        Self {
            source,
            config,
            transformer: Box::new(SnakeCaseTransformer::new(config.strip_table_prefix)),
        }
    }

    /// Replace the snake_case naming rules
    pub fn with_transformer<T>(mut self, transformer: T) -> Self
    where
        T: NameTransformer + 'static,
    {
        self.transformer = Box::new(transformer);
        self
    }

    /// Read the schema and infer its entities and associations.
    ///
    /// Never fails as a whole: a failed query leaves its share of the schema out
    /// of the model and is recorded in [`EntityModel::diagnostics`].
    pub async fn build(&self, schema: &str) -> EntityModel {
        let mut diagnostics = Diagnostics::new();
        let reader = SchemaReader::new(self.source, self.transformer.as_ref(), schema);

        let mut entities = EntityMap::new();
        let mut modules = BTreeSet::new();
        let mut version_tags = HashSet::new();
        let classification = reader.list_entity_tables(&mut diagnostics).await;
        let non_junction_tables = classification.non_junction_tables();
        for (table_name, comment) in classification.entity_tables {
            tracing::info!("Analysing table `{}`", table_name);
            match reader.read_fields(&table_name).await {
                Ok((fields, primary_key)) => {
                    let entity = self.new_entity(
                        table_name,
                        comment,
                        fields,
                        primary_key,
                        unique_version_tag(&mut version_tags),
                    );
                    modules.insert(entity.module_name.clone());
                    entities.insert(entity);
                }
                Err(err) => diagnostics.push_err(Some(table_name.as_str()), &err),
            }
        }

        tracing::info!("Linking {} entities", entities.len());
        match self.source.list_foreign_keys(schema).await {
            Ok(edges) => {
                RelationshipResolver::new(self.config)
                    .resolve(
                        self.source,
                        schema,
                        edges,
                        &mut entities,
                        &non_junction_tables,
                        &mut diagnostics,
                    )
                    .await
            }
            Err(err) => diagnostics.push_err(None, &err),
        }

        tracing::info!(
            entities = entities.len(),
            modules = modules.len(),
            diagnostics = diagnostics.len(),
            "Entity model built"
        );
        EntityModel {
            entities: entities.into_vec(),
            modules,
            diagnostics,
        }
    }

    fn new_entity(
        &self,
        table_name: String,
        entity_comment: String,
        fields: Vec<Field>,
        primary_key: Field,
        serial_version_uid: i64,
    ) -> Entity {
        let entity_name = self.transformer.table_to_entity_name(&table_name);
        let has_date_type = primary_key.is_date() || fields.iter().any(Field::is_date);
        Entity {
            module_name: self.transformer.module_name(&table_name),
            entity_name_lower: first_lower(&entity_name),
            entity_name,
            table_name,
            entity_comment,
            fields,
            primary_key,
            has_date_type,
            serial_version_uid,
            one_to_many: Vec::new(),
            many_to_one: Vec::new(),
            many_to_many: Vec::new(),
        }
    }
}

/// A random tag not handed out before in this build
fn unique_version_tag(issued: &mut HashSet<i64>) -> i64 {
    loop {
        let tag = rand::random::<i64>();
        if issued.insert(tag) {
            return tag;
        }
    }
}
