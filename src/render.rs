use crate::{Entity, EntityModel, ScaffoldErr};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, io::Write};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata shared by every generated file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderContext {
    pub author: String,
    pub email: String,
    pub version: String,
    /// Base package or namespace of the generated sources
    pub package_name: String,
    /// Generation time, formatted with [`DATE_FORMAT`]
    pub date: String,
}

impl RenderContext {
    /// Stamp the context with the current local time
    pub fn now(mut self) -> Self {
        self.date = chrono::Local::now().format(DATE_FORMAT).to_string();
        self
    }
}

/// Consumer of a finished entity graph, e.g. a template engine writing source files
pub trait Renderer {
    fn render(
        &mut self,
        context: &RenderContext,
        entities: &[Entity],
        modules: &BTreeSet<String>,
    ) -> Result<(), ScaffoldErr>;

    fn render_model(&mut self, context: &RenderContext, model: &EntityModel) -> Result<(), ScaffoldErr> {
        self.render(context, &model.entities, &model.modules)
    }
}

/// Writes the whole graph as one pretty-printed JSON document
#[derive(Debug)]
pub struct JsonRenderer<W> {
    writer: W,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    context: &'a RenderContext,
    modules: &'a BTreeSet<String>,
    entities: &'a [Entity],
}

impl<W> JsonRenderer<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Renderer for JsonRenderer<W>
where
    W: Write,
{
    fn render(
        &mut self,
        context: &RenderContext,
        entities: &[Entity],
        modules: &BTreeSet<String>,
    ) -> Result<(), ScaffoldErr> {
        let document = JsonDocument {
            context,
            modules,
            entities,
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        Ok(())
    }
}
