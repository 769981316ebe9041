#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # Entity Scaffold
//!
//! Reads the metadata of a MySQL schema and infers an entity model out of it:
//! one entity per table with a single-column primary key, typed fields for its
//! columns, and the one-to-many, many-to-one and many-to-many associations its
//! foreign keys describe.
//!
//! The model is handed to a [`Renderer`], which turns it into source files or,
//! with [`JsonRenderer`], into one JSON document.
//!
//! ```ignore
//! use entity_scaffold::*;
//!
//! let config = load_config("scaffold.json")?;
//! let source = MySqlSchemaSource::connect(&config.connection).await?;
//! let model = EntityModelBuilder::new(&source, config.generator)
//!     .build(&config.connection.database)
//!     .await;
//!
//! for diagnostic in model.diagnostics.iter() {
//!     eprintln!("{diagnostic}");
//! }
//! JsonRenderer::new(std::io::stdout()).render_model(&config.render.now(), &model)?;
//! ```
//!
//! Queries run one at a time over a single connection. A failed query never
//! aborts the build: the part of the schema it would have read is left out and
//! the failure is recorded in [`EntityModel::diagnostics`].

mod config;
mod diagnostic;
mod entity;
mod error;
mod render;
mod schema;
pub mod util;

pub use config::*;
pub use diagnostic::*;
pub use entity::*;
pub use error::*;
pub use render::*;
pub use schema::*;
