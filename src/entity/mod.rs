mod builder;
mod conjunct_relation;
#[allow(clippy::module_inception)]
mod entity;
mod field;
mod name_transformer;
mod relation;
mod resolver;
mod type_mapper;

pub use builder::*;
pub use conjunct_relation::*;
pub use entity::*;
pub use field::*;
pub use name_transformer::*;
pub use relation::*;
pub use resolver::*;
pub use type_mapper::*;
