pub mod error;
pub mod loader;
pub mod model;
pub mod registry;
pub mod typemap;

pub use error::SchemaError;
pub use loader::{ParsedDocument, SchemaLoader};
pub use model::{
    Builtin, ColumnDef, EnumDef, Geometry, Modifiers, SchemaDocument, SchemaEntry, TableDef,
    TypeTag,
};
pub use registry::TypeRegistry;
