use crate::typemap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The seven scalar builtins a column may use directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Int32,
    Int64,
    Bool,
    String,
    Bytes,
    Timestamp,
    Json,
}

impl Builtin {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            "timestamp" => Some(Self::Timestamp),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// PostGIS-backed geometry types, reachable both bare and through the
/// `public.` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Polygon,
    Point,
}

impl Geometry {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "polygon" => Some(Self::Polygon),
            "point" => Some(Self::Point),
            _ => None,
        }
    }
}

/// Resolved column type. Enum references carry the declared enum name;
/// raw fragments pass through to the DDL untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Builtin(Builtin),
    Geometry(Geometry),
    Enum(String),
    Raw(String),
}

/// Column annotations. All default to off; `children` is the only
/// list-valued modifier and is carried for downstream consumers, the
/// emitters never read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub required: bool,
    pub array: bool,
    pub unique: bool,
    pub primary: bool,
    pub sequence: bool,
    pub share: bool,
    pub children: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub type_tag: TypeTag,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Introspection view of the table: one object per column, keyed by
    /// column name, with the resolved runtime datatype and every modifier.
    pub fn describe(&self) -> Value {
        let mut map = Map::new();
        for col in &self.columns {
            map.insert(
                col.name.clone(),
                json!({
                    "datatype": typemap::to_runtime(&col.type_tag),
                    "required": col.modifiers.required,
                    "array": col.modifiers.array,
                    "unique": col.modifiers.unique,
                    "primary": col.modifiers.primary,
                    "sequence": col.modifiers.sequence,
                    "share": col.modifiers.share,
                    "children": col.modifiers.children.clone(),
                }),
            );
        }
        Value::Object(map)
    }

    /// Columns carried into the wire schema.
    pub fn shared_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.modifiers.share)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Enum(EnumDef),
    Table(TableDef),
}

/// One fully resolved source document, in declaration order. Immutable once
/// built; every artifact is derived from it from scratch on each run.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub name: String,
    pub entries: Vec<SchemaEntry>,
}

impl SchemaDocument {
    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.entries.iter().filter_map(|e| match e {
            SchemaEntry::Enum(def) => Some(def),
            SchemaEntry::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.entries.iter().filter_map(|e| match e {
            SchemaEntry::Table(def) => Some(def),
            SchemaEntry::Enum(_) => None,
        })
    }
}
