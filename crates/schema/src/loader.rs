use crate::error::SchemaError;
use crate::model::{
    Builtin, ColumnDef, EnumDef, Geometry, Modifiers, SchemaDocument, SchemaEntry, TableDef,
    TypeTag,
};
use crate::registry::TypeRegistry;
use serde_yaml::Value as Yaml;
use std::fs;
use std::path::Path;

/// Namespace marker for references to previously registered types.
pub const TYPE_NAMESPACE: &str = "public.";

/// Marker for pre-typed columns whose DDL fragment passes through verbatim.
pub const RAW_PREFIX: &str = "raw:";

/// Structurally parsed document. Base types are still raw strings; nothing
/// has touched the registry yet, which lets the driver register every enum
/// in a batch before any table resolves.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub name: String,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub enum ParsedEntry {
    Enum(EnumDef),
    Table(ParsedTable),
}

#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub name: String,
    pub columns: Vec<ParsedColumn>,
}

#[derive(Debug, Clone)]
pub struct ParsedColumn {
    pub name: String,
    pub datatype: String,
    pub modifiers: Modifiers,
}

impl ParsedDocument {
    pub fn enum_defs(&self) -> impl Iterator<Item = &EnumDef> {
        self.entries.iter().filter_map(|e| match e {
            ParsedEntry::Enum(def) => Some(def),
            ParsedEntry::Table(_) => None,
        })
    }

    pub fn is_enum_document(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e, ParsedEntry::Enum(_)))
    }

    /// Resolve every column's base type against the registry. Fails on the
    /// first unknown tag; no partial document escapes.
    pub fn resolve(&self, registry: &TypeRegistry) -> Result<SchemaDocument, SchemaError> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match entry {
                ParsedEntry::Enum(def) => entries.push(SchemaEntry::Enum(def.clone())),
                ParsedEntry::Table(table) => {
                    let mut columns = Vec::with_capacity(table.columns.len());
                    for col in &table.columns {
                        let type_tag =
                            resolve_type(&table.name, &col.name, &col.datatype, registry)?;
                        columns.push(ColumnDef {
                            name: col.name.clone(),
                            type_tag,
                            modifiers: col.modifiers.clone(),
                        });
                    }
                    entries.push(SchemaEntry::Table(TableDef {
                        name: table.name.clone(),
                        columns,
                    }));
                }
            }
        }
        Ok(SchemaDocument {
            name: self.name.clone(),
            entries,
        })
    }
}

/// Turn a base-type string into a tag. Bare names must be builtins;
/// namespaced names must match a geometry type or an already registered
/// enum. Everything else is fatal for the document.
pub fn resolve_type(
    table: &str,
    column: &str,
    raw: &str,
    registry: &TypeRegistry,
) -> Result<TypeTag, SchemaError> {
    if let Some(fragment) = raw.strip_prefix(RAW_PREFIX) {
        return Ok(TypeTag::Raw(fragment.trim().to_string()));
    }
    if let Some(name) = raw.strip_prefix(TYPE_NAMESPACE) {
        if let Some(kind) = Geometry::from_tag(name) {
            return Ok(TypeTag::Geometry(kind));
        }
        if registry.contains(name) {
            return Ok(TypeTag::Enum(name.to_string()));
        }
    } else {
        if let Some(kind) = Builtin::from_tag(raw) {
            return Ok(TypeTag::Builtin(kind));
        }
        if let Some(kind) = Geometry::from_tag(raw) {
            return Ok(TypeTag::Geometry(kind));
        }
    }
    Err(SchemaError::UnknownType {
        table: table.to_string(),
        column: column.to_string(),
        tag: raw.to_string(),
    })
}

pub struct SchemaLoader {
    registry: TypeRegistry,
}

impl SchemaLoader {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn parse_path(&self, path: &Path) -> Result<ParsedDocument, SchemaError> {
        let name = document_name(path);
        let text = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.parse_str(&name, &text)
    }

    pub fn parse_str(&self, name: &str, text: &str) -> Result<ParsedDocument, SchemaError> {
        let value: Yaml = serde_yaml::from_str(text).map_err(|source| SchemaError::Yaml {
            document: name.to_string(),
            source,
        })?;
        parse_document(name, &value)
    }

    /// Add every enum declared by `doc` to the registry, tagged with the
    /// document it came from.
    pub fn register_enums(&self, doc: &ParsedDocument) {
        for def in doc.enum_defs() {
            self.registry.register_enum(def.clone(), &doc.name);
        }
    }

    /// Single-document convenience: parse, register the document's own
    /// enums, then resolve.
    pub fn load_path(&self, path: &Path) -> Result<SchemaDocument, SchemaError> {
        let parsed = self.parse_path(path)?;
        self.register_enums(&parsed);
        parsed.resolve(&self.registry)
    }

    pub fn load_str(&self, name: &str, text: &str) -> Result<SchemaDocument, SchemaError> {
        let parsed = self.parse_str(name, text)?;
        self.register_enums(&parsed);
        parsed.resolve(&self.registry)
    }
}

pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parse_document(name: &str, value: &Yaml) -> Result<ParsedDocument, SchemaError> {
    let seq = value.as_sequence().ok_or_else(|| SchemaError::Parse {
        document: name.to_string(),
        reason: "expected a sequence of table or enum definitions".to_string(),
    })?;

    let mut entries = Vec::with_capacity(seq.len());
    for item in seq {
        entries.push(parse_entry(name, item)?);
    }
    Ok(ParsedDocument {
        name: name.to_string(),
        entries,
    })
}

fn single_key_entry(item: &Yaml) -> Option<(&str, &Yaml)> {
    let map = item.as_mapping()?;
    if map.len() != 1 {
        return None;
    }
    let (key, value) = map.iter().next()?;
    Some((key.as_str()?, value))
}

fn parse_entry(document: &str, item: &Yaml) -> Result<ParsedEntry, SchemaError> {
    let (name, body) = single_key_entry(item).ok_or_else(|| SchemaError::Parse {
        document: document.to_string(),
        reason: "each definition must be a single-key mapping".to_string(),
    })?;
    let seq = body.as_sequence().ok_or_else(|| SchemaError::Parse {
        document: document.to_string(),
        reason: format!("definition '{name}' must hold a sequence"),
    })?;
    if seq.is_empty() {
        return Err(SchemaError::Parse {
            document: document.to_string(),
            reason: format!("definition '{name}' is empty"),
        });
    }

    // A sequence of bare strings declares an enum; anything else is a table.
    if seq.iter().all(Yaml::is_string) {
        let members = seq
            .iter()
            .filter_map(Yaml::as_str)
            .map(str::to_string)
            .collect();
        return Ok(ParsedEntry::Enum(EnumDef {
            name: name.to_string(),
            members,
        }));
    }

    let mut columns = Vec::with_capacity(seq.len());
    for col in seq {
        columns.push(parse_column(document, name, col)?);
    }
    Ok(ParsedEntry::Table(ParsedTable {
        name: name.to_string(),
        columns,
    }))
}

fn parse_column(document: &str, table: &str, item: &Yaml) -> Result<ParsedColumn, SchemaError> {
    let (name, body) = single_key_entry(item).ok_or_else(|| SchemaError::Parse {
        document: document.to_string(),
        reason: format!("table '{table}': column specs must be single-key mappings"),
    })?;
    let seq = body.as_sequence().ok_or_else(|| column_error(
        table,
        name,
        "column spec must be a sequence headed by the base type",
    ))?;

    let mut items = seq.iter();
    let datatype = items
        .next()
        .and_then(Yaml::as_str)
        .ok_or_else(|| column_error(table, name, "the base type must be the first entry"))?
        .to_string();

    let mut modifiers = Modifiers::default();
    for item in items {
        let (key, value) = single_key_entry(item)
            .ok_or_else(|| column_error(table, name, "modifiers must be single-key mappings"))?;
        match key {
            "required" => modifiers.required = bool_modifier(table, name, key, value)?,
            "array" => modifiers.array = bool_modifier(table, name, key, value)?,
            "unique" => modifiers.unique = bool_modifier(table, name, key, value)?,
            "primary" => modifiers.primary = bool_modifier(table, name, key, value)?,
            "sequence" => modifiers.sequence = bool_modifier(table, name, key, value)?,
            "share" => modifiers.share = bool_modifier(table, name, key, value)?,
            "children" => modifiers.children = list_modifier(table, name, value)?,
            other => {
                return Err(column_error(
                    table,
                    name,
                    format!("unrecognised modifier '{other}'"),
                ))
            }
        }
    }

    Ok(ParsedColumn {
        name: name.to_string(),
        datatype,
        modifiers,
    })
}

fn bool_modifier(table: &str, column: &str, key: &str, value: &Yaml) -> Result<bool, SchemaError> {
    value
        .as_bool()
        .ok_or_else(|| column_error(table, column, format!("modifier '{key}' must be a bool")))
}

fn list_modifier(table: &str, column: &str, value: &Yaml) -> Result<Vec<String>, SchemaError> {
    let seq = value.as_sequence().ok_or_else(|| {
        column_error(table, column, "modifier 'children' must be a list")
    })?;
    seq.iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                column_error(table, column, "modifier 'children' must list strings")
            })
        })
        .collect()
}

fn column_error(table: &str, column: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::ColumnParse {
        table: table.to_string(),
        column: column.to_string(),
        reason: reason.into(),
    }
}
