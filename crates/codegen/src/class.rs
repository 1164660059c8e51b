//! Rust data-class stubs. Every column becomes one struct field and one
//! constructor parameter; defaults follow the column type. The stubs hand
//! their contents to the query layer as an ordered name/value list, which
//! is the only contract that layer depends on.

use schema::{typemap, Builtin, ColumnDef, EnumDef, SchemaDocument, SchemaEntry, TableDef, TypeRegistry, TypeTag};
use std::fmt::Write;

pub const HEADER: &str = "// Code generated by schemaforge. DO NOT EDIT.\n";

/// Rust type of a stub field. Scalars that carry a non-null default keep a
/// bare type; everything defaulting to absent is wrapped in `Option`.
fn field_type(tag: &TypeTag, array: bool) -> String {
    let base = match tag {
        TypeTag::Builtin(Builtin::Int32) | TypeTag::Builtin(Builtin::Int64) => "i64".to_string(),
        TypeTag::Builtin(Builtin::Bool) => "bool".to_string(),
        TypeTag::Builtin(Builtin::String) => "String".to_string(),
        TypeTag::Builtin(Builtin::Bytes) => "Vec<u8>".to_string(),
        TypeTag::Builtin(Builtin::Timestamp) => "String".to_string(),
        TypeTag::Builtin(Builtin::Json) => "Value".to_string(),
        TypeTag::Geometry(_) => "Vec<u8>".to_string(),
        TypeTag::Enum(name) => typemap::capitalize(name),
        TypeTag::Raw(_) => "String".to_string(),
    };
    if array {
        return format!("Option<Vec<{base}>>");
    }
    match tag {
        TypeTag::Builtin(Builtin::Bool) | TypeTag::Builtin(Builtin::Timestamp) | TypeTag::Enum(_) => {
            base
        }
        _ => format!("Option<{base}>"),
    }
}

/// Default expression for a stub field: `false` for bools, the stringified
/// construction time for timestamps, the ordinal-1 member for enums, absent
/// for everything else.
fn default_expr(col: &ColumnDef, registry: &TypeRegistry) -> String {
    if col.modifiers.array {
        return "None".to_string();
    }
    match &col.type_tag {
        TypeTag::Builtin(Builtin::Bool) => "false".to_string(),
        TypeTag::Builtin(Builtin::Timestamp) => {
            "chrono::Utc::now().naive_utc().to_string()".to_string()
        }
        TypeTag::Enum(name) => {
            let ty = typemap::capitalize(name);
            registry
                .first_member(name)
                .map(|member| format!("{ty}::{member}"))
                .unwrap_or_else(|| format!("{ty}::from_ordinal(1).unwrap()"))
        }
        _ => "None".to_string(),
    }
}

/// Expression placed in the ordered value list. Enums travel as their
/// ordinal so the query layer never sees a generated Rust type.
fn value_expr(col: &ColumnDef) -> String {
    let field = &col.name;
    if col.modifiers.array {
        if matches!(col.type_tag, TypeTag::Enum(_)) {
            return format!(
                "json!(self.{field}.as_ref().map(|v| v.iter().map(|m| m.ordinal()).collect::<Vec<_>>()))"
            );
        }
        return format!("json!(self.{field})");
    }
    match &col.type_tag {
        TypeTag::Enum(_) => format!("json!(self.{field}.ordinal())"),
        _ => format!("json!(self.{field})"),
    }
}

pub fn render_enum(def: &EnumDef) -> String {
    let ty = typemap::capitalize(&def.name);
    let mut out = String::new();
    out.push_str("#[allow(non_camel_case_types)]\n");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
    let _ = writeln!(out, "pub enum {ty} {{");
    for (idx, member) in def.members.iter().enumerate() {
        let _ = writeln!(out, "    {member} = {},", idx + 1);
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {ty} {{");
    out.push_str("    pub fn from_ordinal(ordinal: i64) -> Option<Self> {\n");
    out.push_str("        match ordinal {\n");
    for (idx, member) in def.members.iter().enumerate() {
        let _ = writeln!(out, "            {} => Some(Self::{member}),", idx + 1);
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
    out.push_str("    pub fn ordinal(self) -> i64 {\n");
    out.push_str("        self as i64\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

pub fn render_struct(def: &TableDef, registry: &TypeRegistry) -> String {
    let ty = typemap::capitalize(&def.name);
    let mut out = String::new();
    out.push_str("#[derive(Debug, Clone)]\n");
    let _ = writeln!(out, "pub struct {ty} {{");
    for col in &def.columns {
        let _ = writeln!(
            out,
            "    pub {}: {},",
            col.name,
            field_type(&col.type_tag, col.modifiers.array)
        );
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {ty} {{");
    let params = def
        .columns
        .iter()
        .map(|c| format!("{}: {}", c.name, field_type(&c.type_tag, c.modifiers.array)))
        .collect::<Vec<_>>()
        .join(", ");
    let names = def
        .columns
        .iter()
        .map(|c| c.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "    pub fn new({params}) -> Self {{");
    let _ = writeln!(out, "        Self {{ {names} }}");
    out.push_str("    }\n\n");

    out.push_str("    pub fn values(&self) -> Vec<(&'static str, Value)> {\n");
    out.push_str("        vec![\n");
    for col in &def.columns {
        let _ = writeln!(out, "            (\"{}\", {}),", col.name, value_expr(col));
    }
    out.push_str("        ]\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl Default for {ty} {{");
    out.push_str("    fn default() -> Self {\n");
    out.push_str("        Self {\n");
    for col in &def.columns {
        let _ = writeln!(out, "            {}: {},", col.name, default_expr(col, registry));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// Render the class-stub source for one document. Tables pull in
/// `serde_json` for the value list and `use super::…` for enum stubs that
/// live in a sibling generated file.
pub fn render_document(doc: &SchemaDocument, registry: &TypeRegistry) -> String {
    let mut out = HEADER.to_string();

    let has_table = doc.tables().next().is_some();
    let mut extern_enums: Vec<String> = Vec::new();
    for table in doc.tables() {
        for col in &table.columns {
            let name = match &col.type_tag {
                TypeTag::Enum(name) => name,
                _ => continue,
            };
            if registry.document_of(name).is_some_and(|source| source != doc.name) {
                let ty = typemap::capitalize(name);
                if !extern_enums.contains(&ty) {
                    extern_enums.push(ty);
                }
            }
        }
    }

    if has_table {
        out.push('\n');
        out.push_str("use serde_json::{json, Value};\n");
        for ty in &extern_enums {
            let _ = writeln!(out, "use super::{ty};");
        }
    }

    for entry in &doc.entries {
        out.push('\n');
        match entry {
            SchemaEntry::Enum(def) => out.push_str(&render_enum(def)),
            SchemaEntry::Table(def) => out.push_str(&render_struct(def, registry)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::SchemaLoader;

    fn loader_with_enums() -> SchemaLoader {
        let loader = SchemaLoader::new(TypeRegistry::new());
        loader
            .load_str(
                "enums",
                "- Projectdifficulty:\n    - EASY\n    - MEDIUM\n    - HARD\n",
            )
            .unwrap();
        loader
    }

    #[test]
    fn test_enum_stub_is_one_indexed() {
        let def = EnumDef {
            name: "Status".to_string(),
            members: vec!["DRAFT".into(), "PUBLISHED".into(), "ARCHIVED".into()],
        };
        let stub = render_enum(&def);
        assert!(stub.contains("pub enum Status {"));
        assert!(stub.contains("    DRAFT = 1,"));
        assert!(stub.contains("    PUBLISHED = 2,"));
        assert!(stub.contains("    ARCHIVED = 3,"));
        assert!(stub.contains("1 => Some(Self::DRAFT),"));
    }

    #[test]
    fn test_struct_fields_and_defaults_follow_column_types() {
        let loader = loader_with_enums();
        let doc = loader
            .load_str(
                "projects",
                r#"
- projects:
    - id:
        - int64
    - title:
        - string
    - enabled:
        - bool
    - created:
        - timestamp
    - difficulty:
        - public.Projectdifficulty
    - tags:
        - string
        - array: true
"#,
            )
            .unwrap();
        let stub = render_struct(doc.tables().next().unwrap(), loader.registry());

        assert!(stub.contains("pub struct Projects {"));
        assert!(stub.contains("    pub id: Option<i64>,"));
        assert!(stub.contains("    pub title: Option<String>,"));
        assert!(stub.contains("    pub enabled: bool,"));
        assert!(stub.contains("    pub created: String,"));
        assert!(stub.contains("    pub difficulty: Projectdifficulty,"));
        assert!(stub.contains("    pub tags: Option<Vec<String>>,"));

        // defaults: false, construction-time timestamp, ordinal 1, absent
        assert!(stub.contains("            enabled: false,"));
        assert!(stub.contains("            created: chrono::Utc::now().naive_utc().to_string(),"));
        assert!(stub.contains("            difficulty: Projectdifficulty::EASY,"));
        assert!(stub.contains("            id: None,"));
        assert!(stub.contains("            tags: None,"));
    }

    #[test]
    fn test_constructor_takes_one_parameter_per_column() {
        let loader = SchemaLoader::new(TypeRegistry::new());
        let doc = loader
            .load_str(
                "widgets",
                "- widgets:\n    - id:\n        - int64\n    - name:\n        - string\n        - share: true\n",
            )
            .unwrap();
        let stub = render_struct(doc.tables().next().unwrap(), loader.registry());
        // all columns appear, shared or not
        assert!(stub.contains("pub fn new(id: Option<i64>, name: Option<String>) -> Self {"));
        assert!(stub.contains("Self { id, name }"));
    }

    #[test]
    fn test_values_list_preserves_column_order() {
        let loader = loader_with_enums();
        let doc = loader
            .load_str(
                "projects",
                "- projects:\n    - difficulty:\n        - public.Projectdifficulty\n    - id:\n        - int64\n",
            )
            .unwrap();
        let stub = render_struct(doc.tables().next().unwrap(), loader.registry());
        let difficulty = stub.find("(\"difficulty\", json!(self.difficulty.ordinal())),").unwrap();
        let id = stub.find("(\"id\", json!(self.id)),").unwrap();
        assert!(difficulty < id);
    }

    #[test]
    fn test_document_imports_enum_stub_from_sibling_file() {
        let loader = loader_with_enums();
        let doc = loader
            .load_str(
                "projects",
                "- projects:\n    - difficulty:\n        - public.Projectdifficulty\n",
            )
            .unwrap();
        let text = render_document(&doc, loader.registry());
        assert!(text.starts_with(HEADER));
        assert!(text.contains("use serde_json::{json, Value};"));
        assert!(text.contains("use super::Projectdifficulty;"));
    }

    #[test]
    fn test_enum_only_document_has_no_imports() {
        let loader = loader_with_enums();
        let doc = loader
            .load_str("enums2", "- Status:\n    - ON\n    - OFF\n")
            .unwrap();
        let text = render_document(&doc, loader.registry());
        assert!(!text.contains("use serde_json"));
        assert!(text.contains("pub enum Status {"));
    }
}
