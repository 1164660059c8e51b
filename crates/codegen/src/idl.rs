//! proto3 rendering of the wire schema. Only columns marked `share` cross
//! the wire; everything else stays storage-side.

use schema::{typemap, Builtin, EnumDef, SchemaDocument, SchemaEntry, TableDef, TypeRegistry, TypeTag};
use std::fmt::Write;

pub const HEADER: &str = "// Code generated by schemaforge. DO NOT EDIT.\n";

pub fn render_enum(def: &EnumDef) -> String {
    let mut out = format!("enum {} {{\n", typemap::capitalize(&def.name));
    for (ordinal, member) in def.members.iter().enumerate() {
        let _ = writeln!(out, "  {member} = {ordinal};");
    }
    out.push_str("}\n");
    out
}

pub fn render_message(def: &TableDef) -> String {
    let mut out = format!("message {} {{\n", typemap::capitalize(&def.name));
    let mut number = 0;
    for col in def.shared_columns() {
        number += 1;
        let repeated = if col.modifiers.array { "repeated " } else { "" };
        let _ = writeln!(
            out,
            "  {repeated}{} {} = {number};",
            typemap::to_idl(&col.type_tag),
            col.name
        );
    }
    out.push_str("}\n");
    out
}

/// Render the full proto file for one document: syntax line, the imports
/// the emitted fields actually need, then enums and messages in document
/// order.
pub fn render_document(doc: &SchemaDocument, registry: &TypeRegistry) -> String {
    let mut out = format!("{HEADER}\nsyntax = \"proto3\";\n");

    let mut needs_timestamp = false;
    let mut enum_sources: Vec<String> = Vec::new();
    for table in doc.tables() {
        for col in table.shared_columns() {
            match &col.type_tag {
                TypeTag::Builtin(Builtin::Timestamp) => needs_timestamp = true,
                TypeTag::Enum(name) => {
                    if let Some(source) = registry.document_of(name) {
                        if source != doc.name && !enum_sources.contains(&source) {
                            enum_sources.push(source);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if needs_timestamp || !enum_sources.is_empty() {
        out.push('\n');
        if needs_timestamp {
            out.push_str("import \"google/protobuf/timestamp.proto\";\n");
        }
        for source in &enum_sources {
            let _ = writeln!(out, "import \"{source}.proto\";");
        }
    }

    for entry in &doc.entries {
        out.push('\n');
        match entry {
            SchemaEntry::Enum(def) => out.push_str(&render_enum(def)),
            SchemaEntry::Table(def) => out.push_str(&render_message(def)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::SchemaLoader;

    fn registry_with_status() -> SchemaLoader {
        let loader = SchemaLoader::new(TypeRegistry::new());
        loader
            .load_str("enums", "- Status:\n    - DRAFT\n    - PUBLISHED\n    - ARCHIVED\n")
            .unwrap();
        loader
    }

    #[test]
    fn test_enum_members_are_zero_indexed() {
        let def = EnumDef {
            name: "Status".to_string(),
            members: vec!["DRAFT".into(), "PUBLISHED".into(), "ARCHIVED".into()],
        };
        let idl = render_enum(&def);
        assert_eq!(
            idl,
            "enum Status {\n  DRAFT = 0;\n  PUBLISHED = 1;\n  ARCHIVED = 2;\n}\n"
        );
    }

    #[test]
    fn test_only_shared_columns_are_projected() {
        let loader = SchemaLoader::new(TypeRegistry::new());
        let doc = loader
            .load_str(
                "widgets",
                r#"
- widgets:
    - id:
        - int64
    - name:
        - string
        - share: true
    - secret:
        - string
    - tags:
        - string
        - array: true
        - share: true
"#,
            )
            .unwrap();
        let msg = render_message(doc.tables().next().unwrap());
        assert_eq!(
            msg,
            "message Widgets {\n  string name = 1;\n  repeated string tags = 2;\n}\n"
        );
    }

    #[test]
    fn test_field_numbers_are_contiguous_despite_skipped_columns() {
        let loader = registry_with_status();
        let doc = loader
            .load_str(
                "posts",
                r#"
- posts:
    - id:
        - int64
        - share: true
    - internal:
        - string
    - state:
        - public.Status
        - share: true
    - published_at:
        - timestamp
        - share: true
"#,
            )
            .unwrap();
        let msg = render_message(doc.tables().next().unwrap());
        assert!(msg.contains("int64 id = 1;"));
        assert!(msg.contains("Status state = 2;"));
        assert!(msg.contains("google.protobuf.Timestamp published_at = 3;"));
        assert!(!msg.contains("internal"));
    }

    #[test]
    fn test_document_imports_timestamp_and_enum_sources() {
        let loader = registry_with_status();
        let doc = loader
            .load_str(
                "posts",
                "- posts:\n    - state:\n        - public.Status\n        - share: true\n    - at:\n        - timestamp\n        - share: true\n",
            )
            .unwrap();
        let idl = render_document(&doc, loader.registry());
        assert!(idl.contains("syntax = \"proto3\";"));
        assert!(idl.contains("import \"google/protobuf/timestamp.proto\";"));
        assert!(idl.contains("import \"enums.proto\";"));
    }

    #[test]
    fn test_document_without_shared_special_types_has_no_imports() {
        let loader = SchemaLoader::new(TypeRegistry::new());
        let doc = loader
            .load_str(
                "widgets",
                "- widgets:\n    - name:\n        - string\n        - share: true\n    - at:\n        - timestamp\n",
            )
            .unwrap();
        let idl = render_document(&doc, loader.registry());
        assert!(!idl.contains("import"));
    }

    #[test]
    fn test_enum_defined_in_same_document_is_not_imported() {
        let loader = SchemaLoader::new(TypeRegistry::new());
        let doc = loader
            .load_str(
                "all",
                "- Status:\n    - ON\n    - OFF\n- switches:\n    - state:\n        - public.Status\n        - share: true\n",
            )
            .unwrap();
        let idl = render_document(&doc, loader.registry());
        assert!(!idl.contains("import \"all.proto\""));
        assert!(idl.contains("enum Status"));
        assert!(idl.contains("message Switches"));
    }
}
