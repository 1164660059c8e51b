//! DDL rendering. Enum types and tables are dropped and recreated so the
//! output is safe to feed to psql repeatedly.

use crate::ir::{lower_table, ConstraintIR, TableIR};
use schema::{EnumDef, SchemaDocument, SchemaEntry, TableDef};
use std::fmt::Write;

pub const HEADER: &str = "-- Code generated by schemaforge. DO NOT EDIT.\n";

pub fn enum_type_name(def: &EnumDef) -> String {
    format!("public.{}", def.name.to_lowercase())
}

pub fn render_enum(def: &EnumDef) -> String {
    let ty = enum_type_name(def);
    let members = def
        .members
        .iter()
        .map(|m| format!("'{m}'"))
        .collect::<Vec<_>>()
        .join(",");
    format!("DROP TYPE IF EXISTS {ty} CASCADE;\nCREATE TYPE {ty} AS ENUM ({members});\n")
}

pub fn render_table(def: &TableDef) -> String {
    render_table_ir(&lower_table(def))
}

pub fn render_table_ir(ir: &TableIR) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "DROP TABLE IF EXISTS {} CASCADE;", ir.name);
    let _ = writeln!(out, "CREATE TABLE {} (", ir.name);

    let mut body: Vec<String> = ir
        .columns
        .iter()
        .map(|c| format!("    {} {}", c.name, c.render_type()))
        .collect();
    for constraint in &ir.constraints {
        if let ConstraintIR::Unique(cols) = constraint {
            body.push(format!("    UNIQUE({})", cols.join(", ")));
        }
    }
    out.push_str(&body.join(",\n"));
    out.push_str("\n);\n");

    for constraint in &ir.constraints {
        if let ConstraintIR::PrimaryKey(cols) = constraint {
            let _ = writeln!(
                out,
                "ALTER TABLE ONLY {t} ADD CONSTRAINT {t}_pkey PRIMARY KEY ({});",
                cols.join(", "),
                t = ir.name
            );
        }
    }
    for seq in &ir.sequences {
        let _ = writeln!(
            out,
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1 NO MINVALUE NO MAXVALUE CACHE 1;",
            seq.name
        );
    }
    out
}

pub fn render_document(doc: &SchemaDocument) -> String {
    let mut blocks = Vec::with_capacity(doc.entries.len());
    for entry in &doc.entries {
        match entry {
            SchemaEntry::Enum(def) => blocks.push(render_enum(def)),
            SchemaEntry::Table(def) => blocks.push(render_table(def)),
        }
    }
    format!("{HEADER}\n{}", blocks.join("\n"))
}
