//! Static conversion tables from resolved column types to each backend's
//! type names. Pure lookups, one arm per tag, no state.

use crate::model::{Builtin, Geometry, TypeTag};

/// PostgreSQL column type for a tag. Enum references resolve to their own
/// SQL type name in the `public` schema.
pub fn to_sql(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Builtin(Builtin::Int32) => "int".to_string(),
        TypeTag::Builtin(Builtin::Int64) => "bigint".to_string(),
        TypeTag::Builtin(Builtin::Bool) => "bool".to_string(),
        TypeTag::Builtin(Builtin::String) => "character varying".to_string(),
        TypeTag::Builtin(Builtin::Bytes) => "bytea".to_string(),
        TypeTag::Builtin(Builtin::Timestamp) => "timestamp without time zone".to_string(),
        TypeTag::Builtin(Builtin::Json) => "jsonb".to_string(),
        TypeTag::Geometry(Geometry::Polygon) => "geometry(Polygon,4326)".to_string(),
        TypeTag::Geometry(Geometry::Point) => "geometry(Point,4326)".to_string(),
        TypeTag::Enum(name) => format!("public.{}", name.to_lowercase()),
        TypeTag::Raw(fragment) => fragment.clone(),
    }
}

/// proto3 field type for a tag. Geometry travels as WKB bytes; timestamps
/// use the well-known type; everything else keeps its own name.
pub fn to_idl(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Builtin(Builtin::Int32) => "int32".to_string(),
        TypeTag::Builtin(Builtin::Int64) => "int64".to_string(),
        TypeTag::Builtin(Builtin::Bool) => "bool".to_string(),
        TypeTag::Builtin(Builtin::String) => "string".to_string(),
        TypeTag::Builtin(Builtin::Bytes) => "bytes".to_string(),
        TypeTag::Builtin(Builtin::Timestamp) => "google.protobuf.Timestamp".to_string(),
        TypeTag::Builtin(Builtin::Json) => "json".to_string(),
        TypeTag::Geometry(_) => "bytes".to_string(),
        TypeTag::Enum(name) => capitalize(name),
        TypeTag::Raw(_) => "bytes".to_string(),
    }
}

/// Runtime datatype label, surfaced by `TableDef::describe` and used by the
/// class emitter to pick stub field shapes.
pub fn to_runtime(tag: &TypeTag) -> String {
    match tag {
        TypeTag::Builtin(Builtin::Int32) | TypeTag::Builtin(Builtin::Int64) => {
            "integer".to_string()
        }
        TypeTag::Builtin(Builtin::Bool) => "boolean".to_string(),
        TypeTag::Builtin(Builtin::String) => "text".to_string(),
        TypeTag::Builtin(Builtin::Bytes) => "byte sequence".to_string(),
        TypeTag::Builtin(Builtin::Timestamp) => "timestamp without time zone".to_string(),
        TypeTag::Builtin(Builtin::Json) => "generic mapping".to_string(),
        TypeTag::Geometry(Geometry::Polygon) => "polygon value".to_string(),
        TypeTag::Geometry(Geometry::Point) => "point value".to_string(),
        TypeTag::Enum(name) => capitalize(name),
        TypeTag::Raw(fragment) => fragment.clone(),
    }
}

/// First character upper-cased, the rest lowered, matching how generated
/// type names are written in the proto and class artifacts.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every builtin tag, checked against all three tables at once.
    fn builtins() -> Vec<(TypeTag, &'static str, &'static str, &'static str)> {
        vec![
            (
                TypeTag::Builtin(Builtin::Int32),
                "int",
                "int32",
                "integer",
            ),
            (
                TypeTag::Builtin(Builtin::Int64),
                "bigint",
                "int64",
                "integer",
            ),
            (TypeTag::Builtin(Builtin::Bool), "bool", "bool", "boolean"),
            (
                TypeTag::Builtin(Builtin::String),
                "character varying",
                "string",
                "text",
            ),
            (
                TypeTag::Builtin(Builtin::Bytes),
                "bytea",
                "bytes",
                "byte sequence",
            ),
            (
                TypeTag::Builtin(Builtin::Timestamp),
                "timestamp without time zone",
                "google.protobuf.Timestamp",
                "timestamp without time zone",
            ),
            (
                TypeTag::Builtin(Builtin::Json),
                "jsonb",
                "json",
                "generic mapping",
            ),
            (
                TypeTag::Geometry(Geometry::Polygon),
                "geometry(Polygon,4326)",
                "bytes",
                "polygon value",
            ),
            (
                TypeTag::Geometry(Geometry::Point),
                "geometry(Point,4326)",
                "bytes",
                "point value",
            ),
        ]
    }

    #[test]
    fn test_every_builtin_maps_to_the_exact_backend_strings() {
        let table = builtins();
        assert_eq!(table.len(), 9);
        for (tag, sql, idl, runtime) in table {
            assert_eq!(to_sql(&tag), sql, "sql mapping for {tag:?}");
            assert_eq!(to_idl(&tag), idl, "idl mapping for {tag:?}");
            assert_eq!(to_runtime(&tag), runtime, "runtime mapping for {tag:?}");
        }
    }

    #[test]
    fn test_enum_reference_mappings() {
        let tag = TypeTag::Enum("Projectdifficulty".to_string());
        assert_eq!(to_sql(&tag), "public.projectdifficulty");
        assert_eq!(to_idl(&tag), "Projectdifficulty");
        assert_eq!(to_runtime(&tag), "Projectdifficulty");
    }

    #[test]
    fn test_raw_fragment_passes_through_to_sql() {
        let tag = TypeTag::Raw("geometry(LineString,4326)".to_string());
        assert_eq!(to_sql(&tag), "geometry(LineString,4326)");
        assert_eq!(to_idl(&tag), "bytes");
    }

    #[test]
    fn test_capitalize_lowers_the_tail() {
        assert_eq!(capitalize("status"), "Status");
        assert_eq!(capitalize("STATUS"), "Status");
        assert_eq!(capitalize("Projectdifficulty"), "Projectdifficulty");
        assert_eq!(capitalize(""), "");
    }
}
