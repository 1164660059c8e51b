//! Structured intermediate form between the schema model and the DDL
//! renderer. Lowering decides what gets emitted; rendering only formats.

use schema::{typemap, TableDef};

#[derive(Debug, Clone)]
pub struct TableIR {
    pub name: String,
    pub columns: Vec<ColumnIR>,
    pub constraints: Vec<ConstraintIR>,
    pub sequences: Vec<SequenceIR>,
}

#[derive(Debug, Clone)]
pub struct ColumnIR {
    pub name: String,
    pub sql_type: String,
    pub array: bool,
    pub required: bool,
}

impl ColumnIR {
    /// Base type plus array suffix plus null constraint, in that order,
    /// whatever order the modifiers were declared in.
    pub fn render_type(&self) -> String {
        let mut out = self.sql_type.clone();
        if self.array {
            out.push_str("[]");
        }
        if self.required {
            out.push_str(" NOT NULL");
        }
        out
    }
}

#[derive(Debug, Clone)]
pub enum ConstraintIR {
    Unique(Vec<String>),
    PrimaryKey(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct SequenceIR {
    pub name: String,
}

pub fn lower_table(def: &TableDef) -> TableIR {
    let columns = def
        .columns
        .iter()
        .map(|c| ColumnIR {
            name: c.name.clone(),
            sql_type: typemap::to_sql(&c.type_tag),
            array: c.modifiers.array,
            required: c.modifiers.required,
        })
        .collect();

    let unique: Vec<String> = def
        .columns
        .iter()
        .filter(|c| c.modifiers.unique)
        .map(|c| c.name.clone())
        .collect();
    let primary: Vec<String> = def
        .columns
        .iter()
        .filter(|c| c.modifiers.primary)
        .map(|c| c.name.clone())
        .collect();

    // Empty constraint sets never reach the renderer.
    let mut constraints = Vec::new();
    if !unique.is_empty() {
        constraints.push(ConstraintIR::Unique(unique));
    }
    if !primary.is_empty() {
        constraints.push(ConstraintIR::PrimaryKey(primary));
    }

    let sequences = def
        .columns
        .iter()
        .filter(|c| c.modifiers.sequence)
        .map(|c| SequenceIR {
            name: format!("{}_{}_seq", def.name, c.name),
        })
        .collect();

    TableIR {
        name: def.name.clone(),
        columns,
        constraints,
        sequences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{Builtin, ColumnDef, Modifiers, TypeTag};

    fn column(name: &str, modifiers: Modifiers) -> ColumnDef {
        ColumnDef {
            name: name.to_string(),
            type_tag: TypeTag::Builtin(Builtin::String),
            modifiers,
        }
    }

    #[test]
    fn test_lowering_collects_constraints_and_sequences() {
        let table = TableDef {
            name: "widgets".to_string(),
            columns: vec![
                column(
                    "id",
                    Modifiers {
                        sequence: true,
                        primary: true,
                        ..Default::default()
                    },
                ),
                column(
                    "name",
                    Modifiers {
                        unique: true,
                        ..Default::default()
                    },
                ),
            ],
        };

        let ir = lower_table(&table);
        assert_eq!(ir.constraints.len(), 2);
        assert_eq!(ir.sequences.len(), 1);
        assert_eq!(ir.sequences[0].name, "widgets_id_seq");
    }

    #[test]
    fn test_lowering_omits_empty_constraints() {
        let table = TableDef {
            name: "plain".to_string(),
            columns: vec![column("value", Modifiers::default())],
        };
        let ir = lower_table(&table);
        assert!(ir.constraints.is_empty());
        assert!(ir.sequences.is_empty());
    }

    #[test]
    fn test_rendered_type_composes_suffixes_in_fixed_order() {
        let col = ColumnIR {
            name: "tags".to_string(),
            sql_type: "character varying".to_string(),
            array: true,
            required: true,
        };
        assert_eq!(col.render_type(), "character varying[] NOT NULL");
    }
}
