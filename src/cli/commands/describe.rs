//! describe command - List schemas or show the fields of one

use anyhow::{anyhow, Result};

use crate::core::schema::{FieldDescriptor, Presence, RecordSchema};
use crate::models::registry::{is_top_level, lookup, lookup_nested, ALL_SCHEMAS, NESTED_SCHEMAS};

/// Print the schema table, or the field table of `schema`.
pub fn describe(schema: Option<&str>) -> Result<()> {
    let Some(id) = schema else {
        for schema in ALL_SCHEMAS {
            let marker = if is_top_level(schema) { " *" } else { "" };
            println!("{}", schema_row(schema, marker));
        }
        for schema in NESTED_SCHEMAS {
            println!("{}", schema_row(schema, " +"));
        }
        println!();
        println!("* written to its own file");
        println!("+ only nested inside a union field");
        return Ok(());
    };

    let schema = lookup(id).or_else(|| lookup_nested(id)).ok_or_else(|| {
        anyhow!(
            "Unknown schema '{}'. Run 'nmeta describe' to list schemas.",
            id
        )
    })?;

    println!("{} v{} - {}", schema.id, schema.version, schema.title);
    println!("{}", schema.description);
    println!();
    for field in schema.fields {
        println!("{}", field_row(field));
    }

    Ok(())
}

fn schema_row(schema: &RecordSchema, marker: &str) -> String {
    format!(
        "{:<28} {:<8} {}{}",
        schema.id,
        schema.version.to_string(),
        schema.title,
        marker
    )
}

fn field_row(field: &FieldDescriptor) -> String {
    let presence = match field.presence {
        Presence::Required => "required".to_string(),
        Presence::Optional => "optional".to_string(),
        Presence::Default(default) => format!("default {}", default),
    };
    let row = format!(
        "  {:<30} {:<40} {}",
        field.name,
        field.kind.describe(),
        presence
    );
    match field.description {
        Some(description) => format!("{}\n      {}", row, description),
        None => row,
    }
}
