use dalgen_core::{Attribute, Entity, GENERATOR_COMMENT, LogicalType, Target};

use crate::artifact::{Artifact, file_stem};
use crate::errors::GenerationError;
use crate::template::DialectTemplate;

/// Transact-SQL backend: bracket-quoted DDL plus CRUD stored procedures.
pub struct TsqlTemplate;

impl DialectTemplate for TsqlTemplate {
    fn target(&self) -> Target {
        Target::Tsql
    }

    fn generate_content(&self, entity: &Entity) -> Result<Vec<Artifact>, GenerationError> {
        let stem = file_stem(&entity.name);
        let mut artifacts = vec![Artifact::new(
            format!("{stem}_create_table.sql"),
            create_table(entity)?,
        )];

        if entity.has_primary_key() {
            artifacts.push(Artifact::new(
                format!("{stem}_insert.sql"),
                insert_procedure(entity)?,
            ));
            artifacts.push(Artifact::new(
                format!("{stem}_select.sql"),
                select_procedure(entity)?,
            ));
            artifacts.push(Artifact::new(
                format!("{stem}_update.sql"),
                update_procedure(entity)?,
            ));
            artifacts.push(Artifact::new(
                format!("{stem}_delete.sql"),
                delete_procedure(entity)?,
            ));
        }

        Ok(artifacts)
    }
}

/// Native type for an attribute's logical type. Total by construction.
fn sql_type(attribute: &Attribute) -> Result<String, GenerationError> {
    let mapped = match attribute.data_type {
        LogicalType::Integer => "INT".to_string(),
        LogicalType::BigInt => "BIGINT".to_string(),
        LogicalType::Text => format!("NVARCHAR({})", attribute.require_size()?),
        LogicalType::Decimal => format!("DECIMAL({}, 2)", attribute.require_size()?),
        LogicalType::Date => "DATE".to_string(),
        LogicalType::DateTime => "DATETIME2".to_string(),
        LogicalType::Boolean => "BIT".to_string(),
    };
    Ok(mapped)
}

fn schema_of(entity: &Entity) -> &str {
    let schema = entity.schema_name.trim();
    if schema.is_empty() { "dbo" } else { schema }
}

fn table_ref(entity: &Entity) -> String {
    format!("[{}].[{}]", schema_of(entity), entity.name.trim())
}

fn procedure_ref(entity: &Entity, operation: &str) -> String {
    format!(
        "[{}].[usp_{}_{}]",
        schema_of(entity),
        entity.name.trim(),
        operation
    )
}

fn column_list(attributes: &[&Attribute]) -> String {
    attributes
        .iter()
        .map(|attr| format!("[{}]", attr.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_table(entity: &Entity) -> Result<String, GenerationError> {
    let mut lines = Vec::new();
    for attribute in &entity.attributes {
        let identity = if attribute.is_primary_key && attribute.auto_increment {
            " IDENTITY(1,1)"
        } else {
            ""
        };
        let nullability = if attribute.is_primary_key {
            "NOT NULL"
        } else {
            "NULL"
        };
        lines.push(format!(
            "    [{}] {}{} {}",
            attribute.name,
            sql_type(attribute)?,
            identity,
            nullability
        ));
    }

    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    if !keys.is_empty() {
        lines.push(format!(
            "    CONSTRAINT [PK_{}] PRIMARY KEY ({})",
            entity.name.trim(),
            column_list(&keys)
        ));
    }

    for attribute in &entity.attributes {
        if attribute.is_foreign_key {
            let reference = attribute.require_reference()?;
            lines.push(format!(
                "    CONSTRAINT [FK_{}_{}] FOREIGN KEY ([{}]) REFERENCES [{}] ([{}])",
                entity.name.trim(),
                attribute.name,
                attribute.name,
                reference.entity,
                reference.attribute
            ));
        }
    }

    Ok(format!(
        "-- {}\nCREATE TABLE {}\n(\n{}\n);\nGO\n",
        GENERATOR_COMMENT,
        table_ref(entity),
        lines.join(",\n")
    ))
}

fn parameter_lines(attributes: &[&Attribute]) -> Result<String, GenerationError> {
    let mut parameters = Vec::new();
    for attribute in attributes {
        parameters.push(format!("    @{} {}", attribute.name, sql_type(attribute)?));
    }
    Ok(parameters.join(",\n"))
}

fn procedure(entity: &Entity, operation: &str, parameters: &str, body: &str) -> String {
    let mut text = format!(
        "-- {}\nCREATE PROCEDURE {}\n",
        GENERATOR_COMMENT,
        procedure_ref(entity, operation)
    );
    if !parameters.is_empty() {
        text.push_str(parameters);
        text.push('\n');
    }
    text.push_str("AS\nBEGIN\n    SET NOCOUNT ON;\n\n");
    text.push_str(body);
    text.push_str("\nEND\nGO\n");
    text
}

/// Insert parameters exclude auto-increment key columns; the dialect's
/// identity mechanism supplies those values.
fn insert_attributes(entity: &Entity) -> Vec<&Attribute> {
    entity
        .attributes
        .iter()
        .filter(|attr| !(attr.is_primary_key && attr.auto_increment))
        .collect()
}

fn insert_procedure(entity: &Entity) -> Result<String, GenerationError> {
    let attributes = insert_attributes(entity);
    let body = if attributes.is_empty() {
        format!("    INSERT INTO {}\n    DEFAULT VALUES;", table_ref(entity))
    } else {
        let values = attributes
            .iter()
            .map(|attr| format!("@{}", attr.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "    INSERT INTO {} ({})\n    VALUES ({});",
            table_ref(entity),
            column_list(&attributes),
            values
        )
    };

    Ok(procedure(
        entity,
        "Insert",
        &parameter_lines(&attributes)?,
        &body,
    ))
}

fn key_filter(keys: &[&Attribute]) -> String {
    keys.iter()
        .map(|attr| format!("[{}] = @{}", attr.name, attr.name))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn select_procedure(entity: &Entity) -> Result<String, GenerationError> {
    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    let all: Vec<&Attribute> = entity.attributes.iter().collect();
    let body = format!(
        "    SELECT {}\n    FROM {}\n    WHERE {};",
        column_list(&all),
        table_ref(entity),
        key_filter(&keys)
    );

    Ok(procedure(entity, "Select", &parameter_lines(&keys)?, &body))
}

fn update_procedure(entity: &Entity) -> Result<String, GenerationError> {
    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    let non_keys: Vec<&Attribute> = entity
        .attributes
        .iter()
        .filter(|attr| !attr.is_primary_key)
        .collect();

    // With nothing but key columns there is nothing to update; re-assign
    // the first key so the statement stays well-formed.
    let assignments = if non_keys.is_empty() {
        keys.iter()
            .take(1)
            .map(|attr| format!("[{}] = @{}", attr.name, attr.name))
            .collect::<Vec<_>>()
    } else {
        non_keys
            .iter()
            .map(|attr| format!("[{}] = @{}", attr.name, attr.name))
            .collect::<Vec<_>>()
    };

    let mut parameters: Vec<&Attribute> = non_keys.clone();
    parameters.extend(keys.iter().copied());

    let body = format!(
        "    UPDATE {}\n    SET {}\n    WHERE {};",
        table_ref(entity),
        assignments.join(", "),
        key_filter(&keys)
    );

    Ok(procedure(
        entity,
        "Update",
        &parameter_lines(&parameters)?,
        &body,
    ))
}

fn delete_procedure(entity: &Entity) -> Result<String, GenerationError> {
    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    let body = format!(
        "    DELETE FROM {}\n    WHERE {};",
        table_ref(entity),
        key_filter(&keys)
    );

    Ok(procedure(entity, "Delete", &parameter_lines(&keys)?, &body))
}
