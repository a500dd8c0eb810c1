use dalgen_core::{Attribute, Entity, GENERATOR_COMMENT, LogicalType, Target};

use crate::artifact::{Artifact, file_stem};
use crate::errors::GenerationError;
use crate::template::DialectTemplate;

/// MySQL backend: backtick-quoted DDL plus CRUD stored procedures wrapped
/// in DELIMITER blocks.
pub struct MySqlTemplate;

impl DialectTemplate for MySqlTemplate {
    fn target(&self) -> Target {
        Target::MySql
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
        LogicalType::Text => format!("VARCHAR({})", attribute.require_size()?),
        LogicalType::Decimal => format!("DECIMAL({}, 2)", attribute.require_size()?),
        LogicalType::Date => "DATE".to_string(),
        LogicalType::DateTime => "DATETIME".to_string(),
        LogicalType::Boolean => "TINYINT(1)".to_string(),
    };
    Ok(mapped)
}

fn table_ref(entity: &Entity) -> String {
    let database = entity.database_name.trim();
    if database.is_empty() {
        format!("`{}`", entity.name.trim())
    } else {
        format!("`{}`.`{}`", database, entity.name.trim())
    }
}

fn procedure_name(entity: &Entity, operation: &str) -> String {
    format!("`usp_{}_{}`", entity.name.trim(), operation)
}

fn column_list(attributes: &[&Attribute]) -> String {
    attributes
        .iter()
        .map(|attr| format!("`{}`", attr.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_table(entity: &Entity) -> Result<String, GenerationError> {
    let mut lines = Vec::new();
    for attribute in &entity.attributes {
        let auto_increment = if attribute.is_primary_key && attribute.auto_increment {
            " AUTO_INCREMENT"
        } else {
            ""
        };
        let nullability = if attribute.is_primary_key {
            "NOT NULL"
        } else {
            "NULL"
        };
        lines.push(format!(
            "    `{}` {} {}{}",
            attribute.name,
            sql_type(attribute)?,
            nullability,
            auto_increment
        ));
    }

    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    if !keys.is_empty() {
        lines.push(format!("    PRIMARY KEY ({})", column_list(&keys)));
    }

    for attribute in &entity.attributes {
        if attribute.is_foreign_key {
            let reference = attribute.require_reference()?;
            lines.push(format!(
                "    CONSTRAINT `FK_{}_{}` FOREIGN KEY (`{}`) REFERENCES `{}` (`{}`)",
                entity.name.trim(),
                attribute.name,
                attribute.name,
                reference.entity,
                reference.attribute
            ));
        }
    }

    Ok(format!(
        "-- {}\nCREATE TABLE {}\n(\n{}\n);\n",
        GENERATOR_COMMENT,
        table_ref(entity),
        lines.join(",\n")
    ))
}

fn parameter_lines(attributes: &[&Attribute]) -> Result<String, GenerationError> {
    let mut parameters = Vec::new();
    for attribute in attributes {
        parameters.push(format!("    IN p_{} {}", attribute.name, sql_type(attribute)?));
    }
    Ok(parameters.join(",\n"))
}

fn procedure(entity: &Entity, operation: &str, parameters: &str, body: &str) -> String {
    let signature = if parameters.is_empty() {
        "()".to_string()
    } else {
        format!("(\n{parameters}\n)")
    };
    format!(
        "-- {}\nDELIMITER $$\n\nCREATE PROCEDURE {}{}\nBEGIN\n{}\nEND$$\n\nDELIMITER ;\n",
        GENERATOR_COMMENT,
        procedure_name(entity, operation),
        signature,
        body
    )
}

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
        format!("    INSERT INTO {} () VALUES ();", table_ref(entity))
    } else {
        let values = attributes
            .iter()
            .map(|attr| format!("p_{}", attr.name))
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
        .map(|attr| format!("`{}` = p_{}", attr.name, attr.name))
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

    let assignments = if non_keys.is_empty() {
        keys.iter()
            .take(1)
            .map(|attr| format!("`{}` = p_{}", attr.name, attr.name))
            .collect::<Vec<_>>()
    } else {
        non_keys
            .iter()
            .map(|attr| format!("`{}` = p_{}", attr.name, attr.name))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str, data_type: LogicalType, size: Option<i32>) -> Attribute {
        Attribute {
            name: name.to_string(),
            data_type,
            size,
            is_primary_key: false,
            auto_increment: false,
            is_foreign_key: false,
            reference: None,
        }
    }

    #[test]
    fn type_mapping_is_total() {
        let cases = [
            (LogicalType::Integer, None, "INT"),
            (LogicalType::BigInt, None, "BIGINT"),
            (LogicalType::Text, Some(120), "VARCHAR(120)"),
            (LogicalType::Decimal, Some(10), "DECIMAL(10, 2)"),
            (LogicalType::Date, None, "DATE"),
            (LogicalType::DateTime, None, "DATETIME"),
            (LogicalType::Boolean, None, "TINYINT(1)"),
        ];
        for (data_type, size, expected) in cases {
            let attribute = attr("A", data_type, size);
            assert_eq!(sql_type(&attribute).expect("mapped"), expected);
        }
    }

    #[test]
    fn table_ref_qualifies_with_database_when_present() {
        let mut entity = Entity::with_default_attribute("Customer");
        assert_eq!(table_ref(&entity), "`Customer`");
        entity.database_name = "Shop".to_string();
        assert_eq!(table_ref(&entity), "`Shop`.`Customer`");
    }
}
