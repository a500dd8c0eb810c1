use dalgen_core::{Attribute, Entity, GENERATOR_COMMENT, LogicalType, Target};

use crate::artifact::{Artifact, file_stem};
use crate::errors::GenerationError;
use crate::template::DialectTemplate;

/// PHP backend: a typed entity class plus, for keyed entities, a PDO
/// data-access class carrying the CRUD methods.
pub struct PhpTemplate;

impl DialectTemplate for PhpTemplate {
    fn target(&self) -> Target {
        Target::Php
    }

    fn generate_content(&self, entity: &Entity) -> Result<Vec<Artifact>, GenerationError> {
        let stem = file_stem(&entity.name);
        let mut artifacts = vec![Artifact::new(
            format!("{stem}.class.php"),
            entity_class(entity),
        )];

        if entity.has_primary_key() {
            artifacts.push(Artifact::new(format!("{stem}.dal.php"), dal_class(entity)?));
        }

        Ok(artifacts)
    }
}

/// Native type hint for an attribute's logical type. Total by construction.
fn php_type(data_type: LogicalType) -> &'static str {
    match data_type {
        LogicalType::Integer | LogicalType::BigInt => "int",
        LogicalType::Text => "string",
        LogicalType::Decimal => "float",
        LogicalType::Date | LogicalType::DateTime => "string",
        LogicalType::Boolean => "bool",
    }
}

/// Attribute name with a lowercase first letter, PHP property style.
fn property_name(attribute: &Attribute) -> String {
    let mut chars = attribute.name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn class_name(entity: &Entity) -> &str {
    entity.name.trim()
}

fn header(entity: &Entity) -> String {
    let mut text = format!("<?php\n// {GENERATOR_COMMENT}\n");
    let namespace = entity.namespace.trim();
    if !namespace.is_empty() {
        text.push_str(&format!("\nnamespace {namespace};\n"));
    }
    text
}

fn entity_class(entity: &Entity) -> String {
    let mut properties = Vec::new();
    for attribute in &entity.attributes {
        properties.push(format!(
            "    public ?{} ${} = null;",
            php_type(attribute.data_type),
            property_name(attribute)
        ));
    }

    format!(
        "{}\nclass {}\n{{\n{}\n}}\n",
        header(entity),
        class_name(entity),
        properties.join("\n")
    )
}

fn insert_attributes(entity: &Entity) -> Vec<&Attribute> {
    entity
        .attributes
        .iter()
        .filter(|attr| !(attr.is_primary_key && attr.auto_increment))
        .collect()
}

fn key_clause(keys: &[&Attribute]) -> String {
    keys.iter()
        .map(|attr| format!("{} = :{}", attr.name, property_name(attr)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn bind_lines(attributes: &[&Attribute], source: &str) -> String {
    attributes
        .iter()
        .map(|attr| {
            let property = property_name(attr);
            format!("        $statement->bindValue(':{property}', {source}{property});")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn key_parameters(keys: &[&Attribute]) -> String {
    keys.iter()
        .map(|attr| format!("{} ${}", php_type(attr.data_type), property_name(attr)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn key_binds(keys: &[&Attribute]) -> String {
    keys.iter()
        .map(|attr| {
            let property = property_name(attr);
            format!("        $statement->bindValue(':{property}', ${property});")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn insert_method(entity: &Entity) -> String {
    let class = class_name(entity);
    let attributes = insert_attributes(entity);
    let columns = attributes
        .iter()
        .map(|attr| attr.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = attributes
        .iter()
        .map(|attr| format!(":{}", property_name(attr)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "    public function insert({class} $entity): bool\n    {{\n        \
$statement = $this->connection->prepare('INSERT INTO {table} ({columns}) VALUES ({placeholders})');\n\
{binds}\n        return $statement->execute();\n    }}",
        class = class,
        table = class,
        columns = columns,
        placeholders = placeholders,
        binds = bind_lines(&attributes, "$entity->")
    )
}

fn load_method(entity: &Entity, keys: &[&Attribute]) -> String {
    let class = class_name(entity);
    let columns = entity
        .attributes
        .iter()
        .map(|attr| attr.name.clone())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "    public function load({parameters}): ?{class}\n    {{\n        \
$statement = $this->connection->prepare('SELECT {columns} FROM {table} WHERE {filter}');\n\
{binds}\n        $statement->execute();\n        \
$entity = $statement->fetchObject({class}::class);\n        \
return $entity === false ? null : $entity;\n    }}",
        parameters = key_parameters(keys),
        class = class,
        columns = columns,
        table = class,
        filter = key_clause(keys),
        binds = key_binds(keys)
    )
}

fn update_method(entity: &Entity, keys: &[&Attribute]) -> String {
    let class = class_name(entity);
    let non_keys: Vec<&Attribute> = entity
        .attributes
        .iter()
        .filter(|attr| !attr.is_primary_key)
        .collect();

    let assignments = if non_keys.is_empty() {
        keys.iter()
            .take(1)
            .map(|attr| format!("{} = :{}", attr.name, property_name(attr)))
            .collect::<Vec<_>>()
    } else {
        non_keys
            .iter()
            .map(|attr| format!("{} = :{}", attr.name, property_name(attr)))
            .collect::<Vec<_>>()
    };

    let mut bound: Vec<&Attribute> = non_keys.clone();
    bound.extend(keys.iter().copied());

    format!(
        "    public function update({class} $entity): bool\n    {{\n        \
$statement = $this->connection->prepare('UPDATE {table} SET {assignments} WHERE {filter}');\n\
{binds}\n        return $statement->execute();\n    }}",
        class = class,
        table = class,
        assignments = assignments.join(", "),
        filter = key_clause(keys),
        binds = bind_lines(&bound, "$entity->")
    )
}

fn delete_method(entity: &Entity, keys: &[&Attribute]) -> String {
    format!(
        "    public function delete({parameters}): bool\n    {{\n        \
$statement = $this->connection->prepare('DELETE FROM {table} WHERE {filter}');\n\
{binds}\n        return $statement->execute();\n    }}",
        parameters = key_parameters(keys),
        table = class_name(entity),
        filter = key_clause(keys),
        binds = key_binds(keys)
    )
}

fn dal_class(entity: &Entity) -> Result<String, GenerationError> {
    let keys: Vec<&Attribute> = entity.primary_keys().collect();
    let class = class_name(entity);

    let methods = [
        insert_method(entity),
        load_method(entity, &keys),
        update_method(entity, &keys),
        delete_method(entity, &keys),
    ]
    .join("\n\n");

    Ok(format!(
        "{}\nuse PDO;\n\nclass {class}Dal\n{{\n    private PDO $connection;\n\n    \
public function __construct(PDO $connection)\n    {{\n        \
$this->connection = $connection;\n    }}\n\n{methods}\n}}\n",
        header(entity)
    ))
}
