use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::LogicalType;

/// Reference pair carried by a foreign-key attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct AttributeReference {
    /// Entity (table) the foreign key points at.
    pub entity: String,
    /// Attribute on the referenced entity, expected to be its primary key.
    pub attribute: String,
}

/// One column/field of an entity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Attribute {
    pub name: String,
    pub data_type: LogicalType,
    /// Size or precision, required for sized types such as text/decimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(default)]
    pub is_primary_key: bool,
    /// Only meaningful on primary-key attributes; ignored elsewhere.
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<AttributeReference>,
}

impl Attribute {
    /// Blank integer attribute seeded into a fresh entity.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            data_type: LogicalType::Integer,
            size: None,
            is_primary_key: false,
            auto_increment: false,
            is_foreign_key: false,
            reference: None,
        }
    }

    /// Reference pair of a foreign-key attribute.
    ///
    /// A validated foreign-key attribute always carries its pair, so a
    /// `None` here indicates a caller that bypassed validation.
    pub fn require_reference(&self) -> Result<&AttributeReference> {
        self.reference
            .as_ref()
            .ok_or_else(|| Error::BrokenReference(self.name.clone()))
    }

    /// Declared size of a sized attribute.
    pub fn require_size(&self) -> Result<i32> {
        self.size.ok_or_else(|| Error::MissingSize(self.name.clone()))
    }
}

/// A named collection of attributes plus labeling identifiers.
///
/// Attribute order is preserved everywhere: it determines column order in
/// generated DDL and parameter order in generated procedures. An entity is
/// assembled once per generation request and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Entity {
    pub name: String,
    /// Database label, advisory only.
    #[serde(default)]
    pub database_name: String,
    /// Schema label, advisory only.
    #[serde(default)]
    pub schema_name: String,
    /// Namespace label for language targets, advisory only.
    #[serde(default)]
    pub namespace: String,
    pub attributes: Vec<Attribute>,
}

impl Entity {
    /// Fresh entity seeded with one blank attribute.
    pub fn with_default_attribute(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_name: String::new(),
            schema_name: String::new(),
            namespace: String::new(),
            attributes: vec![Attribute::blank()],
        }
    }

    /// Primary-key attributes in declaration order.
    pub fn primary_keys(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|attr| attr.is_primary_key)
    }

    pub fn has_primary_key(&self) -> bool {
        self.primary_keys().next().is_some()
    }
}
