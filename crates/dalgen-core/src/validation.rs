use thiserror::Error;

use crate::entity::{Attribute, Entity};
use crate::target::Target;

/// First validation problem found in a generation request.
///
/// Rules are applied in a fixed order and the first failure wins, so a
/// request never carries more than one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    /// No dialect and no language was selected.
    #[error("you must select at least one output target")]
    NoOutput,
    #[error("you must provide an entity name")]
    InvalidEntityName,
    #[error("attribute {index} has no name")]
    InvalidAttributeName { index: usize },
    #[error("attribute '{name}' has an invalid size")]
    InvalidAttributeSize { index: usize, name: String },
    #[error("foreign key attribute '{name}' requires a reference entity")]
    InvalidAttributeRefEntity { index: usize, name: String },
    #[error("foreign key attribute '{name}' requires a reference attribute")]
    InvalidAttributeRefAttribute { index: usize, name: String },
}

/// Validate a generation request.
///
/// Checks, in order: a non-empty target set, a non-blank entity name, then
/// each attribute in declaration order. Attributes after the first offender
/// are never inspected. A missing primary key is deliberately not a failure
/// here; the engine surfaces it as an advisory instead.
pub fn validate(entity: &Entity, targets: &[Target]) -> Result<(), ValidationFailure> {
    if targets.is_empty() {
        return Err(ValidationFailure::NoOutput);
    }

    if entity.name.trim().is_empty() {
        return Err(ValidationFailure::InvalidEntityName);
    }

    for (index, attribute) in entity.attributes.iter().enumerate() {
        validate_attribute(index, attribute)?;
    }

    Ok(())
}

fn validate_attribute(index: usize, attribute: &Attribute) -> Result<(), ValidationFailure> {
    if attribute.name.trim().is_empty() {
        return Err(ValidationFailure::InvalidAttributeName { index });
    }

    if attribute.data_type.requires_size() && attribute.size.unwrap_or(0) <= 0 {
        return Err(ValidationFailure::InvalidAttributeSize {
            index,
            name: attribute.name.clone(),
        });
    }

    if attribute.is_foreign_key {
        // An absent pair and a blank pair read the same to the user.
        let (ref_entity, ref_attribute) = attribute
            .reference
            .as_ref()
            .map(|reference| (reference.entity.as_str(), reference.attribute.as_str()))
            .unwrap_or(("", ""));

        if ref_entity.trim().is_empty() {
            return Err(ValidationFailure::InvalidAttributeRefEntity {
                index,
                name: attribute.name.clone(),
            });
        }
        if ref_attribute.trim().is_empty() {
            return Err(ValidationFailure::InvalidAttributeRefAttribute {
                index,
                name: attribute.name.clone(),
            });
        }
    }

    Ok(())
}
