use dalgen_core::{Entity, Target};

use crate::artifact::Artifact;
use crate::errors::GenerationError;
use crate::mysql::MySqlTemplate;
use crate::php::PhpTemplate;
use crate::tsql::TsqlTemplate;

/// Pluggable backend producing artifacts for one target.
///
/// Implementations are stateless and perform no I/O. The same entity
/// snapshot must always yield byte-identical artifacts, and column/parameter
/// order must match the entity's attribute order everywhere.
pub trait DialectTemplate: Send + Sync {
    /// Target this template implements.
    fn target(&self) -> Target;

    /// Produce the artifact set for one entity.
    ///
    /// Entities with at least one primary-key attribute yield the structural
    /// artifact plus create/read/update/delete artifacts; keyless entities
    /// yield the structural artifact only.
    fn generate_content(&self, entity: &Entity) -> Result<Vec<Artifact>, GenerationError>;
}

/// Registry of implemented templates keyed by target.
///
/// Targets absent from the registry are legitimate: they are recognized
/// identifiers whose backend has not shipped yet, and the engine reports
/// them as skipped rather than failing.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn DialectTemplate>>,
}

impl TemplateRegistry {
    /// Registry holding every shipped template.
    pub fn new() -> Self {
        Self {
            templates: vec![
                Box::new(TsqlTemplate),
                Box::new(MySqlTemplate),
                Box::new(PhpTemplate),
            ],
        }
    }

    /// Empty registry, useful for embedders wiring their own templates.
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    pub fn register(&mut self, template: Box<dyn DialectTemplate>) {
        self.templates.push(template);
    }

    /// Template for a target, if one is registered.
    pub fn resolve(&self, target: Target) -> Option<&dyn DialectTemplate> {
        self.templates
            .iter()
            .find(|template| template.target() == target)
            .map(|template| template.as_ref())
    }

    /// Targets with a registered template, in registration order.
    pub fn registered_targets(&self) -> Vec<Target> {
        self.templates
            .iter()
            .map(|template| template.target())
            .collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_registry_covers_tsql_mysql_and_php() {
        let registry = TemplateRegistry::new();
        assert_eq!(
            registry.registered_targets(),
            vec![Target::Tsql, Target::MySql, Target::Php]
        );
        assert!(registry.resolve(Target::Tsql).is_some());
        assert!(registry.resolve(Target::Oracle).is_none());
        assert!(registry.resolve(Target::Java).is_none());
    }
}
