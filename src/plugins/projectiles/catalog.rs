//! Launchable projectile kinds and their weighted selection.

use bevy::prelude::*;
use rand::Rng;

use super::components::{ProjectileKind, ProjectileTemplate};
use super::selector::{SelectError, WeightedSelector};

/// Validated launch catalog: templates in authoring order plus a selector over their
/// indices.
#[derive(Resource, Debug, Clone)]
pub struct ProjectileCatalog {
    templates: Vec<ProjectileTemplate>,
    selector: WeightedSelector<usize>,
}

impl ProjectileCatalog {
    pub fn new(templates: Vec<ProjectileTemplate>) -> Result<Self, SelectError> {
        let selector = WeightedSelector::new(
            templates
                .iter()
                .enumerate()
                .map(|(i, t)| (i, t.launch_weight))
                .collect(),
        )?;
        Ok(Self { templates, selector })
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &ProjectileTemplate {
        &self.templates[*self.selector.pick(rng)]
    }

    pub fn template(&self, kind: ProjectileKind) -> Option<&ProjectileTemplate> {
        self.templates.iter().find(|t| t.kind == kind)
    }

    pub fn templates(&self) -> &[ProjectileTemplate] {
        &self.templates
    }
}
