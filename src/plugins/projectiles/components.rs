use bevy::prelude::*;
use serde::Deserialize;

/// Closed set of projectile categories; decides the collision reaction.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    Attack,
    Defense,
    Health,
    Armor,
    Danger,
}

impl ProjectileKind {
    pub const ALL: [Self; 5] = [Self::Attack, Self::Defense, Self::Health, Self::Armor, Self::Danger];
}

/// Authoring data for one launchable kind.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectileTemplate {
    pub kind: ProjectileKind,
    /// Relative launch probability; only the ratio to the catalog total matters.
    pub launch_weight: f32,
    pub radius: f32,
    pub mass: f32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub kind: ProjectileKind,
}

/// Continuous acceleration along a fixed direction.
///
/// Owned by the shooter that launched the projectile: retiring that shooter strips
/// this component from every projectile it launched.
#[derive(Component, Debug, Clone, Copy)]
pub struct Thrust {
    pub direction: Vec3,
    pub acceleration: f32,
    pub source: Entity,
}

/// Marker: projectile is finished and will be despawned in `PostUpdate`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spent;
