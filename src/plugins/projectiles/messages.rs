//! Buffered launch requests.
//!
//! Shooters produce *intent*; the spawner is the single consumer that turns intent
//! into projectile entities. Producers never touch the catalog templates or the
//! physics components directly.

use bevy::prelude::*;

use super::components::ProjectileKind;

#[derive(Message, Clone, Copy, Debug)]
pub struct LaunchProjectileRequest {
    pub kind: ProjectileKind,
    pub position: Vec3,
    /// Unit launch direction.
    pub direction: Vec3,
    /// Instantaneous impulse magnitude along `direction`.
    pub impulse: f32,
    /// Continuous acceleration along `direction` after launch.
    pub acceleration: f32,
    pub source: Entity,
}
