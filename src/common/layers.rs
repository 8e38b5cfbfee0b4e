//! Collision layers.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Shield,
    /// Player-fired bullets (owned by the VR rig, not this crate).
    Bullet,
    Projectile,
    Shooter,
    Target,
}
