//! Player plugin: the body and shield that projectiles can hit, and the health/armor
//! they can take away.
//!
//! The VR rig that moves these colliders lives outside this crate; here they are
//! kinematic bodies that only exist to receive contacts.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct Player;

#[derive(Component)]
pub struct Shield;

/// Health and armor, both clamped at zero.
///
/// Only [`PlayerStats::subtract_health`] and [`PlayerStats::subtract_armor`] change them,
/// and never upward: negative amounts count as zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    health: i32,
    armor: i32,
}

impl PlayerStats {
    pub fn new(health: i32, armor: i32) -> Self {
        Self { health: health.max(0), armor: armor.max(0) }
    }

    #[inline]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[inline]
    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn subtract_health(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
        info!("Health: {}", self.health);
    }

    pub fn subtract_armor(&mut self, amount: i32) {
        self.armor = self.armor.saturating_sub(amount.max(0)).max(0);
        info!("Armor: {}", self.armor);
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn);
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.player;
    let position = Vec3::from_array(t.position);

    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerStats::new(t.health, t.armor),
        Transform::from_translation(position),
        RigidBody::Kinematic,
        Collider::capsule(0.3, 1.2),
        CollisionLayers::new(Layer::Player, [Layer::Projectile]),
        DespawnOnExit(GameState::InGame),
    ));

    commands.spawn((
        Name::new("Shield"),
        Shield,
        Transform::from_translation(position + Vec3::NEG_Z * t.shield_distance),
        RigidBody::Kinematic,
        Collider::cuboid(0.8, 1.0, 0.05),
        CollisionLayers::new(Layer::Shield, [Layer::Projectile]),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
