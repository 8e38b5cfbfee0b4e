//! World plugin: the ground plane projectiles fall onto.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

/// Marker for the static ground slab.
#[derive(Component)]
pub struct Ground;

const GROUND_THICKNESS: f32 = 0.2;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_ground);
}

/// The slab's top face sits at `y = 0`.
fn spawn_ground(mut commands: Commands, tunables: Res<Tunables>) {
    let half = tunables.world.ground_half_extent;

    commands.spawn((
        Name::new("Ground"),
        Ground,
        Transform::from_xyz(0.0, -GROUND_THICKNESS * 0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(half * 2.0, GROUND_THICKNESS, half * 2.0),
        CollisionLayers::new(Layer::World, [Layer::Projectile]),
        DespawnOnExit(GameState::InGame),
    ));
}
