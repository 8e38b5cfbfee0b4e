//! Launch consumer: spawn projectile entities from queued requests.
//!
//! The launch impulse is applied as an instantaneous velocity change
//! (`impulse / mass`); continuous acceleration is carried by [`Thrust`].

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

use super::catalog::ProjectileCatalog;
use super::components::{Projectile, Thrust};
use super::messages::LaunchProjectileRequest;

#[inline]
pub fn projectile_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Projectile,
        [Layer::World, Layer::Player, Layer::Shield, Layer::Bullet],
    )
}

pub fn spawn_launched_projectiles(
    mut commands: Commands,
    catalog: Option<Res<ProjectileCatalog>>,
    mut reader: MessageReader<LaunchProjectileRequest>,
) {
    let Some(catalog) = catalog else {
        for _ in reader.read() {
            warn!("Launch requested without a projectile catalog; dropping request");
        }
        return;
    };

    for req in reader.read() {
        let Some(template) = catalog.template(req.kind) else {
            warn!("No template for {:?}; dropping launch request", req.kind);
            continue;
        };

        let velocity = req.direction * (req.impulse / template.mass);

        commands.spawn((
            Name::new(format!("Projectile({:?})", req.kind)),
            Projectile { kind: req.kind },
            Thrust {
                direction: req.direction,
                acceleration: req.acceleration,
                source: req.source,
            },
            Transform::from_translation(req.position),
            RigidBody::Dynamic,
            Collider::sphere(template.radius),
            Mass(template.mass),
            projectile_layers(),
            LinearVelocity(velocity),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ));
    }
}
