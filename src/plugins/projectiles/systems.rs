//! Per-tick projectile motion and cleanup.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{Projectile, Spent, Thrust};

/// Continuous acceleration: `v += direction * acceleration * dt` each fixed tick.
pub fn apply_thrust(
    time: Res<Time<Fixed>>,
    mut q: Query<(&Thrust, &mut LinearVelocity), Without<Spent>>,
) {
    let dt = time.delta_secs();
    for (thrust, mut vel) in &mut q {
        vel.0 += thrust.direction * thrust.acceleration * dt;
    }
}

/// Mark projectiles that fell through the ground threshold.
pub fn mark_below_ground(
    mut commands: Commands,
    tunables: Res<Tunables>,
    q: Query<(Entity, &Transform), (With<Projectile>, Without<Spent>)>,
) {
    let floor = tunables.projectiles.ground_threshold;
    for (e, tf) in &q {
        if tf.translation.y < floor {
            commands.entity(e).insert(Spent);
        }
    }
}

/// Stop the thrust of every projectile launched by `source`.
///
/// Called when a shooter is retired so its in-flight projectiles coast on
/// physics alone.
pub fn cancel_thrust_from<'t>(
    commands: &mut Commands,
    source: Entity,
    thrusts: impl IntoIterator<Item = (Entity, &'t Thrust)>,
) -> usize {
    let mut cancelled = 0;
    for (e, thrust) in thrusts {
        if thrust.source == source {
            commands.entity(e).remove::<Thrust>();
            cancelled += 1;
        }
    }
    cancelled
}

/// Despawn spent projectiles outside the fixed step.
pub fn despawn_spent_projectiles(mut commands: Commands, q: Query<Entity, With<Spent>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
