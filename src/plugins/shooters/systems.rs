//! Shooter behavior: fire on the routine's schedule, keep the aim line and heading
//! current.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, rng::GameRng, state::GameState, tunables::Tunables};
use crate::plugins::projectiles::catalog::ProjectileCatalog;
use crate::plugins::projectiles::messages::LaunchProjectileRequest;

use super::components::{FireRoutine, Shooter, ShooterConfig, TrajectoryPath};
use super::trajectory::{emitter_heading, turn_towards, TrajectorySolver};

/// Everything a freshly placed shooter needs.
pub fn shooter_bundle(
    position: Vec3,
    config: ShooterConfig,
    target: Option<Entity>,
    tunables: &Tunables,
) -> impl Bundle {
    (
        Name::new("Shooter"),
        Shooter::new(config, target),
        FireRoutine::new(&config),
        TrajectoryPath::default(),
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::sphere(tunables.shooter.body_radius),
        CollisionLayers::new(Layer::Shooter, [Layer::Bullet]),
        DespawnOnExit(GameState::InGame),
    )
}

/// Yaw offset, in degrees, of shot number `shot` within a fan of `fan_size`.
///
/// Shots sweep `-(fan/2) ..= fan/2` spread steps and wrap.
pub fn fan_offset_deg(shot: u32, fan_size: u32, spread_angle: f32) -> f32 {
    let fan = fan_size.max(1);
    let step = (shot % fan) as i32 - (fan / 2) as i32;
    step as f32 * spread_angle
}

pub fn fire_shooters(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    catalog: Option<Res<ProjectileCatalog>>,
    mut rng: ResMut<GameRng>,
    mut q_shooters: Query<(Entity, &Transform, &mut Shooter, &mut FireRoutine)>,
    q_targets: Query<&Transform, Without<Shooter>>,
    mut writer: MessageWriter<LaunchProjectileRequest>,
) {
    for (e, tf, mut shooter, mut routine) in &mut q_shooters {
        let config = shooter.config;
        let due = routine.tick(time.delta(), &config);

        for _ in 0..due {
            let Some(target_e) = shooter.target else {
                warn!("Shooter {e} has no target; holding fire");
                break;
            };
            let Ok(target_tf) = q_targets.get(target_e) else {
                warn!("Shooter {e} target {target_e} is gone; holding fire");
                break;
            };
            let Some(catalog) = catalog.as_deref() else {
                warn!("No projectile catalog; shooter {e} holding fire");
                break;
            };

            let aim = (target_tf.translation - tf.translation).normalize_or_zero();
            if aim == Vec3::ZERO {
                debug!("Shooter {e} sits on its target; skipping shot");
                continue;
            }

            let yaw = fan_offset_deg(shooter.shots_fired, tunables.shooter.fan_size, config.spread_angle);
            let direction = Quat::from_rotation_y(yaw.to_radians()) * aim;
            let template = catalog.choose(&mut rng.0);

            writer.write(LaunchProjectileRequest {
                kind: template.kind,
                position: tf.translation + Vec3::Y * config.height_offset,
                direction,
                impulse: config.launch_force,
                acceleration: config.acceleration,
                source: e,
            });

            debug!("Shooter {e} launched {:?}", template.kind);
            shooter.shots_fired = shooter.shots_fired.wrapping_add(1);
        }
    }
}

/// Recompute each shooter's predicted path and ease its heading toward the target.
pub fn update_trajectories(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q_shooters: Query<(&mut Transform, &Shooter, &mut TrajectoryPath)>,
    q_targets: Query<&Transform, Without<Shooter>>,
) {
    let solver = TrajectorySolver::from(&tunables.shooter);
    let gravity_y = tunables.world.gravity_y;
    let dt = time.delta_secs();

    for (mut tf, shooter, mut path) in &mut q_shooters {
        let Some(target_tf) = shooter.target.and_then(|t| q_targets.get(t).ok()) else {
            path.points.clear();
            continue;
        };

        let start = tf.translation;
        let goal = target_tf.translation;
        let trajectory = solver.solve(start, goal, gravity_y, shooter.config.height_offset);
        path.points = trajectory.path;
        path.velocity = trajectory.velocity;

        if let Some(heading) = emitter_heading(goal - start) {
            tf.rotation = turn_towards(tf.rotation, heading, tunables.shooter.turn_rate, dt);
        }
    }
}
