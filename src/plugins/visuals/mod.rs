//! Visuals plugin (render-only): meshes for gameplay entities and the predicted
//! trajectory of every shooter.
//!
//! Gameplay plugins spawn bare physics bodies; this plugin dresses them as they
//! appear, so headless apps never touch mesh or material assets.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::player::{Player, Shield};
use crate::plugins::projectiles::components::{Projectile, ProjectileKind};
use crate::plugins::shooters::components::{Shooter, TrajectoryPath};
use crate::plugins::targets::Target;
use crate::plugins::world::Ground;

/// Gizmo line width in pixels per world unit of configured width.
const LINE_PIXELS_PER_UNIT: f32 = 100.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, configure_lines).add_systems(
        Update,
        (dress_spawned, draw_trajectories),
    );
}

fn kind_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Attack => Color::srgb(0.9, 0.55, 0.1),
        ProjectileKind::Defense => Color::srgb(0.2, 0.5, 0.95),
        ProjectileKind::Health => Color::srgb(0.2, 0.85, 0.3),
        ProjectileKind::Armor => Color::srgb(0.7, 0.7, 0.75),
        ProjectileKind::Danger => Color::srgb(0.95, 0.1, 0.1),
    }
}

fn configure_lines(tunables: Res<Tunables>, mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = tunables.shooter.line_width * LINE_PIXELS_PER_UNIT;
    config.line.perspective = true;
}

#[allow(clippy::type_complexity)]
fn dress_spawned(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q_projectiles: Query<(Entity, &Projectile), Added<Projectile>>,
    q_shooters: Query<Entity, Added<Shooter>>,
    q_targets: Query<Entity, Added<Target>>,
    q_player: Query<Entity, Added<Player>>,
    q_shields: Query<Entity, Added<Shield>>,
    q_ground: Query<Entity, Added<Ground>>,
) {
    for (e, projectile) in &q_projectiles {
        let radius = tunables
            .projectiles
            .templates
            .iter()
            .find(|t| t.kind == projectile.kind)
            .map_or(0.25, |t| t.radius);
        commands.entity(e).insert((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(materials.add(kind_color(projectile.kind))),
        ));
    }

    for e in &q_shooters {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Sphere::new(tunables.shooter.body_radius))),
            MeshMaterial3d(materials.add(Color::srgb(0.35, 0.3, 0.3))),
        ));
    }

    for e in &q_targets {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Sphere::new(tunables.target.radius))),
            MeshMaterial3d(materials.add(Color::srgb(1.0, 0.85, 0.2))),
        ));
    }

    for e in &q_player {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.3, 1.2))),
            MeshMaterial3d(materials.add(Color::srgb(0.4, 0.4, 0.5))),
        ));
    }

    for e in &q_shields {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cuboid::new(0.8, 1.0, 0.05))),
            MeshMaterial3d(materials.add(Color::srgba(0.3, 0.6, 1.0, 0.6))),
        ));
    }

    for e in &q_ground {
        let size = tunables.world.ground_half_extent * 2.0;
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cuboid::new(size, 0.2, size))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.45, 0.3))),
        ));
    }
}

/// One line strip per shooter along its predicted arc.
fn draw_trajectories(mut gizmos: Gizmos, q: Query<&TrajectoryPath>) {
    for path in &q {
        if path.points.len() < 2 {
            continue;
        }
        gizmos.linestrip(path.points.iter().copied(), Color::srgb(1.0, 0.3, 0.2));
    }
}
