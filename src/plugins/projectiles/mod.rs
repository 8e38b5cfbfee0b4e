//! Projectiles plugin: **message-based launch → spawn** pipeline, thrust, and contact
//! resolution.
//!
//! # Data flow
//! ```text
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: shooters::systems::fire_shooters                            │
//!│      - reads: ProjectileCatalog, GameRng, shooter + target Transforms      │
//!│      - writes: LaunchProjectileRequest message                             │
//!│                                                                            │
//!│  (B) Consumer: spawn_launched_projectiles                                  │
//!│      - reads: LaunchProjectileRequest messages                             │
//!│      - spawns: Projectile + Thrust + rigid body                            │
//!│                                                                            │
//!│  (C) apply_thrust: v += dir * accel * dt                                   │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (Avian)                         │
//!│  (E) process_projectile_collisions: stat effects, mark Spent               │
//!│  (F) mark_below_ground (after writeback): y < ground threshold → Spent     │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!PostUpdate: despawn_spent_projectiles
//! ```
//!
//! Motion (C) always runs before contact and ground decisions (E, F) of the same tick.

pub mod catalog;
pub mod collision;
pub mod components;
pub mod messages;
pub mod selector;
pub mod spawner;
pub mod systems;

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::schedule::PhysicsSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub struct ProjectilesPlugin;

/// Systems that launch projectiles; shooters order their producers before this.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaunchSystems;

/// Maintain launch request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_launch_messages(mut msgs: ResMut<Messages<messages::LaunchProjectileRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let templates = app
            .world()
            .get_resource::<Tunables>()
            .map(|t| t.projectiles.templates.clone())
            .unwrap_or_else(|| Tunables::default().projectiles.templates);

        match catalog::ProjectileCatalog::new(templates) {
            Ok(catalog) => {
                app.insert_resource(catalog);
            }
            Err(e) => warn!("Projectile catalog rejected ({e}); shooters will hold fire"),
        }

        app.init_resource::<Messages<messages::LaunchProjectileRequest>>();
        app.add_systems(PostUpdate, update_launch_messages);

        app.add_systems(
            FixedUpdate,
            (
                spawner::spawn_launched_projectiles.in_set(LaunchSystems),
                systems::apply_thrust.after(LaunchSystems),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_projectile_collisions.after(CollisionEventSystems),
                systems::mark_below_ground.after(PhysicsSystems::Writeback),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            PostUpdate,
            systems::despawn_spent_projectiles.run_if(in_state(GameState::InGame)),
        );
    }
}

#[cfg(test)]
mod tests;
