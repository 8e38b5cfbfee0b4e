//! Shooters plugin: enemies that lob weighted-random projectiles at the target.
//!
//! Pipeline:
//! - FixedUpdate: tick each `FireRoutine`, write launch requests (before the
//!   projectile spawner consumes them)
//! - Update: refresh the predicted `TrajectoryPath` and ease the heading
//!
//! Shooters are spawned and retired only by the population manager.

pub mod components;
pub mod systems;
pub mod trajectory;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::ShooterTunables;
use crate::plugins::projectiles::LaunchSystems;

use trajectory::TrajectorySolver;

impl From<&ShooterTunables> for TrajectorySolver {
    fn from(t: &ShooterTunables) -> Self {
        Self {
            launch_angle_deg: t.launch_angle_deg,
            steps: t.path_steps,
            time_step: t.path_time_step,
            arrival_threshold: t.path_arrival_threshold,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        systems::fire_shooters
            .before(LaunchSystems)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        Update,
        systems::update_trajectories.run_if(in_state(GameState::InGame)),
    );
}
