//! Camera plugin (render-only).
//!
//! The camera stands in for the player's head: it sits at the player position and
//! looks at the target's starting point.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera at the player, facing the target
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let eye = Vec3::from_array(tunables.player.position);
    let look_at = Vec3::from_array(tunables.target.start);

    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        Transform::from_translation(eye + Vec3::Z * 2.0).looking_at(look_at, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}
