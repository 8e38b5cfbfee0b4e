//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `shooting_gallery::game::configure_headless` to install gameplay plugins,
//!   and finish the app so plugin `finish` hooks run as they would under `App::run`.
//! - time advances a fixed step per `update()`, so fixed-schedule systems run
//!   deterministically regardless of wall-clock speed.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use shooting_gallery::common::state::GameState;
use shooting_gallery::common::tunables::Tunables;

pub const STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(tunables);

    shooting_gallery::game::configure_headless(&mut app);
    // Avian inserts some resources (e.g. `CollisionDiagnostics`) in `Plugin::finish`.
    app.finish();
    app.cleanup();
    app
}

/// Headless app with a fixed seed.
pub fn app_headless() -> App {
    app_headless_with(Tunables { seed: Some(2024), ..default() })
}

pub fn enter_game(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
}

/// Run `update()` until roughly `seconds` of game time have passed.
pub fn run_for(app: &mut App, seconds: f32) {
    let frames = (seconds / STEP.as_secs_f32()).ceil() as usize;
    for _ in 0..frames {
        app.update();
    }
}

pub fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&C>().iter(app.world()).count()
}
