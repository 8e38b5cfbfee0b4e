//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod core;
pub mod physics;
pub mod player;
pub mod population;
pub mod projectiles;
pub mod shooters;
pub mod targets;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    targets::plugin(app);
    player::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    shooters::plugin(app);
    population::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    visuals::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
