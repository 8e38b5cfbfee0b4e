//! Core plugin: shared resources and global settings.

use crate::common::{rng::GameRng, tunables::Tunables};
use bevy::prelude::*;

/// Installs defaults for anything the composition root did not provide.
///
/// `configure_full` inserts tunables loaded from disk before this runs; tests
/// insert their own seeded tunables.
pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(Tunables::default());
    }
    if !app.world().contains_resource::<GameRng>() {
        let seed = app.world().resource::<Tunables>().seed;
        if let Some(seed) = seed {
            info!("Gameplay RNG seeded with {seed}");
        }
        app.insert_resource(GameRng::from_seed_option(seed));
    }
    app.insert_resource(ClearColor(Color::srgb(0.52, 0.68, 0.85)));
}

#[cfg(test)]
mod tests;
