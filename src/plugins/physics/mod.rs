use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Rigid-body simulation with the configured gravity.
///
/// Trajectory prediction reads the same [`Tunables::gravity`], so predicted arcs
/// and simulated flight agree.
pub fn plugin(app: &mut App) {
    let gravity = app.world().resource::<Tunables>().gravity();
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(gravity));
}
