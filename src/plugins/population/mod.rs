//! Population plugin: keeps a bounded, churning set of shooters around the target.
//!
//! Every cycle (FixedPostUpdate, after motion) the [`PopulationManager`] decides
//! whether to add or retire shooters; [`EcsHost`] turns those decisions into
//! spawns and despawns. Retiring a shooter also strips the thrust from its
//! in-flight projectiles.

pub mod level;
pub mod manager;
pub mod roster;
pub mod slots;

use bevy::prelude::*;

use crate::common::{rng::GameRng, state::GameState, tunables::Tunables};
use crate::plugins::projectiles::components::Thrust;
use crate::plugins::projectiles::systems::cancel_thrust_from;
use crate::plugins::shooters::systems::shooter_bundle;
use crate::plugins::targets::Target;

use manager::{PopulationHost, PopulationManager, SpawnOrder};

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), reset_population)
        .add_systems(
            FixedPostUpdate,
            run_population.run_if(in_state(GameState::InGame)),
        );
}

/// Start each session with an empty roster built from the current tunables.
fn reset_population(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(PopulationManager::from_tunables(&tunables.population));
}

/// Spawns shooters aimed at `target` and despawns retired ones.
pub struct EcsHost<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub tunables: &'a Tunables,
    pub target: Option<Entity>,
    /// `(projectile, thrust)` pairs still under power this tick.
    pub thrusts: &'a [(Entity, Thrust)],
}

impl PopulationHost for EcsHost<'_, '_, '_> {
    fn spawn(&mut self, order: &SpawnOrder) -> Entity {
        self.commands
            .spawn(shooter_bundle(order.position, order.config, self.target, self.tunables))
            .id()
    }

    fn retire(&mut self, shooter: Entity) {
        let cancelled = cancel_thrust_from(
            self.commands,
            shooter,
            self.thrusts.iter().map(|(e, t)| (*e, t)),
        );
        if cancelled > 0 {
            debug!("Shooter {shooter} retired; {cancelled} projectiles lose thrust");
        }
        self.commands.entity(shooter).despawn();
    }
}

pub fn run_population(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    manager: Option<ResMut<PopulationManager>>,
    mut rng: ResMut<GameRng>,
    q_target: Query<(Entity, &Transform), With<Target>>,
    q_thrust: Query<(Entity, &Thrust)>,
) {
    let Some(mut manager) = manager else {
        return;
    };

    let due = manager.tick(time.delta());
    if due == 0 {
        return;
    }

    let target = q_target.single().ok();
    let anchor = target.map(|(_, tf)| tf.translation);
    let thrusts: Vec<(Entity, Thrust)> = q_thrust.iter().map(|(e, t)| (e, *t)).collect();

    let mut host = EcsHost {
        commands: &mut commands,
        tunables: &tunables,
        target: target.map(|(e, _)| e),
        thrusts: &thrusts,
    };

    for _ in 0..due {
        manager.run_cycle(anchor, &mut rng.0, &mut host);
    }
}
