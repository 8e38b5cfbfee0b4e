use bevy::prelude::*;
use rand::Rng;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<GameRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_preloaded_tunables() {
    let mut app = App::new();
    let mut tunables = Tunables::default();
    tunables.population.max = 7;
    app.insert_resource(tunables);

    core::plugin(&mut app);

    assert_eq!(app.world().resource::<Tunables>().population.max, 7);
}

#[test]
fn seeded_tunables_give_reproducible_rng() {
    let draw = || {
        let mut app = App::new();
        app.insert_resource(Tunables { seed: Some(17), ..default() });
        core::plugin(&mut app);
        app.world_mut().resource_mut::<GameRng>().gen_range(0..1_000_000)
    };
    assert_eq!(draw(), draw());
}
