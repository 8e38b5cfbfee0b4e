//! Projectile tests. Contacts are injected as `CollisionStart` messages and the
//! collision system is run once, so nothing here needs the physics pipeline.

use approx::assert_relative_eq;
use avian3d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::layers::Layer;
use crate::common::test_utils::{fixed_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::player::PlayerStats;

use super::catalog::ProjectileCatalog;
use super::collision::{self, Contact, StatEffect};
use super::components::*;
use super::messages::LaunchProjectileRequest;
use super::selector::{SelectError, WeightedSelector};
use super::{spawner, systems};

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn write_collision_start(world: &mut World, collider1: Entity, collider2: Entity) {
    if !world.contains_resource::<Messages<CollisionStart>>() {
        world.init_resource::<Messages<CollisionStart>>();
    }
    world.write_message(CollisionStart {
        collider1,
        collider2,
        body1: Some(collider1),
        body2: Some(collider2),
    });
}

fn collision_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<Messages<CollisionStart>>();
    world
}

fn spawn_projectile(world: &mut World, kind: ProjectileKind) -> Entity {
    world
        .spawn((Projectile { kind }, spawner::projectile_layers(), Transform::IDENTITY))
        .id()
}

fn spawn_player(world: &mut World) -> (Entity, Entity) {
    let player = world
        .spawn((
            PlayerStats::new(100, 50),
            CollisionLayers::new(Layer::Player, [Layer::Projectile]),
        ))
        .id();
    let shield = world
        .spawn(CollisionLayers::new(Layer::Shield, [Layer::Projectile]))
        .id();
    (player, shield)
}

fn stats(world: &mut World) -> PlayerStats {
    *world.query::<&PlayerStats>().single(world).unwrap()
}

// --------------------------------------------------------------------------------------
// Weighted selection
// --------------------------------------------------------------------------------------

#[test]
fn selection_frequencies_converge_to_weights() {
    let selector = WeightedSelector::new(vec![('a', 1.0), ('b', 3.0)]).unwrap();
    let mut rng = StdRng::seed_from_u64(1234);

    let n = 40_000;
    let bs = (0..n).filter(|_| *selector.pick(&mut rng) == 'b').count();

    assert_relative_eq!(bs as f32 / n as f32, 0.75, epsilon = 0.02);
    assert_relative_eq!(selector.probability(0).unwrap(), 0.25);
}

#[test]
fn zero_weight_candidates_are_never_chosen() {
    let selector = WeightedSelector::new(vec![(0, 0.0), (1, 2.0), (2, 0.0)]).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..2_000 {
        assert_eq!(*selector.pick(&mut rng), 1);
    }
    assert_eq!(*selector.pick_at(0.0), 1);
    assert_eq!(*selector.pick_at(2.0), 1);
}

#[test]
fn selection_boundaries_go_to_the_earlier_candidate() {
    let selector = WeightedSelector::new(vec![("x", 1.0), ("y", 1.0), ("z", 2.0)]).unwrap();

    assert_eq!(*selector.pick_at(0.5), "x");
    assert_eq!(*selector.pick_at(1.0), "x");
    assert_eq!(*selector.pick_at(1.5), "y");
    assert_eq!(*selector.pick_at(3.99), "z");
    // Past the total: last positive candidate takes it.
    assert_eq!(*selector.pick_at(4.5), "z");
}

#[test]
fn unusable_candidate_lists_are_rejected() {
    assert_eq!(
        WeightedSelector::<u8>::new(vec![]).unwrap_err(),
        SelectError::Empty
    );
    assert_eq!(
        WeightedSelector::new(vec![(1, 0.0), (2, 0.0)]).unwrap_err(),
        SelectError::ZeroTotalWeight
    );
    assert_eq!(
        WeightedSelector::new(vec![(1, 1.0), (2, -0.5)]).unwrap_err(),
        SelectError::InvalidWeight { index: 1, weight: -0.5 }
    );
    assert!(matches!(
        WeightedSelector::new(vec![(1, f32::NAN)]),
        Err(SelectError::InvalidWeight { index: 0, .. })
    ));
    assert_eq!(
        WeightedSelector::new(vec![(1, 3.0e38), (2, 3.0e38)]).unwrap_err(),
        SelectError::TotalOverflow { total: f32::INFINITY }
    );
}

#[test]
fn default_catalog_offers_every_kind() {
    let catalog = ProjectileCatalog::new(Tunables::default().projectiles.templates).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    for kind in ProjectileKind::ALL {
        assert!(catalog.template(kind).is_some(), "{kind:?} missing");
    }

    let mut seen = std::collections::HashSet::new();
    for _ in 0..1_000 {
        seen.insert(catalog.choose(&mut rng).kind);
    }
    assert_eq!(seen.len(), ProjectileKind::ALL.len());
}

// --------------------------------------------------------------------------------------
// Spawning and motion
// --------------------------------------------------------------------------------------

#[test]
fn launch_request_spawns_projectile_with_impulse_velocity() {
    let mut world = World::new();
    let templates = vec![ProjectileTemplate {
        kind: ProjectileKind::Health,
        launch_weight: 1.0,
        radius: 0.25,
        mass: 2.0,
    }];
    world.insert_resource(ProjectileCatalog::new(templates).unwrap());
    world.init_resource::<Messages<LaunchProjectileRequest>>();

    let shooter = world.spawn_empty().id();
    world.write_message(LaunchProjectileRequest {
        kind: ProjectileKind::Health,
        position: Vec3::new(1.0, 2.0, 3.0),
        direction: Vec3::Z,
        impulse: 10.0,
        acceleration: 4.0,
        source: shooter,
    });

    run_system_once(&mut world, spawner::spawn_launched_projectiles);

    let mut q = world.query::<(&Projectile, &Thrust, &Transform, &LinearVelocity, &CollisionLayers)>();
    let (projectile, thrust, tf, vel, layers) = q.single(&world).unwrap();
    assert_eq!(projectile.kind, ProjectileKind::Health);
    assert_eq!(tf.translation, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(vel.0, Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(thrust.source, shooter);
    assert_eq!(thrust.acceleration, 4.0);
    assert!(layers.memberships.has_all(Layer::Projectile));
    assert!(layers.filters.has_all(Layer::Player));
    assert!(layers.filters.has_all(Layer::Shield));
}

#[test]
fn launch_request_for_unknown_kind_is_dropped() {
    let mut world = World::new();
    let templates = vec![ProjectileTemplate {
        kind: ProjectileKind::Attack,
        launch_weight: 1.0,
        radius: 0.25,
        mass: 1.0,
    }];
    world.insert_resource(ProjectileCatalog::new(templates).unwrap());
    world.init_resource::<Messages<LaunchProjectileRequest>>();
    let source = world.spawn_empty().id();
    world.write_message(LaunchProjectileRequest {
        kind: ProjectileKind::Danger,
        position: Vec3::ZERO,
        direction: Vec3::X,
        impulse: 1.0,
        acceleration: 0.0,
        source,
    });

    run_system_once(&mut world, spawner::spawn_launched_projectiles);

    assert_eq!(world.query::<&Projectile>().iter(&world).count(), 0);
}

#[test]
fn thrust_accelerates_once_per_tick() {
    let mut world = World::new();
    world.insert_resource(fixed_time_with_delta(0.5));
    let source = world.spawn_empty().id();
    let e = world
        .spawn((
            Thrust { direction: Vec3::Y, acceleration: 4.0, source },
            LinearVelocity(Vec3::new(1.0, 0.0, 0.0)),
        ))
        .id();
    let spent = world
        .spawn((
            Thrust { direction: Vec3::Y, acceleration: 4.0, source },
            LinearVelocity(Vec3::ZERO),
            Spent,
        ))
        .id();

    run_system_once(&mut world, systems::apply_thrust);
    run_system_once(&mut world, systems::apply_thrust);

    assert_relative_eq!(world.get::<LinearVelocity>(e).unwrap().0.y, 4.0);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0.x, 1.0);
    assert_eq!(world.get::<LinearVelocity>(spent).unwrap().0, Vec3::ZERO);
}

#[test]
fn projectiles_below_ground_are_spent() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    let below = world
        .spawn((Projectile { kind: ProjectileKind::Attack }, Transform::from_xyz(0.0, -0.01, 0.0)))
        .id();
    let above = world
        .spawn((Projectile { kind: ProjectileKind::Attack }, Transform::from_xyz(0.0, 0.0, 0.0)))
        .id();

    run_system_once(&mut world, systems::mark_below_ground);

    assert!(world.get::<Spent>(below).is_some());
    assert!(world.get::<Spent>(above).is_none());
}

#[test]
fn cancel_thrust_only_touches_the_sources_projectiles() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let from_a = world.spawn(Thrust { direction: Vec3::X, acceleration: 1.0, source: a }).id();
    let from_b = world.spawn(Thrust { direction: Vec3::X, acceleration: 1.0, source: b }).id();

    let cancelled = run_system_once(
        &mut world,
        move |mut commands: Commands, q: Query<(Entity, &Thrust)>| {
            systems::cancel_thrust_from(&mut commands, a, &q)
        },
    );

    assert_eq!(cancelled, 1);
    assert!(world.get::<Thrust>(from_a).is_none());
    assert!(world.get::<Thrust>(from_b).is_some());
}

#[test]
fn spent_projectiles_are_despawned() {
    let mut world = World::new();
    let spent = world.spawn((Projectile { kind: ProjectileKind::Armor }, Spent)).id();
    let live = world.spawn(Projectile { kind: ProjectileKind::Armor }).id();

    run_system_once(&mut world, systems::despawn_spent_projectiles);

    assert!(world.get_entity(spent).is_err());
    assert!(world.get_entity(live).is_ok());
}

// --------------------------------------------------------------------------------------
// Contacts
// --------------------------------------------------------------------------------------

#[test]
fn only_danger_changes_stats() {
    let t = Tunables::default();
    for kind in ProjectileKind::ALL {
        for contact in [Contact::Bullet, Contact::Shield, Contact::Player, Contact::Other] {
            let effect = collision::stat_effect(kind, contact, &t);
            let expected = match (kind, contact) {
                (ProjectileKind::Danger, Contact::Player) => StatEffect::Health(10),
                (ProjectileKind::Danger, Contact::Shield) => StatEffect::Armor(5),
                _ => StatEffect::None,
            };
            assert_eq!(effect, expected, "{kind:?} on {contact:?}");
        }
    }
}

#[test]
fn contact_is_read_from_layer_membership() {
    let bullet = CollisionLayers::new(Layer::Bullet, [Layer::Projectile]);
    let shield = CollisionLayers::new(Layer::Shield, [Layer::Projectile]);
    let player = CollisionLayers::new(Layer::Player, [Layer::Projectile]);
    let ground = CollisionLayers::new(Layer::World, [Layer::Projectile]);

    assert_eq!(Contact::from_layers(&bullet), Contact::Bullet);
    assert_eq!(Contact::from_layers(&shield), Contact::Shield);
    assert_eq!(Contact::from_layers(&player), Contact::Player);
    assert_eq!(Contact::from_layers(&ground), Contact::Other);
}

#[test]
fn danger_on_player_costs_health_and_spends_projectile() {
    let mut world = collision_world();
    let (player, _) = spawn_player(&mut world);
    let p = spawn_projectile(&mut world, ProjectileKind::Danger);

    write_collision_start(&mut world, player, p);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(90, 50));
    assert!(world.get::<Spent>(p).is_some());
}

#[test]
fn danger_on_shield_costs_armor() {
    let mut world = collision_world();
    let (_, shield) = spawn_player(&mut world);
    let p = spawn_projectile(&mut world, ProjectileKind::Danger);

    write_collision_start(&mut world, p, shield);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(100, 45));
    assert!(world.get::<Spent>(p).is_some());
}

#[test]
fn harmless_kinds_are_spent_without_effect() {
    let mut world = collision_world();
    let (player, shield) = spawn_player(&mut world);
    let bullet = world
        .spawn(CollisionLayers::new(Layer::Bullet, [Layer::Projectile]))
        .id();

    let hits = [
        (ProjectileKind::Attack, player),
        (ProjectileKind::Defense, shield),
        (ProjectileKind::Health, bullet),
        (ProjectileKind::Danger, bullet),
    ];
    let mut projectiles = Vec::new();
    for (kind, other) in hits {
        let p = spawn_projectile(&mut world, kind);
        write_collision_start(&mut world, p, other);
        projectiles.push(p);
    }

    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(100, 50));
    assert!(projectiles.iter().all(|p| world.get::<Spent>(*p).is_some()));
}

#[test]
fn repeated_contacts_in_one_tick_apply_once() {
    let mut world = collision_world();
    let (player, shield) = spawn_player(&mut world);
    let p = spawn_projectile(&mut world, ProjectileKind::Danger);

    write_collision_start(&mut world, p, player);
    write_collision_start(&mut world, p, shield);
    write_collision_start(&mut world, player, p);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(90, 50));
}

#[test]
fn spent_projectiles_ignore_later_contacts() {
    let mut world = collision_world();
    let (player, _) = spawn_player(&mut world);
    let p = spawn_projectile(&mut world, ProjectileKind::Danger);
    world.entity_mut(p).insert(Spent);

    write_collision_start(&mut world, p, player);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(100, 50));
}

#[test]
fn contacts_between_non_projectiles_are_ignored() {
    let mut world = collision_world();
    let (player, shield) = spawn_player(&mut world);

    write_collision_start(&mut world, player, shield);
    run_system_once(&mut world, collision::process_projectile_collisions);

    assert_eq!(stats(&mut world), PlayerStats::new(100, 50));
}
