use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

use super::*;

#[test]
fn health_clamps_at_zero() {
    let mut stats = PlayerStats::new(100, 50);
    stats.subtract_health(150);
    assert_eq!(stats.health(), 0);
    assert_eq!(stats.armor(), 50);
}

#[test]
fn armor_clamps_at_zero_and_keeps_health() {
    let mut stats = PlayerStats::new(100, 50);
    stats.subtract_armor(5);
    assert_eq!(stats.armor(), 45);
    stats.subtract_armor(1_000);
    assert_eq!(stats.armor(), 0);
    assert_eq!(stats.health(), 100);
}

#[test]
fn extreme_damage_saturates_and_never_heals() {
    let mut stats = PlayerStats::new(100, 50);
    stats.subtract_health(i32::MAX);
    stats.subtract_armor(i32::MIN);
    assert_eq!(stats.health(), 0);
    assert_eq!(stats.armor(), 50);
}

#[test]
fn negative_starting_values_are_clamped() {
    let stats = PlayerStats::new(-5, -1);
    assert_eq!((stats.health(), stats.armor()), (0, 0));
}

#[test]
fn spawn_creates_player_and_shield() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());

    run_system_once(&mut world, super::spawn);

    let stats = world
        .query_filtered::<&PlayerStats, With<Player>>()
        .single(&world)
        .unwrap();
    assert_eq!((stats.health(), stats.armor()), (100, 50));

    let shields = world.query::<&Shield>().iter(&world).count();
    assert_eq!(shields, 1);
}
