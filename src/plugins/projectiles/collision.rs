//! Projectile contact resolution.
//!
//! Every contact spends the projectile. Bullets and shields are logged first, then
//! the projectile's kind decides any extra effect. Only `Danger` changes player
//! stats: hitting the player body costs health, hitting the shield costs armor.

use avian3d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::{layers::Layer, tunables::Tunables};
use crate::plugins::player::PlayerStats;

use super::components::{Projectile, ProjectileKind, Spent};

/// What a projectile touched, from the other collider's layer membership.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Bullet,
    Shield,
    Player,
    Other,
}

impl Contact {
    pub fn from_layers(layers: &CollisionLayers) -> Self {
        if layers.memberships.has_all(Layer::Bullet) {
            Self::Bullet
        } else if layers.memberships.has_all(Layer::Shield) {
            Self::Shield
        } else if layers.memberships.has_all(Layer::Player) {
            Self::Player
        } else {
            Self::Other
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatEffect {
    None,
    Health(i32),
    Armor(i32),
}

/// Stat change caused by a projectile of `kind` touching `contact`.
pub fn stat_effect(kind: ProjectileKind, contact: Contact, tunables: &Tunables) -> StatEffect {
    match (kind, contact) {
        (ProjectileKind::Danger, Contact::Player) => {
            StatEffect::Health(tunables.projectiles.danger_health_damage)
        }
        (ProjectileKind::Danger, Contact::Shield) => {
            StatEffect::Armor(tunables.projectiles.danger_armor_damage)
        }
        _ => StatEffect::None,
    }
}

pub fn process_projectile_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    tunables: Res<Tunables>,
    q_projectiles: Query<&Projectile, Without<Spent>>,
    q_layers: Query<&CollisionLayers>,
    mut q_player: Query<&mut PlayerStats>,
    // Per-frame dedupe
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (projectile_e, other_e) = if q_projectiles.contains(ev.collider1) {
            (ev.collider1, ev.collider2)
        } else if q_projectiles.contains(ev.collider2) {
            (ev.collider2, ev.collider1)
        } else {
            continue;
        };

        if !seen.insert(projectile_e) {
            continue;
        }

        let Ok(projectile) = q_projectiles.get(projectile_e) else {
            continue;
        };

        let contact = q_layers
            .get(other_e)
            .map(Contact::from_layers)
            .unwrap_or(Contact::Other);

        match contact {
            Contact::Bullet => debug!("Projectile collided with bullet"),
            Contact::Shield => debug!("Projectile collided with shield"),
            _ => {}
        }
        debug!("{:?} projectile collided with {:?}", projectile.kind, contact);

        match stat_effect(projectile.kind, contact, &tunables) {
            StatEffect::None => {}
            StatEffect::Health(amount) => match q_player.single_mut() {
                Ok(mut stats) => stats.subtract_health(amount),
                Err(e) => warn!("Danger hit without a single player: {e:?}"),
            },
            StatEffect::Armor(amount) => match q_player.single_mut() {
                Ok(mut stats) => stats.subtract_armor(amount),
                Err(e) => warn!("Danger hit without a single player: {e:?}"),
            },
        }

        commands.entity(projectile_e).insert(Spent);
    }
}
