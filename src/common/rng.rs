//! Seedable randomness shared by every gameplay system.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The single random source for gameplay.
///
/// Systems borrow it mutably, so draws happen in schedule order and a fixed seed
/// replays the same session.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}
