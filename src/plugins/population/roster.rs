//! Live shooters in spawn order, each with its accumulated lifetime and slot.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterEntry {
    pub shooter: Entity,
    /// Seconds alive, advanced once per population cycle.
    pub lifetime: f32,
    pub slot: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, shooter: Entity) -> bool {
        self.entries.iter().any(|e| e.shooter == shooter)
    }

    pub fn get(&self, shooter: Entity) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.shooter == shooter)
    }

    pub fn advance(&mut self, dt: f32) {
        for entry in &mut self.entries {
            entry.lifetime += dt;
        }
    }

    pub fn register(&mut self, shooter: Entity, slot: Option<usize>) {
        debug_assert!(!self.contains(shooter), "shooter {shooter} registered twice");
        self.entries.push(RosterEntry { shooter, lifetime: 0.0, slot });
    }

    /// Remove `shooter`, keeping the order of the rest.
    ///
    /// Removing an unknown shooter is a bookkeeping bug.
    pub fn remove(&mut self, shooter: Entity) -> Option<RosterEntry> {
        let pos = self.entries.iter().position(|e| e.shooter == shooter);
        debug_assert!(pos.is_some(), "shooter {shooter} is not on the roster");
        pos.map(|i| self.entries.remove(i))
    }

    /// Shooters whose lifetime has reached `min_lifetime`.
    pub fn eligible(&self, min_lifetime: f32) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter().filter(move |e| e.lifetime >= min_lifetime)
    }

    pub fn drain(&mut self) -> Vec<RosterEntry> {
        std::mem::take(&mut self.entries)
    }
}
