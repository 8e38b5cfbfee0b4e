//! Angular spawn slots around the target.
//!
//! There is exactly one slot per allowed shooter, evenly spaced on a circle
//! (`i * 360° / count`), so the population maximum and the slot count are the
//! same number.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct SlotPool {
    count: usize,
    /// Free slot indices, kept sorted so draws are reproducible.
    free: Vec<usize>,
}

impl SlotPool {
    pub fn new(count: usize) -> Self {
        Self { count, free: (0..count).collect() }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_free(&self, slot: usize) -> bool {
        self.free.binary_search(&slot).is_ok()
    }

    /// Claim a uniformly random free slot.
    pub fn take<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.free.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..self.free.len());
        Some(self.free.remove(i))
    }

    /// Return a claimed slot to the pool.
    pub fn release(&mut self, slot: usize) {
        debug_assert!(slot < self.count, "slot {slot} out of range");
        match self.free.binary_search(&slot) {
            Ok(_) => debug_assert!(false, "slot {slot} released twice"),
            Err(pos) => self.free.insert(pos, slot),
        }
    }

    /// Angle of `slot` in radians.
    pub fn angle(&self, slot: usize) -> f32 {
        slot as f32 * TAU / self.count.max(1) as f32
    }

    /// World position of `slot` on a circle of `radius` around `anchor`, at the
    /// anchor's height.
    pub fn position(&self, slot: usize, anchor: Vec3, radius: f32) -> Vec3 {
        let a = self.angle(slot);
        anchor + Vec3::new(a.cos() * radius, 0.0, a.sin() * radius)
    }
}
