//! Difficulty levels and the per-level ranges shooter configurations are drawn from.

use rand::Rng;
use serde::Deserialize;

use crate::plugins::shooters::components::{ShooterConfig, MIN_LAUNCH_INTERVAL};

/// Difficulty level, cycling `1 → 2 → 3 → 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level(u8);

impl Level {
    pub const COUNT: u8 = 3;

    /// Out-of-range values clamp into `1..=3`.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, Self::COUNT))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-level tables.
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 % Self::COUNT + 1)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

/// One tunable: a base value per level, widened by `±jitter`.
///
/// Zero jitter makes the value fixed for the level.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LevelRange {
    pub base: [f32; 3],
    pub jitter: f32,
    /// Lower bound applied after sampling.
    #[serde(default)]
    pub floor: Option<f32>,
}

impl LevelRange {
    pub const fn new(base: [f32; 3], jitter: f32) -> Self {
        Self { base, jitter, floor: None }
    }

    pub const fn with_floor(mut self, floor: f32) -> Self {
        self.floor = Some(floor);
        self
    }

    /// First value that cannot be sampled from: a non-finite base, jitter or
    /// floor, a negative jitter, or a base whose `±jitter` span overflows.
    pub fn invalid_value(&self) -> Option<f32> {
        self.base
            .iter()
            .copied()
            .chain(std::iter::once(self.jitter))
            .chain(self.floor)
            .find(|v| !v.is_finite())
            .or((self.jitter < 0.0).then_some(self.jitter))
            .or_else(|| {
                self.base.iter().copied().find(|&base| {
                    let (lo, hi) = (base - self.jitter, base + self.jitter);
                    !(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite())
                })
            })
    }

    /// Largest value `sample` can return for `level`.
    pub fn upper(&self, level: Level) -> f32 {
        let hi = self.base[level.index()] + self.jitter.max(0.0);
        match self.floor {
            Some(floor) => hi.max(floor),
            None => hi,
        }
    }

    /// Draw for `level`. A jitter too small to widen the base (relative to its
    /// magnitude), or one whose span overflows, yields the base itself.
    pub fn sample<R: Rng + ?Sized>(&self, level: Level, rng: &mut R) -> f32 {
        let base = self.base[level.index()];
        let (lo, hi) = (base - self.jitter, base + self.jitter);
        let value = if self.jitter > 0.0 && lo < hi && (hi - lo).is_finite() {
            rng.gen_range(lo..hi)
        } else {
            base
        };
        match self.floor {
            Some(floor) => value.max(floor),
            None => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelRanges {
    pub launch_force: LevelRange,
    pub spread_angle: LevelRange,
    pub launch_interval: LevelRange,
    pub acceleration: LevelRange,
    pub start_delay: LevelRange,
    pub height_offset: LevelRange,
}

impl Default for LevelRanges {
    fn default() -> Self {
        Self {
            launch_force: LevelRange::new([10.0, 20.0, 30.0], 5.0),
            spread_angle: LevelRange::new([5.0, 15.0, 25.0], 5.0),
            launch_interval: LevelRange::new([0.5, 1.0, 1.5], 0.2).with_floor(MIN_LAUNCH_INTERVAL),
            acceleration: LevelRange::new([3.0, 6.0, 10.0], 2.0),
            start_delay: LevelRange::new([1.0, 2.0, 3.0], 0.5).with_floor(0.0),
            height_offset: LevelRange::new([0.0, 1.0, 2.0], 0.5),
        }
    }
}

impl LevelRanges {
    /// Every range with its config key, for validation.
    pub fn named(&self) -> [(&'static str, &LevelRange); 6] {
        [
            ("population.ranges.launch_force", &self.launch_force),
            ("population.ranges.spread_angle", &self.spread_angle),
            ("population.ranges.launch_interval", &self.launch_interval),
            ("population.ranges.acceleration", &self.acceleration),
            ("population.ranges.start_delay", &self.start_delay),
            ("population.ranges.height_offset", &self.height_offset),
        ]
    }

    /// Draw a fresh configuration for `level`.
    pub fn roll<R: Rng + ?Sized>(&self, level: Level, rng: &mut R) -> ShooterConfig {
        ShooterConfig {
            launch_force: self.launch_force.sample(level, rng),
            spread_angle: self.spread_angle.sample(level, rng),
            launch_interval: self.launch_interval.sample(level, rng),
            acceleration: self.acceleration.sample(level, rng),
            start_delay: self.start_delay.sample(level, rng),
            height_offset: self.height_offset.sample(level, rng),
        }
    }
}
