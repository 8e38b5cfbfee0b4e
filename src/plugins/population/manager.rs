//! Population bookkeeping: which shooters are alive, when to add or retire one,
//! and where new ones go.
//!
//! The manager decides; a [`PopulationHost`] carries the decisions out. The ECS
//! host spawns and despawns entities, tests plug in a recorder.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::{PolicyKind, PopulationTunables};
use crate::plugins::shooters::components::ShooterConfig;

use super::level::{Level, LevelRanges};
use super::roster::{Roster, RosterEntry};
use super::slots::SlotPool;

/// Where and how to place a new shooter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOrder {
    pub position: Vec3,
    pub config: ShooterConfig,
}

/// Instantiates and retires shooters on the manager's behalf.
pub trait PopulationHost {
    fn spawn(&mut self, order: &SpawnOrder) -> Entity;
    fn retire(&mut self, shooter: Entity);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopulationPolicy {
    /// Hold the count inside `[floor, max]`, adding or retiring one shooter per
    /// cycle on a fixed ring of slots.
    ContinuousChurn {
        floor: usize,
        max: usize,
        min_lifetime: f32,
        add_chance: f64,
        level: Level,
    },
    /// Retire everyone each cycle, step the level, and spawn a fresh wave at
    /// random spots inside the radius.
    ///
    /// The opening wave spawns at the starting level as soon as the session
    /// begins; the level first advances one interval later.
    LevelCycling { per_level: usize, level: Level },
}

impl PopulationPolicy {
    pub fn level(&self) -> Level {
        match self {
            Self::ContinuousChurn { level, .. } | Self::LevelCycling { level, .. } => *level,
        }
    }
}

/// What one cycle did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub spawned: Vec<Entity>,
    pub retired: Vec<RosterEntry>,
    pub level: Option<Level>,
}

#[derive(Resource, Debug, Clone)]
pub struct PopulationManager {
    policy: PopulationPolicy,
    timer: Timer,
    roster: Roster,
    slots: SlotPool,
    ranges: LevelRanges,
    radius: f32,
    /// The first cycle runs on the first tick instead of one full interval in.
    opening: bool,
}

impl PopulationManager {
    pub fn new(policy: PopulationPolicy, interval: f32, slots: usize, radius: f32, ranges: LevelRanges) -> Self {
        Self {
            policy,
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            roster: Roster::default(),
            slots: SlotPool::new(slots),
            ranges,
            radius,
            opening: true,
        }
    }

    pub fn from_tunables(t: &PopulationTunables) -> Self {
        let level = Level::new(t.starting_level);
        match t.policy {
            PolicyKind::ContinuousChurn => Self::new(
                PopulationPolicy::ContinuousChurn {
                    floor: t.floor,
                    max: t.max,
                    min_lifetime: t.min_lifetime,
                    add_chance: t.add_chance,
                    level,
                },
                t.spawn_interval,
                t.max,
                t.spawn_radius,
                t.ranges.clone(),
            ),
            PolicyKind::LevelCycling => Self::new(
                PopulationPolicy::LevelCycling { per_level: t.shooters_per_level, level },
                t.level_interval,
                t.max,
                t.spawn_radius,
                t.ranges.clone(),
            ),
        }
    }

    pub fn policy(&self) -> &PopulationPolicy {
        &self.policy
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn slots(&self) -> &SlotPool {
        &self.slots
    }

    pub fn level(&self) -> Level {
        self.policy.level()
    }

    pub fn interval(&self) -> f32 {
        self.timer.duration().as_secs_f32()
    }

    /// Advance the cycle clock; returns how many cycles are due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta);
        self.timer.times_finished_this_tick() + u32::from(self.opening)
    }

    /// Run one cycle around `anchor`, the current target position.
    ///
    /// Every live shooter ages by one interval first. The opening cycle ages
    /// nobody and, under level cycling, keeps the starting level.
    pub fn run_cycle<R: Rng + ?Sized>(
        &mut self,
        anchor: Option<Vec3>,
        rng: &mut R,
        host: &mut impl PopulationHost,
    ) -> CycleReport {
        let opening = std::mem::take(&mut self.opening);
        if !opening {
            self.roster.advance(self.interval());
        }
        let mut report = CycleReport::default();

        match self.policy.clone() {
            PopulationPolicy::ContinuousChurn { floor, max, min_lifetime, add_chance, level } => {
                if self.roster.len() < floor {
                    while self.roster.len() < floor {
                        if !self.add_at_slot(anchor, level, rng, host, &mut report) {
                            break;
                        }
                    }
                    return report;
                }

                let count = self.roster.len();
                let add = count < max && (count <= floor || rng.gen_bool(add_chance.clamp(0.0, 1.0)));
                if add {
                    self.add_at_slot(anchor, level, rng, host, &mut report);
                } else if count > floor {
                    self.retire_eligible(min_lifetime, rng, host, &mut report);
                }
            }
            PopulationPolicy::LevelCycling { per_level, level } => {
                for entry in self.roster.drain() {
                    if let Some(slot) = entry.slot {
                        self.slots.release(slot);
                    }
                    host.retire(entry.shooter);
                    report.retired.push(entry);
                }

                let level = if opening { level } else { level.next() };
                if let PopulationPolicy::LevelCycling { level: current, .. } = &mut self.policy {
                    *current = level;
                }
                report.level = Some(level);
                info!("Population level {}: spawning {per_level} shooters", level.get());

                for _ in 0..per_level {
                    let Some(anchor) = anchor else {
                        warn!("No target to place shooters around; wave skipped");
                        break;
                    };
                    let angle = rng.gen_range(0.0..TAU);
                    let distance = if self.radius > 0.0 && self.radius.is_finite() {
                        rng.gen_range(0.0..self.radius)
                    } else {
                        0.0
                    };
                    let order = SpawnOrder {
                        position: anchor + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance),
                        config: self.ranges.roll(level, rng),
                    };
                    let shooter = host.spawn(&order);
                    self.roster.register(shooter, None);
                    report.spawned.push(shooter);
                }
            }
        }

        report
    }

    fn add_at_slot<R: Rng + ?Sized>(
        &mut self,
        anchor: Option<Vec3>,
        level: Level,
        rng: &mut R,
        host: &mut impl PopulationHost,
        report: &mut CycleReport,
    ) -> bool {
        let Some(anchor) = anchor else {
            warn!("No target to place shooters around; spawn skipped");
            return false;
        };
        let Some(slot) = self.slots.take(rng) else {
            warn!("No free spawn slot; spawn skipped");
            return false;
        };

        let order = SpawnOrder {
            position: self.slots.position(slot, anchor, self.radius),
            config: self.ranges.roll(level, rng),
        };
        let shooter = host.spawn(&order);
        self.roster.register(shooter, Some(slot));
        report.spawned.push(shooter);
        debug!("Shooter {shooter} placed in slot {slot} ({} live)", self.roster.len());
        true
    }

    fn retire_eligible<R: Rng + ?Sized>(
        &mut self,
        min_lifetime: f32,
        rng: &mut R,
        host: &mut impl PopulationHost,
        report: &mut CycleReport,
    ) {
        let eligible: Vec<Entity> = self.roster.eligible(min_lifetime).map(|e| e.shooter).collect();
        if eligible.is_empty() {
            debug!("No shooter old enough to retire");
            return;
        }

        let shooter = eligible[rng.gen_range(0..eligible.len())];
        let Some(entry) = self.roster.remove(shooter) else {
            return;
        };
        if let Some(slot) = entry.slot {
            self.slots.release(slot);
        }
        host.retire(shooter);
        debug!("Shooter {shooter} retired after {:.1}s ({} live)", entry.lifetime, self.roster.len());
        report.retired.push(entry);
    }
}
