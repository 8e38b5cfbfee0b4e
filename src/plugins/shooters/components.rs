use std::time::Duration;

use bevy::prelude::*;

/// Shortest allowed gap between shots; guards a zero-length repeating timer.
pub const MIN_LAUNCH_INTERVAL: f32 = 0.05;

/// Per-shooter firing parameters, drawn by the population manager at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShooterConfig {
    /// Launch impulse magnitude.
    pub launch_force: f32,
    /// Degrees of yaw between neighbouring shots of a fan.
    pub spread_angle: f32,
    /// Seconds between shots.
    pub launch_interval: f32,
    /// Continuous acceleration given to launched projectiles.
    pub acceleration: f32,
    /// Seconds before the first shot.
    pub start_delay: f32,
    /// Spawn height above the shooter; also drives the predicted arc.
    pub height_offset: f32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            launch_force: 15.0,
            spread_angle: 10.0,
            launch_interval: 1.0,
            acceleration: 2.0,
            start_delay: 2.0,
            height_offset: 0.0,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Shooter {
    pub config: ShooterConfig,
    /// Aim point; `None` holds fire.
    pub target: Option<Entity>,
    pub shots_fired: u32,
}

impl Shooter {
    pub fn new(config: ShooterConfig, target: Option<Entity>) -> Self {
        Self { config, target, shots_fired: 0 }
    }
}

/// Shooting loop: wait out the start delay, then fire every launch interval.
#[derive(Component, Debug, Clone)]
pub enum FireRoutine {
    Warmup(Timer),
    Firing(Timer),
}

impl FireRoutine {
    pub fn new(config: &ShooterConfig) -> Self {
        Self::Warmup(Timer::from_seconds(config.start_delay.max(0.0), TimerMode::Once))
    }

    /// Advance by `delta`; returns how many shots are due.
    ///
    /// Warmup completion fires once and starts the repeating interval.
    pub fn tick(&mut self, delta: Duration, config: &ShooterConfig) -> u32 {
        match self {
            Self::Warmup(timer) => {
                timer.tick(delta);
                if timer.is_finished() {
                    *self = Self::Firing(Timer::from_seconds(
                        config.launch_interval.max(MIN_LAUNCH_INTERVAL),
                        TimerMode::Repeating,
                    ));
                    1
                } else {
                    0
                }
            }
            Self::Firing(timer) => {
                timer.tick(delta);
                timer.times_finished_this_tick()
            }
        }
    }

    #[inline]
    pub fn is_firing(&self) -> bool {
        matches!(self, Self::Firing(_))
    }
}

/// Sampled predicted flight path, refreshed each frame for the aim line.
#[derive(Component, Debug, Clone, Default)]
pub struct TrajectoryPath {
    pub points: Vec<Vec3>,
    pub velocity: Vec3,
}
