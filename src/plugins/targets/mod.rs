//! Targets plugin: the aim point shooters fire at, oscillating between waypoints with
//! accelerating speed.
//!
//! ```text
//!   FixedUpdate: speed = min(speed + rate*dt, max)
//!                pos   = move_towards(pos, waypoint, speed*dt)
//!                |pos - waypoint| < epsilon  →  next waypoint, flip direction
//! ```
//!
//! The kinematics are plain data on [`Oscillator`] so they can be stepped without an
//! app; the system only copies positions in and out of `Transform`.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use serde::Deserialize;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

/// Marker for the entity shooters aim at.
#[derive(Component, Debug, Clone, Copy)]
pub struct Target;

/// How the waypoints are derived from the start position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoverLayout {
    /// A = start, B = `drop` units straight below; A ↔ B.
    PingPong { drop: f32 },
    /// A = start, B = `below_fraction` of the start height lower, C = `above_fraction`
    /// higher; A → B → C → A.
    Anchored { below_fraction: f32, above_fraction: f32 },
}

impl MoverLayout {
    pub fn waypoints(self, anchor: Vec3) -> Vec<Vec3> {
        match self {
            Self::PingPong { drop } => vec![anchor, anchor - Vec3::Y * drop],
            Self::Anchored { below_fraction, above_fraction } => {
                let height = anchor.y;
                vec![
                    anchor,
                    anchor - Vec3::Y * (height * below_fraction),
                    anchor + Vec3::Y * (height * above_fraction),
                ]
            }
        }
    }
}

/// Speed that ramps from `initial` to `max` at `rate` per second and never drops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedRamp {
    current: f32,
    max: f32,
    rate: f32,
}

impl SpeedRamp {
    pub fn new(initial: f32, max: f32, rate: f32) -> Self {
        let max = max.max(initial);
        Self { current: initial, max, rate: rate.max(0.0) }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.current = (self.current + self.rate * dt).min(self.max);
        self.current
    }
}

/// Step `from` toward `to` by at most `max_step`, never overshooting.
#[inline]
pub fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist <= f32::EPSILON {
        to
    } else {
        from + delta / dist * max_step
    }
}

#[derive(Component, Debug, Clone)]
pub struct Oscillator {
    waypoints: Vec<Vec3>,
    target: usize,
    forward: bool,
    speed: SpeedRamp,
    epsilon: f32,
}

impl Oscillator {
    /// Starts heading for the second waypoint.
    pub fn new(waypoints: Vec<Vec3>, speed: SpeedRamp, epsilon: f32) -> Self {
        debug_assert!(
            (2..=3).contains(&waypoints.len()),
            "oscillator needs two or three waypoints"
        );
        Self { waypoints, target: 1, forward: true, speed, epsilon }
    }

    pub fn from_layout(layout: MoverLayout, anchor: Vec3, speed: SpeedRamp, epsilon: f32) -> Self {
        Self::new(layout.waypoints(anchor), speed, epsilon)
    }

    #[inline]
    pub fn target_point(&self) -> Vec3 {
        self.waypoints[self.target]
    }

    #[inline]
    pub fn target_index(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn forward(&self) -> bool {
        self.forward
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed.current()
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Advance one tick from `position`; returns the new position.
    pub fn step(&mut self, position: Vec3, dt: f32) -> Vec3 {
        let speed = self.speed.advance(dt);
        let next = move_towards(position, self.target_point(), speed * dt);

        if next.distance(self.target_point()) < self.epsilon {
            self.target = (self.target + 1) % self.waypoints.len();
            self.forward = !self.forward;
        }

        next
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_target)
        .add_systems(
            FixedUpdate,
            move_targets.run_if(in_state(GameState::InGame)),
        );
}

fn spawn_target(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.target;
    let anchor = Vec3::from_array(t.start);

    commands.spawn((
        Name::new("Target"),
        Target,
        Oscillator::from_layout(
            t.layout,
            anchor,
            SpeedRamp::new(t.initial_speed, t.max_speed, t.speed_rate),
            t.arrival_epsilon,
        ),
        Transform::from_translation(anchor),
        RigidBody::Kinematic,
        Collider::sphere(t.radius),
        CollisionLayers::new(Layer::Target, [Layer::Bullet]),
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn move_targets(time: Res<Time<Fixed>>, mut q: Query<(&mut Oscillator, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut osc, mut tf) in &mut q {
        tf.translation = osc.step(tf.translation, dt);
    }
}
