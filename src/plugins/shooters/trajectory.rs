//! Launch velocity and predicted flight path for the aim line.
//!
//! The vertical launch speed comes from the shooter's height offset,
//! `sqrt(-2 * g * h)`, not from the height difference to the target, so the path
//! only lands on targets level with the shooter. The horizontal speed is
//! `horizontal_distance / cos(angle)`, applied along the full (normalized)
//! displacement. The result is a believable arc for display; projectiles in flight
//! follow physics and thrust and may drift from it.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySolver {
    pub launch_angle_deg: f32,
    pub steps: usize,
    pub time_step: f32,
    /// Sampling stops at the first point within this distance of the target.
    pub arrival_threshold: f32,
}

impl Default for TrajectorySolver {
    fn default() -> Self {
        Self { launch_angle_deg: 45.0, steps: 50, time_step: 0.1, arrival_threshold: 0.1 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub velocity: Vec3,
    pub path: Vec<Vec3>,
}

impl TrajectorySolver {
    /// `sqrt(-2 * gravity_y * height_offset)`, or zero when the radicand is not positive.
    pub fn vertical_speed(gravity_y: f32, height_offset: f32) -> f32 {
        let radicand = -2.0 * gravity_y * height_offset;
        if radicand > 0.0 && radicand.is_finite() {
            radicand.sqrt()
        } else {
            0.0
        }
    }

    pub fn horizontal_speed(&self, horizontal_distance: f32) -> f32 {
        let cos = self.launch_angle_deg.to_radians().cos();
        if cos <= 1e-4 {
            return 0.0;
        }
        horizontal_distance / cos
    }

    pub fn launch_velocity(&self, start: Vec3, target: Vec3, gravity_y: f32, height_offset: f32) -> Vec3 {
        let displacement = target - start;
        let horizontal = Vec3::new(displacement.x, 0.0, displacement.z).length();

        let vy = Self::vertical_speed(gravity_y, height_offset);
        let vh = self.horizontal_speed(horizontal);

        displacement.normalize_or_zero() * vh + Vec3::Y * vy
    }

    /// Ballistic position `t` seconds after leaving `start`.
    #[inline]
    pub fn position_at(start: Vec3, velocity: Vec3, gravity: Vec3, t: f32) -> Vec3 {
        start + velocity * t + 0.5 * gravity * t * t
    }

    pub fn solve(&self, start: Vec3, target: Vec3, gravity_y: f32, height_offset: f32) -> Trajectory {
        let velocity = self.launch_velocity(start, target, gravity_y, height_offset);
        let gravity = Vec3::new(0.0, gravity_y, 0.0);
        let threshold_sq = self.arrival_threshold * self.arrival_threshold;

        let mut path = Vec::with_capacity(self.steps);
        for i in 0..self.steps {
            let p = Self::position_at(start, velocity, gravity, i as f32 * self.time_step);
            path.push(p);
            if (p - target).length_squared() < threshold_sq {
                break;
            }
        }

        Trajectory { velocity, path }
    }
}

/// Heading for an emitter facing `direction`, pitched by the fixed 90° model offset.
///
/// `None` when `direction` has no usable length.
pub fn emitter_heading(direction: Vec3) -> Option<Quat> {
    if direction.length_squared() < 1e-8 {
        return None;
    }
    let up = if direction.normalize().abs_diff_eq(Vec3::Y, 1e-4)
        || direction.normalize().abs_diff_eq(Vec3::NEG_Y, 1e-4)
    {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let look = Transform::IDENTITY.looking_to(direction, up).rotation;
    Some(look * Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
}

/// Slerp `current` toward `goal` by `rate * dt`, clamped to a full step.
#[inline]
pub fn turn_towards(current: Quat, goal: Quat, rate: f32, dt: f32) -> Quat {
    current.slerp(goal, (rate * dt).clamp(0.0, 1.0))
}
