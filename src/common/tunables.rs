//! Tunable gameplay constants.
//!
//! [`Tunables`] is a Bevy [`Resource`] holding every authoring-time number the
//! gallery uses. `Tunables::default()` is the authoritative default; a TOML file
//! (see [`TUNABLES_PATH`]) may override any subset of keys, missing keys keep
//! their defaults.

use std::path::Path;
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::common::error::{ConfigError, ConfigResult};
use crate::plugins::population::level::{Level, LevelRanges};
use crate::plugins::projectiles::components::{ProjectileKind, ProjectileTemplate};
use crate::plugins::projectiles::selector::WeightedSelector;
use crate::plugins::targets::MoverLayout;

/// Where the full app looks for overrides.
pub const TUNABLES_PATH: &str = "assets/gallery.toml";

/// Upper bound on sampled trajectory points per frame.
pub const MAX_PATH_STEPS: usize = 10_000;

#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub world: WorldTunables,
    pub target: TargetTunables,
    pub projectiles: ProjectileTunables,
    pub shooter: ShooterTunables,
    pub population: PopulationTunables,
    pub player: PlayerTunables,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldTunables {
    pub gravity_y: f32,
    pub ground_half_extent: f32,
}

impl Default for WorldTunables {
    fn default() -> Self {
        Self { gravity_y: -9.81, ground_half_extent: 40.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetTunables {
    pub start: [f32; 3],
    pub layout: MoverLayout,
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed gained per second until `max_speed`.
    pub speed_rate: f32,
    pub arrival_epsilon: f32,
    pub radius: f32,
}

impl Default for TargetTunables {
    fn default() -> Self {
        Self {
            start: [0.0, 12.0, 0.0],
            layout: MoverLayout::PingPong { drop: 10.0 },
            initial_speed: 2.0,
            max_speed: 5.0,
            speed_rate: 0.1,
            arrival_epsilon: 0.1,
            radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileTunables {
    /// Launch candidates, in selection order.
    pub templates: Vec<ProjectileTemplate>,
    /// Projectiles below this height are spent.
    pub ground_threshold: f32,
    pub danger_health_damage: i32,
    pub danger_armor_damage: i32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        let template = |kind, launch_weight| ProjectileTemplate {
            kind,
            launch_weight,
            radius: 0.25,
            mass: 1.0,
        };

        Self {
            templates: vec![
                template(ProjectileKind::Attack, 0.5),
                template(ProjectileKind::Defense, 0.5),
                template(ProjectileKind::Health, 0.2),
                template(ProjectileKind::Armor, 0.2),
                template(ProjectileKind::Danger, 0.3),
            ],
            ground_threshold: 0.0,
            danger_health_damage: 10,
            danger_armor_damage: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShooterTunables {
    pub launch_angle_deg: f32,
    pub path_steps: usize,
    pub path_time_step: f32,
    pub path_arrival_threshold: f32,
    pub line_width: f32,
    /// Heading slerp rate, per second.
    pub turn_rate: f32,
    /// Shots per spread fan; each fan sweeps `-(n/2)..=(n/2)` spread steps.
    /// `1` fires every shot straight at the target.
    pub fan_size: u32,
    pub body_radius: f32,
}

impl Default for ShooterTunables {
    fn default() -> Self {
        Self {
            launch_angle_deg: 45.0,
            path_steps: 50,
            path_time_step: 0.1,
            path_arrival_threshold: 0.1,
            line_width: 0.05,
            turn_rate: 5.0,
            fan_size: 1,
            body_radius: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    ContinuousChurn,
    LevelCycling,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopulationTunables {
    pub policy: PolicyKind,
    /// Minimum live shooters once the population has filled.
    pub floor: usize,
    /// Maximum live shooters; also the number of angular spawn slots.
    pub max: usize,
    pub spawn_interval: f32,
    pub min_lifetime: f32,
    pub spawn_radius: f32,
    /// Chance of adding (rather than removing) above the floor.
    pub add_chance: f64,
    pub level_interval: f32,
    pub shooters_per_level: usize,
    pub starting_level: u8,
    pub ranges: LevelRanges,
}

impl Default for PopulationTunables {
    fn default() -> Self {
        Self {
            policy: PolicyKind::ContinuousChurn,
            floor: 2,
            max: 5,
            spawn_interval: 5.0,
            min_lifetime: 15.0,
            spawn_radius: 20.0,
            add_chance: 0.5,
            level_interval: 30.0,
            shooters_per_level: 3,
            starting_level: 1,
            ranges: LevelRanges::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTunables {
    pub health: i32,
    pub armor: i32,
    pub position: [f32; 3],
    /// Shield sits this far in front of the player, toward -Z.
    pub shield_distance: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self { health: 100, armor: 50, position: [0.0, 1.6, 0.0], shield_distance: 0.6 }
    }
}

impl Tunables {
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let tunables: Self = toml::from_str(contents)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load overrides from `path`, falling back to defaults.
    ///
    /// A missing file is not an error; a malformed or invalid one is logged and ignored.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found; using compiled defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(tunables) => {
                info!("Loaded tunables from {}", path.display());
                tunables
            }
            Err(e) => {
                warn!("{e}; using compiled defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let pop = &self.population;
        if pop.max == 0 {
            return Err(ConfigError::Invalid {
                field: "population.max",
                value: 0.0,
                expected: "at least one spawn slot",
            });
        }
        if pop.floor > pop.max {
            return Err(ConfigError::PopulationBounds { floor: pop.floor, max: pop.max });
        }
        interval("population.spawn_interval", pop.spawn_interval)?;
        if !(pop.spawn_radius >= 0.0 && pop.spawn_radius.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "population.spawn_radius",
                value: pop.spawn_radius,
                expected: "a finite, non-negative distance",
            });
        }
        for (field, range) in pop.ranges.named() {
            if let Some(value) = range.invalid_value() {
                return Err(ConfigError::Invalid {
                    field,
                    value,
                    expected: "finite base and floor with a finite, non-negative jitter",
                });
            }
        }
        for (field, range) in [
            ("population.ranges.launch_interval", &pop.ranges.launch_interval),
            ("population.ranges.start_delay", &pop.ranges.start_delay),
        ] {
            for level in 1..=Level::COUNT {
                let upper = range.upper(Level::new(level));
                if Duration::try_from_secs_f32(upper.max(0.0)).is_err() {
                    return Err(ConfigError::Invalid {
                        field,
                        value: upper,
                        expected: "an interval that fits in a Duration",
                    });
                }
            }
        }
        interval("population.level_interval", pop.level_interval)?;
        if !(0.0..=1.0).contains(&pop.add_chance) {
            return Err(ConfigError::Invalid {
                field: "population.add_chance",
                value: pop.add_chance as f32,
                expected: "a probability in [0, 1]",
            });
        }
        if !(1..=3).contains(&pop.starting_level) {
            return Err(ConfigError::Invalid {
                field: "population.starting_level",
                value: f32::from(pop.starting_level),
                expected: "a level in 1..=3",
            });
        }

        let angle = self.shooter.launch_angle_deg;
        if !(angle > 0.0 && angle < 90.0) {
            return Err(ConfigError::Invalid {
                field: "shooter.launch_angle_deg",
                value: angle,
                expected: "an angle in (0, 90) degrees",
            });
        }
        positive("shooter.path_time_step", self.shooter.path_time_step)?;
        if self.shooter.path_steps > MAX_PATH_STEPS {
            return Err(ConfigError::Invalid {
                field: "shooter.path_steps",
                value: self.shooter.path_steps as f32,
                expected: "at most 10000 samples",
            });
        }

        if self.target.max_speed < self.target.initial_speed {
            return Err(ConfigError::Invalid {
                field: "target.max_speed",
                value: self.target.max_speed,
                expected: "at least target.initial_speed",
            });
        }

        for (field, damage) in [
            ("projectiles.danger_health_damage", self.projectiles.danger_health_damage),
            ("projectiles.danger_armor_damage", self.projectiles.danger_armor_damage),
        ] {
            if damage < 0 {
                return Err(ConfigError::Invalid {
                    field,
                    value: damage as f32,
                    expected: "a non-negative amount",
                });
            }
        }

        positive("target.radius", self.target.radius)?;
        for template in &self.projectiles.templates {
            positive("projectiles.templates.mass", template.mass)?;
            positive("projectiles.templates.radius", template.radius)?;
        }
        WeightedSelector::new(
            self.projectiles
                .templates
                .iter()
                .map(|t| (t.kind, t.launch_weight))
                .collect(),
        )?;

        Ok(())
    }

    pub fn gravity(&self) -> Vec3 {
        Vec3::new(0.0, self.world.gravity_y, 0.0)
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, value, expected: "a positive number" })
    }
}

/// Positive, and small enough to drive a [`Timer`].
fn interval(field: &'static str, value: f32) -> ConfigResult<()> {
    positive(field, value)?;
    match Duration::try_from_secs_f32(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ConfigError::Invalid {
            field,
            value,
            expected: "an interval that fits in a Duration",
        }),
    }
}
