//! Session tuning parameters
//!
//! All tunables are static per session: loaded once at start, validated,
//! then owned read-only by the simulation. A configuration that fails
//! validation aborts the session before the first tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::MeteorKind;

/// Why a configuration was rejected at session start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must be a percentage in [0, 100], got {value}")]
    Percentage { field: &'static str, value: f32 },
    #[error("decay_velocity_factor must be in (0, 1], got {0}")]
    DecayFactor(f32),
    #[error("meteor_range must be positive, got {0}")]
    MeteorRange(f32),
}

/// All tunables for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormConfig {
    // === Input ===
    /// Pointer sensitivity; zero turns pointer steering off
    pub mouse_speed: f32,
    /// Steering force per unit of forward velocity
    pub xy_steering_factor: f32,

    // === Spawning ===
    /// Draws below this percentage become super-accelerators
    pub pct_super_accel: f32,
    /// Cumulative upper bound for accelerator draws (contains the
    /// super-accelerator band)
    pub pct_accel: f32,
    /// Draws above this percentage become super-blocks; zero disables the
    /// band
    pub pct_super_block: f32,
    /// Meteors spawned per unit of forward velocity per tick
    pub meteors_per_unit: f32,
    /// Z distance of the spawn plane
    pub meteor_range: f32,

    // === Contact velocity deltas ===
    pub meteor_super_accel_delta: f32,
    pub meteor_accel_delta: f32,
    pub meteor_block_delta: f32,
    pub meteor_super_block_delta: f32,

    // === Velocity decay ===
    /// Multiplicative decay applied every tick (e.g. 0.998)
    pub decay_velocity_factor: f32,
    /// Flat decay subtracted every tick after the factor
    pub decay_velocity_subtract: f32,
    /// Forward velocity at the start of a run
    pub initial_player_velocity: f32,

    // === Meteor spawn ranges ===
    /// Half-extents for a meteor's standing xy drift (z is ignored)
    pub initial_velocity_range: Vec3,
    /// Half-extents for a meteor's cosmetic spin
    pub initial_torque_range: Vec3,
}

impl Default for StormConfig {
    fn default() -> Self {
        Self {
            mouse_speed: 1.0,
            xy_steering_factor: 0.05,

            pct_super_accel: 2.0,
            pct_accel: 10.0,
            pct_super_block: 97.0,
            meteors_per_unit: 0.05,
            meteor_range: 100.0,

            meteor_super_accel_delta: 6.0,
            meteor_accel_delta: 2.0,
            meteor_block_delta: -1.5,
            meteor_super_block_delta: -5.0,

            decay_velocity_factor: 0.998,
            decay_velocity_subtract: 0.005,
            initial_player_velocity: 20.0,

            initial_velocity_range: Vec3::new(2.0, 2.0, 0.0),
            initial_torque_range: Vec3::new(5.0, 5.0, 5.0),
        }
    }
}

impl StormConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Signed velocity change applied when the player contacts a meteor
    pub fn contact_delta(&self, kind: MeteorKind) -> f32 {
        match kind {
            MeteorKind::SuperAccelerate => self.meteor_super_accel_delta,
            MeteorKind::Accelerate => self.meteor_accel_delta,
            MeteorKind::Block => self.meteor_block_delta,
            MeteorKind::SuperBlock => self.meteor_super_block_delta,
        }
    }

    /// Reject configurations the simulation cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in self.scalar_fields() {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("mouse_speed", self.mouse_speed),
            ("xy_steering_factor", self.xy_steering_factor),
            ("meteors_per_unit", self.meteors_per_unit),
            ("decay_velocity_subtract", self.decay_velocity_subtract),
            ("initial_player_velocity", self.initial_player_velocity),
            ("initial_velocity_range.x", self.initial_velocity_range.x),
            ("initial_velocity_range.y", self.initial_velocity_range.y),
            ("initial_velocity_range.z", self.initial_velocity_range.z),
            ("initial_torque_range.x", self.initial_torque_range.x),
            ("initial_torque_range.y", self.initial_torque_range.y),
            ("initial_torque_range.z", self.initial_torque_range.z),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("pct_super_accel", self.pct_super_accel),
            ("pct_accel", self.pct_accel),
            ("pct_super_block", self.pct_super_block),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Percentage { field, value });
            }
        }

        if !(self.decay_velocity_factor > 0.0 && self.decay_velocity_factor <= 1.0) {
            return Err(ConfigError::DecayFactor(self.decay_velocity_factor));
        }
        if self.meteor_range <= 0.0 {
            return Err(ConfigError::MeteorRange(self.meteor_range));
        }

        if self.pct_accel < self.pct_super_accel {
            // Legal but the accelerator band is empty; worth a breadcrumb.
            log::warn!(
                "pct_accel ({}) below pct_super_accel ({}): no plain accelerators will spawn",
                self.pct_accel,
                self.pct_super_accel
            );
        }

        Ok(())
    }

    fn scalar_fields(&self) -> [(&'static str, f32); 20] {
        [
            ("mouse_speed", self.mouse_speed),
            ("xy_steering_factor", self.xy_steering_factor),
            ("pct_super_accel", self.pct_super_accel),
            ("pct_accel", self.pct_accel),
            ("pct_super_block", self.pct_super_block),
            ("meteors_per_unit", self.meteors_per_unit),
            ("meteor_range", self.meteor_range),
            ("meteor_super_accel_delta", self.meteor_super_accel_delta),
            ("meteor_accel_delta", self.meteor_accel_delta),
            ("meteor_block_delta", self.meteor_block_delta),
            ("meteor_super_block_delta", self.meteor_super_block_delta),
            ("decay_velocity_factor", self.decay_velocity_factor),
            ("decay_velocity_subtract", self.decay_velocity_subtract),
            ("initial_player_velocity", self.initial_player_velocity),
            ("initial_velocity_range.x", self.initial_velocity_range.x),
            ("initial_velocity_range.y", self.initial_velocity_range.y),
            ("initial_velocity_range.z", self.initial_velocity_range.z),
            ("initial_torque_range.x", self.initial_torque_range.x),
            ("initial_torque_range.y", self.initial_torque_range.y),
            ("initial_torque_range.z", self.initial_torque_range.z),
        ]
    }
}
