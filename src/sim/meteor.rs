//! A single meteor drifting toward the camera
//!
//! Meteors carry their own randomized xy drift ("standing velocity") on top
//! of the shared relative motion against the player. They never read the
//! run state; the tick hands them the published velocity and steering.

use glam::Vec3;
use rand::Rng;

use super::state::MeteorKind;
use crate::config::StormConfig;
use crate::consts::BEHIND_CAMERA_Z;
use crate::uniform_spread;

/// One spawned obstacle
#[derive(Debug, Clone)]
pub struct Meteor {
    pub id: u32,
    pub kind: MeteorKind,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Own xy drift, fixed at spawn; meteors have no z drift of their own
    pub standing_velocity: Vec3,
    /// Cosmetic angular velocity; never read by simulation logic
    pub spin: Vec3,
}

impl Meteor {
    /// Spawn at `pos`, sampling drift and spin from the configured ranges
    ///
    /// The initial velocity is the full relative velocity, so the meteor
    /// moves at the correct combined speed from its first frame instead of
    /// ramping in.
    pub fn spawn<R: Rng>(
        id: u32,
        kind: MeteorKind,
        pos: Vec3,
        player_velocity: f32,
        steering: Vec3,
        cfg: &StormConfig,
        rng: &mut R,
    ) -> Self {
        let standing_velocity = Vec3::new(
            uniform_spread(rng, cfg.initial_velocity_range.x),
            uniform_spread(rng, cfg.initial_velocity_range.y),
            0.0,
        );
        let spin = Vec3::new(
            uniform_spread(rng, cfg.initial_torque_range.x),
            uniform_spread(rng, cfg.initial_torque_range.y),
            uniform_spread(rng, cfg.initial_torque_range.z),
        );

        let mut meteor = Self {
            id,
            kind,
            pos,
            vel: Vec3::ZERO,
            standing_velocity,
            spin,
        };
        meteor.vel = meteor.drift_velocity(player_velocity, steering);
        meteor
    }

    /// Relative velocity against the player's forward speed and steering
    ///
    /// Assigned directly every tick; drift is kinematic, not a force.
    pub fn drift_velocity(&self, player_velocity: f32, steering: Vec3) -> Vec3 {
        Vec3::new(0.0, 0.0, -player_velocity) - Vec3::new(steering.x, steering.y, 0.0)
            + self.standing_velocity
    }

    /// True once the meteor has passed behind the camera plane
    pub fn behind_camera(&self) -> bool {
        self.pos.z < BEHIND_CAMERA_Z
    }
}
