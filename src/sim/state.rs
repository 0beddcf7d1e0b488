//! Run state and core simulation types
//!
//! One `SimState` value owns all truth for a run. There is no global
//! session state: restarting means constructing a fresh instance.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::barrier::Barrier;
use super::meteor::Meteor;
use crate::config::StormConfig;

/// The four meteor categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorKind {
    SuperAccelerate,
    Accelerate,
    Block,
    SuperBlock,
}

impl MeteorKind {
    /// Category tag as carried by contact notifications
    pub fn tag(self) -> &'static str {
        match self {
            MeteorKind::SuperAccelerate => "SuperAccelerate",
            MeteorKind::Accelerate => "Accelerate",
            MeteorKind::Block => "Block",
            MeteorKind::SuperBlock => "SuperBlock",
        }
    }

    /// Parse a contact tag; unknown tags yield `None`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SuperAccelerate" => Some(MeteorKind::SuperAccelerate),
            "Accelerate" => Some(MeteorKind::Accelerate),
            "Block" => Some(MeteorKind::Block),
            "SuperBlock" => Some(MeteorKind::SuperBlock),
            _ => None,
        }
    }
}

/// Contact flags, one per meteor category
///
/// Categories are independent: several can be raised between two ticks.
/// Resolution selects the highest-priority raised flag and clears only that
/// one; the rest stay raised until they are themselves selected on a later
/// tick. Lower-priority contacts therefore land late rather than being
/// dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitFlags {
    pub super_accel: bool,
    pub accel: bool,
    pub block: bool,
    pub super_block: bool,
}

impl HitFlags {
    /// Raise the flag for a category; repeated contacts per category
    /// collapse into one
    pub fn raise(&mut self, kind: MeteorKind) {
        match kind {
            MeteorKind::SuperAccelerate => self.super_accel = true,
            MeteorKind::Accelerate => self.accel = true,
            MeteorKind::Block => self.block = true,
            MeteorKind::SuperBlock => self.super_block = true,
        }
    }

    /// Select and clear the highest-priority raised flag
    ///
    /// Priority: super-accel > accel > block > super-block.
    pub fn take_highest(&mut self) -> Option<MeteorKind> {
        if self.super_accel {
            self.super_accel = false;
            Some(MeteorKind::SuperAccelerate)
        } else if self.accel {
            self.accel = false;
            Some(MeteorKind::Accelerate)
        } else if self.block {
            self.block = false;
            Some(MeteorKind::Block)
        } else if self.super_block {
            self.super_block = false;
            Some(MeteorKind::SuperBlock)
        } else {
            None
        }
    }

    /// Any flag currently raised
    pub fn any(self) -> bool {
        self.super_accel || self.accel || self.block || self.super_block
    }
}

/// Cumulative classification thresholds built from the spawn percentages
///
/// Bands are checked in order: a draw below `super_accel_below` is a
/// super-accelerator, below `accel_below` an accelerator (the bound is
/// cumulative, so it contains the super-accelerator band), above
/// `super_block_above` a super-block, and anything left over a block.
#[derive(Debug, Clone, Copy)]
pub struct SpawnTable {
    super_accel_below: f32,
    accel_below: f32,
    /// `None` when the configured percentage is zero: the band is disabled
    /// instead of swallowing every remaining draw.
    super_block_above: Option<f32>,
}

impl SpawnTable {
    pub fn new(cfg: &StormConfig) -> Self {
        Self {
            super_accel_below: cfg.pct_super_accel / 100.0,
            accel_below: cfg.pct_accel / 100.0,
            super_block_above: (cfg.pct_super_block > 0.0).then(|| cfg.pct_super_block / 100.0),
        }
    }

    /// Classify a uniform draw from [0, 1)
    pub fn classify(&self, r: f32) -> MeteorKind {
        if r < self.super_accel_below {
            MeteorKind::SuperAccelerate
        } else if r < self.accel_below {
            MeteorKind::Accelerate
        } else if self.super_block_above.is_some_and(|threshold| r > threshold) {
            MeteorKind::SuperBlock
        } else {
            MeteorKind::Block
        }
    }
}

/// Complete state for one run (deterministic)
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session tuning, fixed for the life of the run
    pub cfg: StormConfig,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Forward velocity, never negative
    pub player_velocity: f32,
    /// Fastest speed this run
    pub max_velocity: f32,
    /// Current lateral steering vector (z always 0)
    pub steering: Vec3,
    /// Did steering change since the previous tick
    pub steering_changed: bool,
    /// Previous minus current steering, updated on change
    pub steering_delta: Vec3,
    /// Raised contact flags awaiting resolution
    pub hits: HitFlags,
    /// Set once forward velocity reaches zero; never unset
    pub game_over: bool,
    /// Tick at which the run ended; freezes the displayed clock
    pub stopped_at: Option<u64>,
    /// Live meteor field, in spawn order
    pub meteors: Vec<Meteor>,
    pub(crate) spawn_table: SpawnTable,
    pub(crate) barrier: Barrier,
    pub(crate) rng: Pcg32,
    pub(crate) meteor_fraction: f32,
    pub(crate) prev_steering: Vec3,
    next_id: u32,
}

impl SimState {
    /// Start a run from validated tuning and a seed
    pub fn new(cfg: StormConfig, seed: u64) -> Self {
        log::info!(
            "run started: seed {seed}, initial velocity {:.1}",
            cfg.initial_player_velocity
        );
        Self {
            seed,
            spawn_table: SpawnTable::new(&cfg),
            barrier: Barrier::new(cfg.meteor_range),
            player_velocity: cfg.initial_player_velocity,
            max_velocity: 0.0,
            time_ticks: 0,
            steering: Vec3::ZERO,
            steering_changed: false,
            steering_delta: Vec3::ZERO,
            hits: HitFlags::default(),
            game_over: false,
            stopped_at: None,
            meteors: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            meteor_fraction: 0.0,
            prev_steering: Vec3::ZERO,
            next_id: 1,
            cfg,
        }
    }

    /// Allocate the next meteor id
    pub(crate) fn next_meteor_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Contact notification from the host's trigger callback
    ///
    /// Unrecognized tags are ignored. The raised flag is resolved by the
    /// next velocity step, not here.
    pub fn notify_contact(&mut self, tag: &str) {
        if let Some(kind) = MeteorKind::from_tag(tag) {
            self.hits.raise(kind);
        }
    }

    /// Seconds of run time, frozen once the run ends
    pub fn run_time_secs(&self) -> f32 {
        let ticks = self.stopped_at.unwrap_or(self.time_ticks);
        ticks as f32 * crate::consts::SIM_DT
    }
}
