//! Session-best tracking across restarts
//!
//! Lives outside the run state so a restart wipes the run, not the bests.
//! In-memory only; nothing here survives the process.

/// Bests across every run of one process session
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionRecords {
    /// Longest run, in ticks
    pub longest_run_ticks: u64,
    /// Fastest forward velocity seen in any run
    pub max_velocity: f32,
    /// Completed runs this session
    pub runs: u32,
}

impl SessionRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished run into the session bests
    pub fn observe_run(&mut self, run_ticks: u64, run_max_velocity: f32) {
        self.runs += 1;
        if run_ticks > self.longest_run_ticks {
            self.longest_run_ticks = run_ticks;
        }
        if run_max_velocity > self.max_velocity {
            self.max_velocity = run_max_velocity;
        }
    }

    /// Longest run in seconds
    pub fn longest_run_secs(&self) -> f32 {
        self.longest_run_ticks as f32 * crate::consts::SIM_DT
    }
}
