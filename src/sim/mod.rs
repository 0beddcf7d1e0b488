//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod barrier;
pub mod meteor;
pub mod state;
pub mod tick;

pub use barrier::Barrier;
pub use meteor::Meteor;
pub use state::{HitFlags, MeteorKind, SimState, SpawnTable};
pub use tick::{SessionCommand, SimEvent, TickInput, TickOutput, tick};
