//! Fixed timestep simulation tick
//!
//! Core loop that advances a run deterministically. Step order within a
//! tick is load-bearing: velocity resolution feeds steering, steering feeds
//! the emitter, and the meteors advance against the freshly published
//! values.

use glam::Vec3;
use rand::Rng;

use super::meteor::Meteor;
use super::state::SimState;
use crate::consts::{
    EMITTER_HALF_HEIGHT, EMITTER_HALF_WIDTH, PLAYER_CONTACT_RADIUS, PLAYER_CONTACT_Z,
};
use crate::sim::MeteorKind;
use crate::{clamp_axis, uniform_spread};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Digital/analog horizontal axis, already in [-1, 1]
    pub horizontal: f32,
    /// Digital/analog vertical axis, already in [-1, 1]
    pub vertical: f32,
    /// Pointer delta since the last tick, unscaled
    pub pointer_dx: f32,
    pub pointer_dy: f32,
    /// Restart request; honored only after game over
    pub restart: bool,
    /// Exit request; honored only after game over
    pub exit: bool,
}

/// Commands the host must carry out, surfaced only after game over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Reconstruct the run from configuration
    Restart,
    /// Quit the application
    Exit,
}

/// Observations the host may care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A meteor crossed the player contact plane inside the contact radius.
    /// The host routes this back through `SimState::notify_contact`, the
    /// same path an engine trigger callback would use.
    PlayerContact { id: u32, kind: MeteorKind },
}

/// What one tick produced
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub command: Option<SessionCommand>,
    pub events: Vec<SimEvent>,
}

/// Advance the run by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> TickOutput {
    let mut out = TickOutput::default();
    state.time_ticks += 1;

    // Slow the player down and fold in any contact made since last tick.
    update_velocity(state);

    // Steering input; after game over only restart/exit are read.
    out.command = process_input(state, input);

    // Seed the field ahead of the player.
    spawn_meteors(state);

    // Every meteor advances on its own, then off-field cleanup.
    advance_meteors(state, dt, &mut out.events);

    // Refresh the scalars the display publishes.
    refresh_score(state);

    out
}

/// Velocity decay and contact resolution
///
/// At most one raised flag takes effect per tick, highest priority first;
/// the selected flag is cleared and the rest stay raised.
fn update_velocity(state: &mut SimState) {
    if state.game_over {
        return;
    }

    state.player_velocity *= state.cfg.decay_velocity_factor;
    state.player_velocity -= state.cfg.decay_velocity_subtract;

    if let Some(kind) = state.hits.take_highest() {
        let delta = state.cfg.contact_delta(kind);
        state.player_velocity += delta;
        log::debug!("contact resolved: {kind:?} ({delta:+.2})");
    }

    if state.player_velocity < 0.0 {
        state.player_velocity = 0.0;
    }

    if state.player_velocity == 0.0 {
        state.stopped_at = Some(state.time_ticks);
        state.game_over = true;
        log::info!(
            "run over after {:.1}s, peak velocity {:.1}",
            state.run_time_secs(),
            state.max_velocity
        );
    }

    if state.player_velocity > state.max_velocity {
        state.max_velocity = state.player_velocity;
    }
}

/// Steering input, or restart/exit handling once the run is over
fn process_input(state: &mut SimState, input: &TickInput) -> Option<SessionCommand> {
    if state.game_over {
        if input.restart {
            return Some(SessionCommand::Restart);
        }
        if input.exit {
            return Some(SessionCommand::Exit);
        }
        return None;
    }

    let mut horizontal = input.horizontal;
    let mut vertical = input.vertical;

    // Pointer deltas fold into the axes; the combined axes are clamped so a
    // fast pointer cannot out-steer the pad.
    if state.cfg.mouse_speed != 0.0 {
        horizontal = clamp_axis(horizontal + input.pointer_dx * state.cfg.mouse_speed);
        vertical = clamp_axis(vertical + input.pointer_dy * state.cfg.mouse_speed);
    }

    let movement = Vec3::new(horizontal, vertical, 0.0);
    state.steering = movement * state.player_velocity * state.cfg.xy_steering_factor;

    if state.steering == state.prev_steering {
        state.steering_changed = false;
    } else {
        state.steering_changed = true;
        state.steering_delta = state.prev_steering - state.steering;
    }
    state.prev_steering = state.steering;

    None
}

/// Spawn this tick's share of new meteors
///
/// The spawn rate is fractional; the remainder carries over so density
/// tracks velocity exactly over time.
fn spawn_meteors(state: &mut SimState) {
    if state.game_over {
        return;
    }

    let rate = state.player_velocity * state.cfg.meteors_per_unit + state.meteor_fraction;
    let count = rate as u32;
    state.meteor_fraction = rate - count as f32;

    let half_width = state.cfg.meteor_range * EMITTER_HALF_WIDTH;
    let half_height = state.cfg.meteor_range * EMITTER_HALF_HEIGHT;

    for _ in 0..count {
        let draw: f32 = state.rng.random();
        let kind = state.spawn_table.classify(draw);

        // The emitter is offset against the steering so the field stays
        // centered on the player's course.
        let offset = Vec3::new(
            uniform_spread(&mut state.rng, half_width),
            uniform_spread(&mut state.rng, half_height),
            state.cfg.meteor_range,
        );
        let pos = -state.steering + offset;

        let id = state.next_meteor_id();
        let meteor = Meteor::spawn(
            id,
            kind,
            pos,
            state.player_velocity,
            state.steering,
            &state.cfg,
            &mut state.rng,
        );
        state.meteors.push(meteor);
    }
}

/// Advance every meteor and reclaim the ones that left the field
///
/// Cull checks run before the velocity assignment: a meteor is removed on
/// the first tick after its position crossed a boundary, never sooner.
/// Meteors keep drifting after game over, just with nothing feeding them.
fn advance_meteors(state: &mut SimState, dt: f32, events: &mut Vec<SimEvent>) {
    let barrier = state.barrier;
    state
        .meteors
        .retain(|meteor| !(meteor.behind_camera() || barrier.entered(meteor.pos)));

    let player_velocity = state.player_velocity;
    let steering = state.steering;
    for meteor in &mut state.meteors {
        meteor.vel = meteor.drift_velocity(player_velocity, steering);
        let prev_z = meteor.pos.z;
        meteor.pos += meteor.vel * dt;

        // Report contact-plane crossings; raising flags stays with the
        // host's trigger callback.
        let crossed = prev_z > PLAYER_CONTACT_Z && meteor.pos.z <= PLAYER_CONTACT_Z;
        if crossed && meteor.pos.truncate().length() <= PLAYER_CONTACT_RADIUS {
            events.push(SimEvent::PlayerContact {
                id: meteor.id,
                kind: meteor.kind,
            });
        }
    }
}

/// Refresh the published scalars; frozen after game over
fn refresh_score(state: &mut SimState) {
    if state.game_over {
        return;
    }
    if state.player_velocity > state.max_velocity {
        state.max_velocity = state.player_velocity;
    }
}
