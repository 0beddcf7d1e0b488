//! Meteor Storm entry point
//!
//! Drives the simulation headless at a fixed timestep. A scripted autopilot
//! stands in for input devices, contact events are routed back through the
//! notification path the way an engine trigger callback would deliver them,
//! and the display lands on stdout.

use std::env;
use std::fs;
use std::process::ExitCode;

use meteor_storm::consts::{MAX_SUBSTEPS, SIM_DT};
use meteor_storm::hud::{self, DisplayField, DisplaySink};
use meteor_storm::sim::{SessionCommand, SimEvent, SimState, TickInput, tick};
use meteor_storm::{SessionRecords, StormConfig};

/// Runs per session before the autopilot exits
const DEMO_RUNS: u32 = 3;

/// Publish the display roughly once per simulated second
const HUD_INTERVAL_TICKS: u64 = 50;

/// Hard cap on driver frames, in case tuning keeps a run alive forever
const MAX_FRAMES: u64 = 500_000;

/// Terminal display sink: one line per non-empty field update
struct StdoutSink;

impl DisplaySink for StdoutSink {
    fn set_text(&mut self, field: DisplayField, text: &str) {
        if !text.is_empty() {
            println!("[{:?}] {}", field, text.trim_end());
        }
    }
}

/// One session: consecutive runs sharing tuning and records
struct Session {
    cfg: StormConfig,
    state: SimState,
    records: SessionRecords,
    accumulator: f32,
    next_seed: u64,
}

impl Session {
    fn new(cfg: StormConfig, seed: u64) -> Self {
        Self {
            state: SimState::new(cfg.clone(), seed),
            cfg,
            records: SessionRecords::new(),
            accumulator: 0.0,
            next_seed: seed.wrapping_add(1),
        }
    }

    /// Run simulation substeps for one frame's worth of time
    fn update(&mut self, frame_dt: f32, input: &TickInput) -> Option<SessionCommand> {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let out = tick(&mut self.state, input, SIM_DT);

            // Trigger callback: contact reports go straight back in.
            for event in &out.events {
                let SimEvent::PlayerContact { kind, .. } = event;
                self.state.notify_contact(kind.tag());
            }

            self.accumulator -= SIM_DT;
            substeps += 1;

            if out.command.is_some() {
                return out.command;
            }
        }
        None
    }

    /// Fold the finished run into the session records
    fn finish_run(&mut self) {
        let run_ticks = self.state.stopped_at.unwrap_or(self.state.time_ticks);
        self.records.observe_run(run_ticks, self.state.max_velocity);
    }

    /// Fresh state, fresh seed, same tuning
    fn restart(&mut self) {
        self.state = SimState::new(self.cfg.clone(), self.next_seed);
        self.next_seed = self.next_seed.wrapping_add(1);
        self.accumulator = 0.0;
    }
}

/// Scripted steering so the headless demo exercises the whole loop
fn autopilot(state: &SimState, runs_done: u32) -> TickInput {
    if state.game_over {
        return TickInput {
            restart: runs_done + 1 < DEMO_RUNS,
            exit: runs_done + 1 >= DEMO_RUNS,
            ..TickInput::default()
        };
    }

    let t = state.time_ticks as f32 * SIM_DT;
    TickInput {
        horizontal: (t * 0.6).sin() * 0.8,
        vertical: (t * 0.35).cos() * 0.4,
        ..TickInput::default()
    }
}

fn load_config(path: &str) -> Result<StormConfig, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    StormConfig::from_json_str(&json).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let cfg = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::error!("invalid configuration: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => StormConfig::default(),
    };
    if let Err(err) = cfg.validate() {
        log::error!("invalid configuration: {err}");
        return ExitCode::FAILURE;
    }

    let seed = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5eed);

    let mut session = Session::new(cfg, seed);
    let mut sink = StdoutSink;
    let mut last_hud_tick = 0;
    let mut game_over_announced = false;

    for _ in 0..MAX_FRAMES {
        let input = autopilot(&session.state, session.records.runs);
        let command = session.update(SIM_DT, &input);

        if session.state.game_over && !game_over_announced {
            hud::publish(&session.state, &mut sink);
            game_over_announced = true;
        } else if session.state.time_ticks >= last_hud_tick + HUD_INTERVAL_TICKS {
            hud::publish(&session.state, &mut sink);
            last_hud_tick = session.state.time_ticks;
        }

        match command {
            Some(SessionCommand::Restart) => {
                session.finish_run();
                session.restart();
                last_hud_tick = 0;
                game_over_announced = false;
            }
            Some(SessionCommand::Exit) => {
                session.finish_run();
                let records = session.records;
                println!(
                    "session: {} runs, longest {:.1}s, fastest {:.1}",
                    records.runs,
                    records.longest_run_secs(),
                    records.max_velocity
                );
                return ExitCode::SUCCESS;
            }
            None => {}
        }
    }

    log::warn!("frame cap reached before the session ended");
    ExitCode::SUCCESS
}
