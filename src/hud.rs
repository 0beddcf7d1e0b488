//! Text display protocol
//!
//! The host owns the actual text widgets; the simulation publishes plain
//! strings into named fields through `DisplaySink`, once per frame.

use crate::sim::SimState;

/// Named text fields on the host display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    /// Elapsed run time
    Time,
    /// Current and peak velocity
    Velocity,
    /// Aiming crosshair, shown only while the run is live
    Target,
    /// Game-over banner
    GameOver,
    /// Restart/exit prompt
    Restart,
}

/// Text sink the host implements (screen text, terminal, test capture)
pub trait DisplaySink {
    fn set_text(&mut self, field: DisplayField, text: &str);
}

/// Time display string
pub fn format_time(secs: f32) -> String {
    format!("    Time: {secs:.1}\n")
}

/// Velocity display string, current and peak with right-aligned labels
pub fn format_velocity(velocity: f32, max_velocity: f32) -> String {
    format!("{velocity:.1} :Velocity            \n{max_velocity:.1} :Max Velocity    \n")
}

/// Push the current display strings into the sink
///
/// Time and velocity stop refreshing once the run is over; the banner and
/// prompt swap in and the crosshair clears.
pub fn publish(state: &SimState, sink: &mut dyn DisplaySink) {
    if state.game_over {
        sink.set_text(DisplayField::Target, "");
        sink.set_text(DisplayField::GameOver, "Game Over");
        sink.set_text(
            DisplayField::Restart,
            "Press \"R\" to Restart, or \"X\" to Exit.",
        );
    } else {
        sink.set_text(DisplayField::Target, "+");
        sink.set_text(DisplayField::GameOver, "");
        sink.set_text(DisplayField::Restart, "");
        sink.set_text(DisplayField::Time, &format_time(state.run_time_secs()));
        sink.set_text(
            DisplayField::Velocity,
            &format_velocity(state.player_velocity, state.max_velocity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StormConfig;

    #[derive(Default)]
    struct Capture(Vec<(DisplayField, String)>);

    impl DisplaySink for Capture {
        fn set_text(&mut self, field: DisplayField, text: &str) {
            self.0.push((field, text.to_string()));
        }
    }

    impl Capture {
        fn get(&self, field: DisplayField) -> Option<&str> {
            self.0
                .iter()
                .rev()
                .find(|(f, _)| *f == field)
                .map(|(_, t)| t.as_str())
        }
    }

    #[test]
    fn time_and_velocity_formats() {
        assert_eq!(format_time(12.34), "    Time: 12.3\n");
        assert_eq!(
            format_velocity(5.24, 19.0),
            "5.2 :Velocity            \n19.0 :Max Velocity    \n"
        );
    }

    #[test]
    fn live_run_publishes_crosshair_and_scalars() {
        let state = SimState::new(StormConfig::default(), 1);
        let mut sink = Capture::default();
        publish(&state, &mut sink);

        assert_eq!(sink.get(DisplayField::Target), Some("+"));
        assert_eq!(sink.get(DisplayField::GameOver), Some(""));
        assert!(sink.get(DisplayField::Time).is_some());
        assert!(sink.get(DisplayField::Velocity).is_some());
    }

    #[test]
    fn game_over_swaps_banner_in_and_freezes_scalars() {
        let mut state = SimState::new(StormConfig::default(), 1);
        state.game_over = true;
        let mut sink = Capture::default();
        publish(&state, &mut sink);

        assert_eq!(sink.get(DisplayField::Target), Some(""));
        assert_eq!(sink.get(DisplayField::GameOver), Some("Game Over"));
        assert_eq!(
            sink.get(DisplayField::Restart),
            Some("Press \"R\" to Restart, or \"X\" to Exit.")
        );
        assert_eq!(sink.get(DisplayField::Time), None);
        assert_eq!(sink.get(DisplayField::Velocity), None);
    }
}
