//! Plain-text rendering of the controller for terminal front ends.

use crate::controller::{RunState, SignalController};
use crate::lane::Lane;
use crate::light::LightState;
use itertools::Itertools;

/// Renders one line per lane: signal, queue and countdown.
///
/// Only the green lane shows a countdown; red lanes show `0s`.
pub fn lane_panel<R>(ctrl: &SignalController<R>) -> String {
    let mut lines: Vec<String> = Lane::ALL
        .into_iter()
        .map(|lane| {
            let state = ctrl.light().state(lane);
            let timer = match state {
                LightState::Green => ctrl.countdown(),
                LightState::Red => 0,
            };
            format!(
                "{:<6} {} vehicles: {:>3}  timer: {:>2}s  waiting: {:>3}s",
                lane.name().to_uppercase(),
                signal(state),
                ctrl.counts()[lane],
                timer,
                ctrl.waits()[lane],
            )
        })
        .collect();
    let status = match ctrl.run_state() {
        RunState::Running => "running",
        RunState::Idle => "stopped",
    };
    lines.push(format!(
        "[{}] green times: {}",
        status,
        ctrl.green_times()
            .iter()
            .map(|(lane, secs)| format!("{}={}s", lane, secs))
            .join(" ")
    ));
    finish(lines)
}

/// Renders the legend of signal states.
pub fn legend() -> &'static str {
    "(G) Green light - vehicles may proceed\n( ) Red light - vehicles must stop\n"
}

/// Renders the totals gathered over the run.
pub fn dashboard<R>(ctrl: &SignalController<R>) -> String {
    let metrics = ctrl.metrics();
    let share = metrics
        .green_share()
        .iter()
        .map(|(lane, share)| format!("{}={:.0}%", lane, share * 100.0))
        .join(" ");
    finish(vec![
        format!("Phases completed:   {}", metrics.phases),
        format!("Simulated time:     {}s", metrics.seconds),
        format!("Vehicles departed:  {}", metrics.departed),
        format!("Vehicles arrived:   {}", metrics.arrived),
        format!("Average wait:       {:.1}s", metrics.average_wait()),
        format!("Longest wait:       {}s", metrics.max_wait),
        format!("Peak queue:         {}", metrics.peak_queue),
        format!(
            "Throughput:         {:.1} vehicles/minute",
            metrics.throughput_per_minute()
        ),
        format!("Green share:        {}", share),
    ])
}

/// Joins rendered lines, ending each with a newline.
fn finish(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn signal(state: LightState) -> &'static str {
    match state {
        LightState::Green => "(G)",
        LightState::Red => "( )",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;

    #[test]
    fn panel_shows_every_lane() {
        let ctrl = SignalController::seeded(SignalConfig::default(), 5).unwrap();
        let panel = lane_panel(&ctrl);
        let lines: Vec<_> = panel.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(panel.ends_with("west=3s\n"));
        assert!(lines[0].starts_with("NORTH  (G) vehicles:   5  timer: 14s"));
        assert!(lines[3].starts_with("WEST   ( ) vehicles:   1  timer:  0s"));
        assert_eq!(lines[4], "[stopped] green times: north=14s south=8s east=5s west=3s");
    }

    #[test]
    fn dashboard_starts_empty() {
        let ctrl = SignalController::seeded(SignalConfig::default(), 5).unwrap();
        let text = dashboard(&ctrl);
        assert!(text.contains("Phases completed:   0"));
        assert!(text.contains("Throughput:         0.0 vehicles/minute"));
        assert!(text.contains("north=0%"));
    }
}
