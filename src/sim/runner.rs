use log::debug;
use serde::Serialize;

use crate::aircraft::{Aircraft, AircraftAttributes, ControlInputs};
use crate::dynamics::linear::check_time_step;
use crate::error::Result;

use super::config::SimConfig;
use super::pilot::{HoldPilot, Pilot};

/// One row of a simulation trace: what was commanded on the tick that
/// produced `attributes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub inputs: ControlInputs,
    pub attributes: AircraftAttributes,
}

impl Snapshot {
    pub fn time(&self) -> f64 {
        self.attributes.time
    }
}

// ---------------------------------------------------------------------------
// Fixed-step run
// ---------------------------------------------------------------------------

/// Fly `aircraft` from its current state for `config.max_time` seconds.
///
/// The first snapshot is the starting state with zero inputs; one more is
/// recorded per tick.
pub fn simulate_with(
    aircraft: &mut Aircraft,
    config: &SimConfig,
    pilot: &mut dyn Pilot,
) -> Result<Vec<Snapshot>> {
    check_time_step(config.dt)?;
    let steps = config.steps();

    debug!(
        "simulating {} ticks of {} s with pilot {}",
        steps,
        config.dt,
        pilot.name()
    );

    let mut trace = Vec::with_capacity(steps.min(200_000) + 1);
    trace.push(Snapshot {
        inputs: ControlInputs::default(),
        attributes: *aircraft.attributes(),
    });

    for _ in 0..steps {
        let inputs = pilot.command(aircraft.attributes(), config.dt);
        aircraft.update(config.dt, &inputs)?;
        trace.push(Snapshot {
            inputs,
            attributes: *aircraft.attributes(),
        });
    }

    Ok(trace)
}

/// Fly with all controls held at zero (convenience wrapper).
pub fn simulate(aircraft: &mut Aircraft, config: &SimConfig) -> Result<Vec<Snapshot>> {
    let mut pilot = HoldPilot::default();
    simulate_with(aircraft, config, &mut pilot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Control;
    use crate::error::Error;
    use crate::presets;
    use crate::sim::pilot::{AttitudeHoldPilot, StepPilot};
    use approx::assert_relative_eq;

    fn aircraft() -> Aircraft {
        Aircraft::new(presets::b747_cruise()).unwrap()
    }

    #[test]
    fn trace_has_one_snapshot_per_tick() {
        let mut ac = aircraft();
        let config = SimConfig { dt: 0.015, max_time: 1.5 };
        let trace = simulate(&mut ac, &config).unwrap();
        assert_eq!(trace.len(), 101);
        assert_eq!(trace[0].time(), 0.0);
        assert_relative_eq!(trace.last().unwrap().time(), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn unforced_run_stays_at_trim() {
        let mut ac = aircraft();
        let trace = simulate(&mut ac, &SimConfig::default()).unwrap();
        let h0 = ac.definition().trim.altitude;
        assert!(trace.iter().all(|s| s.attributes.longitudinal.h == h0));
    }

    #[test]
    fn elevator_step_pitches_the_nose() {
        let mut ac = aircraft();
        let config = SimConfig { dt: 0.015, max_time: 5.0 };
        let mut pilot = StepPilot::new(Control::Elevator, 1.0, -0.02);
        let trace = simulate_with(&mut ac, &config, &mut pilot).unwrap();

        let before = trace.iter().find(|s| s.time() >= 0.9).unwrap();
        assert_eq!(before.attributes.longitudinal.pitch, 0.0);
        let last = trace.last().unwrap();
        assert_eq!(last.inputs.elevator, -0.02);
        assert!(last.attributes.longitudinal.pitch > 0.0, "nose-up elevator should raise pitch");
    }

    #[test]
    fn attitude_hold_settles_on_targets() {
        let mut ac = aircraft();
        let mut pilot = AttitudeHoldPilot::new(0.02, 0.05);
        let trace = simulate_with(&mut ac, &SimConfig::default(), &mut pilot).unwrap();
        let last = trace.last().unwrap().attributes;
        assert!((last.longitudinal.pitch - 0.02).abs() < 2e-3, "pitch {}", last.longitudinal.pitch);
        assert!((last.lateral.roll - 0.05).abs() < 5e-3, "roll {}", last.lateral.roll);
    }

    #[test]
    fn invalid_time_step_is_rejected() {
        let mut ac = aircraft();
        let config = SimConfig { dt: 0.0, max_time: 1.0 };
        assert!(matches!(simulate(&mut ac, &config), Err(Error::InvalidTimeStep(_))));
    }
}
