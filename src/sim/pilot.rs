use crate::aircraft::{AircraftAttributes, Control, ControlInputs};

use super::pid::Pid;

/// Source of control commands for the simulation loop.
///
/// Implement this to fly the aircraft with a custom control law. The runner
/// calls [`Pilot::command`] once per tick with the attributes published by
/// the previous tick.
pub trait Pilot {
    /// Commanded inputs for the next tick of length `dt`.
    fn command(&mut self, attributes: &AircraftAttributes, dt: f64) -> ControlInputs;

    /// Reset internal state (e.g., PID integrators).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Open-loop pilots
// ---------------------------------------------------------------------------

/// Holds the same inputs for the whole run.
#[derive(Debug, Clone, Default)]
pub struct HoldPilot {
    pub inputs: ControlInputs,
}

impl HoldPilot {
    pub fn new(inputs: ControlInputs) -> Self {
        Self { inputs }
    }
}

impl Pilot for HoldPilot {
    fn command(&mut self, _attributes: &AircraftAttributes, _dt: f64) -> ControlInputs {
        self.inputs
    }

    fn name(&self) -> &str {
        "Hold"
    }
}

/// Base inputs, with one control stepped to `amplitude` from `at` seconds on.
#[derive(Debug, Clone)]
pub struct StepPilot {
    pub control: Control,
    pub at: f64,
    pub amplitude: f64,
    pub base: ControlInputs,
}

impl StepPilot {
    pub fn new(control: Control, at: f64, amplitude: f64) -> Self {
        Self {
            control,
            at,
            amplitude,
            base: ControlInputs::default(),
        }
    }

    pub fn base(mut self, inputs: ControlInputs) -> Self { self.base = inputs; self }
}

impl Pilot for StepPilot {
    fn command(&mut self, attributes: &AircraftAttributes, _dt: f64) -> ControlInputs {
        if attributes.time >= self.at {
            self.base.with(self.control, self.amplitude)
        } else {
            self.base
        }
    }

    fn name(&self) -> &str {
        "Step"
    }
}

// ---------------------------------------------------------------------------
// Attitude hold
// ---------------------------------------------------------------------------

/// Closed-loop pitch and roll hold on elevator and aileron.
///
/// Targets are perturbation angles from trim, rad. Assumes the conventional
/// sign convention: positive elevator pitches nose down, positive aileron
/// rolls right wing down.
#[derive(Debug, Clone)]
pub struct AttitudeHoldPilot {
    pub pitch_target: f64,
    pub roll_target: f64,
    pitch_pid: Pid,
    roll_pid: Pid,
}

impl AttitudeHoldPilot {
    pub fn new(pitch_target: f64, roll_target: f64) -> Self {
        Self {
            pitch_target,
            roll_target,
            pitch_pid: Pid::new(2.0, 0.5, 0.5).output_limit(0.3),
            roll_pid: Pid::new(10.0, 1.0, 5.0).output_limit(0.3),
        }
    }

    pub fn pitch_pid(mut self, pid: Pid) -> Self { self.pitch_pid = pid; self }
    pub fn roll_pid(mut self, pid: Pid) -> Self { self.roll_pid = pid; self }
}

impl Pilot for AttitudeHoldPilot {
    fn command(&mut self, attributes: &AircraftAttributes, dt: f64) -> ControlInputs {
        let pitch_error = self.pitch_target - attributes.longitudinal.pitch;
        let roll_error = self.roll_target - attributes.lateral.roll;

        ControlInputs::new()
            .elevator(-self.pitch_pid.update(pitch_error, dt))
            .aileron(self.roll_pid.update(roll_error, dt))
    }

    fn reset(&mut self) {
        self.pitch_pid.reset();
        self.roll_pid.reset();
    }

    fn name(&self) -> &str {
        "AttitudeHold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_pilot_switches_at_step_time() {
        let mut pilot = StepPilot::new(Control::Elevator, 1.0, -0.05)
            .base(ControlInputs::new().thrust(0.1));
        let mut attrs = AircraftAttributes::default();

        attrs.time = 0.99;
        let before = pilot.command(&attrs, 0.01);
        assert_eq!(before.elevator, 0.0);
        assert_eq!(before.thrust, 0.1);

        attrs.time = 1.0;
        let after = pilot.command(&attrs, 0.01);
        assert_eq!(after.elevator, -0.05);
        assert_eq!(after.thrust, 0.1);
    }

    #[test]
    fn attitude_hold_pitches_nose_up_with_negative_elevator() {
        let mut pilot = AttitudeHoldPilot::new(0.02, 0.0);
        let cmd = pilot.command(&AircraftAttributes::default(), 0.015);
        assert!(cmd.elevator < 0.0);
        assert!(cmd.elevator >= -0.3);
        assert_eq!(cmd.aileron, 0.0);
        assert_eq!(pilot.name(), "AttitudeHold");
    }
}
