use std::fmt;

use serde::Serialize;

/// Deflection reported by an actuator after a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActuatorOutput {
    pub commanded: f64,
    pub angle: f64,
    pub rate: f64,
    pub acceleration: f64,
}

/// Dynamics between a commanded control value and the achieved deflection.
///
/// Implement this to put a custom surface model between the pilot command
/// and the airframe. One call to [`Actuator::update`] per simulation tick.
pub trait Actuator: Send + fmt::Debug {
    /// Advance by `dt` towards `commanded` and report the new deflection.
    fn update(&mut self, dt: f64, commanded: f64) -> ActuatorOutput;

    /// Deflection after the most recent update.
    fn output(&self) -> ActuatorOutput;

    /// Return to rest at zero deflection.
    fn reset(&mut self);

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
