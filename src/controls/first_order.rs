use super::actuator::{Actuator, ActuatorOutput};

// ---------------------------------------------------------------------------
// Zero-lag surface
// ---------------------------------------------------------------------------

/// Surface that reaches the commanded angle instantly.
///
/// Rate is reported as `(previous - commanded) / dt` and acceleration as
/// `(previous_rate - rate) / dt`: differences of successive commands, not
/// any physical lag. Callers read these signs as published.
#[derive(Debug, Clone, Default)]
pub struct FirstOrderSurface {
    out: ActuatorOutput,
}

impl FirstOrderSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actuator for FirstOrderSurface {
    fn update(&mut self, dt: f64, commanded: f64) -> ActuatorOutput {
        let (rate, acceleration) = if dt > 0.0 {
            let rate = (self.out.commanded - commanded) / dt;
            (rate, (self.out.rate - rate) / dt)
        } else {
            (0.0, 0.0)
        };

        self.out = ActuatorOutput {
            commanded,
            angle: commanded,
            rate,
            acceleration,
        };
        self.out
    }

    fn output(&self) -> ActuatorOutput {
        self.out
    }

    fn reset(&mut self) {
        self.out = ActuatorOutput::default();
    }

    fn name(&self) -> &str {
        "FirstOrderSurface"
    }
}
